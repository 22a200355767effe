pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileAttendanceRepository;
pub use memory::InMemoryAttendanceRepository;
pub use traits::AttendanceRepository;
