pub mod attendance;
pub mod employee;
pub mod snapshot;
pub mod summary;
