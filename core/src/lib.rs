pub mod calendar;
pub mod error;
pub mod model;
pub mod report;
pub mod repository;
pub mod seed;
pub mod service;

pub use calendar::{days_in_month, parse_day, YearMonth};
pub use error::AttendanceError;
pub use model::attendance::{AttendanceMark, AttendanceStatus, MarkStatus, MonthlyOverride};
pub use model::employee::{Employee, EmployeeId};
pub use model::snapshot::RegisterSnapshot;
pub use model::summary::{DayStatusCounts, MonthlyAttendanceSummary, YearlyMonthEntry};
pub use report::{serialize_monthly_report, serialize_yearly_report};
pub use repository::{AttendanceRepository, FileAttendanceRepository, InMemoryAttendanceRepository};
pub use service::attendance_service::AttendanceService;
