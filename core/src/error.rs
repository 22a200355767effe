use thiserror::Error;

use crate::calendar::YearMonth;
use crate::model::employee::EmployeeId;

/// Recoverable, caller-visible failures raised at the write boundary and by
/// the input parsers. Reads never produce these; missing data falls back to
/// `Unmarked`, the derived count, or 0%.
#[derive(Debug, Error, PartialEq)]
pub enum AttendanceError {
    #[error("Unknown employee id {employee_id}")]
    UnknownEmployee { employee_id: EmployeeId },

    #[error("Override of {present_days} present days for employee {employee_id} in {year_month} is outside 0..={max}")]
    InvalidOverride {
        employee_id: EmployeeId,
        year_month: YearMonth,
        present_days: u32,
        max: u32,
    },

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidYearMonth(String),

    #[error("Could not parse date: {0}")]
    InvalidDate(String),

    #[error("Unknown attendance status '{0}', expected present or absent")]
    InvalidStatus(String),
}
