use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::model::employee::EmployeeId;

/// Derived on demand, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyAttendanceSummary {
    pub employee_id: EmployeeId,
    pub year_month: YearMonth,
    pub present_days: u32,
    /// Calendar days in the month, regardless of how many marks exist.
    pub total_days: u32,
    pub percentage: u32,
    /// True when `present_days` came from an override rather than the marks.
    pub overridden: bool,
}

/// One month of a yearly view. `total_days` counts recorded marks,
/// not calendar days.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct YearlyMonthEntry {
    pub month: u32,
    pub month_name: String,
    pub present_days: u32,
    pub total_days: u32,
    pub percentage: u32,
}

impl YearlyMonthEntry {
    pub fn absent_days(&self) -> u32 {
        self.total_days - self.present_days
    }
}

/// Tally of one day's statuses across a set of employees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayStatusCounts {
    pub present: usize,
    pub absent: usize,
    pub not_marked: usize,
    pub total: usize,
}
