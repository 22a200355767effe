use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::error::AttendanceError;
use crate::model::employee::EmployeeId;

/// A status that can be written. `Unmarked` is the absence of a mark,
/// so it has no counterpart here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MarkStatus {
    Present,
    Absent,
}

impl FromStr for MarkStatus {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p" | "present" => Ok(MarkStatus::Present),
            "a" | "absent" => Ok(MarkStatus::Absent),
            _ => Err(AttendanceError::InvalidStatus(s.to_string())),
        }
    }
}

/// Tri-state status as seen by readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[default]
    Unmarked,
}

impl From<MarkStatus> for AttendanceStatus {
    fn from(status: MarkStatus) -> Self {
        match status {
            MarkStatus::Present => AttendanceStatus::Present,
            MarkStatus::Absent => AttendanceStatus::Absent,
        }
    }
}

impl From<Option<MarkStatus>> for AttendanceStatus {
    fn from(mark: Option<MarkStatus>) -> Self {
        mark.map(AttendanceStatus::from).unwrap_or_default()
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Unmarked => "Not Marked",
        };
        f.write_str(label)
    }
}

/// One recorded fact. At most one exists per `(date, employee_id)`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceMark {
    pub date: NaiveDate,
    pub employee_id: EmployeeId,
    pub status: MarkStatus,
}

impl AttendanceMark {
    pub fn new(employee_id: EmployeeId, status: MarkStatus, date: NaiveDate) -> Self {
        Self {
            date,
            employee_id,
            status,
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == MarkStatus::Present
    }
}

/// Manually supplied present-day count for one employee and month.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyOverride {
    pub employee_id: EmployeeId,
    pub year_month: YearMonth,
    pub present_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mark_status() {
        assert_eq!("present".parse::<MarkStatus>().unwrap(), MarkStatus::Present);
        assert_eq!("P".parse::<MarkStatus>().unwrap(), MarkStatus::Present);
        assert_eq!("absent".parse::<MarkStatus>().unwrap(), MarkStatus::Absent);
        assert_eq!(
            "late".parse::<MarkStatus>(),
            Err(AttendanceError::InvalidStatus("late".to_string()))
        );
    }

    #[test]
    fn test_missing_mark_is_unmarked() {
        assert_eq!(AttendanceStatus::from(None), AttendanceStatus::Unmarked);
        assert_eq!(
            AttendanceStatus::from(Some(MarkStatus::Absent)),
            AttendanceStatus::Absent
        );
        assert_eq!(AttendanceStatus::Unmarked.to_string(), "Not Marked");
    }
}
