use chrono::Datelike;

use crate::calendar::{month_name, YearMonth};
use crate::model::attendance::{AttendanceMark, AttendanceStatus};
use crate::model::employee::EmployeeId;
use crate::model::summary::{DayStatusCounts, MonthlyAttendanceSummary, YearlyMonthEntry};

/// `round(present / total * 100)`, or 0 when `total` is 0.
pub fn percentage(present: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(present) / f64::from(total) * 100.0).round() as u32
}

/// Count of Present marks falling inside `year_month`.
pub fn derive_default_present(marks: &[AttendanceMark], year_month: YearMonth) -> u32 {
    marks
        .iter()
        .filter(|m| year_month.contains(m.date) && m.is_present())
        .count() as u32
}

pub fn resolve_present_days(override_days: Option<u32>, derived: u32) -> u32 {
    override_days.unwrap_or(derived)
}

/// Monthly view: the denominator is the calendar length of the month.
/// The override is taken as given; bounds are enforced where it is written.
pub fn monthly_summary(
    employee_id: EmployeeId,
    year_month: YearMonth,
    marks: &[AttendanceMark],
    override_days: Option<u32>,
) -> MonthlyAttendanceSummary {
    let total_days = year_month.days();
    let derived = derive_default_present(marks, year_month);
    let present_days = resolve_present_days(override_days, derived);

    MonthlyAttendanceSummary {
        employee_id,
        year_month,
        present_days,
        total_days,
        percentage: percentage(present_days, total_days),
        overridden: override_days.is_some(),
    }
}

/// Yearly view: twelve entries, January first. The denominator of each
/// month is the number of marks recorded in it. Overrides do not apply.
pub fn yearly_summary(year: i32, marks: &[AttendanceMark]) -> Vec<YearlyMonthEntry> {
    let mut present = [0u32; 12];
    let mut recorded = [0u32; 12];

    for mark in marks.iter().filter(|m| m.date.year() == year) {
        let idx = mark.date.month0() as usize;
        recorded[idx] += 1;
        if mark.is_present() {
            present[idx] += 1;
        }
    }

    (0..12)
        .map(|idx| {
            let month = idx as u32 + 1;
            YearlyMonthEntry {
                month,
                month_name: month_name(month).to_string(),
                present_days: present[idx],
                total_days: recorded[idx],
                percentage: percentage(present[idx], recorded[idx]),
            }
        })
        .collect()
}

/// Partitions a set of per-employee statuses. `total` is the number of
/// statuses given, so the three buckets always sum to it.
pub fn day_status_counts<I>(statuses: I) -> DayStatusCounts
where
    I: IntoIterator<Item = AttendanceStatus>,
{
    statuses
        .into_iter()
        .fold(DayStatusCounts::default(), |mut counts, status| {
            match status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Absent => counts.absent += 1,
                AttendanceStatus::Unmarked => counts.not_marked += 1,
            }
            counts.total += 1;
            counts
        })
}
