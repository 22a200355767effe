//! Flat CSV rendering of monthly and yearly summaries.
//!
//! Fields are joined with commas and never quoted. Roster fields are not
//! expected to contain commas; a value that does will shift the columns.

use std::collections::HashMap;

use tracing::debug;

use crate::calendar::{month_abbrev, YearMonth};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::summary::{MonthlyAttendanceSummary, YearlyMonthEntry};

pub const MONTHLY_HEADER: [&str; 7] = [
    "Employee ID",
    "Name",
    "Department",
    "Position",
    "Present Days",
    "Total Days",
    "Attendance %",
];

pub fn monthly_report_filename(year_month: YearMonth) -> String {
    format!("attendance-{}.csv", year_month)
}

pub fn yearly_report_filename(year: i32) -> String {
    format!("attendance-{}.csv", year)
}

pub fn serialize_monthly_report(rows: &[(&Employee, MonthlyAttendanceSummary)]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(MONTHLY_HEADER.join(","));

    for (employee, summary) in rows {
        lines.push(
            [
                employee.employee_code.clone(),
                employee.name.clone(),
                employee.department.clone(),
                employee.position.clone(),
                summary.present_days.to_string(),
                summary.total_days.to_string(),
                format!("{}%", summary.percentage),
            ]
            .join(","),
        );
    }

    debug!(rows = rows.len(), "serialized monthly report");
    lines.join("\n")
}

/// One row per employee in `employees` order. A month with no entry for an
/// employee is written as `0%`.
pub fn serialize_yearly_report(
    employees: &[Employee],
    summaries: &HashMap<EmployeeId, Vec<YearlyMonthEntry>>,
) -> String {
    let mut header: Vec<String> = vec![
        "Employee ID".to_string(),
        "Name".to_string(),
        "Department".to_string(),
    ];
    header.extend((1..=12).map(|m| format!("{} %", month_abbrev(m))));

    let mut lines = Vec::with_capacity(employees.len() + 1);
    lines.push(header.join(","));

    for employee in employees {
        let entries = summaries.get(&employee.id);
        let mut row = vec![
            employee.employee_code.clone(),
            employee.name.clone(),
            employee.department.clone(),
        ];
        row.extend((1..=12).map(|month| {
            let pct = entries
                .and_then(|list| list.iter().find(|e| e.month == month))
                .map(|e| e.percentage)
                .unwrap_or(0);
            format!("{}%", pct)
        }));
        lines.push(row.join(","));
    }

    debug!(rows = employees.len(), "serialized yearly report");
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::month_name;

    fn employees() -> Vec<Employee> {
        vec![
            Employee::new(1, "Alice Moreno", "EMP-001", "Engineering", "Developer"),
            Employee::new(2, "Bilal Khan", "EMP-002", "Finance", "Analyst"),
        ]
    }

    fn monthly(employee_id: EmployeeId, present_days: u32, percentage: u32) -> MonthlyAttendanceSummary {
        MonthlyAttendanceSummary {
            employee_id,
            year_month: YearMonth::new(2025, 6).unwrap(),
            present_days,
            total_days: 30,
            percentage,
            overridden: false,
        }
    }

    fn entry(month: u32, percentage: u32) -> YearlyMonthEntry {
        YearlyMonthEntry {
            month,
            month_name: month_name(month).to_string(),
            present_days: 0,
            total_days: 0,
            percentage,
        }
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            monthly_report_filename(YearMonth::new(2025, 3).unwrap()),
            "attendance-2025-03.csv"
        );
        assert_eq!(yearly_report_filename(2025), "attendance-2025.csv");
    }

    #[test]
    fn test_monthly_report_layout() {
        let staff = employees();
        let rows = vec![(&staff[0], monthly(1, 20, 67)), (&staff[1], monthly(2, 25, 83))];
        let csv = serialize_monthly_report(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Employee ID,Name,Department,Position,Present Days,Total Days,Attendance %"
        );
        assert_eq!(lines[1], "EMP-001,Alice Moreno,Engineering,Developer,20,30,67%");
        assert_eq!(lines[2], "EMP-002,Bilal Khan,Finance,Analyst,25,30,83%");
    }

    #[test]
    fn test_monthly_report_fields_parse_back() {
        let staff = employees();
        let rows = vec![(&staff[0], monthly(1, 20, 67)), (&staff[1], monthly(2, 0, 0))];
        let csv = serialize_monthly_report(&rows);

        let parsed: Vec<(u32, u32, u32)> = csv
            .lines()
            .skip(1)
            .map(|line| {
                let fields: Vec<&str> = line.split(',').collect();
                (
                    fields[4].parse().unwrap(),
                    fields[5].parse().unwrap(),
                    fields[6].trim_end_matches('%').parse().unwrap(),
                )
            })
            .collect();
        let expected: Vec<(u32, u32, u32)> = rows
            .iter()
            .map(|(_, s)| (s.present_days, s.total_days, s.percentage))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_monthly_report_empty_roster_is_header_only() {
        let csv = serialize_monthly_report(&[]);
        assert_eq!(csv, MONTHLY_HEADER.join(","));
    }

    #[test]
    fn test_yearly_report_layout_and_missing_months() {
        let staff = employees();
        let mut summaries = HashMap::new();
        summaries.insert(1, vec![entry(1, 90), entry(2, 85), entry(12, 100)]);

        let csv = serialize_yearly_report(&staff, &summaries);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Employee ID,Name,Department,Jan %,Feb %,Mar %,Apr %,May %,Jun %,Jul %,Aug %,Sep %,Oct %,Nov %,Dec %"
        );
        assert_eq!(
            lines[1],
            "EMP-001,Alice Moreno,Engineering,90%,85%,0%,0%,0%,0%,0%,0%,0%,0%,0%,100%"
        );
        // no summaries at all for the second employee
        assert_eq!(
            lines[2],
            "EMP-002,Bilal Khan,Finance,0%,0%,0%,0%,0%,0%,0%,0%,0%,0%,0%,0%"
        );
    }
}
