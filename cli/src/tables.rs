use std::collections::HashMap;

use attendance_core::calendar::month_abbrev;
use attendance_core::{
    AttendanceStatus, DayStatusCounts, Employee, EmployeeId, MonthlyAttendanceSummary, YearlyMonthEntry,
};
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct RosterRow {
    #[tabled(rename = "ID")]
    id: EmployeeId,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Position")]
    position: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Present")]
    present: usize,
    #[tabled(rename = "Absent")]
    absent: usize,
    #[tabled(rename = "Not Marked")]
    not_marked: usize,
    #[tabled(rename = "Total")]
    total: usize,
}

#[derive(Tabled)]
struct MonthlyRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Present")]
    present: String,
    #[tabled(rename = "Total")]
    total: u32,
    #[tabled(rename = "Attendance")]
    percentage: String,
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::modern())
        .modify(Rows::first(), Color::FG_CYAN);
    table.to_string()
}

pub fn render_roster(employees: &[Employee]) -> String {
    let rows: Vec<RosterRow> = employees
        .iter()
        .map(|e| RosterRow {
            id: e.id,
            code: e.employee_code.clone(),
            name: e.name.clone(),
            department: e.department.clone(),
            position: e.position.clone(),
        })
        .collect();
    styled(Table::new(rows))
}

pub fn render_day(statuses: &[(&Employee, AttendanceStatus)]) -> String {
    let rows: Vec<DayRow> = statuses
        .iter()
        .map(|(e, status)| DayRow {
            code: e.employee_code.clone(),
            name: e.name.clone(),
            department: e.department.clone(),
            status: status.to_string(),
        })
        .collect();
    styled(Table::new(rows))
}

pub fn render_stats(stats: &DayStatusCounts) -> String {
    styled(Table::new([StatsRow {
        present: stats.present,
        absent: stats.absent,
        not_marked: stats.not_marked,
        total: stats.total,
    }]))
}

/// Overridden counts are flagged with `*`.
pub fn render_monthly(rows: &[(&Employee, MonthlyAttendanceSummary)]) -> String {
    let rows: Vec<MonthlyRow> = rows
        .iter()
        .map(|(e, s)| MonthlyRow {
            code: e.employee_code.clone(),
            name: e.name.clone(),
            department: e.department.clone(),
            present: if s.overridden {
                format!("{}*", s.present_days)
            } else {
                s.present_days.to_string()
            },
            total: s.total_days,
            percentage: format!("{}%", s.percentage),
        })
        .collect();
    styled(Table::new(rows))
}

pub fn render_yearly(employees: &[Employee], summaries: &HashMap<EmployeeId, Vec<YearlyMonthEntry>>) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Code".to_string(), "Name".to_string()];
    header.extend((1..=12).map(|m| month_abbrev(m).to_string()));
    builder.push_record(header);

    for employee in employees {
        let mut record = vec![employee.employee_code.clone(), employee.name.clone()];
        let entries = summaries.get(&employee.id);
        record.extend((1..=12).map(|month| {
            match entries.and_then(|list| list.iter().find(|e| e.month == month)) {
                Some(entry) if entry.total_days > 0 => format!("{}%", entry.percentage),
                _ => "-".to_string(),
            }
        }));
        builder.push_record(record);
    }

    styled(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendance_core::YearMonth;

    fn alice() -> Employee {
        Employee::new(1, "Alice Moreno", "EMP-001", "Engineering", "Developer")
    }

    #[test]
    fn test_render_monthly_flags_override() {
        let employee = alice();
        let summary = MonthlyAttendanceSummary {
            employee_id: 1,
            year_month: YearMonth::new(2025, 6).unwrap(),
            present_days: 25,
            total_days: 30,
            percentage: 83,
            overridden: true,
        };
        let out = render_monthly(&[(&employee, summary)]);
        assert!(out.contains("Alice Moreno"));
        assert!(out.contains("25*"));
        assert!(out.contains("83%"));
    }

    #[test]
    fn test_render_yearly_marks_empty_months() {
        let employees = vec![alice()];
        let mut summaries = HashMap::new();
        summaries.insert(
            1,
            vec![YearlyMonthEntry {
                month: 3,
                month_name: "March".to_string(),
                present_days: 9,
                total_days: 10,
                percentage: 90,
            }],
        );
        let out = render_yearly(&employees, &summaries);
        assert!(out.contains("Mar"));
        assert!(out.contains("90%"));
        assert!(out.contains('-'));
    }

    #[test]
    fn test_render_stats() {
        let out = render_stats(&DayStatusCounts { present: 1, absent: 1, not_marked: 1, total: 3 });
        assert!(out.contains("Not Marked"));
        assert!(out.contains('3'));
    }
}
