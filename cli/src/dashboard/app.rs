use attendance_core::{
    AttendanceRepository, AttendanceService, AttendanceStatus, DayStatusCounts, Employee, MarkStatus,
};
use chrono::{Duration, NaiveDate};
use ratatui::widgets::TableState;

/// State behind the daily dashboard: one selected day, the roster with
/// each employee's status for it, and the day's tally.
pub struct Dashboard<R: AttendanceRepository> {
    pub service: AttendanceService<R>,
    pub today: NaiveDate,
    pub date: NaiveDate,
    pub rows: Vec<(Employee, AttendanceStatus)>,
    pub stats: DayStatusCounts,
    pub state: TableState,
    pub message: Option<String>,
}

impl<R: AttendanceRepository> Dashboard<R> {
    pub fn new(service: AttendanceService<R>, today: NaiveDate) -> Self {
        let mut dashboard = Dashboard {
            service,
            today,
            date: today,
            rows: Vec::new(),
            stats: DayStatusCounts::default(),
            state: TableState::default(),
            message: None,
        };
        dashboard.reload();
        if !dashboard.rows.is_empty() {
            dashboard.state.select(Some(0));
        }
        dashboard
    }

    pub fn reload(&mut self) {
        let loaded = self
            .service
            .employee_day_statuses(self.date)
            .map(|rows| rows.into_iter().map(|(e, s)| (e.clone(), s)).collect::<Vec<_>>())
            .and_then(|rows| Ok((rows, self.service.compute_daily_stats(self.date)?)));

        match loaded {
            Ok((rows, stats)) => {
                self.rows = rows;
                self.stats = stats;
            }
            Err(e) => self.message = Some(format!("Load failed: {}", e)),
        }
    }

    pub fn next(&mut self) {
        if self.rows.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.rows.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.rows.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous_day(&mut self) {
        self.date -= Duration::days(1);
        self.reload();
    }

    pub fn next_day(&mut self) {
        self.date += Duration::days(1);
        self.reload();
    }

    pub fn jump_today(&mut self) {
        self.date = self.today;
        self.reload();
    }

    pub fn mark_selected(&mut self, status: MarkStatus) {
        let Some(employee_id) = self
            .state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|(e, _)| e.id)
        else {
            return;
        };

        self.message = match self.service.mark_attendance(employee_id, status, self.date) {
            Ok(()) => None,
            Err(e) => Some(format!("Mark failed: {}", e)),
        };
        self.reload();
    }

    pub fn mark_all(&mut self, status: MarkStatus) {
        self.message = match self.service.mark_all(status, self.date) {
            Ok(count) => Some(format!("Marked {} employees {:?}", count, status)),
            Err(e) => Some(format!("Mark failed: {}", e)),
        };
        self.reload();
    }

    pub fn selected_employee(&self) -> Option<&(Employee, AttendanceStatus)> {
        self.state.selected().and_then(|i| self.rows.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendance_core::InMemoryAttendanceRepository;

    fn dashboard() -> Dashboard<InMemoryAttendanceRepository> {
        let roster = vec![
            Employee::new(1, "Alice Moreno", "EMP-001", "Engineering", "Developer"),
            Employee::new(2, "Bilal Khan", "EMP-002", "Finance", "Analyst"),
            Employee::new(3, "Chen Wei", "EMP-003", "Sales", "Account Manager"),
        ];
        let service = AttendanceService::new(InMemoryAttendanceRepository::new(), roster);
        Dashboard::new(service, NaiveDate::from_ymd_opt(2025, 6, 16).unwrap())
    }

    #[test]
    fn test_starts_on_today_all_unmarked() {
        let app = dashboard();
        assert_eq!(app.state.selected(), Some(0));
        assert_eq!(app.stats, DayStatusCounts { present: 0, absent: 0, not_marked: 3, total: 3 });
    }

    #[test]
    fn test_mark_selected_updates_tally() {
        let mut app = dashboard();
        app.mark_selected(MarkStatus::Present);
        app.next();
        app.mark_selected(MarkStatus::Absent);

        assert_eq!(app.stats, DayStatusCounts { present: 1, absent: 1, not_marked: 1, total: 3 });
        assert_eq!(app.rows[1].1, AttendanceStatus::Absent);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = dashboard();
        app.previous();
        assert_eq!(app.state.selected(), Some(2));
        app.next();
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_day_navigation_keeps_days_separate() {
        let mut app = dashboard();
        app.mark_all(MarkStatus::Present);
        assert_eq!(app.stats.present, 3);

        app.previous_day();
        assert_eq!(app.date, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(app.stats.not_marked, 3);

        app.jump_today();
        assert_eq!(app.stats.present, 3);
    }
}
