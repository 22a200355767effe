use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::calendar::YearMonth;
use crate::model::attendance::{AttendanceMark, MarkStatus, MonthlyOverride};
use crate::model::employee::EmployeeId;
use crate::repository::traits::AttendanceRepository;

type MarkMap = HashMap<(NaiveDate, EmployeeId), MarkStatus>;
type OverrideMap = HashMap<(EmployeeId, YearMonth), u32>;

/// In-process register: one map for marks, one for overrides.
/// Readers share the lock; a write replaces a single keyed entry.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceRepository {
    marks: RwLock<MarkMap>,
    overrides: RwLock<OverrideMap>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(marks: Vec<AttendanceMark>, overrides: Vec<MonthlyOverride>) -> Self {
        let marks = marks
            .into_iter()
            .map(|m| ((m.date, m.employee_id), m.status))
            .collect();
        let overrides = overrides
            .into_iter()
            .map(|o| ((o.employee_id, o.year_month), o.present_days))
            .collect();
        Self {
            marks: RwLock::new(marks),
            overrides: RwLock::new(overrides),
        }
    }

    pub fn mark_count(&self) -> Result<usize> {
        Ok(self.read_marks()?.len())
    }

    fn read_marks(&self) -> Result<RwLockReadGuard<'_, MarkMap>> {
        self.marks.read().map_err(|_| anyhow!("Attendance register lock poisoned"))
    }

    fn read_overrides(&self) -> Result<RwLockReadGuard<'_, OverrideMap>> {
        self.overrides.read().map_err(|_| anyhow!("Override store lock poisoned"))
    }
}

impl AttendanceRepository for InMemoryAttendanceRepository {
    fn upsert_mark(&self, mark: AttendanceMark) -> Result<()> {
        let mut marks = self
            .marks
            .write()
            .map_err(|_| anyhow!("Attendance register lock poisoned"))?;
        marks.insert((mark.date, mark.employee_id), mark.status);
        Ok(())
    }

    fn get_mark(&self, employee_id: EmployeeId, date: NaiveDate) -> Result<Option<MarkStatus>> {
        Ok(self.read_marks()?.get(&(date, employee_id)).copied())
    }

    fn marks_for_employee(&self, employee_id: EmployeeId) -> Result<Vec<AttendanceMark>> {
        let mut found: Vec<AttendanceMark> = self
            .read_marks()?
            .iter()
            .filter(|((_, id), _)| *id == employee_id)
            .map(|(&(date, id), &status)| AttendanceMark::new(id, status, date))
            .collect();
        found.sort_by_key(|m| m.date);
        Ok(found)
    }

    fn marks_on(&self, date: NaiveDate) -> Result<Vec<AttendanceMark>> {
        let mut found: Vec<AttendanceMark> = self
            .read_marks()?
            .iter()
            .filter(|((d, _), _)| *d == date)
            .map(|(&(date, id), &status)| AttendanceMark::new(id, status, date))
            .collect();
        found.sort_by_key(|m| m.employee_id);
        Ok(found)
    }

    fn all_marks(&self) -> Result<Vec<AttendanceMark>> {
        let mut found: Vec<AttendanceMark> = self
            .read_marks()?
            .iter()
            .map(|(&(date, id), &status)| AttendanceMark::new(id, status, date))
            .collect();
        found.sort_by_key(|m| (m.date, m.employee_id));
        Ok(found)
    }

    fn upsert_override(&self, entry: MonthlyOverride) -> Result<()> {
        let mut overrides = self
            .overrides
            .write()
            .map_err(|_| anyhow!("Override store lock poisoned"))?;
        overrides.insert((entry.employee_id, entry.year_month), entry.present_days);
        Ok(())
    }

    fn get_override(&self, employee_id: EmployeeId, year_month: YearMonth) -> Result<Option<u32>> {
        Ok(self.read_overrides()?.get(&(employee_id, year_month)).copied())
    }

    fn overrides_for_month(&self, year_month: YearMonth) -> Result<Vec<MonthlyOverride>> {
        let mut found: Vec<MonthlyOverride> = self
            .read_overrides()?
            .iter()
            .filter(|((_, ym), _)| *ym == year_month)
            .map(|(&(employee_id, year_month), &present_days)| MonthlyOverride {
                employee_id,
                year_month,
                present_days,
            })
            .collect();
        found.sort_by_key(|o| o.employee_id);
        Ok(found)
    }

    fn remove_override(&self, employee_id: EmployeeId, year_month: YearMonth) -> Result<bool> {
        let mut overrides = self
            .overrides
            .write()
            .map_err(|_| anyhow!("Override store lock poisoned"))?;
        Ok(overrides.remove(&(employee_id, year_month)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_upsert_mark_replaces_existing() {
        let repo = InMemoryAttendanceRepository::new();
        repo.upsert_mark(AttendanceMark::new(1, MarkStatus::Present, date(2))).unwrap();
        repo.upsert_mark(AttendanceMark::new(1, MarkStatus::Absent, date(2))).unwrap();
        repo.upsert_mark(AttendanceMark::new(2, MarkStatus::Present, date(2))).unwrap();

        assert_eq!(repo.get_mark(1, date(2)).unwrap(), Some(MarkStatus::Absent));
        assert_eq!(repo.get_mark(2, date(2)).unwrap(), Some(MarkStatus::Present));
        assert_eq!(repo.get_mark(1, date(3)).unwrap(), None);
        assert_eq!(repo.mark_count().unwrap(), 2);
    }

    #[test]
    fn test_marks_for_employee_sorted_by_date() {
        let repo = InMemoryAttendanceRepository::with_data(
            vec![
                AttendanceMark::new(1, MarkStatus::Present, date(5)),
                AttendanceMark::new(1, MarkStatus::Absent, date(1)),
                AttendanceMark::new(2, MarkStatus::Present, date(3)),
            ],
            vec![],
        );
        let marks = repo.marks_for_employee(1).unwrap();
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].date, date(1));
        assert_eq!(marks[1].date, date(5));

        let all: Vec<(NaiveDate, EmployeeId)> =
            repo.all_marks().unwrap().iter().map(|m| (m.date, m.employee_id)).collect();
        assert_eq!(all, vec![(date(1), 1), (date(3), 2), (date(5), 1)]);

        let on_third = repo.marks_on(date(3)).unwrap();
        assert_eq!(on_third, vec![AttendanceMark::new(2, MarkStatus::Present, date(3))]);
    }

    #[test]
    fn test_override_lifecycle() {
        let repo = InMemoryAttendanceRepository::new();
        let ym = YearMonth::new(2025, 6).unwrap();
        assert_eq!(repo.get_override(1, ym).unwrap(), None);

        repo.upsert_override(MonthlyOverride { employee_id: 1, year_month: ym, present_days: 12 }).unwrap();
        repo.upsert_override(MonthlyOverride { employee_id: 1, year_month: ym, present_days: 15 }).unwrap();
        assert_eq!(repo.get_override(1, ym).unwrap(), Some(15));
        let july = YearMonth::new(2025, 7).unwrap();
        repo.upsert_override(MonthlyOverride { employee_id: 2, year_month: july, present_days: 4 }).unwrap();
        assert_eq!(
            repo.overrides_for_month(ym).unwrap(),
            vec![MonthlyOverride { employee_id: 1, year_month: ym, present_days: 15 }]
        );

        assert!(repo.remove_override(1, ym).unwrap());
        assert!(!repo.remove_override(1, ym).unwrap());
        assert_eq!(repo.get_override(1, ym).unwrap(), None);
    }
}
