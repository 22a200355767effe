use anyhow::Result;
use chrono::NaiveDate;

use crate::calendar::YearMonth;
use crate::model::attendance::{AttendanceMark, MarkStatus, MonthlyOverride};
use crate::model::employee::EmployeeId;

/// Storage seam for the daily register and the override store.
/// Every write fully replaces the keyed entry (last write wins).
pub trait AttendanceRepository {
    fn upsert_mark(&self, mark: AttendanceMark) -> Result<()>;
    fn get_mark(&self, employee_id: EmployeeId, date: NaiveDate) -> Result<Option<MarkStatus>>;
    /// All marks for one employee, ordered by date.
    fn marks_for_employee(&self, employee_id: EmployeeId) -> Result<Vec<AttendanceMark>>;
    fn marks_on(&self, date: NaiveDate) -> Result<Vec<AttendanceMark>>;
    /// Every mark in the register, ordered by date then employee.
    fn all_marks(&self) -> Result<Vec<AttendanceMark>>;

    fn upsert_override(&self, entry: MonthlyOverride) -> Result<()>;
    fn get_override(&self, employee_id: EmployeeId, year_month: YearMonth) -> Result<Option<u32>>;
    fn overrides_for_month(&self, year_month: YearMonth) -> Result<Vec<MonthlyOverride>>;
    /// Returns whether an override existed.
    fn remove_override(&self, employee_id: EmployeeId, year_month: YearMonth) -> Result<bool>;

    fn upsert_marks(&self, marks: Vec<AttendanceMark>) -> Result<()> {
        for mark in marks {
            self.upsert_mark(mark)?;
        }
        Ok(())
    }
}
