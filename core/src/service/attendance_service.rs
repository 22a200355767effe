use std::collections::HashMap;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::calendar::YearMonth;
use crate::error::AttendanceError;
use crate::model::attendance::{AttendanceMark, AttendanceStatus, MarkStatus, MonthlyOverride};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::summary::{DayStatusCounts, MonthlyAttendanceSummary, YearlyMonthEntry};
use crate::repository::AttendanceRepository;
use crate::service::aggregate;

/// Attendance engine over a roster and a register.
///
/// Reads default quietly: a missing mark is `Unmarked`, a missing override
/// falls back to the derived count. Writes are validated against the roster
/// and, for overrides, against the length of the month.
pub struct AttendanceService<R: AttendanceRepository> {
    repo: R,
    roster: Vec<Employee>,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    pub fn new(repo: R, roster: Vec<Employee>) -> Self {
        Self { repo, roster }
    }

    pub fn roster(&self) -> &[Employee] {
        &self.roster
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn employee(&self, employee_id: EmployeeId) -> Option<&Employee> {
        self.roster.iter().find(|e| e.id == employee_id)
    }

    fn require_employee(&self, employee_id: EmployeeId) -> Result<&Employee> {
        match self.employee(employee_id) {
            Some(employee) => Ok(employee),
            None => {
                warn!(employee_id, "rejected write for unknown employee");
                Err(AttendanceError::UnknownEmployee { employee_id }.into())
            }
        }
    }

    // Daily register

    pub fn mark_attendance(&self, employee_id: EmployeeId, status: MarkStatus, date: NaiveDate) -> Result<()> {
        self.require_employee(employee_id)?;
        debug!(employee_id, ?status, %date, "marking attendance");
        self.repo.upsert_mark(AttendanceMark::new(employee_id, status, date))
    }

    /// Marks every roster employee for `date`. Returns how many were written.
    pub fn mark_all(&self, status: MarkStatus, date: NaiveDate) -> Result<usize> {
        let marks: Vec<AttendanceMark> = self
            .roster
            .iter()
            .map(|e| AttendanceMark::new(e.id, status, date))
            .collect();
        let count = marks.len();
        debug!(count, ?status, %date, "marking whole roster");
        self.repo.upsert_marks(marks)?;
        Ok(count)
    }

    /// Writes a batch of marks, rejecting the whole batch if any refers to
    /// an employee outside the roster.
    pub fn record_marks(&self, marks: Vec<AttendanceMark>) -> Result<usize> {
        for mark in &marks {
            self.require_employee(mark.employee_id)?;
        }
        let count = marks.len();
        debug!(count, "recording mark batch");
        self.repo.upsert_marks(marks)?;
        Ok(count)
    }

    pub fn get_status(&self, employee_id: EmployeeId, date: NaiveDate) -> Result<AttendanceStatus> {
        Ok(AttendanceStatus::from(self.repo.get_mark(employee_id, date)?))
    }

    pub fn get_day_status_counts(&self, date: NaiveDate, employee_ids: &[EmployeeId]) -> Result<DayStatusCounts> {
        let marked: HashMap<EmployeeId, MarkStatus> = self
            .repo
            .marks_on(date)?
            .into_iter()
            .map(|m| (m.employee_id, m.status))
            .collect();

        Ok(aggregate::day_status_counts(
            employee_ids
                .iter()
                .map(|id| AttendanceStatus::from(marked.get(id).copied())),
        ))
    }

    /// Tally for the whole roster on one day.
    pub fn compute_daily_stats(&self, date: NaiveDate) -> Result<DayStatusCounts> {
        let ids: Vec<EmployeeId> = self.roster.iter().map(|e| e.id).collect();
        self.get_day_status_counts(date, &ids)
    }

    /// Roster in order, each paired with its status for `date`.
    pub fn employee_day_statuses(&self, date: NaiveDate) -> Result<Vec<(&Employee, AttendanceStatus)>> {
        let marked: HashMap<EmployeeId, MarkStatus> = self
            .repo
            .marks_on(date)?
            .into_iter()
            .map(|m| (m.employee_id, m.status))
            .collect();

        Ok(self
            .roster
            .iter()
            .map(|e| (e, AttendanceStatus::from(marked.get(&e.id).copied())))
            .collect())
    }

    // Monthly aggregation and overrides

    pub fn compute_monthly_summary(&self, employee: &Employee, year_month: YearMonth) -> Result<MonthlyAttendanceSummary> {
        let marks = self.repo.marks_for_employee(employee.id)?;
        let override_days = self.repo.get_override(employee.id, year_month)?;
        Ok(aggregate::monthly_summary(employee.id, year_month, &marks, override_days))
    }

    /// Roster in order. The register is read once for the whole roster.
    pub fn monthly_summaries(&self, year_month: YearMonth) -> Result<Vec<(&Employee, MonthlyAttendanceSummary)>> {
        let marks = self.marks_by_employee(|m| year_month.contains(m.date))?;
        let overrides: HashMap<EmployeeId, u32> = self
            .repo
            .overrides_for_month(year_month)?
            .into_iter()
            .map(|o| (o.employee_id, o.present_days))
            .collect();

        Ok(self
            .roster
            .iter()
            .map(|e| {
                let own = marks.get(&e.id).map(Vec::as_slice).unwrap_or(&[]);
                let summary = aggregate::monthly_summary(e.id, year_month, own, overrides.get(&e.id).copied());
                (e, summary)
            })
            .collect())
    }

    pub fn set_override(&self, employee_id: EmployeeId, year_month: YearMonth, present_days: u32) -> Result<()> {
        self.require_employee(employee_id)?;
        let max = year_month.days();
        if present_days > max {
            warn!(employee_id, %year_month, present_days, max, "rejected out-of-range override");
            return Err(AttendanceError::InvalidOverride {
                employee_id,
                year_month,
                present_days,
                max,
            }
            .into());
        }

        debug!(employee_id, %year_month, present_days, "setting monthly override");
        self.repo.upsert_override(MonthlyOverride {
            employee_id,
            year_month,
            present_days,
        })
    }

    /// Drops the override so the derived count applies again.
    pub fn clear_override(&self, employee_id: EmployeeId, year_month: YearMonth) -> Result<bool> {
        self.require_employee(employee_id)?;
        let removed = self.repo.remove_override(employee_id, year_month)?;
        debug!(employee_id, %year_month, removed, "clearing monthly override");
        Ok(removed)
    }

    // Yearly aggregation

    pub fn compute_yearly_summary(&self, employee: &Employee, year: i32) -> Result<Vec<YearlyMonthEntry>> {
        let marks = self.repo.marks_for_employee(employee.id)?;
        Ok(aggregate::yearly_summary(year, &marks))
    }

    /// Roster in order, twelve entries each.
    pub fn yearly_summaries(&self, year: i32) -> Result<Vec<(&Employee, Vec<YearlyMonthEntry>)>> {
        let marks = self.marks_by_employee(|m| m.date.year() == year)?;
        Ok(self
            .roster
            .iter()
            .map(|e| {
                let own = marks.get(&e.id).map(Vec::as_slice).unwrap_or(&[]);
                (e, aggregate::yearly_summary(year, own))
            })
            .collect())
    }

    fn marks_by_employee<F>(&self, keep: F) -> Result<HashMap<EmployeeId, Vec<AttendanceMark>>>
    where
        F: Fn(&AttendanceMark) -> bool,
    {
        let mut grouped: HashMap<EmployeeId, Vec<AttendanceMark>> = HashMap::new();
        for mark in self.repo.all_marks()?.into_iter().filter(|m| keep(m)) {
            grouped.entry(mark.employee_id).or_default().push(mark);
        }
        Ok(grouped)
    }
}
