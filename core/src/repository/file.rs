use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::calendar::YearMonth;
use crate::model::attendance::{AttendanceMark, MarkStatus, MonthlyOverride};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::snapshot::RegisterSnapshot;
use crate::repository::traits::AttendanceRepository;

const REGISTER_FILE_NAME: &str = "register.json";

/// Keeps the roster, marks and overrides in one JSON snapshot file.
/// Every call reads the file and every write rewrites it.
#[derive(Clone, Debug)]
pub struct FileAttendanceRepository {
    file_path: PathBuf,
}

impl FileAttendanceRepository {
    pub fn new(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)
            .with_context(|| format!("Could not create data directory {}", base_dir.display()))?;
        let path = base_dir.join(REGISTER_FILE_NAME);

        let repo = FileAttendanceRepository { file_path: path };
        if !repo.file_path.exists() {
            info!(path = %repo.file_path.display(), "initializing empty register");
            repo.write_snapshot(&RegisterSnapshot::default())?;
        }
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn read_snapshot(&self) -> Result<RegisterSnapshot> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let snapshot: RegisterSnapshot = serde_json::from_reader(reader)
            .with_context(|| format!("Malformed register file {}", self.file_path.display()))?;
        debug!(
            employees = snapshot.employees.len(),
            marks = snapshot.marks.len(),
            overrides = snapshot.overrides.len(),
            "loaded register snapshot"
        );
        Ok(snapshot)
    }

    pub fn write_snapshot(&self, snapshot: &RegisterSnapshot) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Could not write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_roster(&self) -> Result<Vec<Employee>> {
        Ok(self.read_snapshot()?.employees)
    }

    /// Replaces the roster. Marks and overrides are left untouched.
    pub fn replace_roster(&self, employees: Vec<Employee>) -> Result<()> {
        let mut snapshot = self.read_snapshot()?;
        info!(count = employees.len(), "replacing roster");
        snapshot.employees = employees;
        self.write_snapshot(&snapshot)
    }

    fn apply_mark(snapshot: &mut RegisterSnapshot, mark: AttendanceMark) {
        if let Some(pos) = snapshot
            .marks
            .iter()
            .position(|m| m.date == mark.date && m.employee_id == mark.employee_id)
        {
            snapshot.marks[pos] = mark;
        } else {
            snapshot.marks.push(mark);
        }
    }
}

impl AttendanceRepository for FileAttendanceRepository {
    fn upsert_mark(&self, mark: AttendanceMark) -> Result<()> {
        let mut snapshot = self.read_snapshot()?;
        Self::apply_mark(&mut snapshot, mark);
        self.write_snapshot(&snapshot)
    }

    fn get_mark(&self, employee_id: EmployeeId, date: NaiveDate) -> Result<Option<MarkStatus>> {
        let snapshot = self.read_snapshot()?;
        Ok(snapshot
            .marks
            .iter()
            .find(|m| m.date == date && m.employee_id == employee_id)
            .map(|m| m.status))
    }

    fn marks_for_employee(&self, employee_id: EmployeeId) -> Result<Vec<AttendanceMark>> {
        let mut marks: Vec<AttendanceMark> = self
            .read_snapshot()?
            .marks
            .into_iter()
            .filter(|m| m.employee_id == employee_id)
            .collect();
        marks.sort_by_key(|m| m.date);
        Ok(marks)
    }

    fn marks_on(&self, date: NaiveDate) -> Result<Vec<AttendanceMark>> {
        let mut marks: Vec<AttendanceMark> = self
            .read_snapshot()?
            .marks
            .into_iter()
            .filter(|m| m.date == date)
            .collect();
        marks.sort_by_key(|m| m.employee_id);
        Ok(marks)
    }

    fn all_marks(&self) -> Result<Vec<AttendanceMark>> {
        let mut marks = self.read_snapshot()?.marks;
        marks.sort_by_key(|m| (m.date, m.employee_id));
        Ok(marks)
    }

    fn upsert_override(&self, entry: MonthlyOverride) -> Result<()> {
        let mut snapshot = self.read_snapshot()?;
        if let Some(existing) = snapshot
            .overrides
            .iter_mut()
            .find(|o| o.employee_id == entry.employee_id && o.year_month == entry.year_month)
        {
            existing.present_days = entry.present_days;
        } else {
            snapshot.overrides.push(entry);
        }
        self.write_snapshot(&snapshot)
    }

    fn get_override(&self, employee_id: EmployeeId, year_month: YearMonth) -> Result<Option<u32>> {
        let snapshot = self.read_snapshot()?;
        Ok(snapshot
            .overrides
            .iter()
            .find(|o| o.employee_id == employee_id && o.year_month == year_month)
            .map(|o| o.present_days))
    }

    fn overrides_for_month(&self, year_month: YearMonth) -> Result<Vec<MonthlyOverride>> {
        let mut overrides: Vec<MonthlyOverride> = self
            .read_snapshot()?
            .overrides
            .into_iter()
            .filter(|o| o.year_month == year_month)
            .collect();
        overrides.sort_by_key(|o| o.employee_id);
        Ok(overrides)
    }

    fn remove_override(&self, employee_id: EmployeeId, year_month: YearMonth) -> Result<bool> {
        let mut snapshot = self.read_snapshot()?;
        let initial_len = snapshot.overrides.len();
        snapshot
            .overrides
            .retain(|o| !(o.employee_id == employee_id && o.year_month == year_month));

        if snapshot.overrides.len() == initial_len {
            return Ok(false);
        }
        self.write_snapshot(&snapshot)?;
        Ok(true)
    }

    fn upsert_marks(&self, marks: Vec<AttendanceMark>) -> Result<()> {
        let mut snapshot = self.read_snapshot()?;
        for mark in marks {
            Self::apply_mark(&mut snapshot, mark);
        }
        self.write_snapshot(&snapshot)
    }
}
