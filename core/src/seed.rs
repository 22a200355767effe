//! Sample history for demos and tests. Nothing in the engine calls this;
//! callers invoke it explicitly and write the result through the service.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::model::attendance::{AttendanceMark, MarkStatus};
use crate::model::employee::Employee;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// How many days before the anchor to fill. The anchor day itself is left unmarked.
    pub days: u32,
    pub seed: u64,
    /// Chance, 0.0..=1.0, that a generated mark is Present.
    pub present_ratio: f64,
    pub skip_weekends: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            days: 90,
            seed: 42,
            present_ratio: 0.85,
            skip_weekends: true,
        }
    }
}

/// Generates one mark per employee per day for the `options.days` days
/// preceding `anchor`, oldest first. Same inputs always give the same marks.
pub fn generate_history(employees: &[Employee], anchor: NaiveDate, options: &SeedOptions) -> Vec<AttendanceMark> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut marks = Vec::new();

    for offset in (1..=i64::from(options.days)).rev() {
        // offsets reaching past the earliest representable date yield nothing
        let Some(date) = anchor.checked_sub_signed(Duration::days(offset)) else {
            continue;
        };
        if options.skip_weekends && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        for employee in employees {
            let status = if rng.random::<f64>() < options.present_ratio {
                MarkStatus::Present
            } else {
                MarkStatus::Absent
            };
            marks.push(AttendanceMark::new(employee.id, status, date));
        }
    }

    info!(
        employees = employees.len(),
        days = options.days,
        marks = marks.len(),
        "generated sample attendance history"
    );
    marks
}
