use serde::{Deserialize, Serialize};

use crate::model::attendance::{AttendanceMark, MonthlyOverride};
use crate::model::employee::Employee;

/// Everything the file-backed register keeps on disk.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RegisterSnapshot {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub marks: Vec<AttendanceMark>,
    #[serde(default)]
    pub overrides: Vec<MonthlyOverride>,
}
