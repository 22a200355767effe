use serde::{Deserialize, Serialize};

pub type EmployeeId = u64;

/// Identity record supplied by the employee directory. Read-only here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub employee_code: String,
    pub department: String,
    pub position: String,
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        employee_code: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            employee_code: employee_code.into(),
            department: department.into(),
            position: position.into(),
        }
    }
}
