use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmployeeValues {
    pub id: EmployeeId,
    pub version: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub department_id: DepartmentId,
    pub position_id: PositionId,
    pub salary: Decimal,
    pub status: Status,
}

impl EmployeeValues {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
