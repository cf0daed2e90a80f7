use serde::{Deserialize, Serialize};

use super::primitives::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PositionValues {
    pub id: PositionId,
    pub version: u32,
    pub title: String,
    pub department_id: Option<DepartmentId>,
}
