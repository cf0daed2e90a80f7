use serde::{Deserialize, Serialize};

use super::primitives::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DepartmentValues {
    pub id: DepartmentId,
    pub version: u32,
    pub name: String,
    pub description: Option<String>,
}
