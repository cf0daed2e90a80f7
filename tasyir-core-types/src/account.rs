use serde::{Deserialize, Serialize};

use super::primitives::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountValues {
    pub id: AccountId,
    pub version: u32,
    pub code: AccountCode,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<AccountId>,
    pub status: Status,
}

impl AccountValues {
    pub fn class(&self) -> AccountClass {
        self.code.class()
    }
}
