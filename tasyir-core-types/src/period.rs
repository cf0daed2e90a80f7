use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::primitives::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PeriodValues {
    pub id: PeriodId,
    pub version: u32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PeriodStatus,
}

impl PeriodValues {
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
