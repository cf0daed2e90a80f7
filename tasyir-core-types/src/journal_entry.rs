use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JournalEntryValues {
    pub id: JournalEntryId,
    pub version: u32,
    pub reference: String,
    pub entry_date: NaiveDate,
    pub description: String,
    pub period_id: PeriodId,
    pub lines: Vec<JournalEntryLine>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub is_balanced: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    pub account_id: AccountId,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl JournalEntryLine {
    pub fn direction(&self) -> DebitOrCredit {
        if self.debit > Decimal::ZERO {
            DebitOrCredit::Debit
        } else {
            DebitOrCredit::Credit
        }
    }

    pub fn amount(&self) -> Decimal {
        self.debit.max(self.credit)
    }
}
