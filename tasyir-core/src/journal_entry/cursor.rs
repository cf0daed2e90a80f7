use serde::{Deserialize, Serialize};

use tasyir_types::{journal_entry::JournalEntryValues, primitives::JournalEntryId};

use crate::query::*;

use chrono::NaiveDate;

/// Keyset cursor for listing entries newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryByEntryDateCursor {
    pub entry_date: NaiveDate,
    pub id: JournalEntryId,
}

impl From<&JournalEntryValues> for JournalEntryByEntryDateCursor {
    fn from(values: &JournalEntryValues) -> Self {
        Self {
            entry_date: values.entry_date,
            id: values.id,
        }
    }
}

impl Default for PaginatedQueryArgs<JournalEntryByEntryDateCursor> {
    fn default() -> Self {
        Self {
            first: 100,
            after: None,
        }
    }
}
