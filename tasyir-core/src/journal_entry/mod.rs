mod cursor;
mod entity;
pub mod error;
mod repo;
pub mod validation;

use sqlx::PgPool;
use tracing::instrument;

pub use cursor::*;
pub use entity::*;
use error::*;
use repo::*;
pub use validation::{JournalEntryDraft, JournalEntryLineDraft, ValidationErrors};

use crate::query::*;
use tasyir_types::primitives::PeriodId;

/// Service for working with `JournalEntry` entities. Period and
/// chart-of-accounts checks happen one level up, where the other services
/// are in reach.
#[derive(Clone)]
pub struct JournalEntries {
    repo: JournalEntryRepo,
    pool: PgPool,
}

impl JournalEntries {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: JournalEntryRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.journal_entries.create", skip(self))]
    pub async fn create(
        &self,
        new_entry: NewJournalEntry,
    ) -> Result<JournalEntry, JournalEntryError> {
        let mut tx = self.pool.begin().await?;
        let entry = self.repo.create_in_tx(&mut tx, new_entry).await?;
        tx.commit().await?;
        Ok(entry)
    }

    #[instrument(name = "tasyir.journal_entries.persist_update", skip_all)]
    pub async fn persist_update(
        &self,
        entry: &mut JournalEntry,
        update: JournalEntryUpdate,
    ) -> Result<(), JournalEntryError> {
        entry.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, entry).await?;
        tx.commit().await?;
        Ok(())
    }

    #[instrument(name = "tasyir.journal_entries.find_by_id", skip(self), err)]
    pub async fn find_by_id(
        &self,
        entry_id: JournalEntryId,
    ) -> Result<JournalEntry, JournalEntryError> {
        self.repo.find_by_id(entry_id).await
    }

    #[instrument(name = "tasyir.journal_entries.list", skip(self))]
    pub async fn list(
        &self,
        query: PaginatedQueryArgs<JournalEntryByEntryDateCursor>,
        period_id: Option<PeriodId>,
    ) -> Result<PaginatedQueryRet<JournalEntry, JournalEntryByEntryDateCursor>, JournalEntryError>
    {
        self.repo.list(query, period_id).await
    }
}
