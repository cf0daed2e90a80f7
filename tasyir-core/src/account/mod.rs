mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

use std::collections::HashMap;

pub use entity::*;
use error::*;
use repo::*;

/// Service for working with SCF chart-of-accounts entries.
#[derive(Clone)]
pub struct Accounts {
    repo: AccountRepo,
    pool: PgPool,
}

impl Accounts {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: AccountRepo::new(pool),
            pool: pool.clone(),
        }
    }

    #[instrument(name = "tasyir.accounts.create", skip(self))]
    pub async fn create(&self, new_account: NewAccount) -> Result<Account, AccountError> {
        if let Some(parent_id) = new_account.parent_id() {
            let parent = self.repo.find_by_id(parent_id).await?;
            if !new_account.code().is_child_of(parent.code()) {
                return Err(AccountError::CodePrefixMismatch {
                    child: new_account.code().to_string(),
                    parent: parent.code().to_string(),
                });
            }
        }
        let mut tx = self.pool.begin().await?;
        let account = self.repo.create_in_tx(&mut tx, new_account).await?;
        tx.commit().await?;
        Ok(account)
    }

    #[instrument(name = "tasyir.accounts.update", skip(self, update))]
    pub async fn update(
        &self,
        account_id: AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        let mut account = self.repo.find_by_id(account_id).await?;
        account.update(update);
        let mut tx = self.pool.begin().await?;
        self.repo.persist_in_tx(&mut tx, &mut account).await?;
        tx.commit().await?;
        Ok(account)
    }

    #[instrument(name = "tasyir.accounts.find_by_id", skip(self), err)]
    pub async fn find_by_id(&self, account_id: AccountId) -> Result<Account, AccountError> {
        self.repo.find_by_id(account_id).await
    }

    #[instrument(name = "tasyir.accounts.find_by_code", skip(self), err)]
    pub async fn find_by_code(&self, code: &str) -> Result<Account, AccountError> {
        self.repo.find_by_code(code).await
    }

    #[instrument(name = "tasyir.accounts.find_all", skip(self))]
    pub async fn find_all(
        &self,
        account_ids: &[AccountId],
    ) -> Result<HashMap<AccountId, AccountValues>, AccountError> {
        self.repo.find_all(account_ids).await
    }

    #[instrument(name = "tasyir.accounts.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Account>, AccountError> {
        self.repo.list().await
    }
}
