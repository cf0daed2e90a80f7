use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*};
use crate::entity::*;

#[derive(Debug, Clone)]
pub(super) struct AccountRepo {
    pool: PgPool,
}

impl AccountRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_account: NewAccount,
    ) -> Result<Account, AccountError> {
        let id = new_account.id;
        sqlx::query(
            r#"INSERT INTO tasyir_accounts (id, code, name, parent_id, status)
            VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(id)
        .bind(new_account.code.as_str())
        .bind(&new_account.name)
        .bind(new_account.parent_id)
        .bind(new_account.status)
        .execute(&mut **tx)
        .await?;
        let mut events = new_account.initial_events();
        events.persist(tx).await?;
        let account = Account::try_from(events)?;
        Ok(account)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: &mut Account,
    ) -> Result<(), AccountError> {
        sqlx::query(r#"UPDATE tasyir_accounts SET name = $2, status = $3 WHERE id = $1"#)
            .bind(account.id())
            .bind(&account.values().name)
            .bind(account.values().status)
            .execute(&mut **tx)
            .await?;
        account.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, account_id: AccountId) -> Result<Account, AccountError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_account_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(AccountError::NotFound(account_id));
        }
        let account = Account::try_from(EntityEvents::load(rows)?)?;
        Ok(account)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Account, AccountError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_account_events e
            JOIN tasyir_accounts a ON a.id = e.id
            WHERE a.code = $1
            ORDER BY e.sequence"#,
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(AccountError::CodeNotFound(code.to_string()));
        }
        let account = Account::try_from(EntityEvents::load(rows)?)?;
        Ok(account)
    }

    pub async fn find_all(
        &self,
        account_ids: &[AccountId],
    ) -> Result<HashMap<AccountId, AccountValues>, AccountError> {
        let ids: Vec<uuid::Uuid> = account_ids.iter().map(uuid::Uuid::from).collect();
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_account_events
            WHERE id = ANY($1)
            ORDER BY id, sequence"#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        let mut accounts = HashMap::new();
        for events in EntityEvents::load_grouped(rows)? {
            let account = Account::try_from(events)?;
            accounts.insert(account.id(), account.into_values());
        }
        Ok(accounts)
    }

    pub async fn list(&self) -> Result<Vec<Account>, AccountError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_account_events e
            JOIN tasyir_accounts a ON a.id = e.id
            ORDER BY a.code, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| Account::try_from(events).map_err(AccountError::from))
            .collect()
    }
}
