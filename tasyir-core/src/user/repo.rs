use sqlx::{PgPool, Postgres, Transaction};

use super::{entity::*, error::*, password};
use crate::entity::*;

#[derive(Debug, sqlx::FromRow)]
pub(super) struct StoredCredentials {
    pub id: uuid::Uuid,
    pub password_salt: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub(super) struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        new_user: NewUser,
    ) -> Result<User, UserError> {
        let id = new_user.id;
        let username = new_user.username.clone();
        let role = new_user.role;
        let (plain_password, mut events) = new_user.initial_events();
        let salt = password::generate_salt();
        let hash = password::hash_password(&salt, &plain_password);
        sqlx::query(
            r#"INSERT INTO tasyir_users (id, username, role, password_salt, password_hash)
            VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(id)
        .bind(&username)
        .bind(role)
        .bind(&salt)
        .bind(&hash)
        .execute(&mut **tx)
        .await?;
        events.persist(tx).await?;
        let user = User::try_from(events)?;
        Ok(user)
    }

    pub async fn persist_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &mut User,
    ) -> Result<(), UserError> {
        sqlx::query(r#"UPDATE tasyir_users SET role = $2, status = $3 WHERE id = $1"#)
            .bind(user.id())
            .bind(user.values().role)
            .bind(user.values().status)
            .execute(&mut **tx)
            .await?;
        user.events.persist(tx).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, user_id: UserId) -> Result<User, UserError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT id, sequence, event, recorded_at
            FROM tasyir_user_events
            WHERE id = $1
            ORDER BY sequence"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(UserError::NotFound(user_id));
        }
        let user = User::try_from(EntityEvents::load(rows)?)?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User, UserError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_user_events e
            JOIN tasyir_users u ON u.id = e.id
            WHERE u.username = $1
            ORDER BY e.sequence"#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        if rows.is_empty() {
            return Err(UserError::UsernameNotFound(username.to_string()));
        }
        let user = User::try_from(EntityEvents::load(rows)?)?;
        Ok(user)
    }

    pub async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<StoredCredentials, UserError> {
        let credentials: Option<StoredCredentials> = sqlx::query_as(
            r#"SELECT id, password_salt, password_hash
            FROM tasyir_users
            WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        credentials.ok_or_else(|| UserError::UsernameNotFound(username.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<User>, UserError> {
        let rows: Vec<GenericEvent> = sqlx::query_as(
            r#"SELECT e.id, e.sequence, e.event, e.recorded_at
            FROM tasyir_user_events e
            JOIN tasyir_users u ON u.id = e.id
            ORDER BY u.username, e.id, e.sequence"#,
        )
        .fetch_all(&self.pool)
        .await?;
        EntityEvents::load_grouped(rows)?
            .into_iter()
            .map(|events| User::try_from(events).map_err(UserError::from))
            .collect()
    }
}
