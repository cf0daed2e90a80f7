use sqlx::PgPool;

use super::{entity::Session, error::SessionError};
use tasyir_types::primitives::{SessionId, UserId};

#[derive(Debug, Clone)]
pub(super) struct SessionRepo {
    pool: PgPool,
}

impl SessionRepo {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create_for_user(
        &self,
        user_id: UserId,
        inactivity_timeout_secs: u32,
    ) -> Result<Session, SessionError> {
        let token = hex::encode(rand::random::<[u8; 32]>());
        let session: Session = sqlx::query_as(
            r#"INSERT INTO tasyir_sessions (id, user_id, token, inactivity_timeout_secs)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, token, inactivity_timeout_secs, created_at, last_seen_at"#,
        )
        .bind(SessionId::new())
        .bind(user_id)
        .bind(&token)
        .bind(inactivity_timeout_secs as i32)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Session, SessionError> {
        let session: Option<Session> = sqlx::query_as(
            r#"SELECT id, user_id, token, inactivity_timeout_secs, created_at, last_seen_at
            FROM tasyir_sessions
            WHERE token = $1"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        session.ok_or(SessionError::NotFound)
    }

    pub async fn touch(&self, session_id: SessionId) -> Result<Session, SessionError> {
        let session: Option<Session> = sqlx::query_as(
            r#"UPDATE tasyir_sessions
            SET last_seen_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, token, inactivity_timeout_secs, created_at, last_seen_at"#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        session.ok_or(SessionError::NotFound)
    }

    /// New sessions pick up timeout preference changes immediately; live
    /// ones are updated here so the change applies without a re-login.
    pub async fn update_timeout_for_user(
        &self,
        user_id: UserId,
        inactivity_timeout_secs: u32,
    ) -> Result<(), SessionError> {
        sqlx::query(
            r#"UPDATE tasyir_sessions
            SET inactivity_timeout_secs = $2
            WHERE user_id = $1"#,
        )
        .bind(user_id)
        .bind(inactivity_timeout_secs as i32)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Bulk-removes sessions whose idle window has lapsed. Presenting a
    /// token expires that one session; this catches tokens never presented
    /// again. The cutoff matches `Session::is_expired`: strictly more than
    /// the timeout since last activity.
    pub async fn delete_expired(&self) -> Result<u64, SessionError> {
        let result = sqlx::query(
            r#"DELETE FROM tasyir_sessions
            WHERE last_seen_at < NOW() - make_interval(secs => inactivity_timeout_secs)"#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn revoke(&self, session_id: SessionId) -> Result<(), SessionError> {
        sqlx::query(r#"DELETE FROM tasyir_sessions WHERE id = $1"#)
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
