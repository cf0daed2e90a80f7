mod entity;
pub mod error;
mod repo;

use sqlx::PgPool;
use tracing::instrument;

pub use entity::*;
use error::*;
use repo::*;

use tasyir_types::primitives::{SessionId, UserId};

#[derive(Clone)]
pub struct Sessions {
    repo: SessionRepo,
}

impl Sessions {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            repo: SessionRepo::new(pool),
        }
    }

    #[instrument(name = "tasyir.sessions.create_for_user", skip(self))]
    pub async fn create_for_user(
        &self,
        user_id: UserId,
        inactivity_timeout_secs: u32,
    ) -> Result<Session, SessionError> {
        self.repo
            .create_for_user(user_id, inactivity_timeout_secs)
            .await
    }

    #[instrument(name = "tasyir.sessions.find_by_token", skip_all)]
    pub async fn find_by_token(&self, token: &str) -> Result<Session, SessionError> {
        self.repo.find_by_token(token).await
    }

    #[instrument(name = "tasyir.sessions.touch", skip(self))]
    pub async fn touch(&self, session_id: SessionId) -> Result<Session, SessionError> {
        self.repo.touch(session_id).await
    }

    #[instrument(name = "tasyir.sessions.update_timeout_for_user", skip(self))]
    pub async fn update_timeout_for_user(
        &self,
        user_id: UserId,
        inactivity_timeout_secs: u32,
    ) -> Result<(), SessionError> {
        self.repo
            .update_timeout_for_user(user_id, inactivity_timeout_secs)
            .await
    }

    #[instrument(name = "tasyir.sessions.revoke", skip(self))]
    pub async fn revoke(&self, session_id: SessionId) -> Result<(), SessionError> {
        self.repo.revoke(session_id).await
    }

    #[instrument(name = "tasyir.sessions.sweep_expired", skip(self))]
    pub async fn sweep_expired(&self) -> Result<u64, SessionError> {
        self.repo.delete_expired().await
    }
}
