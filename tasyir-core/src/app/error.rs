use thiserror::Error;

use crate::{session::error::SessionError, user::error::UserError};

#[derive(Error, Debug)]
pub enum TasyirError {
    #[error("TasyirError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("TasyirError - Migrate: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
    #[error("TasyirError - Config: {0}")]
    ConfigError(String),
    #[error("TasyirError - Session: {0}")]
    Session(#[from] SessionError),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("AuthError - InvalidCredentials")]
    InvalidCredentials,
    #[error("AuthError - NotAuthenticated")]
    NotAuthenticated,
    #[error("AuthError - SessionExpired")]
    SessionExpired,
    #[error("AuthError - UserInactive")]
    UserInactive,
    #[error("AuthError - UserError: {0}")]
    UserError(UserError),
    #[error("AuthError - SessionError: {0}")]
    SessionError(SessionError),
}

impl From<UserError> for AuthError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::InvalidCredentials | UserError::UsernameNotFound(_) => {
                Self::InvalidCredentials
            }
            e => Self::UserError(e),
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::NotFound => Self::NotAuthenticated,
            e => Self::SessionError(e),
        }
    }
}
