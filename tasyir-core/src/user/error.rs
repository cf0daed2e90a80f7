use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::UserId;
use tasyir_types::user::{INACTIVITY_TIMEOUT_MAX_SECS, INACTIVITY_TIMEOUT_MIN_SECS};

#[derive(Error, Debug)]
pub enum UserError {
    #[error("UserError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("UserError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("UserError - NotFound: {0}")]
    NotFound(UserId),
    #[error("UserError - UsernameNotFound: {0}")]
    UsernameNotFound(String),
    #[error("UserError - InvalidCredentials")]
    InvalidCredentials,
    #[error("UserError - DuplicateUsername")]
    DuplicateUsername,
    #[error(
        "UserError - InvalidInactivityTimeout: {0} is outside {min}..={max} seconds",
        min = INACTIVITY_TIMEOUT_MIN_SECS,
        max = INACTIVITY_TIMEOUT_MAX_SECS
    )]
    InvalidInactivityTimeout(u32),
}

impl From<sqlx::Error> for UserError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(err) = &error {
            if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::DuplicateUsername;
            }
        }
        Self::Sqlx(error)
    }
}
