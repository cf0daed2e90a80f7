use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::{AccountId, ParseAccountCodeError};

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("AccountError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("AccountError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("AccountError - NotFound: {0}")]
    NotFound(AccountId),
    #[error("AccountError - CodeNotFound: {0}")]
    CodeNotFound(String),
    #[error("AccountError - ParseAccountCode: {0}")]
    ParseAccountCode(#[from] ParseAccountCodeError),
    #[error("AccountError - CodePrefixMismatch: code {child} does not extend parent code {parent}")]
    CodePrefixMismatch { child: String, parent: String },
    #[error("AccountError - DuplicateCode")]
    DuplicateCode,
}

impl From<sqlx::Error> for AccountError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(err) = &error {
            if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::DuplicateCode;
            }
        }
        Self::Sqlx(error)
    }
}
