use thiserror::Error;

use crate::{account::error::AccountError, entity::EntityError, period::error::PeriodError};
use tasyir_types::primitives::{AccountId, JournalEntryId, PeriodId};

use super::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum JournalEntryError {
    #[error("JournalEntryError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("JournalEntryError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("JournalEntryError - NotFound: {0}")]
    NotFound(JournalEntryId),
    #[error("JournalEntryError - Validation: {0}")]
    Validation(ValidationErrors),
    #[error("JournalEntryError - PeriodClosed: period {0} is closed")]
    PeriodClosed(PeriodId),
    #[error("JournalEntryError - UnknownAccount: {0}")]
    UnknownAccount(AccountId),
    #[error("JournalEntryError - DuplicateReference")]
    DuplicateReference,
    #[error("JournalEntryError - PeriodError: {0}")]
    PeriodError(#[from] PeriodError),
    #[error("JournalEntryError - AccountError: {0}")]
    AccountError(#[from] AccountError),
}

impl From<ValidationErrors> for JournalEntryError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<sqlx::Error> for JournalEntryError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(err) = &error {
            if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::DuplicateReference;
            }
        }
        Self::Sqlx(error)
    }
}
