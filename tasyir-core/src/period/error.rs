use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::PeriodId;

#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("PeriodError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("PeriodError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("PeriodError - NotFound: {0}")]
    NotFound(PeriodId),
    #[error("PeriodError - AlreadyClosed: {0}")]
    AlreadyClosed(PeriodId),
    #[error("PeriodError - InvalidDateRange: end date precedes start date")]
    InvalidDateRange,
    #[error("PeriodError - DuplicateName")]
    DuplicateName,
}

impl From<sqlx::Error> for PeriodError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(err) = &error {
            if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::DuplicateName;
            }
        }
        Self::Sqlx(error)
    }
}
