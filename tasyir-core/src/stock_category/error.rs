use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::StockCategoryId;

#[derive(Error, Debug)]
pub enum StockCategoryError {
    #[error("StockCategoryError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("StockCategoryError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("StockCategoryError - NotFound: {0}")]
    NotFound(StockCategoryId),
    #[error("StockCategoryError - DuplicateName")]
    DuplicateName,
}

impl From<sqlx::Error> for StockCategoryError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(err) = &error {
            if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::DuplicateName;
            }
        }
        Self::Sqlx(error)
    }
}
