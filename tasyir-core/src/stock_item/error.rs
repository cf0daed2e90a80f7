use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::{StockCategoryId, StockItemId, SupplierId};

#[derive(Error, Debug)]
pub enum StockItemError {
    #[error("StockItemError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("StockItemError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("StockItemError - NotFound: {0}")]
    NotFound(StockItemId),
    #[error(
        "StockItemError - InsufficientQuantity: item {id} holds {quantity}, cannot apply {delta}"
    )]
    InsufficientQuantity {
        id: StockItemId,
        quantity: i64,
        delta: i64,
    },
    #[error("StockItemError - UnknownCategory: {0}")]
    UnknownCategory(StockCategoryId),
    #[error("StockItemError - UnknownSupplier: {0}")]
    UnknownSupplier(SupplierId),
    #[error("StockItemError - DuplicateSku")]
    DuplicateSku,
}

impl From<sqlx::Error> for StockItemError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(err) = &error {
            if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::DuplicateSku;
            }
        }
        Self::Sqlx(error)
    }
}
