use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::SupplierId;

#[derive(Error, Debug)]
pub enum SupplierError {
    #[error("SupplierError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("SupplierError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("SupplierError - NotFound: {0}")]
    NotFound(SupplierId),
}
