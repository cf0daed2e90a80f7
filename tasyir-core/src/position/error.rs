use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::{DepartmentId, PositionId};

#[derive(Error, Debug)]
pub enum PositionError {
    #[error("PositionError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("PositionError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("PositionError - NotFound: {0}")]
    NotFound(PositionId),
    #[error("PositionError - UnknownDepartment: {0}")]
    UnknownDepartment(DepartmentId),
}
