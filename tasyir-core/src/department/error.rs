use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::DepartmentId;

#[derive(Error, Debug)]
pub enum DepartmentError {
    #[error("DepartmentError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("DepartmentError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("DepartmentError - NotFound: {0}")]
    NotFound(DepartmentId),
    #[error("DepartmentError - DuplicateName")]
    DuplicateName,
}

impl From<sqlx::Error> for DepartmentError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(err) = &error {
            if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::DuplicateName;
            }
        }
        Self::Sqlx(error)
    }
}
