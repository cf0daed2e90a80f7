use thiserror::Error;

use crate::entity::EntityError;
use tasyir_types::primitives::{DepartmentId, EmployeeId, PositionId};

#[derive(Error, Debug)]
pub enum EmployeeError {
    #[error("EmployeeError - Sqlx: {0}")]
    Sqlx(sqlx::Error),
    #[error("EmployeeError - EntityError: {0}")]
    EntityError(#[from] EntityError),
    #[error("EmployeeError - NotFound: {0}")]
    NotFound(EmployeeId),
    #[error("EmployeeError - AlreadyInactive: {0}")]
    AlreadyInactive(EmployeeId),
    #[error("EmployeeError - UnknownDepartment: {0}")]
    UnknownDepartment(DepartmentId),
    #[error("EmployeeError - UnknownPosition: {0}")]
    UnknownPosition(PositionId),
    #[error("EmployeeError - DuplicateEmail")]
    DuplicateEmail,
}

impl From<sqlx::Error> for EmployeeError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(err) = &error {
            if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Self::DuplicateEmail;
            }
        }
        Self::Sqlx(error)
    }
}
