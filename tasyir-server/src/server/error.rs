use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use tasyir_core::{
    account::error::AccountError,
    department::error::DepartmentError,
    employee::error::EmployeeError,
    error::AuthError,
    journal_entry::error::JournalEntryError,
    period::error::PeriodError,
    position::error::PositionError,
    stock_category::error::StockCategoryError,
    stock_item::error::StockItemError,
    supplier::error::SupplierError,
    user::error::UserError,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("insufficient permissions")]
    Forbidden,
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    JournalEntry(#[from] JournalEntryError),
    #[error("{0}")]
    Period(#[from] PeriodError),
    #[error("{0}")]
    Account(#[from] AccountError),
    #[error("{0}")]
    Department(#[from] DepartmentError),
    #[error("{0}")]
    Position(#[from] PositionError),
    #[error("{0}")]
    Employee(#[from] EmployeeError),
    #[error("{0}")]
    StockCategory(#[from] StockCategoryError),
    #[error("{0}")]
    Supplier(#[from] SupplierError),
    #[error("{0}")]
    StockItem(#[from] StockItemError),
    #[error("{0}")]
    User(#[from] UserError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Field-level validation gets its structured body; everything else
        // is a status code plus a one-line message.
        if let ApiError::JournalEntry(JournalEntryError::Validation(errors)) = &self {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response();
        }

        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            return (
                status,
                Json(json!({ "error": "internal server error" })),
            )
                .into_response();
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        use StatusCode as S;
        match self {
            Self::NotAuthenticated => S::UNAUTHORIZED,
            Self::Forbidden => S::FORBIDDEN,
            Self::Auth(e) => match e {
                AuthError::InvalidCredentials
                | AuthError::NotAuthenticated
                | AuthError::SessionExpired => S::UNAUTHORIZED,
                AuthError::UserInactive => S::FORBIDDEN,
                AuthError::UserError(_) | AuthError::SessionError(_) => S::INTERNAL_SERVER_ERROR,
            },
            Self::JournalEntry(e) => match e {
                JournalEntryError::Validation(_) | JournalEntryError::UnknownAccount(_) => {
                    S::UNPROCESSABLE_ENTITY
                }
                JournalEntryError::NotFound(_) => S::NOT_FOUND,
                JournalEntryError::PeriodClosed(_) | JournalEntryError::DuplicateReference => {
                    S::CONFLICT
                }
                JournalEntryError::PeriodError(PeriodError::NotFound(_)) => S::NOT_FOUND,
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::Period(e) => match e {
                PeriodError::NotFound(_) => S::NOT_FOUND,
                PeriodError::InvalidDateRange => S::UNPROCESSABLE_ENTITY,
                PeriodError::AlreadyClosed(_) | PeriodError::DuplicateName => S::CONFLICT,
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::Account(e) => match e {
                AccountError::NotFound(_) | AccountError::CodeNotFound(_) => S::NOT_FOUND,
                AccountError::ParseAccountCode(_) | AccountError::CodePrefixMismatch { .. } => {
                    S::UNPROCESSABLE_ENTITY
                }
                AccountError::DuplicateCode => S::CONFLICT,
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::Department(e) => match e {
                DepartmentError::NotFound(_) => S::NOT_FOUND,
                DepartmentError::DuplicateName => S::CONFLICT,
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::Position(e) => match e {
                PositionError::NotFound(_) => S::NOT_FOUND,
                PositionError::UnknownDepartment(_) => S::UNPROCESSABLE_ENTITY,
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::Employee(e) => match e {
                EmployeeError::NotFound(_) => S::NOT_FOUND,
                EmployeeError::UnknownDepartment(_) | EmployeeError::UnknownPosition(_) => {
                    S::UNPROCESSABLE_ENTITY
                }
                EmployeeError::AlreadyInactive(_) | EmployeeError::DuplicateEmail => S::CONFLICT,
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::StockCategory(e) => match e {
                StockCategoryError::NotFound(_) => S::NOT_FOUND,
                StockCategoryError::DuplicateName => S::CONFLICT,
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::Supplier(e) => match e {
                SupplierError::NotFound(_) => S::NOT_FOUND,
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::StockItem(e) => match e {
                StockItemError::NotFound(_) => S::NOT_FOUND,
                StockItemError::UnknownCategory(_) | StockItemError::UnknownSupplier(_) => {
                    S::UNPROCESSABLE_ENTITY
                }
                StockItemError::InsufficientQuantity { .. } | StockItemError::DuplicateSku => {
                    S::CONFLICT
                }
                _ => S::INTERNAL_SERVER_ERROR,
            },
            Self::User(e) => match e {
                UserError::NotFound(_) | UserError::UsernameNotFound(_) => S::NOT_FOUND,
                UserError::InvalidInactivityTimeout(_) => S::UNPROCESSABLE_ENTITY,
                UserError::InvalidCredentials => S::UNAUTHORIZED,
                UserError::DuplicateUsername => S::CONFLICT,
                _ => S::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasyir_types::primitives::{JournalEntryId, PeriodId};

    #[test]
    fn validation_maps_to_unprocessable_entity() {
        let error = ApiError::JournalEntry(JournalEntryError::Validation(Default::default()));
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn closed_period_maps_to_conflict() {
        let error = ApiError::JournalEntry(JournalEntryError::PeriodClosed(PeriodId::new()));
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_entry_maps_to_not_found() {
        let error = ApiError::JournalEntry(JournalEntryError::NotFound(JournalEntryId::new()));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn expired_session_maps_to_unauthorized() {
        let error = ApiError::Auth(AuthError::SessionExpired);
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn timeout_preference_out_of_range_maps_to_unprocessable_entity() {
        let error = ApiError::User(UserError::InvalidInactivityTimeout(5));
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
