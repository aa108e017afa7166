use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    auth::AuthError,
    env::{which, Environment},
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    EntityNotFound(String),
    #[error("email is already registered")]
    EmailAlreadyRegistered,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an active reservation already exists for this facility")]
    ReservationConflict,
    #[error("operation not permitted")]
    ForbiddenOperation,
    #[error(transparent)]
    Unauthenticated(#[from] AuthError),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("failed to convert a stored value: {0}")]
    ConversionEntityError(String),
    #[error("failed to run a database query")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("failed to hash a password")]
    PasswordHashError(#[from] bcrypt::BcryptError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::EmailAlreadyRegistered => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated(e) => e.status_code(),
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReservationConflict => StatusCode::CONFLICT,
            AppError::ConversionEntityError(_)
            | AppError::SpecificOperationError(_)
            | AppError::PasswordHashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "unexpected error happened"
            );
        } else {
            tracing::warn!(
                error.cause_chain = ?self,
                error.message = %self,
                "rejected a request"
            );
        }

        // Raw error detail stays in the logs outside of development.
        let message = match (status_code.is_server_error(), which()) {
            (true, Environment::Production) => "internal server error".into(),
            _ => self.to_string(),
        };
        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_the_taxonomy() {
        assert_eq!(
            AppError::EmailAlreadyRegistered.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthenticated(AuthError::Expired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthenticated(AuthError::MissingSecret).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::ForbiddenOperation.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::EntityNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ReservationConflict.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::ConversionEntityError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
