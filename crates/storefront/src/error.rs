//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error body is JSON: `{"error": "..."}`, plus a `fields` array for
//! validation failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::validation::{FieldError, ValidationErrors};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldError]>,
}

const INTERNAL_MESSAGE: &str = "Internal server error";

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::Validation(_)) | Self::Cart(CartError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::UserAlreadyExists) => StatusCode::CONFLICT,
            Self::Cart(CartError::ItemNotFound) => StatusCode::FORBIDDEN,
            Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash)
            | Self::Cart(CartError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Auth(AuthError::Validation(errors))
            | Self::Cart(CartError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let body = match &self {
            _ if status.is_server_error() => ErrorBody {
                error: INTERNAL_MESSAGE,
                fields: None,
            },
            Self::Auth(AuthError::InvalidCredentials) => ErrorBody {
                error: "Invalid credentials",
                fields: None,
            },
            Self::Auth(AuthError::UserAlreadyExists) => ErrorBody {
                error: "An account with this email already exists",
                fields: None,
            },
            Self::Cart(CartError::ItemNotFound) => ErrorBody {
                error: "Unexisting cart or product",
                fields: None,
            },
            other => ErrorBody {
                error: "Validation failed",
                fields: other.validation_errors().map(ValidationErrors::errors),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::RepositoryError;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Cart(CartError::ItemNotFound)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::Validation(
                ValidationErrors::single("quantity", "bad")
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::Repository(
                RepositoryError::Conflict("dup".to_string())
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::PasswordHash)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "email should not be empty");
        errors.push("name", "name should not be empty");

        let (status, body) = body_json(AppError::Auth(AuthError::Validation(errors))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "email");
        assert_eq!(body["fields"][1]["message"], "name should not be empty");
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (_, body) = body_json(AppError::Cart(CartError::ItemNotFound)).await;

        assert_eq!(body["error"], "Unexisting cart or product");
        assert!(body.get("fields").is_none());
    }

    #[tokio::test]
    async fn test_server_error_hides_details() {
        let (_, body) = body_json(AppError::Auth(AuthError::Repository(
            RepositoryError::DataCorruption("row 42 has a bad email".to_string()),
        )))
        .await;

        assert_eq!(body["error"], INTERNAL_MESSAGE);
        assert!(!body.to_string().contains("row 42"));
    }
}
