//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::validation::ValidationErrors;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more signup fields failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
