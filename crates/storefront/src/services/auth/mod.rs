//! Authentication service.
//!
//! Provides password signup and sign-in. Session issuance is left to the
//! caller: both operations return the user's public profile.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use tracing::instrument;

use orchard_core::{Email, Password};

use crate::db::{RepositoryError, UserStore};
use crate::models::User;
use crate::validation::SignupRequest;

/// Authentication service.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Register a new user from a signup record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` listing every failed field.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<User, AuthError> {
        let signup = request.validate()?;

        let password_hash = hash_password(&signup.password)?;

        let user = self
            .users
            .create(&signup.email, &signup.name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// malformed, or the password is wrong.
    #[instrument(skip(self, password))]
    pub async fn signin(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &Password) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
