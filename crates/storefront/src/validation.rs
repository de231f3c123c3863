//! Request validation.
//!
//! Incoming records are checked field by field and every failure is reported
//! at once, so a client can fix all of its mistakes in one round trip. Each
//! rule lives on the corresponding `orchard_core` type; this module only runs
//! them and collects the failures.

use core::fmt;

use serde::{Deserialize, Serialize};

use orchard_core::{Email, Password, UserName};

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the request body.
    pub field: &'static str,
    /// Human-readable description of the failed constraint.
    pub message: String,
}

/// A non-empty list of field errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// An empty error list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// A single-field error.
    #[must_use]
    pub fn single(field: &'static str, message: impl fmt::Display) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Record a failure for `field`.
    pub fn push(&mut self, field: &'static str, message: impl fmt::Display) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    /// The recorded failures, in field order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether any failure was recorded for `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Keep the parsed value, or record its error under `field`.
    fn check<T, E: fmt::Display>(&mut self, field: &'static str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(field, e);
                None
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Candidate signup record, as received.
#[derive(Clone, Deserialize)]
pub struct SignupRequest {
    /// Email address, checked by [`Email::parse`].
    pub email: String,
    /// Plaintext password, checked by [`Password::parse`].
    pub password: String,
    /// Display name, checked by [`UserName::parse`].
    pub name: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// A signup record whose every field passed validation.
#[derive(Debug)]
pub struct ValidSignup {
    /// Account email, unique across users.
    pub email: Email,
    /// Password to hash; never stored as-is.
    pub password: Password,
    /// Display name.
    pub name: UserName,
}

impl SignupRequest {
    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns all failed constraints across `email`, `password` and `name`.
    pub fn validate(&self) -> Result<ValidSignup, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = errors.check("email", Email::parse(&self.email));
        let password = errors.check("password", Password::parse(&self.password));
        let name = errors.check("name", UserName::parse(&self.name));

        match (email, password, name) {
            (Some(email), Some(password), Some(name)) => Ok(ValidSignup {
                email,
                password,
                name,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn request(email: &str, password: &str, name: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_valid_signup_passes_through_unchanged() {
        let valid = request("ada@example.com", "Str0ng!Pass", "Ada Lovelace")
            .validate()
            .unwrap();

        assert_eq!(valid.email.as_str(), "ada@example.com");
        assert_eq!(valid.password.expose_secret(), "Str0ng!Pass");
        assert_eq!(valid.name.as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_invalid_email_is_reported() {
        let errors = request("not-an-email", "Str0ng!Pass", "Ada")
            .validate()
            .unwrap_err();

        assert_eq!(errors.errors().len(), 1);
        assert!(errors.has_field("email"));
    }

    #[test]
    fn test_weak_password_is_reported() {
        let errors = request("ada@example.com", "weak", "Ada")
            .validate()
            .unwrap_err();

        assert_eq!(errors.errors().len(), 1);
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_short_name_is_reported() {
        let errors = request("ada@example.com", "Str0ng!Pass", "ab")
            .validate()
            .unwrap_err();

        assert_eq!(errors.errors().len(), 1);
        assert!(errors.has_field("name"));
    }

    #[test]
    fn test_every_failed_field_is_reported() {
        let errors = request("", "", "").validate().unwrap_err();

        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["email", "password", "name"]);
        assert_eq!(
            errors.to_string(),
            "email: email should not be empty; password: password should not be empty; name: name should not be empty"
        );
    }

    #[test]
    fn test_length_limits() {
        let long_email = format!("{}@example.com", "a".repeat(100));
        let long_password = format!("Aa1!{}", "x".repeat(300));
        let long_name = "n".repeat(51);

        let errors = request(&long_email, &long_password, &long_name)
            .validate()
            .unwrap_err();

        assert!(errors.has_field("email"));
        assert!(errors.has_field("password"));
        assert!(errors.has_field("name"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", request("ada@example.com", "Str0ng!Pass", "Ada"));
        assert!(!debug.contains("Str0ng"));
    }
}
