//! Plaintext password type with a strong-password policy.

use secrecy::{ExposeSecret, SecretString};

/// Errors that can occur when parsing a [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The input string is empty.
    #[error("password should not be empty")]
    Empty,
    /// The input string is too long.
    #[error("password must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not satisfy the strong-password policy.
    #[error(
        "password is not strong enough (at least {min} characters with lowercase, uppercase, number and symbol)"
    )]
    NotStrong {
        /// Minimum required length.
        min: usize,
    },
}

/// Characters that count as symbols for the strong-password policy.
const SYMBOLS: &str = "-#!$@£%^&*()_+|~=`{}[]:\";'<>?,./\\ ";

/// A plaintext password that passed the strong-password policy.
///
/// Only lives between request parsing and hashing. The value is held in a
/// [`SecretString`], so `Debug` is redacted and the memory is zeroized on drop.
///
/// ## Policy
///
/// - Length: 8-255 characters
/// - At least one ASCII lowercase letter, one ASCII uppercase letter, one
///   ASCII digit, and one symbol from ``-#!$@£%^&*()_+|~=`{}[]:";'<>?,./\``
///   or space
///
/// ## Examples
///
/// ```
/// use orchard_core::Password;
///
/// assert!(Password::parse("Str0ng!Pass").is_ok());
/// assert!(Password::parse("weak").is_err());
/// ```
#[derive(Debug)]
pub struct Password(SecretString);

impl Password {
    /// Minimum length required by the strong-password policy.
    pub const MIN_LENGTH: usize = 8;
    /// Maximum length of a password, in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `Password` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 255 characters, or
    /// fails the strong-password policy.
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        if s.is_empty() {
            return Err(PasswordError::Empty);
        }

        let length = s.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PasswordError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let strong = length >= Self::MIN_LENGTH
            && s.chars().any(|c| c.is_ascii_lowercase())
            && s.chars().any(|c| c.is_ascii_uppercase())
            && s.chars().any(|c| c.is_ascii_digit())
            && s.chars().any(|c| SYMBOLS.contains(c));

        if !strong {
            return Err(PasswordError::NotStrong {
                min: Self::MIN_LENGTH,
            });
        }

        Ok(Self(SecretString::from(s.to_owned())))
    }
}

impl ExposeSecret<str> for Password {
    fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}
