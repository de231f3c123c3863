//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email should not be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("email must not contain whitespace")]
    ContainsWhitespace,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The input contains more than one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    MultipleAtSymbols,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The local part (before @) is too long.
    #[error("email local part must be at most {max} characters")]
    LocalPartTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The local part is not dot-separated runs of permitted characters.
    #[error("email local part contains invalid characters or misplaced dots")]
    InvalidLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The domain is not a dotted host name with an alphabetic top-level label.
    #[error("email domain must be a valid host name")]
    InvalidDomain,
    /// The address fails the general email syntax check.
    #[error("email must be a valid email address")]
    InvalidFormat,
}

/// Non-alphanumeric characters permitted in an unquoted local part.
const LOCAL_PART_SYMBOLS: &str = "!#$%&'*+/=?^_`{|}~-";

/// An email address.
///
/// ## Constraints
///
/// - Length: 1-100 characters
/// - No whitespace
/// - Exactly one @ symbol
/// - Local part: 1-64 characters, dot-separated non-empty runs of letters,
///   digits and ``!#$%&'*+/=?^_`{|}~-``
/// - Domain made of dot-separated, non-empty labels, the last one alphabetic
///   and at least two characters long (`example.com`, `shop.co.uk`)
/// - Accepted by [`validator::ValidateEmail`]
///
/// ## Examples
///
/// ```
/// use orchard_core::Email;
///
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("not-an-email").is_err());
/// assert!(Email::parse("user@localhost").is_err());
/// assert!(Email::parse("a..b@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address, in characters.
    pub const MAX_LENGTH: usize = 100;
    /// Maximum length of the local part, in characters.
    pub const MAX_LOCAL_PART_LENGTH: usize = 64;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 100 characters, or
    /// not shaped like `local@domain.tld`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if local.chars().count() > Self::MAX_LOCAL_PART_LENGTH {
            return Err(EmailError::LocalPartTooLong {
                max: Self::MAX_LOCAL_PART_LENGTH,
            });
        }

        if !is_dot_atom(local) {
            return Err(EmailError::InvalidLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        if !is_valid_domain(domain) {
            return Err(EmailError::InvalidDomain);
        }

        if !s.validate_email() {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `a.b.c` where every run is non-empty and made of permitted characters.
fn is_dot_atom(local: &str) -> bool {
    local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
    })
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });

    labels_ok && labels.last().is_some_and(|tld| is_valid_tld(tld))
}

/// Alphabetic and at least two characters, or a punycode `xn--` label.
fn is_valid_tld(tld: &str) -> bool {
    if tld.to_ascii_lowercase().starts_with("xn--") {
        return tld.len() > 4;
    }
    tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Email {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Email {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Email {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
