//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{Email, UserId, UserName};

/// A storefront user (domain type).
///
/// The password hash never leaves the repository layer, so this type is safe
/// to serialize into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: UserName,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}
