//! Database operations for storefront `PostgreSQL`.
//!
//! # Database: `orchard`
//!
//! ## Tables
//!
//! - `storefront.user` - Accounts created via signup (email, name, Argon2 hash)
//! - `storefront.cart_item` - Cart membership keyed by `(cart_id, product_id)`
//!
//! # Stores
//!
//! Services talk to storage through the [`UserStore`] and [`CartStore`]
//! traits. [`UserRepository`] and [`CartItemRepository`] implement them on
//! `PostgreSQL`; [`memory`] provides in-process implementations for tests.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p orchard-cli -- migrate
//! ```

pub mod cart_items;
pub mod memory;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use orchard_core::{CartId, Email, ProductId, Quantity, UserName};

use crate::models::{CartItem, User};

pub use cart_items::CartItemRepository;
pub use memory::{MemoryCartStore, MemoryUserStore};
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email, duplicate cart item).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique-violation into `Conflict`, anything else into `Database`.
    pub(crate) fn from_insert(err: sqlx::Error, conflict: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict.to_owned());
        }
        Self::Database(err)
    }
}

/// Storage for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    async fn create(
        &self,
        email: &Email,
        name: &UserName,
        password_hash: &str,
    ) -> Result<User, RepositoryError>;

    /// Get a user and their password hash by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;
}

/// Storage for cart items, keyed by `(cart_id, product_id)`.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// All items of a cart, ordered by product ID descending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError>;

    /// Look up one item by its composite key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError>;

    /// Insert a new item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the composite key already exists.
    async fn create(&self, item: CartItem) -> Result<CartItem, RepositoryError>;

    /// Overwrite an item's quantity. Returns `None` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn update_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError>;

    /// Remove an item, returning its prior values. Returns `None` if the key
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn delete(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError>;

    /// Verify the backing storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the storage cannot be reached.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
