//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{CartItemRepository, CartStore, UserRepository, UserStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the user and cart stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: Arc<dyn UserStore>,
    carts: Arc<dyn CartStore>,
}

impl AppState {
    /// Create a new application state from arbitrary stores.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, carts: Arc<dyn CartStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { users, carts }),
        }
    }

    /// Create application state backed by `PostgreSQL`.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(CartItemRepository::new(pool)),
        )
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &dyn CartStore {
        self.inner.carts.as_ref()
    }
}
