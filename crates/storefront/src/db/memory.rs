//! In-memory store implementations for testing.
//!
//! They honour the same contracts as the `PostgreSQL` repositories: the cart
//! store rejects a duplicate `(cart_id, product_id)` like the primary key
//! does, and the user store rejects a duplicate email like the unique index.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use orchard_core::{CartId, Email, ProductId, Quantity, UserId, UserName};

use super::{CartStore, RepositoryError, UserStore};
use crate::models::{CartItem, User};

/// In-memory user store.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Email, (User, String)>>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(
        &self,
        email: &Email,
        name: &UserName,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let user = User {
            id: UserId::generate(),
            email: email.clone(),
            name: name.clone(),
            created_at: Utc::now(),
        };
        users.insert(email.clone(), (user.clone(), password_hash.to_owned()));
        Ok(user)
    }

    async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }
}

/// In-memory cart store.
///
/// Items are kept in a `BTreeMap` keyed by `(cart_id, product_id)` so a cart's
/// items are contiguous and already sorted by product ID.
#[derive(Debug, Default, Clone)]
pub struct MemoryCartStore {
    items: Arc<RwLock<BTreeMap<(CartId, ProductId), Quantity>>>,
}

impl MemoryCartStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

const fn item((cart_id, product_id): (CartId, ProductId), quantity: Quantity) -> CartItem {
    CartItem {
        cart_id,
        product_id,
        quantity,
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn list(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|((cart, _), _)| *cart == cart_id)
            .rev()
            .map(|(key, quantity)| item(*key, *quantity))
            .collect())
    }

    async fn find(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let key = (cart_id, product_id);
        let items = self.items.read().await;
        Ok(items.get(&key).map(|quantity| item(key, *quantity)))
    }

    async fn create(&self, new: CartItem) -> Result<CartItem, RepositoryError> {
        let key = (new.cart_id, new.product_id);
        let mut items = self.items.write().await;
        if items.contains_key(&key) {
            return Err(RepositoryError::Conflict(
                "cart item already exists".to_owned(),
            ));
        }
        items.insert(key, new.quantity);
        Ok(new)
    }

    async fn update_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let key = (cart_id, product_id);
        let mut items = self.items.write().await;
        Ok(items.get_mut(&key).map(|current| {
            *current = quantity;
            item(key, quantity)
        }))
    }

    async fn delete(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let key = (cart_id, product_id);
        let mut items = self.items.write().await;
        Ok(items.remove(&key).map(|quantity| item(key, quantity)))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
