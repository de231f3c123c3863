//! Cart service.
//!
//! Maps the four cart operations onto the [`CartStore`]. Update and delete
//! re-check that the `(cart_id, product_id)` pair exists before mutating it;
//! a missing pair is rejected with [`CartError::ItemNotFound`].

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use orchard_core::{CartId, ProductId, Quantity};

use crate::db::{CartStore, RepositoryError};
use crate::models::{CartItem, CartLine};
use crate::validation::ValidationErrors;

pub const ADDED_MESSAGE: &str = "Product added to cart !";
pub const UPDATED_MESSAGE: &str = "Cart product updated !";
pub const DELETED_MESSAGE: &str = "Cart product deleted !";

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No item exists for the given `(cart_id, product_id)`.
    #[error("Unexisting cart or product")]
    ItemNotFound,

    /// Request fields failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Repository/database error, including duplicate inserts.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result of adding a product to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProductAdded {
    pub message: &'static str,
    pub new_cart_product: CartItem,
}

/// Result of changing a cart item's quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProductUpdated {
    pub message: &'static str,
    pub updated_cart_product: CartItem,
}

/// Result of removing a product from a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProductDeleted {
    pub message: &'static str,
    pub deleted_cart_product: CartItem,
}

/// Cart service.
pub struct CartService<'a> {
    carts: &'a dyn CartStore,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(carts: &'a dyn CartStore) -> Self {
        Self { carts }
    }

    /// List a cart's products, highest product ID first.
    ///
    /// An unknown cart is simply empty.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, cart_id: CartId) -> Result<Vec<CartLine>, CartError> {
        let items = self.carts.list(cart_id).await?;
        Ok(items.into_iter().map(CartLine::from).collect())
    }

    /// Add a product to a cart.
    ///
    /// There is no duplicate pre-check: adding a product already in the cart
    /// fails in storage and surfaces as `CartError::Repository`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Validation` if `quantity` is negative.
    /// Returns `CartError::Repository` if the insert fails.
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartProductAdded, CartError> {
        let quantity = parse_quantity(quantity)?;

        let item = self
            .carts
            .create(CartItem {
                cart_id,
                product_id,
                quantity,
            })
            .await?;

        tracing::info!(%cart_id, %product_id, %quantity, "Product added to cart");
        Ok(CartProductAdded {
            message: ADDED_MESSAGE,
            new_cart_product: item,
        })
    }

    /// Overwrite the quantity of a product already in a cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Validation` if `quantity` is negative.
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    /// Returns `CartError::Repository` if a query fails.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartProductUpdated, CartError> {
        let quantity = parse_quantity(quantity)?;

        self.ensure_exists(cart_id, product_id).await?;

        let item = self
            .carts
            .update_quantity(cart_id, product_id, quantity)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        tracing::info!(%cart_id, %product_id, %quantity, "Cart product updated");
        Ok(CartProductUpdated {
            message: UPDATED_MESSAGE,
            updated_cart_product: item,
        })
    }

    /// Remove a product from a cart, returning its prior values.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the product is not in the cart.
    /// Returns `CartError::Repository` if a query fails.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<CartProductDeleted, CartError> {
        self.ensure_exists(cart_id, product_id).await?;

        let item = self
            .carts
            .delete(cart_id, product_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        tracing::info!(%cart_id, %product_id, "Cart product deleted");
        Ok(CartProductDeleted {
            message: DELETED_MESSAGE,
            deleted_cart_product: item,
        })
    }

    async fn ensure_exists(&self, cart_id: CartId, product_id: ProductId) -> Result<(), CartError> {
        if self.carts.find(cart_id, product_id).await?.is_none() {
            tracing::warn!(%cart_id, %product_id, "Cart item not found");
            return Err(CartError::ItemNotFound);
        }
        Ok(())
    }
}

fn parse_quantity(quantity: i32) -> Result<Quantity, ValidationErrors> {
    Quantity::new(quantity).map_err(|e| ValidationErrors::single("quantity", e))
}
