//! Cart item repository for database operations.
//!
//! Every statement addresses rows by the `(cart_id, product_id)` primary key.
//! Update and delete use `RETURNING` so a row that vanished concurrently
//! comes back as `None` instead of a silent success.

use async_trait::async_trait;
use sqlx::PgPool;

use orchard_core::{CartId, ProductId, Quantity};

use super::{CartStore, RepositoryError};
use crate::models::CartItem;

#[derive(sqlx::FromRow)]
struct CartItemRow {
    cart_id: CartId,
    product_id: ProductId,
    quantity: Quantity,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            cart_id: row.cart_id,
            product_id: row.product_id,
            quantity: row.quantity,
        }
    }
}

/// `PostgreSQL`-backed cart store.
#[derive(Clone)]
pub struct CartItemRepository {
    pool: PgPool,
}

impl CartItemRepository {
    /// Create a new cart item repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for CartItemRepository {
    async fn list(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT cart_id, product_id, quantity
            FROM storefront.cart_item
            WHERE cart_id = $1
            ORDER BY product_id DESC
            ",
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    async fn find(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT cart_id, product_id, quantity
            FROM storefront.cart_item
            WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartItem::from))
    }

    async fn create(&self, item: CartItem) -> Result<CartItem, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r"
            INSERT INTO storefront.cart_item (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING cart_id, product_id, quantity
            ",
        )
        .bind(item.cart_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "cart item already exists"))?;

        Ok(row.into())
    }

    async fn update_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r"
            UPDATE storefront.cart_item
            SET quantity = $3
            WHERE cart_id = $1 AND product_id = $2
            RETURNING cart_id, product_id, quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartItem::from))
    }

    async fn delete(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r"
            DELETE FROM storefront.cart_item
            WHERE cart_id = $1 AND product_id = $2
            RETURNING cart_id, product_id, quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CartItem::from))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
