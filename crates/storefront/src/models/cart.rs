//! Cart domain types.

use serde::Serialize;

use orchard_core::{CartId, ProductId, Quantity};

/// One product bound to a cart, keyed by `(cart_id, product_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// A cart item as exposed by cart listings (no cart id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

impl From<CartItem> for CartLine {
    fn from(item: CartItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}
