//! Cart route handlers.
//!
//! Carts are addressed by ID in the path; there is no cart entity of its own,
//! only the items stored under a cart ID.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use orchard_core::{CartId, ProductId};

use crate::error::Result;
use crate::models::CartLine;
use crate::services::CartService;
use crate::services::cart::{CartProductAdded, CartProductDeleted, CartProductUpdated};
use crate::state::AppState;

/// Body for adding a product to a cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Body for changing a cart item's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// List the products in a cart.
///
/// GET /cart/{cart_id}
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
) -> Result<Json<Vec<CartLine>>> {
    let lines = CartService::new(state.carts()).list(cart_id).await?;

    Ok(Json(lines))
}

/// Add a product to a cart.
///
/// POST /cart/{cart_id}
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Path(cart_id): Path<CartId>,
    Json(request): Json<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartProductAdded>)> {
    let added = CartService::new(state.carts())
        .add(cart_id, request.product_id, request.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(added)))
}

/// Change the quantity of a product in a cart.
///
/// PATCH /cart/{cart_id}/{product_id}
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(CartId, ProductId)>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Result<Json<CartProductUpdated>> {
    let updated = CartService::new(state.carts())
        .update(cart_id, product_id, request.quantity)
        .await?;

    Ok(Json(updated))
}

/// Remove a product from a cart.
///
/// DELETE /cart/{cart_id}/{product_id}
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(CartId, ProductId)>,
) -> Result<Json<CartProductDeleted>> {
    let deleted = CartService::new(state.carts())
        .delete(cart_id, product_id)
        .await?;

    Ok(Json(deleted))
}
