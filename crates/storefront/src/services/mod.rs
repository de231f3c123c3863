//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Signup and password sign-in
//! - `cart` - Cart item listing and mutation
//!
//! Services are plain structs borrowing a store from [`crate::state::AppState`];
//! handlers construct one per request.

pub mod auth;
pub mod cart;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
