//! Domain models for storefront.
//!
//! These are validated domain objects, separate from request bodies and
//! database row types.

pub mod cart;
pub mod user;

pub use cart::{CartItem, CartLine};
pub use user::User;
