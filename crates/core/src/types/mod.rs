//! Core types for Orchard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod name;
pub mod password;
pub mod quantity;

pub use email::{Email, EmailError};
pub use id::*;
pub use name::{NameError, UserName};
pub use password::{Password, PasswordError};
pub use quantity::{Quantity, QuantityError};
