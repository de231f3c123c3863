//! Orchard Core - Shared domain types.
//!
//! This crate provides the validated types used across all Orchard components:
//! - `storefront` - Auth and cart HTTP API
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no database
//! access, no HTTP. Values are parsed once at the boundary and carried as typed
//! values afterwards.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, passwords, names, and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
