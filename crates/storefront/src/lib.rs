//! Orchard Storefront library.
//!
//! Signup, sign-in and cart HTTP API over `PostgreSQL`. The binary in
//! `main.rs` wires configuration, telemetry and the database pool around the
//! router built by [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
