//! # Stockroom API Server Library
//!
//! HTTP surface of the inventory backend: users, products, orders and
//! reporting, served with axum on top of the `stockroom-shared` store and
//! services.
//!
//! ## Modules
//!
//! - `app`: Application state, router and bearer-token layer
//! - `config`: Configuration loaded from the environment
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
