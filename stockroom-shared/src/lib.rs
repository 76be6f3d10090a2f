//! # Stockroom Shared Library
//!
//! This crate contains the domain types, persistence layer and business
//! operations used by the Stockroom API server.
//!
//! ## Module Organization
//!
//! - `models`: Entity types (users, products, orders) and their SQL operations
//! - `store`: The `Store` persistence trait with Postgres and in-memory backends
//! - `services`: Domain operations (auth, products, orders, reports)
//! - `auth`: Password hashing, JWT tokens, request auth context
//! - `export`: CSV rendering for the data export
//! - `db`: Connection pool and migrations
//! - `error`: Domain error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the Stockroom shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
