/// Database models for Stockroom
///
/// Each model carries its entity type, its create/update inputs, and the SQL
/// operations used by [`crate::store::PgStore`].
///
/// # Models
///
/// - `user`: Staff accounts (signup/login)
/// - `product`: Catalog products with stock levels
/// - `order`: Orders referencing a product by id

pub mod order;
pub mod product;
pub mod user;
