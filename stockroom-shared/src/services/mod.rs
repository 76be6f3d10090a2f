/// Domain operations
///
/// Each operation takes the persistence handle (`&dyn Store`) plus a request
/// payload, validates the payload, performs existence checks and writes, and
/// returns either a result or a [`ServiceError`](crate::error::ServiceError).
///
/// # Input contract
///
/// Payload fields are `Option`s. A field is *missing* when it is absent, JSON
/// `null`, or (for strings) empty after trimming. Numeric zero is a present
/// value. Range rules (non-negative price/stock/threshold, positive quantity)
/// are declared on the payload types with `validator`.
///
/// # Modules
///
/// - `auth`: register, login, list users
/// - `products`: product CRUD
/// - `orders`: order CRUD, status update with stock overwrite, notification
/// - `reports`: counts, low stock, recent products, CSV export

pub mod auth;
pub mod orders;
pub mod products;
pub mod reports;

use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

/// Message used whenever a required field is missing
pub const MISSING_FIELDS: &str = "All fields are required";

/// Returns the trimmed string if present and non-empty
pub(crate) fn present_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unwraps a required field or fails with [`MISSING_FIELDS`]
pub(crate) fn required<T>(value: Option<T>) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::validation(MISSING_FIELDS))
}

/// Parses an entity ID; a malformed ID does not resolve to anything
pub fn parse_id(raw: &str, not_found: &str) -> ServiceResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::not_found(not_found))
}
