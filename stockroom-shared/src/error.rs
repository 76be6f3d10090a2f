/// Domain error taxonomy
///
/// Every domain operation in [`crate::services`] returns `ServiceResult<T>`.
/// The API layer maps each variant to an HTTP status; the variants themselves
/// carry the human-readable message that ends up in the response body.
///
/// | Variant | Meaning |
/// |---|---|
/// | `Validation` | Missing or malformed input |
/// | `Conflict` | Uniqueness violation (SKU, email) |
/// | `NotFound` | Referenced entity does not exist |
/// | `InvalidCredentials` | Password did not verify |
/// | `Unexpected` | Persistence or runtime fault |

use crate::auth::{jwt::JwtError, password::PasswordError};
use crate::store::StoreError;

/// Result alias for domain operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by domain operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Referenced entity absent
    #[error("{0}")]
    NotFound(String),

    /// Bad credentials on login
    #[error("{0}")]
    InvalidCredentials(String),

    /// Any persistence or runtime fault
    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { field } => match field.as_str() {
                "sku" => ServiceError::Conflict("Product with this SKU already exists".to_string()),
                "email" => ServiceError::Conflict("User already exists".to_string()),
                other => ServiceError::Conflict(format!("Duplicate value for {}", other)),
            },
            StoreError::CheckViolation(constraint) => {
                ServiceError::Validation(check_message(&constraint).to_string())
            }
            StoreError::Backend(msg) => ServiceError::Unexpected(msg),
        }
    }
}

/// Maps a check constraint name to the message clients see
fn check_message(constraint: &str) -> &'static str {
    match constraint {
        "products_price_check" => "Price must not be negative",
        "products_stock_check" => "Stock must not be negative",
        "products_minimum_stock_alert_check" => "Minimum stock alert must not be negative",
        "orders_quantity_check" => "Quantity must be at least 1",
        _ => "Invalid field value",
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Unexpected(format!("Password operation failed: {}", err))
    }
}

impl From<JwtError> for ServiceError {
    fn from(err: JwtError) -> Self {
        ServiceError::Unexpected(format!("Token operation failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        messages.sort();

        ServiceError::Validation(messages.join("; "))
    }
}
