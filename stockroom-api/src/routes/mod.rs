/// API route handlers
///
/// Handlers are thin: extract the body/path/query, call the matching
/// operation in `stockroom_shared::services`, and shape the JSON response.
///
/// - `health`: Welcome text and health check
/// - `auth`: Signup and login
/// - `users`: User listing
/// - `products`: Product CRUD
/// - `orders`: Order CRUD and notifications
/// - `reports`: Counts, recent products and the CSV export

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;
pub mod users;

use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON body extractor whose rejections use the API's `{"error": ...}` shape
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
