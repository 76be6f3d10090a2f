/// Product endpoints
///
/// # Endpoints
///
/// - `GET    /api/products` - List products
/// - `POST   /api/products` - Create a product
/// - `PUT    /api/products/:id` - Update some fields of a product
/// - `DELETE /api/products/:id` - Delete a product (its orders are kept)

use super::ApiJson;
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use stockroom_shared::{
    models::product::Product,
    services::{
        self,
        products::{self, ProductPayload, PRODUCT_NOT_FOUND},
    },
};

#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub message: &'static str,
    pub product: Product,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdatedResponse {
    pub message: &'static str,
    pub updated_product: Product,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Lists all products; an empty catalogue is `[]`
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(products::list(state.store.as_ref()).await?))
}

/// Creates a product
///
/// # Endpoint
///
/// ```text
/// POST /api/products
/// Content-Type: application/json
///
/// {
///   "name": "Widget",
///   "sku": "W1",
///   "price": 10,
///   "stock": 5,
///   "category": "Tools",
///   "minimumStockAlert": 2
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or negative fields, or duplicate SKU
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> ApiResult<(StatusCode, Json<ProductCreatedResponse>)> {
    let product = products::create(state.store.as_ref(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            message: "Product created successfully",
            product,
        }),
    ))
}

/// Shallow-merges the body into the product
///
/// # Errors
///
/// - `400 Bad Request`: Empty or negative fields, or SKU taken
/// - `404 Not Found`: No such product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> ApiResult<Json<ProductUpdatedResponse>> {
    let id = services::parse_id(&id, PRODUCT_NOT_FOUND)?;
    let updated_product = products::update(state.store.as_ref(), id, payload).await?;

    Ok(Json(ProductUpdatedResponse {
        message: "Product updated successfully",
        updated_product,
    }))
}

/// Deletes a product
///
/// # Errors
///
/// - `404 Not Found`: No such product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = services::parse_id(&id, PRODUCT_NOT_FOUND)?;
    products::delete(state.store.as_ref(), id).await?;

    Ok(Json(MessageResponse {
        message: "Product deleted successfully",
    }))
}
