/// Reporting endpoints
///
/// # Endpoints
///
/// - `GET /api/total-products` - `{"totalProducts": n}`
/// - `GET /api/total-orders` - `{"totalOrders": n}`
/// - `GET /api/low-stock-count` - `{"lowStockCount": n}`
/// - `GET /api/recent-added-products?limit=n` - `{"products": [...]}`
/// - `GET /api/export` - CSV attachment of users, products and orders

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use stockroom_shared::{export::EXPORT_FILENAME, models::product::Product, services::reports};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalProductsResponse {
    pub total_products: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalOrdersResponse {
    pub total_orders: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockResponse {
    pub low_stock_count: i64,
}

#[derive(Debug, Serialize)]
pub struct RecentProductsResponse {
    pub products: Vec<Product>,
}

/// Query string for the recent-products listing
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    /// Number of products, 1..=50 (default 5)
    pub limit: Option<i64>,
}

pub async fn total_products(State(state): State<AppState>) -> ApiResult<Json<TotalProductsResponse>> {
    let total_products = reports::count_products(state.store.as_ref()).await?;
    Ok(Json(TotalProductsResponse { total_products }))
}

pub async fn total_orders(State(state): State<AppState>) -> ApiResult<Json<TotalOrdersResponse>> {
    let total_orders = reports::count_orders(state.store.as_ref()).await?;
    Ok(Json(TotalOrdersResponse { total_orders }))
}

/// Products with stock strictly below their alert threshold
pub async fn low_stock_count(State(state): State<AppState>) -> ApiResult<Json<LowStockResponse>> {
    let low_stock_count = reports::low_stock_count(state.store.as_ref()).await?;
    Ok(Json(LowStockResponse { low_stock_count }))
}

/// Newest products first
pub async fn recent_products(
    State(state): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> ApiResult<Json<RecentProductsResponse>> {
    let Query(query) = query?;
    let products = reports::recent_products(state.store.as_ref(), query.limit).await?;

    Ok(Json(RecentProductsResponse { products }))
}

/// Downloads the whole inventory as CSV
///
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: text/csv
/// Content-Disposition: attachment; filename="inventory-export.csv"
/// ```
pub async fn export_csv(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let csv = reports::export_csv(state.store.as_ref()).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        csv,
    ))
}
