/// Order endpoints
///
/// # Endpoints
///
/// - `GET    /api/orders` - List orders with their product resolved
/// - `POST   /api/orders` - Place an order
/// - `GET    /api/orders/:id` - Send an order notification
/// - `PUT    /api/orders/:id` - Set status, optionally overwriting product stock
/// - `DELETE /api/orders/:id` - Delete an order

use super::{products::MessageResponse, ApiJson};
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use stockroom_shared::{
    models::order::{Order, OrderWithProduct},
    services::{
        self,
        orders::{self, CreateOrderPayload, UpdateOrderPayload, ORDER_NOT_FOUND},
    },
};

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub message: &'static str,
    pub orders: Vec<OrderWithProduct>,
}

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub message: &'static str,
    pub order: Order,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdatedResponse {
    pub message: &'static str,
    pub updated_order: Order,
}

/// Lists orders; `productId` is `{id, name, price, stock}` or `null` when the
/// product has been deleted
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<OrderListResponse>> {
    let orders = orders::list(state.store.as_ref()).await?;

    Ok(Json(OrderListResponse {
        message: "Orders fetched successfully",
        orders,
    }))
}

/// Places an order
///
/// # Endpoint
///
/// ```text
/// POST /api/orders
/// Content-Type: application/json
///
/// {
///   "productId": "uuid",
///   "quantity": 2,
///   "status": "pending"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing fields, quantity below 1, unknown status
/// - `404 Not Found`: No such product
pub async fn create_order(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateOrderPayload>,
) -> ApiResult<(StatusCode, Json<OrderCreatedResponse>)> {
    let order = orders::create(state.store.as_ref(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            message: "Order created successfully",
            order,
        }),
    ))
}

/// Updates status and, when `stock` is present, the product's stock
///
/// # Endpoint
///
/// ```text
/// PUT /api/orders/:id
/// Content-Type: application/json
///
/// { "status": "shipped", "stock": 0 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or unknown status, negative stock
/// - `404 Not Found`: No such order, or stock given for a deleted product
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateOrderPayload>,
) -> ApiResult<Json<OrderUpdatedResponse>> {
    let id = services::parse_id(&id, ORDER_NOT_FOUND)?;
    let updated_order = orders::update(state.store.as_ref(), id, payload).await?;

    Ok(Json(OrderUpdatedResponse {
        message: "Order and Product updated successfully",
        updated_order,
    }))
}

/// Deletes an order; product stock is not restored
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = services::parse_id(&id, ORDER_NOT_FOUND)?;
    orders::delete(state.store.as_ref(), id).await?;

    Ok(Json(MessageResponse {
        message: "Order deleted successfully",
    }))
}

/// Acknowledges a notification for an existing order
pub async fn notify_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = services::parse_id(&id, ORDER_NOT_FOUND)?;
    orders::notify(state.store.as_ref(), id).await?;

    Ok(Json(MessageResponse {
        message: "Order notification sent successfully",
    }))
}
