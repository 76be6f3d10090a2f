/// Order operations
///
/// Orders hold a weak reference to their product: deleting a product leaves
/// its orders in place, and listing resolves the reference to `null` once it
/// goes stale. Creating an order never touches stock; a status update may
/// overwrite the product's stock with an absolute value.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{parse_id, present_text, required};
use crate::error::{ServiceError, ServiceResult};
use crate::models::order::{CreateOrder, Order, OrderStatus, OrderWithProduct, StatusUpdate};
use crate::services::products::PRODUCT_NOT_FOUND;
use crate::store::Store;

pub const ORDER_NOT_FOUND: &str = "Order not found";

/// Payload for placing an order
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub product_id: Option<String>,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i64>,

    pub status: Option<String>,

    pub payment_id: Option<String>,
}

/// Payload for a status update with optional stock overwrite
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    pub status: Option<String>,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i64>,
}

fn parse_status(raw: String) -> ServiceResult<OrderStatus> {
    raw.parse().map_err(ServiceError::Validation)
}

/// Lists every order with its product resolved
pub async fn list(store: &dyn Store) -> ServiceResult<Vec<OrderWithProduct>> {
    Ok(store.list_orders_with_products().await?)
}

/// Places an order for an existing product
///
/// # Errors
///
/// - `Validation` if productId, quantity or status is missing or malformed
/// - `NotFound` if the product does not exist; nothing is persisted
pub async fn create(store: &dyn Store, payload: CreateOrderPayload) -> ServiceResult<Order> {
    payload.validate()?;

    let raw_product_id = required(present_text(payload.product_id))?;
    let quantity = required(payload.quantity)?;
    let status = parse_status(required(present_text(payload.status))?)?;

    let product_id = parse_id(&raw_product_id, PRODUCT_NOT_FOUND)?;
    if store.find_product(product_id).await?.is_none() {
        return Err(ServiceError::not_found(PRODUCT_NOT_FOUND));
    }

    let order = store
        .create_order(CreateOrder {
            product_id,
            quantity,
            status,
            payment_id: present_text(payload.payment_id),
        })
        .await?;

    info!(order_id = %order.id, product_id = %product_id, quantity, "Order created");
    Ok(order)
}

/// Sets an order's status and optionally overwrites its product's stock
///
/// # Errors
///
/// - `Validation` if status is missing or malformed, or stock is negative
/// - `NotFound` if the order does not exist, or stock was given and the
///   product no longer exists (nothing is written in that case)
pub async fn update(store: &dyn Store, id: Uuid, payload: UpdateOrderPayload) -> ServiceResult<Order> {
    payload.validate()?;

    let status = parse_status(required(present_text(payload.status))?)?;

    match store.update_order_status(id, status, payload.stock).await? {
        StatusUpdate::Updated(order) => {
            info!(
                order_id = %order.id,
                status = %order.status,
                stock = ?payload.stock,
                "Order updated"
            );
            Ok(order)
        }
        StatusUpdate::OrderMissing => Err(ServiceError::not_found(ORDER_NOT_FOUND)),
        StatusUpdate::ProductMissing => Err(ServiceError::not_found(PRODUCT_NOT_FOUND)),
    }
}

/// Deletes an order; stock is not restored
pub async fn delete(store: &dyn Store, id: Uuid) -> ServiceResult<()> {
    if !store.delete_order(id).await? {
        return Err(ServiceError::not_found(ORDER_NOT_FOUND));
    }

    info!(order_id = %id, "Order deleted");
    Ok(())
}

/// Acknowledges a notification request for an existing order
pub async fn notify(store: &dyn Store, id: Uuid) -> ServiceResult<Order> {
    let order = store
        .find_order(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(ORDER_NOT_FOUND))?;

    info!(order_id = %order.id, status = %order.status, "Order notification sent");
    Ok(order)
}
