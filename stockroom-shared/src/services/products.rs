/// Product catalogue operations
///
/// Create requires every field; update is a shallow merge of whatever fields
/// the payload carries. SKU uniqueness is enforced by the store, so two
/// concurrent creates with the same SKU cannot both succeed.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{present_text, required};
use crate::error::{ServiceError, ServiceResult};
use crate::models::product::{CreateProduct, Product, UpdateProduct};
use crate::store::Store;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Product fields as sent by clients, used for both create and update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "SKU must not be empty"))]
    pub sku: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i64>,

    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "Minimum stock alert must not be negative"))]
    pub minimum_stock_alert: Option<i64>,
}

/// Lists every product
pub async fn list(store: &dyn Store) -> ServiceResult<Vec<Product>> {
    Ok(store.list_products().await?)
}

/// Creates a product
///
/// # Errors
///
/// - `Validation` if any field is missing or out of range
/// - `Conflict` if the SKU is taken
pub async fn create(store: &dyn Store, payload: ProductPayload) -> ServiceResult<Product> {
    payload.validate()?;

    let data = CreateProduct {
        name: required(present_text(payload.name))?,
        sku: required(present_text(payload.sku))?,
        price: required(payload.price)?,
        stock: required(payload.stock)?,
        category: required(present_text(payload.category))?,
        minimum_stock_alert: required(payload.minimum_stock_alert)?,
    };

    let product = store.create_product(data).await?;

    info!(product_id = %product.id, sku = %product.sku, "Product created");
    Ok(product)
}

/// Shallow-merges the payload's fields onto an existing product
///
/// # Errors
///
/// - `Validation` if a provided field is empty or out of range
/// - `NotFound` if no product has this ID
/// - `Conflict` if the new SKU is taken by another product
pub async fn update(store: &dyn Store, id: Uuid, payload: ProductPayload) -> ServiceResult<Product> {
    let payload = ProductPayload {
        name: payload.name.map(|v| v.trim().to_string()),
        sku: payload.sku.map(|v| v.trim().to_string()),
        category: payload.category.map(|v| v.trim().to_string()),
        ..payload
    };
    payload.validate()?;

    let patch = UpdateProduct {
        name: payload.name,
        sku: payload.sku,
        price: payload.price,
        stock: payload.stock,
        category: payload.category,
        minimum_stock_alert: payload.minimum_stock_alert,
    };

    let product = store
        .update_product(id, patch)
        .await?
        .ok_or_else(|| ServiceError::not_found(PRODUCT_NOT_FOUND))?;

    info!(product_id = %product.id, "Product updated");
    Ok(product)
}

/// Deletes a product; orders that reference it are kept
///
/// # Errors
///
/// `NotFound` if no product has this ID
pub async fn delete(store: &dyn Store, id: Uuid) -> ServiceResult<()> {
    if !store.delete_product(id).await? {
        return Err(ServiceError::not_found(PRODUCT_NOT_FOUND));
    }

    info!(product_id = %id, "Product deleted");
    Ok(())
}
