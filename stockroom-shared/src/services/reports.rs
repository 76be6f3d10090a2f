/// Dashboard figures and the CSV export

use tracing::debug;

use crate::error::ServiceResult;
use crate::export;
use crate::models::product::Product;
use crate::store::Store;

pub const DEFAULT_RECENT_LIMIT: i64 = 5;
pub const MAX_RECENT_LIMIT: i64 = 50;

pub async fn count_products(store: &dyn Store) -> ServiceResult<i64> {
    Ok(store.count_products().await?)
}

pub async fn count_orders(store: &dyn Store) -> ServiceResult<i64> {
    Ok(store.count_orders().await?)
}

/// Number of products whose stock is strictly below their alert threshold
pub async fn low_stock_count(store: &dyn Store) -> ServiceResult<i64> {
    Ok(store.count_low_stock().await?)
}

/// Newest products first; `limit` defaults to 5 and is clamped to 1..=50
pub async fn recent_products(store: &dyn Store, limit: Option<i64>) -> ServiceResult<Vec<Product>> {
    let limit = limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    Ok(store.recent_products(limit).await?)
}

/// Renders every user, product and order as CSV
pub async fn export_csv(store: &dyn Store) -> ServiceResult<String> {
    let users = store.list_users().await?;
    let products = store.list_products().await?;
    let orders = store.list_orders().await?;

    debug!(
        users = users.len(),
        products = products.len(),
        orders = orders.len(),
        "Rendering inventory export"
    );

    Ok(export::render_inventory(&users, &products, &orders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::CreateProduct;
    use crate::store::MemoryStore;

    async fn seed(store: &MemoryStore, sku: &str, stock: i64, minimum_stock_alert: i64) -> Product {
        store
            .create_product(CreateProduct {
                name: format!("Product {}", sku),
                sku: sku.to_string(),
                price: 1.0,
                stock,
                category: "Misc".to_string(),
                minimum_stock_alert,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_low_stock_is_strict() {
        let store = MemoryStore::new();
        seed(&store, "A", 1, 2).await;
        seed(&store, "B", 2, 2).await;
        seed(&store, "C", 9, 2).await;

        assert_eq!(low_stock_count(&store).await.unwrap(), 1);
        assert_eq!(count_products(&store).await.unwrap(), 3);
        assert_eq!(count_orders(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_recent_products_limit() {
        let store = MemoryStore::new();
        for i in 0..7 {
            seed(&store, &format!("P{}", i), 5, 1).await;
        }

        let recent = recent_products(&store, None).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].sku, "P6");
        assert_eq!(recent[4].sku, "P2");

        assert_eq!(recent_products(&store, Some(0)).await.unwrap().len(), 1);
        assert_eq!(recent_products(&store, Some(500)).await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_export_empty_store() {
        let store = MemoryStore::new();
        let csv = export_csv(&store).await.unwrap();

        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with(export::USER_HEADER));
    }
}
