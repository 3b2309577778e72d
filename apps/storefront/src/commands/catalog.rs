//! # Catalog Commands
//!
//! Product listing and the product page's "add to cart" button.
//!
//! ```text
//! add_product_to_cart("prod-1", 50)
//!      │
//!      ▼
//! catalog().get_active ── none ──► NOT_FOUND
//!      │
//!      ▼
//! clamp 50 into [min_quantity or 1, max_quantity or ∞]
//!      │
//!      ▼
//! cart.add_item_times(n)  (published as one change)
//! ```

use tracing::{debug, info};

use super::cart::CartResponse;
use crate::error::ApiResult;
use crate::state::{CartState, DbState};
use signboard_core::{CoreError, Product};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Lists products on sale, optionally within one category.
pub async fn list_products(
    db: &DbState,
    category: Option<&str>,
    limit: Option<u32>,
) -> ApiResult<Vec<Product>> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
    debug!(?category, limit, "list_products command");

    Ok(db.inner().catalog().list_active(category, limit).await?)
}

/// Gets a product that is still on sale.
pub async fn get_product(db: &DbState, product_id: &str) -> ApiResult<Product> {
    debug!(product_id = %product_id, "get_product command");

    db.inner()
        .catalog()
        .get_active(product_id)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()).into())
}

/// Adds a catalog product to the cart.
///
/// The requested quantity (default 1) is clamped into the product's
/// allowed range, then added under one lock as a single change.
pub async fn add_product_to_cart(
    db: &DbState,
    cart: &CartState,
    product_id: &str,
    quantity: Option<i64>,
) -> ApiResult<CartResponse> {
    let requested = quantity.unwrap_or(1);
    debug!(product_id = %product_id, requested, "add_product_to_cart command");

    let product = get_product(db, product_id).await?;
    let units = product.clamp_quantity(requested);
    if units != requested {
        info!(
            product_id = %product_id,
            requested,
            units,
            "Quantity clamped to product limits"
        );
    }

    let snapshot = cart.add_item_times(product.snapshot(), units);
    Ok(CartResponse::from(snapshot))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use signboard_core::Money;
    use signboard_db::{Database, DbConfig};

    pub(crate) fn product(id: &str, cents: i64, min: Option<i64>, max: Option<i64>) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: None,
            category: Some("signs".to_string()),
            price: Money::from_cents(cents),
            image_url: None,
            unit: None,
            min_quantity: min,
            max_quantity: max,
            lead_time_days: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) async fn test_db() -> DbState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.catalog()
            .insert(&product("sign", 10000, None, Some(10)))
            .await
            .unwrap();
        db.catalog()
            .insert(&product("banner", 450, Some(4), None))
            .await
            .unwrap();
        let mut retired = product("retired", 100, None, None);
        retired.is_active = false;
        db.catalog().insert(&retired).await.unwrap();
        DbState::new(db)
    }

    #[tokio::test]
    async fn test_add_product_clamps_quantity() {
        let db = test_db().await;
        let cart = CartState::new();

        let response = add_product_to_cart(&db, &cart, "banner", None).await.unwrap();
        assert_eq!(response.item_count, 4);

        let response = add_product_to_cart(&db, &cart, "sign", Some(50)).await.unwrap();
        assert_eq!(response.item_count, 14);
        assert_eq!(response.total.cents(), 4 * 450 + 10 * 10000);
        assert_eq!(response.items.len(), 2);
    }

    #[tokio::test]
    async fn test_large_quantity_on_unbounded_product() {
        let db = test_db().await;
        let cart = CartState::new();

        let response = add_product_to_cart(&db, &cart, "banner", Some(1_000_000_000_000))
            .await
            .unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.item_count, 1_000_000_000_000);
        assert_eq!(response.total.cents(), 450 * 1_000_000_000_000);
    }

    #[tokio::test]
    async fn test_unknown_or_inactive_product_is_not_found() {
        let db = test_db().await;
        let cart = CartState::new();

        let err = add_product_to_cart(&db, &cart, "retired", Some(1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_product_to_cart(&db, &cart, "nope", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(cart.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_list_products_skips_inactive() {
        let db = test_db().await;
        let products = list_products(&db, None, None).await.unwrap();
        assert_eq!(products.len(), 2);
    }
}
