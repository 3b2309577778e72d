//! # Catalog Repository
//!
//! Read access to the product catalog, plus the insert used by the seed tool.
//!
//! Rows are fetched with `query_as` into [`ProductRow`] and converted, so a
//! bad price column surfaces as [`DbError::CorruptData`] instead of a panic.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::money_column;
use crate::error::{DbError, DbResult};
use signboard_core::Product;

const PRODUCT_COLUMNS: &str = "id, name, description, category, price_cents, image_url, unit, \
     min_quantity, max_quantity, lead_time_days, is_active, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: Option<String>,
    category: Option<String>,
    price_cents: i64,
    image_url: Option<String>,
    unit: Option<String>,
    min_quantity: Option<i64>,
    max_quantity: Option<i64>,
    lead_time_days: Option<i64>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        Ok(Product {
            price: money_column("products.price_cents", row.price_cents)?,
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            image_url: row.image_url,
            unit: row.unit,
            min_quantity: row.min_quantity,
            max_quantity: row.max_quantity,
            lead_time_days: row.lead_time_days,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for catalog reads.
///
/// ## Usage
/// ```rust,ignore
/// let banners = db.catalog().list_active(Some("banners"), 50).await?;
/// let product = db.catalog().get_active("prod-123").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists active products ordered by name, optionally within one category.
    pub async fn list_active(&self, category: Option<&str>, limit: u32) -> DbResult<Vec<Product>> {
        debug!(?category, limit, "Listing active products");

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 AND (?1 IS NULL OR category = ?1) \
             ORDER BY name LIMIT ?2"
        );

        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(category)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Gets a product by ID regardless of its active flag.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No such product
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Gets a product only if it is still on sale.
    pub async fn get_active(&self, id: &str) -> DbResult<Option<Product>> {
        Ok(self.get_by_id(id).await?.filter(|p| p.is_active))
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, category, price_cents, image_url, unit,
                min_quantity, max_quantity, lead_time_days, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price.cents())
        .bind(&product.image_url)
        .bind(&product.unit)
        .bind(product.min_quantity)
        .bind(product.max_quantity)
        .bind(product.lead_time_days)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts all products, active or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use signboard_core::Money;

    fn product(id: &str, name: &str, category: &str, cents: i64, active: bool) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            category: Some(category.to_string()),
            price: Money::from_cents(cents),
            image_url: None,
            unit: Some("unit".to_string()),
            min_quantity: Some(1),
            max_quantity: None,
            lead_time_days: Some(5),
            is_active: active,
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();
        repo.insert(&product("p1", "Vinyl Banner", "banners", 4500, true))
            .await
            .unwrap();
        repo.insert(&product("p2", "Acrylic Plaque", "plaques", 12000, true))
            .await
            .unwrap();
        repo.insert(&product("p3", "Retired Sign", "banners", 999, false))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_list_active_filters_and_orders() {
        let db = seeded().await;

        let all = db.catalog().list_active(None, 50).await.unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Acrylic Plaque", "Vinyl Banner"]);

        let banners = db.catalog().list_active(Some("banners"), 50).await.unwrap();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].id, "p1");
        assert_eq!(banners[0].price.cents(), 4500);

        let limited = db.catalog().list_active(None, 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_get_active_hides_inactive() {
        let db = seeded().await;

        assert!(db.catalog().get_by_id("p3").await.unwrap().is_some());
        assert!(db.catalog().get_active("p3").await.unwrap().is_none());
        assert!(db.catalog().get_active("p1").await.unwrap().is_some());
        assert!(db.catalog().get_by_id("missing").await.unwrap().is_none());
        assert_eq!(db.catalog().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_unique_violation() {
        let db = seeded().await;
        let err = db
            .catalog()
            .insert(&product("p1", "Again", "banners", 1, true))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
