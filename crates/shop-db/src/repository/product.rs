//! # Product Repository
//!
//! Catalog operations: insert, full-row update, filtered search, and the
//! low-stock report.
//!
//! ## Search
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  search("gal", "phones")                                     │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  WHERE (name LIKE %gal% OR brand LIKE %gal%                  │
//! │         OR model LIKE %gal% OR barcode LIKE %gal%)           │
//! │    AND category = 'phones'                                   │
//! │  ORDER BY name                                               │
//! │                                                              │
//! │  Either filter may be empty; empty means "no filter".        │
//! │  LIKE is case-insensitive for the ASCII range.               │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use shop_core::validation::validate_product;
use shop_core::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "id, name, brand, model, category, price_cents, cost_cents, \
     stock_quantity, min_stock_level, barcode, description, created_at, updated_at";

/// Repository for product operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns its assigned id.
    ///
    /// ## Errors
    /// * `StoreError::Validation` - malformed payload
    /// * `StoreError::UniqueViolation` - barcode already in the catalog
    pub async fn insert(&self, payload: &NewProduct) -> StoreResult<i64> {
        validate_product(payload)?;

        debug!(name = %payload.name, "inserting product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO products (
                name, brand, model, category, price_cents, cost_cents,
                stock_quantity, min_stock_level, barcode, description,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(&payload.category)
        .bind(payload.price_cents)
        .bind(payload.cost_cents)
        .bind(payload.stock_quantity)
        .bind(payload.min_stock_level)
        .bind(&payload.barcode)
        .bind(&payload.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fully updates a product row.
    ///
    /// Returns whether a row was actually affected; `false` means the id
    /// is absent, which callers report as "not found" rather than an
    /// error.
    pub async fn update(&self, id: i64, payload: &NewProduct) -> StoreResult<bool> {
        validate_product(payload)?;

        debug!(id, "updating product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2, brand = ?3, model = ?4, category = ?5,
                price_cents = ?6, cost_cents = ?7, stock_quantity = ?8,
                min_stock_level = ?9, barcode = ?10, description = ?11,
                updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(&payload.category)
        .bind(payload.price_cents)
        .bind(payload.cost_cents)
        .bind(payload.stock_quantity)
        .bind(payload.min_stock_level)
        .bind(&payload.barcode)
        .bind(&payload.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Gets a product by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Searches the catalog.
    ///
    /// `term` matches as a case-insensitive substring against name, brand,
    /// model, or barcode; `category` filters by exact match. Either filter
    /// is skipped when empty. Results are ordered by name.
    pub async fn search(&self, term: &str, category: &str) -> StoreResult<Vec<Product>> {
        let term = term.trim();
        let category = category.trim();

        debug!(term, category, "searching products");

        let mut sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1=1");
        if !term.is_empty() {
            sql.push_str(
                " AND (name LIKE ? OR brand LIKE ? OR model LIKE ? OR barcode LIKE ?)",
            );
        }
        if !category.is_empty() {
            sql.push_str(" AND category = ?");
        }
        sql.push_str(" ORDER BY name");

        let mut query = sqlx::query_as::<_, Product>(&sql);
        if !term.is_empty() {
            let pattern = format!("%{term}%");
            for _ in 0..4 {
                query = query.bind(pattern.clone());
            }
        }
        if !category.is_empty() {
            query = query.bind(category);
        }

        let products = query.fetch_all(&self.pool).await?;

        debug!(count = products.len(), "search returned products");
        Ok(products)
    }

    /// Products whose stock has fallen to or below their minimum level,
    /// most depleted first.
    pub async fn low_stock(&self) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE stock_quantity <= min_stock_level \
             ORDER BY stock_quantity ASC"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Counts catalog rows (for diagnostics and tests).
    pub async fn count(&self) -> StoreResult<i64> {
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
    use crate::error::StoreError;
    use crate::testing;

    fn phone(name: &str, category: &str, stock: i64, barcode: Option<&str>) -> NewProduct {
        let mut p = NewProduct::new(name, 49_900);
        p.category = Some(category.to_string());
        p.stock_quantity = stock;
        p.barcode = barcode.map(str::to_string);
        p
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = testing::store().await;
        let repo = store.products();

        let mut payload = phone("Galaxy A16", "phones", 10, Some("6291041500213"));
        payload.brand = Some("Samsung".to_string());

        let id = repo.insert(&payload).await.unwrap();
        let product = repo.get(id).await.unwrap().unwrap();

        assert_eq!(product.name, "Galaxy A16");
        assert_eq!(product.brand.as_deref(), Some("Samsung"));
        assert_eq!(product.stock_quantity, 10);
        assert_eq!(product.min_stock_level, 5);
    }

    #[tokio::test]
    async fn test_search_matches_name_brand_model_barcode() {
        let store = testing::store().await;
        let repo = store.products();

        let mut a = phone("Galaxy A16", "phones", 10, Some("111"));
        a.brand = Some("Samsung".to_string());
        let mut b = phone("Redmi 13", "phones", 4, Some("222"));
        b.model = Some("23124RA7EO".to_string());
        let c = phone("USB-C Cable", "accessories", 50, Some("333"));

        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();
        repo.insert(&c).await.unwrap();

        // Case-insensitive name substring.
        let hits = repo.search("galaxy", "").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Galaxy A16");

        // Brand, model, and barcode all match too.
        assert_eq!(repo.search("samsung", "").await.unwrap().len(), 1);
        assert_eq!(repo.search("23124", "").await.unwrap().len(), 1);
        assert_eq!(repo.search("333", "").await.unwrap().len(), 1);

        // Category filter is exact; both filters compose.
        assert_eq!(repo.search("", "phones").await.unwrap().len(), 2);
        assert_eq!(repo.search("redmi", "phones").await.unwrap().len(), 1);
        assert_eq!(repo.search("redmi", "accessories").await.unwrap().len(), 0);

        // Empty filters return everything, ordered by name.
        let all = repo.search("", "").await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Galaxy A16");
        assert_eq!(all[2].name, "USB-C Cable");
    }

    #[tokio::test]
    async fn test_low_stock_set_and_ordering() {
        let store = testing::store().await;
        let repo = store.products();

        // stock <= min_stock_level(5) → low
        repo.insert(&phone("Depleted", "phones", 0, None)).await.unwrap();
        repo.insert(&phone("At Threshold", "phones", 5, None)).await.unwrap();
        repo.insert(&phone("Running Low", "phones", 2, None)).await.unwrap();
        repo.insert(&phone("Healthy", "phones", 40, None)).await.unwrap();

        let low = repo.low_stock().await.unwrap();

        let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Depleted", "Running Low", "At Threshold"]);
        assert!(low.iter().all(|p| p.is_low_stock()));
    }

    #[tokio::test]
    async fn test_duplicate_barcode_rejected_without_side_effects() {
        let store = testing::store().await;
        let repo = store.products();

        repo.insert(&phone("Original", "phones", 10, Some("6291041500213")))
            .await
            .unwrap();
        let before = repo.count().await.unwrap();

        let err = repo
            .insert(&phone("Impostor", "phones", 10, Some("6291041500213")))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(repo.count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_reports_missing_row() {
        let store = testing::store().await;
        let repo = store.products();

        let id = repo.insert(&phone("Galaxy A16", "phones", 10, None)).await.unwrap();

        let mut changed = phone("Galaxy A16 128GB", "phones", 8, None);
        changed.price_cents = 52_900;

        assert!(repo.update(id, &changed).await.unwrap());
        let product = repo.get(id).await.unwrap().unwrap();
        assert_eq!(product.name, "Galaxy A16 128GB");
        assert_eq!(product.price_cents, 52_900);

        // Absent id affects no rows.
        assert!(!repo.update(9999, &changed).await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_rejects_malformed_payload() {
        let store = testing::store().await;

        let err = store
            .products()
            .insert(&NewProduct::new("", 1_000))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
    }
}
