//! # Sale Repository
//!
//! Sale recording and the sales report.
//!
//! ## The Sale Transaction
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  record(sale, items)            ── ONE transaction ──        │
//! │                                                              │
//! │  1. INSERT sale header                                       │
//! │  2. per item:                                                │
//! │       INSERT sale_items row                                  │
//! │       UPDATE products SET stock_quantity -= item.quantity    │
//! │  3. if sale.customer_id:                                     │
//! │       UPDATE customers                                       │
//! │         total_purchases_cents += sale.total_cents            │
//! │         loyalty_points        += total / 10 units            │
//! │  4. COMMIT                                                   │
//! │                                                              │
//! │  Any failure mid-sequence rolls everything back: no header   │
//! │  without items, no stock decrement without its line row, no  │
//! │  loyalty accrual without the sale.                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock sufficiency is deliberately NOT checked before decrementing;
//! an oversold product goes negative, and the low-stock report is the
//! signal. Callers wanting a guard must check stock themselves first.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use shop_core::validation::validate_sale;
use shop_core::{loyalty_points_for, Money, NewSale, NewSaleItem, Sale, SaleItem, SaleReportRow};

const SALE_COLUMNS: &str = "id, customer_id, total_cents, discount_cents, tax_cents, \
     payment_method, status, notes, created_at";

/// Repository for sale operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale with its line items as a single atomic unit and
    /// returns the new sale id.
    ///
    /// See the module docs for the statement sequence. A missing product
    /// or customer id fails the foreign key check and rolls the whole
    /// sale back.
    ///
    /// ## Errors
    /// * `StoreError::Validation` - empty item list, negative amounts,
    ///   non-positive quantity
    /// * `StoreError::ForeignKeyViolation` - unknown product or customer
    pub async fn record(&self, sale: &NewSale, items: &[NewSaleItem]) -> StoreResult<i64> {
        validate_sale(sale, items)?;

        debug!(
            customer_id = ?sale.customer_id,
            total_cents = sale.total_cents,
            items = items.len(),
            "recording sale"
        );

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (
                customer_id, total_cents, discount_cents, tax_cents,
                payment_method, status, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(sale.customer_id)
        .bind(sale.total_cents)
        .bind(sale.discount_cents)
        .bind(sale.tax_cents)
        .bind(sale.payment_method)
        .bind(sale.status)
        .bind(&sale.notes)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let sale_id = result.last_insert_rowid();

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    sale_id, product_id, quantity, unit_price_cents, total_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.total_cents)
            .execute(&mut *tx)
            .await?;

            // Delta update: the decrement commits or rolls back with its
            // line row.
            sqlx::query(
                r#"
                UPDATE products
                SET stock_quantity = stock_quantity - ?1, updated_at = ?2
                WHERE id = ?3
                "#,
            )
            .bind(item.quantity)
            .bind(now)
            .bind(item.product_id)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(customer_id) = sale.customer_id {
            let points = loyalty_points_for(Money::from_cents(sale.total_cents));

            sqlx::query(
                r#"
                UPDATE customers
                SET total_purchases_cents = total_purchases_cents + ?1,
                    loyalty_points = loyalty_points + ?2,
                    updated_at = ?3
                WHERE id = ?4
                "#,
            )
            .bind(sale.total_cents)
            .bind(points)
            .bind(now)
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(sale_id, "sale recorded");
        Ok(sale_id)
    }

    /// Gets a sale header by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Sale>> {
        let sql = format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1");
        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Gets the line items of a sale, in insertion order.
    pub async fn items(&self, sale_id: i64) -> StoreResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, total_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Sales report: headers joined with the customer's name and phone,
    /// newest first, optionally bounded by an inclusive calendar-date
    /// range on the sale's creation date.
    pub async fn report(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> StoreResult<Vec<SaleReportRow>> {
        debug!(?start_date, ?end_date, "building sales report");

        let mut sql = String::from(
            "SELECT s.id, s.customer_id, s.total_cents, s.discount_cents, s.tax_cents, \
                    s.payment_method, s.status, s.notes, s.created_at, \
                    c.name AS customer_name, c.phone AS customer_phone \
             FROM sales s \
             LEFT JOIN customers c ON s.customer_id = c.id \
             WHERE 1=1",
        );
        if start_date.is_some() {
            sql.push_str(" AND DATE(s.created_at) >= DATE(?)");
        }
        if end_date.is_some() {
            sql.push_str(" AND DATE(s.created_at) <= DATE(?)");
        }
        sql.push_str(" ORDER BY s.created_at DESC");

        let mut query = sqlx::query_as::<_, SaleReportRow>(&sql);
        if let Some(start) = start_date {
            query = query.bind(start);
        }
        if let Some(end) = end_date {
            query = query.bind(end);
        }

        let rows = query.fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "report rows");
        Ok(rows)
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
    use chrono::TimeZone;
    use shop_core::{NewCustomer, NewProduct};

    async fn seed_product(store: &crate::Store, name: &str, stock: i64) -> i64 {
        let mut payload = NewProduct::new(name, 2_000);
        payload.stock_quantity = stock;
        store.products().insert(&payload).await.unwrap()
    }

    async fn seed_customer(store: &crate::Store, phone: &str) -> i64 {
        store
            .customers()
            .insert(&NewCustomer::new("Ahmed Ali", phone))
            .await
            .unwrap()
    }

    /// Seeded scenario: one product (stock 10, min 5), one customer, one
    /// sale of 3 units for a 100.00 total.
    #[tokio::test]
    async fn test_recorded_sale_moves_stock_and_loyalty() {
        let store = testing::store().await;

        let product_id = seed_product(&store, "Galaxy A16", 10).await;
        let customer_id = seed_customer(&store, "0551234567").await;

        let sale = NewSale::new(10_000).for_customer(customer_id);
        let items = vec![NewSaleItem::new(product_id, 3, 2_000)];

        let sale_id = store.sales().record(&sale, &items).await.unwrap();

        let product = store.products().get(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, 7);

        let customer = store.customers().get(customer_id).await.unwrap().unwrap();
        assert_eq!(customer.total_purchases_cents, 10_000);
        assert_eq!(customer.loyalty_points, 10);

        let header = store.sales().get(sale_id).await.unwrap().unwrap();
        assert_eq!(header.total_cents, 10_000);
        assert_eq!(header.customer_id, Some(customer_id));

        let lines = store.sales().items(sale_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].total_cents, 6_000);
    }

    #[tokio::test]
    async fn test_each_line_decrements_its_own_product() {
        let store = testing::store().await;

        let a = seed_product(&store, "Galaxy A16", 10).await;
        let b = seed_product(&store, "Redmi 13", 20).await;

        let items = vec![NewSaleItem::new(a, 4, 2_000), NewSaleItem::new(b, 9, 2_000)];
        store
            .sales()
            .record(&NewSale::new(26_000), &items)
            .await
            .unwrap();

        assert_eq!(
            store.products().get(a).await.unwrap().unwrap().stock_quantity,
            6
        );
        assert_eq!(
            store.products().get(b).await.unwrap().unwrap().stock_quantity,
            11
        );
    }

    #[tokio::test]
    async fn test_walk_in_sale_touches_no_customer() {
        let store = testing::store().await;

        let product_id = seed_product(&store, "Galaxy A16", 10).await;
        let customer_id = seed_customer(&store, "0551234567").await;

        // No customer on the sale: counters must stay put.
        let items = vec![NewSaleItem::new(product_id, 1, 2_000)];
        store
            .sales()
            .record(&NewSale::new(2_000), &items)
            .await
            .unwrap();

        let customer = store.customers().get(customer_id).await.unwrap().unwrap();
        assert_eq!(customer.total_purchases_cents, 0);
        assert_eq!(customer.loyalty_points, 0);
    }

    #[tokio::test]
    async fn test_oversell_goes_negative() {
        let store = testing::store().await;

        let product_id = seed_product(&store, "Galaxy A16", 2).await;

        let items = vec![NewSaleItem::new(product_id, 5, 2_000)];
        store
            .sales()
            .record(&NewSale::new(10_000), &items)
            .await
            .unwrap();

        // Preserved behavior: no sufficiency check, stock goes negative.
        let product = store.products().get(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, -3);
    }

    /// Fault injection: the second line references a product that does
    /// not exist, so the foreign key check fails mid-batch. Nothing from
    /// the sale may survive.
    #[tokio::test]
    async fn test_failed_sale_leaves_no_partial_rows() {
        let store = testing::store().await;

        let product_id = seed_product(&store, "Galaxy A16", 10).await;
        let customer_id = seed_customer(&store, "0551234567").await;

        let sale = NewSale::new(10_000).for_customer(customer_id);
        let items = vec![
            NewSaleItem::new(product_id, 3, 2_000),
            NewSaleItem::new(9999, 1, 4_000),
        ];

        let err = store.sales().record(&sale, &items).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));

        // No header, no items.
        let headers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(store.pool())
            .await
            .unwrap();
        let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(headers, 0);
        assert_eq!(lines, 0);

        // No stock decrement for the first line, no customer accrual.
        let product = store.products().get(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, 10);

        let customer = store.customers().get(customer_id).await.unwrap().unwrap();
        assert_eq!(customer.total_purchases_cents, 0);
        assert_eq!(customer.loyalty_points, 0);
    }

    #[tokio::test]
    async fn test_report_joins_customer_and_filters_dates() {
        let store = testing::store().await;

        let product_id = seed_product(&store, "Galaxy A16", 100).await;
        let customer_id = seed_customer(&store, "0551234567").await;

        let mut sale_ids = Vec::new();
        for _ in 0..3 {
            let sale = NewSale::new(2_000).for_customer(customer_id);
            let items = vec![NewSaleItem::new(product_id, 1, 2_000)];
            sale_ids.push(store.sales().record(&sale, &items).await.unwrap());
        }

        // Backdate the three sales to distinct days.
        let days = [
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
        ];
        for (sale_id, day) in sale_ids.iter().zip(days) {
            sqlx::query("UPDATE sales SET created_at = ?1 WHERE id = ?2")
                .bind(day)
                .bind(*sale_id)
                .execute(store.pool())
                .await
                .unwrap();
        }

        // Inclusive January window: exactly the first two, newest first.
        let january = store
            .sales()
            .report(
                NaiveDate::from_ymd_opt(2024, 1, 1),
                NaiveDate::from_ymd_opt(2024, 1, 31),
            )
            .await
            .unwrap();

        assert_eq!(january.len(), 2);
        assert_eq!(january[0].id, sale_ids[1]);
        assert_eq!(january[1].id, sale_ids[0]);
        assert_eq!(january[0].customer_name.as_deref(), Some("Ahmed Ali"));
        assert_eq!(january[0].customer_phone.as_deref(), Some("0551234567"));

        // Unbounded report returns everything.
        assert_eq!(store.sales().report(None, None).await.unwrap().len(), 3);

        // Open-ended lower bound.
        let from_feb = store
            .sales()
            .report(NaiveDate::from_ymd_opt(2024, 2, 1), None)
            .await
            .unwrap();
        assert_eq!(from_feb.len(), 1);
        assert_eq!(from_feb[0].id, sale_ids[2]);
    }

    #[tokio::test]
    async fn test_empty_item_list_rejected() {
        let store = testing::store().await;

        let err = store
            .sales()
            .record(&NewSale::new(1_000), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
    }
}
