//! # Customer Repository
//!
//! Roster operations. The loyalty counters (`total_purchases_cents`,
//! `loyalty_points`) are read-only here: only a recorded sale moves them,
//! atomically with the sale itself (see the sale repository).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use shop_core::validation::validate_customer;
use shop_core::{Customer, NewCustomer};

const CUSTOMER_COLUMNS: &str = "id, name, phone, email, address, city, \
     total_purchases_cents, loyalty_points, notes, created_at, updated_at";

/// Repository for customer operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer and returns its assigned id. Counters start
    /// at zero.
    ///
    /// ## Errors
    /// * `StoreError::Validation` - missing name or phone
    /// * `StoreError::UniqueViolation` - phone already registered
    pub async fn insert(&self, payload: &NewCustomer) -> StoreResult<i64> {
        validate_customer(payload)?;

        debug!(name = %payload.name, "inserting customer");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO customers (
                name, phone, email, address, city, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.address)
        .bind(&payload.city)
        .bind(&payload.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fully updates a customer's contact details. The loyalty counters
    /// are left untouched.
    ///
    /// Returns whether a row was actually affected.
    pub async fn update(&self, id: i64, payload: &NewCustomer) -> StoreResult<bool> {
        validate_customer(payload)?;

        debug!(id, "updating customer");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2, phone = ?3, email = ?4, address = ?5, city = ?6,
                notes = ?7, updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.address)
        .bind(&payload.city)
        .bind(&payload.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Gets a customer by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Searches the roster by name, phone, or email substring; empty term
    /// returns everyone. Ordered by name.
    pub async fn search(&self, term: &str) -> StoreResult<Vec<Customer>> {
        let term = term.trim();

        debug!(term, "searching customers");

        let customers = if term.is_empty() {
            let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY name");
            sqlx::query_as::<_, Customer>(&sql).fetch_all(&self.pool).await?
        } else {
            let sql = format!(
                "SELECT {CUSTOMER_COLUMNS} FROM customers \
                 WHERE name LIKE ?1 OR phone LIKE ?1 OR email LIKE ?1 \
                 ORDER BY name"
            );
            sqlx::query_as::<_, Customer>(&sql)
                .bind(format!("%{term}%"))
                .fetch_all(&self.pool)
                .await?
        };

        Ok(customers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn test_insert_starts_counters_at_zero() {
        let store = testing::store().await;
        let repo = store.customers();

        let id = repo
            .insert(&NewCustomer::new("Ahmed Ali", "0551234567"))
            .await
            .unwrap();
        let customer = repo.get(id).await.unwrap().unwrap();

        assert_eq!(customer.total_purchases_cents, 0);
        assert_eq!(customer.loyalty_points, 0);
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() {
        let store = testing::store().await;
        let repo = store.customers();

        repo.insert(&NewCustomer::new("Ahmed Ali", "0551234567"))
            .await
            .unwrap();
        let err = repo
            .insert(&NewCustomer::new("Someone Else", "0551234567"))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_search_by_name_phone_email() {
        let store = testing::store().await;
        let repo = store.customers();

        let mut a = NewCustomer::new("Ahmed Ali", "0551234567");
        a.email = Some("ahmed@example.com".to_string());
        let b = NewCustomer::new("Sara Hassan", "0567654321");

        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        assert_eq!(repo.search("ahmed").await.unwrap().len(), 1);
        assert_eq!(repo.search("0567").await.unwrap().len(), 1);
        assert_eq!(repo.search("example.com").await.unwrap().len(), 1);
        assert_eq!(repo.search("nobody").await.unwrap().len(), 0);

        // Empty search lists everyone by name.
        let all = repo.search("").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Ahmed Ali");
    }

    #[tokio::test]
    async fn test_update_preserves_counters() {
        let store = testing::store().await;
        let repo = store.customers();

        let id = repo
            .insert(&NewCustomer::new("Ahmed Ali", "0551234567"))
            .await
            .unwrap();

        // Give the customer some history directly.
        sqlx::query(
            "UPDATE customers SET total_purchases_cents = 50000, loyalty_points = 50 WHERE id = ?1",
        )
        .bind(id)
        .execute(store.pool())
        .await
        .unwrap();

        let mut changed = NewCustomer::new("Ahmed A. Ali", "0551234567");
        changed.city = Some("Jeddah".to_string());
        assert!(repo.update(id, &changed).await.unwrap());

        let customer = repo.get(id).await.unwrap().unwrap();
        assert_eq!(customer.name, "Ahmed A. Ali");
        assert_eq!(customer.city.as_deref(), Some("Jeddah"));
        assert_eq!(customer.total_purchases_cents, 50_000);
        assert_eq!(customer.loyalty_points, 50);

        assert!(!repo.update(9999, &changed).await.unwrap());
    }
}
