//! # Supplier Repository
//!
//! Supplier bookkeeping, CRUD only. There is no purchase-order workflow;
//! the order-volume and outstanding-balance columns are edited as part of
//! the full-row update.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use shop_core::validation::validate_supplier;
use shop_core::{NewSupplier, Supplier};

const SUPPLIER_COLUMNS: &str = "id, name, company, phone, email, address, payment_terms, \
     total_orders_cents, outstanding_balance_cents, notes, created_at, updated_at";

/// Repository for supplier operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Inserts a new supplier and returns its assigned id.
    pub async fn insert(&self, payload: &NewSupplier) -> StoreResult<i64> {
        validate_supplier(payload)?;

        debug!(name = %payload.name, "inserting supplier");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (
                name, company, phone, email, address, payment_terms,
                total_orders_cents, outstanding_balance_cents, notes,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.company)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.address)
        .bind(&payload.payment_terms)
        .bind(payload.total_orders_cents)
        .bind(payload.outstanding_balance_cents)
        .bind(&payload.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fully updates a supplier row. Returns whether a row was affected.
    pub async fn update(&self, id: i64, payload: &NewSupplier) -> StoreResult<bool> {
        validate_supplier(payload)?;

        debug!(id, "updating supplier");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                name = ?2, company = ?3, phone = ?4, email = ?5, address = ?6,
                payment_terms = ?7, total_orders_cents = ?8,
                outstanding_balance_cents = ?9, notes = ?10, updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.company)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.address)
        .bind(&payload.payment_terms)
        .bind(payload.total_orders_cents)
        .bind(payload.outstanding_balance_cents)
        .bind(&payload.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Gets a supplier by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1");
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    /// Lists suppliers, optionally filtered by a name/company/phone
    /// substring. Ordered by name.
    pub async fn list(&self, term: &str) -> StoreResult<Vec<Supplier>> {
        let term = term.trim();

        let suppliers = if term.is_empty() {
            let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY name");
            sqlx::query_as::<_, Supplier>(&sql).fetch_all(&self.pool).await?
        } else {
            let sql = format!(
                "SELECT {SUPPLIER_COLUMNS} FROM suppliers \
                 WHERE name LIKE ?1 OR company LIKE ?1 OR phone LIKE ?1 \
                 ORDER BY name"
            );
            sqlx::query_as::<_, Supplier>(&sql)
                .bind(format!("%{term}%"))
                .fetch_all(&self.pool)
                .await?
        };

        Ok(suppliers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
