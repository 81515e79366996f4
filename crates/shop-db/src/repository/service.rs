//! # Service Repository
//!
//! Mobile-recharge and bill-payment bookkeeping. These rows record what
//! happened at the counter; no recharge or payment network is contacted.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreResult;
use shop_core::validation::validate_service;
use shop_core::{NewService, Service, ServiceType};

const SERVICE_COLUMNS: &str = "id, customer_id, service_type, description, amount_cents, \
     commission_cents, status, reference_number, created_at";

/// Repository for service operations.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ServiceRepository { pool }
    }

    /// Logs a service transaction and returns its assigned id.
    ///
    /// A reference number is generated when the caller supplies none, so
    /// every row can be quoted back to the customer.
    pub async fn insert(&self, payload: &NewService) -> StoreResult<i64> {
        validate_service(payload)?;

        let reference = payload
            .reference_number
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        debug!(service_type = ?payload.service_type, reference = %reference, "logging service");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO services (
                customer_id, service_type, description, amount_cents,
                commission_cents, status, reference_number, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(payload.customer_id)
        .bind(payload.service_type)
        .bind(&payload.description)
        .bind(payload.amount_cents)
        .bind(payload.commission_cents)
        .bind(payload.status)
        .bind(reference)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Gets a service record by id.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Service>> {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?1");
        let service = sqlx::query_as::<_, Service>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    /// Service history, newest first, optionally bounded by an inclusive
    /// calendar-date range and/or filtered to one service type.
    pub async fn history(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        service_type: Option<ServiceType>,
    ) -> StoreResult<Vec<Service>> {
        debug!(?start_date, ?end_date, ?service_type, "loading service history");

        let mut sql = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE 1=1");
        if start_date.is_some() {
            sql.push_str(" AND DATE(created_at) >= DATE(?)");
        }
        if end_date.is_some() {
            sql.push_str(" AND DATE(created_at) <= DATE(?)");
        }
        if service_type.is_some() {
            sql.push_str(" AND service_type = ?");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, Service>(&sql);
        if let Some(start) = start_date {
            query = query.bind(start);
        }
        if let Some(end) = end_date {
            query = query.bind(end);
        }
        if let Some(kind) = service_type {
            query = query.bind(kind);
        }

        let services = query.fetch_all(&self.pool).await?;
        Ok(services)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
