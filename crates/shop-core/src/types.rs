//! # Domain Types
//!
//! Entity records for the shop management store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Domain Types                           │
//! │                                                              │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐        │
//! │  │   Product    │  │   Customer   │  │   Supplier   │        │
//! │  │ ──────────── │  │ ──────────── │  │ ──────────── │        │
//! │  │ id (i64)     │  │ id (i64)     │  │ id (i64)     │        │
//! │  │ barcode (UQ) │  │ phone (UQ)   │  │ payment_terms│        │
//! │  │ stock levels │  │ loyalty pts  │  │ balances     │        │
//! │  └──────────────┘  └──────────────┘  └──────────────┘        │
//! │                                                              │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐        │
//! │  │     Sale     │──│   SaleItem   │  │   Service    │        │
//! │  │ header row   │  │ line rows    │  │ recharge /   │        │
//! │  │              │  │ (cascade)    │  │ bill payment │        │
//! │  └──────────────┘  └──────────────┘  └──────────────┘        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stored row pairs with a `New*` payload struct: the payload is what
//! callers hand to the store (validated at the boundary), the row is what
//! comes back with the surrogate id and timestamps filled in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Enums
// =============================================================================

/// The status of a sale. Stored as snake_case TEXT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Paid and finalized. Every recorded sale starts here.
    #[default]
    Completed,
    /// Awaiting payment or pickup.
    Pending,
    /// Cancelled after recording.
    Cancelled,
}

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
}

/// Kind of over-the-counter service rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Prepaid mobile credit top-up.
    MobileRecharge,
    /// Utility or telecom bill payment.
    BillPayment,
}

/// Outcome of a service transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Surrogate identifier assigned at insertion.
    pub id: i64,

    /// Display name.
    pub name: String,

    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,

    /// Selling price in cents.
    pub price_cents: i64,

    /// Acquisition cost in cents, for margin reporting.
    pub cost_cents: Option<i64>,

    /// Units on hand. Only a recorded sale decrements this.
    pub stock_quantity: i64,

    /// Threshold for the low-stock signal.
    pub min_stock_level: i64,

    /// Scannable barcode; unique across the catalog when present.
    pub barcode: Option<String>,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the acquisition cost as Money, if recorded.
    #[inline]
    pub fn cost(&self) -> Option<Money> {
        self.cost_cents.map(Money::from_cents)
    }

    /// Low stock: stock on hand has fallen to or below the configured
    /// minimum level.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }
}

/// Payload for inserting or fully updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub price_cents: i64,
    pub cost_cents: Option<i64>,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
    pub barcode: Option<String>,
    pub description: Option<String>,
}

impl NewProduct {
    /// Creates a payload with the schema defaults: zero stock, minimum
    /// stock level of 5, everything else unset.
    pub fn new(name: impl Into<String>, price_cents: i64) -> Self {
        NewProduct {
            name: name.into(),
            brand: None,
            model: None,
            category: None,
            price_cents,
            cost_cents: None,
            stock_quantity: 0,
            min_stock_level: 5,
            barcode: None,
            description: None,
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer in the loyalty roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,

    /// Unique contact number; doubles as the lookup key at the counter.
    pub phone: String,

    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,

    /// Running sum of completed purchases, in cents. Monotonically
    /// non-decreasing; only `record` on the sale repository touches it.
    pub total_purchases_cents: i64,

    /// Accrued loyalty points. Monotonically non-decreasing.
    pub loyalty_points: i64,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the purchase running sum as Money.
    #[inline]
    pub fn total_purchases(&self) -> Money {
        Money::from_cents(self.total_purchases_cents)
    }
}

/// Payload for inserting or fully updating a customer.
///
/// Deliberately excludes the purchase/loyalty counters: those move only
/// through recorded sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        NewCustomer {
            name: name.into(),
            phone: phone.into(),
            email: None,
            address: None,
            city: None,
            notes: None,
        }
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier the shop buys from. Bookkeeping only; there is no
/// purchase-order workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,

    /// Free-text terms, e.g. "net 30".
    pub payment_terms: Option<String>,

    /// Lifetime order volume in cents.
    pub total_orders_cents: i64,

    /// What the shop still owes, in cents.
    pub outstanding_balance_cents: i64,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    /// Returns the outstanding balance as Money.
    #[inline]
    pub fn outstanding_balance(&self) -> Money {
        Money::from_cents(self.outstanding_balance_cents)
    }
}

/// Payload for inserting or fully updating a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub payment_terms: Option<String>,
    pub total_orders_cents: i64,
    pub outstanding_balance_cents: i64,
    pub notes: Option<String>,
}

impl NewSupplier {
    pub fn new(name: impl Into<String>) -> Self {
        NewSupplier {
            name: name.into(),
            company: None,
            phone: None,
            email: None,
            address: None,
            payment_terms: None,
            total_orders_cents: 0,
            outstanding_balance_cents: 0,
            notes: None,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale header. Owns its [`SaleItem`] rows; deleting the header
/// cascades to them at the schema level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,

    /// Walk-in sales carry no customer.
    pub customer_id: Option<i64>,

    /// Grand total in cents, after discount and tax.
    pub total_cents: i64,

    pub discount_cents: i64,
    pub tax_cents: i64,
    pub payment_method: Option<PaymentMethod>,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Payload for recording a sale header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub customer_id: Option<i64>,
    pub total_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub payment_method: Option<PaymentMethod>,
    pub status: SaleStatus,
    pub notes: Option<String>,
}

impl NewSale {
    /// Creates a completed, undiscounted sale payload.
    pub fn new(total_cents: i64) -> Self {
        NewSale {
            customer_id: None,
            total_cents,
            discount_cents: 0,
            tax_cents: 0,
            payment_method: None,
            status: SaleStatus::Completed,
            notes: None,
        }
    }

    /// Attributes the sale to a customer, enabling loyalty accrual.
    pub fn for_customer(mut self, customer_id: i64) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// One product line within a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,

    /// Unit price in cents at the time of sale.
    pub unit_price_cents: i64,

    /// Line total in cents, as supplied by the caller.
    pub total_cents: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Payload for one line of a sale being recorded.
///
/// `total_cents` is stored as given. [`NewSaleItem::new`] fills it with
/// `quantity × unit_price_cents`; callers applying per-line adjustments may
/// overwrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_cents: i64,
}

impl NewSaleItem {
    pub fn new(product_id: i64, quantity: i64, unit_price_cents: i64) -> Self {
        NewSaleItem {
            product_id,
            quantity,
            unit_price_cents,
            total_cents: quantity * unit_price_cents,
        }
    }
}

// =============================================================================
// Service
// =============================================================================

/// A mobile-recharge or bill-payment record.
///
/// These are local bookkeeping rows; no external recharge or payment
/// network is involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Service {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub service_type: ServiceType,
    pub description: Option<String>,

    /// Amount charged to the customer, in cents.
    pub amount_cents: i64,

    /// Shop commission on the service, in cents.
    pub commission_cents: i64,

    pub status: ServiceStatus,

    /// Operator/tracking reference. Generated when the caller supplies
    /// none.
    pub reference_number: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Returns the charged amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Payload for logging a service transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewService {
    pub customer_id: Option<i64>,
    pub service_type: ServiceType,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub commission_cents: i64,
    pub status: ServiceStatus,
    pub reference_number: Option<String>,
}

impl NewService {
    pub fn new(service_type: ServiceType, amount_cents: i64) -> Self {
        NewService {
            customer_id: None,
            service_type,
            description: None,
            amount_cents,
            commission_cents: 0,
            status: ServiceStatus::Completed,
            reference_number: None,
        }
    }
}

// =============================================================================
// Reporting
// =============================================================================

/// One row of the sales report: the sale joined with the customer's name
/// and phone (both absent for walk-in sales).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleReportRow {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub total_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub payment_method: Option<PaymentMethod>,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock_rule() {
        let mut product = Product {
            id: 1,
            name: "Galaxy A16".to_string(),
            brand: None,
            model: None,
            category: None,
            price_cents: 49_900,
            cost_cents: None,
            stock_quantity: 5,
            min_stock_level: 5,
            barcode: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // At the threshold counts as low.
        assert!(product.is_low_stock());

        product.stock_quantity = 6;
        assert!(!product.is_low_stock());

        product.stock_quantity = 0;
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_new_product_defaults() {
        let payload = NewProduct::new("iPhone 15", 399_900);
        assert_eq!(payload.stock_quantity, 0);
        assert_eq!(payload.min_stock_level, 5);
        assert!(payload.barcode.is_none());
    }

    #[test]
    fn test_new_sale_item_computes_line_total() {
        let item = NewSaleItem::new(7, 3, 2_000);
        assert_eq!(item.total_cents, 6_000);
    }

    #[test]
    fn test_sale_status_default() {
        assert_eq!(SaleStatus::default(), SaleStatus::Completed);
        assert_eq!(ServiceStatus::default(), ServiceStatus::Completed);
    }
}
