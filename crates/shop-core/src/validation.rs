//! # Validation Module
//!
//! Payload validation run before anything reaches the store.
//!
//! ## Validation Layers
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Layer 1: Caller (forms, scripts)                            │
//! │  └── immediate feedback, not trusted                         │
//! │           │                                                  │
//! │           ▼                                                  │
//! │  Layer 2: THIS MODULE                                        │
//! │  └── required fields, sign checks, length limits             │
//! │           │                                                  │
//! │           ▼                                                  │
//! │  Layer 3: SQLite                                             │
//! │  └── NOT NULL / UNIQUE / FOREIGN KEY constraints             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Uniqueness is deliberately NOT checked here: a pre-check would race
//! with concurrent inserts, so duplicate barcodes and phones surface from
//! the store as a uniqueness-violation error instead.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{NewCustomer, NewProduct, NewSale, NewSaleItem, NewService, NewSupplier};
use crate::MAX_NAME_LEN;

/// Validates a product payload.
///
/// ## Rules
/// - name required, at most [`MAX_NAME_LEN`] characters
/// - price non-negative; cost non-negative when present
/// - stock_quantity and min_stock_level non-negative
pub fn validate_product(payload: &NewProduct) -> ValidationResult<()> {
    validate_name("name", &payload.name)?;

    if payload.price_cents < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "price" });
    }
    if matches!(payload.cost_cents, Some(c) if c < 0) {
        return Err(ValidationError::MustNotBeNegative { field: "cost" });
    }
    if payload.stock_quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock_quantity",
        });
    }
    if payload.min_stock_level < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "min_stock_level",
        });
    }

    Ok(())
}

/// Validates a customer payload.
///
/// ## Rules
/// - name required
/// - phone required (it is the unique lookup key)
pub fn validate_customer(payload: &NewCustomer) -> ValidationResult<()> {
    validate_name("name", &payload.name)?;

    if payload.phone.trim().is_empty() {
        return Err(ValidationError::Required { field: "phone" });
    }

    Ok(())
}

/// Validates a supplier payload. Only the name is mandatory.
pub fn validate_supplier(payload: &NewSupplier) -> ValidationResult<()> {
    validate_name("name", &payload.name)
}

/// Validates a sale header and its line items.
///
/// ## Rules
/// - at least one line item
/// - total, discount, and tax non-negative
/// - every line quantity strictly positive, unit price non-negative
///
/// Stock sufficiency is NOT checked; the store decrements whatever the
/// lines say (see the sale repository).
pub fn validate_sale(sale: &NewSale, items: &[NewSaleItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required { field: "items" });
    }

    if sale.total_cents < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "total" });
    }
    if sale.discount_cents < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "discount" });
    }
    if sale.tax_cents < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "tax" });
    }

    for item in items {
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive { field: "quantity" });
        }
        if item.unit_price_cents < 0 {
            return Err(ValidationError::MustNotBeNegative { field: "unit_price" });
        }
    }

    Ok(())
}

/// Validates a service payload.
pub fn validate_service(payload: &NewService) -> ValidationResult<()> {
    if payload.amount_cents < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "amount" });
    }
    if payload.commission_cents < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "commission" });
    }

    Ok(())
}

fn validate_name(field: &'static str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
