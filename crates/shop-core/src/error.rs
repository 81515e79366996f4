//! # Error Types
//!
//! Validation errors raised at the domain boundary.
//!
//! ## Error Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  shop-core (this file)                                       │
//! │  └── ValidationError  - payload rejected before the store    │
//! │                                                              │
//! │  shop-db (separate crate)                                    │
//! │  └── StoreError       - storage operation failures           │
//! │                                                              │
//! │  Flow: ValidationError → caller │ StoreError → caller        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage-layer failures never reach this crate; a payload that passes
//! validation can still be rejected by a UNIQUE constraint, and that is a
//! `StoreError`, not a `ValidationError`.

use thiserror::Error;

/// Input validation errors.
///
/// Raised before a payload reaches the store, so the caller can show a
/// field-specific message instead of a storage failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: &'static str },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
