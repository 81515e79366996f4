//! # shop-core: Pure Domain Logic
//!
//! Domain types and rules for the shop management system, as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   Shop Manager Architecture                  │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            Front-ends (out of this workspace)          │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │                              │                               │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │              ★ shop-core (THIS CRATE) ★                │  │
//! │  │                                                        │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌──────────┐   │  │
//! │  │  │  types  │ │  money  │ │ validation │ │  error   │   │  │
//! │  │  │ Product │ │  Money  │ │  payload   │ │Validation│   │  │
//! │  │  │ Sale .. │ │ loyalty │ │  checks    │ │  Error   │   │  │
//! │  │  └─────────┘ └─────────┘ └────────────┘ └──────────┘   │  │
//! │  │                                                        │  │
//! │  │  NO I/O • NO DATABASE • PURE FUNCTIONS                 │  │
//! │  └───────────────────────────┬────────────────────────────┘  │
//! │                              │                               │
//! │  ┌───────────────────────────▼────────────────────────────┐  │
//! │  │              shop-db (persistence layer)               │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity records and insert payloads
//! - [`money`] - Integer-cents Money and the loyalty rule
//! - [`validation`] - Payload validation at the boundary
//! - [`error`] - Validation error types
//!
//! ## Design Principles
//!
//! 1. **Integer money**: every monetary value is cents (i64), never a float
//! 2. **Typed payloads**: callers pass record structs, not key-value maps
//! 3. **Explicit errors**: typed enums, never strings or panics

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{ValidationError, ValidationResult};
pub use money::{loyalty_points_for, Money};
pub use types::*;

/// Maximum length accepted for entity names.
///
/// Keeps pathological input out of the store; real product and contact
/// names are far shorter.
pub const MAX_NAME_LEN: usize = 200;
