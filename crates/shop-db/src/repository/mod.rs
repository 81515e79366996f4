//! # Repository Module
//!
//! One repository per entity family, each a thin struct over a clone of
//! the shared pool.
//!
//! ## Repository Pattern
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Caller                                                      │
//! │    │   store.products().search("galaxy", "")                 │
//! │    ▼                                                         │
//! │  ProductRepository                                           │
//! │    ├── insert / update / get                                 │
//! │    ├── search(term, category)                                │
//! │    └── low_stock()                                           │
//! │    │                                                         │
//! │    ▼   parameterized SQL                                     │
//! │  SQLite store                                                │
//! │                                                              │
//! │  SQL stays in this module; callers see typed records and     │
//! │  typed errors only.                                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - catalog CRUD, search, low-stock
//! - [`customer::CustomerRepository`] - roster CRUD and search
//! - [`supplier::SupplierRepository`] - supplier bookkeeping
//! - [`sale::SaleRepository`] - the sale transaction and the report
//! - [`service::ServiceRepository`] - recharge / bill-payment records
//! - [`settings::SettingsRepository`] - key-value settings

pub mod customer;
pub mod product;
pub mod sale;
pub mod service;
pub mod settings;
pub mod supplier;
