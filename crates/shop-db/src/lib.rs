//! # shop-db: Persistence Layer
//!
//! SQLite-backed domain store for the shop management system.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Shop Manager Data Flow                  │
//! │                                                              │
//! │  UI action (record sale, search catalog, ...)                │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                 shop-db (THIS CRATE)                   │  │
//! │  │                                                        │  │
//! │  │  ┌──────────┐  ┌──────────────┐  ┌────────────────┐    │  │
//! │  │  │  Store   │  │ Repositories │  │   Migrations   │    │  │
//! │  │  │ (pool.rs)│◄─│ product.rs   │  │ 001_initial... │    │  │
//! │  │  │          │  │ sale.rs ...  │  │ 002_indexes    │    │  │
//! │  │  └──────────┘  └──────────────┘  └────────────────┘    │  │
//! │  │        │               ┌──────────────┐                │  │
//! │  │        │               │   backup.rs  │                │  │
//! │  │        │               └──────────────┘                │  │
//! │  └────────┼───────────────────────────────────────────────┘  │
//! │           ▼                                                  │
//! │  SQLite file (WAL) + timestamped backup snapshots            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store configuration, pool creation, the [`Store`] handle
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - One repository per entity family
//! - [`backup`] - Snapshot and purge of backup artifacts
//! - [`error`] - Store error taxonomy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shop_db::{Store, StoreConfig};
//! use shop_core::{NewProduct, NewSale, NewSaleItem};
//!
//! let store = Store::new(StoreConfig::new("data/shop.db")).await?;
//!
//! let product_id = store
//!     .products()
//!     .insert(&NewProduct::new("Galaxy A16", 49_900))
//!     .await?;
//!
//! let sale_id = store
//!     .sales()
//!     .record(
//!         &NewSale::new(49_900),
//!         &[NewSaleItem::new(product_id, 1, 49_900)],
//!     )
//!     .await?;
//! ```

pub mod backup;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use pool::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::service::ServiceRepository;
pub use repository::settings::SettingsRepository;
pub use repository::supplier::SupplierRepository;
