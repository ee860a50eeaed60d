//! # inventory-db: Product Persistence for the Inventory Service
//!
//! This crate owns everything between a caller holding a [`Product`] and the
//! `inventorydb.products` table: the connection pool, the per-call
//! deadlines, the shared product cache and the search query builder.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Inventory Data Flow                               │
//! │                                                                         │
//! │  Caller (HTTP handler, CLI, seed binary)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   inventory-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repository   │    │ ProductCache │   │   │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │  (cache.rs)  │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ SqlitePool    │◄───│ get / list    │───►│ id → Product │   │   │
//! │  │   │ ATTACH        │    │ top / search  │    │ RwLock       │   │   │
//! │  │   │ inventorydb   │    │ insert/update │    │              │   │   │
//! │  │   └───────────────┘    │ delete        │    └──────────────┘   │   │
//! │  │                        └───────┬───────┘                       │   │
//! │  │                                │ Deadline (15s / 3s)           │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                SQLite: inventorydb.products                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - Environment-driven [`DbConfig`]
//! - [`schema`] - Products table bootstrap
//! - [`deadline`] - Per-call time limits
//! - [`cache`] - Concurrent product cache
//! - [`error`] - Database error types
//! - [`repository`] - Product operations and the search builder
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventory_db::{Database, DbConfig};
//! use inventory_core::ProductFilter;
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let hits = db.products().search(&ProductFilter::new().by_name("widg")).await?;
//! ```
//!
//! [`Product`]: inventory_core::Product

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod config;
pub mod deadline;
pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::ProductCache;
pub use config::ConfigError;
pub use deadline::{Deadline, LIGHT_READ_TIMEOUT, STANDARD_TIMEOUT};
pub use error::{DbError, DbResult, ErrorKind};
pub use pool::{Database, DbConfig, INVENTORY_SCHEMA};

// Repository re-exports for convenience
pub use repository::product::{ProductRepository, TOP_PRODUCTS_LIMIT};
pub use repository::search::ProductSearch;
