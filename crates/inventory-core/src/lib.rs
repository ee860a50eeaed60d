//! # inventory-core: Pure Domain Types for the Inventory Store
//!
//! This crate holds the product record, the search filter and the money type
//! as plain data with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventory Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Service layer (HTTP / RPC, external)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ inventory-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │Validation │  │   rules   │  │   │
//! │  │   │  Filter   │  │           │  │   Error   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                inventory-db (Database Layer)                    │   │
//! │  │          Repository, product cache, search predicates           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product record and search filter
//! - [`money`] - Fixed-point money in integer cents
//! - [`error`] - Validation error type
//! - [`validation`] - Input rules checked before any write
//!
//! ## Example Usage
//!
//! ```rust
//! use inventory_core::{Money, Product};
//!
//! let widget = Product::new("Acme", "A1", "000", Money::from_cents(999), 5, "Widget");
//! assert_eq!(widget.product_id, 0); // assigned by the database on insert
//! assert_eq!(widget.price_per_unit.to_decimal_string(), "9.99");
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

/// Largest price a `DECIMAL(13,2)` column holds, in cents (99,999,999,999.99).
pub const MAX_PRICE_CENTS: i64 = 9_999_999_999_999;
