//! # Repository Module
//!
//! Product access for the inventory service.
//!
//! ## Call Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  db.products().search(&filter)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── validate input          (inventory_core::validation)              │
//! │  ├── build SQL               (search::ProductSearch for search)        │
//! │  ├── run under a Deadline    (15s standard, 3s top/search)             │
//! │  └── keep ProductCache in step with point reads and writes             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  inventorydb.products                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD, top-N and search
//! - [`ProductSearch`](search::ProductSearch) - Filter to `WHERE` clause

pub mod product;
pub mod search;
