//! # Domain Types
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │       Product        │        │    ProductFilter     │              │
//! │  │  ──────────────────  │        │  ──────────────────  │              │
//! │  │  product_id (i64)    │        │  name_filter         │              │
//! │  │  manufacturer        │        │  manufacturer_filter │              │
//! │  │  sku / upc           │        │  sku_filter          │              │
//! │  │  price_per_unit      │        │  ("" = not given)    │              │
//! │  │  quantity_on_hand    │        └──────────────────────┘              │
//! │  │  product_name        │                                              │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `product_id` is the only identity. It is assigned by the database on
//! insert and never changes; every other field may be overwritten by an
//! update.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// An inventory item as stored in `inventorydb.products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier. Zero on a product that was never inserted.
    #[serde(rename = "productId")]
    pub product_id: i64,

    pub manufacturer: String,

    /// Stock Keeping Unit.
    pub sku: String,

    /// Universal Product Code.
    pub upc: String,

    /// Unit price, non-negative.
    pub price_per_unit: Money,

    /// Units in stock, non-negative.
    pub quantity_on_hand: i64,

    pub product_name: String,
}

impl Product {
    /// Creates a product that has not been inserted yet (`product_id == 0`).
    pub fn new(
        manufacturer: impl Into<String>,
        sku: impl Into<String>,
        upc: impl Into<String>,
        price_per_unit: Money,
        quantity_on_hand: i64,
        product_name: impl Into<String>,
    ) -> Self {
        Product {
            product_id: 0,
            manufacturer: manufacturer.into(),
            sku: sku.into(),
            upc: upc.into(),
            price_per_unit,
            quantity_on_hand,
            product_name: product_name.into(),
        }
    }

    /// Returns a copy carrying the given identifier.
    pub fn with_id(mut self, product_id: i64) -> Self {
        self.product_id = product_id;
        self
    }
}

/// Row mapping for the fixed projection
/// `productId, manufacturer, sku, upc, pricePerUnit, quantityOnHand, productName`.
///
/// Columns are read by position so the search projection, which wraps some
/// columns in `LOWER(...)`, scans the same way as a plain `SELECT`.
#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for Product {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        // DECIMAL columns come back as REAL or INTEGER depending on the value,
        // so the price is decoded without the strict type check.
        let price: f64 = row.try_get_unchecked(4)?;

        Ok(Product {
            product_id: row.try_get(0)?,
            manufacturer: row.try_get(1)?,
            sku: row.try_get(2)?,
            upc: row.try_get(3)?,
            price_per_unit: Money::from_decimal(price),
            quantity_on_hand: row.try_get(5)?,
            product_name: row.try_get(6)?,
        })
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// Optional substring predicates for product search.
///
/// An empty field means "not specified". Any other value, whitespace
/// included, is matched as given. When every field is empty the search is
/// unconstrained and matches all products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub name_filter: String,
    pub manufacturer_filter: String,
    pub sku_filter: String,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_name(mut self, fragment: impl Into<String>) -> Self {
        self.name_filter = fragment.into();
        self
    }

    pub fn by_manufacturer(mut self, fragment: impl Into<String>) -> Self {
        self.manufacturer_filter = fragment.into();
        self
    }

    pub fn by_sku(mut self, fragment: impl Into<String>) -> Self {
        self.sku_filter = fragment.into();
        self
    }

    /// True when no field carries a fragment.
    pub fn is_empty(&self) -> bool {
        self.name_filter.is_empty()
            && self.manufacturer_filter.is_empty()
            && self.sku_filter.is_empty()
    }
}
