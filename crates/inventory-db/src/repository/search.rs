//! # Product Search Predicate
//!
//! Turns a [`ProductFilter`] into a parameterized `WHERE` clause.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  filter                                  WHERE clause / binds           │
//! │  ──────────────────────────────────────  ───────────────────────────    │
//! │  {}                                      1=1                            │
//! │  {name: "Widg"}                          LOWER(productName) LIKE ?      │
//! │                                          ["%widg%"]                     │
//! │  {name: "w", sku: "A1"}                  LOWER(productName) LIKE ?      │
//! │                                          AND LOWER(sku) LIKE ?          │
//! │                                          ["%w%", "%a1%"]                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clauses always appear in the order name, manufacturer, sku. A fragment is
//! left out only when it is the empty string; anything else, whitespace
//! included, is lower-cased and bound as `%fragment%`. `AND` only joins
//! clauses that are present, and an empty filter yields the constant `1=1`
//! so the statement never ends in a bare `WHERE`.

use inventory_core::ProductFilter;
use sqlx::{QueryBuilder, Sqlite};

/// Projection used by search. Text columns are lower-cased in the result.
pub const SEARCH_SELECT: &str = "SELECT productId, LOWER(manufacturer), LOWER(sku), upc, \
     pricePerUnit, quantityOnHand, LOWER(productName) FROM inventorydb.products";

const ALWAYS_TRUE: &str = "1=1";

/// One `LOWER(column) LIKE ?` clause and the value bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    column: &'static str,
    pattern: String,
}

/// Accumulated search predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearch {
    clauses: Vec<Clause>,
}

impl ProductSearch {
    pub fn from_filter(filter: &ProductFilter) -> Self {
        let mut search = ProductSearch::default();
        search.push("productName", &filter.name_filter);
        search.push("manufacturer", &filter.manufacturer_filter);
        search.push("sku", &filter.sku_filter);
        search
    }

    fn push(&mut self, column: &'static str, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.clauses.push(Clause {
            column,
            pattern: format!("%{}%", fragment.to_lowercase()),
        });
    }

    /// True when no filter was supplied.
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The predicate text with `?` placeholders.
    pub fn predicate(&self) -> String {
        if self.clauses.is_empty() {
            return ALWAYS_TRUE.to_string();
        }
        self.clauses
            .iter()
            .map(|c| format!("LOWER({}) LIKE ?", c.column))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Values bound to the placeholders, in order.
    pub fn bind_values(&self) -> Vec<&str> {
        self.clauses.iter().map(|c| c.pattern.as_str()).collect()
    }

    /// Full statement ready to execute.
    pub fn to_query(&self) -> QueryBuilder<'_, Sqlite> {
        let mut query = QueryBuilder::new(SEARCH_SELECT);
        query.push(" WHERE ");

        if self.clauses.is_empty() {
            query.push(ALWAYS_TRUE);
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                query.push(" AND ");
            }
            query.push(format_args!("LOWER({}) LIKE ", clause.column));
            query.push_bind(clause.pattern.as_str());
        }
        query
    }
}
