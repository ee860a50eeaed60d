//! # Validation Module
//!
//! Input rules checked before a product write reaches the database.
//!
//! Only the numeric fields are constrained. Text fields are stored as given,
//! and search filters are never rejected.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Service layer (external)                                     │
//! │  └── Request decoding                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository (Rust)                                            │
//! │  └── THIS MODULE: price and stock rules                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  └── NOT NULL / type constraints                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventory_core::{Money, Product};
//! use inventory_core::validation::validate_product;
//!
//! let widget = Product::new("Acme", "A1", "000", Money::from_cents(999), 5, "Widget");
//! assert!(validate_product(&widget).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::MAX_PRICE_CENTS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a unit price. Zero is allowed (free items); the upper bound is
/// what a `DECIMAL(13,2)` column can hold, so a stored price reads back
/// unchanged.
///
/// ```rust
/// use inventory_core::Money;
/// use inventory_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(0)).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// assert!(validate_price(Money::from_cents(10_000_000_000_000)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "pricePerUnit".to_string(),
        });
    }
    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "pricePerUnit".to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS).to_decimal_string(),
        });
    }
    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_quantity_on_hand(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantityOnHand".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates the numeric fields of a product.
///
/// The identifier is not checked: inserts ignore it and updates that name
/// a missing row are a no-op.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_price(product.price_per_unit)?;
    validate_quantity_on_hand(product.quantity_on_hand)?;
    Ok(())
}
