//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Cart / checkout rule violations                │
//! │  └── ValidationError  - Input and record validation failures           │
//! │                                                                         │
//! │  shopfront-store errors (separate crate)                               │
//! │  └── StoreError       - Catalog file read/write failures               │
//! │                                                                         │
//! │  shopfront-engine errors                                               │
//! │  └── EngineError      - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → Notice → UI         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every cart failure is a no-op; the error only describes what was refused
//! 3. The `Display` text of each variant is the user-facing outcome message

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Stock Shortfall
// =============================================================================

/// One line item that cannot be fulfilled at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortfall {
    /// Product name from the live catalog.
    pub name: String,
    /// Stock currently in the catalog.
    pub available: i64,
    /// Quantity held in the cart.
    pub requested: i64,
}

impl fmt::Display for StockShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Available: {}, In Cart: {})",
            self.name, self.available, self.requested
        )
    }
}

fn format_shortfalls(shortfalls: &[StockShortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout rule violations.
///
/// None of these leave partial state behind: the operation that produced
/// the error did not touch the cart or the catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested category is not in the catalog.
    #[error("Category '{0}' not found.")]
    CategoryNotFound(String),

    /// No product with this id exists in the category.
    #[error("Product not found.")]
    ProductNotFound { id: i64, category: String },

    /// The catalog product has no stock left.
    #[error("Sorry, {name} is out of stock.")]
    OutOfStock { name: String },

    /// The cart already holds every unit the catalog has.
    ///
    /// ## User Workflow
    /// ```text
    /// Catalog: "Go" stock=1
    /// Add "Go"  ──► qty 1 ✓
    /// Add "Go"  ──► qty 1 >= stock 1
    ///      │
    ///      ▼
    /// StockExceeded { name: "Go", available: 1 }
    ///      │
    ///      ▼
    /// UI shows: "Cannot add more. Only 1 left in stock."
    /// ```
    #[error("Cannot add more. Only {available} left in stock.")]
    StockExceeded { name: String, available: i64 },

    /// Checkout was requested on an empty cart.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// The confirmation hook declined the checkout.
    #[error("Checkout cancelled.")]
    CheckoutCancelled,

    /// One or more line items exceed the live stock.
    ///
    /// Checkout is all-or-nothing, so every shortfall is reported together.
    #[error("Not enough stock for:\n{}", format_shortfalls(.0))]
    InsufficientStock(Vec<StockShortfall>),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input and record validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Amount too large to price or total safely.
    #[error("{field} is out of range")]
    OutOfRange { field: String },

    /// Invalid format (e.g., unparsable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., a product id repeated within a category).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StockExceeded {
            name: "Go".to_string(),
            available: 3,
        };
        assert_eq!(err.to_string(), "Cannot add more. Only 3 left in stock.");

        let err = CoreError::CategoryNotFound("Toys".to_string());
        assert_eq!(err.to_string(), "Category 'Toys' not found.");

        let err = CoreError::OutOfStock {
            name: "Kettle".to_string(),
        };
        assert_eq!(err.to_string(), "Sorry, Kettle is out of stock.");
    }

    #[test]
    fn test_insufficient_stock_lists_every_line() {
        let err = CoreError::InsufficientStock(vec![
            StockShortfall {
                name: "Go".to_string(),
                available: 1,
                requested: 2,
            },
            StockShortfall {
                name: "Rust".to_string(),
                available: 0,
                requested: 1,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Not enough stock for:\nGo (Available: 1, In Cart: 2)\nRust (Available: 0, In Cart: 1)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "id".to_string(),
            value: "7".to_string(),
        };
        assert_eq!(err.to_string(), "id '7' already exists");

        let err = ValidationError::OutOfRange {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price is out of range");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
