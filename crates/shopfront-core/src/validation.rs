//! # Validation Module
//!
//! Checks for catalog records after they are read. Problems are logged by
//! the record store, not fatal; the cart manager refuses to sell a product
//! whose price fails [`validate_price`].
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::validate_catalog;
//! use shopfront_core::Catalog;
//!
//! assert!(validate_catalog(&Catalog::new()).is_empty());
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Catalog, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest accepted unit price, in whole major units.
///
/// Far below the decimal range, so cart totals stay exact.
pub const MAX_PRICE: i64 = 1_000_000_000;

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a unit price: zero or greater, at most [`MAX_PRICE`].
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    if price.amount() > Decimal::from(MAX_PRICE) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a single product record.
///
/// ## Rules
/// - `name` must not be blank
/// - `price` must pass [`validate_price`]
/// - `stock` must be >= 0
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_price(product.price)?;

    if product.stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// A problem found in a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    pub category: String,
    pub product_id: i64,
    pub error: ValidationError,
}

/// Validates every record in the catalog, including id uniqueness per
/// category. Returns all issues found; an empty list means the catalog is
/// clean.
pub fn validate_catalog(catalog: &Catalog) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    for category in catalog.categories() {
        let mut seen = HashSet::new();

        for product in &category.products {
            if let Err(error) = validate_product(product) {
                issues.push(CatalogIssue {
                    category: category.name.clone(),
                    product_id: product.id,
                    error,
                });
            }

            if !seen.insert(product.id) {
                issues.push(CatalogIssue {
                    category: category.name.clone(),
                    product_id: product.id,
                    error: ValidationError::Duplicate {
                        field: "id".to_string(),
                        value: product.id.to_string(),
                    },
                });
            }
        }
    }

    issues
}

// =============================================================================
// Unit Tests
// =============================================================================
