//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! Catalog types, the cart model and the ordering algorithms, as pure code
//! with zero I/O dependencies.
//!
//! Sits under `shopfront-engine` and is shared with `shopfront-store`.
//!
//! ## Modules
//!
//! - [`types`] - Product, Catalog, SortDirection
//! - [`money`] - Money type with exact decimal arithmetic (no floating point!)
//! - [`cart`] - Cart and CartItem with an incrementally kept total
//! - [`ordering`] - Stable merge sort and exact-match binary search
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog record checks
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{sort_products, Money, Product, SortDirection, SortKey};
//!
//! let products = vec![
//!     Product::new(1, "Kettle", Money::from_cents(2999), "Brew", 2022, 3),
//!     Product::new(2, "Toaster", Money::from_cents(1999), "Brew", 2021, 0),
//! ];
//!
//! let cheapest_first = sort_products(&products, SortKey::Price, SortDirection::Ascending);
//! assert_eq!(cheapest_first[0].name, "Toaster");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod ordering;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, RemoveOutcome};
pub use error::{CoreError, CoreResult, StockShortfall, ValidationError};
pub use money::Money;
pub use ordering::{exact_search, sort_products, SortKey};
pub use types::*;
