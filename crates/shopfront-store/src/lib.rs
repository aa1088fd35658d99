//! # shopfront-store: Record Store for Shopfront
//!
//! Loads and saves the product catalog, a JSON object mapping category names
//! to ordered product lists.
//!
//! The cart manager reads through [`CatalogStore::load`] at start-up and
//! before checkout, and writes once per committed checkout.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shopfront_store::{CatalogStore, JsonFileStore};
//!
//! let store = JsonFileStore::new("products.json");
//!
//! // Never fails: a missing or corrupt file yields an empty catalog.
//! let catalog = store.load();
//!
//! store.save(&catalog).expect("save catalog");
//! ```

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{CatalogStore, JsonFileStore, MemoryStore, DEFAULT_INDENT};
