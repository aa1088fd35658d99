//! # shopfront-engine: Cart Manager for Shopfront
//!
//! The operations a storefront UI calls: add, remove, clear, checkout, plus
//! category pages, navigation and session logout.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Presentation (any UI)                            │
//! │        selections, queries, yes/no answers ▲ notices, snapshots        │
//! │                             │              │                            │
//! │  ┌──────────────────────────▼──────────────┴───────────────────────┐   │
//! │  │                 shopfront-engine (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │  Storefront ──► NavStack          SharedCartManager             │   │
//! │  │      │                                   │                      │   │
//! │  │      ▼                                   ▼                      │   │
//! │  │  CartManager ◄── Confirm / Notify   (Arc<Mutex<CartManager>>)   │   │
//! │  │      │                                                          │   │
//! │  │      ├──► shopfront-core  (Cart, Catalog, sort/search)          │   │
//! │  │      └──► shopfront-store (CatalogStore: load / save)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shopfront_engine::{AlwaysConfirm, CartManager, StorefrontConfig};
//!
//! shopfront_engine::init_tracing();
//!
//! let config = StorefrontConfig::load_or_default(None);
//! let mut manager = CartManager::from_config(&config).with_confirm(AlwaysConfirm);
//!
//! manager.add_to_cart(1, "Books")?;
//! let receipt = manager.checkout()?;
//! println!("Charged {}", receipt.total);
//! # Ok::<(), shopfront_engine::EngineError>(())
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod navigation;
pub mod notice;
pub mod shared;
pub mod storefront;
pub mod view;

pub use config::StorefrontConfig;
pub use error::{EngineError, EngineResult};
pub use manager::{
    AddOutcome, CartManager, CartSnapshot, CheckoutReceipt, ClearOutcome, ReceiptLine,
};
pub use navigation::{NavStack, Screen};
pub use notice::{
    AlwaysConfirm, AlwaysDecline, Confirm, Notice, NoticeLevel, NoticeLog, Notify, Prompt,
    TracingNotifier,
};
pub use shared::SharedCartManager;
pub use storefront::{Section, Storefront, STOREFRONT_SECTIONS};
pub use view::CategoryView;

use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,shopfront=debug";

/// Installs the fmt subscriber, filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
