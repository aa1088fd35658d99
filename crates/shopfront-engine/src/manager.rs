//! # Cart Manager
//!
//! Business rules for adding, removing, clearing and checking out, applied
//! to a catalog the manager owns and a cart it keeps.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         checkout()                                      │
//! │                                                                         │
//! │  cart empty? ──yes──► EmptyCart (store untouched)                      │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  Confirm(Checkout) ──no──► CheckoutCancelled                           │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  store.load()  (live catalog replaces the manager's view)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  any live stock < quantity? ──yes──► InsufficientStock([..])           │
//! │       │ no                           cart untouched, nothing saved     │
//! │       ▼                                                                 │
//! │  decrement stock on a working copy ──► store.save(copy)                │
//! │       │                                     │                           │
//! │       │ Ok                                  └─ Err ──► Store(..)       │
//! │       ▼                                        cart + catalog as-is    │
//! │  swap copy in, clear cart ──► CheckoutReceipt                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejected operation is a no-op: the cart, its total and the catalog
//! are exactly as they were before the call.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_core::validation::validate_price;
use shopfront_core::{
    Cart, CartItem, Catalog, CoreError, CoreResult, Money, RemoveOutcome, StockShortfall,
    ValidationError,
};
use shopfront_store::{CatalogStore, JsonFileStore};
use tracing::{debug, info, warn};

use crate::config::StorefrontConfig;
use crate::error::{EngineError, EngineResult};
use crate::notice::{AlwaysDecline, Confirm, Notice, Notify, Prompt, TracingNotifier};
use crate::view::CategoryView;

// =============================================================================
// Outcomes
// =============================================================================

/// Result of a successful add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddOutcome {
    /// A new line item with quantity 1.
    Added { name: String },
    /// An existing line item went up by one.
    QuantityUpdated { name: String, quantity: i64 },
}

impl AddOutcome {
    /// User-facing message.
    pub fn message(&self) -> String {
        match self {
            AddOutcome::Added { name } => format!("{} added to cart.", name),
            AddOutcome::QuantityUpdated { name, quantity } => {
                format!("{} quantity updated to {}.", name, quantity)
            }
        }
    }
}

/// Result of `clear_cart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearOutcome {
    Cleared,
    AlreadyEmpty,
    Declined,
}

/// One purchased line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

/// What a completed checkout bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub lines: Vec<ReceiptLine>,
    /// Total units across all lines.
    pub units: i64,
    /// Amount charged (the cart's running total).
    pub total: Money,
    pub completed_at: DateTime<Utc>,
}

impl CheckoutReceipt {
    fn from_cart(cart: &Cart) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| ReceiptLine {
                id: item.id(),
                category: item.category.clone(),
                name: item.name().to_string(),
                unit_price: item.unit_price(),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        CheckoutReceipt {
            lines,
            units: cart.total_quantity(),
            total: cart.total_price(),
            completed_at: Utc::now(),
        }
    }
}

/// Read-only view of the cart for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub total_price: Money,
    pub item_count: usize,
    pub total_quantity: i64,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items().to_vec(),
            total_price: cart.total_price(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
        }
    }
}

// =============================================================================
// Cart Manager
// =============================================================================

/// Owns the catalog, the cart and the store, and enforces the stock rules
/// between them.
///
/// ## Defaults
/// - Confirmation: [`AlwaysDecline`]; install a hook with
///   [`with_confirm`](Self::with_confirm) before clearing or checking out
/// - Notices: [`TracingNotifier`]
pub struct CartManager<S> {
    store: S,
    catalog: Catalog,
    cart: Cart,
    confirm: Box<dyn Confirm>,
    notifier: Box<dyn Notify>,
}

impl<S> fmt::Debug for CartManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("categories", &self.catalog.len())
            .field("cart_items", &self.cart.item_count())
            .field("total_price", &self.cart.total_price())
            .finish_non_exhaustive()
    }
}

impl CartManager<JsonFileStore> {
    /// Builds a manager over the catalog file named by `config`.
    pub fn from_config(config: &StorefrontConfig) -> Self {
        CartManager::new(config.open_store())
    }
}

impl<S: CatalogStore> CartManager<S> {
    /// Creates a manager with an empty cart, loading the catalog from
    /// `store` (an unreadable store yields an empty catalog).
    pub fn new(store: S) -> Self {
        let catalog = store.load();
        info!(
            categories = catalog.len(),
            products = catalog.product_count(),
            "Catalog loaded"
        );

        CartManager {
            store,
            catalog,
            cart: Cart::new(),
            confirm: Box::new(AlwaysDecline),
            notifier: Box::new(TracingNotifier),
        }
    }

    /// Replaces the confirmation hook.
    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    /// Replaces the notice sink.
    pub fn with_notifier(mut self, notifier: impl Notify + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Presentation copy of the cart.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(&self.cart)
    }

    /// Products of one category, ready for sorting and searching.
    pub fn view(&self, category: &str) -> CoreResult<CategoryView> {
        CategoryView::new(&self.catalog, category)
    }

    /// Re-reads the catalog from the store.
    pub fn reload_catalog(&mut self) {
        self.catalog = self.store.load();
        debug!(categories = self.catalog.len(), "Catalog reloaded");
    }

    /// Asks the confirmation hook directly.
    pub fn confirm(&mut self, prompt: Prompt) -> bool {
        let accepted = self.confirm.confirm(prompt);
        debug!(?prompt, accepted, "Confirmation answered");
        accepted
    }

    /// Sends a notice to the sink.
    pub fn notify(&mut self, notice: Notice) {
        self.notifier.notify(&notice);
    }

    // =========================================================================
    // Add / Remove
    // =========================================================================

    /// Adds one unit of `(product_id, category)` to the cart.
    ///
    /// ## Rules
    /// 1. The category must exist
    /// 2. The product must exist in that category
    /// 3. Catalog stock must be positive
    /// 4. An existing line may only grow while `quantity < stock`
    /// 5. The price must pass [`validate_price`] and the new total must be
    ///    representable
    pub fn add_to_cart(&mut self, product_id: i64, category: &str) -> CoreResult<AddOutcome> {
        debug!(product_id, category, "add_to_cart");

        let result = self.try_add(product_id, category);
        match &result {
            Ok(outcome) => self.notify(Notice::success(outcome.message())),
            Err(e) => self.notify(Notice::failure(e.to_string())),
        }
        result
    }

    fn try_add(&mut self, product_id: i64, category: &str) -> CoreResult<AddOutcome> {
        let products = self
            .catalog
            .category(category)
            .ok_or_else(|| CoreError::CategoryNotFound(category.to_string()))?;

        let product = products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound {
                id: product_id,
                category: category.to_string(),
            })?;

        if !product.in_stock() {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(existing) = self.cart.find(product_id, category) {
            if existing.quantity >= product.stock {
                return Err(CoreError::StockExceeded {
                    name: product.name.clone(),
                    available: product.stock,
                });
            }
        }

        validate_price(product.price)?;
        if self.cart.total_price().checked_add(product.price).is_none() {
            return Err(ValidationError::OutOfRange {
                field: "total".to_string(),
            }
            .into());
        }

        if let Some(quantity) = self.cart.increment(product_id, category, product.price) {
            debug!(product_id, category, quantity, "Line quantity increased");
            return Ok(AddOutcome::QuantityUpdated {
                name: product.name.clone(),
                quantity,
            });
        }

        self.cart.push(CartItem::from_product(product, category));
        debug!(product_id, category, "Line added");
        Ok(AddOutcome::Added {
            name: product.name.clone(),
        })
    }

    /// Takes one unit of `(product_id, category)` out of the cart.
    ///
    /// Removing something that is not in the cart does nothing.
    pub fn remove_from_cart(&mut self, product_id: i64, category: &str) -> RemoveOutcome {
        let outcome = self.cart.decrement(product_id, category);
        debug!(product_id, category, ?outcome, "remove_from_cart");
        outcome
    }

    // =========================================================================
    // Clear / Discard
    // =========================================================================

    /// Empties the cart after confirmation.
    pub fn clear_cart(&mut self) -> ClearOutcome {
        if self.cart.is_empty() {
            self.notify(Notice::info("Cart is already empty."));
            return ClearOutcome::AlreadyEmpty;
        }

        if !self.confirm(Prompt::ClearCart) {
            return ClearOutcome::Declined;
        }

        let lines = self.cart.item_count();
        self.cart.clear();
        info!(lines, "Cart cleared");
        self.notify(Notice::success("Cart cleared."));
        ClearOutcome::Cleared
    }

    /// Empties the cart without asking. Used on logout.
    pub fn discard_cart(&mut self) {
        let lines = self.cart.item_count();
        self.cart.clear();
        info!(lines, "Cart discarded");
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Buys everything in the cart, all or nothing.
    ///
    /// See the module docs for the full sequence.
    pub fn checkout(&mut self) -> EngineResult<CheckoutReceipt> {
        debug!(
            lines = self.cart.item_count(),
            total = %self.cart.total_price(),
            "checkout"
        );

        let result = self.try_checkout();
        match &result {
            Ok(_) => self.notify(Notice::success("Checkout successful.")),
            Err(EngineError::Core(CoreError::CheckoutCancelled)) => {
                self.notify(Notice::info(CoreError::CheckoutCancelled.to_string()))
            }
            Err(e) => self.notify(Notice::failure(e.to_string())),
        }
        result
    }

    fn try_checkout(&mut self) -> EngineResult<CheckoutReceipt> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        if !self.confirm(Prompt::Checkout) {
            return Err(CoreError::CheckoutCancelled.into());
        }

        self.reload_catalog();

        let shortfalls = find_shortfalls(&self.cart, &self.catalog);
        if !shortfalls.is_empty() {
            warn!(count = shortfalls.len(), "Checkout rejected: insufficient stock");
            return Err(CoreError::InsufficientStock(shortfalls).into());
        }

        let mut updated = self.catalog.clone();
        for item in self.cart.items() {
            if let Some(product) = updated.find_product_mut(&item.category, item.id()) {
                product.stock -= item.quantity;
            }
        }

        self.store.save(&updated)?;
        self.catalog = updated;

        let receipt = CheckoutReceipt::from_cart(&self.cart);
        self.cart.clear();

        info!(
            lines = receipt.lines.len(),
            units = receipt.units,
            total = %receipt.total,
            "Checkout committed"
        );
        Ok(receipt)
    }
}

/// Every line the live catalog cannot fully supply. A product missing from
/// the catalog counts as zero available.
fn find_shortfalls(cart: &Cart, catalog: &Catalog) -> Vec<StockShortfall> {
    cart.items()
        .iter()
        .filter_map(|item| {
            let live = catalog.find_product(&item.category, item.id());
            let available = live.map_or(0, |p| p.stock);

            (available < item.quantity).then(|| StockShortfall {
                name: live.map_or(item.name(), |p| p.name.as_str()).to_string(),
                available,
                requested: item.quantity,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
