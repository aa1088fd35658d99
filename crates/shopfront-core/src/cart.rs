//! # Cart Model
//!
//! The cart data container and its structural invariants.
//!
//! ## Invariants
//! - At most one line item per `(id, category)`
//! - Every line item has `quantity >= 1`; an item that would drop to 0 is
//!   removed, never kept at 0
//! - `total_price` is maintained incrementally by the mutation primitives
//!   below and always equals `Σ price × quantity`
//!
//! Stock rules live one layer up (the cart manager); this module only knows
//! how to keep its own bookkeeping straight.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Manager call            Cart primitive           Total change          │
//! │  ────────────            ──────────────           ────────────          │
//! │  add (new line)  ──────► push(item)       ──────► + unit price          │
//! │  add (existing)  ──────► increment(id,cat)──────► + unit price          │
//! │  remove          ──────► decrement(id,cat)──────► - frozen price        │
//! │  clear/checkout  ──────► clear()          ──────► = 0                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// ## Snapshot Pattern
/// `product` is a copy taken at first add. The price is frozen there; only
/// `product.id` and `category` are used later to find the live catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product record as it was when first added.
    #[serde(flatten)]
    pub product: Product,

    /// Units in the cart (>= 1).
    pub quantity: i64,

    /// Category the product was added from.
    pub category: String,

    /// When this line was created.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a line with quantity 1 from a catalog product.
    pub fn from_product(product: &Product, category: impl Into<String>) -> Self {
        CartItem {
            product: product.clone(),
            quantity: 1,
            category: category.into(),
            added_at: Utc::now(),
        }
    }

    /// Product id.
    #[inline]
    pub fn id(&self) -> i64 {
        self.product.id
    }

    /// Product name at time of adding.
    #[inline]
    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// Frozen unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Checks whether this line is for `(id, category)`.
    #[inline]
    pub fn matches(&self, id: i64, category: &str) -> bool {
        self.product.id == id && self.category == category
    }
}

// =============================================================================
// Remove Outcome
// =============================================================================

/// What a single remove did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemoveOutcome {
    /// Quantity went down by one and the line is still there.
    Decremented { quantity: i64 },
    /// The line reached zero and was dropped.
    Removed,
    /// Nothing matched; the cart is unchanged.
    NotInCart,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    total_price: Money,
    created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            total_price: Money::zero(),
            created_at: Utc::now(),
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Running total.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Position of the line for `(id, category)`.
    pub fn position(&self, id: i64, category: &str) -> Option<usize> {
        self.items.iter().position(|i| i.matches(id, category))
    }

    /// Line for `(id, category)`.
    pub fn find(&self, id: i64, category: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.matches(id, category))
    }

    /// Appends a new line and adds its unit price to the total.
    ///
    /// The caller guarantees no line for the same `(id, category)` exists.
    pub fn push(&mut self, item: CartItem) {
        debug_assert!(self.position(item.id(), &item.category).is_none());
        debug_assert!(item.quantity >= 1);
        self.total_price += item.line_total();
        self.items.push(item);
    }

    /// Adds one unit to the line for `(id, category)`, charging
    /// `unit_price` (the live catalog price).
    ///
    /// Returns the new quantity, or `None` if there is no such line.
    pub fn increment(&mut self, id: i64, category: &str, unit_price: Money) -> Option<i64> {
        let item = self.items.iter_mut().find(|i| i.matches(id, category))?;
        item.quantity += 1;
        self.total_price += unit_price;
        Some(item.quantity)
    }

    /// Takes one unit off the line for `(id, category)`, refunding its
    /// frozen unit price. Drops the line when it reaches zero.
    pub fn decrement(&mut self, id: i64, category: &str) -> RemoveOutcome {
        let Some(index) = self.position(id, category) else {
            return RemoveOutcome::NotInCart;
        };

        let item = &mut self.items[index];
        item.quantity -= 1;
        self.total_price -= item.unit_price();

        if item.quantity <= 0 {
            self.items.remove(index);
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::Decremented {
                quantity: item.quantity,
            }
        }
    }

    /// Empties the cart and resets the total.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_price = Money::zero();
        self.created_at = Utc::now();
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total computed from scratch. Matches `total_price()` unless a line
    /// was charged at a price other than its frozen one.
    pub fn recomputed_total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: i64, price_cents: i64) -> Product {
        Product::new(
            id,
            format!("Product {}", id),
            Money::from_cents(price_cents),
            "Acme",
            2021,
            10,
        )
    }

    #[test]
    fn test_push_adds_to_total() {
        let mut cart = Cart::new();
        cart.push(CartItem::from_product(&test_product(1, 999), "Books"));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.total_price().cents(), 999);
    }

    #[test]
    fn test_increment_and_decrement_are_inverse() {
        let mut cart = Cart::new();
        let product = test_product(1, 500);
        cart.push(CartItem::from_product(&product, "Books"));

        assert_eq!(cart.increment(1, "Books", product.price), Some(2));
        assert_eq!(cart.total_price().cents(), 1000);

        assert_eq!(
            cart.decrement(1, "Books"),
            RemoveOutcome::Decremented { quantity: 1 }
        );
        assert_eq!(cart.total_price().cents(), 500);

        assert_eq!(cart.decrement(1, "Books"), RemoveOutcome::Removed);
        assert!(cart.is_empty());
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_decrement_missing_is_noop() {
        let mut cart = Cart::new();
        cart.push(CartItem::from_product(&test_product(1, 500), "Books"));

        assert_eq!(cart.decrement(1, "Sports"), RemoveOutcome::NotInCart);
        assert_eq!(cart.decrement(2, "Books"), RemoveOutcome::NotInCart);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_price().cents(), 500);
    }

    #[test]
    fn test_same_id_different_category_are_distinct() {
        let mut cart = Cart::new();
        cart.push(CartItem::from_product(&test_product(1, 100), "Books"));
        cart.push(CartItem::from_product(&test_product(1, 200), "Sports"));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.position(1, "Sports"), Some(1));
        assert_eq!(cart.total_price().cents(), 300);
    }

    #[test]
    fn test_increment_missing_line() {
        let mut cart = Cart::new();
        assert_eq!(cart.increment(1, "Books", Money::from_cents(100)), None);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.push(CartItem::from_product(&test_product(1, 999), "Books"));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_recomputed_total_matches_running_total() {
        let mut cart = Cart::new();
        let a = test_product(1, 250);
        let b = test_product(2, 1099);
        cart.push(CartItem::from_product(&a, "Books"));
        cart.push(CartItem::from_product(&b, "Books"));
        cart.increment(2, "Books", b.price);

        assert_eq!(cart.total_price(), cart.recomputed_total());
        assert_eq!(cart.total_price().cents(), 250 + 2 * 1099);
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem::from_product(&test_product(3, 1000), "Books");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["quantity"], 1);
        assert_eq!(value["category"], "Books");
        assert_eq!(value["price"], 10);
    }
}
