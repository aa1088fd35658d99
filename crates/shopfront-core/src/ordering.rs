//! # Ordering Algorithms
//!
//! Stable merge sort and exact-match binary search over product lists.
//!
//! ## How the Category Page Uses Them
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Sort by Price" button                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sort_products(products, SortKey::Price, direction)                    │
//! │                                                                         │
//! │  Search box: "  the go programming language "                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sorted = sort_products(products, SortKey::Name, Ascending)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  exact_search(&sorted, query, SortKey::Name) ──► Some(index) | None   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two primitives are independent: `exact_search` never sorts for you.
//! Passing a list that is not sorted ascending by the same key gives
//! unspecified (but memory-safe) results.
//!
//! ## Known Limitation
//! Keys are not required to be unique. When several products share the
//! searched key, `exact_search` returns whichever one the bisection lands on,
//! not necessarily the first in sorted order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, SortDirection};

// =============================================================================
// Sort Key
// =============================================================================

/// Product field used for ordering and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Name,
    Price,
    Brand,
    ModelYear,
    Stock,
}

/// A projected key value. Text is stored lowercased. A record without the
/// field sorts before every record that has it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum KeyValue {
    Missing,
    Int(i64),
    Money(Money),
    Text(String),
}

impl SortKey {
    fn project(self, product: &Product) -> KeyValue {
        match self {
            SortKey::Id => KeyValue::Int(product.id),
            SortKey::Name => KeyValue::Text(product.name.to_lowercase()),
            SortKey::Price => KeyValue::Money(product.price),
            SortKey::Brand => product
                .brand
                .as_ref()
                .map_or(KeyValue::Missing, |b| KeyValue::Text(b.to_lowercase())),
            SortKey::ModelYear => product.model_year.map_or(KeyValue::Missing, KeyValue::Int),
            SortKey::Stock => KeyValue::Int(product.stock),
        }
    }

    /// Turns a search query into a key of the same kind.
    /// `None` means the query can never match (e.g. "abc" for a price).
    fn parse_target(self, target: &str) -> Option<KeyValue> {
        let target = target.trim();
        match self {
            SortKey::Name | SortKey::Brand => Some(KeyValue::Text(target.to_lowercase())),
            SortKey::Price => target.parse::<Money>().ok().map(KeyValue::Money),
            SortKey::Id | SortKey::ModelYear | SortKey::Stock => {
                target.parse::<i64>().ok().map(KeyValue::Int)
            }
        }
    }

    /// Compares two products by this key.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        self.project(a).cmp(&self.project(b))
    }
}

// =============================================================================
// Merge Sort
// =============================================================================

/// Stable top-down merge sort. Returns a new vector; `items` is untouched.
///
/// On ties the element from the left half is emitted first, so equal
/// elements keep their relative order.
///
/// ## Example
/// ```rust
/// use shopfront_core::ordering::merge_sort_by;
///
/// let sorted = merge_sort_by(&[3, 1, 2], |a, b| a.cmp(b));
/// assert_eq!(sorted, vec![1, 2, 3]);
/// ```
pub fn merge_sort_by<T, F>(items: &[T], compare: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    sort_slice(items, &compare)
}

fn sort_slice<T, F>(items: &[T], compare: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = sort_slice(&items[..mid], compare);
    let right = sort_slice(&items[mid..], compare);

    merge(left, right, compare)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut result = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            // Ties go left: `Greater` is the only case that takes from the right.
            (Some(l), Some(r)) => compare(l, r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let next = if take_left { left.next() } else { right.next() };
        result.extend(next);
    }

    result
}

/// Sorts products by `key` in the given direction.
///
/// Descending order reverses the comparison (not the output), so ties still
/// keep their original relative order.
pub fn sort_products(items: &[Product], key: SortKey, direction: SortDirection) -> Vec<Product> {
    if direction.is_descending() {
        merge_sort_by(items, |a, b| key.compare(b, a))
    } else {
        merge_sort_by(items, |a, b| key.compare(a, b))
    }
}

// =============================================================================
// Exact Search
// =============================================================================

/// Bisection over a sorted slice.
///
/// `probe` reports how the element at the midpoint compares to the target
/// (`Less` = element is before the target). Returns the first exact hit.
pub fn binary_search_by<T, F>(items: &[T], probe: F) -> Option<usize>
where
    F: Fn(&T) -> Ordering,
{
    let mut low = 0usize;
    let mut high = items.len();

    // Half-open [low, high) so there is no underflow at index 0.
    while low < high {
        let mid = low + (high - low) / 2;
        match probe(&items[mid]) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    None
}

/// Finds a product whose `key` equals `target`.
///
/// ## Preconditions
/// `items` must be sorted ascending by `key` (use [`sort_products`]).
///
/// ## Matching
/// - `target` is trimmed
/// - text keys (`Name`, `Brand`) compare case-insensitively
/// - numeric keys parse `target`; a non-numeric target is "not found"
///
/// ## Example
/// ```rust
/// use shopfront_core::money::Money;
/// use shopfront_core::ordering::{exact_search, sort_products, SortKey};
/// use shopfront_core::types::{Product, SortDirection};
///
/// let products = vec![
///     Product::new(1, "Rust", Money::from_major(30), "NoStarch", 2019, 4),
///     Product::new(2, "Go", Money::from_major(10), "Addison", 2015, 2),
/// ];
/// let sorted = sort_products(&products, SortKey::Name, SortDirection::Ascending);
///
/// let idx = exact_search(&sorted, "  go ", SortKey::Name).unwrap();
/// assert_eq!(sorted[idx].id, 2);
/// assert_eq!(exact_search(&sorted, "python", SortKey::Name), None);
/// ```
pub fn exact_search(items: &[Product], target: &str, key: SortKey) -> Option<usize> {
    let target = key.parse_target(target)?;
    binary_search_by(items, |product| key.project(product).cmp(&target))
}

// =============================================================================
// Unit Tests
// =============================================================================
