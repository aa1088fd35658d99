//! # Domain Types
//!
//! Catalog types shared by every layer of Shopfront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ Catalog (ordered by category, as in the file)                   │   │
//! │  │                                                                 │   │
//! │  │   "Books" ──► [ Product, Product, ... ]                        │   │
//! │  │   "Sports" ─► [ Product, ... ]                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    Product      │   id is unique per category only, so the pair     │
//! │  │  ─────────────  │   (id, category) is the real identity.            │
//! │  │  id (i64)       │                                                   │
//! │  │  name           │                                                   │
//! │  │  price (Money)  │                                                   │
//! │  │  brand          │                                                   │
//! │  │  model year     │                                                   │
//! │  │  stock          │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product record as stored in the catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, unique within its category.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Manufacturer or publisher. Absent keys stay absent on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Model year. The file key contains a space.
    #[serde(rename = "model year", default, skip_serializing_if = "Option::is_none")]
    pub model_year: Option<i64>,

    /// Units available for sale.
    pub stock: i64,

    /// Any other keys found on the record, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a product with every standard field set and no extra fields.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price: Money,
        brand: impl Into<String>,
        model_year: i64,
        stock: i64,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            brand: Some(brand.into()),
            model_year: Some(model_year),
            stock,
            extra: Map::new(),
        }
    }

    /// Checks whether `quantity` units can be taken from stock.
    #[inline]
    pub fn can_fulfil(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Checks whether any stock is left.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// One category and its products.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub products: Vec<Product>,
}

/// The whole product catalog.
///
/// ## Ordering
/// Categories keep the order they had in the file. The file is an object
/// keyed by category name; a `HashMap` would scramble it on every save.
///
/// ## Lookup
/// `find_product` returns the first product with the id. Ids are expected
/// to be unique per category (see `validation::validate_catalog`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a category, keeping its original position if it
    /// already existed.
    pub fn insert_category(&mut self, name: impl Into<String>, products: Vec<Product>) {
        let name = name.into();
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.products = products,
            None => self.categories.push(Category { name, products }),
        }
    }

    /// Builder-style variant of [`Catalog::insert_category`].
    pub fn with_category(mut self, name: impl Into<String>, products: Vec<Product>) -> Self {
        self.insert_category(name, products);
        self
    }

    /// Returns the products of a category.
    pub fn category(&self, name: &str) -> Option<&[Product]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.products.as_slice())
    }

    /// Returns the products of a category for mutation.
    pub fn category_mut(&mut self, name: &str) -> Option<&mut Vec<Product>> {
        self.categories
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.products)
    }

    /// Checks whether a category exists.
    pub fn contains_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Finds a product by `(id, category)`; first match wins.
    pub fn find_product(&self, category: &str, id: i64) -> Option<&Product> {
        self.category(category)?.iter().find(|p| p.id == id)
    }

    /// Mutable variant of [`Catalog::find_product`].
    pub fn find_product_mut(&mut self, category: &str, id: i64) -> Option<&mut Product> {
        self.category_mut(category)?.iter_mut().find(|p| p.id == id)
    }

    /// Category names in file order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// All categories in file order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Checks whether the catalog has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of products across categories.
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.products)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping category names to product lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
        let mut catalog = Catalog::new();
        while let Some((name, products)) = access.next_entry::<String, Vec<Product>>()? {
            // A repeated key replaces the earlier one, like a JSON object would.
            catalog.insert_category(name, products);
        }
        Ok(catalog)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

// =============================================================================
// Sort Direction
// =============================================================================

/// Direction toggle supplied by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Checks whether this is descending order.
    #[inline]
    pub fn is_descending(&self) -> bool {
        matches!(self, SortDirection::Descending)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
