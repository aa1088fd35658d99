//! # Category View
//!
//! A snapshot of one category's products, as a category page shows them.
//!
//! Searching is the sort-then-bisect composition: the products are sorted
//! ascending by name (case-insensitively) and the query is looked up with
//! [`exact_search`]. When several products share a name, whichever one the
//! bisection lands on is returned.

use serde::Serialize;
use shopfront_core::{
    exact_search, sort_products, Catalog, CoreError, CoreResult, Product, SortDirection, SortKey,
};

/// Products of a single category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    category: String,
    products: Vec<Product>,
}

impl CategoryView {
    /// Copies `category` out of `catalog`.
    pub fn new(catalog: &Catalog, category: &str) -> CoreResult<Self> {
        let products = catalog
            .category(category)
            .ok_or_else(|| CoreError::CategoryNotFound(category.to_string()))?;

        Ok(CategoryView {
            category: category.to_string(),
            products: products.to_vec(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Products in stored order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products ordered by `key`.
    pub fn sorted_by(&self, key: SortKey, direction: SortDirection) -> Vec<Product> {
        sort_products(&self.products, key, direction)
    }

    /// Products ordered by price. Equal prices keep their stored order.
    pub fn sorted_by_price(&self, direction: SortDirection) -> Vec<Product> {
        self.sorted_by(SortKey::Price, direction)
    }

    /// Finds a product by exact name, ignoring case and surrounding spaces.
    ///
    /// Any query that matches no name, blank ones included, is `None`.
    pub fn search_by_name(&self, query: &str) -> Option<Product> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let sorted = self.sorted_by(SortKey::Name, SortDirection::Ascending);

        exact_search(&sorted, query, SortKey::Name).map(|i| sorted[i].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::Money;

    fn catalog() -> Catalog {
        Catalog::new().with_category(
            "Books",
            vec![
                Product::new(1, "Refactoring", Money::from_cents(4500), "AW", 2018, 3),
                Product::new(2, "Dune", Money::from_cents(850), "Ace", 1965, 5),
                Product::new(3, "Clean Code", Money::from_cents(3200), "PH", 2008, 1),
                Product::new(4, "Neuromancer", Money::from_cents(850), "Ace", 1984, 2),
            ],
        )
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            CategoryView::new(&catalog(), "Garden"),
            Err(CoreError::CategoryNotFound(c)) if c == "Garden"
        ));
    }

    #[test]
    fn test_sorted_by_price() {
        let view = CategoryView::new(&catalog(), "Books").unwrap();

        assert_eq!(ids(&view.sorted_by_price(SortDirection::Ascending)), vec![2, 4, 3, 1]);
        assert_eq!(ids(&view.sorted_by_price(SortDirection::Descending)), vec![1, 3, 2, 4]);
        // Stored order untouched.
        assert_eq!(ids(view.products()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_by_name() {
        let view = CategoryView::new(&catalog(), "Books").unwrap();

        assert_eq!(view.search_by_name("dune").unwrap().id, 2);
        assert_eq!(view.search_by_name("  Clean Code ").unwrap().id, 3);
        assert!(view.search_by_name("Hyperion").is_none());
    }

    #[test]
    fn test_blank_or_long_queries_are_not_found() {
        let view = CategoryView::new(&catalog(), "Books").unwrap();

        assert!(view.search_by_name("").is_none());
        assert!(view.search_by_name("   ").is_none());
        assert!(view.search_by_name(&"x".repeat(101)).is_none());

        let long_name = "y".repeat(150);
        let with_long = Catalog::new().with_category(
            "Books",
            vec![Product::new(9, long_name.clone(), Money::from_major(1), "Z", 2000, 1)],
        );
        let view = CategoryView::new(&with_long, "Books").unwrap();
        assert_eq!(view.search_by_name(&long_name).unwrap().id, 9);
    }
}
