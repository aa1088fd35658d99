//! # Shared Cart Manager
//!
//! A cart manager that several threads can drive.
//!
//! ## Thread Safety
//! The manager is wrapped in `Arc<Mutex<T>>` because:
//! 1. A presentation layer may handle events on more than one thread
//! 2. Checkout must hold the catalog and the cart for its whole
//!    reload → validate → commit sequence
//! 3. Every other operation must wait until that sequence is done
//!
//! A poisoned lock is recovered: every failed operation leaves the manager
//! unchanged, so the state behind it is still consistent.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_store::CatalogStore;

use crate::manager::CartManager;

/// Clonable handle to one [`CartManager`].
#[derive(Debug)]
pub struct SharedCartManager<S> {
    inner: Arc<Mutex<CartManager<S>>>,
}

impl<S> Clone for SharedCartManager<S> {
    fn clone(&self) -> Self {
        SharedCartManager {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CatalogStore> SharedCartManager<S> {
    pub fn new(manager: CartManager<S>) -> Self {
        SharedCartManager {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Executes a function with read access to the manager.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = shared.with_manager(|m| m.total_price());
    /// ```
    pub fn with_manager<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartManager<S>) -> R,
    {
        let manager = self.lock();
        f(&manager)
    }

    /// Executes a function with exclusive access to the manager.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_manager_mut(|m| m.add_to_cart(1, "Books"))?;
    /// ```
    pub fn with_manager_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartManager<S>) -> R,
    {
        let mut manager = self.lock();
        f(&mut manager)
    }

    fn lock(&self) -> MutexGuard<'_, CartManager<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::AlwaysConfirm;
    use shopfront_core::{Catalog, Money, Product};
    use shopfront_store::MemoryStore;
    use std::thread;

    #[test]
    fn test_concurrent_adds_respect_stock() {
        let catalog = Catalog::new().with_category(
            "Books",
            vec![Product::new(1, "Go", Money::from_major(10), "AW", 2015, 5)],
        );
        let shared = SharedCartManager::new(
            CartManager::new(MemoryStore::new(catalog)).with_confirm(AlwaysConfirm),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.with_manager_mut(|m| m.add_to_cart(1, "Books").is_ok()))
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 5);
        shared.with_manager(|m| {
            assert_eq!(m.cart().find(1, "Books").unwrap().quantity, 5);
            assert_eq!(m.total_price(), Money::from_major(50));
        });

        let receipt = shared.with_manager_mut(|m| m.checkout()).unwrap();
        assert_eq!(receipt.units, 5);
        shared.with_manager(|m| {
            assert_eq!(m.store().snapshot().find_product("Books", 1).unwrap().stock, 0);
        });
    }
}
