//! # Storefront Session
//!
//! Ties a [`CartManager`] to a [`NavStack`]: opening category pages and the
//! cart, going back, and logging out.
//!
//! Logging out discards the cart and returns to `Home` from any screen.

use serde::Serialize;
use shopfront_core::{CoreResult, Product, SortDirection};
use shopfront_store::CatalogStore;
use tracing::info;

use crate::manager::{CartManager, CartSnapshot};
use crate::navigation::{NavStack, Screen};
use crate::notice::{Notice, Prompt};
use crate::view::CategoryView;

// =============================================================================
// Sections
// =============================================================================

/// A storefront section: a catalog category key plus its display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub key: &'static str,
    pub title: &'static str,
}

/// The standard sections, in display order.
pub const STOREFRONT_SECTIONS: &[Section] = &[
    Section {
        key: "HomeAppliances",
        title: "Home Appliances",
    },
    Section {
        key: "Electronics",
        title: "Electronics",
    },
    Section {
        key: "Fashion",
        title: "Fashion",
    },
    Section {
        key: "Books",
        title: "Books",
    },
    Section {
        key: "Sports",
        title: "Sports",
    },
];

/// Looks up a standard section by category key.
pub fn section(key: &str) -> Option<&'static Section> {
    STOREFRONT_SECTIONS.iter().find(|s| s.key == key)
}

// =============================================================================
// Storefront
// =============================================================================

/// One shopper's session.
#[derive(Debug)]
pub struct Storefront<S> {
    manager: CartManager<S>,
    nav: NavStack,
}

impl<S: CatalogStore> Storefront<S> {
    /// Starts a session on the home screen.
    pub fn new(manager: CartManager<S>) -> Self {
        Storefront {
            manager,
            nav: NavStack::new(Screen::Home),
        }
    }

    pub fn manager(&self) -> &CartManager<S> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut CartManager<S> {
        &mut self.manager
    }

    pub fn navigation(&self) -> &NavStack {
        &self.nav
    }

    pub fn current_screen(&self) -> &Screen {
        self.nav.current()
    }

    /// Standard sections that exist in the loaded catalog.
    pub fn available_sections(&self) -> Vec<&'static Section> {
        STOREFRONT_SECTIONS
            .iter()
            .filter(|s| self.manager.catalog().contains_category(s.key))
            .collect()
    }

    /// Shows a category page and returns its products.
    ///
    /// An unknown category is reported and leaves navigation unchanged.
    pub fn open_category(&mut self, key: &str) -> CoreResult<CategoryView> {
        match self.manager.view(key) {
            Ok(view) => {
                self.nav.push(Screen::category(key));
                Ok(view)
            }
            Err(e) => {
                self.manager.notify(Notice::failure(e.to_string()));
                Err(e)
            }
        }
    }

    /// Shows a category page sorted by price.
    pub fn open_category_sorted(
        &mut self,
        key: &str,
        direction: SortDirection,
    ) -> CoreResult<Vec<Product>> {
        self.open_category(key)
            .map(|view| view.sorted_by_price(direction))
    }

    /// Shows the cart page and returns its contents.
    pub fn open_cart(&mut self) -> CartSnapshot {
        self.nav.push(Screen::Cart);
        self.manager.snapshot()
    }

    /// Closes the current page. `None` when already on the root.
    pub fn back(&mut self) -> Option<Screen> {
        self.nav.pop()
    }

    /// Logs out if `confirmed`: the cart is discarded without a second
    /// prompt and navigation returns to `Home`.
    ///
    /// Returns whether the logout happened.
    pub fn logout(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }

        self.manager.discard_cart();
        self.nav.reset(Screen::Home);
        info!("Session logged out");
        self.manager
            .notify(Notice::success("You have been logged out successfully"));
        true
    }

    /// Asks the confirmation hook about logging out, then logs out.
    pub fn request_logout(&mut self) -> bool {
        let confirmed = self.manager.confirm(Prompt::Logout);
        self.logout(confirmed)
    }
}
