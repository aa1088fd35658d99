//! # Navigation Stack
//!
//! Which screen is showing, and what "back" returns to.
//!
//! ```text
//! push(Category)        push(Cart)             pop()
//! ┌──────────┐          ┌──────────┐           ┌──────────┐
//! │          │          │ Cart     │ ◄ shown   │          │
//! │ Category │ ◄ shown  │ Category │           │ Category │ ◄ shown
//! │ Home     │          │ Home     │           │ Home     │
//! └──────────┘          └──────────┘           └──────────┘
//! ```
//!
//! Only the top screen is visible. The root screen can never be popped.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A screen the storefront can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Home,
    Category { key: String },
    Cart,
}

impl Screen {
    pub fn category(key: impl Into<String>) -> Self {
        Screen::Category { key: key.into() }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home => f.write_str("Home"),
            Screen::Category { key } => write!(f, "Category({})", key),
            Screen::Cart => f.write_str("Cart"),
        }
    }
}

/// Stack of screens with a fixed root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavStack {
    stack: Vec<Screen>,
}

impl Default for NavStack {
    fn default() -> Self {
        Self::new(Screen::Home)
    }
}

impl NavStack {
    /// Creates a stack showing `root`.
    pub fn new(root: Screen) -> Self {
        NavStack { stack: vec![root] }
    }

    /// The visible screen.
    pub fn current(&self) -> &Screen {
        // `stack` is never empty: `new` seeds it and `pop` keeps the root.
        &self.stack[self.stack.len() - 1]
    }

    /// Shows `screen`, hiding the current one.
    pub fn push(&mut self, screen: Screen) {
        debug!(from = %self.current(), to = %screen, "Navigate");
        self.stack.push(screen);
    }

    /// Goes back one screen and returns the one that was closed.
    ///
    /// Returns `None` (and changes nothing) when only the root is left.
    pub fn pop(&mut self) -> Option<Screen> {
        if self.stack.len() <= 1 {
            return None;
        }
        let closed = self.stack.pop();
        debug!(to = %self.current(), "Navigate back");
        closed
    }

    /// Drops every screen and shows `root`.
    pub fn reset(&mut self, root: Screen) {
        self.stack.clear();
        self.stack.push(root);
    }

    /// Number of screens, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Checks if only the root is left.
    pub fn is_at_root(&self) -> bool {
        self.stack.len() == 1
    }

    /// Screens from root to top.
    pub fn screens(&self) -> &[Screen] {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut nav = NavStack::default();
        nav.push(Screen::category("Books"));
        nav.push(Screen::Cart);

        assert_eq!(nav.current(), &Screen::Cart);
        assert_eq!(nav.depth(), 3);

        assert_eq!(nav.pop(), Some(Screen::Cart));
        assert_eq!(nav.current(), &Screen::category("Books"));
    }

    #[test]
    fn test_root_cannot_be_popped() {
        let mut nav = NavStack::default();
        assert_eq!(nav.pop(), None);
        assert_eq!(nav.current(), &Screen::Home);
        assert!(nav.is_at_root());
    }

    #[test]
    fn test_reset() {
        let mut nav = NavStack::default();
        nav.push(Screen::category("Sports"));
        nav.push(Screen::Cart);

        nav.reset(Screen::Home);
        assert_eq!(nav.screens(), &[Screen::Home]);
    }

    #[test]
    fn test_screen_serializes_tagged() {
        let json = serde_json::to_value(Screen::category("Books")).unwrap();
        assert_eq!(json["screen"], "category");
        assert_eq!(json["key"], "Books");
    }
}
