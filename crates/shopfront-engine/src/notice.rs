//! # Confirmations and Notices
//!
//! The two hooks the manager calls out through instead of talking to a UI.
//!
//! ## Interaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartManager                     Presentation                           │
//! │  ───────────                     ────────────                           │
//! │                                                                         │
//! │  clear_cart() ──► Confirm::confirm(Prompt::ClearCart) ──► yes / no     │
//! │  checkout()   ──► Confirm::confirm(Prompt::Checkout)  ──► yes / no     │
//! │                                                                         │
//! │  every outcome ──► Notify::notify(&Notice) ──► message box / log line  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// =============================================================================
// Prompt
// =============================================================================

/// A yes/no question the manager needs answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    ClearCart,
    Checkout,
    Logout,
}

impl Prompt {
    /// Dialog title.
    pub fn title(&self) -> &'static str {
        match self {
            Prompt::Logout => "Logout",
            _ => "Confirm",
        }
    }

    /// The question shown to the user.
    pub fn question(&self) -> &'static str {
        match self {
            Prompt::ClearCart => "Clear cart?",
            Prompt::Checkout => "Proceed to checkout?",
            Prompt::Logout => "Are you sure you want to logout?",
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.question())
    }
}

// =============================================================================
// Confirm
// =============================================================================

/// Answers a [`Prompt`]. `true` means the user accepted.
pub trait Confirm: Send {
    fn confirm(&mut self, prompt: Prompt) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(Prompt) -> bool + Send,
{
    fn confirm(&mut self, prompt: Prompt) -> bool {
        self(prompt)
    }
}

/// Accepts every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: Prompt) -> bool {
        true
    }
}

/// Declines every prompt. This is the manager's default, so destructive
/// operations need an explicit hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDecline;

impl Confirm for AlwaysDecline {
    fn confirm(&mut self, _prompt: Prompt) -> bool {
        false
    }
}

// =============================================================================
// Notice
// =============================================================================

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Failure,
    Info,
}

impl NoticeLevel {
    /// Dialog title for this level.
    pub fn title(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "Success",
            NoticeLevel::Failure => "Error",
            NoticeLevel::Info => "Info",
        }
    }
}

/// A user-facing message about an operation's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Failure,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Checks if this notice reports a failure.
    pub fn is_failure(&self) -> bool {
        self.level == NoticeLevel::Failure
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level.title(), self.message)
    }
}

// =============================================================================
// Notify
// =============================================================================

/// Receives every [`Notice`] the manager produces.
pub trait Notify: Send {
    fn notify(&mut self, notice: &Notice);
}

impl<F> Notify for F
where
    F: FnMut(&Notice) + Send,
{
    fn notify(&mut self, notice: &Notice) {
        self(notice)
    }
}

/// Default sink: writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notify for TracingNotifier {
    fn notify(&mut self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Failure => warn!(message = %notice.message, "Operation rejected"),
            level => info!(?level, message = %notice.message, "Notice"),
        }
    }
}

/// Collects notices in memory. Clones share the same log, so one handle
/// can go into the manager while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notify for NoticeLog {
    fn notify(&mut self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_questions() {
        assert_eq!(Prompt::ClearCart.question(), "Clear cart?");
        assert_eq!(Prompt::Checkout.to_string(), "Proceed to checkout?");
        assert_eq!(Prompt::Logout.title(), "Logout");
    }

    #[test]
    fn test_closure_confirm() {
        let mut asked = Vec::new();
        let mut hook = |p: Prompt| {
            asked.push(p);
            p == Prompt::Checkout
        };
        assert!(!hook.confirm(Prompt::ClearCart));
        assert!(hook.confirm(Prompt::Checkout));
        assert_eq!(asked, vec![Prompt::ClearCart, Prompt::Checkout]);
    }

    #[test]
    fn test_fixed_answers() {
        assert!(AlwaysConfirm.confirm(Prompt::Checkout));
        assert!(!AlwaysDecline.confirm(Prompt::Checkout));
    }

    #[test]
    fn test_notice_log_shares_between_clones() {
        let log = NoticeLog::new();
        let mut sink = log.clone();

        sink.notify(&Notice::success("Go added to cart."));
        sink.notify(&Notice::failure("Product not found."));

        assert_eq!(log.len(), 2);
        assert!(log.last().unwrap().is_failure());
        assert_eq!(log.notices()[0].message, "Go added to cart.");
    }

    #[test]
    fn test_notice_display() {
        assert_eq!(
            Notice::info("Cart is already empty.").to_string(),
            "Info: Cart is already empty."
        );
    }
}
