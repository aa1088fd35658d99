//! # Engine Error Types
//!
//! Errors surfaced by the cart manager and its configuration.
//!
//! Cart rules surface as `Core`, a failed checkout save as `Store`, and
//! config problems as `Config`, `Io` or `Toml*`.

use shopfront_core::CoreError;
use shopfront_store::StoreError;
use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
///
/// Cart rule violations pass through unchanged as `Core`, so their
/// `Display` text is the user-facing message.
#[derive(Debug, Error)]
pub enum EngineError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// A cart or checkout rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The record store failed while committing a checkout.
    #[error("Failed to save catalog: {0}")]
    Store(#[from] StoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storefront configuration.
    #[error("Invalid storefront configuration: {0}")]
    Config(String),

    /// Config file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `StorefrontConfig`.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl EngineError {
    /// The wrapped domain error, if any.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            EngineError::Core(e) => Some(e),
            _ => None,
        }
    }

    /// Checks if the user can act on this error (as opposed to an
    /// environment or configuration fault).
    pub fn is_user_facing(&self) -> bool {
        matches!(self, EngineError::Core(_))
    }
}
