//! # Storefront Configuration
//!
//! Where the catalog lives and how it is written.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_CATALOG_PATH=./data/products.json                        │
//! │     SHOPFRONT_INDENT=2                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shopfront/shopfront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shopfront.shopfront/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir/products.json, indent 4                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopfront.toml
//! [store]
//! catalog_path = "products.json"
//! indent = 4
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shopfront_store::{JsonFileStore, DEFAULT_INDENT};
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};

/// Largest accepted JSON indent.
pub const MAX_INDENT: usize = 8;

/// Catalog file name used when no path is configured.
pub const CATALOG_FILE_NAME: &str = "products.json";

// =============================================================================
// Sections
// =============================================================================

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Catalog file. `None` means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Spaces per indent level when saving.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            catalog_path: None,
            indent: default_indent(),
        }
    }
}

// =============================================================================
// StorefrontConfig
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,
}

impl StorefrontConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, then applies environment overrides.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> EngineResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like [`load`](Self::load), but falls back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> EngineResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| EngineError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Checks value ranges.
    pub fn validate(&self) -> EngineResult<()> {
        if self.store.indent > MAX_INDENT {
            return Err(EngineError::Config(format!(
                "indent must be at most {}, got {}",
                MAX_INDENT, self.store.indent
            )));
        }

        if let Some(path) = &self.store.catalog_path {
            if path.as_os_str().is_empty() {
                return Err(EngineError::Config("catalog_path cannot be empty".into()));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("SHOPFRONT_CATALOG_PATH") {
            debug!(%path, "Overriding catalog path from env");
            self.store.catalog_path = Some(PathBuf::from(path));
        }

        if let Ok(indent) = std::env::var("SHOPFRONT_INDENT") {
            match indent.parse() {
                Ok(indent) => self.store.indent = indent,
                Err(_) => warn!(%indent, "Ignoring invalid SHOPFRONT_INDENT"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.config_dir().join("shopfront.toml"))
    }

    /// Resolved catalog file path.
    ///
    /// Falls back to the platform data directory, then to the working
    /// directory when no home directory can be determined.
    pub fn catalog_path(&self) -> PathBuf {
        if let Some(path) = &self.store.catalog_path {
            return path.clone();
        }

        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.data_dir().join(CATALOG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CATALOG_FILE_NAME))
    }

    /// Record store for the configured catalog file.
    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::new(self.catalog_path()).with_indent(self.store.indent)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
