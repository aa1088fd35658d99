//! # Catalog Store
//!
//! The `CatalogStore` trait and its two implementations.
//!
//! ## Read Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogStore::load()                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read() ──► Ok(catalog) ──► validate_catalog() ──► warn per issue      │
//! │       │                                                │                │
//! │       │                                                ▼                │
//! │       │                                         return catalog          │
//! │       ▼                                                                 │
//! │  Err(e) ──► warn!("...using empty catalog") ──► Catalog::new()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty catalog is a safe degraded state: every lookup downstream just
//! reports "not found".

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use shopfront_core::validation::validate_catalog;
use shopfront_core::Catalog;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Indentation used by the catalog file.
pub const DEFAULT_INDENT: usize = 4;

// =============================================================================
// Trait
// =============================================================================

/// Persistence for the product catalog.
pub trait CatalogStore {
    /// Reads the persisted catalog.
    fn read(&self) -> StoreResult<Catalog>;

    /// Overwrites the persisted catalog.
    fn save(&self, catalog: &Catalog) -> StoreResult<()>;

    /// Reads the catalog, falling back to an empty one on any failure.
    fn load(&self) -> Catalog {
        match self.read() {
            Ok(catalog) => {
                for issue in validate_catalog(&catalog) {
                    warn!(
                        category = %issue.category,
                        product_id = issue.product_id,
                        error = %issue.error,
                        "Catalog record failed validation"
                    );
                }
                catalog
            }
            Err(e) => {
                warn!(error = %e, "Failed to read catalog, using empty catalog");
                Catalog::new()
            }
        }
    }
}

impl<T: CatalogStore + ?Sized> CatalogStore for &T {
    fn read(&self) -> StoreResult<Catalog> {
        (**self).read()
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        (**self).save(catalog)
    }
}

impl<T: CatalogStore + ?Sized> CatalogStore for Box<T> {
    fn read(&self) -> StoreResult<Catalog> {
        (**self).read()
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        (**self).save(catalog)
    }
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Catalog stored as a JSON document on disk.
///
/// ## Atomic Save
/// ```text
/// products.json.tmp  ◄── write + fsync
///        │
///        ▼ rename (atomic on the same filesystem)
/// products.json
/// ```
/// A crash before the rename leaves the old file intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    indent: usize,
}

impl JsonFileStore {
    /// Creates a store for `path` with the default 4-space indentation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            indent: DEFAULT_INDENT,
        }
    }

    /// Overrides the indentation width used on save.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "catalog".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn encode(&self, catalog: &Catalog) -> StoreResult<Vec<u8>> {
        let indent = vec![b' '; self.indent];
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        catalog
            .serialize(&mut serializer)
            .map_err(StoreError::Serialize)?;
        Ok(buf)
    }
}

impl CatalogStore for JsonFileStore {
    fn read(&self) -> StoreResult<Catalog> {
        debug!(path = ?self.path, "Reading catalog");

        let file = File::open(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let catalog: Catalog =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            categories = catalog.len(),
            products = catalog.product_count(),
            "Catalog read"
        );
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        let bytes = self.encode(catalog)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.temp_path();
        let write_tmp = || -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()
        };

        if let Err(e) = write_tmp() {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&tmp, e));
        }

        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::io(&self.path, e)
        })?;

        info!(path = ?self.path, products = catalog.product_count(), "Catalog saved");
        Ok(())
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory catalog store for tests and demos.
///
/// Counts reads and writes, and can be told to fail either one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    catalog: Mutex<Catalog>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Creates a store holding `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        MemoryStore {
            catalog: Mutex::new(catalog),
            ..Self::default()
        }
    }

    /// Replaces the stored catalog without counting a write, as if another
    /// process edited the file.
    pub fn replace(&self, catalog: Catalog) {
        *self.lock() = catalog;
    }

    /// Copy of the stored catalog, without counting a read.
    pub fn snapshot(&self) -> Catalog {
        self.lock().clone()
    }

    /// Number of `read` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `save` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes subsequent reads fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent saves fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Catalog> {
        self.catalog
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CatalogStore for MemoryStore {
    fn read(&self) -> StoreResult<Catalog> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated read failure".into()));
        }
        Ok(self.snapshot())
    }

    fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated write failure".into()));
        }
        *self.lock() = catalog.clone();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
