//! Vendor registry resolver
//!
//! Maps vendor names to their per-vendor config file paths. The registry file
//! is loaded lazily on the first `resolve` call and held for the lifetime of
//! the registry object; later calls never re-read it. A failed load is not
//! cached — the next call retries from the source.

mod types;

pub use types::VendorRegistryEntry;

use crate::error::{Error, Result};
use crate::loader::ConfigSource;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resolver for the top-level vendor registry file
///
/// Registry file shape:
/// `{ "vendors": [ { "vendorName": "...", "configFilePath": "..." }, ... ] }`
pub struct VendorRegistry {
    source: Arc<dyn ConfigSource>,
    path: PathBuf,
    entries: RwLock<Option<Vec<VendorRegistryEntry>>>,
}

impl VendorRegistry {
    /// Create a registry over a config source and registry file path.
    /// Nothing is read until the first lookup.
    pub fn new(source: Arc<dyn ConfigSource>, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: path.into(),
            entries: RwLock::new(None),
        }
    }

    /// Resolve a vendor name (case-insensitive) to its config file path
    pub async fn resolve(&self, vendor_name: &str) -> Result<PathBuf> {
        self.with_entries(|entries| {
            entries
                .iter()
                .find(|e| e.vendor_name.eq_ignore_ascii_case(vendor_name))
                .map(|e| PathBuf::from(&e.config_file_path))
                .ok_or_else(|| {
                    Error::config(format!(
                        "Vendor '{vendor_name}' not found in registry '{}'",
                        self.path.display()
                    ))
                })
        })
        .await
    }

    /// Names of all configured vendors, in registry order
    pub async fn vendor_names(&self) -> Result<Vec<String>> {
        self.with_entries(|entries| Ok(entries.iter().map(|e| e.vendor_name.clone()).collect()))
            .await
    }

    /// Run `f` against the loaded entries, loading them first if needed.
    async fn with_entries<T>(&self, f: impl FnOnce(&[VendorRegistryEntry]) -> Result<T>) -> Result<T> {
        {
            let entries = self.entries.read().await;
            if let Some(entries) = entries.as_ref() {
                return f(entries);
            }
        }

        let mut slot = self.entries.write().await;
        // Another task may have loaded while we waited for the write lock
        if slot.is_none() {
            *slot = Some(load_registry(self.source.as_ref(), &self.path)?);
        }
        f(slot.as_deref().unwrap_or_default())
    }
}

impl std::fmt::Debug for VendorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorRegistry")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Load and validate the registry file. A malformed file fails here, at load
/// time, not per lookup.
fn load_registry(source: &dyn ConfigSource, path: &Path) -> Result<Vec<VendorRegistryEntry>> {
    let document = source.load_json(path)?;

    let vendors = document.get("vendors").and_then(Value::as_array).ok_or_else(|| {
        Error::config(format!(
            "Registry file '{}' does not contain a \"vendors\" array",
            path.display()
        ))
    })?;

    vendors
        .iter()
        .map(|v| {
            serde_json::from_value::<VendorRegistryEntry>(v.clone()).map_err(|e| {
                Error::config(format!(
                    "Malformed vendor entry in registry '{}': {e}",
                    path.display()
                ))
            })
        })
        .collect()
}
