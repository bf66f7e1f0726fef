//! Vendor config service
//!
//! Loads a vendor's config file once per vendor (keyed by lowercased vendor
//! name) and caches the parsed entry for the lifetime of the service.
//! Concurrent first calls for the same vendor are collapsed into a single
//! load by double-checked locking; a failed load caches nothing, so the next
//! access retries from the source.

mod types;

pub use types::{ApiAccess, AuthScheme, EndpointDefinition, VendorEntryConfig};

use crate::error::{Error, Result};
use crate::loader::ConfigSource;
use crate::registry::VendorRegistry;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Queryable, cached view over per-vendor config files
pub struct VendorConfigService {
    registry: Arc<VendorRegistry>,
    source: Arc<dyn ConfigSource>,
    cache: RwLock<HashMap<String, Arc<VendorEntryConfig>>>,
}

impl VendorConfigService {
    /// Create a service over a registry and config source. Nothing is read
    /// until the first lookup.
    pub fn new(registry: Arc<VendorRegistry>, source: Arc<dyn ConfigSource>) -> Self {
        Self {
            registry,
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Connection-level settings for a vendor (base URL, auth, default
    /// pagination), loading and caching its config file on first use
    pub async fn connection_config(&self, vendor_name: &str) -> Result<Arc<VendorEntryConfig>> {
        let key = vendor_name.to_lowercase();

        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(&key) {
                return Ok(entry.clone());
            }
        }

        let mut cache = self.cache.write().await;
        // Another task may have populated the entry while we waited
        if let Some(entry) = cache.get(&key) {
            return Ok(entry.clone());
        }

        let path = self.registry.resolve(vendor_name).await?;
        let entry = Arc::new(load_vendor_entry(
            self.source.as_ref(),
            &path,
            vendor_name,
        )?);
        cache.insert(key, entry.clone());
        Ok(entry)
    }

    /// All endpoint definitions for a vendor
    pub async fn endpoints(&self, vendor_name: &str) -> Result<Vec<EndpointDefinition>> {
        Ok(self.connection_config(vendor_name).await?.endpoints.clone())
    }

    /// One endpoint by name (case-insensitive); `None` when absent
    pub async fn endpoint(
        &self,
        vendor_name: &str,
        endpoint_name: &str,
    ) -> Result<Option<EndpointDefinition>> {
        let config = self.connection_config(vendor_name).await?;
        Ok(config
            .endpoints
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(endpoint_name))
            .cloned())
    }

    /// Endpoints of a given family (case-insensitive). An empty vec, not an
    /// error, when none match.
    pub async fn endpoints_by_family(
        &self,
        vendor_name: &str,
        family: &str,
    ) -> Result<Vec<EndpointDefinition>> {
        let config = self.connection_config(vendor_name).await?;
        Ok(config
            .endpoints
            .iter()
            .filter(|e| {
                e.family
                    .as_deref()
                    .is_some_and(|f| f.eq_ignore_ascii_case(family))
            })
            .cloned()
            .collect())
    }

    /// Names of all endpoints for a vendor
    pub async fn endpoint_names(&self, vendor_name: &str) -> Result<Vec<String>> {
        Ok(self
            .endpoints(vendor_name)
            .await?
            .into_iter()
            .map(|e| e.name)
            .collect())
    }

    /// Names of a family's endpoints for a vendor
    pub async fn endpoint_names_by_family(
        &self,
        vendor_name: &str,
        family: &str,
    ) -> Result<Vec<String>> {
        Ok(self
            .endpoints_by_family(vendor_name, family)
            .await?
            .into_iter()
            .map(|e| e.name)
            .collect())
    }

    /// The registry backing this service
    pub fn registry(&self) -> &VendorRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for VendorConfigService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorConfigService")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Load a vendor's entry out of its config file.
///
/// File shape: `{ "entries": [ { "vendor", "baseURL", "apiAccess"?,
/// "pagination"?, "endpoints" }, ... ] }`. Errors name the file path and
/// vendor so misconfigurations are diagnosable from the message alone.
fn load_vendor_entry(
    source: &dyn ConfigSource,
    path: &Path,
    vendor_name: &str,
) -> Result<VendorEntryConfig> {
    let document = source.load_json(path)?;

    let entries = document.get("entries").and_then(Value::as_array).ok_or_else(|| {
        Error::config(format!(
            "Vendor file '{}' does not contain an \"entries\" array",
            path.display()
        ))
    })?;

    let entry = entries
        .iter()
        .find(|e| {
            e.get("vendor")
                .and_then(Value::as_str)
                .is_some_and(|v| v.eq_ignore_ascii_case(vendor_name))
        })
        .ok_or_else(|| {
            Error::config(format!(
                "Vendor '{vendor_name}' not found in '{}'",
                path.display()
            ))
        })?;

    if !entry.get("endpoints").is_some_and(Value::is_array) {
        return Err(Error::config(format!(
            "Vendor '{vendor_name}' in '{}' is missing an \"endpoints\" array",
            path.display()
        )));
    }

    serde_json::from_value(entry.clone()).map_err(|e| {
        Error::config(format!(
            "Malformed config for vendor '{vendor_name}' in '{}': {e}",
            path.display()
        ))
    })
}
