//! Vendor config file types

use crate::pagination::PaginationConfig;
use crate::types::Method;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Connection-level configuration for one vendor, as found in its config
/// file's `entries` array
#[derive(Debug, Clone, Deserialize)]
pub struct VendorEntryConfig {
    /// Vendor name (matched case-insensitively against the caller's)
    pub vendor: String,
    /// Base URL template; may contain `${NAME}` environment placeholders
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Credential configuration for Authorization synthesis
    #[serde(rename = "apiAccess", default)]
    pub api_access: Option<ApiAccess>,
    /// Vendor-wide default pagination, overridable per endpoint
    #[serde(default)]
    pub pagination: Option<PaginationConfig>,
    /// Callable operations for this vendor
    pub endpoints: Vec<EndpointDefinition>,
}

/// Credential configuration: which environment variables hold the user and
/// token, and an optional fixed scheme
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAccess {
    /// Fixed scheme; currently only `bearer` is recognized
    #[serde(default)]
    pub scheme: Option<AuthScheme>,
    /// Environment variable holding the user/login
    #[serde(rename = "userEnv", default)]
    pub user_env: Option<String>,
    /// Environment variable holding the token/secret
    #[serde(rename = "tokenEnv", default)]
    pub token_env: Option<String>,
}

/// Fixed authentication scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
}

/// One callable operation against a vendor
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointDefinition {
    /// Endpoint name (matched case-insensitively)
    pub name: String,
    /// Path joined onto the vendor's base URL
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Request headers; values may contain `${NAME}` placeholders
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Endpoint family for grouped lookups (e.g. "search")
    #[serde(default)]
    pub family: Option<String>,
    /// Whether the endpoint is callable; the engine refuses disabled
    /// endpoints
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Pagination override. Absent → inherit the vendor default; an explicit
    /// `null` → pagination disabled for this endpoint.
    #[serde(default, deserialize_with = "pagination_present")]
    pub pagination: Option<PaginationConfig>,
    /// Response key under which the record array is nested
    #[serde(rename = "itemsPath", default)]
    pub items_path: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Distinguishes a present-but-null `pagination` field (pagination disabled,
/// `Some(PaginationConfig::None)`) from an absent one (`None`, inherit the
/// vendor default).
fn pagination_present<'de, D>(deserializer: D) -> Result<Option<PaginationConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    PaginationConfig::deserialize(deserializer).map(Some)
}
