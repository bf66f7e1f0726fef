//! Pagination config types and their wire-shape inference

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Effective pagination strategy for one call
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PaginationConfig {
    /// No pagination: exactly one HTTP call
    #[default]
    None,

    /// Page-oriented protocol using `startAt` / `maxResults` / `total` /
    /// `isLast` / `nextPage` response fields (Jira-style page beans)
    PageBean(PageBeanConfig),

    /// Opaque continuation-token protocol
    Cursor(CursorConfig),

    /// Incrementing-offset protocol. Declared in the config schema but not
    /// executed: resolving to this mode fails with `UnsupportedPagination`.
    Offset(OffsetConfig),
}

impl PaginationConfig {
    /// Resolve the effective strategy for a call: endpoint override first,
    /// then vendor default, then `None`.
    pub fn resolve(
        endpoint_override: Option<&PaginationConfig>,
        vendor_default: Option<&PaginationConfig>,
    ) -> PaginationConfig {
        endpoint_override
            .or(vendor_default)
            .cloned()
            .unwrap_or_default()
    }

    /// Short mode name for logging and errors
    pub fn mode(&self) -> &'static str {
        match self {
            PaginationConfig::None => "none",
            PaginationConfig::PageBean(_) => "pagebean",
            PaginationConfig::Cursor(_) => "cursor",
            PaginationConfig::Offset(_) => "offset",
        }
    }
}

/// Page-bean pagination parameters
///
/// The response fields (`startAt`, `maxResults`, `total`, `isLast`,
/// `nextPage`) are fixed by the protocol; the config only seeds the request
/// side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageBeanConfig {
    /// Initial page offset when the caller does not pass one
    #[serde(rename = "startAt", default)]
    pub start_at: u64,
    /// Requested page size; when absent the server's observed page size
    /// drives the advance
    #[serde(rename = "maxResults", default)]
    pub max_results: Option<u64>,
}

/// Cursor pagination parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Token for the first page; `null` requests the first page without a
    /// token parameter
    #[serde(rename = "initialToken")]
    pub initial_token: Option<String>,
    /// Field name used both for the token query parameter and for reading
    /// the next token out of each response
    #[serde(rename = "nextTokenField")]
    pub next_token_field: String,
    /// Query parameter carrying the page size
    #[serde(rename = "pageSizeField")]
    pub page_size_field: String,
    /// Page size sent on every request
    #[serde(rename = "defaultPageSize")]
    pub default_page_size: u64,
    /// Response field signalling the last page; the loop continues only
    /// while this field is strictly `false`
    #[serde(rename = "lastField", default = "default_last_field")]
    pub last_field: String,
}

fn default_last_field() -> String {
    "isLast".to_string()
}

/// Offset pagination parameters (parsed, never executed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetConfig {
    /// Query parameter carrying the offset
    #[serde(rename = "offsetField")]
    pub offset_field: String,
    /// Query parameter carrying the page size
    #[serde(rename = "limitField")]
    pub limit_field: String,
    /// Page size sent on every request
    #[serde(rename = "defaultLimit")]
    pub default_limit: u64,
}

impl<'de> Deserialize<'de> for PaginationConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            // An explicit null disables pagination
            Value::Null => Ok(PaginationConfig::None),

            Value::String(s) if s.eq_ignore_ascii_case("none") => Ok(PaginationConfig::None),
            Value::String(s) => Err(D::Error::custom(format!(
                "unrecognized pagination mode '{s}'"
            ))),

            Value::Object(map) => {
                if let Some(cursor) = map.get("cursor") {
                    let config: CursorConfig = serde_json::from_value(cursor.clone())
                        .map_err(|e| D::Error::custom(format!("invalid cursor pagination: {e}")))?;
                    Ok(PaginationConfig::Cursor(config))
                } else if let Some(offset) = map.get("offset") {
                    let config: OffsetConfig = serde_json::from_value(offset.clone())
                        .map_err(|e| D::Error::custom(format!("invalid offset pagination: {e}")))?;
                    Ok(PaginationConfig::Offset(config))
                } else {
                    // No shape marker: a pagebean-style object (implicit mode)
                    let config: PageBeanConfig =
                        serde_json::from_value(Value::Object(map)).map_err(|e| {
                            D::Error::custom(format!("invalid pagebean pagination: {e}"))
                        })?;
                    Ok(PaginationConfig::PageBean(config))
                }
            }

            other => Err(D::Error::custom(format!(
                "pagination must be \"none\", null, or an object, got {other}"
            ))),
        }
    }
}
