//! Common types used throughout Quarry
//!
//! Shared type definitions and type aliases used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// One retrieved record. No schema is imposed beyond "JSON-serializable
/// object"; downstream persistence layers decide what to do with it.
pub type Record = serde_json::Value;

/// Call parameters for a retrieval: query parameters for GET endpoints,
/// the JSON body for everything else.
pub type Params = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method for an endpoint definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl Method {
    /// True for methods whose params travel as query parameters rather
    /// than as a JSON body.
    pub fn is_get(self) -> bool {
        self == Method::GET
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}
