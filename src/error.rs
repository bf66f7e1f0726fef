//! Error types for Quarry
//!
//! This module defines the error taxonomy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Every failure is fatal to the call that raised it: the engine performs no
//! local recovery, no retries, and no backoff. Configuration, auth, and
//! pagination-mode errors are raised before any network I/O.

use thiserror::Error;

/// The main error type for Quarry
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Endpoint '{endpoint}' not found for vendor '{vendor}'")]
    EndpointNotFound { vendor: String, endpoint: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for endpoint '{endpoint}'")]
    HttpStatus { status: u16, endpoint: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Unsupported pagination mode: {mode}")]
    UnsupportedPagination { mode: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode records: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an endpoint-not-found error
    pub fn endpoint_not_found(vendor: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::EndpointNotFound {
            vendor: vendor.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, endpoint: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            endpoint: endpoint.into(),
        }
    }

    /// Create an unsupported-pagination error
    pub fn unsupported_pagination(mode: impl Into<String>) -> Self {
        Self::UnsupportedPagination { mode: mode.into() }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a file-not-found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// True for errors detected from configuration alone, before any
    /// network I/O was attempted.
    pub fn is_config_time(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::EndpointNotFound { .. }
                | Error::Auth { .. }
                | Error::UnsupportedPagination { .. }
                | Error::FileNotFound { .. }
        )
    }
}

/// Result type alias for Quarry
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::endpoint_not_found("Atlassian", "getProjects");
        assert_eq!(
            err.to_string(),
            "Endpoint 'getProjects' not found for vendor 'Atlassian'"
        );

        let err = Error::http_status(404, "getProjects");
        assert_eq!(err.to_string(), "HTTP 404 for endpoint 'getProjects'");

        let err = Error::unsupported_pagination("offset");
        assert_eq!(err.to_string(), "Unsupported pagination mode: offset");
    }

    #[test]
    fn test_is_config_time() {
        assert!(Error::config("x").is_config_time());
        assert!(Error::auth("x").is_config_time());
        assert!(Error::unsupported_pagination("offset").is_config_time());
        assert!(Error::endpoint_not_found("v", "e").is_config_time());

        assert!(!Error::http_status(500, "e").is_config_time());
    }
}
