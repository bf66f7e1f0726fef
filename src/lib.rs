//! # Quarry
//!
//! A generic paginated API retrieval engine. Vendors and their REST endpoints
//! are described declaratively in JSON (base URL, auth scheme, HTTP method,
//! headers, pagination strategy) and a single operation,
//! [`engine::RetrievalEngine::get_data`], services all of them: it resolves
//! the endpoint, builds the request, runs the pagination loop appropriate to
//! the endpoint, and returns a flat, normalized list of records.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quarry::{FsConfigSource, RetrievalEngine, VendorConfigService, VendorRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> quarry::Result<()> {
//!     let source = Arc::new(FsConfigSource);
//!     let registry = Arc::new(VendorRegistry::new(source.clone(), "config/vendors.json"));
//!     let config = Arc::new(VendorConfigService::new(registry, source));
//!     let engine = RetrievalEngine::new(config);
//!
//!     let params = serde_json::json!({ "expand": "lead,insight" });
//!     let projects = engine
//!         .get_data("Atlassian", "getProjects", params.as_object().unwrap())
//!         .await?;
//!
//!     println!("fetched {} projects", projects.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller ──► RetrievalEngine::get_data(vendor, endpoint, params)
//!                │
//!                ├─► VendorRegistry ──► vendor name → config file path
//!                ├─► VendorConfigService ──► EndpointDefinition + connection config
//!                ├─► request build (URL, auth header, query/body encoding)
//!                ├─► pagination loop (none | pagebean | cursor)
//!                └─► item extraction + decode pass ──► Vec<Record>
//! ```
//!
//! Configuration caches are populated once per key and never mutated; the
//! engine issues one HTTP request at a time per call and performs no retries,
//! no rate limiting, and no response caching.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// `${NAME}` environment placeholder substitution
pub mod template;

/// JSON configuration sources (filesystem / in-memory)
pub mod loader;

/// Vendor registry: vendor name → config file path
pub mod registry;

/// Per-vendor configuration service with process-lifetime caching
pub mod config;

/// Pagination strategy configuration
pub mod pagination;

/// Authorization header resolution
pub mod auth;

/// Response item extraction
pub mod extract;

/// Record decode pass (type coercions)
pub mod decode;

/// The retrieval engine itself
pub mod engine;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::VendorConfigService;
pub use engine::RetrievalEngine;
pub use error::{Error, Result};
pub use loader::{ConfigSource, FsConfigSource, MemoryConfigSource};
pub use registry::VendorRegistry;
pub use template::EnvVars;
pub use types::{Params, Record};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
