//! JSON configuration sources
//!
//! The registry and config services never touch the filesystem directly; they
//! read parsed JSON through the [`ConfigSource`] seam. The default
//! [`FsConfigSource`] reads files; [`MemoryConfigSource`] serves fixtures for
//! tests. Caching is not this layer's job — the services cache per key.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A source of parsed JSON documents keyed by path
pub trait ConfigSource: Send + Sync {
    /// Load and parse the JSON document at `path`
    fn load_json(&self, path: &Path) -> Result<Value>;
}

/// Filesystem-backed config source
#[derive(Debug, Clone, Copy, Default)]
pub struct FsConfigSource;

impl ConfigSource for FsConfigSource {
    fn load_json(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::config(format!("Failed to read '{}': {e}", path.display()))
            }
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::config(format!("Failed to parse JSON in '{}': {e}", path.display()))
        })
    }
}

/// In-memory config source for tests and embedded configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigSource {
    files: HashMap<PathBuf, Value>,
}

impl MemoryConfigSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under a path
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: Value) -> Self {
        self.files.insert(path.into(), content);
        self
    }

    /// Register a document under a path
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: Value) {
        self.files.insert(path.into(), content);
    }
}

impl ConfigSource for MemoryConfigSource {
    fn load_json(&self, path: &Path) -> Result<Value> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::file_not_found(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_fs_source_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"vendors": []}}"#).unwrap();

        let value = FsConfigSource.load_json(file.path()).unwrap();
        assert_eq!(value, json!({"vendors": []}));
    }

    #[test]
    fn test_fs_source_missing_file() {
        let err = FsConfigSource
            .load_json(Path::new("/nonexistent/vendors.json"))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_fs_source_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = FsConfigSource.load_json(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_memory_source() {
        let source = MemoryConfigSource::new().with_file("a.json", json!({"k": 1}));

        assert_eq!(
            source.load_json(Path::new("a.json")).unwrap(),
            json!({"k": 1})
        );
        assert!(matches!(
            source.load_json(Path::new("b.json")).unwrap_err(),
            Error::FileNotFound { .. }
        ));
    }
}
