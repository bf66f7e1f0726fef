//! Record decode pass
//!
//! A final pass over the accumulated record list for type coercions. The
//! engine runs [`PassthroughDecoder`] by default — the pass is an extension
//! point, not a required transformation. [`DateFieldDecoder`] is the one
//! built-in coercion: it normalizes vendor date strings (Jira-style
//! `2024-01-02T03:04:05.000+0000` and friends) to RFC 3339.

use crate::error::Result;
use crate::types::Record;
use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

/// A post-accumulation transformation over the retrieved records
pub trait RecordDecoder: Send + Sync {
    /// Transform the accumulated records. Called once per `get_data` call,
    /// after pagination completes.
    fn decode(&self, records: Vec<Record>) -> Result<Vec<Record>>;
}

/// The default decoder: returns records untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughDecoder;

impl RecordDecoder for PassthroughDecoder {
    fn decode(&self, records: Vec<Record>) -> Result<Vec<Record>> {
        Ok(records)
    }
}

/// Normalizes date-string fields to RFC 3339
///
/// Only the configured top-level fields are touched; values that do not parse
/// as dates are left as-is (best effort, like extraction).
#[derive(Debug, Clone, Default)]
pub struct DateFieldDecoder {
    fields: Vec<String>,
}

/// Accepted input formats, tried in order
const DATE_FORMATS: [&str; 3] = [
    // Jira/Atlassian: 2024-01-02T03:04:05.000+0000
    "%Y-%m-%dT%H:%M:%S%.3f%z",
    // No sub-second part
    "%Y-%m-%dT%H:%M:%S%z",
    // RFC 3339 with 'Z'
    "%Y-%m-%dT%H:%M:%S%.f%:z",
];

impl DateFieldDecoder {
    /// Normalize the given top-level fields on every record
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    fn normalize(&self, value: &str) -> Option<String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        for format in DATE_FORMATS {
            if let Ok(parsed) = DateTime::parse_from_str(value, format) {
                return Some(parsed.to_rfc3339_opts(SecondsFormat::Secs, true));
            }
        }
        None
    }
}

impl RecordDecoder for DateFieldDecoder {
    fn decode(&self, mut records: Vec<Record>) -> Result<Vec<Record>> {
        for record in &mut records {
            let Some(object) = record.as_object_mut() else {
                continue;
            };
            for field in &self.fields {
                if let Some(Value::String(raw)) = object.get(field) {
                    if let Some(normalized) = self.normalize(raw) {
                        object.insert(field.clone(), Value::String(normalized));
                    }
                }
            }
        }
        Ok(records)
    }
}
