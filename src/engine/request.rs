//! Request construction
//!
//! Builds one [`RequestDescriptor`] per call from the vendor's connection
//! config, the endpoint definition, and the caller's params. Pagination loops
//! reuse the descriptor as a template, swapping the URL per page.

use crate::auth::resolve_authorization;
use crate::config::{EndpointDefinition, VendorEntryConfig};
use crate::error::Result;
use crate::template::{substitute, EnvVars};
use crate::types::Params;
use serde_json::Value;
use url::Url;

/// One fully-built HTTP request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Full URL including query parameters
    pub url: Url,
    /// HTTP method
    pub method: reqwest::Method,
    /// Headers, in insertion order, after placeholder substitution
    pub headers: Vec<(String, String)>,
    /// JSON body for non-GET requests
    pub body: Option<Value>,
    /// Endpoint name, carried for error reporting
    pub endpoint: String,
}

/// Build the request descriptor for one `get_data` call.
pub fn build_request(
    connection: &VendorEntryConfig,
    endpoint: &EndpointDefinition,
    params: &Params,
    env: &EnvVars,
) -> Result<RequestDescriptor> {
    // Base URL placeholders substitute best-effort: unset names become the
    // empty string, the join below then surfaces any resulting nonsense as
    // an InvalidUrl error.
    let base_url = substitute(&connection.base_url, env);
    let mut url = Url::parse(&base_url)?.join(&endpoint.path)?;

    if endpoint.method.is_get() {
        append_query_params(&mut url, params);
    }

    let mut headers = Vec::with_capacity(endpoint.headers.len() + 2);
    let mut configured_auth = None;
    let mut has_content_type = false;
    for (name, value) in &endpoint.headers {
        if name.eq_ignore_ascii_case("authorization") {
            configured_auth = Some(value.as_str());
            continue;
        }
        if name.eq_ignore_ascii_case("content-type") {
            has_content_type = true;
        }
        headers.push((name.clone(), substitute(value, env)));
    }

    let authorization =
        resolve_authorization(configured_auth, connection.api_access.as_ref(), env)?;
    headers.push(("Authorization".to_string(), authorization));

    let body = if endpoint.method.is_get() {
        None
    } else {
        if !has_content_type {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        Some(Value::Object(params.clone()))
    };

    Ok(RequestDescriptor {
        url,
        method: endpoint.method.into(),
        headers,
        body,
        endpoint: endpoint.name.clone(),
    })
}

/// Encode call params into query parameters.
///
/// Arrays produce one repeated parameter per element (order preserved),
/// objects are JSON-serialized into a single value, scalars are stringified,
/// and nulls are omitted.
fn append_query_params(url: &mut Url, params: &Params) {
    let mut pairs = url.query_pairs_mut();
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.append_pair(key, &scalar_string(item));
                }
            }
            Value::Object(_) => {
                pairs.append_pair(key, &value.to_string());
            }
            _ => {
                pairs.append_pair(key, &scalar_string(value));
            }
        }
    }
    drop(pairs);
    // An empty query set leaves a trailing '?'; strip it
    if url.query() == Some("") {
        url.set_query(None);
    }
}

/// Stringify a JSON value for a query parameter
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Objects and arrays nested inside an array value are serialized
        other => other.to_string(),
    }
}

/// Replace (or insert) one query parameter, preserving the others.
pub fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let others: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != name)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.set_query(None);
    let mut pairs = url.query_pairs_mut();
    for (k, v) in &others {
        pairs.append_pair(k, v);
    }
    pairs.append_pair(name, value);
}

/// Remove one query parameter if present.
pub fn remove_query_param(url: &mut Url, name: &str) {
    let others: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != name)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.set_query(None);
    if others.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for (k, v) in &others {
        pairs.append_pair(k, v);
    }
}

/// Merge into `url` every query parameter from `original` whose name is not
/// already present on `url`. Used when following a server-provided `nextPage`
/// URL that dropped the caller's parameters.
pub fn merge_missing_query(url: &mut Url, original: &Url) {
    let existing: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
    let missing: Vec<(String, String)> = original
        .query_pairs()
        .filter(|(k, _)| !existing.iter().any(|e| e == k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if missing.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for (k, v) in &missing {
        pairs.append_pair(k, v);
    }
}

/// Read a query parameter's first value, parsed as u64.
pub fn query_param_u64(url: &Url, name: &str) -> Option<u64> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .and_then(|(_, v)| v.parse().ok())
}
