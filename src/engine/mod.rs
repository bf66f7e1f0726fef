//! The retrieval engine
//!
//! One public operation, [`RetrievalEngine::get_data`], services every
//! configured endpoint: resolve the endpoint definition, build the request,
//! run the pagination loop the endpoint calls for, extract the records from
//! each page, and run the decode pass over the accumulated list.
//!
//! Pages are fetched strictly sequentially and records are appended in fetch
//! order. Any non-2xx response aborts the whole call with no partial results
//! and no retries.

mod request;

pub use request::{build_request, RequestDescriptor};

use crate::config::VendorConfigService;
use crate::decode::{PassthroughDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::extract::extract_items;
use crate::pagination::{CursorConfig, PageBeanConfig, PaginationConfig};
use crate::template::EnvVars;
use crate::types::{Params, Record};
use request::{merge_missing_query, query_param_u64, remove_query_param, set_query_param};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Retrieves record collections from declaratively configured REST endpoints
pub struct RetrievalEngine {
    client: reqwest::Client,
    config: Arc<VendorConfigService>,
    env: EnvVars,
    decoder: Box<dyn RecordDecoder>,
}

impl RetrievalEngine {
    /// Create an engine over a config service, reading placeholders from the
    /// process environment and running the passthrough decoder.
    pub fn new(config: Arc<VendorConfigService>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            env: EnvVars::from_process(),
            decoder: Box::new(PassthroughDecoder),
        }
    }

    /// Use an explicit environment map instead of the process environment
    pub fn with_env(mut self, env: EnvVars) -> Self {
        self.env = env;
        self
    }

    /// Use a pre-configured HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Use a custom decode pass
    pub fn with_decoder(mut self, decoder: Box<dyn RecordDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Retrieve every record the named endpoint yields for `params`.
    ///
    /// Runs the full pipeline: endpoint resolution, request construction,
    /// the endpoint's pagination loop, per-page item extraction, and the
    /// decode pass. Configuration, auth, and pagination-mode failures are
    /// raised before any network I/O.
    pub async fn get_data(
        &self,
        vendor: &str,
        endpoint_name: &str,
        params: &Params,
    ) -> Result<Vec<Record>> {
        let connection = self.config.connection_config(vendor).await?;
        let endpoint = self
            .config
            .endpoint(vendor, endpoint_name)
            .await?
            .ok_or_else(|| Error::endpoint_not_found(vendor, endpoint_name))?;

        if !endpoint.enabled {
            return Err(Error::config(format!(
                "Endpoint '{}' for vendor '{vendor}' is disabled",
                endpoint.name
            )));
        }

        let pagination =
            PaginationConfig::resolve(endpoint.pagination.as_ref(), connection.pagination.as_ref());
        let request = build_request(&connection, &endpoint, params, &self.env)?;

        debug!(
            vendor,
            endpoint = %endpoint.name,
            mode = pagination.mode(),
            url = %request.url,
            "retrieving"
        );

        let items_path = endpoint.items_path.as_deref();
        let records = match &pagination {
            PaginationConfig::None => self.fetch_single(&request, items_path).await?,
            PaginationConfig::PageBean(config) => {
                self.fetch_pagebean(&request, config, items_path).await?
            }
            PaginationConfig::Cursor(config) => {
                self.fetch_cursor(&request, config, items_path).await?
            }
            PaginationConfig::Offset(_) => {
                return Err(Error::unsupported_pagination("offset"));
            }
        };

        debug!(
            vendor,
            endpoint = %endpoint.name,
            records = records.len(),
            "retrieval complete"
        );

        self.decoder.decode(records)
    }

    /// Issue one HTTP request and parse the JSON body. Non-2xx fails the call.
    async fn fetch_page(&self, request: &RequestDescriptor, url: Url) -> Result<Value> {
        debug!(method = %request.method, %url, endpoint = %request.endpoint, "fetching page");

        let mut builder = self.client.request(request.method.clone(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                endpoint = %request.endpoint,
                "request failed"
            );
            return Err(Error::http_status(status.as_u16(), &request.endpoint));
        }

        Ok(response.json().await?)
    }

    /// No pagination: exactly one request. An array body yields one record
    /// per element, anything else goes through extraction whole.
    async fn fetch_single(
        &self,
        request: &RequestDescriptor,
        items_path: Option<&str>,
    ) -> Result<Vec<Record>> {
        let payload = self.fetch_page(request, request.url.clone()).await?;
        let pages = match payload {
            Value::Array(elements) => elements,
            other => vec![other],
        };

        let mut records = Vec::new();
        for page in &pages {
            records.extend(extract_items(page, items_path));
        }
        Ok(records)
    }

    /// Page-bean loop: advance `startAt` (or follow `nextPage`) until the
    /// response says `isLast`, the total is reached, or a page comes back
    /// short.
    async fn fetch_pagebean(
        &self,
        request: &RequestDescriptor,
        config: &PageBeanConfig,
        items_path: Option<&str>,
    ) -> Result<Vec<Record>> {
        let mut url = request.url.clone();
        if query_param_u64(&url, "startAt").is_none() {
            set_query_param(&mut url, "startAt", &config.start_at.to_string());
        }
        if let Some(max_results) = config.max_results {
            if query_param_u64(&url, "maxResults").is_none() {
                set_query_param(&mut url, "maxResults", &max_results.to_string());
            }
        }
        // Server-provided nextPage URLs may drop the caller's parameters;
        // keep the first URL around to merge them back in
        let original = url.clone();

        let mut records = Vec::new();
        loop {
            let payload = self.fetch_page(request, url.clone()).await?;
            let page = extract_items(&payload, items_path);
            let page_len = page.len() as u64;
            records.extend(page);

            if payload.get("isLast").and_then(Value::as_bool) == Some(true) {
                break;
            }

            if let Some(next) = payload.get("nextPage").and_then(Value::as_str) {
                let mut next_url = Url::parse(next)?;
                merge_missing_query(&mut next_url, &original);
                url = next_url;
                continue;
            }

            let start_at = payload
                .get("startAt")
                .and_then(Value::as_u64)
                .or_else(|| query_param_u64(&url, "startAt"))
                .unwrap_or(0);
            let step = payload
                .get("maxResults")
                .and_then(Value::as_u64)
                .or(config.max_results)
                .unwrap_or(page_len);

            // A short or empty page means the server ran out of records even
            // if it never said so explicitly
            if step == 0 || page_len < step {
                break;
            }

            let next_start = start_at + step;
            if let Some(total) = payload.get("total").and_then(Value::as_u64) {
                if next_start >= total {
                    break;
                }
            }

            set_query_param(&mut url, "startAt", &next_start.to_string());
        }

        Ok(records)
    }

    /// Cursor loop: carry the continuation token forward, continue only
    /// while the response's last-page field is strictly `false`.
    async fn fetch_cursor(
        &self,
        request: &RequestDescriptor,
        config: &CursorConfig,
        items_path: Option<&str>,
    ) -> Result<Vec<Record>> {
        let mut url = request.url.clone();
        set_query_param(
            &mut url,
            &config.page_size_field,
            &config.default_page_size.to_string(),
        );

        let mut token = config.initial_token.clone();
        let mut records = Vec::new();
        loop {
            match &token {
                Some(value) => set_query_param(&mut url, &config.next_token_field, value),
                None => remove_query_param(&mut url, &config.next_token_field),
            }

            let payload = self.fetch_page(request, url.clone()).await?;
            records.extend(extract_items(&payload, items_path));

            if payload.get(&config.last_field) != Some(&Value::Bool(false)) {
                break;
            }

            token = payload
                .get(&config.next_token_field)
                .and_then(Value::as_str)
                .map(String::from);
        }

        Ok(records)
    }
}

impl std::fmt::Debug for RetrievalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
