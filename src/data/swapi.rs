//! SWAPI REST client
//!
//! This module fetches starship records from the Star Wars API. Requests go
//! through a [`Transport`] so the HTTP layer can be swapped for an in-memory
//! source in tests.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Page, StarshipDetail, StarshipSummary};

/// Base URL for the public SWAPI deployment
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// Errors that can occur when fetching from the remote API
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Response body was empty or an empty JSON document
    #[error("Empty response from {0}")]
    EmptyBody(String),

    /// Response parsed but lacks the fields we need
    #[error("Invalid data structure received: {0}")]
    InvalidResponse(String),
}

/// Source of JSON documents keyed by URL
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url` and returns the parsed, non-empty JSON body
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a default reqwest client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        parse_body(url, &text)
    }
}

/// Parses a response body, rejecting blank and empty documents
pub fn parse_body(url: &str, text: &str) -> Result<Value, FetchError> {
    if text.trim().is_empty() {
        return Err(FetchError::EmptyBody(url.to_string()));
    }

    let value: Value = serde_json::from_str(text)?;
    if is_empty_document(&value) {
        return Err(FetchError::EmptyBody(url.to_string()));
    }

    Ok(value)
}

/// Whether a parsed document carries no data at all
fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Client for the SWAPI starship endpoints
///
/// Clone is cheap; the transport is shared behind an `Arc`.
#[derive(Clone)]
pub struct SwapiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl Default for SwapiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapiClient {
    /// Create a client for the public API over HTTP
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()), DEFAULT_BASE_URL)
    }

    /// Create a client with a custom transport and base URL
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The transport this client fetches through
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// URL of one page of the starship listing
    pub fn starships_page_url(&self, page: u32) -> String {
        format!("{}/starships/?page={}", self.base_url, page)
    }

    /// URL of a single starship record
    pub fn starship_url(&self, id: u64) -> String {
        format!("{}/starships/{}/", self.base_url, id)
    }

    /// Fetches every page of the starship listing
    ///
    /// Pages are requested one after another starting at page 1 until a page
    /// reports no `next`. Results keep page order.
    ///
    /// # Returns
    /// * `Ok(Vec<StarshipSummary>)` - All starships across all pages
    /// * `Err(FetchError)` - If any single page fails; no partial result
    pub async fn fetch_all_starships(&self) -> Result<Vec<StarshipSummary>, FetchError> {
        let mut all = Vec::new();
        let mut page_number = 1;

        loop {
            let url = self.starships_page_url(page_number);
            let value = self.transport.get_json(&url).await.map_err(|e| {
                warn!(page = page_number, error = %e, "starship page fetch failed");
                e
            })?;
            let page: Page<StarshipSummary> = serde_json::from_value(value)?;

            debug!(
                page = page_number,
                results = page.results.len(),
                has_next = page.next.is_some(),
                "fetched starship page"
            );

            all.extend(page.results);
            if page.next.is_none() {
                break;
            }
            page_number += 1;
        }

        info!(total = all.len(), pages = page_number, "starship listing loaded");
        Ok(all)
    }

    /// Fetches one starship record by numeric id
    ///
    /// The record must carry a non-empty `name`.
    pub async fn fetch_starship(&self, id: u64) -> Result<StarshipDetail, FetchError> {
        let url = self.starship_url(id);
        let value = self.transport.get_json(&url).await.map_err(|e| {
            warn!(id, error = %e, "starship detail fetch failed");
            e
        })?;

        let has_name = value
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.is_empty());
        if !has_name {
            return Err(FetchError::InvalidResponse(format!(
                "starship {} has no name",
                id
            )));
        }

        Ok(serde_json::from_value(value)?)
    }
}
