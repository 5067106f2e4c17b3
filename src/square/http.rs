//! Lightweight Square HTTP client
//!
//! One client for every resource: bearer auth, JSON bodies, query strings,
//! and the cursor walk behind return-all listings.

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, trace, warn};

use super::credentials::SquareCredentials;
use crate::error::SquareError;
use crate::resource::{Method, OperationRequest};

/// Pages a single cursor walk may fetch before giving up.
const DEFAULT_MAX_PAGES: usize = 1000;

/// Mask sensitive credential values for logging
fn mask_credential(value: &str) -> String {
    if value.len() <= 8 {
        "*".repeat(value.len())
    } else {
        format!("{}...{}", &value[..4], &value[value.len() - 4..])
    }
}

/// Square HTTP client
pub struct SquareClient {
    http_client: Client,
    credentials: SquareCredentials,
    endpoint_url: Option<String>,
    max_pages: usize,
}

impl SquareClient {
    /// Create a new Square HTTP client
    pub fn new(credentials: SquareCredentials) -> Self {
        debug!(
            "Creating Square HTTP client for environment: {:?}, access_token: {}",
            credentials.environment,
            mask_credential(&credentials.access_token)
        );
        Self {
            http_client: Client::new(),
            credentials,
            endpoint_url: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Route requests to a custom base URL (tests, API-compatible gateways).
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Cap the cursor walk at a page count other than the default.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Base URL for every request; a custom endpoint wins over the
    /// environment default.
    fn endpoint(&self) -> &str {
        match &self.endpoint_url {
            Some(endpoint) => endpoint,
            None => self.credentials.environment.base_url(),
        }
    }

    /// Full URL for a request: endpoint, path, encoded query string.
    fn build_url(&self, request: &OperationRequest) -> String {
        let url = format!("{}{}", self.endpoint(), request.path);
        if request.query.is_empty() {
            return url;
        }

        let query_string: String = request
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", url, query_string)
    }

    /// Perform one request and decode the JSON response. Empty 2xx bodies
    /// decode to an empty object.
    pub async fn call(&self, request: &OperationRequest) -> Result<Value, SquareError> {
        let url = self.build_url(request);
        debug!("{} {}", request.method, url);
        trace!("Request body: {}", request.body);

        let mut builder = match request.method {
            Method::Get => self.http_client.get(&url),
            Method::Post => self.http_client.post(&url),
            Method::Put => self.http_client.put(&url),
            Method::Delete => self.http_client.delete(&url),
        };

        builder = builder
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .bearer_auth(&self.credentials.access_token);

        if !request.body.is_null() {
            builder = builder.json(&request.body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!("Response status: {}", status);
        trace!(
            "Response body (first 2000 chars): {}",
            &text[..text.len().min(2000)]
        );

        if !status.is_success() {
            warn!(
                "Square request failed: status={}, body={}",
                status,
                &text[..text.len().min(500)]
            );
            return Err(SquareError::Api { status, body: text });
        }

        if text.is_empty() {
            return Ok(json!({}));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Perform a request repeatedly, following the response cursor, and
    /// collect the named array field across pages. GET requests carry the
    /// cursor in the query string, everything else in the body.
    pub async fn call_all_items(
        &self,
        request: &OperationRequest,
        items_field: &str,
    ) -> Result<Vec<Value>, SquareError> {
        let mut request = request.clone();
        let mut all_items = Vec::new();

        for page in 1..=self.max_pages {
            let mut response = self.call(&request).await?;

            if let Some(Value::Array(items)) = response.get_mut(items_field).map(Value::take) {
                all_items.extend(items);
            }

            let cursor = response
                .get("cursor")
                .and_then(Value::as_str)
                .filter(|cursor| !cursor.is_empty());

            match cursor {
                Some(cursor) => {
                    debug!("Page {} returned a cursor, fetching the next page", page);
                    match request.method {
                        Method::Get => request.set_query("cursor", cursor),
                        _ => match &mut request.body {
                            Value::Object(body) => {
                                body.insert("cursor".to_string(), json!(cursor));
                            }
                            body => *body = json!({ "cursor": cursor }),
                        },
                    }
                }
                None => {
                    debug!(
                        "Cursor exhausted after {} page(s), collected {} item(s)",
                        page,
                        all_items.len()
                    );
                    return Ok(all_items);
                }
            }
        }

        warn!(
            "Cursor still present after {} pages, aborting the walk",
            self.max_pages
        );
        Err(SquareError::PageLimit {
            max_pages: self.max_pages,
        })
    }
}
