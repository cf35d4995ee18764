use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::HistoryResponse;
use crate::models::HistoryPage;
use crate::utils::errors::{extract_clean_error, FetchError};

/// Anything that can serve one page of transfer history.
///
/// The HTTP client is the production implementation; the controller only depends on this
/// trait so it can be driven by an in-memory source.
#[async_trait]
pub trait HistorySource: Send + Sync + 'static {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<HistoryPage, FetchError>;
}

/// Client for the bridge history service
pub struct HistoryClient {
    http_client: HttpClient,
    base_url: String,
}

impl HistoryClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.connect.ab.org";

    /// Create a client pointing at the public history service
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with custom base URL (for testing and staging)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// Create a client whose requests give up after `timeout`.
    ///
    /// A timed-out request surfaces as `FetchError::Transport` like any other
    /// connection failure.
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> FetchError {
        let body_text = response.text().await.unwrap_or_default();
        let body = extract_clean_error(&body_text);

        if status.is_server_error() {
            warn!("History service error {}: {}", status.as_u16(), body);
        } else {
            warn!("History request rejected with {}: {}", status.as_u16(), body);
        }

        FetchError::Status {
            status: status.as_u16(),
            body,
        }
    }

    /// GET /v1/history?page_id={page}&page_size={page_size}
    ///
    /// Issues exactly one request and never retries.
    ///
    /// # Returns
    /// * `Ok(HistoryPage)` - Records plus validated pagination counts
    /// * `Err(FetchError)` - Transport failure, non-2xx status, or a body that does not parse
    pub async fn fetch_page(&self, page: u32, page_size: u32) -> Result<HistoryPage, FetchError> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let url = format!("{}/v1/history", self.base_url.trim_end_matches('/'));

        debug!("GET {} page_id={} page_size={}", url, page, page_size);

        let response = self
            .http_client
            .get(&url)
            .headers(Self::create_headers())
            .query(&[("page_id", page), ("page_size", page_size)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("Failed to read response body: {}", e)))?;

        let parsed: HistoryResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Undecodable history body for page {}: {}", page, e);
            FetchError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        if let Some((echo_page, echo_size)) = parsed.echoed_position() {
            if echo_page != u64::from(page) || echo_size != u64::from(page_size) {
                warn!(
                    "History service answered page {} size {} for request page {} size {}",
                    echo_page, echo_size, page, page_size
                );
            }
        }

        let page = parsed.into_page(page, page_size).map_err(|e| {
            warn!("Rejecting history page: {}", e);
            e
        })?;

        debug!(
            "Fetched {} records (total pages {}, total history {})",
            page.records.len(),
            page.total_pages,
            page.total_history
        );

        Ok(page)
    }
}

impl Default for HistoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistorySource for HistoryClient {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<HistoryPage, FetchError> {
        HistoryClient::fetch_page(self, page, page_size).await
    }
}
