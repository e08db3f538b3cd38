//! Page fetching over HTTP.
//!
//! This module performs the single outbound GET per analysis. A non-success
//! status code is not a failure here: a 404 page is still parsed and scored,
//! with the status feeding the "status healthy" check downstream. Only
//! transport-level problems (DNS, TLS, timeout, refused connections) abort
//! the analysis.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::Client;
use reqwest::redirect::Policy;
use url::Url;

use crate::{Result, SitePulseError};

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Maximum redirect hops to follow.
    pub max_redirects: usize,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 15,
            max_redirects: 5,
            user_agent: "Mozilla/5.0 (compatible; SitePulse/0.1; +https://github.com/stormlightlabs/sitepulse)"
                .to_string(),
        }
    }
}

/// The outcome of fetching a page.
///
/// Owned by the analyzer for the duration of one analysis and never shared
/// across requests. Response headers are kept with lowercase names so header
/// checks are case-insensitive.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code of the final response.
    pub status: u16,
    /// Milliseconds from sending the request to receiving response headers.
    pub elapsed_ms: u64,
    /// Raw response body.
    pub body: String,
    /// Response headers, names lowercased.
    pub headers: HashMap<String, String>,
    /// URL of the final response after redirects.
    pub final_url: String,
}

impl FetchResult {
    /// Looks up a response header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Whether the final response was served over HTTPS.
    pub fn https_used(&self) -> bool {
        self.final_url.starts_with("https://")
    }
}

/// Normalizes and validates an input URL.
///
/// Scheme-less inputs are coerced to `https://`; anything that still fails to
/// parse, or parses to a non-HTTP scheme, is rejected before any network
/// request is made.
///
/// # Example
///
/// ```rust
/// use sitepulse_core::fetch::normalize_url;
///
/// let url = normalize_url("example.com/page").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
///
/// assert!(normalize_url("ftp://example.com").is_err());
/// assert!(normalize_url("").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SitePulseError::InvalidUrl("URL must not be empty".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| SitePulseError::InvalidUrl(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SitePulseError::InvalidUrl(format!(
            "Unsupported scheme: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(SitePulseError::InvalidUrl("URL has no host".to_string()));
    }

    Ok(url)
}

/// Fetches a page and captures status, latency, body and headers.
///
/// Performs a single GET with the configured timeout and redirect limit.
/// There are no retries. The elapsed time is measured to the arrival of the
/// response headers, which approximates time-to-first-byte.
pub async fn fetch_page(url: &Url, config: &FetchConfig) -> Result<FetchResult> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .redirect(Policy::limited(config.max_redirects))
        .build()
        .map_err(SitePulseError::HttpError)?;

    let start = Instant::now();

    let response = client
        .get(url.clone())
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                SitePulseError::Timeout { timeout: config.timeout }
            } else {
                SitePulseError::HttpError(e)
            }
        })?;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let final_url = response.url().to_string();

    let mut headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value) = value.to_str() {
            headers.insert(name.as_str().to_lowercase(), value.to_string());
        }
    }

    let body = response.text().await.map_err(SitePulseError::HttpError)?;

    Ok(FetchResult { status, elapsed_ms, body, headers, final_url })
}
