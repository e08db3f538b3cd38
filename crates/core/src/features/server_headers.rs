//! Server configuration signals derived from response headers.

use serde::Serialize;

use crate::Result;
use crate::fetch::FetchResult;

/// How well the server is configured for content delivery.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerConfig {
    /// The `Content-Type` header value.
    pub content_type: Option<String>,
    /// Whether the content type declares a charset.
    pub has_charset: bool,
    /// The `Content-Encoding` value when compression is active.
    pub compression: Option<String>,
    /// Whether a `Cache-Control` header is present.
    pub has_cache_control: bool,
    /// Whether the `Server` header leaks a software version.
    pub server_disclosure: bool,
    /// Sub-score, 0-100.
    pub score: u8,
}

/// Scores server delivery configuration from the page response headers.
pub fn extract_server_config(fetch: &FetchResult) -> Result<ServerConfig> {
    let content_type = fetch.header("content-type").map(str::to_string);
    let has_charset = content_type
        .as_deref()
        .map(|ct| ct.to_lowercase().contains("charset="))
        .unwrap_or(false);

    let compression = fetch
        .header("content-encoding")
        .filter(|enc| {
            let enc = enc.to_lowercase();
            enc.contains("gzip") || enc.contains("br") || enc.contains("zstd") || enc.contains("deflate")
        })
        .map(str::to_string);

    let has_cache_control = fetch.header("cache-control").is_some();

    // "nginx/1.24.0" discloses a version; "nginx" alone does not.
    let server_disclosure = fetch
        .header("server")
        .map(|s| s.contains('/') && s.chars().any(|c| c.is_ascii_digit()))
        .unwrap_or(false);

    let mut score: i32 = 100;
    if content_type.is_none() {
        score -= 20;
    }
    if !has_charset {
        score -= 20;
    }
    if compression.is_none() {
        score -= 20;
    }
    if !has_cache_control {
        score -= 20;
    }
    if server_disclosure {
        score -= 20;
    }

    Ok(ServerConfig {
        content_type,
        has_charset,
        compression,
        has_cache_control,
        server_disclosure,
        score: score.max(0) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fetch_with(headers: &[(&str, &str)]) -> FetchResult {
        let map: HashMap<String, String> = headers
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_string()))
            .collect();

        FetchResult {
            status: 200,
            elapsed_ms: 100,
            body: String::new(),
            headers: map,
            final_url: "https://example.com/".to_string(),
        }
    }

    #[test]
    fn test_well_configured_server() {
        let fetch = fetch_with(&[
            ("content-type", "text/html; charset=utf-8"),
            ("content-encoding", "gzip"),
            ("cache-control", "max-age=3600"),
            ("server", "nginx"),
        ]);
        let config = extract_server_config(&fetch).unwrap();

        assert!(config.has_charset);
        assert_eq!(config.compression, Some("gzip".to_string()));
        assert!(!config.server_disclosure);
        assert_eq!(config.score, 100);
    }

    #[test]
    fn test_version_disclosure_penalized() {
        let fetch = fetch_with(&[
            ("content-type", "text/html; charset=utf-8"),
            ("content-encoding", "br"),
            ("cache-control", "no-cache"),
            ("server", "Apache/2.4.57"),
        ]);
        let config = extract_server_config(&fetch).unwrap();

        assert!(config.server_disclosure);
        assert_eq!(config.score, 80);
    }

    #[test]
    fn test_bare_response() {
        let fetch = fetch_with(&[]);
        let config = extract_server_config(&fetch).unwrap();

        assert_eq!(config.content_type, None);
        assert_eq!(config.score, 20);
    }
}
