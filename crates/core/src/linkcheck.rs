//! Same-site broken link verification.
//!
//! The one part of the pipeline beyond the page fetch that performs I/O.
//! A bounded sample of same-host links is probed concurrently with HEAD
//! requests (falling back to GET, since some servers reject HEAD). The whole
//! phase runs under its own deadline; if it expires or anything inside it
//! fails, the analysis continues with a conservative empty result rather
//! than penalizing a score it could not compute.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use reqwest::redirect::Policy;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::parse::Document;

/// Configuration for the link verification phase.
#[derive(Debug, Clone)]
pub struct LinkCheckConfig {
    /// Maximum number of same-host links to probe.
    pub sample_size: usize,
    /// Per-probe timeout in seconds (applies to HEAD and GET separately).
    pub probe_timeout: u64,
    /// Deadline in seconds for the whole verification phase.
    pub overall_timeout: u64,
    /// User-Agent sent with probes.
    pub user_agent: String,
}

impl Default for LinkCheckConfig {
    fn default() -> Self {
        Self {
            sample_size: 5,
            probe_timeout: 5,
            overall_timeout: 12,
            user_agent: "Mozilla/5.0 (compatible; SitePulse/0.1; +https://github.com/stormlightlabs/sitepulse)"
                .to_string(),
        }
    }
}

/// One link that failed verification.
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLink {
    /// The probed URL.
    pub url: String,
    /// Final HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Error classification when both probes failed outright.
    pub error_class: Option<String>,
}

/// Outcome of the verification phase.
///
/// The default (zero checked, zero broken) doubles as the conservative
/// substitute when the phase times out or errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkCheckReport {
    /// Links actually probed.
    pub checked: usize,
    /// Links that came back broken.
    pub broken: usize,
    /// Details for each broken link.
    pub broken_links: Vec<BrokenLink>,
}

/// Collects up to `limit` same-host links from the document.
///
/// Hrefs are resolved against `base`; links to other hosts, non-HTTP schemes,
/// and bare fragments are skipped. Duplicates are dropped so the same URL is
/// never probed twice.
pub fn collect_same_host_links(doc: &Document, base: &Url, limit: usize) -> Vec<String> {
    let Ok(anchors) = doc.select("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();

    for anchor in anchors {
        if links.len() >= limit {
            break;
        }

        let Some(href) = anchor.attr("href") else { continue };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let resolved = match Url::parse(href) {
            Ok(url) => url,
            Err(_) => match base.join(href) {
                Ok(url) => url,
                Err(_) => continue,
            },
        };

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }
        if resolved.host_str() != base.host_str() {
            continue;
        }

        let mut resolved = resolved;
        resolved.set_fragment(None);
        let resolved = resolved.to_string();

        if !links.contains(&resolved) {
            links.push(resolved);
        }
    }

    links
}

/// Sorts a probe error into a coarse class for reporting.
fn classify_probe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "timeout".to_string()
    } else if error.is_redirect() {
        "redirect_loop".to_string()
    } else if error.is_connect() {
        if error.to_string().contains("dns") {
            "dns".to_string()
        } else {
            "connect".to_string()
        }
    } else {
        "request".to_string()
    }
}

/// Probes one link: HEAD first, GET when HEAD fails or is rejected.
///
/// Servers that do not support HEAD answer it with 405/501 rather than a
/// transport error, so any non-success HEAD outcome is retried with GET
/// before the link is called broken.
async fn probe_link(client: Client, url: String) -> Option<BrokenLink> {
    let outcome = match client.head(&url).send().await {
        Ok(response) if response.status().as_u16() < 400 => Ok(response.status().as_u16()),
        _ => match client.get(&url).send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(e) => Err(classify_probe_error(&e)),
        },
    };

    match outcome {
        Ok(status) if status >= 400 => {
            debug!(url = %url, status, "link probe returned error status");
            Some(BrokenLink { url, status: Some(status), error_class: None })
        }
        Ok(_) => None,
        Err(class) => {
            debug!(url = %url, class = %class, "link probe failed");
            Some(BrokenLink { url, status: None, error_class: Some(class) })
        }
    }
}

/// Probes the sampled links concurrently.
///
/// Probes are unordered with respect to each other and a failed probe never
/// affects its siblings. The phase deadline discards in-flight probes and
/// yields the conservative default report.
pub async fn verify_links(links: Vec<String>, config: &LinkCheckConfig) -> LinkCheckReport {
    if links.is_empty() {
        return LinkCheckReport::default();
    }

    let client = match Client::builder()
        .timeout(Duration::from_secs(config.probe_timeout))
        .redirect(Policy::limited(5))
        .user_agent(&config.user_agent)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "could not build probe client, skipping link verification");
            return LinkCheckReport::default();
        }
    };

    let checked = links.len();
    let concurrency = config.sample_size.max(1);

    let probes = stream::iter(links)
        .map(|url| probe_link(client.clone(), url))
        .buffer_unordered(concurrency)
        .collect::<Vec<Option<BrokenLink>>>();

    let outcomes = match tokio::time::timeout(Duration::from_secs(config.overall_timeout), probes).await {
        Ok(outcomes) => outcomes,
        Err(_) => {
            warn!(seconds = config.overall_timeout, "link verification deadline exceeded");
            return LinkCheckReport::default();
        }
    };

    let broken_links: Vec<BrokenLink> = outcomes.into_iter().flatten().collect();

    LinkCheckReport { checked, broken: broken_links.len(), broken_links }
}
