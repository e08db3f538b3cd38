//! The analysis pipeline.
//!
//! One [`Analyzer::analyze`] call performs exactly one page fetch, parses the
//! body, runs the full extractor battery, probes a bounded sample of
//! same-host links, and folds everything into an [`AnalysisReport`]. Given
//! the same body and the same probe outcomes, the rest of the pipeline is
//! pure: [`Analyzer::analyze_document`] exposes that synchronous remainder
//! directly so callers can score saved HTML without any network.

use tracing::{debug, info};
use url::Url;

use crate::Result;
use crate::features::FeatureSet;
use crate::fetch::{FetchConfig, FetchResult, fetch_page, normalize_url};
use crate::issues::derive_issues;
use crate::linkcheck::{LinkCheckConfig, LinkCheckReport, collect_same_host_links, verify_links};
use crate::parse::Document;
use crate::report::{AnalysisReport, FetchMetrics};
use crate::scoring::{Signals, Tier, score};

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Page fetch settings.
    pub fetch: FetchConfig,
    /// Link verification settings.
    pub links: LinkCheckConfig,
}

impl AnalyzerConfig {
    /// Creates a builder for custom configuration.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for AnalyzerConfig.
///
/// # Example
///
/// ```rust
/// use sitepulse_core::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .fetch_timeout(10)
///     .link_sample(3)
///     .build();
///
/// assert_eq!(config.fetch.timeout, 10);
/// assert_eq!(config.links.sample_size, 3);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the page fetch timeout in seconds.
    pub fn fetch_timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the maximum redirect hops for the page fetch.
    pub fn max_redirects(mut self, value: usize) -> Self {
        self.config.fetch.max_redirects = value;
        self
    }

    /// Sets the User-Agent for the page fetch and the link probes.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.config.fetch.user_agent = value.clone();
        self.config.links.user_agent = value;
        self
    }

    /// Sets how many same-host links to probe.
    pub fn link_sample(mut self, value: usize) -> Self {
        self.config.links.sample_size = value;
        self
    }

    /// Sets the per-probe timeout in seconds.
    pub fn probe_timeout(mut self, value: u64) -> Self {
        self.config.links.probe_timeout = value;
        self
    }

    /// Sets the deadline in seconds for the whole link verification phase.
    pub fn link_deadline(mut self, value: u64) -> Self {
        self.config.links.overall_timeout = value;
        self
    }

    /// Builds the final configuration.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The analysis engine.
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer with default configuration.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Creates an analyzer with custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Fetches and analyzes a page.
    ///
    /// The input URL is normalized first (scheme-less inputs become HTTPS)
    /// and only transport-level fetch failures abort the analysis; an error
    /// status page is still parsed and scored.
    pub async fn analyze(&self, url: &str, tier: Tier) -> Result<AnalysisReport> {
        let url = normalize_url(url)?;
        info!(url = %url, tier = ?tier, "starting analysis");

        let fetch = fetch_page(&url, &self.config.fetch).await?;
        debug!(status = fetch.status, elapsed_ms = fetch.elapsed_ms, "page fetched");

        // The parsed document is not Send, so everything that needs it
        // happens before the link probes are awaited.
        let (features, candidates) = {
            let base = Url::parse(&fetch.final_url).unwrap_or(url);
            let doc = Document::parse_with_url(&fetch.body, Some(base.clone()));
            let features = FeatureSet::extract(&doc, &fetch);
            let candidates = collect_same_host_links(&doc, &base, self.config.links.sample_size);
            (features, candidates)
        };

        debug!(candidates = candidates.len(), "same-host links sampled");
        let links = verify_links(candidates, &self.config.links).await;

        Ok(assemble(&fetch, tier, features, links))
    }

    /// Analyzes an already-fetched body without touching the network.
    ///
    /// The caller supplies the fetch outcome and a link verification report
    /// (typically [`LinkCheckReport::default`]). Everything downstream of
    /// I/O runs exactly as in [`Analyzer::analyze`], so identical inputs
    /// always produce an identical report.
    pub fn analyze_document(&self, fetch: &FetchResult, tier: Tier, links: LinkCheckReport) -> AnalysisReport {
        let features = {
            let base = Url::parse(&fetch.final_url).ok();
            let doc = Document::parse_with_url(&fetch.body, base);
            FeatureSet::extract(&doc, fetch)
        };

        assemble(fetch, tier, features, links)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds the extracted state into the final report.
fn assemble(fetch: &FetchResult, tier: Tier, features: FeatureSet, links: LinkCheckReport) -> AnalysisReport {
    let signals = Signals {
        status: fetch.status,
        elapsed_ms: fetch.elapsed_ms,
        https_used: fetch.https_used(),
        features: &features,
        links: &links,
    };

    let score = score(tier, &signals);
    let issues = derive_issues(&signals);
    info!(score, free_issues = issues.free.len(), pro_issues = issues.pro.len(), "analysis complete");

    AnalysisReport {
        url: fetch.final_url.clone(),
        tier,
        score,
        fetch: FetchMetrics::from_fetch(fetch),
        features,
        links,
        issues,
    }
}

/// Fetches and analyzes a page with default configuration.
pub async fn analyze(url: &str, tier: Tier) -> Result<AnalysisReport> {
    Analyzer::new().analyze(url, tier).await
}
