//! Analysis report type with score, features, issues, and JSON conversion.
//!
//! This module defines the [`AnalysisReport`] struct which represents the
//! complete result of analyzing one page, including the fetch metrics, every
//! extracted feature record, the link verification outcome, the tier score,
//! and both remediation lists.

use serde::Serialize;

use crate::features::FeatureSet;
use crate::fetch::FetchResult;
use crate::issues::IssueReport;
use crate::linkcheck::LinkCheckReport;
use crate::scoring::Tier;
use crate::{Result, SitePulseError};

/// Transport-level facts about the page fetch.
#[derive(Debug, Clone, Serialize)]
pub struct FetchMetrics {
    /// HTTP status code of the final response.
    pub status: u16,

    /// Milliseconds to first byte.
    pub elapsed_ms: u64,

    /// Whether the final response came over HTTPS.
    pub https_used: bool,

    /// URL of the final response after redirects.
    pub final_url: String,

    /// Body size in bytes.
    pub body_bytes: usize,
}

impl FetchMetrics {
    /// Captures the metrics of a completed fetch.
    pub fn from_fetch(fetch: &FetchResult) -> Self {
        Self {
            status: fetch.status,
            elapsed_ms: fetch.elapsed_ms,
            https_used: fetch.https_used(),
            final_url: fetch.final_url.clone(),
            body_bytes: fetch.body.len(),
        }
    }
}

/// The complete result of analyzing a page.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// The URL that was requested.
    pub url: String,

    /// The tier the score was computed for.
    pub tier: Tier,

    /// Score for the requested tier, 0-100.
    pub score: u8,

    /// Transport metrics from the page fetch.
    pub fetch: FetchMetrics,

    /// Every feature record extracted from the page.
    pub features: FeatureSet,

    /// Same-host link verification outcome.
    pub links: LinkCheckReport,

    /// Remediation lists for both tiers.
    pub issues: IssueReport,
}

impl AnalysisReport {
    /// Gets the report as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| SitePulseError::Extraction(e.to_string()))
    }

    /// Gets the report as a pretty-printed JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SitePulseError::Extraction(e.to_string()))
    }
}
