pub mod analyzer;
pub mod error;
pub mod features;
pub mod fetch;
pub mod issues;
pub mod linkcheck;
pub mod parse;
pub mod report;
pub mod scoring;

pub use analyzer::{Analyzer, AnalyzerConfig, AnalyzerConfigBuilder, analyze};
pub use error::{Result, SitePulseError};
pub use features::FeatureSet;
pub use fetch::{FetchConfig, FetchResult, fetch_page, normalize_url};
pub use issues::{IssueReport, derive_issues};
pub use linkcheck::{BrokenLink, LinkCheckConfig, LinkCheckReport, collect_same_host_links, verify_links};
pub use parse::{Document, Element};
pub use report::{AnalysisReport, FetchMetrics};
pub use scoring::{Predicate, Signals, Tier, score};
