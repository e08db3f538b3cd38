//! Error types for site analysis operations.
//!
//! This module defines the main error type [`SitePulseError`] which represents
//! all errors that can escape an analysis run. Validation errors are raised
//! before any network I/O, fetch errors abort the run, and everything else is
//! absorbed internally (a failing extractor degrades to its default record
//! instead of surfacing here).

use thiserror::Error;

/// Main error type for site analysis operations.
///
/// Only two kinds of failure ever reach the caller of
/// [`Analyzer::analyze`](crate::Analyzer::analyze): an invalid input URL
/// (rejected before any request is made) and a transport-level fetch failure.
/// The remaining variants are used internally by extractors and the markup
/// layer and are converted into default feature records by the analyzer.
///
/// # Example
///
/// ```rust
/// use sitepulse_core::SitePulseError;
///
/// let err = SitePulseError::InvalidUrl("not a url".to_string());
/// assert!(err.to_string().contains("Invalid URL"));
/// ```
#[derive(Error, Debug)]
pub enum SitePulseError {
    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or uses a non-HTTP scheme.
    /// No network request is attempted.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request timeout.
    ///
    /// Returned when the page fetch exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// HTTP transport errors from reqwest.
    ///
    /// Wraps DNS failures, connection refusals, TLS problems and other
    /// transport-level issues. A non-2xx status is *not* an error; it is
    /// captured in the fetch result and scored like any other signal.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// HTML parsing errors.
    ///
    /// Returned when a CSS selector is invalid. Malformed markup itself never
    /// produces this error; parsing is tolerant by design.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// A feature extractor failed.
    ///
    /// Never surfaced to callers; the orchestrator replaces the failed
    /// feature with its default record and continues.
    #[error("Feature extraction failed: {0}")]
    Extraction(String),
}

/// Result type alias for SitePulseError.
pub type Result<T> = std::result::Result<T, SitePulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SitePulseError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = SitePulseError::Timeout { timeout: 15 };
        assert!(err.to_string().contains("15"));
    }

    #[test]
    fn test_extraction_error() {
        let err = SitePulseError::Extraction("images".to_string());
        assert!(err.to_string().contains("images"));
    }
}
