//! Passive security posture checks.
//!
//! Presence/absence of standard headers only. This is not a vulnerability
//! scan; nothing is probed and header values are not validated beyond
//! existence.

use serde::Serialize;

use crate::Result;
use crate::fetch::FetchResult;

// Each header's contribution to the 0-100 sub-score.
const HTTPS_WEIGHT: u8 = 30;
const HSTS_WEIGHT: u8 = 15;
const CSP_WEIGHT: u8 = 20;
const X_FRAME_WEIGHT: u8 = 10;
const X_CONTENT_TYPE_WEIGHT: u8 = 10;
const REFERRER_POLICY_WEIGHT: u8 = 15;

/// Transport security and standard protective headers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecurityPosture {
    /// Whether the final response came over HTTPS.
    pub https_used: bool,
    /// `Strict-Transport-Security` present.
    pub has_hsts: bool,
    /// `Content-Security-Policy` present.
    pub has_csp: bool,
    /// `X-Frame-Options` present.
    pub has_x_frame_options: bool,
    /// `X-Content-Type-Options` present.
    pub has_x_content_type_options: bool,
    /// `Referrer-Policy` present.
    pub has_referrer_policy: bool,
    /// Sub-score, 0-100.
    pub score: u8,
}

/// Scores the transport and header security posture of the response.
pub fn extract_security_posture(fetch: &FetchResult) -> Result<SecurityPosture> {
    let posture = SecurityPosture {
        https_used: fetch.https_used(),
        has_hsts: fetch.header("strict-transport-security").is_some(),
        has_csp: fetch.header("content-security-policy").is_some(),
        has_x_frame_options: fetch.header("x-frame-options").is_some(),
        has_x_content_type_options: fetch.header("x-content-type-options").is_some(),
        has_referrer_policy: fetch.header("referrer-policy").is_some(),
        score: 0,
    };

    let mut score = 0u8;
    if posture.https_used {
        score += HTTPS_WEIGHT;
    }
    if posture.has_hsts {
        score += HSTS_WEIGHT;
    }
    if posture.has_csp {
        score += CSP_WEIGHT;
    }
    if posture.has_x_frame_options {
        score += X_FRAME_WEIGHT;
    }
    if posture.has_x_content_type_options {
        score += X_CONTENT_TYPE_WEIGHT;
    }
    if posture.has_referrer_policy {
        score += REFERRER_POLICY_WEIGHT;
    }

    Ok(SecurityPosture { score, ..posture })
}
