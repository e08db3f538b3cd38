//! Remediation issue derivation.
//!
//! Re-checks the scoring predicates, inverted: a predicate that fails emits
//! a human-readable remediation string. Both lists are always computed in
//! full regardless of the tier that was scored, so a caller running the
//! basic tier can still show what the advanced tier would have surfaced.
//! Ordering follows predicate evaluation order and is deterministic.

use serde::Serialize;

use crate::scoring::{ADVANCED_PREDICATES, BASIC_PREDICATES, Predicate, Signals, evaluate};

/// The two remediation lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueReport {
    /// Problems found by the basic checks.
    pub free: Vec<String>,
    /// Problems found only by the advanced checks.
    pub pro: Vec<String>,
}

/// The remediation text for a failed predicate.
fn remediation(predicate: Predicate, signals: &Signals<'_>) -> String {
    let f = signals.features;

    match predicate {
        Predicate::StatusHealthy => format!("Page returned HTTP {}", signals.status),
        Predicate::UsesHttps => "Site should use HTTPS".to_string(),
        Predicate::TitlePresent => "Missing <title>".to_string(),
        Predicate::TitleLengthGood => format!(
            "Title should be 10-60 characters (currently {})",
            f.basics.title_length
        ),
        Predicate::MetaDescriptionPresent => "Missing meta description".to_string(),
        Predicate::SingleH1 => "Use exactly one <h1>".to_string(),
        Predicate::HeadingHierarchyGood => f
            .headings
            .issue
            .clone()
            .unwrap_or_else(|| "Fix the heading structure".to_string()),
        Predicate::ViewportPresent => "Add a viewport meta tag for mobile devices".to_string(),
        Predicate::AltTextCoverage => format!(
            "Add alt text to images ({} of {} missing)",
            f.images.missing_alt, f.images.total
        ),
        Predicate::InternalLinksEnough => "Add more internal links (at least 5)".to_string(),
        Predicate::ExternalLinksBalanced => "Link to between 2 and 10 external resources".to_string(),
        Predicate::SocialPresence => "Add links to at least two social profiles".to_string(),
        Predicate::HasJsonLd => "Add JSON-LD structured data".to_string(),
        Predicate::FastTtfb => format!(
            "Improve server response time ({}ms to first byte)",
            signals.elapsed_ms
        ),
        Predicate::WordCountGood => format!(
            "Aim for 300-2500 words of body content (currently {})",
            f.content.word_count
        ),
        Predicate::KeywordPlacementGood => f
            .keywords
            .issue
            .clone()
            .unwrap_or_else(|| "Use title and description keywords in the body copy".to_string()),
        Predicate::RobotsIndexable => "Remove the noindex robots directive".to_string(),
        Predicate::NoBrokenLinks => format!(
            "Fix broken internal links ({} of {} checked)",
            signals.links.broken, signals.links.checked
        ),
        Predicate::MetaComplete => {
            "Complete social meta tags (Open Graph, Twitter card, Dublin Core)".to_string()
        }
        Predicate::HasStructuredData => "Add structured data (JSON-LD or microdata)".to_string(),
        Predicate::ServerConfigGood => {
            "Improve server configuration (compression, caching, content type)".to_string()
        }
        Predicate::AccessibilityGood => {
            "Resolve accessibility issues (alt text, form labels, landmarks)".to_string()
        }
        Predicate::ContentQualityGood => "Deepen the body content and its structure".to_string(),
        Predicate::LinkStructureGood => "Use descriptive anchor text instead of generic labels".to_string(),
        Predicate::ImageOptimizationGood => {
            "Optimize images (modern formats, lazy loading, explicit dimensions)".to_string()
        }
        Predicate::MobileFriendly => "Improve mobile-friendliness (responsive viewport, flexible widths)".to_string(),
        Predicate::SecurityPostureGood => {
            "Add missing security headers (HSTS, CSP, X-Frame-Options)".to_string()
        }
    }
}

/// Derives both remediation lists from the signals.
pub fn derive_issues(signals: &Signals<'_>) -> IssueReport {
    let free = BASIC_PREDICATES
        .iter()
        .filter(|&&p| !evaluate(p, signals))
        .map(|&p| remediation(p, signals))
        .collect();

    let pro = ADVANCED_PREDICATES
        .iter()
        .filter(|&&p| !evaluate(p, signals))
        .map(|&p| remediation(p, signals))
        .collect();

    IssueReport { free, pro }
}
