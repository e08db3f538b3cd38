//! Tier-aware weighted scoring.
//!
//! Each predicate is a boolean check over the extracted signals. A predicate
//! that holds contributes its weight for the active tier; one that fails
//! contributes nothing. Each tier's full weight table sums to exactly 100,
//! so the composite score always lands in [0, 100]. The basic tier
//! redistributes the advanced-only predicates' weight across the basic
//! predicates instead of leaving headroom unscored.
//!
//! The thresholds below are carried over from long-running production tuning
//! rather than derived from first principles; change them only with
//! measurement in hand.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::features::FeatureSet;
use crate::linkcheck::LinkCheckReport;

/// Analysis depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Cheap heuristics only.
    Basic,
    /// Adds structural, security, and accessibility depth.
    Advanced,
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" | "free" => Ok(Self::Basic),
            "advanced" | "pro" => Ok(Self::Advanced),
            _ => Err(format!("Invalid tier: {}. Valid options: basic, advanced", s)),
        }
    }
}

// Predicate thresholds.
const TITLE_LEN_MIN: usize = 10;
const TITLE_LEN_MAX: usize = 60;
const INTERNAL_LINKS_MIN: usize = 5;
const EXTERNAL_LINKS_MIN: usize = 2;
const EXTERNAL_LINKS_MAX: usize = 10;
const SOCIAL_LINKS_MIN: usize = 2;
const TTFB_MAX_MS: u64 = 800;
const WORD_COUNT_MIN: usize = 300;
const WORD_COUNT_MAX: usize = 2500;
const META_SCORE_MIN: u8 = 70;
const SERVER_SCORE_MIN: u8 = 60;
const ACCESSIBILITY_SCORE_MIN: u8 = 80;
const LINK_STRUCTURE_SCORE_MIN: u8 = 70;
const IMAGE_SCORE_MIN: u8 = 70;
const MOBILE_SCORE_MIN: u8 = 80;
const SECURITY_SCORE_MIN: u8 = 70;

/// One boolean health check over the extracted signals.
///
/// Used both for scoring (weight awarded when true) and for issue derivation
/// (remediation emitted when false).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    StatusHealthy,
    UsesHttps,
    TitlePresent,
    TitleLengthGood,
    MetaDescriptionPresent,
    SingleH1,
    HeadingHierarchyGood,
    ViewportPresent,
    AltTextCoverage,
    InternalLinksEnough,
    ExternalLinksBalanced,
    SocialPresence,
    HasJsonLd,
    FastTtfb,
    WordCountGood,
    KeywordPlacementGood,
    RobotsIndexable,
    NoBrokenLinks,
    // Advanced-only from here down.
    MetaComplete,
    HasStructuredData,
    ServerConfigGood,
    AccessibilityGood,
    ContentQualityGood,
    LinkStructureGood,
    ImageOptimizationGood,
    MobileFriendly,
    SecurityPostureGood,
}

/// The basic predicate set in evaluation order.
pub const BASIC_PREDICATES: [Predicate; 18] = [
    Predicate::StatusHealthy,
    Predicate::UsesHttps,
    Predicate::TitlePresent,
    Predicate::TitleLengthGood,
    Predicate::MetaDescriptionPresent,
    Predicate::SingleH1,
    Predicate::HeadingHierarchyGood,
    Predicate::ViewportPresent,
    Predicate::AltTextCoverage,
    Predicate::InternalLinksEnough,
    Predicate::ExternalLinksBalanced,
    Predicate::SocialPresence,
    Predicate::HasJsonLd,
    Predicate::FastTtfb,
    Predicate::WordCountGood,
    Predicate::KeywordPlacementGood,
    Predicate::RobotsIndexable,
    Predicate::NoBrokenLinks,
];

/// The advanced-only predicate set in evaluation order.
pub const ADVANCED_PREDICATES: [Predicate; 9] = [
    Predicate::MetaComplete,
    Predicate::HasStructuredData,
    Predicate::ServerConfigGood,
    Predicate::AccessibilityGood,
    Predicate::ContentQualityGood,
    Predicate::LinkStructureGood,
    Predicate::ImageOptimizationGood,
    Predicate::MobileFriendly,
    Predicate::SecurityPostureGood,
];

/// Everything the predicates need, assembled once per analysis.
///
/// Borrowed views only; nothing here is mutated during evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    /// HTTP status of the page fetch.
    pub status: u16,
    /// Approximate time-to-first-byte in milliseconds.
    pub elapsed_ms: u64,
    /// Whether the final response came over HTTPS.
    pub https_used: bool,
    /// The extracted feature records.
    pub features: &'a FeatureSet,
    /// The link verification outcome.
    pub links: &'a LinkCheckReport,
}

/// Evaluates one predicate against the signals.
pub fn evaluate(predicate: Predicate, signals: &Signals<'_>) -> bool {
    let f = signals.features;

    match predicate {
        Predicate::StatusHealthy => signals.status >= 200 && signals.status < 400,
        Predicate::UsesHttps => signals.https_used,
        Predicate::TitlePresent => f.basics.title.is_some(),
        Predicate::TitleLengthGood => f.basics.title_length >= TITLE_LEN_MIN && f.basics.title_length <= TITLE_LEN_MAX,
        Predicate::MetaDescriptionPresent => f.basics.meta_description.is_some(),
        Predicate::SingleH1 => f.headings.h1_count == 1,
        Predicate::HeadingHierarchyGood => f.headings.is_good,
        Predicate::ViewportPresent => f.basics.has_viewport,
        // Vacuously true for pages without images; absence of data never
        // penalizes the score.
        Predicate::AltTextCoverage => f.images.missing_alt * 10 <= f.images.total,
        Predicate::InternalLinksEnough => f.links.internal >= INTERNAL_LINKS_MIN,
        Predicate::ExternalLinksBalanced => {
            f.links.external >= EXTERNAL_LINKS_MIN && f.links.external <= EXTERNAL_LINKS_MAX
        }
        Predicate::SocialPresence => f.social.count >= SOCIAL_LINKS_MIN,
        Predicate::HasJsonLd => f.schema.count > 0,
        Predicate::FastTtfb => signals.elapsed_ms <= TTFB_MAX_MS,
        Predicate::WordCountGood => f.content.word_count >= WORD_COUNT_MIN && f.content.word_count <= WORD_COUNT_MAX,
        Predicate::KeywordPlacementGood => f.keywords.is_good,
        Predicate::RobotsIndexable => !f.basics.noindex,
        Predicate::NoBrokenLinks => signals.links.broken == 0,
        Predicate::MetaComplete => f.meta_info.score >= META_SCORE_MIN,
        Predicate::HasStructuredData => f.schema.has_any(),
        Predicate::ServerConfigGood => f.server_config.score >= SERVER_SCORE_MIN,
        Predicate::AccessibilityGood => f.accessibility.score >= ACCESSIBILITY_SCORE_MIN,
        Predicate::ContentQualityGood => f.content.is_good,
        Predicate::LinkStructureGood => f.link_structure.score >= LINK_STRUCTURE_SCORE_MIN,
        Predicate::ImageOptimizationGood => f.image_audit.score >= IMAGE_SCORE_MIN,
        Predicate::MobileFriendly => f.mobile.score >= MOBILE_SCORE_MIN,
        Predicate::SecurityPostureGood => f.security.score >= SECURITY_SCORE_MIN,
    }
}

/// Weight of a predicate under the basic tier.
///
/// Advanced-only predicates carry no weight here; their share is folded into
/// the basic checks so the table still sums to 100.
fn basic_weight(predicate: Predicate) -> u32 {
    match predicate {
        Predicate::StatusHealthy => 8,
        Predicate::UsesHttps => 8,
        Predicate::TitlePresent => 8,
        Predicate::TitleLengthGood => 4,
        Predicate::MetaDescriptionPresent => 5,
        Predicate::SingleH1 => 6,
        Predicate::HeadingHierarchyGood => 6,
        Predicate::ViewportPresent => 6,
        Predicate::AltTextCoverage => 6,
        Predicate::InternalLinksEnough => 6,
        Predicate::ExternalLinksBalanced => 3,
        Predicate::SocialPresence => 3,
        Predicate::HasJsonLd => 4,
        Predicate::FastTtfb => 6,
        Predicate::WordCountGood => 7,
        Predicate::KeywordPlacementGood => 4,
        Predicate::RobotsIndexable => 5,
        Predicate::NoBrokenLinks => 5,
        _ => 0,
    }
}

/// Weight of a predicate under the advanced tier.
fn advanced_weight(predicate: Predicate) -> u32 {
    match predicate {
        Predicate::StatusHealthy => 4,
        Predicate::UsesHttps => 5,
        Predicate::TitlePresent => 4,
        Predicate::TitleLengthGood => 3,
        Predicate::MetaDescriptionPresent => 3,
        Predicate::SingleH1 => 4,
        Predicate::HeadingHierarchyGood => 4,
        Predicate::ViewportPresent => 4,
        Predicate::AltTextCoverage => 4,
        Predicate::InternalLinksEnough => 4,
        Predicate::ExternalLinksBalanced => 2,
        Predicate::SocialPresence => 2,
        Predicate::HasJsonLd => 3,
        Predicate::FastTtfb => 3,
        Predicate::WordCountGood => 4,
        Predicate::KeywordPlacementGood => 3,
        Predicate::RobotsIndexable => 3,
        Predicate::NoBrokenLinks => 3,
        Predicate::MetaComplete => 5,
        Predicate::HasStructuredData => 4,
        Predicate::ServerConfigGood => 4,
        Predicate::AccessibilityGood => 5,
        Predicate::ContentQualityGood => 4,
        Predicate::LinkStructureGood => 4,
        Predicate::ImageOptimizationGood => 3,
        Predicate::MobileFriendly => 4,
        Predicate::SecurityPostureGood => 5,
    }
}

/// Weight of a predicate under the given tier.
pub fn weight(tier: Tier, predicate: Predicate) -> u32 {
    match tier {
        Tier::Basic => basic_weight(predicate),
        Tier::Advanced => advanced_weight(predicate),
    }
}

/// Computes the composite score for the tier.
///
/// Always an integer in [0, 100]: the active table sums to 100 and every
/// contribution is non-negative.
pub fn score(tier: Tier, signals: &Signals<'_>) -> u8 {
    let predicates = BASIC_PREDICATES.iter().chain(ADVANCED_PREDICATES.iter());

    let total: u32 = predicates
        .filter(|&&p| evaluate(p, signals))
        .map(|&p| weight(tier, p))
        .sum();

    total.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn all_predicates() -> impl Iterator<Item = Predicate> {
        BASIC_PREDICATES.iter().chain(ADVANCED_PREDICATES.iter()).copied()
    }

    #[test]
    fn test_basic_weights_sum_to_100() {
        let sum: u32 = all_predicates().map(|p| weight(Tier::Basic, p)).sum();
        assert_eq!(sum, 100);
    }

    #[test]
    fn test_advanced_weights_sum_to_100() {
        let sum: u32 = all_predicates().map(|p| weight(Tier::Advanced, p)).sum();
        assert_eq!(sum, 100);
    }

    #[test]
    fn test_advanced_only_predicates_carry_no_basic_weight() {
        for p in ADVANCED_PREDICATES {
            assert_eq!(weight(Tier::Basic, p), 0, "{:?} should not score in basic tier", p);
        }
    }

    #[test]
    fn test_every_advanced_weight_positive() {
        for p in all_predicates() {
            assert!(weight(Tier::Advanced, p) > 0, "{:?} has no advanced weight", p);
        }
    }

    #[rstest]
    #[case("basic", Tier::Basic)]
    #[case("ADVANCED", Tier::Advanced)]
    #[case("pro", Tier::Advanced)]
    #[case("free", Tier::Basic)]
    fn test_tier_from_str(#[case] input: &str, #[case] expected: Tier) {
        assert_eq!(input.parse::<Tier>().unwrap(), expected);
    }

    #[test]
    fn test_tier_from_str_rejects_unknown() {
        assert!("platinum".parse::<Tier>().is_err());
    }

    #[test]
    fn test_score_bounds_on_empty_features() {
        let features = crate::features::FeatureSet::default();
        let links = crate::linkcheck::LinkCheckReport::default();
        let signals = Signals {
            status: 0,
            elapsed_ms: u64::MAX,
            https_used: false,
            features: &features,
            links: &links,
        };

        for tier in [Tier::Basic, Tier::Advanced] {
            let s = score(tier, &signals);
            assert!(s <= 100);
        }
    }

    #[test]
    fn test_alt_coverage_vacuous_on_zero_images() {
        let features = crate::features::FeatureSet::default();
        let links = crate::linkcheck::LinkCheckReport::default();
        let signals = Signals {
            status: 200,
            elapsed_ms: 100,
            https_used: true,
            features: &features,
            links: &links,
        };

        assert!(evaluate(Predicate::AltTextCoverage, &signals));
    }

    #[test]
    fn test_alt_coverage_threshold() {
        let mut features = crate::features::FeatureSet::default();
        features.images.total = 10;
        features.images.missing_alt = 1;
        let links = crate::linkcheck::LinkCheckReport::default();
        {
            let signals = Signals {
                status: 200,
                elapsed_ms: 100,
                https_used: true,
                features: &features,
                links: &links,
            };
            assert!(evaluate(Predicate::AltTextCoverage, &signals));
        }

        features.images.missing_alt = 3;
        let signals = Signals {
            status: 200,
            elapsed_ms: 100,
            https_used: true,
            features: &features,
            links: &links,
        };
        assert!(!evaluate(Predicate::AltTextCoverage, &signals));
    }

    #[test]
    fn test_status_healthy_range() {
        let features = crate::features::FeatureSet::default();
        let links = crate::linkcheck::LinkCheckReport::default();

        for (status, expected) in [(200u16, true), (301, true), (399, true), (404, false), (500, false)] {
            let signals = Signals {
                status,
                elapsed_ms: 100,
                https_used: true,
                features: &features,
                links: &links,
            };
            assert_eq!(evaluate(Predicate::StatusHealthy, &signals), expected, "status {}", status);
        }
    }
}
