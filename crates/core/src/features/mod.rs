//! The feature extractor battery.
//!
//! Each extractor is a pure function over the parsed document (and sometimes
//! the fetch result) returning one named record. Extractors share no mutable
//! state and may run in any order. A failing extractor never aborts the
//! analysis: [`FeatureSet::extract`] replaces its output with the record's
//! default and logs the failure.

pub mod accessibility;
pub mod basics;
pub mod content;
pub mod headings;
pub mod images;
pub mod keywords;
pub mod links;
pub mod meta_info;
pub mod mobile;
pub mod schema;
pub mod security;
pub mod server_headers;

use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::fetch::FetchResult;
use crate::parse::Document;

pub use accessibility::{AccessibilityAudit, extract_accessibility};
pub use basics::{PageBasics, extract_basics};
pub use content::{ContentQuality, count_words, extract_content_quality};
pub use headings::{HeadingHierarchy, extract_headings};
pub use images::{ImageAudit, ImageStats, extract_image_audit, extract_image_stats};
pub use keywords::{KeywordPlacement, extract_keyword_placement};
pub use links::{LinkStructure, LinkTotals, SocialLinks, extract_link_structure, extract_link_totals, extract_social_links};
pub use meta_info::{MetaInformation, extract_meta_information};
pub use mobile::{MobileFriendliness, extract_mobile_friendliness};
pub use schema::{SchemaMarkup, extract_schema_markup};
pub use security::{SecurityPosture, extract_security_posture};
pub use server_headers::{ServerConfig, extract_server_config};

/// Every feature record produced for one page.
///
/// All fields are always present; a record whose extractor failed (or whose
/// source data is absent) carries its default value, structurally
/// indistinguishable from a healthy one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureSet {
    pub basics: PageBasics,
    pub headings: HeadingHierarchy,
    pub images: ImageStats,
    pub image_audit: ImageAudit,
    pub links: LinkTotals,
    pub link_structure: LinkStructure,
    pub social: SocialLinks,
    pub keywords: KeywordPlacement,
    pub meta_info: MetaInformation,
    pub schema: SchemaMarkup,
    pub server_config: ServerConfig,
    pub security: SecurityPosture,
    pub accessibility: AccessibilityAudit,
    pub content: ContentQuality,
    pub mobile: MobileFriendliness,
}

/// Maps an extractor failure to the record's default.
fn or_default<T: Default>(name: &str, result: Result<T>) -> T {
    match result {
        Ok(record) => record,
        Err(e) => {
            debug!(extractor = name, error = %e, "extractor failed, using default record");
            T::default()
        }
    }
}

impl FeatureSet {
    /// Runs every extractor over the document.
    ///
    /// Never fails; individual extractor errors degrade that one feature to
    /// its default record.
    pub fn extract(doc: &Document, fetch: &FetchResult) -> Self {
        Self {
            basics: or_default("basics", extract_basics(doc)),
            headings: or_default("headings", extract_headings(doc)),
            images: or_default("images", extract_image_stats(doc)),
            image_audit: or_default("image_audit", extract_image_audit(doc)),
            links: or_default("links", extract_link_totals(doc)),
            link_structure: or_default("link_structure", extract_link_structure(doc)),
            social: or_default("social", extract_social_links(doc)),
            keywords: or_default("keywords", extract_keyword_placement(doc)),
            meta_info: or_default("meta_info", extract_meta_information(doc)),
            schema: or_default("schema", extract_schema_markup(doc)),
            server_config: or_default("server_config", extract_server_config(fetch)),
            security: or_default("security", extract_security_posture(fetch)),
            accessibility: or_default("accessibility", extract_accessibility(doc)),
            content: or_default("content", extract_content_quality(doc, fetch.body.len())),
            mobile: or_default("mobile", extract_mobile_friendliness(doc)),
        }
    }
}
