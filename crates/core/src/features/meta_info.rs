//! Meta tag completeness across the common vocabularies.

use serde::Serialize;

use crate::Result;
use crate::parse::Document;

// Weights per vocabulary; the four together make the 0-100 sub-score.
const BASIC_WEIGHT: u8 = 40;
const OPEN_GRAPH_WEIGHT: u8 = 25;
const TWITTER_WEIGHT: u8 = 20;
const DUBLIN_CORE_WEIGHT: u8 = 15;

/// Which meta vocabularies the page covers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetaInformation {
    /// Title and description both present.
    pub basic: bool,
    /// Open Graph title and description present.
    pub open_graph: bool,
    /// Twitter card markup present.
    pub twitter: bool,
    /// Any Dublin Core tags present.
    pub dublin_core: bool,
    /// Completeness sub-score, 0-100.
    pub score: u8,
}

/// Scores meta tag completeness.
pub fn extract_meta_information(doc: &Document) -> Result<MetaInformation> {
    let basic = doc.title().is_some() && doc.meta_content("description").is_some();

    let open_graph = doc.meta_content("og:title").is_some() && doc.meta_content("og:description").is_some();

    let twitter = doc.meta_content("twitter:card").is_some() || doc.meta_content("twitter:title").is_some();

    let dublin_core = !doc.select("meta[name^=\"DC.\"]")?.is_empty() || !doc.select("meta[name^=\"dc.\"]")?.is_empty();

    let mut score = 0u8;
    if basic {
        score += BASIC_WEIGHT;
    }
    if open_graph {
        score += OPEN_GRAPH_WEIGHT;
    }
    if twitter {
        score += TWITTER_WEIGHT;
    }
    if dublin_core {
        score += DUBLIN_CORE_WEIGHT;
    }

    Ok(MetaInformation { basic, open_graph, twitter, dublin_core, score })
}
