//! Link totals, social presence, and anchor quality.

use serde::Serialize;
use url::Url;

use crate::Result;
use crate::parse::{Document, normalize_whitespace};

/// Hosts counted as social profiles.
const SOCIAL_HOSTS: [&str; 10] = [
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "linkedin.com",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
    "threads.net",
    "mastodon.social",
];

/// Anchor texts that tell the reader nothing about the target.
const GENERIC_ANCHORS: [&str; 6] = ["click here", "here", "read more", "learn more", "more", "link"];

/// Counts of links by destination.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkTotals {
    /// All anchor elements with an `href`.
    pub total: usize,
    /// Links resolving to the page's own host (or relative links).
    pub internal: usize,
    /// Links resolving to a different host.
    pub external: usize,
}

/// Links pointing at known social networks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SocialLinks {
    /// Number of links to social hosts.
    pub count: usize,
    /// The distinct networks found.
    pub networks: Vec<String>,
}

/// Anchor text quality with a 0-100 sub-score.
#[derive(Debug, Clone, Serialize)]
pub struct LinkStructure {
    /// Anchors with generic text like "click here".
    pub generic_anchors: usize,
    /// Anchors with no visible text at all.
    pub empty_anchors: usize,
    /// Sub-score, 0-100.
    pub score: u8,
}

impl Default for LinkStructure {
    fn default() -> Self {
        Self { generic_anchors: 0, empty_anchors: 0, score: 100 }
    }
}

/// Classifies an href relative to the page's host.
///
/// Returns `None` for non-navigational schemes (mailto, tel, javascript)
/// and fragments, `Some(true)` for same-host or relative links, and
/// `Some(false)` for links to other hosts.
fn classify_href(href: &str, base: Option<&Url>) -> Option<bool> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_lowercase();
    if lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("javascript:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match Url::parse(href) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                return None;
            }
            let same_host = base
                .and_then(Url::host_str)
                .map(|host| url.host_str() == Some(host))
                .unwrap_or(false);
            Some(same_host)
        }
        // Relative URLs stay on the page's own host.
        Err(_) => Some(true),
    }
}

/// Counts total, internal, and external links.
pub fn extract_link_totals(doc: &Document) -> Result<LinkTotals> {
    let anchors = doc.select("a[href]")?;
    let mut totals = LinkTotals::default();

    for anchor in &anchors {
        let Some(href) = anchor.attr("href") else { continue };
        let Some(internal) = classify_href(href, doc.base_url()) else { continue };

        totals.total += 1;
        if internal {
            totals.internal += 1;
        } else {
            totals.external += 1;
        }
    }

    Ok(totals)
}

/// Finds links to known social networks.
pub fn extract_social_links(doc: &Document) -> Result<SocialLinks> {
    let anchors = doc.select("a[href]")?;
    let mut social = SocialLinks::default();

    for anchor in &anchors {
        let Some(href) = anchor.attr("href") else { continue };
        let Ok(url) = Url::parse(href.trim()) else { continue };
        let Some(host) = url.host_str() else { continue };
        let host = host.strip_prefix("www.").unwrap_or(host);

        if let Some(network) = SOCIAL_HOSTS.iter().find(|&&s| host == s || host.ends_with(&format!(".{}", s))) {
            social.count += 1;
            let name = network.split('.').next().unwrap_or(network).to_string();
            if !social.networks.contains(&name) {
                social.networks.push(name);
            }
        }
    }

    Ok(social)
}

/// Audits anchor text quality and produces a sub-score.
pub fn extract_link_structure(doc: &Document) -> Result<LinkStructure> {
    let anchors = doc.select("a[href]")?;

    if anchors.is_empty() {
        // Nothing to audit, but a page without a single link is still a
        // structural weakness.
        return Ok(LinkStructure { generic_anchors: 0, empty_anchors: 0, score: 40 });
    }

    let mut structure = LinkStructure { score: 0, ..Default::default() };

    for anchor in &anchors {
        let text = normalize_whitespace(&anchor.visible_text()).to_lowercase();

        if text.is_empty() {
            // An image-only anchor with alt text still reads fine.
            let has_labelled_image = anchor
                .select("img")
                .map(|imgs| imgs.iter().any(|img| img.has_attr("alt")))
                .unwrap_or(false);
            if !has_labelled_image && !anchor.has_attr("aria-label") {
                structure.empty_anchors += 1;
            }
        } else if GENERIC_ANCHORS.contains(&text.as_str()) {
            structure.generic_anchors += 1;
        }
    }

    let mut score: i32 = 100;
    score -= (structure.generic_anchors as i32 * 10).min(40);
    score -= (structure.empty_anchors as i32 * 10).min(30);

    structure.score = score.max(0) as u8;
    Ok(structure)
}
