//! Basic page signals: title, description, canonical, language, viewport.

use serde::Serialize;

use crate::Result;
use crate::parse::Document;

/// Head-level basics of a page.
///
/// Every field is always present; a page with an empty `<head>` produces the
/// all-default record rather than anything the caller must null-check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageBasics {
    /// Content of the `<title>` element, if present and non-empty.
    pub title: Option<String>,
    /// Character length of the title (0 when absent).
    pub title_length: usize,
    /// Content of the `description` meta tag.
    pub meta_description: Option<String>,
    /// Character length of the meta description (0 when absent).
    pub meta_description_length: usize,
    /// `href` of the canonical link element.
    pub canonical: Option<String>,
    /// `lang` attribute of the root element.
    pub lang: Option<String>,
    /// Whether a viewport meta tag is present.
    pub has_viewport: bool,
    /// Raw content of the robots meta tag.
    pub robots: Option<String>,
    /// Whether the robots meta tag contains a `noindex` directive.
    pub noindex: bool,
    /// Whether a favicon link element is present.
    pub has_favicon: bool,
}

/// Extracts head-level basics from a document.
pub fn extract_basics(doc: &Document) -> Result<PageBasics> {
    let title = doc.title();
    let title_length = title.as_deref().map(|t| t.chars().count()).unwrap_or(0);

    let meta_description = doc.meta_content("description");
    let meta_description_length = meta_description
        .as_deref()
        .map(|d| d.chars().count())
        .unwrap_or(0);

    let canonical = doc
        .select("link[rel=\"canonical\"]")?
        .first()
        .and_then(|el| el.attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty());

    let robots = doc.meta_content("robots");
    let noindex = robots
        .as_deref()
        .map(|r| r.to_lowercase().contains("noindex"))
        .unwrap_or(false);

    let has_favicon = !doc.select("link[rel=\"icon\"]")?.is_empty()
        || !doc.select("link[rel=\"shortcut icon\"]")?.is_empty()
        || !doc.select("link[rel=\"apple-touch-icon\"]")?.is_empty();

    Ok(PageBasics {
        title,
        title_length,
        meta_description,
        meta_description_length,
        canonical,
        lang: doc.lang(),
        has_viewport: doc.meta_content("viewport").is_some(),
        robots,
        noindex,
        has_favicon,
    })
}
