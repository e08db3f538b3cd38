//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the tree using CSS selectors. Parsing is tolerant:
//! malformed or empty input still yields a valid (possibly near-empty)
//! document so the analysis pipeline can run on every fetched body.
//!
//! # Example
//!
//! ```rust
//! use sitepulse_core::parse::Document;
//!
//! let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Test".to_string()));
//! ```

use scraper::{Html, Selector};
use url::Url;

use crate::{Result, SitePulseError};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and extracting text and metadata. The tree is never
/// mutated after construction; extractors only ever hold read access.
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing never fails; invalid markup is recovered the same way a
    /// browser would recover it.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html), base_url: None }
    }

    /// Parses HTML with a base URL for resolving relative links.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sitepulse_core::parse::Document;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://example.com/page").unwrap();
    /// let doc = Document::parse_with_url("<a href='/docs'>Docs</a>", Some(base));
    /// assert!(doc.base_url().is_some());
    /// ```
    pub fn parse_with_url(html: &str, base_url: Option<Url>) -> Self {
        Self { html: Html::parse_document(html), base_url }
    }

    /// Gets the base URL used for resolving relative links.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Selects elements using a CSS selector.
    ///
    /// Elements are returned in document order, which matters for checks
    /// like heading hierarchy that walk `h1..h6` as they appear.
    ///
    /// # Errors
    ///
    /// Returns [`SitePulseError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| SitePulseError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Counts elements matching a CSS selector.
    pub fn count(&self, selector: &str) -> usize {
        self.select(selector).map(|els| els.len()).unwrap_or(0)
    }

    /// Gets the title of the document.
    ///
    /// Returns the trimmed content of the `<title>` element if present and
    /// non-empty.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Gets the `lang` attribute of the root `<html>` element.
    pub fn lang(&self) -> Option<String> {
        self.html
            .root_element()
            .value()
            .attr("lang")
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
    }

    /// Gets meta tag content by `name` or `property` attribute.
    ///
    /// Open Graph tags use `property` while most other meta tags use `name`,
    /// so both are checked.
    pub fn meta_content(&self, attr: &str) -> Option<String> {
        for attribute in ["name", "property"] {
            let selector = format!("meta[{}=\"{}\"]", attribute, attr);
            if let Ok(elements) = self.select(&selector)
                && let Some(el) = elements.first()
                && let Some(content) = el.attr("content")
            {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }

        None
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }

    /// Gets the visible text of the document with whitespace normalized.
    ///
    /// Script and style contents are excluded and runs of whitespace are
    /// collapsed to single spaces.
    pub fn normalized_text(&self) -> String {
        let Ok(body) = self.select("body") else {
            return normalize_whitespace(&self.text_content());
        };

        let raw = match body.first() {
            Some(el) => el.visible_text(),
            None => self.text_content(),
        };

        normalize_whitespace(&raw)
    }
}

/// A wrapper around scraper's ElementRef for read-only DOM access.
///
/// # Example
///
/// ```rust
/// use sitepulse_core::parse::Document;
///
/// let doc = Document::parse(r#"<a href="https://example.com">Link text</a>"#);
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content of this element, skipping script and style nodes.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        collect_visible_text(self.element, &mut out);
        out
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Checks whether an attribute is present with a non-empty value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).map(|v| !v.trim().is_empty()).unwrap_or(false)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects child elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SitePulseError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| SitePulseError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }
}

fn collect_visible_text(el: scraper::ElementRef<'_>, out: &mut String) {
    if matches!(el.value().name(), "script" | "style" | "noscript" | "template") {
        return;
    }

    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = scraper::ElementRef::wrap(child) {
            collect_visible_text(child_el, out);
        }
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
