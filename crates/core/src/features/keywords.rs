//! Keyword placement heuristic.
//!
//! Checks whether the words a page advertises in its title and meta
//! description actually appear in the visible body copy. This is a coarse
//! relevance signal, not keyword-density analysis.

use regex::Regex;
use serde::Serialize;

use crate::Result;
use crate::parse::Document;

/// Tokens shorter than this carry too little meaning to match on.
const MIN_TOKEN_LEN: usize = 4;

/// Whether title/description keywords show up in the body.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordPlacement {
    /// Whether at least one advertised keyword appears in the body text.
    pub is_good: bool,
    /// Problem description when `is_good` is false.
    pub issue: Option<String>,
    /// The keywords that were found in the body.
    pub matched: Vec<String>,
}

impl Default for KeywordPlacement {
    fn default() -> Self {
        Self {
            is_good: false,
            issue: Some("No title or description keywords to check".to_string()),
            matched: Vec::new(),
        }
    }
}

/// Tokenizes text into lowercase words above the minimum length.
fn tokenize(text: &str) -> Vec<String> {
    let word_regex = Regex::new(r"[\w'-]+").unwrap();
    word_regex
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .collect()
}

/// Checks title and description keywords against the body text.
pub fn extract_keyword_placement(doc: &Document) -> Result<KeywordPlacement> {
    let mut source = String::new();
    if let Some(title) = doc.title() {
        source.push_str(&title);
        source.push(' ');
    }
    if let Some(description) = doc.meta_content("description") {
        source.push_str(&description);
    }

    let mut tokens = tokenize(&source);
    tokens.sort();
    tokens.dedup();

    if tokens.is_empty() {
        return Ok(KeywordPlacement::default());
    }

    let body = doc.normalized_text().to_lowercase();
    let matched: Vec<String> = tokens.into_iter().filter(|t| body.contains(t.as_str())).collect();

    if matched.is_empty() {
        return Ok(KeywordPlacement {
            is_good: false,
            issue: Some("Title and description keywords do not appear in the body".to_string()),
            matched,
        });
    }

    Ok(KeywordPlacement { is_good: true, issue: None, matched })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_found_in_body() {
        let html = r#"
            <head>
                <title>Artisan Coffee Roasting</title>
                <meta name="description" content="Small batch coffee roasted weekly.">
            </head>
            <body><p>We have been roasting artisan coffee since 2009.</p></body>
        "#;
        let doc = Document::parse(html);
        let placement = extract_keyword_placement(&doc).unwrap();

        assert!(placement.is_good);
        assert!(placement.matched.contains(&"coffee".to_string()));
        assert!(placement.matched.contains(&"artisan".to_string()));
    }

    #[test]
    fn test_keywords_absent_from_body() {
        let html = r#"
            <head><title>Quantum Widgets Emporium</title></head>
            <body><p>Totally unrelated text about something else.</p></body>
        "#;
        let doc = Document::parse(html);
        let placement = extract_keyword_placement(&doc).unwrap();

        assert!(!placement.is_good);
        assert!(placement.issue.is_some());
        assert!(placement.matched.is_empty());
    }

    #[test]
    fn test_no_keyword_sources() {
        let doc = Document::parse("<body><p>Body with no title or description.</p></body>");
        let placement = extract_keyword_placement(&doc).unwrap();

        assert!(!placement.is_good);
        assert_eq!(placement.issue, Some("No title or description keywords to check".to_string()));
    }

    #[test]
    fn test_tokenize_filters_short_words() {
        let tokens = tokenize("The big red fox ran far away");
        assert!(tokens.contains(&"away".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"fox".to_string()));
    }
}
