//! Heading hierarchy analysis.

use serde::Serialize;

use crate::Result;
use crate::parse::Document;

/// How well the page's heading structure holds together.
#[derive(Debug, Clone, Serialize)]
pub struct HeadingHierarchy {
    /// Whether the heading structure is acceptable.
    pub is_good: bool,
    /// Human-readable problem description when `is_good` is false.
    pub issue: Option<String>,
    /// Number of `<h1>` elements on the page.
    pub h1_count: usize,
    /// Whether any step down the hierarchy skips a level (h1 -> h3).
    pub skips_levels: bool,
}

impl Default for HeadingHierarchy {
    fn default() -> Self {
        Self { is_good: false, issue: Some("No headers found".to_string()), h1_count: 0, skips_levels: false }
    }
}

/// Walks `h1..h6` in document order and flags missing or skipped levels.
pub fn extract_headings(doc: &Document) -> Result<HeadingHierarchy> {
    let headings = doc.select("h1, h2, h3, h4, h5, h6")?;

    let levels: Vec<u8> = headings
        .iter()
        .filter_map(|el| el.tag_name().strip_prefix('h').and_then(|n| n.parse().ok()))
        .collect();

    if levels.is_empty() {
        return Ok(HeadingHierarchy::default());
    }

    let h1_count = levels.iter().filter(|&&l| l == 1).count();
    let skips_levels = levels.windows(2).any(|pair| pair[1] > pair[0] + 1);

    if skips_levels {
        return Ok(HeadingHierarchy {
            is_good: false,
            issue: Some("Header hierarchy skips levels".to_string()),
            h1_count,
            skips_levels,
        });
    }

    Ok(HeadingHierarchy { is_good: true, issue: None, h1_count, skips_levels: false })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_no_headings() {
        let doc = Document::parse("<body><p>text only</p></body>");
        let result = extract_headings(&doc).unwrap();

        assert!(!result.is_good);
        assert_eq!(result.issue, Some("No headers found".to_string()));
        assert_eq!(result.h1_count, 0);
    }

    #[test]
    fn test_skipped_level() {
        let doc = Document::parse("<h1>Main</h1><h3>Sub</h3>");
        let result = extract_headings(&doc).unwrap();

        assert!(!result.is_good);
        assert_eq!(result.issue, Some("Header hierarchy skips levels".to_string()));
        assert!(result.skips_levels);
    }

    #[test]
    fn test_good_hierarchy() {
        let doc = Document::parse("<h1>Main</h1><h2>A</h2><h2>B</h2><h3>B.1</h3>");
        let result = extract_headings(&doc).unwrap();

        assert!(result.is_good);
        assert_eq!(result.issue, None);
        assert_eq!(result.h1_count, 1);
    }

    #[test]
    fn test_stepping_back_up_is_fine() {
        // h3 back to h2 is a step up, not a skip
        let doc = Document::parse("<h1>a</h1><h2>b</h2><h3>c</h3><h2>d</h2>");
        let result = extract_headings(&doc).unwrap();

        assert!(result.is_good);
    }

    #[rstest]
    #[case("<h1>a</h1><h1>b</h1><h1>c</h1>", 3)]
    #[case("<h1>only</h1>", 1)]
    #[case("<h2>no h1</h2>", 0)]
    fn test_h1_count(#[case] html: &str, #[case] expected: usize) {
        let doc = Document::parse(html);
        assert_eq!(extract_headings(&doc).unwrap().h1_count, expected);
    }
}
