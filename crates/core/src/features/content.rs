//! Content quality heuristics.

use regex::Regex;
use serde::Serialize;

use crate::Result;
use crate::parse::{Document, normalize_whitespace};

// Band within which body length is considered healthy.
const WORD_COUNT_MIN: usize = 300;
const WORD_COUNT_MAX: usize = 2500;
const MIN_PARAGRAPHS: usize = 2;
const MIN_TEXT_RATIO: f64 = 0.10;

/// Body copy quality with a 0-100 sub-score.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentQuality {
    /// Words in the visible body text.
    pub word_count: usize,
    /// Paragraph elements with meaningful text.
    pub paragraph_count: usize,
    /// Average words per paragraph (0 when there are none).
    pub avg_paragraph_words: usize,
    /// Visible text characters relative to raw markup size.
    pub text_ratio: f64,
    /// Whether the content clears the combined quality bar.
    pub is_good: bool,
    /// Sub-score, 0-100.
    pub score: u8,
}

/// Count words in text, handling punctuation and apostrophes.
pub fn count_words(text: &str) -> usize {
    let word_regex = Regex::new(r"\b[\w'-]+\b").unwrap();
    word_regex.find_iter(text).count()
}

/// Measures body copy depth and density.
pub fn extract_content_quality(doc: &Document, raw_len: usize) -> Result<ContentQuality> {
    let text = doc.normalized_text();
    let word_count = count_words(&text);

    let paragraphs = doc.select("p")?;
    let mut paragraph_count = 0;
    let mut paragraph_words = 0;
    for p in &paragraphs {
        let words = count_words(&normalize_whitespace(&p.visible_text()));
        if words > 0 {
            paragraph_count += 1;
            paragraph_words += words;
        }
    }
    let avg_paragraph_words = if paragraph_count > 0 { paragraph_words / paragraph_count } else { 0 };

    let text_ratio = if raw_len > 0 {
        text.chars().count() as f64 / raw_len as f64
    } else {
        0.0
    };

    let word_count_ok = word_count >= WORD_COUNT_MIN && word_count <= WORD_COUNT_MAX;
    let is_good = word_count_ok && paragraph_count >= MIN_PARAGRAPHS && text_ratio >= MIN_TEXT_RATIO;

    let mut score = 0u8;
    if word_count_ok {
        score += 40;
    }
    if paragraph_count >= MIN_PARAGRAPHS {
        score += 20;
    }
    if text_ratio >= MIN_TEXT_RATIO {
        score += 20;
    }
    if avg_paragraph_words >= 20 && avg_paragraph_words <= 200 {
        score += 20;
    }

    Ok(ContentQuality {
        word_count,
        paragraph_count,
        avg_paragraph_words,
        text_ratio,
        is_good,
        score,
    })
}
