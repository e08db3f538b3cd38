//! Static accessibility cues.
//!
//! A heuristic pass over the markup, not a real accessibility audit: no
//! contrast checks, no focus-order analysis, no assistive-technology
//! simulation.

use std::collections::HashSet;

use serde::Serialize;

use crate::Result;
use crate::parse::Document;

// Fixed deductions from the starting score of 100.
const MISSING_ALT_PENALTY: i32 = 5;
const MISSING_ALT_CAP: i32 = 30;
const UNLABELED_INPUT_PENALTY: i32 = 5;
const UNLABELED_INPUT_CAP: i32 = 25;
const MISSING_LANDMARK_PENALTY: i32 = 15;
const SKIPPED_HEADING_PENALTY: i32 = 10;
const MISSING_LANG_PENALTY: i32 = 10;

/// Input types that do not need a visible label.
const UNLABELED_OK_TYPES: [&str; 5] = ["hidden", "submit", "button", "reset", "image"];

/// Accessibility cues with a 0-100 sub-score.
#[derive(Debug, Clone, Serialize)]
pub struct AccessibilityAudit {
    /// Images without alt text.
    pub missing_alt: usize,
    /// Form controls with no label, aria-label, or aria-labelledby.
    pub unlabeled_inputs: usize,
    /// Whether a `<main>` landmark (or `role="main"`) exists.
    pub has_main_landmark: bool,
    /// Whether the heading hierarchy skips levels.
    pub skipped_heading_levels: bool,
    /// Whether the root element declares a language.
    pub missing_lang: bool,
    /// Sub-score: starts at 100, fixed penalties subtracted, floored at 0.
    pub score: u8,
}

impl Default for AccessibilityAudit {
    fn default() -> Self {
        Self {
            missing_alt: 0,
            unlabeled_inputs: 0,
            has_main_landmark: false,
            skipped_heading_levels: false,
            missing_lang: false,
            score: 100,
        }
    }
}

/// Runs the static accessibility checklist.
pub fn extract_accessibility(doc: &Document) -> Result<AccessibilityAudit> {
    let missing_alt = doc
        .select("img")?
        .iter()
        .filter(|img| !img.has_attr("alt"))
        .count();

    let labelled_ids: HashSet<String> = doc
        .select("label[for]")?
        .iter()
        .filter_map(|label| label.attr("for"))
        .map(str::to_string)
        .collect();

    let mut unlabeled_inputs = 0;
    for control in doc.select("input, select, textarea")? {
        let input_type = control.attr("type").unwrap_or("text").to_lowercase();
        if UNLABELED_OK_TYPES.contains(&input_type.as_str()) {
            continue;
        }
        let labelled = control
            .attr("id")
            .map(|id| labelled_ids.contains(id))
            .unwrap_or(false)
            || control.has_attr("aria-label")
            || control.has_attr("aria-labelledby")
            || control.has_attr("title");
        if !labelled {
            unlabeled_inputs += 1;
        }
    }

    let has_main_landmark = !doc.select("main")?.is_empty() || !doc.select("[role=\"main\"]")?.is_empty();

    let levels: Vec<u8> = doc
        .select("h1, h2, h3, h4, h5, h6")?
        .iter()
        .filter_map(|el| el.tag_name().strip_prefix('h').and_then(|n| n.parse().ok()))
        .collect();
    let skipped_heading_levels = levels.windows(2).any(|pair| pair[1] > pair[0] + 1);

    let missing_lang = doc.lang().is_none();

    let mut score: i32 = 100;
    score -= (missing_alt as i32 * MISSING_ALT_PENALTY).min(MISSING_ALT_CAP);
    score -= (unlabeled_inputs as i32 * UNLABELED_INPUT_PENALTY).min(UNLABELED_INPUT_CAP);
    if !has_main_landmark {
        score -= MISSING_LANDMARK_PENALTY;
    }
    if skipped_heading_levels {
        score -= SKIPPED_HEADING_PENALTY;
    }
    if missing_lang {
        score -= MISSING_LANG_PENALTY;
    }

    Ok(AccessibilityAudit {
        missing_alt,
        unlabeled_inputs,
        has_main_landmark,
        skipped_heading_levels,
        missing_lang,
        score: score.max(0) as u8,
    })
}
