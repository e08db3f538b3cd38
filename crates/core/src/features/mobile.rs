//! Mobile-friendliness heuristics from static markup.

use regex::Regex;
use serde::Serialize;

use crate::Result;
use crate::parse::Document;

/// Mobile readiness signals with a 0-100 sub-score.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MobileFriendliness {
    /// Whether a viewport meta tag exists.
    pub has_viewport: bool,
    /// Whether the viewport declares `width=device-width`.
    pub responsive_viewport: bool,
    /// Elements with wide fixed pixel widths in inline styles.
    pub fixed_width_elements: usize,
    /// Inline styles declaring fonts smaller than 12px.
    pub small_font_hints: usize,
    /// Sub-score, 0-100.
    pub score: u8,
}

/// Checks viewport configuration and inline styling hostile to small screens.
pub fn extract_mobile_friendliness(doc: &Document) -> Result<MobileFriendliness> {
    let viewport = doc.meta_content("viewport");
    let has_viewport = viewport.is_some();
    let responsive_viewport = viewport
        .as_deref()
        .map(|v| v.to_lowercase().replace(' ', "").contains("width=device-width"))
        .unwrap_or(false);

    // The guard before "width" keeps max-width/min-width from matching.
    let fixed_width_regex = Regex::new(r"(?:^|[;\s])width:\s*([5-9]\d{2}|\d{4,})px").unwrap();
    let small_font_regex = Regex::new(r"font-size:\s*(\d+)px").unwrap();

    let mut fixed_width_elements = 0;
    let mut small_font_hints = 0;

    for el in doc.select("[style]")? {
        let Some(style) = el.attr("style") else { continue };
        if fixed_width_regex.is_match(style) {
            fixed_width_elements += 1;
        }
        if let Some(caps) = small_font_regex.captures(style)
            && let Some(size) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok())
            && size < 12
        {
            small_font_hints += 1;
        }
    }

    let mut score = 0u8;
    if has_viewport {
        score += 40;
    }
    if responsive_viewport {
        score += 20;
    }
    if fixed_width_elements == 0 {
        score += 20;
    }
    if small_font_hints == 0 {
        score += 20;
    }

    Ok(MobileFriendliness {
        has_viewport,
        responsive_viewport,
        fixed_width_elements,
        small_font_hints,
        score,
    })
}
