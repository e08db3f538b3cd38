//! Image statistics and optimization signals.

use serde::Serialize;

use crate::Result;
use crate::parse::Document;

/// Declared dimensions beyond which an image is treated as oversized.
/// This is a cheap proxy for unoptimized assets; actual byte sizes are
/// never inspected.
const OVERSIZED_WIDTH: u32 = 1200;
const OVERSIZED_HEIGHT: u32 = 800;

/// Basic image counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageStats {
    /// Total `<img>` elements on the page.
    pub total: usize,
    /// Images without a non-empty `alt` attribute.
    pub missing_alt: usize,
    /// Images whose declared width/height exceed the oversized threshold.
    pub oversized: usize,
}

/// Deeper image optimization audit with a 0-100 sub-score.
#[derive(Debug, Clone, Serialize)]
pub struct ImageAudit {
    /// Images served in a modern format (webp, avif, svg).
    pub modern_format: usize,
    /// Images with `loading="lazy"`.
    pub lazy_loaded: usize,
    /// Images carrying a `srcset` for responsive serving.
    pub with_srcset: usize,
    /// Images with explicit width and height attributes.
    pub with_dimensions: usize,
    /// Optimization sub-score, 0-100.
    pub score: u8,
}

impl Default for ImageAudit {
    fn default() -> Self {
        Self { modern_format: 0, lazy_loaded: 0, with_srcset: 0, with_dimensions: 0, score: 100 }
    }
}

/// Counts images, missing alt text, and oversized declarations.
pub fn extract_image_stats(doc: &Document) -> Result<ImageStats> {
    let images = doc.select("img")?;
    let mut stats = ImageStats { total: images.len(), ..Default::default() };

    for img in &images {
        if !img.has_attr("alt") {
            stats.missing_alt += 1;
        }

        let width: Option<u32> = img.attr("width").and_then(|w| w.trim().parse().ok());
        let height: Option<u32> = img.attr("height").and_then(|h| h.trim().parse().ok());

        if width.map(|w| w > OVERSIZED_WIDTH).unwrap_or(false)
            || height.map(|h| h > OVERSIZED_HEIGHT).unwrap_or(false)
        {
            stats.oversized += 1;
        }
    }

    Ok(stats)
}

/// Audits image delivery practices and produces a sub-score.
///
/// A page with no images scores 100; there is nothing to optimize.
pub fn extract_image_audit(doc: &Document) -> Result<ImageAudit> {
    let images = doc.select("img")?;
    let total = images.len();

    if total == 0 {
        return Ok(ImageAudit::default());
    }

    let mut audit = ImageAudit { score: 0, ..Default::default() };

    for img in &images {
        let src = img.attr("src").unwrap_or("").to_lowercase();
        if src.ends_with(".webp") || src.ends_with(".avif") || src.ends_with(".svg") {
            audit.modern_format += 1;
        }
        if img.attr("loading").map(|l| l.eq_ignore_ascii_case("lazy")).unwrap_or(false) {
            audit.lazy_loaded += 1;
        }
        if img.has_attr("srcset") {
            audit.with_srcset += 1;
        }
        if img.has_attr("width") && img.has_attr("height") {
            audit.with_dimensions += 1;
        }
    }

    let missing_alt = images.iter().filter(|img| !img.has_attr("alt")).count();

    // Tuned deductions; each reflects one delivery practice.
    let mut score: i32 = 100;
    if missing_alt * 10 > total {
        score -= 20;
    }
    if audit.with_dimensions * 2 < total {
        score -= 20;
    }
    if audit.lazy_loaded == 0 && total > 3 {
        score -= 20;
    }
    if audit.with_srcset == 0 {
        score -= 20;
    }
    if audit.modern_format == 0 {
        score -= 20;
    }

    audit.score = score.max(0) as u8;
    Ok(audit)
}
