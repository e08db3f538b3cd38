//! Structured data detection: JSON-LD blocks and microdata attributes.
//!
//! Detection only; the schema contents are never semantically validated.

use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::parse::Document;

/// Structured data found on the page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaMarkup {
    /// Number of JSON-LD blocks that parsed as valid JSON.
    pub count: usize,
    /// Distinct `@type` values found across the blocks.
    pub types: Vec<String>,
    /// Whether microdata (`itemscope`) markup is present.
    pub microdata: bool,
    /// Sub-score, 0-100.
    pub score: u8,
}

impl SchemaMarkup {
    /// Whether any structured data exists at all.
    pub fn has_any(&self) -> bool {
        self.count > 0 || self.microdata
    }
}

/// Collects `@type` values from a JSON-LD document, including `@graph` entries.
fn collect_types(value: &Value, types: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            match map.get("@type") {
                Some(Value::String(t)) => push_unique(types, t),
                Some(Value::Array(items)) => {
                    for item in items {
                        if let Some(t) = item.as_str() {
                            push_unique(types, t);
                        }
                    }
                }
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_types(graph, types);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_types(item, types);
            }
        }
        _ => {}
    }
}

fn push_unique(types: &mut Vec<String>, t: &str) {
    if !types.iter().any(|existing| existing == t) {
        types.push(t.to_string());
    }
}

/// Detects JSON-LD and microdata markup.
pub fn extract_schema_markup(doc: &Document) -> Result<SchemaMarkup> {
    let mut schema = SchemaMarkup::default();

    for block in doc.select("script[type=\"application/ld+json\"]")? {
        let text = block.text();
        if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
            schema.count += 1;
            collect_types(&value, &mut schema.types);
        }
    }

    schema.microdata = !doc.select("[itemscope]")?.is_empty();

    let mut score = 0u8;
    if schema.count > 0 {
        score += 60;
    }
    if !schema.types.is_empty() {
        score += 20;
    }
    if schema.microdata || schema.count >= 2 {
        score += 20;
    }
    schema.score = score;

    Ok(schema)
}
