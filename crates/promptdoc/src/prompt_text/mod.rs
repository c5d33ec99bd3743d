//! Deterministic prompt-text compiler.
//!
//! Renders a prompt document into a positive description built from the
//! known sections and a consolidated negative list built from
//! `global_negative_prompt` and every section's `avoid` array.
//!
//! Rendering never fails. Unknown sections, unlisted fields and values of
//! the wrong shape contribute nothing.
//!
//! # Example
//!
//! ```
//! use promptdoc::prompt_text::render;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "hair": {"color": "black", "style": "bob", "avoid": ["frizz"]},
//!     "global_negative_prompt": ["blurry"]
//! });
//! let r = render(&doc);
//! assert_eq!(r.positive, "Hair: black; bob");
//! assert_eq!(r.negative, "blurry, frizz");
//! ```

pub mod flatten;
pub mod sections;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

pub use flatten::to_text;
pub use sections::{known_section_keys, Section, SectionShape, SECTIONS};

use flatten::join_non_empty;
use sections::{AVOID_KEY, GLOBAL_NEGATIVE_KEY};

/// The derived text of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendering {
    pub positive: String,
    pub negative: String,
}

impl Rendering {
    /// `Positive: ...`, followed by a blank line and `Negative: ...` when
    /// there are negatives.
    pub fn to_block(&self) -> String {
        let mut out = format!("Positive: {}", self.positive);
        if !self.negative.trim().is_empty() {
            out.push_str("\n\nNegative: ");
            out.push_str(&self.negative);
        }
        out
    }
}

/// Render a document. A non-object document renders as empty.
pub fn render(doc: &Value) -> Rendering {
    let Some(root) = doc.as_object() else {
        return Rendering::default();
    };

    let lines = SECTIONS
        .iter()
        .filter_map(|section| root.get(section.key).map(|v| section_line(section, v)));

    Rendering {
        positive: join_non_empty(lines, ". "),
        negative: dedup_phrases(collect_negatives(root)).join(", "),
    }
}

/// Render a document straight to the block format stored with each revision.
pub fn format_prompt_block(doc: &Value) -> String {
    render(doc).to_block()
}

fn section_line(section: &Section, value: &Value) -> String {
    match (section.shape, value) {
        (SectionShape::List, Value::Array(items)) => {
            // An empty list still yields its label, matching stored renderings.
            format!("{}: {}", section.label, join_non_empty(items.iter().map(to_text), ", "))
        }
        (SectionShape::Fields(fields), Value::Object(map)) => {
            let body = join_non_empty(
                fields
                    .iter()
                    .filter(|k| **k != AVOID_KEY && **k != GLOBAL_NEGATIVE_KEY)
                    .filter_map(|k| map.get(*k))
                    .map(to_text),
                "; ",
            );
            if body.is_empty() {
                String::new()
            } else {
                format!("{}: {body}", section.label)
            }
        }
        _ => String::new(),
    }
}

fn collect_negatives(root: &Map<String, Value>) -> Vec<&Value> {
    let mut out = Vec::new();
    if let Some(Value::Array(items)) = root.get(GLOBAL_NEGATIVE_KEY) {
        out.extend(items);
    }
    for section in root.values() {
        if let Some(Value::Array(items)) = section.get(AVOID_KEY) {
            out.extend(items);
        }
    }
    out
}

/// Trim, drop empties and keep the first occurrence of each phrase.
fn dedup_phrases(phrases: Vec<&Value>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for phrase in phrases {
        let text = to_text(phrase);
        if !text.is_empty() && seen.insert(text.clone()) {
            out.push(text);
        }
    }
    out
}
