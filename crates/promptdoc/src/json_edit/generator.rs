//! The instruction-to-patch capability and normalization of its output.
//!
//! Generator output is untrusted: [`parse_generated_edit`] keeps only
//! well-formed `add` / `replace` / `remove` entries and never fails on an
//! odd operation, only on text that is not JSON at all.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::json_patch::Op;

/// How many trailing characters of unparsable output are kept for diagnosis.
const OUTPUT_TAIL_CHARS: usize = 500;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Generator transport failed: {0}")]
    Transport(String),
    #[error("Generator response not completed. status={status} {error}")]
    Incomplete { status: String, error: String },
    #[error("Generator returned empty output. {error}")]
    EmptyOutput { error: String },
    #[error("Model returned invalid JSON: {message}. Tail: {tail}")]
    InvalidJson { message: String, tail: String },
}

/// What the generator is asked to do.
#[derive(Debug, Clone, Copy)]
pub struct EditRequest<'a> {
    pub instruction: &'a str,
    pub document: &'a Value,
}

/// Normalized generator output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedEdit {
    pub ops: Vec<Op>,
    pub summary: String,
    pub changed_paths: Vec<String>,
}

/// Turns an instruction and a document into patch operations.
pub trait PatchGenerator {
    fn generate(&self, request: &EditRequest<'_>) -> Result<GeneratedEdit, GeneratorError>;
}

impl<F> PatchGenerator for F
where
    F: Fn(&EditRequest<'_>) -> Result<GeneratedEdit, GeneratorError>,
{
    fn generate(&self, request: &EditRequest<'_>) -> Result<GeneratedEdit, GeneratorError> {
        self(request)
    }
}

/// Parse the `{ops, summary, changedPaths}` object a model produced.
///
/// - a missing or non-array `ops` yields no operations
/// - operations with an unknown `op` or a non-string `path` are dropped
/// - `add` / `replace` without a string `valueText` get `"null"`
/// - non-string `changedPaths` entries are dropped
pub fn parse_generated_edit(text: &str) -> Result<GeneratedEdit, GeneratorError> {
    let parsed: Value = serde_json::from_str(text).map_err(|e| GeneratorError::InvalidJson {
        message: e.to_string(),
        tail: tail(text, OUTPUT_TAIL_CHARS),
    })?;

    let ops = match parsed.get("ops") {
        Some(Value::Array(raw)) => normalize_ops(raw),
        _ => Vec::new(),
    };
    let summary = parsed
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let changed_paths = match parsed.get("changedPaths") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(GeneratedEdit {
        ops,
        summary,
        changed_paths,
    })
}

fn normalize_ops(raw: &[Value]) -> Vec<Op> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, op)| {
            let normalized = normalize_op(op);
            if normalized.is_none() {
                warn!(index, op = %op, "dropping malformed generator op");
            }
            normalized
        })
        .collect()
}

fn normalize_op(op: &Value) -> Option<Op> {
    let path = op.get("path")?.as_str()?.to_string();
    let value_text = || {
        op.get("valueText")
            .and_then(Value::as_str)
            .unwrap_or("null")
            .to_string()
    };
    match op.get("op")?.as_str()? {
        "add" => Some(Op::Add {
            value_text: value_text(),
            path,
        }),
        "replace" => Some(Op::Replace {
            value_text: value_text(),
            path,
        }),
        "remove" => Some(Op::Remove { path }),
        _ => None,
    }
}

fn tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(max_chars)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_output() {
        let edit = parse_generated_edit(
            r#"{"ops":[{"op":"add","path":"/body/profile/height","valueText":"\"170cm\""}],
                "summary":"Tinggi ditambahkan","changedPaths":["body.profile.height"]}"#,
        )
        .unwrap();
        assert_eq!(
            edit.ops,
            vec![Op::Add {
                path: "/body/profile/height".into(),
                value_text: "\"170cm\"".into()
            }]
        );
        assert_eq!(edit.summary, "Tinggi ditambahkan");
        assert_eq!(edit.changed_paths, vec!["body.profile.height"]);
    }

    #[test]
    fn drops_unknown_and_pathless_ops() {
        let edit = parse_generated_edit(
            r#"{"ops":[
                {"op":"move","path":"/a"},
                {"op":"remove"},
                {"op":"remove","path":7},
                {"op":"remove","path":"/keep"},
                "garbage"
            ]}"#,
        )
        .unwrap();
        assert_eq!(edit.ops, vec![Op::Remove { path: "/keep".into() }]);
    }

    #[test]
    fn missing_value_text_defaults_to_null() {
        let edit = parse_generated_edit(
            r#"{"ops":[{"op":"add","path":"/a"},{"op":"replace","path":"/b","valueText":5}]}"#,
        )
        .unwrap();
        assert_eq!(edit.ops[0].value_text(), Some("null"));
        assert_eq!(edit.ops[1].value_text(), Some("null"));
    }

    #[test]
    fn missing_fields_are_empty() {
        let edit = parse_generated_edit(r#"{"changedPaths":["a", 1, null]}"#).unwrap();
        assert!(edit.ops.is_empty());
        assert_eq!(edit.summary, "");
        assert_eq!(edit.changed_paths, vec!["a"]);
    }

    #[test]
    fn invalid_json_keeps_tail() {
        let text = format!("{}{{", "x".repeat(600));
        match parse_generated_edit(&text) {
            Err(GeneratorError::InvalidJson { tail, .. }) => {
                assert_eq!(tail.chars().count(), 500);
                assert!(tail.ends_with('{'));
            }
            other => panic!("expected InvalidJson, got {other:?}"),
        }
    }

    fn echo(req: &EditRequest<'_>) -> Result<GeneratedEdit, GeneratorError> {
        Ok(GeneratedEdit {
            summary: req.instruction.to_string(),
            ..GeneratedEdit::default()
        })
    }

    #[test]
    fn functions_are_generators() {
        let doc = serde_json::json!({});
        let request = EditRequest {
            instruction: "noop",
            document: &doc,
        };
        let out = PatchGenerator::generate(&echo, &request).unwrap();
        assert_eq!(out.summary, "noop");
    }
}
