//! Command-line helpers behind the `prompt-patch` and `prompt-text` binaries.
//!
//! - `prompt-patch` — apply wire-format patch operations to a document
//! - `prompt-text`  — render a document to its prompt text

use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::json_patch::{apply_patch, from_json_patch, ApplyError, PatchError};
use crate::prompt_text::render;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Patch(#[from] PatchError),
    #[error("{0}")]
    Apply(#[from] ApplyError),
}

// ── Logging ───────────────────────────────────────────────────────────────

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ── prompt-patch ──────────────────────────────────────────────────────────

/// Apply patch operations to a document.
///
/// `doc_json`: the document as a JSON string.
/// `patch_json`: the operations as a JSON array in wire format.
///
/// Returns the patched document as a pretty-printed JSON string.
pub fn apply_json_patch(doc_json: &str, patch_json: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let ops_raw: Value = serde_json::from_str(patch_json)?;
    let ops = from_json_patch(&ops_raw)?;
    let result = apply_patch(&doc, &ops)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

// ── prompt-text ───────────────────────────────────────────────────────────

/// Render a document.
///
/// With `as_json` the rendering is printed as `{"positive", "negative"}`,
/// otherwise in the `Positive: ... / Negative: ...` block format.
pub fn render_prompt_text(doc_json: &str, as_json: bool) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let rendering = render(&doc);
    if as_json {
        Ok(serde_json::to_string_pretty(&rendering)?)
    } else {
        Ok(rendering.to_block())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_document() {
        let out = apply_json_patch(
            r#"{"body":{"type":"slim"}}"#,
            r#"[{"op":"add","path":"/body/profile/height","valueText":"\"170\""}]"#,
        )
        .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["body"]["profile"]["height"], "170");
    }

    #[test]
    fn patch_reports_bad_document() {
        assert!(matches!(apply_json_patch("{", "[]"), Err(CliError::Json(_))));
    }

    #[test]
    fn patch_reports_bad_ops() {
        let err = apply_json_patch("{}", r#"[{"op":"copy","path":"/a"}]"#).unwrap_err();
        assert!(matches!(err, CliError::Patch(PatchError::InvalidOp(_))));
    }

    #[test]
    fn patch_reports_failing_op() {
        let err = apply_json_patch("{}", r#"[{"op":"remove","path":""}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error in operation [index = 0] (remove at \"\"): Refusing to remove root object"
        );
    }

    #[test]
    fn text_block_and_json() {
        let doc = r#"{"skin":{"tone":"olive","avoid":["shine"]}}"#;
        assert_eq!(
            render_prompt_text(doc, false).unwrap(),
            "Positive: Skin: olive\n\nNegative: shine"
        );
        let v: Value = serde_json::from_str(&render_prompt_text(doc, true).unwrap()).unwrap();
        assert_eq!(v["positive"], "Skin: olive");
        assert_eq!(v["negative"], "shine");
    }
}
