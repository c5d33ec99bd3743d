//! Core types for the JSON Patch module.
//!
//! Operation payloads are kept as serialized JSON text and parsed only when
//! the operation is applied, so malformed generator output surfaces as a
//! [`PatchError::PayloadParse`] tied to the failing operation.

use serde_json::Value;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Invalid JSON pointer (must start with \"/\"): {pointer}")]
    PointerSyntax { pointer: String },
    #[error("{reason}, got \"{segment}\" in {pointer}")]
    PointerType {
        segment: String,
        pointer: String,
        reason: &'static str,
    },
    #[error("valueText is not valid JSON for {pointer}: {message}")]
    PayloadParse { pointer: String, message: String },
    #[error("Refusing to remove root object")]
    RootRemoval,
    #[error("Array index {index} in {pointer} is too far past the end (length {len})")]
    IndexTooFar {
        index: usize,
        len: usize,
        pointer: String,
    },
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
}

/// A failed batch: the operation that failed and why.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Error in operation [index = {index}] ({op} at \"{path}\"): {source}")]
pub struct ApplyError {
    pub index: usize,
    pub op: &'static str,
    pub path: String,
    #[source]
    pub source: PatchError,
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A patch operation as produced by the instruction-to-patch generator.
///
/// `path` is the raw JSON Pointer string and `value_text` is serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Add { path: String, value_text: String },
    Replace { path: String, value_text: String },
    Remove { path: String },
}

impl Op {
    pub fn add(path: impl Into<String>, value: &Value) -> Self {
        Op::Add {
            path: path.into(),
            value_text: value.to_string(),
        }
    }

    pub fn replace(path: impl Into<String>, value: &Value) -> Self {
        Op::Replace {
            path: path.into(),
            value_text: value.to_string(),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Op::Remove { path: path.into() }
    }

    /// Returns the operation name as it appears on the wire.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Replace { .. } => "replace",
            Op::Remove { .. } => "remove",
        }
    }

    /// Returns the raw pointer of the operation.
    pub fn path(&self) -> &str {
        match self {
            Op::Add { path, .. } | Op::Replace { path, .. } | Op::Remove { path } => path,
        }
    }

    /// Returns the serialized value payload, if the operation carries one.
    pub fn value_text(&self) -> Option<&str> {
        match self {
            Op::Add { value_text, .. } | Op::Replace { value_text, .. } => Some(value_text),
            Op::Remove { .. } => None,
        }
    }
}

// ── Options ───────────────────────────────────────────────────────────────

/// Options for [`apply_patch_with`](super::apply_patch_with).
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// How many `null` slots an index may pad onto the end of an array
    /// before the operation is rejected with [`PatchError::IndexTooFar`].
    pub max_array_gap: usize,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            max_array_gap: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_serialize_values() {
        let op = Op::add("/body/type", &json!("slim"));
        assert_eq!(op.value_text(), Some("\"slim\""));
        assert_eq!(op.op_name(), "add");
        assert_eq!(op.path(), "/body/type");

        let op = Op::remove("/face");
        assert_eq!(op.value_text(), None);
        assert_eq!(op.op_name(), "remove");
    }

    #[test]
    fn apply_error_message_names_the_operation() {
        let err = ApplyError {
            index: 2,
            op: "remove",
            path: String::new(),
            source: PatchError::RootRemoval,
        };
        assert_eq!(
            err.to_string(),
            "Error in operation [index = 2] (remove at \"\"): Refusing to remove root object"
        );
    }
}
