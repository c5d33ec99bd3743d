//! JSON codec for patch operations.
//!
//! Wire format, one object per operation:
//!
//! ```json
//! {"op": "add", "path": "/body/profile/height", "valueText": "\"170cm\""}
//! ```
//!
//! `valueText` holds serialized JSON and is required for `add` and
//! `replace`. It is ignored for `remove`.

use serde_json::{json, Value};

use crate::json_patch::types::{Op, PatchError};

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to its wire form.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value_text } => json!({
            "op": "add",
            "path": path,
            "valueText": value_text
        }),
        Op::Replace { path, value_text } => json!({
            "op": "replace",
            "path": path,
            "valueText": value_text
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": path
        }),
    }
}

/// Serialize a list of operations to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize a wire operation into an `Op`.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let op_str = obj
        .get("op")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PatchError::InvalidOp("missing 'op' field".into()))?;
    let path = obj
        .get("path")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PatchError::InvalidOp("'path' must be a string".into()))?
        .to_string();

    let value_text = || -> Result<String, PatchError> {
        obj.get("valueText")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| PatchError::InvalidOp(format!("Missing valueText for {op_str} at {path}")))
    };

    match op_str {
        "add" => Ok(Op::Add {
            value_text: value_text()?,
            path,
        }),
        "replace" => Ok(Op::Replace {
            value_text: value_text()?,
            path,
        }),
        "remove" => Ok(Op::Remove { path }),
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

/// Deserialize a JSON array into a list of operations.
///
/// Fails on the first malformed entry and names its index.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    arr.iter()
        .enumerate()
        .map(|(i, op)| {
            from_json(op).map_err(|e| match e {
                PatchError::InvalidOp(msg) => {
                    PatchError::InvalidOp(format!("operation [index = {i}]: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}
