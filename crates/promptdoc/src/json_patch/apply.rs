//! JSON Patch apply logic.
//!
//! Paths are resolved with a create-path policy: while walking to the parent
//! of the target, a missing, `null` or scalar value is overwritten with a new
//! container instead of failing. The container is an array when the step
//! that addresses into it is `-` or digits, and an object otherwise. This
//! silently discards a scalar that sits on a miswritten path; a warning is
//! logged whenever that happens.

use promptdoc_json_pointer::{parse_json_pointer, ContainerKind, Step};
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{ApplyError, ApplyOptions, Op, PatchError};

const NUMERIC_SEGMENT: &str = "Array path segment must be numeric";
const NUMERIC_REMOVE: &str = "Array remove index must be numeric";
const NUMERIC_OR_APPEND: &str = "Array index must be numeric or \"-\"";
const APPEND_ONLY_FOR_ADD: &str = "Append marker \"-\" is only valid for add";

// ── Helpers ───────────────────────────────────────────────────────────────

fn parse_value(pointer: &str, value_text: &str) -> Result<Value, PatchError> {
    serde_json::from_str(value_text).map_err(|e| PatchError::PayloadParse {
        pointer: pointer.to_string(),
        message: e.to_string(),
    })
}

fn pointer_type(segment: &str, pointer: &str, reason: &'static str) -> PatchError {
    PatchError::PointerType {
        segment: segment.to_string(),
        pointer: pointer.to_string(),
        reason,
    }
}

/// Replace `slot` with an empty container unless it already is one.
///
/// An existing container is kept even if its kind differs from `kind`.
fn ensure_container(slot: &mut Value, kind: ContainerKind, pointer: &str, step: &str) {
    match slot {
        Value::Array(_) | Value::Object(_) => {}
        Value::Null => *slot = kind.empty(),
        _ => {
            warn!(pointer, step, "overwriting scalar with a new container on create-path");
            *slot = kind.empty();
        }
    }
}

/// Pad `arr` with `null` up to (not including) `idx`.
fn pad_to(arr: &mut Vec<Value>, idx: usize, pointer: &str, options: &ApplyOptions) -> Result<(), PatchError> {
    if idx <= arr.len() {
        return Ok(());
    }
    if idx - arr.len() > options.max_array_gap {
        return Err(PatchError::IndexTooFar {
            index: idx,
            len: arr.len(),
            pointer: pointer.to_string(),
        });
    }
    arr.resize(idx, Value::Null);
    Ok(())
}

// ── Traversal ─────────────────────────────────────────────────────────────

/// Walk `parents`, creating containers as needed, and return the parent of `last`.
fn resolve_parent<'a>(
    root: &'a mut Value,
    parents: &[String],
    last: &str,
    pointer: &str,
    options: &ApplyOptions,
) -> Result<&'a mut Value, PatchError> {
    ensure_container(root, ContainerKind::Object, pointer, "");

    let mut cursor = root;
    for (i, step) in parents.iter().enumerate() {
        let next = parents.get(i + 1).map(String::as_str).unwrap_or(last);
        let kind = ContainerKind::for_next_step(next);
        let slot = match cursor {
            Value::Array(arr) => {
                let idx = match Step::classify(step) {
                    Step::Index(idx) => idx,
                    Step::Append | Step::Key(_) => {
                        return Err(pointer_type(step, pointer, NUMERIC_SEGMENT))
                    }
                };
                if idx >= arr.len() {
                    pad_to(arr, idx, pointer, options)?;
                    arr.push(Value::Null);
                }
                &mut arr[idx]
            }
            Value::Object(map) => map.entry(step.clone()).or_insert(Value::Null),
            _ => {
                return Err(PatchError::InvalidOp(format!(
                    "cannot traverse into a scalar at {pointer}"
                )))
            }
        };
        ensure_container(slot, kind, pointer, step);
        cursor = slot;
    }
    Ok(cursor)
}

// ── Final-step applicators ────────────────────────────────────────────────

fn apply_remove(parent: &mut Value, last: &str, pointer: &str) -> Result<(), PatchError> {
    match parent {
        Value::Array(arr) => match Step::classify(last) {
            Step::Index(idx) => {
                if idx < arr.len() {
                    arr.remove(idx);
                }
                Ok(())
            }
            Step::Append | Step::Key(_) => Err(pointer_type(last, pointer, NUMERIC_REMOVE)),
        },
        Value::Object(map) => {
            map.remove(last);
            Ok(())
        }
        _ => Err(PatchError::InvalidOp(format!("no container at {pointer}"))),
    }
}

fn apply_add(parent: &mut Value, last: &str, value: Value, pointer: &str) -> Result<(), PatchError> {
    match parent {
        Value::Array(arr) => match Step::classify(last) {
            Step::Append => {
                arr.push(value);
                Ok(())
            }
            Step::Index(idx) => {
                let idx = idx.min(arr.len());
                arr.insert(idx, value);
                Ok(())
            }
            Step::Key(_) => Err(pointer_type(last, pointer, NUMERIC_OR_APPEND)),
        },
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        _ => Err(PatchError::InvalidOp(format!("no container at {pointer}"))),
    }
}

fn apply_replace(
    parent: &mut Value,
    last: &str,
    value: Value,
    pointer: &str,
    options: &ApplyOptions,
) -> Result<(), PatchError> {
    match parent {
        Value::Array(arr) => match Step::classify(last) {
            Step::Index(idx) if idx < arr.len() => {
                arr[idx] = value;
                Ok(())
            }
            Step::Index(idx) => {
                pad_to(arr, idx, pointer, options)?;
                arr.push(value);
                Ok(())
            }
            Step::Append => Err(pointer_type(last, pointer, APPEND_ONLY_FOR_ADD)),
            Step::Key(_) => Err(pointer_type(last, pointer, NUMERIC_SEGMENT)),
        },
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        _ => Err(PatchError::InvalidOp(format!("no container at {pointer}"))),
    }
}

// ── Main apply functions ──────────────────────────────────────────────────

/// Apply a single operation to the document in place.
///
/// The value payload is parsed before anything is touched, but a failing
/// operation may still leave containers created along its path. Use
/// [`apply_patch`] for all-or-nothing semantics.
pub fn apply_op(doc: &mut Value, op: &Op, options: &ApplyOptions) -> Result<(), PatchError> {
    let pointer = op.path();
    let path = parse_json_pointer(pointer).map_err(|_| PatchError::PointerSyntax {
        pointer: pointer.to_string(),
    })?;
    let value = op
        .value_text()
        .map(|text| parse_value(pointer, text))
        .transpose()?;

    let Some((last, parents)) = path.split_last() else {
        return match value {
            Some(value) => {
                *doc = value;
                Ok(())
            }
            None => Err(PatchError::RootRemoval),
        };
    };

    let parent = resolve_parent(doc, parents, last, pointer, options)?;
    match (op, value) {
        (Op::Add { .. }, Some(value)) => apply_add(parent, last, value, pointer),
        (Op::Replace { .. }, Some(value)) => apply_replace(parent, last, value, pointer, options),
        (Op::Remove { .. }, _) => apply_remove(parent, last, pointer),
        (op, None) => Err(PatchError::InvalidOp(format!(
            "missing valueText for {} at {pointer}",
            op.op_name()
        ))),
    }
}

/// Apply a sequence of operations to a copy of `doc` with default options.
///
/// The caller's document is never modified. On the first failing operation
/// the whole batch is abandoned and the failure is returned with its index.
pub fn apply_patch(doc: &Value, ops: &[Op]) -> Result<Value, ApplyError> {
    apply_patch_with(doc, ops, &ApplyOptions::default())
}

/// Apply a sequence of operations to a copy of `doc`.
///
/// An `add` or `replace` at the root ends the batch: its value is the result
/// and any later operations are not applied.
pub fn apply_patch_with(doc: &Value, ops: &[Op], options: &ApplyOptions) -> Result<Value, ApplyError> {
    let mut working = doc.clone();
    for (index, op) in ops.iter().enumerate() {
        debug!(index, op = op.op_name(), path = op.path(), "applying patch op");
        apply_op(&mut working, op, options).map_err(|source| ApplyError {
            index,
            op: op.op_name(),
            path: op.path().to_string(),
            source,
        })?;
        if writes_root(op) {
            let skipped = ops.len() - index - 1;
            if skipped > 0 {
                debug!(index, skipped, "root written, ignoring remaining ops");
            }
            return Ok(working);
        }
    }
    Ok(working)
}

/// Whether `op` is an `add` / `replace` whose pointer addresses the root.
fn writes_root(op: &Op) -> bool {
    op.value_text().is_some()
        && parse_json_pointer(op.path()).is_ok_and(|path| path.is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────
