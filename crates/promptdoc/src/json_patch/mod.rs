//! JSON Patch subset for prompt documents.
//!
//! # Operations
//!
//! `add`, `replace` and `remove`, addressed by JSON Pointer. Values travel as
//! serialized JSON text (`valueText` on the wire) and are parsed when the
//! operation is applied.
//!
//! Unlike RFC 6902, missing intermediate containers are created on the way
//! to the target (see [`apply`] for the exact policy) and removing an absent
//! object key is not an error.

pub mod types;
pub mod apply;
pub mod codec;

pub use types::{ApplyError, ApplyOptions, Op, PatchError};
pub use apply::{apply_op, apply_patch, apply_patch_with};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
