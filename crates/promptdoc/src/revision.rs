//! Versioned prompt revisions.
//!
//! Each saved revision carries its document and the block rendering derived
//! from it. Storing revisions and serializing version assignment is up to
//! the persistence layer.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::prompt_text::format_prompt_block;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevisionError {
    #[error("Version number space exhausted after {last}")]
    VersionOverflow { last: u32 },
}

/// The version number a new revision should get: one past the highest
/// existing number, or 1 for the first revision.
pub fn next_version_no(existing: impl IntoIterator<Item = u32>) -> Result<u32, RevisionError> {
    let last = existing.into_iter().max().unwrap_or(0);
    last.checked_add(1).ok_or(RevisionError::VersionOverflow { last })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRevision {
    pub version_no: u32,
    pub prompt_json: Value,
    pub generated_text: String,
}

impl PromptRevision {
    pub fn new(version_no: u32, prompt_json: Value) -> Self {
        let generated_text = format_prompt_block(&prompt_json);
        Self {
            version_no,
            prompt_json,
            generated_text,
        }
    }

    /// The revision that follows `existing`, for `prompt_json`.
    pub fn next(existing: impl IntoIterator<Item = u32>, prompt_json: Value) -> Result<Self, RevisionError> {
        Ok(Self::new(next_version_no(existing)?, prompt_json))
    }
}
