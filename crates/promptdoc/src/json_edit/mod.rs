//! AI-assisted JSON editing.
//!
//! [`JsonEditor`] runs one edit: it checks the instruction, asks a
//! [`PatchGenerator`] for operations, applies them to a copy of the document
//! and checks the result is still an object. Only the patch-operations flow
//! exists; generators never hand back a whole document.

pub mod generator;
pub mod responses;

use promptdoc_json_pointer::to_dot_path;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::json_patch::{apply_patch_with, ApplyError, ApplyOptions, Op};

pub use generator::{parse_generated_edit, EditRequest, GeneratedEdit, GeneratorError, PatchGenerator};
pub use responses::{extract_output_text, ResponsesConfig, ResponsesGenerator, ResponsesTransport};

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid instruction: {0}")]
    InvalidInstruction(String),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error("Patch application produced non-object JSON")]
    NonObjectResult { ops: Vec<Op> },
}

/// Options for [`JsonEditor`].
#[derive(Debug, Clone)]
pub struct EditOptions {
    /// Longest accepted instruction, in characters.
    pub max_instruction_chars: usize,
    /// Reject edits whose result is not a JSON object.
    pub require_object_result: bool,
    pub apply: ApplyOptions,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            max_instruction_chars: 2000,
            require_object_result: true,
            apply: ApplyOptions::default(),
        }
    }
}

/// The result of a successful edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub document: Value,
    pub summary: String,
    pub changed_paths: Vec<String>,
    pub ops: Vec<Op>,
}

pub struct JsonEditor<G> {
    generator: G,
    options: EditOptions,
}

impl<G: PatchGenerator> JsonEditor<G> {
    pub fn new(generator: G) -> Self {
        Self::with_options(generator, EditOptions::default())
    }

    pub fn with_options(generator: G, options: EditOptions) -> Self {
        Self { generator, options }
    }

    /// Edit `document` according to `instruction`.
    ///
    /// `document` is left untouched; the edited copy is in the outcome.
    pub fn edit(&self, instruction: &str, document: &Value) -> Result<EditOutcome, EditError> {
        self.check_instruction(instruction)?;

        let request = EditRequest {
            instruction,
            document,
        };
        let generated = self.generator.generate(&request)?;
        debug!(ops = generated.ops.len(), "generator returned ops");

        let updated = apply_patch_with(document, &generated.ops, &self.options.apply)?;
        if self.options.require_object_result && !updated.is_object() {
            return Err(EditError::NonObjectResult { ops: generated.ops });
        }

        let changed_paths = if generated.changed_paths.is_empty() {
            derive_changed_paths(&generated.ops)
        } else {
            generated.changed_paths
        };

        Ok(EditOutcome {
            document: updated,
            summary: generated.summary,
            changed_paths,
            ops: generated.ops,
        })
    }

    fn check_instruction(&self, instruction: &str) -> Result<(), EditError> {
        if instruction.trim().is_empty() {
            return Err(EditError::InvalidInstruction("instruction is empty".into()));
        }
        let len = instruction.chars().count();
        if len > self.options.max_instruction_chars {
            return Err(EditError::InvalidInstruction(format!(
                "instruction is {len} characters, limit is {}",
                self.options.max_instruction_chars
            )));
        }
        Ok(())
    }
}

/// Dot paths of the operations' targets, in operation order.
pub fn derive_changed_paths(ops: &[Op]) -> Vec<String> {
    ops.iter().map(|op| to_dot_path(op.path())).collect()
}
