//! promptdoc — patch engine and text compiler for structured prompt documents.
//!
//! A prompt document is a schema-less JSON object (`character`, `face`,
//! `hair`, `body`, ... sections). This crate provides:
//!
//! - [`json_patch`]: applies `add` / `replace` / `remove` operations
//!   addressed by JSON Pointer, creating missing containers on the way
//! - [`prompt_text`]: renders a document into positive and negative prompt
//!   text
//! - [`json_edit`]: runs an instruction through an injected patch generator
//!   and applies the result
//! - [`revision`]: version numbering and stored renderings of revisions

pub mod json_patch;
pub mod prompt_text;
pub mod json_edit;
pub mod revision;
pub mod json_cli;
