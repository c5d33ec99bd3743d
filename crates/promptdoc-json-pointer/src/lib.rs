//! JSON Pointer (RFC 6901) utilities for prompt documents.
//!
//! Parsing is strict about the leading `/` but treats both `""` and `"/"` as
//! the document root, which is what the patch engine expects from generated
//! operations.
//!
//! # Example
//!
//! ```
//! use promptdoc_json_pointer::{format_json_pointer, parse_json_pointer};
//!
//! let path = parse_json_pointer("/body/profile/height").unwrap();
//! assert_eq!(path, vec!["body", "profile", "height"]);
//! assert_eq!(format_json_pointer(&path), "/body/profile/height");
//!
//! assert!(parse_json_pointer("/").unwrap().is_empty());
//! assert!(parse_json_pointer("body").is_err());
//! ```

use thiserror::Error;

pub mod types;
pub use types::{ContainerKind, Path, PathStep, Step};

pub mod validate;
pub use validate::validate_json_pointer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("Invalid JSON pointer (must start with \"/\"): {pointer}")]
    PointerInvalid { pointer: String },
}

/// Unescapes a JSON Pointer path component.
///
/// `~1` is replaced with `/` first, then `~0` with `~`.
///
/// ```
/// use promptdoc_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use promptdoc_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // `~` first, otherwise the `~1` produced for `/` would be re-escaped.
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into unescaped path components.
///
/// - `""` and `"/"` return an empty path (the root)
/// - any other pointer must start with `/`
/// - empty components are kept: `"/a/"` is `["a", ""]`
pub fn parse_json_pointer(pointer: &str) -> Result<Path, JsonPointerError> {
    validate_json_pointer(pointer)?;
    if pointer.is_empty() || pointer == "/" {
        return Ok(Vec::new());
    }
    Ok(pointer[1..].split('/').map(unescape_component).collect())
}

/// Format path components into a JSON Pointer string.
///
/// Returns an empty string for the root path.
pub fn format_json_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Render a pointer as a dotted path (`/body/profile/height` → `body.profile.height`).
///
/// Empty components are skipped. Pointers without a leading `/` are accepted
/// here because the result is only used for display.
pub fn to_dot_path(pointer: &str) -> String {
    pointer
        .strip_prefix('/')
        .unwrap_or(pointer)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(unescape_component)
        .collect::<Vec<_>>()
        .join(".")
}

/// Check if a path points to the root value.
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Check if a string consists only of ASCII digits.
///
/// Leading zeros are allowed: `"007"` is index 7.
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Check if a step looks like an array position: digits or the `-` append marker.
pub fn is_array_step(step: &str) -> bool {
    step == "-" || is_integer(step)
}
