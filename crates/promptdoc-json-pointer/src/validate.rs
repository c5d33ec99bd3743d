//! Validation functions for JSON Pointer.

use crate::JsonPointerError;

/// Validate a JSON Pointer string.
///
/// # Errors
///
/// Returns an error if the pointer is non-empty but doesn't start with `/`.
///
/// # Example
///
/// ```
/// use promptdoc_json_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/").unwrap();
/// validate_json_pointer("/face/eyes").unwrap();
/// validate_json_pointer("face").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), JsonPointerError> {
    if pointer.is_empty() || pointer.starts_with('/') {
        return Ok(());
    }
    Err(JsonPointerError::PointerInvalid {
        pointer: pointer.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_pointer() {
        assert!(validate_json_pointer("").is_ok());
    }

    #[test]
    fn test_validate_absolute_pointer() {
        assert!(validate_json_pointer("/").is_ok());
        assert!(validate_json_pointer("/foo").is_ok());
        assert!(validate_json_pointer("/foo/bar").is_ok());
    }

    #[test]
    fn test_validate_relative_pointer() {
        assert!(validate_json_pointer("foo").is_err());
        assert!(validate_json_pointer("foo/bar").is_err());
        assert!(validate_json_pointer("~1foo").is_err());
    }
}
