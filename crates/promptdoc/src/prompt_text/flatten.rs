//! Recursive, total flattening of JSON values into prompt text.

use serde_json::{Number, Value};

/// Flatten a value into a single line of text.
///
/// - `null` → `""`
/// - array → flattened items, empty ones dropped, joined with `", "`
/// - object → `key: value` for every key whose value is non-empty, joined with `", "`
/// - string → trimmed
/// - number / boolean → their plain text form
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => join_non_empty(items.iter().map(to_text), ", "),
        Value::Object(map) => join_non_empty(
            map.iter().filter_map(|(k, v)| {
                let t = to_text(v);
                (!t.is_empty()).then(|| format!("{k}: {t}"))
            }),
            ", ",
        ),
    }
}

/// Join the non-empty strings of `parts` with `sep`.
pub(crate) fn join_non_empty(parts: impl Iterator<Item = String>, sep: &str) -> String {
    parts.filter(|p| !p.is_empty()).collect::<Vec<_>>().join(sep)
}

/// Integral floats below 1e21 print as plain digits, so `170.0` reads as
/// `170` and `1e20` as `100000000000000000000`. Everything else keeps
/// serde_json's form.
fn number_text(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f == 0.0 {
                return "0".to_string();
            }
            if f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{f}");
            }
        }
    }
    n.to_string()
}
