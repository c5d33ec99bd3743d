//! Shared fixtures for the promptdoc integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// A document touching every known section.
pub fn sample_document() -> Value {
    json!({
        "character": {"name": "Ana", "age_appearance": "mid 20s", "vibe": ["calm", "warm"]},
        "face": {"shape": "oval", "eyes": "brown", "avoid": ["acne"]},
        "skin": {"tone": "olive", "texture": "smooth"},
        "hair": {"color": "black", "style": "bob", "length": "short"},
        "body": {"type": "slim", "profile": {"height": "170cm", "build": ""}},
        "makeup": {"style": "natural"},
        "clothing": {"style": "casual", "colors": ["white", "blue"]},
        "accessories": ["silver ring", {"type": "watch", "color": "gold"}],
        "environment": {"location": "cafe", "lighting": "soft"},
        "camera": {"angle": "eye level", "lens": "50mm"},
        "global_negative_prompt": ["blurry", "extra fingers"]
    })
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z ]{0,8}".prop_map(Value::String),
    ]
}

/// Arbitrary JSON values whose object keys never start with `a`, `b` or `c`.
///
/// Keeps generated documents clear of `avoid`, `a` and the `/a/b/c` paths the
/// properties write to.
pub fn arb_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[d-z][a-z]{0,5}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Arbitrary object documents, with the same key restriction as [`arb_value`].
pub fn arb_document() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[d-z][a-z]{0,5}", arb_value(), 0..5)
        .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>()))
}
