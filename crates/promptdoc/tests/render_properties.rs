mod common;

use common::{arb_value, sample_document};
use promptdoc::json_patch::{apply_patch, Op};
use promptdoc::prompt_text::{render, Rendering};
use promptdoc::revision::PromptRevision;
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn unknown_sections_do_not_change_rendering(value in arb_value()) {
        let doc = sample_document();
        let patched = apply_patch(&doc, &[Op::add("/x_custom", &value)]).unwrap();
        prop_assert_eq!(render(&patched), render(&doc));
    }

    #[test]
    fn rendering_is_deterministic(value in arb_value()) {
        let doc = json!({"character": value.clone(), "accessories": [value]});
        prop_assert_eq!(render(&doc), render(&doc.clone()));
    }
}

#[test]
fn full_document() {
    let r = render(&sample_document());
    assert_eq!(
        r.positive,
        "Character: Ana; mid 20s; calm, warm. \
         Face: oval; brown. \
         Skin: olive; smooth. \
         Hair: black; short; bob. \
         Body: slim; height: 170cm. \
         Makeup: natural. \
         Clothing: casual; white, blue. \
         Accessories: silver ring, type: watch, color: gold. \
         Environment: cafe; soft. \
         Camera: eye level; 50mm"
    );
    assert_eq!(r.negative, "blurry, extra fingers, acne");
}

#[test]
fn empty_document_renders_empty() {
    assert_eq!(render(&json!({})), Rendering::default());
}

#[test]
fn duplicate_negatives_collapse() {
    let r = render(&json!({"global_negative_prompt": ["x", "x", "y"]}));
    assert_eq!(r.negative, "x, y");
}

#[test]
fn body_profile() {
    let r = render(&json!({"body": {"type": "slim", "profile": {"height": "170"}}}));
    assert_eq!(r.positive, "Body: slim; height: 170");
}

#[test]
fn revision_after_edit() {
    let doc = apply_patch(
        &json!({}),
        &[
            Op::add("/hair/color", &json!("red")),
            Op::add("/hair/avoid/-", &json!("frizz")),
        ],
    )
    .unwrap();
    let rev = PromptRevision::next([1, 2], doc).unwrap();
    assert_eq!(rev.version_no, 3);
    assert_eq!(rev.generated_text, "Positive: Hair: red\n\nNegative: frizz");
}
