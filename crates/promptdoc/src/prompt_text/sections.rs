//! The known document sections and the fields each one contributes to the
//! positive rendering.
//!
//! Fields not listed here stay in the document but never reach the text.

/// Key of the top-level array of negative phrases.
pub const GLOBAL_NEGATIVE_KEY: &str = "global_negative_prompt";

/// Key of the per-section array of phrases merged into the negative text.
pub const AVOID_KEY: &str = "avoid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    /// An object rendered from a whitelist of its fields.
    Fields(&'static [&'static str]),
    /// An array whose items are flattened and comma-joined.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub key: &'static str,
    pub label: &'static str,
    pub shape: SectionShape,
}

/// Known sections, in rendering order.
pub const SECTIONS: &[Section] = &[
    Section {
        key: "character",
        label: "Character",
        shape: SectionShape::Fields(&["name", "age_appearance", "gender", "ethnicity", "era", "vibe"]),
    },
    Section {
        key: "face",
        label: "Face",
        shape: SectionShape::Fields(&[
            "shape",
            "jaw",
            "eyes",
            "eyebrows",
            "nose",
            "lips",
            "distinct_features",
            "expression",
        ]),
    },
    Section {
        key: "skin",
        label: "Skin",
        shape: SectionShape::Fields(&["tone", "texture"]),
    },
    Section {
        key: "hair",
        label: "Hair",
        shape: SectionShape::Fields(&["color", "texture", "length", "style", "bangs", "part"]),
    },
    // `profile` is an open object (height, build, proportions, ...) and is
    // flattened as `key: value` pairs.
    Section {
        key: "body",
        label: "Body",
        shape: SectionShape::Fields(&["type", "profile", "posture", "movement"]),
    },
    Section {
        key: "makeup",
        label: "Makeup",
        shape: SectionShape::Fields(&["style", "coverage", "base", "eyes", "lips"]),
    },
    Section {
        key: "clothing",
        label: "Clothing",
        shape: SectionShape::Fields(&["style", "silhouette", "colors"]),
    },
    Section {
        key: "accessories",
        label: "Accessories",
        shape: SectionShape::List,
    },
    Section {
        key: "environment",
        label: "Environment",
        shape: SectionShape::Fields(&["location", "lighting"]),
    },
    Section {
        key: "camera",
        label: "Camera",
        shape: SectionShape::Fields(&["angle", "framing", "lens", "style"]),
    },
];

/// Keys of the known sections plus the global negative list, in order.
///
/// Handed to patch generators so they keep edits inside known sections.
pub fn known_section_keys() -> Vec<&'static str> {
    SECTIONS
        .iter()
        .map(|s| s.key)
        .chain(std::iter::once(GLOBAL_NEGATIVE_KEY))
        .collect()
}
