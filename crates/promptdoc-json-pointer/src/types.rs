//! Type definitions for JSON Pointer paths and their steps.

use serde_json::{Map, Value};

use crate::{is_array_step, is_integer};

/// A single unescaped path component.
pub type PathStep = String;

/// A JSON Pointer path.
pub type Path = Vec<PathStep>;

/// How a path step addresses an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Decimal index (`"0"`, `"12"`, `"007"`). Saturates at `usize::MAX`.
    Index(usize),
    /// The `-` append marker.
    Append,
    /// Anything else; only meaningful as an object key.
    Key(&'a str),
}

impl<'a> Step<'a> {
    /// Classify a raw path step.
    ///
    /// Digit strings too large for `usize` become `Index(usize::MAX)`, so
    /// they always sit past the end of any array.
    pub fn classify(step: &'a str) -> Self {
        if step == "-" {
            return Step::Append;
        }
        if is_integer(step) {
            return Step::Index(step.parse::<usize>().unwrap_or(usize::MAX));
        }
        Step::Key(step)
    }
}

/// The kind of container materialized for a missing intermediate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Object,
}

impl ContainerKind {
    /// Pick the container kind from the step that will address into it.
    ///
    /// `-` or digits mean an array, anything else an object.
    ///
    /// ```
    /// use promptdoc_json_pointer::ContainerKind;
    ///
    /// assert_eq!(ContainerKind::for_next_step("0"), ContainerKind::Array);
    /// assert_eq!(ContainerKind::for_next_step("-"), ContainerKind::Array);
    /// assert_eq!(ContainerKind::for_next_step("height"), ContainerKind::Object);
    /// ```
    pub fn for_next_step(next: &str) -> Self {
        if is_array_step(next) {
            ContainerKind::Array
        } else {
            ContainerKind::Object
        }
    }

    /// A fresh, empty container of this kind.
    pub fn empty(self) -> Value {
        match self {
            ContainerKind::Array => Value::Array(Vec::new()),
            ContainerKind::Object => Value::Object(Map::new()),
        }
    }
}
