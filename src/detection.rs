use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable vocabulary key for an ingredient class.
///
/// Matching operates on class ids only. Display names come from
/// [`crate::labels::LabelTable`] and never feed back into a matching
/// predicate.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClassId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Corner-coordinate bounding box: `(x1, y1)` top-left, `(x2, y2)`
/// bottom-right, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// One raw output of the object detector: class, confidence, box.
///
/// Produced once per detector invocation and owned by the calling request.
/// Confidence is the model's probability in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    pub class_id: ClassId,
    pub confidence: f32,
    #[serde(default)]
    pub bbox: BoundingBox,
}

impl Detection {
    pub fn new(class_id: impl Into<ClassId>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            class_id: class_id.into(),
            confidence,
            bbox,
        }
    }
}
