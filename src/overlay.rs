use crate::detection::{BoundingBox, Detection};
use crate::labels::LabelTable;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One record for the external image annotator: the box to draw and the text
/// to put next to it.
///
/// Visualization only. The raw `[0, 1]` confidence is passed through so the
/// annotator can format it however it likes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Overlay {
    pub bbox: BoundingBox,
    pub label: String,
    pub confidence: f32,
}

/// Build overlay records for every detection that survives the confidence
/// floor. Unlike normalization, boxes are not collapsed: each retained
/// detection gets its own overlay.
pub fn build_overlays(
    detections: &[Detection],
    floor: f32,
    labels: &LabelTable,
    display_names: bool,
) -> Vec<Overlay> {
    detections
        .iter()
        .filter(|det| det.confidence >= floor)
        .map(|det| Overlay {
            bbox: det.bbox,
            label: if display_names {
                labels.display_name(&det.class_id)
            } else {
                det.class_id.to_string()
            },
            confidence: det.confidence,
        })
        .collect()
}
