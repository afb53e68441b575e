use crate::detection::{ClassId, Detection};
use std::collections::BTreeMap;

/// Accept everything the detector emits.
pub const DEFAULT_FLOOR: f32 = 0.0;
/// Floor used for still-image uploads.
pub const UPLOAD_FLOOR: f32 = 0.25;
/// Floor used for live camera frames, which are noisier.
pub const CAMERA_FLOOR: f32 = 0.5;

/// Deduplicated, threshold-filtered class -> confidence map for one image.
///
/// One entry per distinct class id; iteration order is sorted by class id so
/// downstream reports are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedDetections {
    by_class: BTreeMap<ClassId, f32>,
}

impl NormalizedDetections {
    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_class.len()
    }

    pub fn contains(&self, class_id: &ClassId) -> bool {
        self.by_class.contains_key(class_id)
    }

    pub fn confidence(&self, class_id: &ClassId) -> Option<f32> {
        self.by_class.get(class_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassId, f32)> {
        self.by_class.iter().map(|(class_id, conf)| (class_id, *conf))
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassId> {
        self.by_class.keys()
    }
}

impl FromIterator<(ClassId, f32)> for NormalizedDetections {
    fn from_iter<I: IntoIterator<Item = (ClassId, f32)>>(iter: I) -> Self {
        Self {
            by_class: iter.into_iter().collect(),
        }
    }
}

/// Collapse raw detections into one entry per distinct class.
///
/// Detections with confidence below `floor` are dropped. When several
/// surviving detections share a class, the maximum confidence is kept.
/// Multiple boxes of one class collapse to a single entry: menu matching is
/// presence-based, not count-based.
///
/// Empty input, or input entirely below the floor, yields an empty set.
pub fn normalize(detections: &[Detection], floor: f32) -> NormalizedDetections {
    let mut by_class: BTreeMap<ClassId, f32> = BTreeMap::new();

    for det in detections {
        if det.confidence < floor {
            continue;
        }
        by_class
            .entry(det.class_id.clone())
            .and_modify(|conf| {
                if det.confidence > *conf {
                    *conf = det.confidence;
                }
            })
            .or_insert(det.confidence);
    }

    NormalizedDetections { by_class }
}
