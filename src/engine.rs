use crate::catalog::{MenuRule, RuleCatalog};
use crate::detection::{ClassId, Detection};
use crate::labels::LabelTable;
use crate::normalize::{self, NormalizedDetections};
use crate::overlay::{self, Overlay};

/// One reported ingredient with its normalized confidence.
///
/// `confidence` is `None` only for a required class that somehow has no
/// normalized entry; must_have members of a matched rule are guaranteed
/// present, so this is defensive.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub class_id: ClassId,
    pub confidence: Option<f32>,
}

/// Result of matching one image's detections against the catalog.
///
/// Confidences here are raw `[0, 1]` values and components carry class ids;
/// percent rendering and display-name translation happen at the report
/// boundary ([`crate::schema::MatchReport`]).
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub menu: Option<String>,
    pub components: Vec<Component>,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        self.menu.is_some()
    }
}

/// The detection-to-menu matcher.
///
/// Holds the validated rule catalog and label table, both immutable after
/// construction. Every method takes `&self` and performs no I/O, so one
/// engine can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    catalog: RuleCatalog,
    labels: LabelTable,
    floor: f32,
    overlay_display_names: bool,
}

impl MatchEngine {
    pub fn new(catalog: RuleCatalog, labels: LabelTable, floor: f32) -> Self {
        Self {
            catalog,
            labels,
            floor,
            overlay_display_names: true,
        }
    }

    /// Choose raw class ids or translated names for overlay text.
    pub fn overlay_display_names(mut self, display_names: bool) -> Self {
        self.overlay_display_names = display_names;
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    /// Normalize raw detector output and match it against the catalog.
    pub fn match_detections(&self, detections: &[Detection]) -> MatchOutcome {
        let detected = normalize::normalize(detections, self.floor);
        self.match_normalized(&detected)
    }

    /// Match an already-normalized detection set.
    ///
    /// Rules are tried in catalog order and the first rule whose `must_have`
    /// classes are all present wins; evaluation stops there. No scoring, no
    /// best-of-N. When nothing matches, every normalized entry is reported so
    /// a near-miss is still informative.
    pub fn match_normalized(&self, detected: &NormalizedDetections) -> MatchOutcome {
        for rule in self.catalog.rules() {
            if rule.satisfied_by(detected) {
                return MatchOutcome {
                    menu: Some(rule.name.clone()),
                    components: rule_components(rule, detected),
                };
            }
        }

        MatchOutcome {
            menu: None,
            components: detected
                .iter()
                .map(|(class_id, confidence)| Component {
                    class_id: class_id.clone(),
                    confidence: Some(confidence),
                })
                .collect(),
        }
    }

    /// Overlay records for the external image annotator. Purely for
    /// visualization; nothing here feeds back into matching.
    pub fn overlays(&self, detections: &[Detection]) -> Vec<Overlay> {
        overlay::build_overlays(
            detections,
            self.floor,
            &self.labels,
            self.overlay_display_names,
        )
    }
}

/// Matched components: every must_have member in rule declaration order,
/// then the satisfied optional members in rule declaration order.
fn rule_components(rule: &MenuRule, detected: &NormalizedDetections) -> Vec<Component> {
    let mut components: Vec<Component> = rule
        .must_have
        .iter()
        .map(|class_id| Component {
            class_id: class_id.clone(),
            confidence: detected.confidence(class_id),
        })
        .collect();

    components.extend(
        rule.optional
            .iter()
            .filter(|class_id| detected.contains(class_id))
            .map(|class_id| Component {
                class_id: class_id.clone(),
                confidence: detected.confidence(class_id),
            }),
    );

    components
}
