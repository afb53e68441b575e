use crate::engine::MatchOutcome;
use crate::labels::LabelTable;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sentinel used for `predicted_menu` when no rule was satisfied.
pub const NO_MATCH: &str = "no match";

/// One reported ingredient, translated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportComponent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_percent: Option<f64>,
}

/// The stable JSON contract returned to callers.
///
/// This is the only place confidences are turned into percentages and class
/// ids into display names; everything upstream stays numerically pure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchReport {
    pub predicted_menu: String,
    pub components: Vec<ReportComponent>,
}

/// Render a `[0, 1]` confidence as a percentage rounded to one decimal.
pub fn confidence_percent(confidence: f32) -> f64 {
    (f64::from(confidence) * 1000.0).round() / 10.0
}

impl MatchReport {
    pub fn from_outcome(outcome: &MatchOutcome, labels: &LabelTable) -> Self {
        Self {
            predicted_menu: outcome
                .menu
                .clone()
                .unwrap_or_else(|| NO_MATCH.to_string()),
            components: outcome
                .components
                .iter()
                .map(|component| ReportComponent {
                    name: labels.display_name(&component.class_id),
                    confidence_percent: component.confidence.map(confidence_percent),
                })
                .collect(),
        }
    }

    pub fn matched(&self) -> bool {
        self.predicted_menu != NO_MATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Component;
    use crate::labels::builtin_labels;

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(confidence_percent(0.9), 90.0);
        assert_eq!(confidence_percent(0.8), 80.0);
        assert_eq!(confidence_percent(0.95), 95.0);
        assert_eq!(confidence_percent(0.123_45), 12.3);
        assert_eq!(confidence_percent(0.999_99), 100.0);
        assert_eq!(confidence_percent(0.0), 0.0);
    }

    #[test]
    fn matched_outcome_translates_and_rounds() {
        let outcome = MatchOutcome {
            menu: Some("khao_man_gai".to_string()),
            components: vec![
                Component {
                    class_id: "chicken_rice".into(),
                    confidence: Some(0.9),
                },
                Component {
                    class_id: "boiled_chicken".into(),
                    confidence: Some(0.8),
                },
            ],
        };

        let report = MatchReport::from_outcome(&outcome, &builtin_labels());
        assert!(report.matched());
        assert_eq!(report.predicted_menu, "khao_man_gai");
        assert_eq!(report.components[0].name, "Chicken-Fat Rice");
        assert_eq!(report.components[0].confidence_percent, Some(90.0));
        assert_eq!(report.components[1].name, "Boiled Chicken");
        assert_eq!(report.components[1].confidence_percent, Some(80.0));
    }

    #[test]
    fn unmatched_outcome_uses_the_sentinel() {
        let outcome = MatchOutcome {
            menu: None,
            components: vec![],
        };
        let report = MatchReport::from_outcome(&outcome, &builtin_labels());
        assert!(!report.matched());
        assert_eq!(report.predicted_menu, NO_MATCH);
        assert!(report.components.is_empty());
    }

    #[test]
    fn absent_confidence_is_omitted_from_json() {
        let report = MatchReport {
            predicted_menu: "khao_man_gai".to_string(),
            components: vec![ReportComponent {
                name: "Steamed Rice".to_string(),
                confidence_percent: None,
            }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("confidence_percent"));
    }

    #[test]
    fn json_schema_generates() {
        let schema = schemars::schema_for!(MatchReport);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("MatchReport"));
        assert!(json.contains("predicted_menu"));
        assert!(json.contains("components"));
    }
}
