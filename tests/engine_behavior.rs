use menusense::catalog::{MenuRule, RuleCatalog};
use menusense::detection::{BoundingBox, ClassId, Detection};
use menusense::engine::MatchEngine;
use menusense::labels::{LabelTable, builtin_labels};
use menusense::normalize::DEFAULT_FLOOR;
use menusense::schema::MatchReport;

fn ids(class_ids: &[&str]) -> Vec<ClassId> {
    class_ids.iter().copied().map(ClassId::from).collect()
}

fn det(class_id: &str, confidence: f32) -> Detection {
    Detection::new(class_id, confidence, BoundingBox::default())
}

fn engine_with(rules: Vec<MenuRule>, labels: LabelTable, floor: f32) -> MatchEngine {
    MatchEngine::new(RuleCatalog::new(rules).unwrap(), labels, floor)
}

#[test]
fn full_plate_scenario_produces_percent_report() {
    let engine = engine_with(
        vec![MenuRule::new(
            "A",
            ids(&["chicken_rice", "boiled_chicken", "rice"]),
            ids(&["cucumber"]),
        )],
        LabelTable::default(),
        DEFAULT_FLOOR,
    );

    let detections = vec![
        det("chicken_rice", 0.9),
        det("boiled_chicken", 0.8),
        det("rice", 0.95),
    ];
    let outcome = engine.match_detections(&detections);
    let report = MatchReport::from_outcome(&outcome, engine.labels());

    assert_eq!(report.predicted_menu, "A");
    assert_eq!(report.components.len(), 3);
    assert_eq!(report.components[0].name, "chicken_rice");
    assert_eq!(report.components[0].confidence_percent, Some(90.0));
    assert_eq!(report.components[1].name, "boiled_chicken");
    assert_eq!(report.components[1].confidence_percent, Some(80.0));
    assert_eq!(report.components[2].name, "rice");
    assert_eq!(report.components[2].confidence_percent, Some(95.0));
}

#[test]
fn earlier_rule_wins_when_both_are_satisfied() {
    let engine = engine_with(
        vec![
            MenuRule::new("first", ids(&["rice", "omelet"]), vec![]),
            MenuRule::new("second", ids(&["rice"]), vec![]),
        ],
        LabelTable::default(),
        DEFAULT_FLOOR,
    );

    let outcome = engine.match_detections(&[det("rice", 0.9), det("omelet", 0.8)]);
    assert_eq!(outcome.menu.as_deref(), Some("first"));

    // reversing the catalog reverses the winner
    let reversed = engine_with(
        vec![
            MenuRule::new("second", ids(&["rice"]), vec![]),
            MenuRule::new("first", ids(&["rice", "omelet"]), vec![]),
        ],
        LabelTable::default(),
        DEFAULT_FLOOR,
    );
    let outcome = reversed.match_detections(&[det("rice", 0.9), det("omelet", 0.8)]);
    assert_eq!(outcome.menu.as_deref(), Some("second"));
}

#[test]
fn disjoint_detections_are_reported_translated() {
    let engine = engine_with(
        vec![MenuRule::new(
            "khao_man_gai",
            ids(&["chicken_rice", "boiled_chicken"]),
            vec![],
        )],
        builtin_labels(),
        DEFAULT_FLOOR,
    );

    let outcome = engine.match_detections(&[det("noodle", 0.6)]);
    let report = MatchReport::from_outcome(&outcome, engine.labels());

    assert_eq!(report.predicted_menu, "no match");
    assert_eq!(report.components.len(), 1);
    assert_eq!(report.components[0].name, "Egg Noodles");
    assert_eq!(report.components[0].confidence_percent, Some(60.0));
}

#[test]
fn empty_detections_give_an_empty_unmatched_report() {
    let engine = engine_with(
        vec![MenuRule::new("khao_man_gai", ids(&["chicken_rice"]), vec![])],
        builtin_labels(),
        DEFAULT_FLOOR,
    );

    let report = MatchReport::from_outcome(&engine.match_detections(&[]), engine.labels());
    assert_eq!(report.predicted_menu, "no match");
    assert!(report.components.is_empty());
}

#[test]
fn duplicate_detections_keep_max_of_survivors() {
    let engine = engine_with(
        vec![MenuRule::new("khao_man_gai", ids(&["chicken_rice"]), vec![])],
        LabelTable::default(),
        0.5,
    );

    // 0.4 falls below the floor; 0.7 survives and is reported
    let outcome = engine.match_detections(&[det("rice", 0.4), det("rice", 0.7)]);
    assert_eq!(outcome.menu, None);
    assert_eq!(outcome.components.len(), 1);
    assert_eq!(outcome.components[0].confidence, Some(0.7));
}

#[test]
fn repeated_matching_is_identical() {
    let engine = engine_with(
        vec![
            MenuRule::new(
                "khao_moo_daeng",
                ids(&["rice", "red_pork"]),
                ids(&["boiled_egg", "cucumber"]),
            ),
            MenuRule::new("khao_kai_jeow", ids(&["rice", "omelet"]), vec![]),
        ],
        builtin_labels(),
        0.25,
    );

    let detections = vec![
        det("rice", 0.9),
        det("red_pork", 0.85),
        det("boiled_egg", 0.4),
        det("cucumber", 0.1),
        det("red_pork", 0.6),
    ];

    let first = engine.match_detections(&detections);
    assert_eq!(first.menu.as_deref(), Some("khao_moo_daeng"));
    for _ in 0..25 {
        assert_eq!(engine.match_detections(&detections), first);
    }
}

#[test]
fn unknown_classes_still_match_on_raw_ids() {
    // a class outside the builtin vocabulary is valid for matching
    let engine = engine_with(
        vec![MenuRule::new("experimental", ids(&["dragonfruit"]), vec![])],
        builtin_labels(),
        DEFAULT_FLOOR,
    );

    let outcome = engine.match_detections(&[det("dragonfruit", 0.9)]);
    assert_eq!(outcome.menu.as_deref(), Some("experimental"));

    let report = MatchReport::from_outcome(&outcome, engine.labels());
    assert_eq!(report.components[0].name, "dragonfruit");
}
