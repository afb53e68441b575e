use crate::detection::ClassId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display-name table for ingredient classes.
///
/// Translation is a total function: unknown class ids come back verbatim, so
/// a detection outside the configured vocabulary still renders. Used only for
/// report and overlay text, never as a matching key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    entries: HashMap<ClassId, String>,
}

impl LabelTable {
    pub fn new(entries: HashMap<ClassId, String>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, class_id: impl Into<ClassId>, display: impl Into<String>) {
        self.entries.insert(class_id.into(), display.into());
    }

    /// Translate a class id, falling back to the id itself.
    pub fn translate<'a>(&'a self, class_id: &'a ClassId) -> &'a str {
        self.entries
            .get(class_id)
            .map(String::as_str)
            .unwrap_or_else(|| class_id.as_str())
    }

    pub fn display_name(&self, class_id: &ClassId) -> String {
        self.translate(class_id).to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display names for the builtin 18-class vocabulary.
pub fn builtin_labels() -> LabelTable {
    let mut table = LabelTable::default();
    for (class_id, display) in [
        ("chicken_rice", "Chicken-Fat Rice"),
        ("rice", "Steamed Rice"),
        ("sticky_rice", "Sticky Rice"),
        ("boiled_chicken", "Boiled Chicken"),
        ("fried_chicken", "Fried Chicken"),
        ("grilled_chicken", "Grilled Chicken"),
        ("crispy_pork", "Crispy Pork Belly"),
        ("red_pork", "Red Barbecue Pork"),
        ("pork_leg", "Stewed Pork Leg"),
        ("boiled_egg", "Boiled Egg"),
        ("fried_egg", "Fried Egg"),
        ("omelet", "Thai Omelet"),
        ("cucumber", "Cucumber Slices"),
        ("coriander", "Coriander"),
        ("pickled_cabbage", "Pickled Cabbage"),
        ("noodle", "Egg Noodles"),
        ("chili_sauce", "Chili Dipping Sauce"),
        ("clear_soup", "Clear Soup"),
    ] {
        table.insert(class_id, display);
    }
    table
}
