use crate::detection::ClassId;
use crate::normalize::NormalizedDetections;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration errors detected when a catalog is loaded.
///
/// A malformed catalog is rejected before any request is served; nothing
/// here can surface per-request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate menu name: {name}")]
    DuplicateMenu { name: String },
    #[error("menu '{name}' has an empty must_have set")]
    EmptyMustHave { name: String },
    #[error("menu '{name}' lists '{class_id}' in both must_have and optional")]
    OverlappingSets { name: String, class_id: ClassId },
}

/// One menu definition: the ingredient classes that compose it.
///
/// `must_have` declaration order is the display order of matched components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRule {
    pub name: String,
    pub must_have: Vec<ClassId>,
    #[serde(default)]
    pub optional: Vec<ClassId>,
}

impl MenuRule {
    pub fn new(
        name: impl Into<String>,
        must_have: Vec<ClassId>,
        optional: Vec<ClassId>,
    ) -> Self {
        Self {
            name: name.into(),
            must_have,
            optional,
        }
    }

    /// Strict subset test over class ids. Display names never participate.
    pub fn satisfied_by(&self, detected: &NormalizedDetections) -> bool {
        self.must_have.iter().all(|class_id| detected.contains(class_id))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.must_have.is_empty() {
            return Err(CatalogError::EmptyMustHave {
                name: self.name.clone(),
            });
        }
        let required: HashSet<&ClassId> = self.must_have.iter().collect();
        for class_id in &self.optional {
            if required.contains(class_id) {
                return Err(CatalogError::OverlappingSets {
                    name: self.name.clone(),
                    class_id: class_id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered collection of menu rules. Ordering is significant: the first rule
/// whose `must_have` set is satisfied wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleCatalog {
    rules: Vec<MenuRule>,
}

impl RuleCatalog {
    /// Validate and freeze a rule list. Rejects duplicate menu names, empty
    /// `must_have` sets, and must_have/optional overlap.
    pub fn new(rules: Vec<MenuRule>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            rule.validate()?;
            if !seen.insert(rule.name.as_str()) {
                return Err(CatalogError::DuplicateMenu {
                    name: rule.name.clone(),
                });
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[MenuRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn ids(class_ids: &[&str]) -> Vec<ClassId> {
    class_ids.iter().copied().map(ClassId::from).collect()
}

/// Compiled-in catalog for the 18-class Thai food detector.
///
/// More specific compositions come first: the mixed chicken plate must
/// precede the plain and fried variants or it could never match.
pub fn builtin_menus() -> Vec<MenuRule> {
    vec![
        MenuRule::new(
            "khao_man_gai_pasom",
            ids(&["chicken_rice", "boiled_chicken", "fried_chicken"]),
            ids(&["cucumber", "chili_sauce", "clear_soup"]),
        ),
        MenuRule::new(
            "khao_man_gai_tod",
            ids(&["chicken_rice", "fried_chicken"]),
            ids(&["cucumber", "chili_sauce", "clear_soup"]),
        ),
        MenuRule::new(
            "khao_man_gai",
            ids(&["chicken_rice", "boiled_chicken"]),
            ids(&["cucumber", "chili_sauce", "clear_soup"]),
        ),
        MenuRule::new(
            "khao_moo_daeng",
            ids(&["rice", "red_pork"]),
            ids(&["boiled_egg", "cucumber", "clear_soup"]),
        ),
        MenuRule::new(
            "khao_moo_krob",
            ids(&["rice", "crispy_pork"]),
            ids(&["cucumber", "chili_sauce"]),
        ),
        MenuRule::new(
            "khao_kha_moo",
            ids(&["rice", "pork_leg"]),
            ids(&["boiled_egg", "pickled_cabbage"]),
        ),
        MenuRule::new(
            "khao_kai_jeow",
            ids(&["rice", "omelet"]),
            ids(&["chili_sauce", "cucumber"]),
        ),
        MenuRule::new(
            "ba_mee_moo_daeng",
            ids(&["noodle", "red_pork"]),
            ids(&["clear_soup", "coriander"]),
        ),
        MenuRule::new(
            "kai_yang_khao_niao",
            ids(&["sticky_rice", "grilled_chicken"]),
            ids(&["chili_sauce"]),
        ),
    ]
}
