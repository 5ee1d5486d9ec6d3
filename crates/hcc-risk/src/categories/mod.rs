//! Diagnosis codes, condition categories, and the deriver that maps one to the other.

mod normalizer;
mod overrides;

pub use overrides::{CodeSet, OverrideOutcome, OverrideRule, PatientPredicate, STANDARD_OVERRIDES};

use crate::hierarchy::HierarchyRelation;
use crate::patient::Sex;
use crate::tables::DiagnosisMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Numbered hierarchical condition category, shown as `HCC85`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCategory(pub u16);

impl ConditionCategory {
    pub const fn number(self) -> u16 {
        self.0
    }

    /// Suffix used in coefficient names, e.g. `hcc85` in `cna_hcc85`.
    pub fn variable_suffix(self) -> String {
        format!("hcc{}", self.0)
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HCC{}", self.0)
    }
}

impl From<u16> for ConditionCategory {
    fn from(number: u16) -> Self {
        Self(number)
    }
}

/// ICD-10 diagnosis code in normalized form (`E1169`, not `e11.69`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DiagnosisCode(String);

impl DiagnosisCode {
    pub fn normalize(raw: &str) -> Self {
        Self(normalizer::normalize_code(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DiagnosisCode {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<DiagnosisCode> for String {
    fn from(code: DiagnosisCode) -> Self {
        code.0
    }
}

impl fmt::Display for DiagnosisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a patient's diagnoses into the final category set.
///
/// Each code passes through the override rules first, falling back to the
/// generic mapping. The union of all categories is then filtered against the
/// hierarchy, using a snapshot so suppression does not depend on order.
#[derive(Debug, Clone, Copy)]
pub struct CategoryDeriver<'a> {
    overrides: &'a [OverrideRule],
    mapping: &'a DiagnosisMap,
    hierarchy: &'a HierarchyRelation,
}

impl<'a> CategoryDeriver<'a> {
    pub fn new(
        overrides: &'a [OverrideRule],
        mapping: &'a DiagnosisMap,
        hierarchy: &'a HierarchyRelation,
    ) -> Self {
        Self {
            overrides,
            mapping,
            hierarchy,
        }
    }

    pub fn derive<I, S>(&self, diagnoses: I, age: u32, sex: Sex) -> BTreeSet<ConditionCategory>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut working = BTreeSet::new();
        for raw in diagnoses {
            let code = DiagnosisCode::normalize(raw.as_ref());
            self.collect_code(&code, age, sex, &mut working);
        }
        suppress_dominated(working, self.hierarchy)
    }

    fn collect_code(
        &self,
        code: &DiagnosisCode,
        age: u32,
        sex: Sex,
        working: &mut BTreeSet<ConditionCategory>,
    ) {
        match overrides::first_match(self.overrides, code, age, sex) {
            Some(rule) => {
                tracing::trace!(code = %code, rule = rule.name, "override applied");
                if let OverrideOutcome::Categories(categories) = rule.outcome {
                    working.extend(categories.iter().copied());
                }
            }
            None => {
                if let Some(categories) = self.mapping.categories_for(code) {
                    working.extend(categories.iter().copied());
                }
            }
        }
    }
}

/// Removes every category dominated by another member of `working`. Works on
/// closed and reduced relations alike.
pub fn suppress_dominated(
    working: BTreeSet<ConditionCategory>,
    hierarchy: &HierarchyRelation,
) -> BTreeSet<ConditionCategory> {
    let dominated: BTreeSet<ConditionCategory> = working
        .iter()
        .flat_map(|&category| hierarchy.reachable_from(category))
        .collect();
    working.difference(&dominated).copied().collect()
}
