//! Built-in model versions and the loaded models that pair them with tables.

mod groups;
mod registry;
mod v22;
mod v23;
mod variant;

pub use registry::{ModelRegistry, RegistryError};
pub use v22::V22_2018;
pub use v23::V23_2019;
pub use variant::{ModelVariant, UnknownVariant, VariantFamily};

use crate::categories::{CategoryDeriver, ConditionCategory, OverrideRule};
use crate::explain::{self, ExplainError, Explanation, InteractionDescriptions};
use crate::hierarchy::{HierarchyError, HierarchyRelation};
use crate::patient::PatientContext;
use crate::scoring::interactions::InteractionTable;
use crate::scoring::{ScoreBreakdown, ScoreCalculator, ScoredPatient, ScoringError};
use crate::tables::{CategoryLabels, ReferenceTables};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What to do when a variable has no coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientPolicy {
    /// Fail the scoring call.
    Strict,
    /// Log, omit the component, and report it as unresolved.
    Lenient,
}

/// Compiled-in definition of one model version.
#[derive(Debug)]
pub struct ModelVersion {
    pub id: &'static str,
    pub software: &'static str,
    pub model_year: i32,
    pub policy: CoefficientPolicy,
    pub variants: &'static [ModelVariant],
    pub overrides: &'static [OverrideRule],
    pub interactions: InteractionTable,
    pub interaction_descriptions: &'static [(&'static str, &'static str)],
    pub category_labels: &'static [(u16, &'static str)],
    /// Dominated sets as published (transitively closed).
    pub hierarchy: &'static [(u16, &'static [u16])],
}

pub static BUILTIN_VERSIONS: [&ModelVersion; 2] = [&V22_2018, &V23_2019];

impl ModelVersion {
    pub fn builtin() -> impl Iterator<Item = &'static ModelVersion> {
        BUILTIN_VERSIONS.iter().copied()
    }

    pub fn find(id: &str) -> Option<&'static ModelVersion> {
        Self::builtin().find(|version| version.id.eq_ignore_ascii_case(id.trim()))
    }

    pub fn hierarchy_relation(&self) -> HierarchyRelation {
        HierarchyRelation::from_pairs(self.hierarchy.iter().copied())
    }

    pub fn labels(&self) -> CategoryLabels {
        CategoryLabels::from_static(self.category_labels)
    }

    /// Description keys plus every rule name the version can emit.
    pub fn known_interactions(&self) -> InteractionDescriptions {
        let mut known = InteractionDescriptions::new();
        for (name, description) in self.interaction_descriptions {
            known.describe(*name, *description);
        }
        for name in self.interactions.rule_names() {
            known.declare(name);
        }
        known
    }
}

/// A model version paired with its reference tables, ready to score.
#[derive(Debug)]
pub struct RiskModel {
    version: &'static ModelVersion,
    policy: CoefficientPolicy,
    tables: ReferenceTables,
    hierarchy: HierarchyRelation,
    labels: CategoryLabels,
    interactions: InteractionDescriptions,
}

impl RiskModel {
    pub fn new(
        version: &'static ModelVersion,
        tables: ReferenceTables,
    ) -> Result<Self, HierarchyError> {
        let hierarchy = version.hierarchy_relation();
        hierarchy.validate_acyclic()?;

        Ok(Self {
            version,
            policy: version.policy,
            tables,
            hierarchy,
            labels: version.labels(),
            interactions: version.known_interactions(),
        })
    }

    /// Overrides the version's missing-coefficient policy.
    pub fn with_policy(mut self, policy: CoefficientPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn id(&self) -> &'static str {
        self.version.id
    }

    pub fn version(&self) -> &'static ModelVersion {
        self.version
    }

    pub fn policy(&self) -> CoefficientPolicy {
        self.policy
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn hierarchy(&self) -> &HierarchyRelation {
        &self.hierarchy
    }

    pub fn labels(&self) -> &CategoryLabels {
        &self.labels
    }

    pub fn deriver(&self) -> CategoryDeriver<'_> {
        CategoryDeriver::new(self.version.overrides, &self.tables.mapping, &self.hierarchy)
    }

    pub fn calculator(&self) -> ScoreCalculator<'_> {
        ScoreCalculator::new(
            self.version,
            self.policy,
            &self.tables.coefficients,
            self.deriver(),
        )
    }

    pub fn derive_categories(&self, patient: &PatientContext) -> BTreeSet<ConditionCategory> {
        self.deriver()
            .derive(&patient.diagnoses, patient.age, patient.sex)
    }

    pub fn score(
        &self,
        patient: &PatientContext,
        variant: ModelVariant,
    ) -> Result<ScoreBreakdown, ScoringError> {
        self.calculator().score(patient, variant)
    }

    pub fn score_with_categories(
        &self,
        patient: &PatientContext,
        variant: ModelVariant,
    ) -> Result<ScoredPatient, ScoringError> {
        self.calculator().score_with_categories(patient, variant)
    }

    pub fn explain(&self, breakdown: &ScoreBreakdown) -> Result<Explanation, ExplainError> {
        let prefixes: Vec<&str> = self
            .version
            .variants
            .iter()
            .map(|variant| variant.prefix())
            .collect();
        explain::explain(breakdown, &prefixes, &self.interactions, &self.labels)
    }
}
