//! Risk score calculation.

mod breakdown;
pub mod demographics;
pub mod interactions;

pub use breakdown::{ScoreBreakdown, ScoreComponent};

use crate::categories::{CategoryDeriver, ConditionCategory};
use crate::models::{CoefficientPolicy, ModelVariant, ModelVersion, VariantFamily};
use crate::patient::{PatientContext, Sex};
use crate::tables::CoefficientTable;
use demographics::{age_sex_bucket, new_enrollee_segment};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Demographic,
    Category,
    Interaction,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Demographic => "demographic",
            Self::Category => "category",
            Self::Interaction => "interaction",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("{kind} coefficient `{variable}` not found for patient aged {age} ({sex})")]
    MissingCoefficient {
        variable: String,
        kind: VariableKind,
        age: u32,
        sex: Sex,
    },
    #[error("model {version} does not support variant `{variant}`")]
    UnsupportedVariant {
        version: &'static str,
        variant: ModelVariant,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPatient {
    pub categories: BTreeSet<ConditionCategory>,
    pub breakdown: ScoreBreakdown,
}

/// Scores patients against one model version's coefficients.
#[derive(Debug, Clone, Copy)]
pub struct ScoreCalculator<'a> {
    version: &'static ModelVersion,
    policy: CoefficientPolicy,
    coefficients: &'a CoefficientTable,
    deriver: CategoryDeriver<'a>,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(
        version: &'static ModelVersion,
        policy: CoefficientPolicy,
        coefficients: &'a CoefficientTable,
        deriver: CategoryDeriver<'a>,
    ) -> Self {
        Self {
            version,
            policy,
            coefficients,
            deriver,
        }
    }

    /// Builds the ordered breakdown: demographic bucket first, then derived
    /// categories ascending, then interactions in rule order.
    pub fn score(
        &self,
        patient: &PatientContext,
        variant: ModelVariant,
    ) -> Result<ScoreBreakdown, ScoringError> {
        self.score_with_categories(patient, variant)
            .map(|scored| scored.breakdown)
    }

    /// Like [`score`](Self::score), also returning the categories the
    /// breakdown was built from. New-enrollee variants derive none.
    pub fn score_with_categories(
        &self,
        patient: &PatientContext,
        variant: ModelVariant,
    ) -> Result<ScoredPatient, ScoringError> {
        if !self.version.variants.contains(&variant) {
            return Err(ScoringError::UnsupportedVariant {
                version: self.version.id,
                variant,
            });
        }

        let prefix = variant.prefix();
        let family = variant.family();
        let mut breakdown = ScoreBreakdown::new();

        if family == VariantFamily::NewEnrollee {
            let segment = new_enrollee_segment(
                patient.new_enrollee_medicaid,
                patient.is_originally_disabled(),
            );
            let bucket = age_sex_bucket(patient.age, patient.sex, true);
            self.resolve(
                &mut breakdown,
                format!("{prefix}_{segment}_{bucket}"),
                VariableKind::Demographic,
                patient,
            )?;
            return Ok(ScoredPatient {
                categories: BTreeSet::new(),
                breakdown,
            });
        }

        let bucket = age_sex_bucket(patient.age, patient.sex, false);
        self.resolve(
            &mut breakdown,
            format!("{prefix}_{bucket}"),
            VariableKind::Demographic,
            patient,
        )?;

        let categories = self
            .deriver
            .derive(&patient.diagnoses, patient.age, patient.sex);
        for category in &categories {
            self.resolve(
                &mut breakdown,
                format!("{prefix}_{}", category.variable_suffix()),
                VariableKind::Category,
                patient,
            )?;
        }

        for name in self
            .version
            .interactions
            .satisfied(family, &categories, patient)
        {
            self.resolve(
                &mut breakdown,
                format!("{prefix}_{name}"),
                VariableKind::Interaction,
                patient,
            )?;
        }

        Ok(ScoredPatient {
            categories,
            breakdown,
        })
    }

    fn resolve(
        &self,
        breakdown: &mut ScoreBreakdown,
        variable: String,
        kind: VariableKind,
        patient: &PatientContext,
    ) -> Result<(), ScoringError> {
        if let Some(weight) = self.coefficients.get(&variable) {
            breakdown.insert(variable, weight);
            return Ok(());
        }

        match self.policy {
            CoefficientPolicy::Strict => Err(ScoringError::MissingCoefficient {
                variable,
                kind,
                age: patient.age,
                sex: patient.sex,
            }),
            CoefficientPolicy::Lenient => {
                tracing::warn!(
                    model = self.version.id,
                    %kind,
                    %variable,
                    age = patient.age,
                    sex = %patient.sex,
                    "coefficient not found; omitting component"
                );
                breakdown.mark_unresolved(variable);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::ConditionCategory;
    use crate::hierarchy::HierarchyRelation;
    use crate::models::{V22_2018, V23_2019};
    use crate::patient::EntitlementReason;
    use crate::tables::DiagnosisMap;

    struct Fixture {
        mapping: DiagnosisMap,
        hierarchy: HierarchyRelation,
        coefficients: CoefficientTable,
    }

    impl Fixture {
        fn new(version: &'static ModelVersion, coefficients: &[(&str, f64)]) -> Self {
            let mapping = [
                ("E1169", 18),
                ("I5030", 85),
                ("I509", 85),
                ("I209", 88),
                ("F1120", 55),
                ("F209", 57),
            ]
            .into_iter()
            .map(|(code, category)| (code, ConditionCategory(category)))
            .collect();
            Self {
                mapping,
                hierarchy: HierarchyRelation::from_pairs(version.hierarchy.iter().copied()),
                coefficients: coefficients.iter().copied().collect(),
            }
        }

        fn calculator(&self, version: &'static ModelVersion) -> ScoreCalculator<'_> {
            ScoreCalculator::new(
                version,
                version.policy,
                &self.coefficients,
                CategoryDeriver::new(version.overrides, &self.mapping, &self.hierarchy),
            )
        }
    }

    fn variables(breakdown: &ScoreBreakdown) -> Vec<&str> {
        breakdown.iter().map(|c| c.variable.as_str()).collect()
    }

    #[test]
    fn orders_demographic_categories_then_interactions() {
        let fixture = Fixture::new(
            &V22_2018,
            &[
                ("cna_m70_74", 0.379),
                ("cna_hcc18", 0.318),
                ("cna_hcc85", 0.323),
                ("cna_hcc88", 0.14),
                ("cna_hcc85_gdiabetesmellit", 0.154),
            ],
        );
        let patient = PatientContext::new(70, Sex::Male)
            .with_diagnoses(["E1169", "I5030", "I509", "I211", "I209", "R05"]);

        let breakdown = fixture
            .calculator(&V22_2018)
            .score(&patient, ModelVariant::CommunityNonDualAged)
            .expect("scores");

        assert_eq!(
            variables(&breakdown),
            vec![
                "cna_m70_74",
                "cna_hcc18",
                "cna_hcc85",
                "cna_hcc88",
                "cna_hcc85_gdiabetesmellit"
            ]
        );
    }

    #[test]
    fn strict_policy_fails_on_missing_coefficient() {
        let fixture = Fixture::new(&V22_2018, &[("cna_m70_74", 0.379)]);
        let patient = PatientContext::new(70, Sex::Male).with_diagnoses(["E1169"]);

        let error = fixture
            .calculator(&V22_2018)
            .score(&patient, ModelVariant::CommunityNonDualAged)
            .expect_err("hcc18 coefficient is missing");
        match error {
            ScoringError::MissingCoefficient { variable, kind, .. } => {
                assert_eq!(variable, "cna_hcc18");
                assert_eq!(kind, VariableKind::Category);
            }
            other => panic!("expected missing coefficient, got {other:?}"),
        }
    }

    #[test]
    fn lenient_policy_omits_and_reports_missing_coefficient() {
        let fixture = Fixture::new(&V23_2019, &[("cna_m70_74", 0.4)]);
        let patient = PatientContext::new(70, Sex::Male).with_diagnoses(["E1169"]);

        let breakdown = fixture
            .calculator(&V23_2019)
            .score(&patient, ModelVariant::CommunityNonDualAged)
            .expect("lenient scoring succeeds");
        assert_eq!(variables(&breakdown), vec!["cna_m70_74"]);
        assert_eq!(breakdown.unresolved(), ["cna_hcc18".to_string()]);
    }

    #[test]
    fn new_enrollee_emits_single_demographic_component() {
        let fixture = Fixture::new(
            &V22_2018,
            &[("ne_mcaid_origdis_f67", 0.9), ("ne_hcc18", 0.3)],
        );
        let patient = PatientContext::new(67, Sex::Female)
            .with_diagnoses(["E1169"])
            .with_new_enrollee_medicaid(true)
            .with_entitlement_reason(EntitlementReason::Disability);

        let breakdown = fixture
            .calculator(&V22_2018)
            .score(&patient, ModelVariant::NewEnrollee)
            .expect("scores");
        assert_eq!(variables(&breakdown), vec!["ne_mcaid_origdis_f67"]);
    }

    #[test]
    fn scored_patient_carries_the_categories_behind_the_breakdown() {
        let fixture = Fixture::new(
            &V22_2018,
            &[
                ("cna_f70_74", 0.386),
                ("cna_hcc18", 0.318),
                ("cna_hcc85", 0.323),
                ("cna_hcc85_gdiabetesmellit", 0.154),
                ("ne_nmcaid_norigdis_f70_74", 0.5),
            ],
        );
        let patient = PatientContext::new(71, Sex::Female).with_diagnoses(["E1169", "I509"]);
        let calculator = fixture.calculator(&V22_2018);

        let scored = calculator
            .score_with_categories(&patient, ModelVariant::CommunityNonDualAged)
            .expect("scores");
        assert_eq!(
            scored.categories.into_iter().collect::<Vec<_>>(),
            vec![ConditionCategory(18), ConditionCategory(85)]
        );
        assert_eq!(
            variables(&scored.breakdown),
            vec!["cna_f70_74", "cna_hcc18", "cna_hcc85", "cna_hcc85_gdiabetesmellit"]
        );

        let scored = calculator
            .score_with_categories(&patient, ModelVariant::NewEnrollee)
            .expect("scores");
        assert!(scored.categories.is_empty());
        assert_eq!(variables(&scored.breakdown), vec!["ne_nmcaid_norigdis_f70_74"]);
    }

    #[test]
    fn v23_disabled_substance_psych_interaction_requires_age_below_65() {
        let fixture = Fixture::new(
            &V23_2019,
            &[
                ("cnd_m60_64", 0.3),
                ("cnd_m65_69", 0.3),
                ("cnd_hcc55", 0.4),
                ("cnd_hcc57", 0.5),
                ("cnd_disable_substabuse_psych_v23", 0.2),
            ],
        );
        let calculator = fixture.calculator(&V23_2019);

        let young = PatientContext::new(60, Sex::Male).with_diagnoses(["F1120", "F209"]);
        let breakdown = calculator
            .score(&young, ModelVariant::CommunityNonDualDisabled)
            .expect("scores");
        assert_eq!(breakdown.get("cnd_disable_substabuse_psych_v23"), Some(0.2));

        let older = PatientContext::new(66, Sex::Male).with_diagnoses(["F1120", "F209"]);
        let breakdown = calculator
            .score(&older, ModelVariant::CommunityNonDualDisabled)
            .expect("scores");
        assert_eq!(breakdown.get("cnd_disable_substabuse_psych_v23"), None);
    }

    #[test]
    fn institutional_flags_emit_interactions() {
        let fixture = Fixture::new(
            &V23_2019,
            &[("ins_m70_74", 1.0), ("ins_ltimcaid", 0.1), ("ins_origds", 0.05)],
        );
        let patient = PatientContext::new(70, Sex::Male)
            .with_long_term_institutional_medicaid(true)
            .with_entitlement_reason(EntitlementReason::Disability);

        let breakdown = fixture
            .calculator(&V23_2019)
            .score(&patient, ModelVariant::Institutional)
            .expect("scores");
        assert_eq!(
            variables(&breakdown),
            vec!["ins_m70_74", "ins_ltimcaid", "ins_origds"]
        );
    }
}
