//! Human-readable explanation of a score breakdown.
//!
//! Each variable is checked against three independent recognizers
//! (demographic bucket, interaction name, category coefficient) and lands in
//! every list whose pattern it matches. Variables matching none are still
//! counted in the total.
//!
//! Open-ended buckets read "with age greater than 95" with a single space.
//! Earlier CMS tooling printed two spaces there, so text comparisons against
//! its output need to normalize whitespace.

mod patterns;

use crate::categories::ConditionCategory;
use crate::scoring::ScoreBreakdown;
use crate::tables::CategoryLabels;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const UNKNOWN_INTERACTION: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplainError {
    #[error("no label for category {category} referenced by `{variable}`")]
    MissingCategoryLabel { variable: String, category: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedComponent {
    pub variable_name: String,
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Sum of every weight, rounded to three decimals.
    pub total: f64,
    pub demographic_components: Vec<ExplainedComponent>,
    pub hcc_components: Vec<ExplainedComponent>,
    pub interaction_components: Vec<ExplainedComponent>,
}

/// Interaction names a model recognizes, with optional descriptive text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionDescriptions {
    entries: BTreeMap<String, Option<String>>,
}

impl InteractionDescriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn describe(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.entries.insert(name.into(), Some(description.into()));
    }

    /// Registers a name without text; an existing description is kept.
    pub fn declare(&mut self, name: impl Into<String>) {
        self.entries.entry(name.into()).or_insert(None);
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(Option::as_deref)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn explain(
    breakdown: &ScoreBreakdown,
    variant_prefixes: &[&str],
    interactions: &InteractionDescriptions,
    labels: &CategoryLabels,
) -> Result<Explanation, ExplainError> {
    let mut explanation = Explanation {
        total: round_to_thousandths(breakdown.total()),
        ..Explanation::default()
    };

    for component in breakdown {
        let variable = component.variable.as_str();
        let explained = |description: String| ExplainedComponent {
            variable_name: variable.to_string(),
            score: component.weight,
            description,
        };

        if let Some(matched) = patterns::match_demographic(variable) {
            explanation
                .demographic_components
                .push(explained(matched.describe()));
        }

        if let Some(name) = patterns::match_interaction(variable, interactions.names()) {
            let description = interactions
                .description(name)
                .unwrap_or(UNKNOWN_INTERACTION)
                .to_string();
            explanation.interaction_components.push(explained(description));
        }

        if let Some(digits) = patterns::match_category(variable, variant_prefixes) {
            let label = digits
                .parse::<u16>()
                .ok()
                .and_then(|number| labels.get(ConditionCategory(number)))
                .ok_or_else(|| ExplainError::MissingCategoryLabel {
                    variable: variable.to_string(),
                    category: digits.to_string(),
                })?;
            explanation.hcc_components.push(explained(label.to_string()));
        }
    }

    Ok(explanation)
}

/// Rounds the exact binary value, so `1.0005` (stored just below) becomes `1.0`.
fn round_to_thousandths(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> CategoryLabels {
        CategoryLabels::from_static(&[(85, "Congestive Heart Failure"), (18, "Diabetes")])
    }

    fn interactions() -> InteractionDescriptions {
        let mut descriptions = InteractionDescriptions::new();
        descriptions.describe("hcc85_gdiabetesmellit", "Congestive Heart Failure & Diabetes");
        descriptions.declare("gcopdcf_asp_spec_b_pneum");
        descriptions
    }

    #[test]
    fn sorts_components_into_lists() {
        let breakdown: ScoreBreakdown = [
            ("cna_m70_74", 0.379),
            ("cna_hcc85", 0.323),
            ("cna_hcc85_gdiabetesmellit", 0.154),
        ]
        .into_iter()
        .collect();

        let explanation =
            explain(&breakdown, &["cna"], &interactions(), &labels()).expect("explains");
        assert_eq!(explanation.total, 0.856);
        assert_eq!(explanation.demographic_components.len(), 1);
        assert_eq!(
            explanation.hcc_components[0].description,
            "Congestive Heart Failure"
        );
        assert_eq!(
            explanation.interaction_components[0].description,
            "Congestive Heart Failure & Diabetes"
        );
    }

    #[test]
    fn rounds_totals_from_the_stored_value() {
        assert_eq!(round_to_thousandths(1.0005), 1.0);
        assert_eq!(round_to_thousandths(0.1235), 0.123);
        assert_eq!(round_to_thousandths(1.2345), 1.234);
        assert_eq!(round_to_thousandths(0.8565), 0.857);
        assert_eq!(round_to_thousandths(-0.4), -0.4);
    }

    #[test]
    fn a_variable_can_land_in_several_lists() {
        let mut descriptions = interactions();
        descriptions.describe("gfoo_f67", "Foo Group & Female 67");
        let breakdown: ScoreBreakdown = [("cna_gfoo_f67", 0.25)].into_iter().collect();

        let explanation =
            explain(&breakdown, &["cna"], &descriptions, &labels()).expect("explains");
        assert_eq!(explanation.demographic_components.len(), 1);
        assert_eq!(
            explanation.demographic_components[0].description,
            "Female with age equal to 67"
        );
        assert_eq!(explanation.interaction_components.len(), 1);
        assert_eq!(
            explanation.interaction_components[0].description,
            "Foo Group & Female 67"
        );
        assert_eq!(explanation.interaction_components[0].variable_name, "cna_gfoo_f67");
        assert!(explanation.hcc_components.is_empty());
        assert_eq!(explanation.total, 0.25);
    }

    #[test]
    fn bare_demographic_bucket_is_explained() {
        let breakdown: ScoreBreakdown = [("m70_74", 0.3)].into_iter().collect();
        let explanation =
            explain(&breakdown, &["cna"], &interactions(), &labels()).expect("explains");
        assert_eq!(
            explanation.demographic_components[0].description,
            "Male with age in range 70 to 74"
        );
    }

    #[test]
    fn declared_interaction_without_text_is_unknown() {
        let breakdown: ScoreBreakdown =
            [("ins_gcopdcf_asp_spec_b_pneum", 0.2)].into_iter().collect();
        let explanation =
            explain(&breakdown, &["ins"], &interactions(), &labels()).expect("explains");
        assert_eq!(explanation.interaction_components[0].description, UNKNOWN_INTERACTION);
    }

    #[test]
    fn category_without_label_is_an_error() {
        let breakdown: ScoreBreakdown = [("cna_hcc999", 0.1)].into_iter().collect();
        let error = explain(&breakdown, &["cna"], &interactions(), &labels())
            .expect_err("label missing");
        assert_eq!(
            error,
            ExplainError::MissingCategoryLabel {
                variable: "cna_hcc999".to_string(),
                category: "999".to_string(),
            }
        );
    }

    #[test]
    fn unmatched_variables_only_count_toward_total() {
        let breakdown: ScoreBreakdown =
            [("cna_hcc85", 0.3), ("something_else", 0.1)].into_iter().collect();
        let explanation =
            explain(&breakdown, &["cna"], &interactions(), &labels()).expect("explains");
        assert_eq!(explanation.total, 0.4);
        assert_eq!(explanation.hcc_components.len(), 1);
        assert!(explanation.interaction_components.is_empty());
        assert!(explanation.demographic_components.is_empty());
    }

    #[test]
    fn empty_breakdown_explains_to_zero() {
        let explanation = explain(&ScoreBreakdown::new(), &["cna"], &interactions(), &labels())
            .expect("explains");
        assert_eq!(explanation, Explanation::default());
    }
}
