//! Declarative interaction rules.
//!
//! A rule fires when every one of its conditions holds for the patient's
//! derived categories and demographic flags. Rules are grouped by variant
//! family so each model version can declare its own table.

use crate::categories::ConditionCategory;
use crate::models::VariantFamily;
use crate::patient::{PatientContext, Sex};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Category(ConditionCategory),
    AnyCategory(&'static [ConditionCategory]),
    Disabled,
    OriginallyDisabled,
    Sex(Sex),
    AgeBelow(u32),
    LongTermInstitutionalMedicaid,
}

impl Condition {
    pub fn holds(&self, categories: &BTreeSet<ConditionCategory>, patient: &PatientContext) -> bool {
        match *self {
            Self::Category(category) => categories.contains(&category),
            Self::AnyCategory(group) => group.iter().any(|category| categories.contains(category)),
            Self::Disabled => patient.is_disabled(),
            Self::OriginallyDisabled => patient.is_originally_disabled(),
            Self::Sex(sex) => patient.sex == sex,
            Self::AgeBelow(limit) => patient.age < limit,
            Self::LongTermInstitutionalMedicaid => patient.long_term_institutional_medicaid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionRule {
    /// Variable suffix, e.g. `hcc85_gdiabetesmellit`.
    pub name: &'static str,
    pub requires: &'static [Condition],
}

impl InteractionRule {
    pub fn fires(&self, categories: &BTreeSet<ConditionCategory>, patient: &PatientContext) -> bool {
        self.requires
            .iter()
            .all(|condition| condition.holds(categories, patient))
    }
}

/// Interaction rules of one model version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionTable {
    /// Applied to every community variant.
    pub community: &'static [InteractionRule],
    pub community_aged: &'static [InteractionRule],
    pub community_disabled: &'static [InteractionRule],
    pub institutional: &'static [InteractionRule],
}

impl InteractionTable {
    /// Rules that apply to `family`, in declaration order.
    pub fn rules_for(&self, family: VariantFamily) -> impl Iterator<Item = &'static InteractionRule> {
        let (shared, specific): (&'static [InteractionRule], &'static [InteractionRule]) =
            match family {
                VariantFamily::CommunityAged => (self.community, self.community_aged),
                VariantFamily::CommunityDisabled => (self.community, self.community_disabled),
                VariantFamily::Institutional => (&[], self.institutional),
                VariantFamily::NewEnrollee => (&[], &[]),
            };
        shared.iter().chain(specific.iter())
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> {
        self.community
            .iter()
            .chain(self.community_aged)
            .chain(self.community_disabled)
            .chain(self.institutional)
            .map(|rule| rule.name)
    }

    /// Names of the rules that fire for `family`.
    pub fn satisfied(
        &self,
        family: VariantFamily,
        categories: &BTreeSet<ConditionCategory>,
        patient: &PatientContext,
    ) -> Vec<&'static str> {
        self.rules_for(family)
            .filter(|rule| rule.fires(categories, patient))
            .map(|rule| rule.name)
            .collect()
    }
}
