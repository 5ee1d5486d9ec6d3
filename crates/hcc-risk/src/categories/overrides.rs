use super::{ConditionCategory, DiagnosisCode};
use crate::patient::Sex;

/// Diagnosis codes a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    Any,
    Listed(&'static [&'static str]),
}

impl CodeSet {
    fn contains(&self, code: &DiagnosisCode) -> bool {
        match self {
            Self::Any => true,
            Self::Listed(codes) => codes.contains(&code.as_str()),
        }
    }
}

/// Patient condition that must hold for a rule to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientPredicate {
    SexIs(Sex),
    AgeBelow(u32),
    AgeAbove(u32),
}

impl PatientPredicate {
    fn holds(&self, age: u32, sex: Sex) -> bool {
        match *self {
            Self::SexIs(expected) => sex == expected,
            Self::AgeBelow(limit) => age < limit,
            Self::AgeAbove(limit) => age > limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideOutcome {
    /// Replace the generic mapping with these categories.
    Categories(&'static [ConditionCategory]),
    /// The code contributes no category at all.
    Suppress,
}

/// Age/sex edit applied to a single diagnosis before the generic mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideRule {
    pub name: &'static str,
    pub codes: CodeSet,
    pub applies_when: PatientPredicate,
    pub outcome: OverrideOutcome,
}

impl OverrideRule {
    pub fn matches(&self, code: &DiagnosisCode, age: u32, sex: Sex) -> bool {
        self.codes.contains(code) && self.applies_when.holds(age, sex)
    }
}

/// First rule in `rules` that fires for the code, if any.
pub(crate) fn first_match<'r>(
    rules: &'r [OverrideRule],
    code: &DiagnosisCode,
    age: u32,
    sex: Sex,
) -> Option<&'r OverrideRule> {
    rules.iter().find(|rule| rule.matches(code, age, sex))
}

const PEDIATRIC_CHRONIC_LUNG_CODES: &[&str] = &[
    "J410", "J411", "J418", "J42", "J430", "J431", "J432", "J438", "J439", "J440", "J441",
    "J449", "J982", "J983",
];

/// Edits shared by the V22 and V23 software, evaluated in order.
pub const STANDARD_OVERRIDES: &[OverrideRule] = &[
    OverrideRule {
        name: "coagulation_defect_female",
        codes: CodeSet::Listed(&["D66", "D67"]),
        applies_when: PatientPredicate::SexIs(Sex::Female),
        outcome: OverrideOutcome::Categories(&[ConditionCategory(48)]),
    },
    OverrideRule {
        name: "pediatric_chronic_lung",
        codes: CodeSet::Listed(PEDIATRIC_CHRONIC_LUNG_CODES),
        applies_when: PatientPredicate::AgeBelow(18),
        outcome: OverrideOutcome::Categories(&[ConditionCategory(112)]),
    },
    // Fires for every code under six, not only F3481. Kept until clinical
    // review confirms the intended edit.
    OverrideRule {
        name: "under_six_any_code",
        codes: CodeSet::Any,
        applies_when: PatientPredicate::AgeBelow(6),
        outcome: OverrideOutcome::Suppress,
    },
    OverrideRule {
        name: "f3481_adult_exclusion",
        codes: CodeSet::Listed(&["F3481"]),
        applies_when: PatientPredicate::AgeAbove(18),
        outcome: OverrideOutcome::Suppress,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(code: &str, age: u32, sex: Sex) -> Option<&'static str> {
        first_match(STANDARD_OVERRIDES, &DiagnosisCode::normalize(code), age, sex)
            .map(|rule| rule.name)
    }

    #[test]
    fn coagulation_defect_only_for_female_patients() {
        assert_eq!(fired("D66", 40, Sex::Female), Some("coagulation_defect_female"));
        assert_eq!(fired("D67", 40, Sex::Male), None);
    }

    #[test]
    fn chronic_lung_codes_redirect_for_children() {
        assert_eq!(fired("J44.9", 10, Sex::Male), Some("pediatric_chronic_lung"));
        assert_eq!(fired("J449", 18, Sex::Male), None);
    }

    #[test]
    fn under_six_suppresses_every_code() {
        assert_eq!(fired("E1169", 5, Sex::Male), Some("under_six_any_code"));
        assert_eq!(fired("J449", 3, Sex::Male), Some("pediatric_chronic_lung"));
    }

    #[test]
    fn f3481_suppressed_above_eighteen_only() {
        assert_eq!(fired("F3481", 19, Sex::Female), Some("f3481_adult_exclusion"));
        assert_eq!(fired("F3481", 18, Sex::Female), None);
        assert_eq!(fired("F3481", 12, Sex::Female), None);
    }
}
