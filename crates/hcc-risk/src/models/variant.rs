use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Segment of the beneficiary population with its own coefficient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelVariant {
    #[serde(rename = "cna")]
    CommunityNonDualAged,
    #[serde(rename = "cnd")]
    CommunityNonDualDisabled,
    #[serde(rename = "cfa")]
    CommunityFullDualAged,
    #[serde(rename = "cfd")]
    CommunityFullDualDisabled,
    #[serde(rename = "cpa")]
    CommunityPartialDualAged,
    #[serde(rename = "cpd")]
    CommunityPartialDualDisabled,
    #[serde(rename = "ins")]
    Institutional,
    #[serde(rename = "ne")]
    NewEnrollee,
    #[serde(rename = "snpne")]
    SpecialNeedsPlanNewEnrollee,
}

/// Groups of variants that share demographic and interaction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantFamily {
    CommunityAged,
    CommunityDisabled,
    Institutional,
    NewEnrollee,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 9] = [
        Self::CommunityNonDualAged,
        Self::CommunityNonDualDisabled,
        Self::CommunityFullDualAged,
        Self::CommunityFullDualDisabled,
        Self::CommunityPartialDualAged,
        Self::CommunityPartialDualDisabled,
        Self::Institutional,
        Self::NewEnrollee,
        Self::SpecialNeedsPlanNewEnrollee,
    ];

    /// Coefficient-name prefix, e.g. `cna`.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::CommunityNonDualAged => "cna",
            Self::CommunityNonDualDisabled => "cnd",
            Self::CommunityFullDualAged => "cfa",
            Self::CommunityFullDualDisabled => "cfd",
            Self::CommunityPartialDualAged => "cpa",
            Self::CommunityPartialDualDisabled => "cpd",
            Self::Institutional => "ins",
            Self::NewEnrollee => "ne",
            Self::SpecialNeedsPlanNewEnrollee => "snpne",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::CommunityNonDualAged => "Community, non-dual, aged",
            Self::CommunityNonDualDisabled => "Community, non-dual, disabled",
            Self::CommunityFullDualAged => "Community, full benefit dual, aged",
            Self::CommunityFullDualDisabled => "Community, full benefit dual, disabled",
            Self::CommunityPartialDualAged => "Community, partial benefit dual, aged",
            Self::CommunityPartialDualDisabled => "Community, partial benefit dual, disabled",
            Self::Institutional => "Long-term institutional",
            Self::NewEnrollee => "New enrollee",
            Self::SpecialNeedsPlanNewEnrollee => "Chronic condition special needs plan new enrollee",
        }
    }

    pub const fn family(self) -> VariantFamily {
        match self {
            Self::CommunityNonDualAged
            | Self::CommunityFullDualAged
            | Self::CommunityPartialDualAged => VariantFamily::CommunityAged,
            Self::CommunityNonDualDisabled
            | Self::CommunityFullDualDisabled
            | Self::CommunityPartialDualDisabled => VariantFamily::CommunityDisabled,
            Self::Institutional => VariantFamily::Institutional,
            Self::NewEnrollee | Self::SpecialNeedsPlanNewEnrollee => VariantFamily::NewEnrollee,
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let prefix = prefix.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.prefix().eq_ignore_ascii_case(prefix))
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model variant `{0}`; expected one of cna, cnd, cfa, cfd, cpa, cpd, ins, ne, snpne")]
pub struct UnknownVariant(pub String);

impl FromStr for ModelVariant {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_prefix(value).ok_or_else(|| UnknownVariant(value.to_string()))
    }
}
