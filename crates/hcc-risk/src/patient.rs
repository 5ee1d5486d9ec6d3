use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary sex code used by the CMS models: 1 = male, 2 = female.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const fn code(self) -> u8 {
        match self {
            Self::Male => 1,
            Self::Female => 2,
        }
    }

    /// Leading character of a demographic bucket (`m70_74`, `f0_34`, ...).
    pub const fn bucket_prefix(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl TryFrom<u8> for Sex {
    type Error = PatientError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            other => Err(PatientError::InvalidSex(other)),
        }
    }
}

impl From<Sex> for u8 {
    fn from(sex: Sex) -> Self {
        sex.code()
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Original reason for Medicare entitlement (OREC).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EntitlementReason {
    #[default]
    OldAge,
    Disability,
    Esrd,
    DisabilityAndEsrd,
}

impl EntitlementReason {
    pub const fn code(self) -> u8 {
        match self {
            Self::OldAge => 0,
            Self::Disability => 1,
            Self::Esrd => 2,
            Self::DisabilityAndEsrd => 3,
        }
    }
}

impl TryFrom<u8> for EntitlementReason {
    type Error = PatientError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::OldAge),
            1 => Ok(Self::Disability),
            2 => Ok(Self::Esrd),
            3 => Ok(Self::DisabilityAndEsrd),
            other => Err(PatientError::InvalidEntitlementReason(other)),
        }
    }
}

impl From<EntitlementReason> for u8 {
    fn from(reason: EntitlementReason) -> Self {
        reason.code()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientError {
    #[error("sex code must be 1 (male) or 2 (female), got {0}")]
    InvalidSex(u8),
    #[error("original entitlement reason must be between 0 and 3, got {0}")]
    InvalidEntitlementReason(u8),
    #[error("model year {0} has no February 1 reference date")]
    InvalidModelYear(i32),
    #[error("date of birth {dob} falls after the model reference date {reference}")]
    BirthAfterReferenceDate {
        dob: NaiveDate,
        reference: NaiveDate,
    },
}

/// Request-scoped patient attributes consumed by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContext {
    /// Age as of February 1 of the model year.
    pub age: u32,
    pub sex: Sex,
    #[serde(default)]
    pub diagnoses: Vec<String>,
    /// Long-term institutional resident enrolled in Medicaid; institutional model only.
    #[serde(default)]
    pub long_term_institutional_medicaid: bool,
    /// New enrollee with Medicaid during the payment year; new-enrollee models only.
    #[serde(default)]
    pub new_enrollee_medicaid: bool,
    #[serde(default)]
    pub entitlement_reason: EntitlementReason,
}

impl PatientContext {
    pub fn new(age: u32, sex: Sex) -> Self {
        Self {
            age,
            sex,
            diagnoses: Vec::new(),
            long_term_institutional_medicaid: false,
            new_enrollee_medicaid: false,
            entitlement_reason: EntitlementReason::OldAge,
        }
    }

    pub fn with_diagnoses<I, S>(mut self, diagnoses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diagnoses = diagnoses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_entitlement_reason(mut self, reason: EntitlementReason) -> Self {
        self.entitlement_reason = reason;
        self
    }

    pub fn with_long_term_institutional_medicaid(mut self, enrolled: bool) -> Self {
        self.long_term_institutional_medicaid = enrolled;
        self
    }

    pub fn with_new_enrollee_medicaid(mut self, enrolled: bool) -> Self {
        self.new_enrollee_medicaid = enrolled;
        self
    }

    /// Under 65 and entitled for any reason other than age.
    pub fn is_disabled(&self) -> bool {
        self.age < 65 && self.entitlement_reason != EntitlementReason::OldAge
    }

    /// 65 or older but originally entitled because of disability alone.
    pub fn is_originally_disabled(&self) -> bool {
        self.age >= 65 && self.entitlement_reason == EntitlementReason::Disability
    }
}

/// Age of a patient on February 1 of `model_year`.
pub fn age_in_model_year(dob: NaiveDate, model_year: i32) -> Result<u32, PatientError> {
    let reference = NaiveDate::from_ymd_opt(model_year, 2, 1)
        .ok_or(PatientError::InvalidModelYear(model_year))?;
    if dob > reference {
        return Err(PatientError::BirthAfterReferenceDate { dob, reference });
    }

    let birthday_pending = (reference.month(), reference.day()) < (dob.month(), dob.day());
    let years = reference.year() - dob.year() - i32::from(birthday_pending);
    Ok(years as u32)
}
