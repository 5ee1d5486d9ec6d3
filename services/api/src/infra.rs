use chrono::NaiveDate;
use hcc_risk::error::AppError;
use hcc_risk::{age_in_model_year, EntitlementReason, ModelRegistry, RiskModel, Sex};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loaded models shared by every scoring handler.
#[derive(Clone)]
pub(crate) struct ScoringState {
    pub(crate) registry: Arc<ModelRegistry>,
    pub(crate) default_model: String,
}

impl ScoringState {
    pub(crate) fn new(registry: ModelRegistry, default_model: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(registry),
            default_model: default_model.into(),
        }
    }

    /// Resolves the requested model id, falling back to the configured default.
    pub(crate) fn model(&self, requested: Option<&str>) -> Result<Arc<RiskModel>, AppError> {
        let id = requested
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.default_model);
        Ok(self.registry.get(id)?)
    }
}

/// Age on February 1 of the model year, from an explicit age or a birth date.
pub(crate) fn resolve_age(
    model: &RiskModel,
    age: Option<u32>,
    date_of_birth: Option<NaiveDate>,
) -> Result<u32, AppError> {
    match (age, date_of_birth) {
        (Some(age), None) => Ok(age),
        (None, Some(dob)) => Ok(age_in_model_year(dob, model.version().model_year)?),
        (Some(_), Some(_)) => Err(AppError::InvalidRequest(
            "provide either age or date_of_birth, not both".to_string(),
        )),
        (None, None) => Err(AppError::InvalidRequest(
            "either age or date_of_birth is required".to_string(),
        )),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Accepts the CMS code (`1`, `2`) or a name (`m`, `female`).
pub(crate) fn parse_sex(raw: &str) -> Result<Sex, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "m" | "male" => Ok(Sex::Male),
        "2" | "f" | "female" => Ok(Sex::Female),
        other => Err(format!("unknown sex '{other}' (expected 1, 2, male or female)")),
    }
}

pub(crate) fn parse_entitlement_reason(raw: &str) -> Result<EntitlementReason, String> {
    let code = raw
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("failed to parse '{raw}' as an OREC code ({err})"))?;
    EntitlementReason::try_from(code).map_err(|err| err.to_string())
}

/// `name=weight` pairs used by the explain command.
pub(crate) fn parse_component(raw: &str) -> Result<(String, f64), String> {
    let (name, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=WEIGHT, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("component '{raw}' has no name"));
    }
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse weight in '{raw}' ({err})"))?;
    Ok((name.to_string(), weight))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sex_codes_and_names() {
        assert_eq!(parse_sex("1"), Ok(Sex::Male));
        assert_eq!(parse_sex(" Female "), Ok(Sex::Female));
        assert!(parse_sex("3").is_err());
    }

    #[test]
    fn parses_components() {
        assert_eq!(
            parse_component("cna_hcc85=0.323"),
            Ok(("cna_hcc85".to_string(), 0.323))
        );
        assert!(parse_component("cna_hcc85").is_err());
        assert!(parse_component("=0.1").is_err());
        assert!(parse_component("cna_hcc85=high").is_err());
    }

    #[test]
    fn parses_entitlement_reason() {
        assert_eq!(parse_entitlement_reason("1"), Ok(EntitlementReason::Disability));
        assert!(parse_entitlement_reason("7").is_err());
    }
}
