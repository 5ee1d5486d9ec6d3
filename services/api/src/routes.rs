use crate::infra::{deserialize_optional_date, resolve_age, AppState, ScoringState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use hcc_risk::error::AppError;
use hcc_risk::{
    CoefficientPolicy, EntitlementReason, Explanation, ModelVariant, PatientContext, RiskModel,
    ScoreBreakdown, ScoredPatient, Sex,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) model: Option<String>,
    pub(crate) variant: ModelVariant,
    pub(crate) sex: Sex,
    #[serde(default)]
    pub(crate) age: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) diagnoses: Vec<String>,
    #[serde(default)]
    pub(crate) long_term_institutional_medicaid: bool,
    #[serde(default)]
    pub(crate) new_enrollee_medicaid: bool,
    #[serde(default)]
    pub(crate) original_entitlement_reason: EntitlementReason,
    #[serde(default)]
    pub(crate) explain: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) model: &'static str,
    pub(crate) variant: ModelVariant,
    pub(crate) age: u32,
    pub(crate) categories: Vec<String>,
    pub(crate) breakdown: ScoreBreakdown,
    pub(crate) total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) explanation: Option<Explanation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExplainRequest {
    #[serde(default)]
    pub(crate) model: Option<String>,
    pub(crate) components: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModelSummary {
    pub(crate) id: &'static str,
    pub(crate) software: &'static str,
    pub(crate) model_year: i32,
    pub(crate) policy: CoefficientPolicy,
    pub(crate) variants: &'static [ModelVariant],
    pub(crate) diagnosis_codes: usize,
    pub(crate) coefficients: usize,
}

pub(crate) fn with_scoring_routes(state: ScoringState) -> Router {
    Router::new()
        .route("/api/v1/models", get(models_endpoint))
        .route("/api/v1/score", post(score_endpoint))
        .route("/api/v1/explain", post(explain_endpoint))
        .with_state(state)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn models_endpoint(State(state): State<ScoringState>) -> Json<Vec<ModelSummary>> {
    let models = state
        .registry
        .models()
        .map(|model| {
            let version = model.version();
            ModelSummary {
                id: version.id,
                software: version.software,
                model_year: version.model_year,
                policy: model.policy(),
                variants: version.variants,
                diagnosis_codes: model.tables().mapping.len(),
                coefficients: model.tables().coefficients.len(),
            }
        })
        .collect();
    Json(models)
}

pub(crate) async fn score_endpoint(
    State(state): State<ScoringState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let model = state.model(payload.model.as_deref())?;
    let age = resolve_age(&model, payload.age, payload.date_of_birth)?;

    let patient = PatientContext::new(age, payload.sex)
        .with_diagnoses(payload.diagnoses)
        .with_long_term_institutional_medicaid(payload.long_term_institutional_medicaid)
        .with_new_enrollee_medicaid(payload.new_enrollee_medicaid)
        .with_entitlement_reason(payload.original_entitlement_reason);

    let response = score_patient(&model, &patient, payload.variant, payload.explain)?;
    Ok(Json(response))
}

/// Scores and optionally explains one patient. `categories` lists what the
/// breakdown was built from, so it is empty for new-enrollee variants.
pub(crate) fn score_patient(
    model: &RiskModel,
    patient: &PatientContext,
    variant: ModelVariant,
    explain: bool,
) -> Result<ScoreResponse, AppError> {
    let ScoredPatient {
        categories,
        breakdown,
    } = model.score_with_categories(patient, variant)?;
    let categories = categories
        .into_iter()
        .map(|category| category.to_string())
        .collect();
    let explanation = if explain {
        Some(model.explain(&breakdown)?)
    } else {
        None
    };

    debug!(
        model = model.id(),
        %variant,
        components = breakdown.len(),
        unresolved = breakdown.unresolved().len(),
        "scored patient"
    );

    Ok(ScoreResponse {
        model: model.id(),
        variant,
        age: patient.age,
        categories,
        total: breakdown.total(),
        breakdown,
        explanation,
    })
}

pub(crate) async fn explain_endpoint(
    State(state): State<ScoringState>,
    Json(payload): Json<ExplainRequest>,
) -> Result<Json<Explanation>, AppError> {
    let model = state.model(payload.model.as_deref())?;
    let breakdown: ScoreBreakdown = payload.components.into_iter().collect();
    Ok(Json(model.explain(&breakdown)?))
}
