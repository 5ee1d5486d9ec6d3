use crate::config::ConfigError;
use crate::explain::ExplainError;
use crate::models::RegistryError;
use crate::patient::PatientError;
use crate::scoring::ScoringError;
use crate::tables::TableError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Tables(TableError),
    Registry(RegistryError),
    Patient(PatientError),
    Scoring(ScoringError),
    Explain(ExplainError),
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Tables(err) => write!(f, "reference table error: {}", err),
            AppError::Registry(err) => write!(f, "{}", err),
            AppError::Patient(err) => write!(f, "invalid patient: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Explain(err) => write!(f, "explain error: {}", err),
            AppError::InvalidRequest(message) => write!(f, "invalid request: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Tables(err) => Some(err),
            AppError::Registry(err) => Some(err),
            AppError::Patient(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Explain(err) => Some(err),
            AppError::InvalidRequest(_) => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Registry(_) => StatusCode::NOT_FOUND,
            AppError::Patient(_)
            | AppError::InvalidRequest(_)
            | AppError::Scoring(ScoringError::UnsupportedVariant { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Scoring(ScoringError::MissingCoefficient { .. }) | AppError::Explain(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Tables(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<TableError> for AppError {
    fn from(value: TableError) -> Self {
        Self::Tables(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<PatientError> for AppError {
    fn from(value: PatientError) -> Self {
        Self::Patient(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<ExplainError> for AppError {
    fn from(value: ExplainError) -> Self {
        Self::Explain(value)
    }
}
