#![allow(dead_code)]

use hcc_risk::{ModelRegistry, RiskModel, ScoreBreakdown};
use std::path::PathBuf;
use std::sync::Arc;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn registry() -> ModelRegistry {
    ModelRegistry::load_dir(fixtures_dir()).expect("fixture tables load")
}

pub fn model(id: &str) -> Arc<RiskModel> {
    registry().get(id).expect("fixture model registered")
}

pub fn variables(breakdown: &ScoreBreakdown) -> Vec<&str> {
    breakdown
        .iter()
        .map(|component| component.variable.as_str())
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
