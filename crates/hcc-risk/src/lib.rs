//! Hierarchical condition category (HCC) risk adjustment.
//!
//! A patient's diagnoses are reduced to a minimal set of condition
//! categories, combined with demographic and enrollment attributes, and
//! resolved against a model version's coefficient table into a score
//! breakdown. Breakdowns can later be explained from their variable names.

pub mod categories;
pub mod config;
pub mod error;
pub mod explain;
pub mod hierarchy;
pub mod models;
pub mod patient;
pub mod scoring;
pub mod tables;
pub mod telemetry;

pub use categories::{CategoryDeriver, ConditionCategory, DiagnosisCode};
pub use explain::{explain, ExplainError, ExplainedComponent, Explanation, InteractionDescriptions};
pub use hierarchy::{HierarchyError, HierarchyRelation};
pub use models::{
    CoefficientPolicy, ModelRegistry, ModelVariant, ModelVersion, RegistryError, RiskModel,
    VariantFamily, V22_2018, V23_2019,
};
pub use patient::{age_in_model_year, EntitlementReason, PatientContext, PatientError, Sex};
pub use scoring::{
    ScoreBreakdown, ScoreCalculator, ScoreComponent, ScoredPatient, ScoringError, VariableKind,
};
pub use tables::{CategoryLabels, CoefficientTable, DiagnosisMap, ReferenceTables, TableError};
