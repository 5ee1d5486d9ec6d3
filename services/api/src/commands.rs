use crate::infra::{
    parse_component, parse_date, parse_entitlement_reason, parse_sex, resolve_age, ScoringState,
};
use crate::routes::{score_patient, ScoreResponse};
use chrono::NaiveDate;
use clap::Args;
use hcc_risk::config::AppConfig;
use hcc_risk::error::AppError;
use hcc_risk::telemetry;
use hcc_risk::{
    EntitlementReason, ExplainedComponent, Explanation, ModelRegistry, ModelVariant, ModelVersion,
    PatientContext, ReferenceTables, RegistryError, RiskModel, ScoreBreakdown, Sex,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Model version id (defaults to HCC_DEFAULT_MODEL)
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Variant prefix, e.g. cna, cnd, ins, ne
    #[arg(long)]
    pub(crate) variant: ModelVariant,
    /// 1/male or 2/female
    #[arg(long, value_parser = parse_sex)]
    pub(crate) sex: Sex,
    /// Age on February 1 of the model year
    #[arg(long, conflicts_with = "dob", required_unless_present = "dob")]
    pub(crate) age: Option<u32>,
    /// Date of birth (YYYY-MM-DD); age is computed for the model year
    #[arg(long, value_parser = parse_date)]
    pub(crate) dob: Option<NaiveDate>,
    /// ICD-10 diagnosis code; repeat or separate with commas
    #[arg(long = "diagnosis", value_delimiter = ',')]
    pub(crate) diagnoses: Vec<String>,
    /// Long-term institutional resident enrolled in Medicaid
    #[arg(long)]
    pub(crate) ltimcaid: bool,
    /// New enrollee with Medicaid
    #[arg(long)]
    pub(crate) new_enrollee_medicaid: bool,
    /// Original reason for entitlement (0 old age, 1 disability, 2 ESRD, 3 both)
    #[arg(long, value_parser = parse_entitlement_reason, default_value = "0")]
    pub(crate) orec: EntitlementReason,
    /// Attach a labeled explanation of the breakdown
    #[arg(long)]
    pub(crate) explain: bool,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Override HCC_TABLES_DIR
    #[arg(long)]
    pub(crate) tables_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    /// Model version id (defaults to HCC_DEFAULT_MODEL)
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Breakdown component as NAME=WEIGHT; repeat for each variable
    #[arg(long = "component", value_parser = parse_component, required = true)]
    pub(crate) components: Vec<(String, f64)>,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct HierarchyArgs {
    /// Model version id (defaults to HCC_DEFAULT_MODEL)
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Show only direct dominance edges
    #[arg(long)]
    pub(crate) reduced: bool,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let tables_dir = args.tables_dir.unwrap_or(config.models.tables_dir);
    let state = ScoringState::new(
        ModelRegistry::load_dir(&tables_dir)?,
        config.models.default_model,
    );
    let model = state.model(args.model.as_deref())?;
    let age = resolve_age(&model, args.age, args.dob)?;

    let patient = PatientContext::new(age, args.sex)
        .with_diagnoses(args.diagnoses)
        .with_long_term_institutional_medicaid(args.ltimcaid)
        .with_new_enrollee_medicaid(args.new_enrollee_medicaid)
        .with_entitlement_reason(args.orec);
    let response = score_patient(&model, &patient, args.variant, args.explain)?;

    if args.json {
        print_json(&response)
    } else {
        render_score(&model, &patient, &response);
        Ok(())
    }
}

pub(crate) fn run_explain(args: ExplainArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let model = builtin_model(args.model.as_deref(), &config.models.default_model)?;

    let breakdown: ScoreBreakdown = args.components.into_iter().collect();
    let explanation = model.explain(&breakdown)?;

    if args.json {
        print_json(&explanation)
    } else {
        render_explanation(&explanation);
        Ok(())
    }
}

pub(crate) fn run_hierarchy(args: HierarchyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let version = builtin_version(args.model.as_deref(), &config.models.default_model)?;

    let mut hierarchy = version.hierarchy_relation();
    if args.reduced {
        hierarchy = hierarchy.reduce();
    }

    if args.json {
        return print_json(&hierarchy);
    }

    let shape = if args.reduced { "reduced" } else { "closed" };
    println!("{} hierarchy ({shape}, {} dominant categories)", version.id, hierarchy.len());
    for (dominant, dominated) in hierarchy.iter() {
        let dominated: Vec<String> = dominated.iter().map(ToString::to_string).collect();
        println!("  {dominant} > {}", dominated.join(", "));
    }
    Ok(())
}

fn builtin_version(
    requested: Option<&str>,
    default_model: &str,
) -> Result<&'static ModelVersion, AppError> {
    let id = requested.unwrap_or(default_model);
    let version = ModelVersion::find(id)
        .ok_or_else(|| RegistryError::UnknownModel(id.trim().to_string()))?;
    Ok(version)
}

/// Explaining only needs the compiled-in labels, so no tables are loaded.
fn builtin_model(requested: Option<&str>, default_model: &str) -> Result<RiskModel, AppError> {
    let version = builtin_version(requested, default_model)?;
    let model = RiskModel::new(version, ReferenceTables::default())
        .map_err(hcc_risk::TableError::from)?;
    Ok(model)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn render_score(model: &RiskModel, patient: &PatientContext, response: &ScoreResponse) {
    let version = model.version();
    println!(
        "Model {} ({}), variant {}: {}",
        version.id,
        version.software,
        response.variant,
        response.variant.description()
    );
    println!("Patient: {}, age {}", patient.sex, response.age);
    if response.categories.is_empty() {
        println!("Categories: none");
    } else {
        println!("Categories: {}", response.categories.join(", "));
    }

    println!("Components:");
    for component in &response.breakdown {
        println!("  - {}: {:.3}", component.variable, component.weight);
    }
    let unresolved = response.breakdown.unresolved();
    if !unresolved.is_empty() {
        println!("Unresolved (no coefficient): {}", unresolved.join(", "));
    }
    println!("Total: {:.3}", response.total);

    if let Some(explanation) = &response.explanation {
        println!();
        render_explanation(explanation);
    }
}

fn render_explanation(explanation: &Explanation) {
    println!("Explanation (total {:.3})", explanation.total);
    render_section("Demographics", &explanation.demographic_components);
    render_section("Condition categories", &explanation.hcc_components);
    render_section("Interactions", &explanation.interaction_components);
}

fn render_section(title: &str, components: &[ExplainedComponent]) {
    if components.is_empty() {
        return;
    }
    println!("{title}:");
    for component in components {
        println!(
            "  - {} ({:.3}): {}",
            component.variable_name, component.score, component.description
        );
    }
}
