mod common;

use common::{assert_close, model, registry, variables};
use hcc_risk::{
    EntitlementReason, ModelVariant, PatientContext, ScoringError, Sex, VariableKind,
};

fn reference_patient() -> PatientContext {
    PatientContext::new(70, Sex::Male).with_diagnoses([
        "E1169", "I5030", "I509", "I211", "I209", "R05",
    ])
}

#[test]
fn registry_loads_every_fixture_version() {
    let registry = registry();
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["2018_v22", "2019_v23"]);

    let v22 = registry.get("2018_v22").expect("v22 loaded");
    assert_eq!(v22.tables().mapping.len(), 30);
    assert_eq!(v22.tables().coefficients.len(), 45);
}

#[test]
fn community_aged_reference_patient() {
    let model = model("2018_v22");
    let breakdown = model
        .score(&reference_patient(), ModelVariant::CommunityNonDualAged)
        .expect("all coefficients present");

    assert_eq!(
        variables(&breakdown),
        vec![
            "cna_m70_74",
            "cna_hcc18",
            "cna_hcc85",
            "cna_hcc88",
            "cna_hcc85_gdiabetesmellit",
        ]
    );
    assert_eq!(breakdown.get("cna_m70_74"), Some(0.379));
    assert_eq!(breakdown.get("cna_hcc18"), Some(0.318));
    assert_eq!(breakdown.get("cna_hcc85"), Some(0.323));
    assert_eq!(breakdown.get("cna_hcc88"), Some(0.14));
    assert_eq!(breakdown.get("cna_hcc85_gdiabetesmellit"), Some(0.154));
    assert_close(breakdown.total(), 1.314);
    assert!(breakdown.unresolved().is_empty());
}

#[test]
fn diagnosis_formatting_does_not_change_the_score() {
    let model = model("2018_v22");
    let messy = PatientContext::new(70, Sex::Male).with_diagnoses([
        " e11.69 ",
        "\u{feff}I50.30",
        "i50.9",
        "I20.9",
        "I20.9",
    ]);

    let clean = model
        .score(&reference_patient(), ModelVariant::CommunityNonDualAged)
        .expect("scores");
    let scored = model
        .score(&messy, ModelVariant::CommunityNonDualAged)
        .expect("scores");
    assert_eq!(scored, clean);
}

#[test]
fn hierarchy_keeps_only_the_most_severe_diabetes_category() {
    let model = model("2018_v22");
    let patient = PatientContext::new(72, Sex::Female).with_diagnoses(["E119", "E1169", "E1010"]);
    let breakdown = model
        .score(&patient, ModelVariant::CommunityNonDualAged)
        .expect("scores");

    assert_eq!(variables(&breakdown), vec!["cna_f70_74", "cna_hcc17"]);
    assert_close(breakdown.total(), 0.386 + 0.318);
}

#[test]
fn coagulation_override_depends_on_sex() {
    let model = model("2018_v22");

    let female = PatientContext::new(67, Sex::Female).with_diagnoses(["D66"]);
    let breakdown = model
        .score(&female, ModelVariant::CommunityNonDualAged)
        .expect("scores");
    assert_eq!(variables(&breakdown), vec!["cna_f65_69", "cna_hcc48"]);

    let male = PatientContext::new(67, Sex::Male).with_diagnoses(["D66"]);
    let breakdown = model
        .score(&male, ModelVariant::CommunityNonDualAged)
        .expect("scores");
    assert_eq!(variables(&breakdown), vec!["cna_m65_69", "cna_hcc46"]);
}

#[test]
fn children_under_six_receive_only_the_demographic_component() {
    let model = model("2018_v22");
    let patient = PatientContext::new(3, Sex::Male).with_diagnoses(["E1169", "I5030", "C7800"]);
    let breakdown = model
        .score(&patient, ModelVariant::CommunityNonDualAged)
        .expect("scores");

    assert_eq!(variables(&breakdown), vec!["cna_m0_34"]);
    assert!(model.derive_categories(&patient).is_empty());
}

#[test]
fn pediatric_lung_codes_use_the_age_override() {
    let model = model("2018_v22");

    let child = PatientContext::new(10, Sex::Female).with_diagnoses(["J449"]);
    let breakdown = model
        .score(&child, ModelVariant::CommunityNonDualAged)
        .expect("scores");
    assert_eq!(variables(&breakdown), vec!["cna_f0_34", "cna_hcc112"]);

    let adult = PatientContext::new(67, Sex::Female).with_diagnoses(["J449"]);
    let breakdown = model
        .score(&adult, ModelVariant::CommunityNonDualAged)
        .expect("scores");
    assert_eq!(variables(&breakdown), vec!["cna_f65_69", "cna_hcc111"]);
}

#[test]
fn strict_model_rejects_missing_demographic_coefficient() {
    let model = model("2018_v22");
    let patient = PatientContext::new(82, Sex::Male).with_diagnoses(["E1169"]);

    match model.score(&patient, ModelVariant::CommunityNonDualAged) {
        Err(ScoringError::MissingCoefficient {
            variable,
            kind,
            age,
            sex,
        }) => {
            assert_eq!(variable, "cna_m80_84");
            assert_eq!(kind, VariableKind::Demographic);
            assert_eq!(age, 82);
            assert_eq!(sex, Sex::Male);
        }
        other => panic!("expected missing coefficient, got {other:?}"),
    }
}

#[test]
fn lenient_model_reports_unresolved_variables() {
    let model = model("2019_v23");
    let patient = PatientContext::new(70, Sex::Male)
        .with_diagnoses(["E1169", "E119", "I5030", "J449", "N183", "F329"]);
    let breakdown = model
        .score(&patient, ModelVariant::CommunityNonDualAged)
        .expect("lenient scoring never fails on coefficients");

    assert_eq!(
        variables(&breakdown),
        vec![
            "cna_m70_74",
            "cna_hcc18",
            "cna_hcc85",
            "cna_hcc111",
            "cna_hcc138",
            "cna_hcc85_gdiabetesmellit",
            "cna_hcc85_gcopdcf",
            "cna_hcc85_grenal_v23",
        ]
    );
    assert_eq!(breakdown.unresolved(), ["cna_hcc59".to_string()]);
    assert_close(
        breakdown.total(),
        0.395 + 0.302 + 0.331 + 0.335 + 0.069 + 0.121 + 0.155 + 0.156,
    );
}

#[test]
fn community_disabled_substance_and_psychiatric_interaction() {
    let model = model("2019_v23");
    let patient = PatientContext::new(57, Sex::Male)
        .with_entitlement_reason(EntitlementReason::Disability)
        .with_diagnoses(["F1120", "F1290", "F209", "F329"]);
    let breakdown = model
        .score(&patient, ModelVariant::CommunityNonDualDisabled)
        .expect("scores");

    assert_eq!(
        variables(&breakdown),
        vec![
            "cnd_m55_59",
            "cnd_hcc55",
            "cnd_hcc57",
            "cnd_disable_substabuse_psych_v23",
        ]
    );
}

#[test]
fn institutional_interactions_follow_rule_order() {
    let model = model("2019_v23");
    let patient = PatientContext::new(72, Sex::Male)
        .with_long_term_institutional_medicaid(true)
        .with_diagnoses(["A419", "L89154", "Z431", "J690", "J449"]);
    let breakdown = model
        .score(&patient, ModelVariant::Institutional)
        .expect("scores");

    assert_eq!(
        variables(&breakdown),
        vec![
            "ins_m70_74",
            "ins_hcc2",
            "ins_hcc111",
            "ins_hcc114",
            "ins_hcc157",
            "ins_hcc188",
            "ins_sepsis_pressure_ulcer",
            "ins_sepsis_artif_openings",
            "ins_art_openings_press_ulcer",
            "ins_gcopdcf_asp_spec_b_pneum",
            "ins_asp_spec_b_pneum_pres_ulc",
            "ins_sepsis_asp_spec_bact_pneum",
            "ins_ltimcaid",
        ]
    );
    assert!(breakdown.unresolved().is_empty());
}

#[test]
fn new_enrollee_scores_demographics_only() {
    let model = model("2018_v22");

    let patient = PatientContext::new(70, Sex::Male).with_diagnoses(["E1169", "I5030"]);
    let breakdown = model
        .score(&patient, ModelVariant::NewEnrollee)
        .expect("scores");
    assert_eq!(variables(&breakdown), vec!["ne_nmcaid_norigdis_m70_74"]);
    assert_close(breakdown.total(), 0.502);

    let patient = PatientContext::new(67, Sex::Female)
        .with_entitlement_reason(EntitlementReason::Disability)
        .with_new_enrollee_medicaid(true);
    let breakdown = model
        .score(&patient, ModelVariant::NewEnrollee)
        .expect("scores");
    assert_eq!(variables(&breakdown), vec!["ne_mcaid_origdis_f67"]);
}

#[test]
fn derived_categories_are_exposed_for_inspection() {
    let model = model("2018_v22");
    let categories: Vec<u16> = model
        .derive_categories(&reference_patient())
        .into_iter()
        .map(|category| category.number())
        .collect();
    assert_eq!(categories, vec![18, 85, 88]);
}
