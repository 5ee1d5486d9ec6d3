//! CMS-HCC V22 as used for payment year 2018 (software V2218.79.O1).

use super::groups::*;
use super::{CoefficientPolicy, ModelVariant, ModelVersion};
use crate::categories::STANDARD_OVERRIDES;
use crate::patient::Sex;
use crate::scoring::interactions::{Condition, InteractionRule, InteractionTable};

pub static V22_2018: ModelVersion = ModelVersion {
    id: "2018_v22",
    software: "V2218.79.O1",
    model_year: 2018,
    policy: CoefficientPolicy::Strict,
    variants: &ModelVariant::ALL,
    overrides: STANDARD_OVERRIDES,
    interactions: INTERACTIONS,
    interaction_descriptions: INTERACTION_DESCRIPTIONS,
    category_labels: CATEGORY_LABELS,
    hierarchy: HIERARCHY,
};

const INTERACTIONS: InteractionTable = InteractionTable {
    community: &[
        InteractionRule {
            name: "hcc47_gcancer",
            requires: &[
                Condition::Category(IMMUNITY_DISORDERS),
                Condition::AnyCategory(CANCER),
            ],
        },
        InteractionRule {
            name: "hcc85_gdiabetesmellit",
            requires: &[Condition::Category(CHF), Condition::AnyCategory(DIABETES)],
        },
        InteractionRule {
            name: "hcc85_gcopdcf",
            requires: &[Condition::Category(CHF), Condition::AnyCategory(COPD_CF)],
        },
        InteractionRule {
            name: "hcc85_grenal",
            requires: &[Condition::Category(CHF), Condition::AnyCategory(RENAL_V22)],
        },
        InteractionRule {
            name: "grespdepandarre_gcopdcf",
            requires: &[
                Condition::AnyCategory(CARD_RESP_FAIL),
                Condition::AnyCategory(COPD_CF),
            ],
        },
        InteractionRule {
            name: "hcc85_hcc96",
            requires: &[Condition::Category(CHF), Condition::Category(ARRHYTHMIAS)],
        },
        InteractionRule {
            name: "gsubstanceabuse_gpsychiatric",
            requires: &[
                Condition::AnyCategory(SUBSTANCE_V22),
                Condition::AnyCategory(PSYCHIATRIC_V22),
            ],
        },
    ],
    community_aged: &[
        InteractionRule {
            name: "originallydisabled_female",
            requires: &[Condition::OriginallyDisabled, Condition::Sex(Sex::Female)],
        },
        InteractionRule {
            name: "originallydisabled_male",
            requires: &[Condition::OriginallyDisabled, Condition::Sex(Sex::Male)],
        },
    ],
    community_disabled: &[],
    institutional: &[
        InteractionRule {
            name: "chf_gcopdcf",
            requires: &[Condition::Category(CHF), Condition::AnyCategory(COPD_CF)],
        },
        InteractionRule {
            name: "gcopdcf_card_resp_fail",
            requires: &[
                Condition::AnyCategory(COPD_CF),
                Condition::AnyCategory(CARD_RESP_FAIL),
            ],
        },
        InteractionRule {
            name: "sepsis_pressure_ulcer",
            requires: &[
                Condition::Category(SEPSIS),
                Condition::AnyCategory(PRESSURE_ULCER),
            ],
        },
        InteractionRule {
            name: "sepsis_artif_openings",
            requires: &[
                Condition::Category(SEPSIS),
                Condition::Category(ARTIFICIAL_OPENINGS),
            ],
        },
        InteractionRule {
            name: "art_openings_pressure_ulcer",
            requires: &[
                Condition::AnyCategory(PRESSURE_ULCER),
                Condition::Category(ARTIFICIAL_OPENINGS),
            ],
        },
        InteractionRule {
            name: "diabetes_chf",
            requires: &[Condition::AnyCategory(DIABETES), Condition::Category(CHF)],
        },
        InteractionRule {
            name: "gcopdcf_asp_spec_bact_pneum",
            requires: &[
                Condition::AnyCategory(COPD_CF),
                Condition::Category(ASPIRATION_PNEUMONIA),
            ],
        },
        InteractionRule {
            name: "asp_spec_bact_pneum_pres_ulc",
            requires: &[
                Condition::AnyCategory(PRESSURE_ULCER),
                Condition::Category(ASPIRATION_PNEUMONIA),
            ],
        },
        InteractionRule {
            name: "sepsis_asp_spec_bact_pneum",
            requires: &[
                Condition::Category(SEPSIS),
                Condition::Category(ASPIRATION_PNEUMONIA),
            ],
        },
        InteractionRule {
            name: "schizophrenia_gcopdcf",
            requires: &[
                Condition::AnyCategory(COPD_CF),
                Condition::Category(SCHIZOPHRENIA),
            ],
        },
        InteractionRule {
            name: "schizophrenia_chf",
            requires: &[Condition::Category(CHF), Condition::Category(SCHIZOPHRENIA)],
        },
        InteractionRule {
            name: "schizophrenia_seizures",
            requires: &[
                Condition::Category(SCHIZOPHRENIA),
                Condition::Category(SEIZURES),
            ],
        },
        InteractionRule {
            name: "disabled_hcc85",
            requires: &[Condition::Disabled, Condition::Category(CHF)],
        },
        InteractionRule {
            name: "disabled_pressure_ulcer",
            requires: &[Condition::Disabled, Condition::AnyCategory(PRESSURE_ULCER)],
        },
        InteractionRule {
            name: "disabled_hcc161",
            requires: &[Condition::Disabled, Condition::Category(CHRONIC_SKIN_ULCER)],
        },
        InteractionRule {
            name: "disabled_hcc39",
            requires: &[
                Condition::Disabled,
                Condition::Category(BONE_JOINT_INFECTIONS),
            ],
        },
        InteractionRule {
            name: "disabled_hcc77",
            requires: &[Condition::Disabled, Condition::Category(MULTIPLE_SCLEROSIS)],
        },
        InteractionRule {
            name: "disabled_hcc6",
            requires: &[
                Condition::Disabled,
                Condition::Category(OPPORTUNISTIC_INFECTIONS),
            ],
        },
        InteractionRule {
            name: "ltimcaid",
            requires: &[Condition::LongTermInstitutionalMedicaid],
        },
        InteractionRule {
            name: "origds",
            requires: &[Condition::OriginallyDisabled],
        },
    ],
};

const INTERACTION_DESCRIPTIONS: &[(&str, &str)] = &[
    ("hcc47_gcancer", "Immunity Disorders & Cancer"),
    ("hcc85_gdiabetesmellit", "Congestive Heart Failure & Diabetes"),
    ("hcc85_gcopdcf", "Congestive Heart Failure & Cystic Fibrosis/COPD"),
    ("hcc85_grenal", "Congestive Heart Failure & Renal Failure"),
    ("grespdepandarre_gcopdcf", "Cardio-Respiratory Failure & Cystic Fibrosis/COPD"),
    ("hcc85_hcc96", "Congestive Heart failure & Specified Heart Arrhythmias"),
    ("gsubstanceabuse_gpsychiatric", "Drug/Alcohol Misuse & Psychiatric Disorder"),
    ("originallydisabled_female", "Female who originally qualified due to disability"),
    ("originallydisabled_male", "Male who originally qualified due to disability"),
    ("chf_gcopdcf", "Congestive Heart Failure & Cystic Fibrosis/COPD"),
    ("gcopdcf_card_resp_fail", "Cardio-Respiratory Failure & Cystic Fibrosis/COPD"),
    ("sepsis_pressure_ulcer", "Sepsis & Pressure Ulcer"),
    ("sepsis_artif_openings", "Sepsis & Artificial Openings for Feeding or Elimination"),
    (
        "art_openings_pressure_ulcer",
        "Pressure Ulcer & Artificial Openings for Feeding or Elimination",
    ),
    ("diabetes_chf", "Diabetes & Congestive Heart Failure"),
    (
        "gcopdcf_asp_spec_bact_pneum",
        "COPD & Aspiration and Specified Bacterial Pneumonias",
    ),
    (
        "asp_spec_bact_pneum_pres_ulc",
        "Pressure Ulcer & Aspiration and Specified Bacterial Pneumonias",
    ),
    (
        "sepsis_asp_spec_bact_pneum",
        "Sepsis & Aspiration and Specified Bacterial Pneumonias",
    ),
    ("schizophrenia_gcopdcf", "Schizophrenia & Cystic Fibrosis/COPD"),
    ("schizophrenia_chf", "Schizophrenia & Congestive Heart Failure"),
    ("schizophrenia_seizures", "Schizophrenia & Seizures"),
    ("disabled_hcc85", "Disabled & Congestive Heart Failure"),
    ("disabled_pressure_ulcer", "Disabled & Pressure Ulcer"),
    ("disabled_hcc161", "Disabled & Chronic Ulcer of Skin, Except Pressure"),
    ("disabled_hcc39", "Disabled & Bone/Joint/Muscle Infections/Necrosis"),
    ("disabled_hcc77", "Disabled & Multiple Sclerosis"),
    ("disabled_hcc6", "Disabled & Opportunistic Infections"),
    (
        "ltimcaid",
        "Institutional Model & Patient on Medicaid at least part of the payment year",
    ),
    (
        "origds",
        "Patient is over 65 & Original reason for entitlement is disability",
    ),
];

// V22 label file V22H79L1.
const CATEGORY_LABELS: &[(u16, &str)] = &[
    (1, "HIV/AIDS"),
    (2, "Septicemia, Sepsis, Systemic Inflammatory Response Syndrome/Shock"),
    (6, "Opportunistic Infections"),
    (8, "Metastatic Cancer and Acute Leukemia"),
    (9, "Lung and Other Severe Cancers"),
    (10, "Lymphoma and Other Cancers"),
    (11, "Colorectal, Bladder, and Other Cancers"),
    (12, "Breast, Prostate, and Other Cancers and Tumors"),
    (17, "Diabetes with Acute Complications"),
    (18, "Diabetes with Chronic Complications"),
    (19, "Diabetes without Complication"),
    (21, "Protein-Calorie Malnutrition"),
    (22, "Morbid Obesity"),
    (23, "Other Significant Endocrine and Metabolic Disorders"),
    (27, "End-Stage Liver Disease"),
    (28, "Cirrhosis of Liver"),
    (29, "Chronic Hepatitis"),
    (33, "Intestinal Obstruction/Perforation"),
    (34, "Chronic Pancreatitis"),
    (35, "Inflammatory Bowel Disease"),
    (39, "Bone/Joint/Muscle Infections/Necrosis"),
    (40, "Rheumatoid Arthritis and Inflammatory Connective Tissue Disease"),
    (46, "Severe Hematological Disorders"),
    (47, "Disorders of Immunity"),
    (48, "Coagulation Defects and Other Specified Hematological Disorders"),
    (54, "Drug/Alcohol Psychosis"),
    (55, "Drug/Alcohol Dependence"),
    (57, "Schizophrenia"),
    (58, "Major Depressive, Bipolar, and Paranoid Disorders"),
    (70, "Quadriplegia"),
    (71, "Paraplegia"),
    (72, "Spinal Cord Disorders/Injuries"),
    (73, "Amyotrophic Lateral Sclerosis and Other Motor Neuron Disease"),
    (74, "Cerebral Palsy"),
    (
        75,
        "Myasthenia Gravis/Myoneural Disorders and Guillain-Barre Syndrome/Inflammatory and Toxic Neuropathy",
    ),
    (76, "Muscular Dystrophy"),
    (77, "Multiple Sclerosis"),
    (78, "Parkinson's and Huntington's Diseases"),
    (79, "Seizure Disorders and Convulsions"),
    (80, "Coma, Brain Compression/Anoxic Damage"),
    (82, "Respirator Dependence/Tracheostomy Status"),
    (83, "Respiratory Arrest"),
    (84, "Cardio-Respiratory Failure and Shock"),
    (85, "Congestive Heart Failure"),
    (86, "Acute Myocardial Infarction"),
    (87, "Unstable Angina and Other Acute Ischemic Heart Disease"),
    (88, "Angina Pectoris"),
    (96, "Specified Heart Arrhythmias"),
    (99, "Intracranial Hemorrhage"),
    (100, "Ischemic or Unspecified Stroke"),
    (103, "Hemiplegia/Hemiparesis"),
    (104, "Monoplegia, Other Paralytic Syndromes"),
    (106, "Atherosclerosis of the Extremities with Ulceration or Gangrene"),
    (107, "Vascular Disease with Complications"),
    (108, "Vascular Disease"),
    (110, "Cystic Fibrosis"),
    (111, "Chronic Obstructive Pulmonary Disease"),
    (112, "Fibrosis of Lung and Other Chronic Lung Disorders"),
    (114, "Aspiration and Specified Bacterial Pneumonias"),
    (115, "Pneumococcal Pneumonia, Empyema, Lung Abscess"),
    (122, "Proliferative Diabetic Retinopathy and Vitreous Hemorrhage"),
    (124, "Exudative Macular Degeneration"),
    (134, "Dialysis Status"),
    (135, "Acute Renal Failure"),
    (136, "Chronic Kidney Disease, Stage 5"),
    (137, "Chronic Kidney Disease, Severe (Stage 4)"),
    (157, "Pressure Ulcer of Skin with Necrosis Through to Muscle, Tendon, or Bone"),
    (158, "Pressure Ulcer of Skin with Full Thickness Skin Loss"),
    (161, "Chronic Ulcer of Skin, Except Pressure"),
    (162, "Severe Skin Burn or Condition"),
    (166, "Severe Head Injury"),
    (167, "Major Head Injury"),
    (169, "Vertebral Fractures without Spinal Cord Injury"),
    (170, "Hip Fracture/Dislocation"),
    (173, "Traumatic Amputations and Complications"),
    (176, "Complications of Specified Implanted Device or Graft"),
    (186, "Major Organ Transplant or Replacement Status"),
    (188, "Artificial Openings for Feeding or Elimination"),
    (189, "Amputation Status, Lower Limb/Amputation Complications"),
];

// Hierarchy file V22H79H1, listed with full dominated sets.
const HIERARCHY: &[(u16, &[u16])] = &[
    (8, &[9, 10, 11, 12]),
    (9, &[10, 11, 12]),
    (10, &[11, 12]),
    (11, &[12]),
    (17, &[18, 19]),
    (18, &[19]),
    (27, &[28, 29, 80]),
    (28, &[29]),
    (46, &[48]),
    (54, &[55]),
    (57, &[58]),
    (70, &[71, 72, 103, 104, 169]),
    (71, &[72, 104, 169]),
    (72, &[169]),
    (82, &[83, 84]),
    (83, &[84]),
    (86, &[87, 88]),
    (87, &[88]),
    (99, &[100]),
    (103, &[104]),
    (106, &[107, 108, 161, 189]),
    (107, &[108]),
    (110, &[111, 112]),
    (111, &[112]),
    (114, &[115]),
    (134, &[135, 136, 137]),
    (135, &[136, 137]),
    (136, &[137]),
    (157, &[158, 161]),
    (158, &[161]),
    (166, &[80, 167]),
];
