//! Builtin screening tasks: six forms, their outcome messages, and the
//! artifact names they are served by.
//!
//! Field order, default strings, and message wording reproduce the deployed
//! monitoring forms for California WWTPs field for field. Defaults are the
//! medians of the training data (PFAS analyte concentrations default to 0)
//! and double as the values a presenter pre-fills, so submitting a form
//! untouched always validates.

use lazy_static::lazy_static;

use crate::field::FieldSchema;
use crate::form::FormSchema;

/// pH bounds shared by every pH field; no other parameter carries a bound.
pub const PH_MIN: f64 = 0.0;
pub const PH_MAX: f64 = 14.0;

const RISK_BELOW_70: &str = "The PFAS risk is lower than 70 nanograms per liter (70 ng/L).";
const RISK_ABOVE_70: &str = "The PFAS risk is greater than 70 nanograms per liter (70 ng/L).";
const BIOSOLIDS_LOW: &str = "PFAS is at low risk for detection in biosolids.";
const BIOSOLIDS_HIGH: &str = "PFAS is at high risk for detection in biosolids.";
const EFFLUENT_LOW: &str = "Total PFAS is at low risk for detection in effluent.";
const EFFLUENT_HIGH: &str = "Total PFAS is at high risk for detection in effluent.";

/// The message pair a task's binary outcome maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeLabels {
    /// Shown for class 0.
    pub negative: &'static str,
    /// Shown for class 1.
    pub positive: &'static str,
}

/// The screening tasks this crate ships schemas for.
///
/// [`InfluentClassification`](Task::InfluentClassification) and
/// [`InfluentPrediction`](Task::InfluentPrediction) resolve to the same
/// trained artifact while their forms enumerate the thirteen parameters in
/// different orders and disagree on two defaults (TDS, TOC). The
/// disagreement is inherited from the deployed forms. It is deliberately not
/// resolved here; `pfas_model` offers a key-order check so a deployment can
/// surface it to the model owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Influent risk (70 ng/L threshold) from 13 operating parameters.
    InfluentClassification,
    /// The unit-annotated variant of the influent form; same artifact.
    InfluentPrediction,
    /// Effluent risk (70 ng/L threshold) from 25 influent + effluent parameters.
    EffluentClassification,
    /// Biosolids detection from 24 influent + effluent parameters (no flow).
    BiosolidsPrediction,
    /// Effluent detection from the 39 PFAS analytes measured in influent.
    EffluentPfasOnly,
    /// Biosolids detection from the 39 PFAS analytes measured in influent.
    BiosolidsPfasOnly,
}

impl Task {
    pub const ALL: [Task; 6] = [
        Task::InfluentClassification,
        Task::InfluentPrediction,
        Task::EffluentClassification,
        Task::BiosolidsPrediction,
        Task::EffluentPfasOnly,
        Task::BiosolidsPfasOnly,
    ];

    /// Stable kebab-case identifier, used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Task::InfluentClassification => "influent-classification",
            Task::InfluentPrediction => "influent-prediction",
            Task::EffluentClassification => "effluent-classification",
            Task::BiosolidsPrediction => "biosolids-prediction",
            Task::EffluentPfasOnly => "effluent-pfas-only",
            Task::BiosolidsPfasOnly => "biosolids-pfas-only",
        }
    }

    /// Inverse of [`id`](Task::id).
    pub fn from_id(id: &str) -> Option<Task> {
        Task::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Task::InfluentClassification => "Risk Prediction of Total PFAS in Influent",
            Task::InfluentPrediction => {
                "Risk Prediction of Total PFAS in Influent (Non-PFAS as Input Features)"
            }
            Task::EffluentClassification => "Risk Prediction of Total PFAS in Effluent",
            Task::BiosolidsPrediction => "Risk Prediction of Total PFAS in Biosolids",
            Task::EffluentPfasOnly => {
                "Risk Prediction of Total PFAS in Effluent (Only PFASs in Influent as Input Features)"
            }
            Task::BiosolidsPfasOnly => {
                "Risk Prediction of Total PFAS in Biosolids (Only PFASs in Influent as Input Features)"
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Task::InfluentClassification => {
                "Classifies total PFAS in WWTP influent as above or below 70 ng/L \
                 from routinely monitored operating parameters."
            }
            Task::InfluentPrediction => {
                "The influent classifier behind a form that annotates every \
                 parameter with its measurement units."
            }
            Task::EffluentClassification => {
                "Classifies total PFAS in WWTP effluent as above or below 70 ng/L \
                 from influent and effluent operating parameters."
            }
            Task::BiosolidsPrediction => {
                "Predicts whether PFAS will be detected in WWTP biosolids from \
                 influent and effluent operating parameters."
            }
            Task::EffluentPfasOnly => {
                "Predicts whether total PFAS will be detected in effluent from the \
                 39 PFAS analyte concentrations measured in influent."
            }
            Task::BiosolidsPfasOnly => {
                "Predicts whether total PFAS will be detected in biosolids from the \
                 39 PFAS analyte concentrations measured in influent."
            }
        }
    }

    /// The ordered form this task validates submissions against.
    pub fn schema(self) -> &'static FormSchema {
        match self {
            Task::InfluentClassification => &INFLUENT_CLASSIFICATION,
            Task::InfluentPrediction => &INFLUENT_PREDICTION,
            Task::EffluentClassification => &EFFLUENT_CLASSIFICATION,
            Task::BiosolidsPrediction => &BIOSOLIDS_PREDICTION,
            Task::EffluentPfasOnly => &EFFLUENT_PFAS_ONLY,
            Task::BiosolidsPfasOnly => &BIOSOLIDS_PFAS_ONLY,
        }
    }

    pub fn outcome_labels(self) -> OutcomeLabels {
        match self {
            Task::InfluentClassification | Task::InfluentPrediction | Task::EffluentClassification => {
                OutcomeLabels {
                    negative: RISK_BELOW_70,
                    positive: RISK_ABOVE_70,
                }
            }
            Task::BiosolidsPrediction | Task::BiosolidsPfasOnly => OutcomeLabels {
                negative: BIOSOLIDS_LOW,
                positive: BIOSOLIDS_HIGH,
            },
            Task::EffluentPfasOnly => OutcomeLabels {
                negative: EFFLUENT_LOW,
                positive: EFFLUENT_HIGH,
            },
        }
    }

    /// The name of the trained artifact serving this task. Both influent
    /// tasks share one.
    pub fn artifact_stem(self) -> &'static str {
        match self {
            Task::InfluentClassification | Task::InfluentPrediction => "CatBoost_model_inf",
            Task::EffluentClassification => "CatBoost_model_eff",
            Task::BiosolidsPrediction => "CatBoost_model_bio",
            Task::EffluentPfasOnly => "CatBoost_model_eff_web",
            Task::BiosolidsPfasOnly => "AdaBoost_model_BIO_web",
        }
    }

    /// Default artifact file name (`<stem>.json`).
    pub fn default_artifact(self) -> String {
        format!("{}.json", self.artifact_stem())
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

lazy_static! {
    static ref INFLUENT_CLASSIFICATION: FormSchema = influent_classification();
    static ref INFLUENT_PREDICTION: FormSchema = influent_prediction();
    static ref EFFLUENT_CLASSIFICATION: FormSchema = effluent_classification();
    static ref BIOSOLIDS_PREDICTION: FormSchema = biosolids_prediction();
    static ref EFFLUENT_PFAS_ONLY: FormSchema = pfas_only("effluent-pfas-only");
    static ref BIOSOLIDS_PFAS_ONLY: FormSchema = pfas_only("biosolids-pfas-only");
}

fn builtin(name: &str, fields: Vec<FieldSchema>) -> FormSchema {
    // Builtin tables are fixed at compile time and covered by tests; a failure
    // here is a typo in this file, not a runtime condition.
    FormSchema::new(name, fields).expect("builtin schema is self-consistent")
}

fn ph(key: &str, label: &str) -> FieldSchema {
    FieldSchema::bounded(key, label, "7.0", PH_MIN, PH_MAX)
}

fn influent_classification() -> FormSchema {
    builtin(
        "influent-classification",
        vec![
            FieldSchema::free("year", "Select a Year", "2024"),
            FieldSchema::free("month", "Select a Month", "1"),
            FieldSchema::free("discharge_volume", "Discharge Volume", "169.25"),
            FieldSchema::free("influent_volume", "Influent Volume", "387"),
            FieldSchema::free("industrial_total", "Industrial Total", "0.625"),
            FieldSchema::free("total_ammonia", "Total Ammonia", "22300000"),
            FieldSchema::free("bod", "Biochemical Oxygen Demand", "255668102.2"),
            FieldSchema::free("cbod", "Carbonaceous Biochemical Oxygen Demand", "645000000"),
            FieldSchema::free("flow", "Flow", "3.1334"),
            FieldSchema::free("tds", "Total Dissolved Solids", "250000"),
            FieldSchema::free("toc", "Total Organic Carbon", "250000"),
            FieldSchema::free("tss", "Total Suspended Solids", "240900372.8"),
            ph("ph", "pH"),
        ],
    )
}

fn influent_prediction() -> FormSchema {
    builtin(
        "influent-prediction",
        vec![
            FieldSchema::free("year", "Select a Year", "2024"),
            FieldSchema::free("month", "Select a Month", "1"),
            FieldSchema::free(
                "flow",
                "Flow in Influent (The flow rate of the influent to the facility (MGD))",
                "3.1334",
            ),
            FieldSchema::free("influent_volume", "Influent Volume (acre-feet/month)", "387"),
            FieldSchema::free(
                "discharge_volume",
                "Discharge Volume in Influent (acre-feet/month)",
                "169.25",
            ),
            FieldSchema::free(
                "industrial_total",
                "Industrial Total in Influent (Percentage of total industrial inflow in all inflow) (%)",
                "0.625",
            ),
            FieldSchema::free(
                "total_ammonia",
                "Total Ammonia in Influent (NH4 + NH3 (ng/L))",
                "22300000",
            ),
            FieldSchema::free(
                "bod",
                "Biochemical Oxygen Demand in Influent (BOD was measured in 5 days at 20 deg. C (ng/L))",
                "255668102.2",
            ),
            FieldSchema::free(
                "cbod",
                "Carbonaceous Biochemical Oxygen Demand in Influent (CBOD was measured in 5 days at 20 deg. C (ng/L))",
                "645000000",
            ),
            FieldSchema::free("tds", "Total Dissolved Solids in Influent (TDS (ng/L))", "507170067"),
            FieldSchema::free("toc", "Total Organic Carbon in Influent (TOC (ng/L))", "16043614"),
            FieldSchema::free(
                "tss",
                "Total Suspended Solids in Influent (TSS (ng/L))",
                "240900372.8",
            ),
            ph("ph", "pH of Influent"),
        ],
    )
}

fn effluent_classification() -> FormSchema {
    builtin(
        "effluent-classification",
        vec![
            FieldSchema::free("year", "Select a Year", "2024"),
            FieldSchema::free("month", "Select a Month", "1"),
            FieldSchema::free("discharge_volume", "Discharge Volume", "169.25"),
            FieldSchema::free("influent_volume", "Influent Volume", "387"),
            FieldSchema::free("industrial_total", "Industrial Total", "0.625"),
            FieldSchema::free("total_ammonia_inf", "Total Ammonia (Influent)", "22300000"),
            FieldSchema::free("bod_inf", "Biochemical Oxygen Demand (Influent)", "255668102.2"),
            FieldSchema::free(
                "cbod_inf",
                "Carbonaceous Biochemical Oxygen Demand (Influent)",
                "645000000",
            ),
            FieldSchema::free("flow_inf", "Flow (Influent)", "3.1334"),
            FieldSchema::free("tds_inf", "Total Dissolved Solids (Influent)", "250000"),
            FieldSchema::free("toc_inf", "Total Organic Carbon (Influent)", "250000"),
            FieldSchema::free("tss_inf", "Total Suspended Solids (Influent)", "240900372.8"),
            ph("ph_inf", "pH (Influent)"),
            FieldSchema::free("total_ammonia_eff", "Total Ammonia (Effluent)", "176526.7692"),
            FieldSchema::free(
                "bod_percent_removal_eff",
                "Biochemical Oxygen Demand, Percent Removal (Effluent)",
                "250000",
            ),
            FieldSchema::free("bod_eff", "Biochemical Oxygen Demand (Effluent)", "2873391.258"),
            FieldSchema::free(
                "cbod_eff",
                "Carbonaceous Biochemical Oxygen Demand (Effluent)",
                "2372284.641",
            ),
            FieldSchema::free("total_nitrate", "Total Nitrate", "250000"),
            FieldSchema::free("total_nitrite", "Total Nitrite", "250000"),
            FieldSchema::free("total_nitrogen", "Total Nitrogen", "250000"),
            FieldSchema::free("tds_eff", "Total Dissolved Solids (Effluent)", "507170067.4"),
            FieldSchema::free("toc_eff", "Total Organic Carbon (Effluent)", "16000000"),
            FieldSchema::free("tss_eff", "Total Suspended Solids (Effluent)", "2336653.964"),
            FieldSchema::free(
                "tss_percent_removal_eff",
                "Total Suspended Solids, Percent Removal (Effluent)",
                "250000",
            ),
            ph("ph_eff", "pH (Effluent)"),
        ],
    )
}

fn biosolids_prediction() -> FormSchema {
    builtin(
        "biosolids-prediction",
        vec![
            FieldSchema::free("year", "Select a Year", "2024"),
            FieldSchema::free("month", "Select a Month", "1"),
            FieldSchema::free("influent_volume", "Influent Volume (acre-feet/month)", "387"),
            FieldSchema::free(
                "discharge_volume",
                "Discharge Volume in Influent (acre-feet/month)",
                "169.25",
            ),
            FieldSchema::free(
                "industrial_total",
                "Industrial Total in Influent (Percentage of total industrial inflow in all inflow) (%)",
                "0.625",
            ),
            FieldSchema::free(
                "total_ammonia_inf",
                "Total Ammonia in Influent (NH4 + NH3 (ng/L))",
                "22300000",
            ),
            FieldSchema::free(
                "bod_inf",
                "Biochemical Oxygen Demand in Influent (BOD was measured in 5 days at 20 deg. C (ng/L))",
                "255668102.2",
            ),
            FieldSchema::free(
                "cbod_inf",
                "Carbonaceous Biochemical Oxygen Demand in Influent (CBOD was measured in 5 days at 20 deg. C (ng/L))",
                "645000000",
            ),
            FieldSchema::free(
                "tds_inf",
                "Total Dissolved Solids in Influent (TDS (ng/L))",
                "507170067",
            ),
            FieldSchema::free(
                "toc_inf",
                "Total Organic Carbon in Influent (TOC (ng/L))",
                "16043614",
            ),
            FieldSchema::free(
                "tss_inf",
                "Total Suspended Solids in Influent (TSS (ng/L))",
                "240900372.8",
            ),
            ph("ph_inf", "pH of Influent"),
            FieldSchema::free("total_ammonia_eff", "Total Ammonia in Effluent", "176526.7692"),
            FieldSchema::free(
                "bod_percent_removal_eff",
                "Biochemical Oxygen Demand, Percent Removal in Effluent",
                "0",
            ),
            FieldSchema::free("bod_eff", "Biochemical Oxygen Demand in Effluent", "2873391.258"),
            FieldSchema::free(
                "cbod_eff",
                "Carbonaceous Biochemical Oxygen Demand in Effluent",
                "2372284.641",
            ),
            FieldSchema::free("total_nitrate", "Total Nitrate in Effluent", "0"),
            FieldSchema::free("total_nitrite", "Total Nitrite in Effluent", "0"),
            FieldSchema::free("total_nitrogen", "Total Nitrogen in Effluent", "0"),
            FieldSchema::free("tds_eff", "Total Dissolved Solids in Effluent", "507170067.4"),
            FieldSchema::free("toc_eff", "Total Organic Carbon in Effluent", "16000000"),
            FieldSchema::free("tss_eff", "Total Suspended Solids in Effluent", "2336653.964"),
            FieldSchema::free(
                "tss_percent_removal_eff",
                "Total Suspended Solids, Percent Removal in Effluent",
                "0",
            ),
            ph("ph_eff", "pH of Effluent"),
        ],
    )
}

/// The 39 analytes of the PFAS-only forms, in training order.
const PFAS_ANALYTES: [(&str, &str); 39] = [
    ("pfba", "PFBA (ng/L)"),
    ("pfpea", "PFPeA (ng/L)"),
    ("pfhxa", "PFHxA (ng/L)"),
    ("pfhpa", "PFHpA (ng/L)"),
    ("pfoa", "PFOA (ng/L)"),
    ("pfna", "PFNA (ng/L)"),
    ("pfda", "PFDA (ng/L)"),
    ("pfuna", "PFUnA (ng/L)"),
    ("pfdoa", "PFDoA (ng/L)"),
    ("pftrda", "PFTrDA (ng/L)"),
    ("pfta", "PFTA (ng/L)"),
    ("pfhxda", "PFHxDA (ng/L)"),
    ("pfoda", "PFODA (ng/L)"),
    ("ftca_3_3", "3:3 FTCA (ng/L)"),
    ("ftca_5_3", "5:3 FTCA (ng/L)"),
    ("ftca_7_3", "7:3 FTCA (ng/L)"),
    ("fts_4_2", "4:2 FTS (ng/L)"),
    ("fts_6_2", "6:2 FTS (ng/L)"),
    ("fts_8_2", "8:2 FTS (ng/L)"),
    ("fts_10_2", "10:2 FTS (ng/L)"),
    ("pfbs", "PFBS (ng/L)"),
    ("pfpes", "PFPeS (ng/L)"),
    ("pfhxs", "PFHxS (ng/L)"),
    ("pfhps", "PFHpS (ng/L)"),
    ("pfos", "PFOS (ng/L)"),
    ("pfns", "PFNS (ng/L)"),
    ("pfds", "PFDS (ng/L)"),
    ("pfdos", "PFDoS (ng/L)"),
    ("fosa", "FOSA (ng/L)"),
    ("mefosa", "MeFOSA (ng/L)"),
    ("etfosa", "EtFOSA (ng/L)"),
    ("mefose", "MeFOSE (ng/L)"),
    ("etfose", "EtFOSE (ng/L)"),
    ("nmefosaa", "NMeFOSAA (ng/L)"),
    ("netfosaa", "NEtFOSAA (ng/L)"),
    ("adona", "ADONA (ng/L)"),
    ("hfpo_da", "HFPO_DA (GenX) (ng/L)"),
    ("clpf3ouds_11", "11ClPF3OUDS (ng/L)"),
    ("clpf3ons_9", "9ClPF3ONS (ng/L)"),
];

fn pfas_only(name: &str) -> FormSchema {
    let fields = PFAS_ANALYTES
        .iter()
        .map(|(key, label)| FieldSchema::free(*key, *label, "0"))
        .collect();
    builtin(name, fields)
}
