//! End-to-end screening sessions: validate, classify, report.

use std::sync::Arc;

use pfas_model::{BinaryLabel, ClassifierError, StumpDirection};
use pfas_schema::Task;
use pfas_screen::{ScreeningReport, ScreeningSession, SubmissionOutcome};
use pretty_assertions::assert_eq;
use tests::{
    bias_only, single_split, single_stump, submission, CountingClassifier, FailingClassifier,
};

#[test]
fn influent_defaults_flow_through_to_the_risk_message() {
    // A model that always finds risk: any valid submission maps to the
    // positive influent message.
    let session = ScreeningSession::new(Task::InfluentClassification, bias_only(13, 1.0));

    match session.submit(&submission(&[])).unwrap() {
        SubmissionOutcome::Prediction(assessment) => {
            assert_eq!(assessment.label, BinaryLabel::Positive);
            assert_eq!(
                assessment.message,
                "The PFAS risk is greater than 70 nanograms per liter (70 ng/L)."
            );
        }
        SubmissionOutcome::Invalid(errors) => panic!("defaults must validate: {errors}"),
    }
}

#[test]
fn invalid_ph_reports_one_failure_and_never_reaches_the_model() {
    let counting = Arc::new(CountingClassifier::new(13, BinaryLabel::Positive));
    let session = ScreeningSession::new(Task::InfluentClassification, counting.clone());

    match session.submit(&submission(&[("ph", "20")])).unwrap() {
        SubmissionOutcome::Invalid(errors) => {
            assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["ph"]);
            assert_eq!(errors.failures()[0].to_string(), "ph: out of range [0,14]");
        }
        SubmissionOutcome::Prediction(_) => panic!("out-of-range pH must not classify"),
    }
    assert_eq!(counting.calls(), 0);
}

#[test]
fn the_pfas_only_biosolids_form_screens_all_zero_analytes() {
    // One stump voting `Below` at threshold 0: a zero PFBA reading is not
    // strictly above 0, so the all-defaults form lands positive.
    let model = single_stump(39, 0, 0.0, StumpDirection::Below, 1.0);
    let session = ScreeningSession::new(Task::BiosolidsPfasOnly, Arc::new(model));

    match session.submit(&submission(&[])).unwrap() {
        SubmissionOutcome::Prediction(assessment) => {
            assert_eq!(
                assessment.message,
                "PFAS is at high risk for detection in biosolids."
            );
        }
        SubmissionOutcome::Invalid(errors) => panic!("all-zero analytes must validate: {errors}"),
    }
}

#[test]
fn overriding_one_field_can_flip_the_outcome() {
    let schema = Task::InfluentClassification.schema();
    let flow = schema.position("flow").unwrap();
    let session = ScreeningSession::new(
        Task::InfluentClassification,
        single_split(13, flow, 3.0, -1.0, 1.0),
    );

    // The default flow of 3.1334 sits above the split.
    match session.submit(&submission(&[])).unwrap() {
        SubmissionOutcome::Prediction(assessment) => {
            assert_eq!(assessment.label, BinaryLabel::Positive)
        }
        SubmissionOutcome::Invalid(errors) => panic!("defaults must validate: {errors}"),
    }

    match session.submit(&submission(&[("flow", "2.0")])).unwrap() {
        SubmissionOutcome::Prediction(assessment) => {
            assert_eq!(assessment.label, BinaryLabel::Negative)
        }
        SubmissionOutcome::Invalid(errors) => panic!("override must validate: {errors}"),
    }
}

#[test]
fn resubmitting_the_same_form_gives_the_same_outcome() {
    let session = ScreeningSession::new(Task::EffluentClassification, bias_only(25, -1.0));
    let form = submission(&[("ph_inf", "6.9"), ("toc_eff", "123456")]);

    let first = session.submit(&form).unwrap();
    let second = session.submit(&form).unwrap();
    match (&first, &second) {
        (SubmissionOutcome::Prediction(a), SubmissionOutcome::Prediction(b)) => {
            assert_eq!(a.label, b.label);
            assert_eq!(
                a.message,
                "The PFAS risk is lower than 70 nanograms per liter (70 ng/L)."
            );
            assert_eq!(a.message, b.message);
        }
        _ => panic!("both submissions must classify"),
    }
}

#[test]
fn a_misdeployed_model_surfaces_as_a_hard_error() {
    // 39 inputs behind a 13-field form: a deployment defect, not a
    // validation failure.
    let session = ScreeningSession::new(Task::InfluentClassification, bias_only(39, 1.0));
    let err = session.submit(&submission(&[])).unwrap_err();
    assert_eq!(
        err,
        ClassifierError::DimensionMismatch {
            expected: 39,
            actual: 13
        }
    );

    let failing = Arc::new(FailingClassifier { feature_count: 13 });
    let session = ScreeningSession::new(Task::InfluentClassification, failing);
    let err = session.submit(&submission(&[])).unwrap_err();
    assert!(matches!(err, ClassifierError::Failed(_)));
}

#[test]
fn json_reports_carry_the_outcome_shape() {
    let session = ScreeningSession::new(Task::InfluentPrediction, bias_only(13, 1.0));

    let ok = session.submit(&submission(&[])).unwrap();
    let report = serde_json::to_value(ScreeningReport::new(Task::InfluentPrediction, &ok)).unwrap();
    assert_eq!(report["task"], "influent-prediction");
    assert_eq!(report["ok"], true);
    assert!(report["message"]
        .as_str()
        .unwrap()
        .contains("greater than 70"));
    assert_eq!(report["failures"].as_array().unwrap().len(), 0);

    let invalid = session.submit(&submission(&[("ph", "peach")])).unwrap();
    let report =
        serde_json::to_value(ScreeningReport::new(Task::InfluentPrediction, &invalid)).unwrap();
    assert_eq!(report["ok"], false);
    assert_eq!(report["failures"][0]["key"], "ph");
    assert_eq!(report["failures"][0]["error"], "not a valid number");
    // The message key is omitted entirely when there is no prediction.
    assert!(report.get("message").is_none());
}
