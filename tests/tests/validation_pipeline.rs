//! Batch validation against the builtin forms.

use pfas_schema::{FieldViolation, Task};
use pfas_validate::validate;
use pretty_assertions::assert_eq;
use tests::submission;

#[test]
fn untouched_forms_validate_for_every_task() {
    for task in Task::ALL {
        let vector = validate(task.schema(), &submission(&[]))
            .unwrap_or_else(|e| panic!("defaults for {task} must validate: {e}"));
        assert_eq!(vector.len(), task.schema().len());
    }
}

#[test]
fn vector_positions_follow_the_form_order() {
    let schema = Task::InfluentClassification.schema();
    let overrides = submission(&[("ph", "6.5"), ("flow", "2.0")]);
    let vector = validate(schema, &overrides).unwrap();

    assert_eq!(vector.as_slice()[schema.position("ph").unwrap()], 6.5);
    assert_eq!(vector.as_slice()[schema.position("flow").unwrap()], 2.0);
    // Untouched fields keep their defaults.
    assert_eq!(vector.as_slice()[schema.position("year").unwrap()], 2024.0);
    assert_eq!(vector.as_slice()[schema.position("tds").unwrap()], 250000.0);
}

#[test]
fn every_failure_of_a_submission_is_reported_together() {
    let schema = Task::InfluentClassification.schema();
    let bad = submission(&[
        ("discharge_volume", "abc"),
        ("total_ammonia", ""),
        ("tds", "12,5"),
    ]);

    let errors = validate(schema, &bad).unwrap_err();
    // All three failures, in form order, not just the first.
    let keys: Vec<&str> = errors.keys().collect();
    assert_eq!(keys, vec!["discharge_volume", "total_ammonia", "tds"]);
    assert!(errors
        .failures()
        .iter()
        .all(|f| f.violation == FieldViolation::NotANumber));
}

#[test]
fn ph_is_bounded_and_other_fields_are_not() {
    let schema = Task::InfluentClassification.schema();

    let high_ph = submission(&[("ph", "14.5")]);
    let errors = validate(schema, &high_ph).unwrap_err();
    assert_eq!(errors.failures().len(), 1);
    assert_eq!(
        errors.failures()[0].violation,
        FieldViolation::OutOfRange { min: 0.0, max: 14.0 }
    );

    // Extreme but parseable values pass everywhere else.
    let extreme = submission(&[("bod", "-1e308"), ("tss", "0")]);
    assert!(validate(schema, &extreme).is_ok());
}

#[test]
fn the_empty_string_is_invalid_but_a_missing_key_is_not() {
    let schema = Task::InfluentClassification.schema();

    // No keys at all: every field falls back to its default.
    assert!(validate(schema, &submission(&[])).is_ok());

    // An explicitly empty value is a failed parse, not a fallback.
    let empty = submission(&[("flow", "")]);
    let errors = validate(schema, &empty).unwrap_err();
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["flow"]);
    assert_eq!(errors.failures()[0].violation, FieldViolation::NotANumber);
}

#[test]
fn report_wording_matches_the_deployed_forms() {
    let schema = Task::InfluentClassification.schema();
    let bad = submission(&[("flow", "fast"), ("ph", "99")]);

    let errors = validate(schema, &bad).unwrap_err();
    assert_eq!(
        errors.to_string(),
        "The following inputs are invalid: flow, ph"
    );
    assert_eq!(errors.failures()[0].to_string(), "flow: not a valid number");
    assert_eq!(errors.failures()[1].to_string(), "ph: out of range [0,14]");
}

#[test]
fn pfas_only_defaults_produce_the_zero_vector() {
    for task in [Task::EffluentPfasOnly, Task::BiosolidsPfasOnly] {
        let vector = validate(task.schema(), &submission(&[])).unwrap();
        assert_eq!(vector.len(), 39);
        assert!(vector.as_slice().iter().all(|v| *v == 0.0));
    }
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let schema = Task::EffluentClassification.schema();
    let padded = submission(&[("ph_inf", "  6.9 "), ("toc_eff", " 16000000")]);

    let vector = validate(schema, &padded).unwrap();
    assert_eq!(vector.as_slice()[schema.position("ph_inf").unwrap()], 6.9);
}
