//! Artifact files, the registry, and the key-order cross-check.

use std::fs;
use std::sync::Arc;

use pfas_model::{
    load_classifier, ArtifactMetadata, ClassifierArtifact, ClassifierRegistry, ModelError,
    ModelSpec, StumpDirection,
};
use pfas_schema::Task;
use pfas_screen::ScreeningSession;
use pretty_assertions::assert_eq;
use tests::{artifact, constant_model, single_stump, submission};

#[test]
fn one_registered_artifact_serves_both_influent_tasks() {
    let registry = ClassifierRegistry::new();
    registry
        .register(artifact(
            "CatBoost_model_inf",
            ModelSpec::Oblivious(constant_model(13, 1.0)),
        ))
        .unwrap();

    // Both tasks resolve to the same stem, and the stem to the same handle.
    let stem = Task::InfluentClassification.artifact_stem();
    assert_eq!(stem, Task::InfluentPrediction.artifact_stem());
    let a = registry.get(stem).unwrap();
    let b = registry.get(stem).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn artifact_feature_keys_expose_the_influent_order_conflict() {
    // The deployed artifact lists its training columns in the order of the
    // first influent form. Cross-checked against the second form the swap
    // shows up; the check reports it and leaves resolution to the model
    // owner.
    let keys: Vec<String> = Task::InfluentClassification
        .schema()
        .keys()
        .map(String::from)
        .collect();
    let artifact = ClassifierArtifact::new(
        ArtifactMetadata::new("CatBoost_model_inf", "1.0.0").with_feature_keys(keys),
        ModelSpec::Oblivious(constant_model(13, 1.0)),
    )
    .unwrap();

    assert!(artifact
        .metadata
        .mismatched_keys(Task::InfluentClassification.schema())
        .is_empty());

    let mismatches = artifact
        .metadata
        .mismatched_keys(Task::InfluentPrediction.schema());
    // Exactly the reordered middle of the form disagrees; the forms agree on
    // year/month at the front and tds/toc/tss/ph at the back.
    let positions: Vec<usize> = mismatches.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![2, 4, 5, 6, 7, 8]);
    // Same key set, shuffled: every mismatch pairs two real keys.
    for mismatch in &mismatches {
        assert!(mismatch.artifact_key.is_some());
        assert!(mismatch.schema_key.is_some());
    }
    // The first disagreement is the flow/discharge swap at position 2.
    assert_eq!(mismatches[0].artifact_key.as_deref(), Some("discharge_volume"));
    assert_eq!(mismatches[0].schema_key.as_deref(), Some("flow"));
}

#[test]
fn artifacts_round_trip_through_disk_into_the_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AdaBoost_model_BIO_web.json");
    let stump = single_stump(39, 0, 0.0, StumpDirection::Below, 0.5);
    let art = artifact("AdaBoost_model_BIO_web", ModelSpec::Stump(stump));
    fs::write(&path, art.to_json().unwrap()).unwrap();

    let registry = ClassifierRegistry::new();
    registry.register_file(&path).unwrap();

    let handle = registry.get("AdaBoost_model_BIO_web").unwrap();
    assert_eq!(handle.feature_count(), 39);
    assert_eq!(handle.name(), "stump_ensemble");

    let metadata = registry.metadata("AdaBoost_model_BIO_web").unwrap();
    assert_eq!(metadata.version, "1.0.0");
}

#[test]
fn corrupt_artifacts_are_format_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_classifier(&path), Err(ModelError::Format(_))));

    let missing = dir.path().join("absent.json");
    assert!(matches!(load_classifier(&missing), Err(ModelError::Io { .. })));
}

#[test]
fn a_deployment_loads_every_artifact_once_and_serves_all_tasks() {
    let registry = ClassifierRegistry::new();
    let entries = vec![
        (
            "CatBoost_model_inf",
            ModelSpec::Oblivious(constant_model(13, -1.0)),
        ),
        (
            "CatBoost_model_eff",
            ModelSpec::Oblivious(constant_model(25, -1.0)),
        ),
        (
            "CatBoost_model_bio",
            ModelSpec::Oblivious(constant_model(24, -1.0)),
        ),
        (
            "CatBoost_model_eff_web",
            ModelSpec::Oblivious(constant_model(39, -1.0)),
        ),
        (
            "AdaBoost_model_BIO_web",
            ModelSpec::Stump(single_stump(39, 0, 0.0, StumpDirection::Above, 1.0)),
        ),
    ];
    for (name, spec) in entries {
        registry.register(artifact(name, spec)).unwrap();
    }
    assert_eq!(registry.len(), 5);

    // Six tasks, five artifacts: the influent pair shares one entry.
    for task in Task::ALL {
        let classifier = registry.get(task.artifact_stem()).unwrap();
        let session = ScreeningSession::new(task, classifier);
        let outcome = session.submit(&submission(&[])).unwrap();
        assert!(outcome.is_prediction(), "{task} must classify its defaults");
    }
}
