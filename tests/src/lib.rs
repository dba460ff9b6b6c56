//! Shared fixtures for the pipeline tests.
//!
//! Tiny hand-built models with known decision boundaries, plus instrumented
//! classifiers for asserting what does and does not reach the model.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pfas_model::{
    ArtifactMetadata, BinaryLabel, Classifier, ClassifierArtifact, ClassifierError, DecisionStump,
    ModelSpec, ObliviousEnsemble, ObliviousSplit, ObliviousTree, StumpDirection, StumpEnsemble,
};
use pfas_schema::FeatureVector;

/// Build a submission map from key/value pairs.
pub fn submission(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// An ensemble with no trees: the sign of `bias` decides every input.
pub fn constant_model(feature_count: usize, bias: f64) -> ObliviousEnsemble {
    ObliviousEnsemble::new(feature_count, bias, vec![]).expect("fixture model is well formed")
}

/// [`constant_model`] behind the classifier seam.
pub fn bias_only(feature_count: usize, bias: f64) -> Arc<dyn Classifier> {
    Arc::new(constant_model(feature_count, bias))
}

/// A single depth-1 tree splitting on one feature: `leaf_above` scores when
/// `x[feature] > threshold`, `leaf_below` otherwise.
pub fn single_split(
    feature_count: usize,
    feature: usize,
    threshold: f64,
    leaf_below: f64,
    leaf_above: f64,
) -> Arc<dyn Classifier> {
    let tree = ObliviousTree {
        splits: vec![ObliviousSplit { feature, threshold }],
        leaves: vec![leaf_below, leaf_above],
    };
    Arc::new(
        ObliviousEnsemble::new(feature_count, 0.0, vec![tree])
            .expect("fixture model is well formed"),
    )
}

/// A one-stump voter.
pub fn single_stump(
    feature_count: usize,
    feature: usize,
    threshold: f64,
    direction: StumpDirection,
    weight: f64,
) -> StumpEnsemble {
    StumpEnsemble::new(
        feature_count,
        vec![DecisionStump {
            feature,
            threshold,
            direction,
            weight,
        }],
    )
    .expect("fixture model is well formed")
}

/// Wrap a model spec in an artifact named like a deployed one.
pub fn artifact(name: &str, model: ModelSpec) -> ClassifierArtifact {
    ClassifierArtifact::new(ArtifactMetadata::new(name, "1.0.0"), model)
        .expect("fixture artifact is well formed")
}

/// Counts predict calls. Lets a test prove that an invalid submission never
/// reached the model.
#[derive(Debug)]
pub struct CountingClassifier {
    feature_count: usize,
    label: BinaryLabel,
    calls: AtomicUsize,
}

impl CountingClassifier {
    pub fn new(feature_count: usize, label: BinaryLabel) -> Self {
        Self {
            feature_count,
            label,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for CountingClassifier {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn predict(&self, _features: &FeatureVector) -> Result<BinaryLabel, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label)
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Fails every prediction; exercises the hard-error path.
#[derive(Debug)]
pub struct FailingClassifier {
    pub feature_count: usize,
}

impl Classifier for FailingClassifier {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn predict(&self, _features: &FeatureVector) -> Result<BinaryLabel, ClassifierError> {
        Err(ClassifierError::Failed("induced backend failure".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
