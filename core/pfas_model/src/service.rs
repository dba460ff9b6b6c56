//! The prediction service: classifier output mapped to task messages.

use std::sync::Arc;

use pfas_schema::{FeatureVector, OutcomeLabels, Task};

use crate::classifier::{BinaryLabel, Classifier, ClassifierError};

/// A completed prediction: the raw label and the message a presenter shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub label: BinaryLabel,
    pub message: &'static str,
}

/// Runs a classifier handle and maps its binary output onto a task's
/// outcome messages.
///
/// The handle is injected at construction: the service never loads anything
/// itself and holds no other state, so one service per task plus one shared
/// handle is the whole per-session setup. Classifier errors pass through
/// untouched; by the time a vector reaches this point it has validated, so
/// a failure here is a deployment defect, not user input to recover from.
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
    labels: OutcomeLabels,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn Classifier>, labels: OutcomeLabels) -> Self {
        Self { classifier, labels }
    }

    /// A service wired with a task's own outcome messages.
    pub fn for_task(task: Task, classifier: Arc<dyn Classifier>) -> Self {
        Self::new(classifier, task.outcome_labels())
    }

    /// The number of inputs the underlying model expects.
    pub fn feature_count(&self) -> usize {
        self.classifier.feature_count()
    }

    /// Classify one validated vector.
    pub fn predict(&self, features: &FeatureVector) -> Result<RiskAssessment, ClassifierError> {
        let label = self.classifier.predict(features)?;
        let message = match label {
            BinaryLabel::Negative => self.labels.negative,
            BinaryLabel::Positive => self.labels.positive,
        };
        Ok(RiskAssessment { label, message })
    }
}
