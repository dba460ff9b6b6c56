//! The classifier seam: binary labels and the opaque predict trait.

use pfas_schema::FeatureVector;
use thiserror::Error;

/// Errors surfaced by a classifier.
///
/// These are fatal to the submission being processed. They are never folded
/// into per-field validation failures; a vector that reaches a classifier
/// has already validated, so anything going wrong here is a deployment
/// defect (most commonly a schema/model dimensionality disagreement).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("feature vector length {actual} does not match the model's {expected} inputs")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("inference failed: {0}")]
    Failed(String),
}

/// A binary class label. Class 0 is `Negative`, class 1 is `Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryLabel {
    Negative,
    Positive,
}

impl BinaryLabel {
    pub fn is_positive(self) -> bool {
        self == BinaryLabel::Positive
    }

    /// The raw class index (0 or 1).
    pub fn as_u8(self) -> u8 {
        match self {
            BinaryLabel::Negative => 0,
            BinaryLabel::Positive => 1,
        }
    }
}

impl From<bool> for BinaryLabel {
    fn from(positive: bool) -> Self {
        if positive {
            BinaryLabel::Positive
        } else {
            BinaryLabel::Negative
        }
    }
}

/// An opaque trained classifier.
///
/// Implementations are read-only after construction and shareable across
/// threads; a handle loaded once at startup serves every session. Nothing
/// beyond the label is surfaced, neither scores nor probabilities.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// The number of features the model was trained on.
    fn feature_count(&self) -> usize;

    /// Classify one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<BinaryLabel, ClassifierError>;

    /// Backend family identifier, for logs and error messages.
    fn name(&self) -> &str;
}

/// Shared length check for backends.
pub(crate) fn check_dimensions(expected: usize, actual: usize) -> Result<(), ClassifierError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ClassifierError::DimensionMismatch { expected, actual })
    }
}
