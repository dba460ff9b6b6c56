//! Weighted decision-stump ensembles.
//!
//! The inference side of an AdaBoost-style model: each stump compares one
//! feature against one threshold and casts a weighted ±1 vote, and the sign
//! of the vote total decides the class.

use serde::{Deserialize, Serialize};

use pfas_schema::FeatureVector;

use crate::classifier::{check_dimensions, BinaryLabel, Classifier, ClassifierError};
use crate::error::ModelError;

/// Which side of the threshold a stump counts as the positive class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StumpDirection {
    /// Votes positive when `x[feature] > threshold`.
    Above,
    /// Votes positive when `x[feature] <= threshold`.
    Below,
}

/// One weak learner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionStump {
    pub feature: usize,
    pub threshold: f64,
    pub direction: StumpDirection,
    /// The learner's say in the vote, `alpha` in boosting terms.
    pub weight: f64,
}

impl DecisionStump {
    fn vote(&self, x: &[f64]) -> f64 {
        let above = x[self.feature] > self.threshold;
        let positive = match self.direction {
            StumpDirection::Above => above,
            StumpDirection::Below => !above,
        };
        if positive {
            self.weight
        } else {
            -self.weight
        }
    }
}

/// A weighted vote over decision stumps.
///
/// The score is the sum of every stump's vote; strictly above zero labels
/// `Positive`. A NaN feature value compares false against any threshold, so
/// it lands on whichever side `!(x > threshold)` selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StumpEnsemble {
    feature_count: usize,
    stumps: Vec<DecisionStump>,
}

impl StumpEnsemble {
    /// Build and structurally validate an ensemble.
    pub fn new(feature_count: usize, stumps: Vec<DecisionStump>) -> Result<Self, ModelError> {
        let ensemble = Self {
            feature_count,
            stumps,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.feature_count == 0 {
            return Err(ModelError::Format("feature_count must be positive".into()));
        }
        for (i, stump) in self.stumps.iter().enumerate() {
            if stump.feature >= self.feature_count {
                return Err(ModelError::Format(format!(
                    "stump {i} votes on feature {} but the model has {} inputs",
                    stump.feature, self.feature_count
                )));
            }
            if !stump.threshold.is_finite() {
                return Err(ModelError::Format(format!(
                    "stump {i} has a non-finite threshold"
                )));
            }
            if !stump.weight.is_finite() {
                return Err(ModelError::Format(format!(
                    "stump {i} has a non-finite weight"
                )));
            }
        }
        Ok(())
    }

    fn score(&self, x: &[f64]) -> f64 {
        self.stumps.iter().map(|stump| stump.vote(x)).sum()
    }
}

impl Classifier for StumpEnsemble {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn predict(&self, features: &FeatureVector) -> Result<BinaryLabel, ClassifierError> {
        check_dimensions(self.feature_count, features.len())?;
        Ok(BinaryLabel::from(self.score(features.as_slice()) > 0.0))
    }

    fn name(&self) -> &str {
        "stump_ensemble"
    }
}
