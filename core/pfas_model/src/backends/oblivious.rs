//! Symmetric (oblivious) decision-tree ensembles.
//!
//! This is the inference side of a CatBoost-style gradient-boosted model:
//! every level of a tree applies the same split to every path, so a tree of
//! depth `d` is a list of `d` splits plus `2^d` leaf values, and descending
//! it is a bit-indexing exercise rather than a pointer chase.

use serde::{Deserialize, Serialize};

use pfas_schema::FeatureVector;

use crate::classifier::{check_dimensions, BinaryLabel, Classifier, ClassifierError};
use crate::error::ModelError;

/// Trees deeper than this are rejected at load time.
pub const MAX_TREE_DEPTH: usize = 16;

/// One split, applied at every node of its tree level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObliviousSplit {
    /// Index into the feature vector.
    pub feature: usize,
    /// The decision boundary; the comparison is strict (`x > threshold`).
    pub threshold: f64,
}

/// One symmetric tree: `splits[level]` decides bit `level` of the leaf index.
///
/// A feature value of NaN compares false against every threshold and so
/// always follows the zero side, which is the convention gradient-boosting
/// trainers serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObliviousTree {
    pub splits: Vec<ObliviousSplit>,
    /// Exactly `2^splits.len()` values.
    pub leaves: Vec<f64>,
}

impl ObliviousTree {
    fn leaf_for(&self, x: &[f64]) -> f64 {
        let mut index = 0usize;
        for (level, split) in self.splits.iter().enumerate() {
            if x[split.feature] > split.threshold {
                index |= 1 << level;
            }
        }
        self.leaves[index]
    }
}

/// A boosted ensemble of oblivious trees.
///
/// The raw score is `bias` plus the selected leaf of every tree; a score
/// strictly above zero labels `Positive`. An ensemble without trees is
/// legal and classifies by its bias alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObliviousEnsemble {
    feature_count: usize,
    bias: f64,
    trees: Vec<ObliviousTree>,
}

impl ObliviousEnsemble {
    /// Build and structurally validate an ensemble.
    pub fn new(
        feature_count: usize,
        bias: f64,
        trees: Vec<ObliviousTree>,
    ) -> Result<Self, ModelError> {
        let ensemble = Self {
            feature_count,
            bias,
            trees,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    /// Structural checks, also run on deserialized artifacts (serde bypasses
    /// [`new`](Self::new)).
    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.feature_count == 0 {
            return Err(ModelError::Format("feature_count must be positive".into()));
        }
        if !self.bias.is_finite() {
            return Err(ModelError::Format("bias must be finite".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            let depth = tree.splits.len();
            if depth > MAX_TREE_DEPTH {
                return Err(ModelError::Format(format!(
                    "tree {i} has depth {depth}, the maximum is {MAX_TREE_DEPTH}"
                )));
            }
            if tree.leaves.len() != 1 << depth {
                return Err(ModelError::Format(format!(
                    "tree {i} has {} leaves for depth {depth}, expected {}",
                    tree.leaves.len(),
                    1usize << depth
                )));
            }
            for split in &tree.splits {
                if split.feature >= self.feature_count {
                    return Err(ModelError::Format(format!(
                        "tree {i} splits on feature {} but the model has {} inputs",
                        split.feature, self.feature_count
                    )));
                }
                if !split.threshold.is_finite() {
                    return Err(ModelError::Format(format!(
                        "tree {i} has a non-finite threshold"
                    )));
                }
            }
            if tree.leaves.iter().any(|leaf| !leaf.is_finite()) {
                return Err(ModelError::Format(format!(
                    "tree {i} has a non-finite leaf value"
                )));
            }
        }
        Ok(())
    }

    /// The raw ensemble score for one vector. Length is the caller's problem;
    /// [`predict`](Classifier::predict) checks it first.
    fn score(&self, x: &[f64]) -> f64 {
        self.trees
            .iter()
            .fold(self.bias, |acc, tree| acc + tree.leaf_for(x))
    }
}

impl Classifier for ObliviousEnsemble {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn predict(&self, features: &FeatureVector) -> Result<BinaryLabel, ClassifierError> {
        check_dimensions(self.feature_count, features.len())?;
        Ok(BinaryLabel::from(self.score(features.as_slice()) > 0.0))
    }

    fn name(&self) -> &str {
        "oblivious_ensemble"
    }
}
