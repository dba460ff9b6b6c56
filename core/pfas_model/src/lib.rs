//! Classifier artifacts, inference backends, and the prediction service for
//! PFAS screening.
//!
//! The crate covers the model side of the pipeline: the opaque
//! [`Classifier`] seam a validated feature vector is handed to, JSON
//! artifacts with inference-only ensemble backends behind it, a registry for
//! the load-once-at-startup lifecycle, and the [`PredictionService`] that
//! turns a binary label into a task's outcome message. Training happens
//! elsewhere; nothing here fits, scores, or mutates a model.

pub mod artifact;
pub mod backends;
pub mod classifier;
pub mod error;
pub mod registry;
pub mod service;

pub use artifact::{load_classifier, ArtifactMetadata, ClassifierArtifact, KeyMismatch, ModelSpec};
pub use backends::{
    DecisionStump, ObliviousEnsemble, ObliviousSplit, ObliviousTree, StumpDirection, StumpEnsemble,
};
pub use classifier::{BinaryLabel, Classifier, ClassifierError};
pub use error::ModelError;
pub use registry::ClassifierRegistry;
pub use service::{PredictionService, RiskAssessment};
