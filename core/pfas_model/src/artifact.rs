//! Serialized classifier artifacts.
//!
//! A trained model ships as one JSON file: metadata (name, version, creation
//! stamp, optionally the training-order feature keys) plus the model itself,
//! tagged by backend family. Artifacts are loaded once at startup and never
//! written back; this module only authors JSON so deployments and tests can
//! produce fixture files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use pfas_schema::FormSchema;

use crate::backends::{ObliviousEnsemble, StumpEnsemble};
use crate::classifier::Classifier;
use crate::error::ModelError;

/// Identity and provenance of a trained artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// The registry name, conventionally the training-file stem
    /// (`CatBoost_model_inf` and friends).
    pub name: String,
    pub version: String,
    /// RFC 3339 creation stamp.
    pub created_at: String,
    /// The field keys the model was trained on, in training order. Optional;
    /// when present it enables [`mismatched_keys`](Self::mismatched_keys).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_keys: Option<Vec<String>>,
}

impl ArtifactMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            feature_keys: None,
        }
    }

    pub fn with_feature_keys(mut self, keys: Vec<String>) -> Self {
        self.feature_keys = Some(keys);
        self
    }

    /// Positions where the artifact's training-order keys disagree with a
    /// schema's field order.
    ///
    /// Empty when the artifact carries no key list or the orders agree. A
    /// non-empty result means the schema would feed the model a correctly
    /// sized but wrongly ordered vector, which corrupts predictions without
    /// any runtime error; surfacing it is the deployment's job, typically as
    /// a warning at load time.
    pub fn mismatched_keys(&self, schema: &FormSchema) -> Vec<KeyMismatch> {
        let Some(keys) = &self.feature_keys else {
            return Vec::new();
        };
        let mut mismatches = Vec::new();
        for position in 0..keys.len().max(schema.len()) {
            let artifact_key = keys.get(position).map(String::as_str);
            let schema_key = schema.fields().get(position).map(|f| f.key());
            if artifact_key != schema_key {
                mismatches.push(KeyMismatch {
                    position,
                    artifact_key: artifact_key.map(str::to_string),
                    schema_key: schema_key.map(str::to_string),
                });
            }
        }
        mismatches
    }
}

/// One position where an artifact's training keys and a schema disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMismatch {
    pub position: usize,
    /// `None` when the artifact lists fewer keys than the schema has fields.
    pub artifact_key: Option<String>,
    /// `None` when the schema has fewer fields than the artifact lists.
    pub schema_key: Option<String>,
}

impl std::fmt::Display for KeyMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "position {}: model trained on {:?}, schema supplies {:?}",
            self.position,
            self.artifact_key.as_deref().unwrap_or("<nothing>"),
            self.schema_key.as_deref().unwrap_or("<nothing>")
        )
    }
}

/// The model payload, tagged by backend family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ModelSpec {
    Oblivious(ObliviousEnsemble),
    Stump(StumpEnsemble),
}

impl ModelSpec {
    pub fn feature_count(&self) -> usize {
        match self {
            ModelSpec::Oblivious(model) => model.feature_count(),
            ModelSpec::Stump(model) => model.feature_count(),
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelSpec::Oblivious(model) => model.validate(),
            ModelSpec::Stump(model) => model.validate(),
        }
    }

    /// Box the payload behind the classifier seam.
    pub fn into_classifier(self) -> Arc<dyn Classifier> {
        match self {
            ModelSpec::Oblivious(model) => Arc::new(model),
            ModelSpec::Stump(model) => Arc::new(model),
        }
    }
}

/// A complete artifact file: metadata plus model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub metadata: ArtifactMetadata,
    pub model: ModelSpec,
}

impl ClassifierArtifact {
    pub fn new(metadata: ArtifactMetadata, model: ModelSpec) -> Result<Self, ModelError> {
        let artifact = Self { metadata, model };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Structural consistency of the whole artifact.
    fn validate(&self) -> Result<(), ModelError> {
        self.model.validate()?;
        if let Some(keys) = &self.metadata.feature_keys {
            if keys.len() != self.model.feature_count() {
                return Err(ModelError::Format(format!(
                    "metadata lists {} feature keys but the model has {} inputs",
                    keys.len(),
                    self.model.feature_count()
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate an artifact from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: Self =
            serde_json::from_str(text).map_err(|e| ModelError::Format(e.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string_pretty(self).map_err(|e| ModelError::Format(e.to_string()))
    }

    /// Split into the metadata and a shareable classifier handle.
    pub fn into_parts(self) -> (ArtifactMetadata, Arc<dyn Classifier>) {
        (self.metadata, self.model.into_classifier())
    }
}

/// Load an artifact file and box its model.
///
/// This is the one-time startup I/O of a deployment; the returned handle is
/// immutable and safe to share across sessions for the life of the process.
pub fn load_classifier(
    path: impl AsRef<Path>,
) -> Result<(ArtifactMetadata, Arc<dyn Classifier>), ModelError> {
    let path = path.as_ref();
    debug!("loading classifier artifact from {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact = ClassifierArtifact::from_json(&text)?;
    info!(
        "loaded model {} v{} ({} inputs)",
        artifact.metadata.name,
        artifact.metadata.version,
        artifact.model.feature_count()
    );
    Ok(artifact.into_parts())
}
