//! Thread-safe classifier registry.
//!
//! A deployment loads every artifact once at startup and resolves tasks to
//! handles by artifact name. Handles are `Arc`s over read-only models, so a
//! single registered entry can serve any number of concurrent sessions; both
//! influent tasks resolving `CatBoost_model_inf` to the same entry mirrors
//! the deployed two-forms-one-model setup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::artifact::{load_classifier, ArtifactMetadata, ClassifierArtifact};
use crate::classifier::Classifier;
use crate::error::ModelError;

struct RegisteredModel {
    metadata: ArtifactMetadata,
    classifier: Arc<dyn Classifier>,
}

/// Registry of loaded classifiers, keyed by artifact name.
#[derive(Default)]
pub struct ClassifierRegistry {
    entries: RwLock<HashMap<String, RegisteredModel>>,
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an in-memory artifact under its metadata name.
    pub fn register(&self, artifact: ClassifierArtifact) -> Result<(), ModelError> {
        let mut entries = self.entries.write();
        let name = artifact.metadata.name.clone();
        if entries.contains_key(&name) {
            return Err(ModelError::AlreadyRegistered(name));
        }
        let (metadata, classifier) = artifact.into_parts();
        debug!(
            "registered model {} ({} inputs, backend {})",
            name,
            classifier.feature_count(),
            classifier.name()
        );
        entries.insert(
            name,
            RegisteredModel {
                metadata,
                classifier,
            },
        );
        Ok(())
    }

    /// Load an artifact file and register it.
    pub fn register_file(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let (metadata, classifier) = load_classifier(path)?;
        let mut entries = self.entries.write();
        let name = metadata.name.clone();
        if entries.contains_key(&name) {
            return Err(ModelError::AlreadyRegistered(name));
        }
        debug!("registered model {name} from file");
        entries.insert(
            name,
            RegisteredModel {
                metadata,
                classifier,
            },
        );
        Ok(())
    }

    /// The shared handle for a registered artifact.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Classifier>, ModelError> {
        self.entries
            .read()
            .get(name)
            .map(|entry| Arc::clone(&entry.classifier))
            .ok_or_else(|| ModelError::NotFound(name.to_string()))
    }

    /// The stored metadata for a registered artifact.
    pub fn metadata(&self, name: &str) -> Result<ArtifactMetadata, ModelError> {
        self.entries
            .read()
            .get(name)
            .map(|entry| entry.metadata.clone())
            .ok_or_else(|| ModelError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Registered artifact names, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
