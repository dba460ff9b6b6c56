//! Errors for artifact handling and the registry.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, validating, or looking up models.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid artifact: {0}")]
    Format(String),
    #[error("model not found: {0}")]
    NotFound(String),
    #[error("model already registered: {0}")]
    AlreadyRegistered(String),
}
