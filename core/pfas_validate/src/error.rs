//! Failure records for batch validation.

use std::fmt;

use pfas_schema::FieldViolation;
use thiserror::Error;

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{key}: {violation}")]
pub struct FieldFailure {
    /// The schema key of the offending field.
    pub key: String,
    pub violation: FieldViolation,
}

/// Every failure of one submission, in schema order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    failures: Vec<FieldFailure>,
}

impl ValidationErrors {
    pub(crate) fn new(failures: Vec<FieldFailure>) -> Self {
        debug_assert!(!failures.is_empty());
        Self { failures }
    }

    /// The failures, ordered by the schema's field order.
    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    /// The offending keys, in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.key.as_str())
    }

    pub fn into_failures(self) -> Vec<FieldFailure> {
        self.failures
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The following inputs are invalid: ")?;
        for (i, key) in self.keys().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            f.write_str(key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
