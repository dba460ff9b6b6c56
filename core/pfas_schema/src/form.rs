//! Ordered, immutable form schemas.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::field::FieldSchema;

/// Construction-time schema defects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("duplicate field key: {key}")]
    DuplicateKey { key: String },
    #[error("default {value:?} for field {key} does not satisfy the field's own kind")]
    InvalidDefault { key: String, value: String },
}

/// A named, ordered list of fields.
///
/// Order is load-bearing: position `i` of a feature vector validated against
/// this schema always holds the parsed value of `fields()[i]`, and the
/// classifier the vector is handed to was trained on that same order. The
/// struct is immutable once constructed; there are no mutators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FormSchema {
    name: String,
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Build a schema.
    ///
    /// Rejects duplicate keys and any field whose `default_raw` fails the
    /// field's own predicate, so a submission of pure defaults is always
    /// valid.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Result<Self, SchemaError> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|prior| prior.key() == field.key()) {
                return Err(SchemaError::DuplicateKey {
                    key: field.key().to_string(),
                });
            }
            if field.kind().check(field.default_raw()).is_err() {
                return Err(SchemaError::InvalidDefault {
                    key: field.key().to_string(),
                    value: field.default_raw().to_string(),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key() == key)
    }

    /// The feature-vector position of a key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key() == key)
    }

    /// Whether `key` names a field of this schema.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// The field keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSchema::key)
    }
}
