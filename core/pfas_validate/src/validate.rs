//! The batch validator.

use std::collections::HashMap;

use pfas_schema::{FeatureVector, FormSchema};

use crate::error::{FieldFailure, ValidationErrors};

/// Validate one raw submission against a schema.
///
/// Walks every field in schema order. A missing key falls back to the
/// field's default; a present-but-empty string does not (it fails the
/// numeric parse like any other non-number). Nothing short-circuits: all
/// failures are collected before the outcome is decided, so the `Err` side
/// carries every offending field in schema order, and the `Ok` side is a
/// vector whose position `i` is the parsed value of field `i`. There are no
/// partial vectors.
///
/// Keys in `raw` that the schema does not name are ignored; whether to
/// reject them is a presenter decision.
pub fn validate(
    schema: &FormSchema,
    raw: &HashMap<String, String>,
) -> Result<FeatureVector, ValidationErrors> {
    let mut values = Vec::with_capacity(schema.len());
    let mut failures = Vec::new();

    for field in schema.fields() {
        let supplied = raw
            .get(field.key())
            .map(String::as_str)
            .unwrap_or(field.default_raw());
        match field.kind().check(supplied) {
            Ok(value) => values.push(value),
            Err(violation) => failures.push(FieldFailure {
                key: field.key().to_string(),
                violation,
            }),
        }
    }

    if failures.is_empty() {
        Ok(FeatureVector::new(values))
    } else {
        Err(ValidationErrors::new(failures))
    }
}
