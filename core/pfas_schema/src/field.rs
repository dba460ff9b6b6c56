//! Field-level schema: numeric kinds and the single-value predicate.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Why a raw value failed a field's predicate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FieldViolation {
    #[error("not a valid number")]
    NotANumber,
    #[error("out of range [{min},{max}]")]
    OutOfRange { min: f64, max: f64 },
}

/// What values a field admits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum FieldKind {
    /// Any value `f64` parsing accepts.
    FreeNumeric,
    /// A numeric value constrained to `min..=max` inclusive.
    BoundedNumeric { min: f64, max: f64 },
}

impl FieldKind {
    /// Parse one raw string against this kind.
    ///
    /// Surrounding whitespace is ignored; the remainder must be a standard
    /// floating-point literal (the empty string is not one). Bounded kinds
    /// additionally require `min <= value <= max`, which `NaN` never
    /// satisfies.
    pub fn check(&self, raw: &str) -> Result<f64, FieldViolation> {
        let value: f64 = raw.trim().parse().map_err(|_| FieldViolation::NotANumber)?;
        match *self {
            FieldKind::FreeNumeric => Ok(value),
            FieldKind::BoundedNumeric { min, max } => {
                if value >= min && value <= max {
                    Ok(value)
                } else {
                    Err(FieldViolation::OutOfRange { min, max })
                }
            }
        }
    }

    /// The inclusive bounds, if this kind carries any.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            FieldKind::FreeNumeric => None,
            FieldKind::BoundedNumeric { min, max } => Some((min, max)),
        }
    }
}

/// A single named input in a form schema.
///
/// `key` is the stable identifier that names the field's feature-vector
/// position; `label` is the text a presenter shows next to the input widget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FieldSchema {
    key: String,
    label: String,
    default_raw: String,
    kind: FieldKind,
}

impl FieldSchema {
    /// An unbounded numeric field.
    pub fn free(
        key: impl Into<String>,
        label: impl Into<String>,
        default_raw: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            default_raw: default_raw.into(),
            kind: FieldKind::FreeNumeric,
        }
    }

    /// A numeric field constrained to `min..=max`.
    pub fn bounded(
        key: impl Into<String>,
        label: impl Into<String>,
        default_raw: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            default_raw: default_raw.into(),
            kind: FieldKind::BoundedNumeric { min, max },
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The raw string a presenter pre-populates the field with, and the value
    /// the validator falls back to when a submission omits the key.
    pub fn default_raw(&self) -> &str {
        &self.default_raw
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}
