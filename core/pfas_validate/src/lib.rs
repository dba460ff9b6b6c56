//! Batch validation of raw form submissions into feature vectors.
//!
//! The validator never fails fast: every field of the schema is checked and
//! every failure reported together, so a presenter can mark all offending
//! inputs in one pass. The result is all-or-nothing: either a feature
//! vector covering every field, or the complete failure list.
//!
//! ```
//! use pfas_schema::Task;
//! use pfas_validate::validate;
//! use std::collections::HashMap;
//!
//! let schema = Task::InfluentClassification.schema();
//! let mut raw: HashMap<String, String> = HashMap::new();
//! raw.insert("ph".into(), "9.2".into());
//!
//! // Missing keys fall back to the form's defaults.
//! let vector = validate(schema, &raw).unwrap();
//! assert_eq!(vector.len(), 13);
//! assert_eq!(vector[12], 9.2);
//! ```

pub mod error;
pub mod validate;

pub use error::{FieldFailure, ValidationErrors};
pub use validate::validate;

// The per-field violation kinds originate in the schema crate.
pub use pfas_schema::FieldViolation;
