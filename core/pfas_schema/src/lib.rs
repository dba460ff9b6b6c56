//! Schema definitions for PFAS risk screening at wastewater treatment plants.
//!
//! This crate defines the data side of the screening pipeline: field and form
//! schemas, the feature vectors a validated submission turns into, and the
//! builtin catalog of screening tasks with their exact field orders, default
//! values, and outcome messages.
//!
//! Field order is the contract everything else hangs off: position `i` of a
//! feature vector always corresponds to `fields()[i]` of the schema the input
//! was validated against, and the downstream classifier was trained against
//! that same order.
//!
//! ```
//! use pfas_schema::Task;
//!
//! let schema = Task::InfluentClassification.schema();
//! assert_eq!(schema.len(), 13);
//! assert_eq!(schema.fields()[0].key(), "year");
//! assert_eq!(schema.position("ph"), Some(12));
//! ```

pub mod field;
pub mod form;
pub mod task;
pub mod vector;

pub use field::{FieldKind, FieldSchema, FieldViolation};
pub use form::{FormSchema, SchemaError};
pub use task::{OutcomeLabels, Task};
pub use vector::FeatureVector;
