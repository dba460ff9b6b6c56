//! Screening sessions: the full submit-and-classify pipeline for one task.
//!
//! A [`ScreeningSession`] binds a screening task to an injected classifier
//! handle and processes raw form submissions end to end: batch validation,
//! then classification, then the task's outcome message. Each submission is
//! independent; the session holds no input state between calls, so a
//! presenter can re-submit the same held field values any number of times.
//!
//! Validation failures are an ordinary outcome a presenter renders next to
//! the offending fields. Classifier failures are not: they mean the deployed
//! schema/artifact pair disagrees, and they surface as hard errors.
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use pfas_model::ObliviousEnsemble;
//! use pfas_schema::Task;
//! use pfas_screen::{ScreeningSession, SubmissionOutcome};
//!
//! let classifier = Arc::new(ObliviousEnsemble::new(13, -1.0, vec![]).unwrap());
//! let session = ScreeningSession::new(Task::InfluentClassification, classifier);
//!
//! // An untouched form submits its defaults and always validates.
//! match session.submit(&HashMap::new()).unwrap() {
//!     SubmissionOutcome::Prediction(assessment) => {
//!         assert!(assessment.message.contains("lower than 70"));
//!     }
//!     SubmissionOutcome::Invalid(_) => unreachable!(),
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use pfas_model::{Classifier, ClassifierError, PredictionService, RiskAssessment};
use pfas_schema::{FormSchema, Task};
use pfas_validate::{validate, ValidationErrors};

/// What one submission produced.
///
/// Both variants are normal results; only classifier trouble escapes as an
/// error from [`ScreeningSession::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Every field validated and the classifier answered.
    Prediction(RiskAssessment),
    /// At least one field failed; the classifier was never invoked.
    Invalid(ValidationErrors),
}

impl SubmissionOutcome {
    pub fn is_prediction(&self) -> bool {
        matches!(self, SubmissionOutcome::Prediction(_))
    }
}

/// One task wired to one classifier handle.
pub struct ScreeningSession {
    task: Task,
    service: PredictionService,
}

impl ScreeningSession {
    /// Bind a task to an explicitly injected handle.
    ///
    /// The handle is typically resolved from a
    /// [`ClassifierRegistry`](pfas_model::ClassifierRegistry) at startup and
    /// shared read-only between sessions.
    pub fn new(task: Task, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            task,
            service: PredictionService::for_task(task, classifier),
        }
    }

    pub fn task(&self) -> Task {
        self.task
    }

    /// The form this session validates submissions against.
    pub fn schema(&self) -> &'static FormSchema {
        self.task.schema()
    }

    /// Process one submission: validate every field, then classify.
    ///
    /// Missing keys fall back to the form's defaults, so an empty map is the
    /// untouched form. All-or-nothing: the classifier only ever sees a
    /// vector covering every field.
    pub fn submit(
        &self,
        raw: &HashMap<String, String>,
    ) -> Result<SubmissionOutcome, ClassifierError> {
        match validate(self.task.schema(), raw) {
            Ok(vector) => Ok(SubmissionOutcome::Prediction(self.service.predict(&vector)?)),
            Err(errors) => Ok(SubmissionOutcome::Invalid(errors)),
        }
    }
}

/// One failed field, rendered for machine output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub key: String,
    pub error: String,
}

/// A serializable account of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreeningReport {
    pub task: String,
    pub ok: bool,
    /// The outcome message; absent when validation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Empty on success.
    pub failures: Vec<FailureReport>,
}

impl ScreeningReport {
    pub fn new(task: Task, outcome: &SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Prediction(assessment) => Self {
                task: task.id().to_string(),
                ok: true,
                message: Some(assessment.message.to_string()),
                failures: Vec::new(),
            },
            SubmissionOutcome::Invalid(errors) => Self {
                task: task.id().to_string(),
                ok: false,
                message: None,
                failures: errors
                    .failures()
                    .iter()
                    .map(|f| FailureReport {
                        key: f.key.clone(),
                        error: f.violation.to_string(),
                    })
                    .collect(),
            },
        }
    }
}
