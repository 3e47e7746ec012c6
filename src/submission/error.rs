//! Submission error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A problem the backend reported against one submitted field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Errors that can occur while submitting an application
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SubmissionError {
    /// The draft has not reached a passable submit step
    #[error("Application is not ready to submit: {reason}")]
    NotReady { reason: String },

    /// The backend rejected one or more fields
    #[error("Application was rejected: {}", join_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// Network failure or unexpected server response
    #[error("Submission failed: {0}")]
    Failed(String),
}

impl SubmissionError {
    /// Single line suitable for showing to the applicant.
    ///
    /// Structured failures are flattened to `field: message; ...`; the
    /// list itself stays available through [`SubmissionError::field_errors`].
    pub fn display_message(&self) -> String {
        match self {
            Self::NotReady { reason } => reason.clone(),
            Self::Validation { errors } => join_field_errors(errors),
            Self::Failed(message) => message.clone(),
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors } => errors,
            _ => &[],
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
