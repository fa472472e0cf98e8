//! State records and outcome types owned by the search controller.

use crate::backend::{BackendError, SearchResult};
use thiserror::Error;

/// Message shown when a dropped file is not a PDF.
pub const FILE_REJECTED_MESSAGE: &str = "Only PDF files are allowed.";

/// Message shown when the service rejects a request without saying why.
pub const REJECTED_FALLBACK_MESSAGE: &str = "An error occurred while processing your request.";

/// Message shown when no structured error is available at all.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Lifecycle of the most recent submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Request issued, outcome pending.
    InFlight,
    /// Last submission produced a result set.
    Succeeded,
    /// Last submission ended in an error.
    Failed,
}

/// Why a submission failed, in the terms shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Service answered with a non-success status; carries its message or the fallback.
    #[error("{0}")]
    Rejected(String),
    /// Transport or decoding failure with nothing structured to show.
    #[error("An unexpected error occurred. Please try again.")]
    Unexpected,
}

/// Resolution of one dispatched submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Service returned a ranked result set.
    Succeeded(Vec<SearchResult>),
    /// Submission ended in an error.
    Failed(SubmissionError),
}

impl From<Result<Vec<SearchResult>, BackendError>> for SubmissionOutcome {
    fn from(result: Result<Vec<SearchResult>, BackendError>) -> Self {
        match result {
            Ok(results) => Self::Succeeded(results),
            Err(BackendError::Rejected { message, .. }) => Self::Failed(SubmissionError::Rejected(
                message.unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_string()),
            )),
            Err(_) => Self::Failed(SubmissionError::Unexpected),
        }
    }
}

/// Full-text view of a selected result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inspection {
    pub(crate) content: Option<String>,
}

impl Inspection {
    /// Content currently on display, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Whether the full-text view is showing.
    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }
}
