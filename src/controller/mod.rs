//! Search-submission controller.
//!
//! [`SearchController`] owns every piece of mutable state behind the search page: the selected
//! document, the query, the result limit, the submission status, the current result set, the
//! full-text inspection and the two error slots. All transitions go through its methods.
//!
//! A submission is split in three steps so the caller stays free to handle other input while a
//! request is outstanding:
//!
//! 1. [`SearchController::begin_submission`] checks preconditions, flips the status to
//!    [`SubmissionStatus::InFlight`], clears the submission error and the stale results, and hands
//!    back a [`SubmissionTicket`] carrying the request.
//! 2. [`SubmissionTicket::dispatch`] issues exactly one call to a [`SearchBackend`].
//! 3. [`SearchController::resolve`] stores the outcome and always leaves the in-flight state.
//!
//! [`SearchController::submit`] runs all three and resolves the submission even when its future is
//! dropped before the backend answers.

mod state;

pub use state::{
    FILE_REJECTED_MESSAGE, Inspection, REJECTED_FALLBACK_MESSAGE, SubmissionError,
    SubmissionOutcome, SubmissionStatus, UNEXPECTED_FAILURE_MESSAGE,
};

use crate::backend::{SearchBackend, SearchRequest, SearchResult};
use crate::config::DEFAULT_TOP_N;
use crate::document::CandidateFile;
use thiserror::Error;

/// Label shown in the drop zone while no document is selected.
pub const NO_FILE_LABEL: &str = "Add a PDF file";

/// Reasons a submission was refused before anything changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    /// No accepted PDF is selected.
    #[error("select a PDF file before searching")]
    MissingFile,
    /// Query text is empty.
    #[error("enter a query before searching")]
    EmptyQuery,
    /// A previous submission has not resolved yet.
    #[error("a search is already in progress")]
    AlreadyInFlight,
}

/// A submission that has been started but not yet resolved.
#[must_use = "a ticket must be dispatched and resolved, or the controller stays in flight"]
#[derive(Debug)]
pub struct SubmissionTicket {
    id: u64,
    request: SearchRequest,
}

impl SubmissionTicket {
    /// Sequence number matched by [`SearchController::resolve`].
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Request that will be sent to the backend.
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Issue the single backend call for this submission.
    pub async fn dispatch<B>(&self, backend: &B) -> SubmissionOutcome
    where
        B: SearchBackend + ?Sized,
    {
        backend.search(&self.request).await.into()
    }
}

/// Owner of all search page state.
#[derive(Debug)]
pub struct SearchController {
    selected_file: Option<CandidateFile>,
    query: String,
    top_n: i64,
    status: SubmissionStatus,
    results: Vec<SearchResult>,
    inspection: Inspection,
    file_error: Option<&'static str>,
    submission_error: Option<SubmissionError>,
    last_submission: u64,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl SearchController {
    /// Create an idle controller with the given initial result limit.
    pub fn new(top_n: i64) -> Self {
        Self {
            selected_file: None,
            query: String::new(),
            top_n,
            status: SubmissionStatus::Idle,
            results: Vec::new(),
            inspection: Inspection::default(),
            file_error: None,
            submission_error: None,
            last_submission: 0,
        }
    }

    /// Offer files from a drop or picker. Only the first candidate is considered.
    ///
    /// Returns whether it was accepted. A rejection clears any previous selection.
    pub fn accept_dropped_files<I>(&mut self, candidates: I) -> bool
    where
        I: IntoIterator<Item = CandidateFile>,
    {
        match candidates.into_iter().next() {
            Some(file) if file.is_pdf() => {
                tracing::debug!(
                    name = %file.name,
                    size = file.bytes.len(),
                    "Accepted PDF"
                );
                self.selected_file = Some(file);
                self.file_error = None;
                true
            }
            candidate => {
                tracing::debug!(
                    media_type = ?candidate.as_ref().map(|file| file.media_type.as_str()),
                    "Rejected dropped file"
                );
                self.selected_file = None;
                self.file_error = Some(FILE_REJECTED_MESSAGE);
                false
            }
        }
    }

    /// Replace the query text.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Replace the result limit. The value is forwarded to the backend as-is.
    pub fn set_result_limit(&mut self, top_n: i64) {
        self.top_n = top_n;
    }

    /// Whether the search control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.check_preconditions().is_ok()
    }

    fn check_preconditions(&self) -> Result<&CandidateFile, SubmitRejected> {
        if self.status == SubmissionStatus::InFlight {
            return Err(SubmitRejected::AlreadyInFlight);
        }
        let file = self
            .selected_file
            .as_ref()
            .ok_or(SubmitRejected::MissingFile)?;
        if self.query.is_empty() {
            return Err(SubmitRejected::EmptyQuery);
        }
        Ok(file)
    }

    /// Start a submission.
    ///
    /// On success the controller is in flight with no submission error and an empty result set,
    /// all applied before the returned ticket can be dispatched. On error nothing changed.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, SubmitRejected> {
        let file = self.check_preconditions().inspect_err(|reason| {
            tracing::debug!(%reason, "Submission refused");
        })?;

        let request = SearchRequest {
            file_name: file.name.clone(),
            bytes: file.bytes.clone(),
            query: self.query.clone(),
            top_n: self.top_n,
        };
        tracing::debug!(
            document = %file.fingerprint(),
            query = %request.query,
            top_n = request.top_n,
            "Starting submission"
        );

        self.status = SubmissionStatus::InFlight;
        self.submission_error = None;
        self.results.clear();
        self.last_submission += 1;

        Ok(SubmissionTicket {
            id: self.last_submission,
            request,
        })
    }

    /// Apply the outcome of the submission identified by `ticket_id`.
    ///
    /// Outcomes for anything but the submission currently in flight are ignored.
    pub fn resolve(&mut self, ticket_id: u64, outcome: SubmissionOutcome) -> SubmissionStatus {
        if self.status != SubmissionStatus::InFlight || ticket_id != self.last_submission {
            tracing::warn!(
                ticket_id,
                current = self.last_submission,
                status = ?self.status,
                "Ignoring outcome of a submission that is not in flight"
            );
            return self.status;
        }

        match outcome {
            SubmissionOutcome::Succeeded(results) => {
                tracing::info!(results = results.len(), "Search completed");
                self.results = results;
                self.status = SubmissionStatus::Succeeded;
            }
            SubmissionOutcome::Failed(error) => {
                tracing::warn!(error = %error, "Search failed");
                self.submission_error = Some(error);
                self.status = SubmissionStatus::Failed;
            }
        }
        self.status
    }

    /// Run a whole submission against `backend`.
    pub async fn submit<B>(&mut self, backend: &B) -> Result<SubmissionStatus, SubmitRejected>
    where
        B: SearchBackend + ?Sized,
    {
        let ticket = self.begin_submission()?;
        let guard = InFlightGuard {
            controller: self,
            ticket_id: ticket.id(),
            resolved: false,
        };
        let outcome = ticket.dispatch(backend).await;
        Ok(guard.resolve(outcome))
    }

    /// Show the full content of the result at `index`.
    ///
    /// Returns `None` and leaves the inspection untouched when `index` is out of range.
    pub fn inspect_result(&mut self, index: usize) -> Option<&str> {
        let content = self.results.get(index)?.content.clone();
        self.inspection.content = Some(content);
        self.inspection.content()
    }

    /// Hide the full-text view.
    pub fn dismiss_inspection(&mut self) {
        self.inspection.content = None;
    }

    /// Currently selected document.
    pub fn selected_file(&self) -> Option<&CandidateFile> {
        self.selected_file.as_ref()
    }

    /// Text for the drop zone: the selected file's name or a prompt.
    pub fn file_label(&self) -> &str {
        self.selected_file
            .as_ref()
            .map_or(NO_FILE_LABEL, |file| file.name.as_str())
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current result limit.
    pub fn result_limit(&self) -> i64 {
        self.top_n
    }

    /// Current submission status.
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Whether a submission is awaiting its outcome.
    pub fn is_in_flight(&self) -> bool {
        self.status == SubmissionStatus::InFlight
    }

    /// Results of the last successful submission.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Full-text inspection state.
    pub fn inspection(&self) -> &Inspection {
        &self.inspection
    }

    /// File validation error, cleared only by accepting a PDF.
    pub fn file_error(&self) -> Option<&str> {
        self.file_error
    }

    /// Error from the last submission, cleared when the next one starts.
    pub fn submission_error(&self) -> Option<&SubmissionError> {
        self.submission_error.as_ref()
    }
}

/// Resolves the in-flight submission on every exit path of [`SearchController::submit`].
struct InFlightGuard<'a> {
    controller: &'a mut SearchController,
    ticket_id: u64,
    resolved: bool,
}

impl InFlightGuard<'_> {
    fn resolve(mut self, outcome: SubmissionOutcome) -> SubmissionStatus {
        self.resolved = true;
        self.controller.resolve(self.ticket_id, outcome)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.controller.resolve(
                self.ticket_id,
                SubmissionOutcome::Failed(SubmissionError::Unexpected),
            );
        }
    }
}
