//! View model derived from controller state, plus its plain-text rendering.

use crate::backend::SearchResult;
use crate::controller::SearchController;
use std::fmt;

/// Number of characters of a passage shown in the result list.
pub const PREVIEW_CHARS: usize = 100;

/// Placeholder shown when there is nothing to list.
pub const NO_RESULTS_MESSAGE: &str = "No results to display";

/// Text shown next to the busy indicator.
pub const BUSY_MESSAGE: &str = "Searching...";

const LOW_SCORE_THRESHOLD: f64 = 0.01;

/// Human readable similarity: `"Less than 1%"` below 0.01, otherwise a two-decimal percentage.
pub fn score_label(score: f64) -> String {
    if score < LOW_SCORE_THRESHOLD {
        "Less than 1%".to_string()
    } else {
        format!("{:.2}%", score * 100.0)
    }
}

/// First [`PREVIEW_CHARS`] characters of `content` followed by an ellipsis.
pub fn content_preview(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

/// One entry of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    /// Position in the result set, starting at zero.
    pub index: usize,
    /// Truncated passage.
    pub preview: String,
    /// Formatted similarity score.
    pub score: String,
}

impl ResultCard {
    fn from_result(index: usize, result: &SearchResult) -> Self {
        Self {
            index,
            preview: content_preview(&result.content),
            score: score_label(result.similarity_score),
        }
    }
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// A submission is in flight; results are suppressed.
    Busy,
    /// The last submission failed with this message.
    Failed(String),
    /// Nothing to show.
    Empty,
    /// Ranked passages.
    Results(Vec<ResultCard>),
}

/// Snapshot of everything the page displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Drop zone label.
    pub file_label: String,
    /// File validation error under the query bar.
    pub file_error: Option<String>,
    /// Whether the search control is enabled.
    pub can_submit: bool,
    /// Results area.
    pub results: ResultsView,
    /// Full text of the inspected result while visible.
    pub inspection: Option<String>,
}

impl PageView {
    /// Derive the view from the controller's current state.
    pub fn from_controller(controller: &SearchController) -> Self {
        let results = if controller.is_in_flight() {
            ResultsView::Busy
        } else if let Some(error) = controller.submission_error() {
            ResultsView::Failed(error.to_string())
        } else if controller.results().is_empty() {
            ResultsView::Empty
        } else {
            ResultsView::Results(
                controller
                    .results()
                    .iter()
                    .enumerate()
                    .map(|(index, result)| ResultCard::from_result(index, result))
                    .collect(),
            )
        };

        Self {
            file_label: controller.file_label().to_string(),
            file_error: controller.file_error().map(str::to_string),
            can_submit: controller.can_submit(),
            results,
            inspection: controller.inspection().content().map(str::to_string),
        }
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => writeln!(f, "{BUSY_MESSAGE}"),
            Self::Failed(message) => writeln!(f, "{message}"),
            Self::Empty => writeln!(f, "{NO_RESULTS_MESSAGE}"),
            Self::Results(cards) => {
                for card in cards {
                    writeln!(f, "[{}] {}", card.index + 1, card.preview)?;
                    writeln!(f, "    Similarity Score: {}", card.score)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PDF: {}", self.file_label)?;
        if let Some(error) = &self.file_error {
            writeln!(f, "{error}")?;
        }
        writeln!(f)?;
        writeln!(f, "Results")?;
        write!(f, "{}", self.results)?;
        if let Some(content) = &self.inspection {
            writeln!(f)?;
            writeln!(f, "{content}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{SubmissionError, SubmissionOutcome};
    use crate::document::{CandidateFile, PDF_MEDIA_TYPE};

    fn ready_controller() -> SearchController {
        let mut controller = SearchController::default();
        controller.accept_dropped_files([CandidateFile::new(
            "report.pdf",
            PDF_MEDIA_TYPE,
            b"%PDF".to_vec(),
        )]);
        controller.set_query_text("revenue");
        controller
    }

    #[test]
    fn score_labels() {
        assert_eq!(score_label(0.004), "Less than 1%");
        assert_eq!(score_label(0.2345), "23.45%");
        assert_eq!(score_label(0.01), "1.00%");
        assert_eq!(score_label(0.42), "42.00%");
        assert_eq!(score_label(1.0), "100.00%");
    }

    #[test]
    fn preview_truncates_to_prefix() {
        let content = "a".repeat(100) + &"b".repeat(150);
        let preview = content_preview(&content);
        assert_eq!(preview, format!("{}...", "a".repeat(100)));
    }

    #[test]
    fn preview_keeps_short_content_and_counts_characters() {
        assert_eq!(content_preview("short"), "short...");
        let accented = "é".repeat(120);
        assert_eq!(content_preview(&accented).chars().count(), 103);
    }

    #[test]
    fn empty_placeholder_before_any_search() {
        let view = PageView::from_controller(&SearchController::default());
        assert_eq!(view.results, ResultsView::Empty);
        assert_eq!(view.file_label, "Add a PDF file");
        assert!(!view.can_submit);
        assert!(view.to_string().contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn busy_suppresses_results() {
        let mut controller = ready_controller();
        let ticket = controller.begin_submission().expect("ticket");
        let view = PageView::from_controller(&controller);
        assert_eq!(view.results, ResultsView::Busy);
        assert!(!view.can_submit);
        controller.resolve(ticket.id(), SubmissionOutcome::Succeeded(Vec::new()));
    }

    #[test]
    fn failure_shows_message_instead_of_placeholder() {
        let mut controller = ready_controller();
        let ticket = controller.begin_submission().expect("ticket");
        controller.resolve(
            ticket.id(),
            SubmissionOutcome::Failed(SubmissionError::Rejected("index not ready".into())),
        );

        let view = PageView::from_controller(&controller);
        assert_eq!(view.results, ResultsView::Failed("index not ready".into()));
        let text = view.to_string();
        assert!(text.contains("index not ready"));
        assert!(!text.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn results_render_as_cards_with_inspection() {
        let mut controller = ready_controller();
        let ticket = controller.begin_submission().expect("ticket");
        controller.resolve(
            ticket.id(),
            SubmissionOutcome::Succeeded(vec![SearchResult {
                content: "Q3 revenue grew...".into(),
                similarity_score: 0.42,
            }]),
        );
        controller.inspect_result(0);

        let view = PageView::from_controller(&controller);
        let ResultsView::Results(cards) = &view.results else {
            panic!("expected results");
        };
        assert_eq!(cards[0].score, "42.00%");
        assert_eq!(view.inspection.as_deref(), Some("Q3 revenue grew..."));

        let text = view.to_string();
        assert!(text.contains("PDF: report.pdf"));
        assert!(text.contains("[1] Q3 revenue grew......"));
        assert!(text.contains("Similarity Score: 42.00%"));
    }

    #[test]
    fn file_error_is_rendered() {
        let mut controller = SearchController::default();
        controller.accept_dropped_files([CandidateFile::new("a.txt", "text/plain", Vec::new())]);
        let view = PageView::from_controller(&controller);
        assert_eq!(view.file_error.as_deref(), Some("Only PDF files are allowed."));
        assert!(view.to_string().contains("Only PDF files are allowed."));
    }
}
