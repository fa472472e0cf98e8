//! Wire types shared by search backends.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while talking to the search service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Endpoint failed to parse as an absolute URL.
    #[error("Invalid search endpoint: {0}")]
    InvalidEndpoint(String),
    /// HTTP layer failed before a complete response was read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Response body was not the JSON we expected.
    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Service answered with a non-success status and a JSON body.
    #[error("Search service rejected the request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status returned by the service.
        status: StatusCode,
        /// The body's `error` field, when present and non-empty.
        message: Option<String>,
    },
}

/// Everything a backend needs for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Filename reported for the uploaded document.
    pub file_name: String,
    /// PDF contents.
    pub bytes: Vec<u8>,
    /// Natural-language query.
    pub query: String,
    /// Requested number of passages, forwarded uninterpreted.
    pub top_n: i64,
}

/// One ranked passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Passage text.
    pub content: String,
    /// Relevance in `[0, 1]` as computed by the service.
    pub similarity_score: f64,
}

#[derive(Deserialize)]
pub(crate) struct SearchResponse {
    pub(crate) results: Vec<SearchResult>,
}
