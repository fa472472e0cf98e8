//! The ranking service reached over a single HTTP call.

mod client;
mod types;

pub use client::HttpSearchBackend;
pub use types::{BackendError, SearchRequest, SearchResult};

use async_trait::async_trait;

/// Interface implemented by search backends.
///
/// A backend receives the uploaded document, the query and the requested number of passages, and
/// answers with passages ranked by similarity. Exactly one call is made per submission; retries
/// are left to the user.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Rank passages of `request.bytes` against `request.query`.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, BackendError>;
}
