//! HTTP client for the `upload_pdf` search endpoint.

use crate::backend::{
    SearchBackend,
    types::{BackendError, SearchRequest, SearchResponse, SearchResult},
};
use crate::document::PDF_MEDIA_TYPE;
use async_trait::async_trait;
use reqwest::{
    Client, Url,
    multipart::{Form, Part},
};
use serde_json::Value;

/// Lightweight multipart client for the search service.
pub struct HttpSearchBackend {
    pub(crate) client: Client,
    pub(crate) endpoint: Url,
}

impl HttpSearchBackend {
    /// Construct a client posting to `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self, BackendError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| BackendError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        let client = Client::builder().user_agent("pdfsearch/0.1").build()?;
        tracing::debug!(endpoint = %endpoint, "Initialized search HTTP client");

        Ok(Self { client, endpoint })
    }

    /// Endpoint every submission is posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_form(request: &SearchRequest) -> Result<Form, BackendError> {
        let pdf = Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str(PDF_MEDIA_TYPE)?;

        Ok(Form::new()
            .part("pdf", pdf)
            .text("query", request.query.clone())
            .text("top_n", request.top_n.to_string()))
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, BackendError> {
        let form = Self::build_form(request)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            let payload: SearchResponse = serde_json::from_slice(&body)?;
            tracing::debug!(
                status = %status,
                results = payload.results.len(),
                "Search service responded"
            );
            return Ok(payload.results);
        }

        let payload: Value = serde_json::from_slice(&body)?;
        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let error = BackendError::Rejected { status, message };
        tracing::error!(error = %error, "Search request failed");
        Err(error)
    }
}
