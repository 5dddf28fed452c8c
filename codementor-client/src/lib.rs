//! Code Mentor Client - HTTP access to the analysis endpoint.
//!
//! The endpoint is an external collaborator: this crate only defines the
//! request it sends and the response shape it expects back. One call, one
//! POST — no retries, no timeout, no batching.

#![warn(clippy::all, clippy::pedantic)]

use codementor_core::{AnalysisRequest, AnalysisResponse, MentorConfig, DEFAULT_ENDPOINT};
use reqwest::Client;

// Callers match on status errors without depending on reqwest directly.
pub use reqwest::StatusCode;

/// Result type for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Error types for client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, DNS, malformed body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Analysis endpoint returned {0}")]
    Status(StatusCode),
}

/// Client for the `/analyze` endpoint.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    base_url: String,
    client: Client,
}

impl Default for AnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisClient {
    /// Create a client pointing at the default local endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a client pointing at a specific endpoint base URL.
    pub fn with_endpoint(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &MentorConfig) -> Self {
        Self::with_endpoint(config.endpoint.clone())
    }

    /// The configured endpoint base URL.
    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    /// Submit code for analysis.
    ///
    /// Issues exactly one POST to `<endpoint>/analyze` with a JSON body and
    /// parses the JSON reply. Any non-2xx status or transport failure is an
    /// error; the body of a failed response is not inspected.
    pub async fn analyze(&self, request: &AnalysisRequest) -> ClientResult<AnalysisResponse> {
        let url = self.analyze_url();

        tracing::debug!(
            language = %request.language,
            bytes = request.code.len(),
            "submitting code for analysis"
        );

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "analysis request failed");
            return Err(ClientError::Status(status));
        }

        Ok(response.json().await?)
    }

    fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_url_tolerates_trailing_slash() {
        let client = AnalysisClient::with_endpoint("http://localhost:8000/");
        assert_eq!(client.analyze_url(), "http://localhost:8000/analyze");

        let client = AnalysisClient::with_endpoint("http://localhost:8000");
        assert_eq!(client.analyze_url(), "http://localhost:8000/analyze");
    }

    #[test]
    fn default_client_uses_local_endpoint() {
        let client = AnalysisClient::new();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }
}
