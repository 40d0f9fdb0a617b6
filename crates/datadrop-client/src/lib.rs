//! HTTP transport for datadrop submissions.
//!
//! Posts one multipart form per submission to the configured ingestion endpoint.
//! Only the response status class is consulted; the body is ignored. There is no
//! retry and no request timeout: a call runs until the endpoint answers or the
//! connection fails.

pub mod form;

use anyhow::{Context, Result};
use async_trait::async_trait;
use datadrop_core::{IntakeConfig, MultipartPayload, SubmissionTransport, TransportError};
use reqwest::Client;
use std::time::Instant;

pub use form::build_form;

/// HTTP client for the ingestion endpoint.
#[derive(Clone, Debug)]
pub struct SubmissionClient {
    client: Client,
    endpoint_url: String,
}

impl SubmissionClient {
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("datadrop/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.into(),
        })
    }

    /// Create client from configuration: DATADROP_ENDPOINT_URL (or ENDPOINT_URL).
    pub fn from_config(config: &IntakeConfig) -> Result<Self> {
        let endpoint = config.require_endpoint()?;
        Self::new(endpoint)
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// POST a multipart form and return the response status.
    pub async fn post_multipart(
        &self,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::StatusCode> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        Ok(response.status())
    }
}

fn network_message(err: &anyhow::Error) -> String {
    // Innermost cause first: reqwest's own message is more useful than our context
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_default()
}

#[async_trait]
impl SubmissionTransport for SubmissionClient {
    async fn send(&self, payload: MultipartPayload) -> Result<(), TransportError> {
        let file_count = payload.file_count();
        let file_bytes = payload.file_bytes();
        let form = build_form(payload).map_err(|e| TransportError::Network(e.to_string()))?;

        let start = Instant::now();
        let status = match self.post_multipart(form).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint_url,
                    error = %format!("{:#}", e),
                    "Submission request failed"
                );
                return Err(TransportError::Network(network_message(&e)));
            }
        };

        tracing::info!(
            endpoint = %self.endpoint_url,
            status = status.as_u16(),
            file_count,
            file_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Submission request completed"
        );

        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_endpoint() {
        let config = IntakeConfig::default();
        let err = SubmissionClient::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("DATADROP_ENDPOINT_URL"));
    }

    #[test]
    fn test_from_config_uses_endpoint() {
        let config = IntakeConfig {
            endpoint_url: Some("https://script.example.com/macros/s/abc/exec".to_string()),
            ..IntakeConfig::default()
        };
        let client = SubmissionClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint_url(),
            "https://script.example.com/macros/s/abc/exec"
        );
    }

    #[test]
    fn test_network_message_uses_innermost_cause() {
        let err = anyhow::anyhow!("connection refused").context("Failed to send request");
        assert_eq!(network_message(&err), "connection refused");
    }
}
