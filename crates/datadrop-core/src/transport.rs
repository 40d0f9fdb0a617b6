//! Submission transport abstraction

use async_trait::async_trait;

use crate::payload::MultipartPayload;

/// Why a submission did not reach a successful response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The endpoint answered with a non-success status code.
    #[error("Server error: {0}")]
    Status(u16),

    /// The request never produced a response.
    #[error("{0}")]
    Network(String),
}

/// Sends one multipart payload to the ingestion endpoint.
///
/// Implementations make exactly one attempt per call and only report the
/// status class of the response.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(&self, payload: MultipartPayload) -> Result<(), TransportError>;
}
