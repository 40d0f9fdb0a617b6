//! Draft storage abstraction trait
//!
//! This module defines the DraftStore trait that all draft backends must implement.

use async_trait::async_trait;
use datadrop_core::Draft;
use thiserror::Error;

/// Fixed key the draft is stored under.
pub const DRAFT_KEY: &str = "datadrop-draft";

/// Draft storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Draft is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to serialize draft: {0}")]
    Serialization(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftBackend {
    Local,
    Memory,
}

/// Draft storage abstraction trait
///
/// A backend holds at most one draft, under [`DRAFT_KEY`]. `save` overwrites it.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Read the saved draft.
    ///
    /// `Ok(None)` when nothing is saved; `Err(StorageError::Corrupt)` when the
    /// stored document does not parse.
    async fn load(&self) -> StorageResult<Option<Draft>>;

    /// Replace the saved draft.
    async fn save(&self, draft: &Draft) -> StorageResult<()>;

    /// Remove the saved draft; succeeds when nothing is saved.
    async fn clear(&self) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> DraftBackend;
}

pub(crate) fn encode_draft(draft: &Draft) -> StorageResult<String> {
    serde_json::to_string_pretty(draft).map_err(|e| StorageError::Serialization(e.to_string()))
}

pub(crate) fn decode_draft(raw: &str) -> StorageResult<Draft> {
    serde_json::from_str(raw).map_err(|e| StorageError::Corrupt(e.to_string()))
}
