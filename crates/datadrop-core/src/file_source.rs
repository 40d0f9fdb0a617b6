//! File selection abstraction
//!
//! Whatever lets the user pick or drop files (a terminal prompt, a list of
//! paths, a GUI dialog) produces [`RawFile`]s through this trait, so staging
//! and submission never depend on a particular front end.

use async_trait::async_trait;

use crate::error::IntakeResult;
use crate::models::RawFile;

#[async_trait]
pub trait FileSource: Send + Sync {
    /// Produce the files the user selected; may be empty.
    async fn request_files(&self) -> IntakeResult<Vec<RawFile>>;
}

/// A fixed set of in-memory files.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSource {
    files: Vec<RawFile>,
}

impl MemoryFileSource {
    pub fn new(files: Vec<RawFile>) -> Self {
        Self { files }
    }
}

#[async_trait]
impl FileSource for MemoryFileSource {
    async fn request_files(&self) -> IntakeResult<Vec<RawFile>> {
        Ok(self.files.clone())
    }
}
