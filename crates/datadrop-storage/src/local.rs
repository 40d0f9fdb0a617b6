use crate::traits::{
    decode_draft, encode_draft, DraftBackend, DraftStore, StorageError, StorageResult, DRAFT_KEY,
};
use async_trait::async_trait;
use datadrop_core::Draft;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem draft storage
///
/// The draft lives at `{base_path}/datadrop-draft.json`.
#[derive(Clone, Debug)]
pub struct LocalDraftStore {
    base_path: PathBuf,
}

impl LocalDraftStore {
    /// Create a new LocalDraftStore, creating `base_path` if needed
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create draft directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalDraftStore { base_path })
    }

    pub fn draft_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", DRAFT_KEY))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", DRAFT_KEY))
    }
}

#[async_trait]
impl DraftStore for LocalDraftStore {
    async fn load(&self) -> StorageResult<Option<Draft>> {
        let path = self.draft_path();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(path = %path.display(), "No saved draft");
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).await?;
        let draft = decode_draft(&raw)?;

        tracing::debug!(
            path = %path.display(),
            saved_at = %draft.saved_at,
            "Loaded draft"
        );

        Ok(Some(draft))
    }

    async fn save(&self, draft: &Draft) -> StorageResult<()> {
        let path = self.draft_path();
        let tmp = self.temp_path();
        let json = encode_draft(draft)?;

        // Write then rename so a crash never leaves a half-written draft
        let mut file = fs::File::create(&tmp).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", tmp.display(), e))
        })?;

        file.write_all(json.as_bytes()).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", tmp.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", tmp.display(), e))
        })?;
        drop(file);

        fs::rename(&tmp, &path).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to move {} to {}: {}",
                tmp.display(),
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = json.len(),
            "Draft saved"
        );

        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        let path = self.draft_path();

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Draft cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn backend_type(&self) -> DraftBackend {
        DraftBackend::Local
    }
}
