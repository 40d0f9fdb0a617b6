#[cfg(feature = "storage-local")]
use crate::LocalDraftStore;
use crate::{DraftStore, StorageResult};
use datadrop_core::IntakeConfig;
use std::sync::Arc;

/// Create the draft backend described by the configuration
#[cfg(feature = "storage-local")]
pub async fn create_draft_store(config: &IntakeConfig) -> StorageResult<Arc<dyn DraftStore>> {
    let store = LocalDraftStore::new(config.draft_dir.clone()).await?;
    Ok(Arc::new(store))
}

/// Create the draft backend described by the configuration
#[cfg(not(feature = "storage-local"))]
pub async fn create_draft_store(_config: &IntakeConfig) -> StorageResult<Arc<dyn DraftStore>> {
    tracing::warn!("storage-local feature not enabled; drafts will not survive restarts");
    Ok(Arc::new(crate::MemoryDraftStore::new()))
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use crate::DraftBackend;

    #[tokio::test]
    async fn test_create_draft_store_uses_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = IntakeConfig {
            draft_dir: dir.path().join("drafts"),
            ..IntakeConfig::default()
        };

        let store = create_draft_store(&config).await.unwrap();
        assert_eq!(store.backend_type(), DraftBackend::Local);
        assert!(dir.path().join("drafts").is_dir());
    }
}
