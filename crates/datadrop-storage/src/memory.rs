use crate::traits::{decode_draft, encode_draft, DraftBackend, DraftStore, StorageResult};
use async_trait::async_trait;
use datadrop_core::Draft;
use tokio::sync::RwLock;

/// In-memory draft storage, for tests and ephemeral sessions.
///
/// The draft is kept in its serialized form so loading goes through the same
/// parse path as the filesystem backend.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    raw: RwLock<Option<String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored document, parsable or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RwLock::new(Some(raw.into())),
        }
    }

    pub async fn raw(&self) -> Option<String> {
        self.raw.read().await.clone()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn load(&self) -> StorageResult<Option<Draft>> {
        match self.raw.read().await.as_deref() {
            Some(raw) => decode_draft(raw).map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, draft: &Draft) -> StorageResult<()> {
        let json = encode_draft(draft)?;
        *self.raw.write().await = Some(json);
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        *self.raw.write().await = None;
        Ok(())
    }

    fn backend_type(&self) -> DraftBackend {
        DraftBackend::Memory
    }
}
