//! Best-effort draft save and restore for a form session
//!
//! Neither operation ever fails from the caller's point of view: write errors
//! are logged and reported as `false`, unreadable drafts are logged and treated
//! as absent.

use datadrop_core::{Draft, FormSession};

use crate::traits::{DraftStore, StorageError};

/// Snapshot `session` into `store`. Returns whether the draft was written.
pub async fn save_draft(store: &dyn DraftStore, session: &FormSession) -> bool {
    let draft = session.to_draft();
    match store.save(&draft).await {
        Ok(()) => {
            tracing::debug!(
                company = %draft.fields.company,
                file_names = draft.file_count(),
                "Draft snapshot stored"
            );
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, backend = ?store.backend_type(), "Failed to save draft");
            false
        }
    }
}

/// Read the saved draft, absorbing every failure.
pub async fn load_draft(store: &dyn DraftStore) -> Option<Draft> {
    match store.load().await {
        Ok(draft) => draft,
        Err(StorageError::Corrupt(reason)) => {
            tracing::warn!(reason = %reason, "Ignoring unreadable draft");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read draft");
            None
        }
    }
}

/// Reapply the saved draft's scalar fields to `session`.
///
/// Returns the draft that was applied, if any. Attachments are never restored.
pub async fn restore_draft(store: &dyn DraftStore, session: &mut FormSession) -> Option<Draft> {
    let draft = load_draft(store).await?;
    session.apply_draft(&draft);
    Some(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{DraftBackend, StorageResult};
    use crate::MemoryDraftStore;
    use async_trait::async_trait;
    use datadrop_core::{Catalog, FormFields, RawFile, SessionOptions, Uploader};
    use std::sync::Arc;

    struct ReadOnlyStore;

    #[async_trait]
    impl DraftStore for ReadOnlyStore {
        async fn load(&self) -> StorageResult<Option<Draft>> {
            Err(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }

        async fn save(&self, _draft: &Draft) -> StorageResult<()> {
            Err(StorageError::WriteFailed("read-only".to_string()))
        }

        async fn clear(&self) -> StorageResult<()> {
            Ok(())
        }

        fn backend_type(&self) -> DraftBackend {
            DraftBackend::Memory
        }
    }

    fn session() -> FormSession {
        FormSession::new(
            Arc::new(Catalog::builtin().unwrap()),
            SessionOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_save_then_restore_fields_without_attachments() {
        let store = MemoryDraftStore::new();

        let mut original = session();
        original.set_fields(FormFields::new(
            "Acme",
            vec![Uploader::new("Kim", "kim@acme.test")],
        ));
        original
            .add_files(
                "ga4",
                vec![RawFile::new("report.csv", "x"), RawFile::new("more.csv", "y")],
            )
            .unwrap();
        original
            .add_files("brandGuide", vec![RawFile::new("logo.png", "z")])
            .unwrap();
        assert!(save_draft(&store, &original).await);

        let mut reloaded = session();
        let draft = restore_draft(&store, &mut reloaded).await.unwrap();

        assert_eq!(reloaded.fields(), original.fields());
        assert_eq!(reloaded.total_count(), 0);
        assert_eq!(draft.file_names["ga4"], vec!["report.csv", "more.csv"]);
        assert!(!store.raw().await.unwrap().contains("\"data\""));
    }

    #[tokio::test]
    async fn test_restore_absent_draft_is_noop() {
        let store = MemoryDraftStore::new();
        let mut session = session();
        assert!(restore_draft(&store, &mut session).await.is_none());
        assert_eq!(session.fields(), &FormFields::default());
    }

    #[tokio::test]
    async fn test_restore_corrupt_draft_is_noop() {
        let store = MemoryDraftStore::with_raw("definitely not json");
        let mut session = session();
        session.set_fields(FormFields::new("Typed", vec![]));

        assert!(restore_draft(&store, &mut session).await.is_none());
        assert_eq!(session.fields().company, "Typed");
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let mut session = session();
        assert!(!save_draft(&ReadOnlyStore, &session).await);
        assert!(restore_draft(&ReadOnlyStore, &mut session).await.is_none());
    }
}
