//! datadrop Storage Library
//!
//! Draft persistence for datadrop: the [`DraftStore`] trait, a local filesystem
//! backend and an in-memory backend, plus best-effort save/restore helpers for a
//! form session.
//!
//! # Draft key
//!
//! A backend holds exactly one draft under the fixed key `datadrop-draft`. The
//! local backend stores it as `{draft_dir}/datadrop-draft.json`:
//!
//! ```json
//! { "company": "...", "uploaders": [{"name": "...", "contact": "..."}],
//!   "fileNames": {"ga4": ["report.csv"]}, "savedAt": "2026-01-01T00:00:00Z" }
//! ```

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod persistence;
pub mod traits;

// Re-export commonly used types
pub use factory::create_draft_store;
#[cfg(feature = "storage-local")]
pub use local::LocalDraftStore;
pub use memory::MemoryDraftStore;
pub use persistence::{load_draft, restore_draft, save_draft};
pub use traits::{DraftBackend, DraftStore, StorageError, StorageResult, DRAFT_KEY};
