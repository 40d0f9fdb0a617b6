//! datadrop Core Library
//!
//! Domain models, the section catalog, the staging store, the multipart payload
//! layout and the submission session shared by the storage, client and CLI
//! crates. Nothing here depends on a UI toolkit or an HTTP client.

pub mod config;
pub mod error;
pub mod file_source;
pub mod models;
pub mod payload;
pub mod session;
pub mod staging;
pub mod transport;

// Re-export commonly used types
pub use config::IntakeConfig;
pub use error::{ErrorMetadata, IntakeError, IntakeResult, LogLevel};
pub use file_source::{FileSource, MemoryFileSource};
pub use models::{
    Attachment, AttachmentId, Catalog, CategorySpec, Draft, FormFields, RawFile, SectionSpec,
    Uploader,
};
pub use payload::{MultipartPayload, PayloadPart};
pub use session::{FormSession, Receipt, SessionOptions, SubmitStatus};
pub use staging::StagingStore;
pub use transport::{SubmissionTransport, TransportError};
