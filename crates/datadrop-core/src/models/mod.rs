pub mod attachment;
pub mod catalog;
pub mod draft;
pub mod form;

pub use attachment::{Attachment, AttachmentId, RawFile};
pub use catalog::{Catalog, CategorySpec, SectionSpec};
pub use draft::Draft;
pub use form::{FormFields, Uploader, MISSING_IDENTITY_MESSAGE};
