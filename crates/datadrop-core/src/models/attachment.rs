use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of a staged attachment. Generated at add time, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(Uuid);

impl AttachmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for AttachmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A file handed over by a file source, before it is staged.
#[derive(Clone, Debug, PartialEq)]
pub struct RawFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl RawFile {
    /// Build a file, guessing the MIME type from the file name.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .to_string();
        Self {
            name,
            content_type,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Size rounded to whole KiB, as shown next to a staged file.
    pub fn display_size(&self) -> String {
        format!("{}KB", (self.size() as f64 / 1024.0).round() as u64)
    }
}

/// One staged file plus its generated identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    pub id: AttachmentId,
    pub file: RawFile,
}

impl Attachment {
    pub fn new(file: RawFile) -> Self {
        Self {
            id: AttachmentId::new(),
            file,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_file_guesses_content_type() {
        assert_eq!(RawFile::new("report.csv", "a,b").content_type, "text/csv");
        assert_eq!(
            RawFile::new("deck.pdf", vec![0u8; 4]).content_type,
            "application/pdf"
        );
        assert_eq!(
            RawFile::new("noext", vec![1u8]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_display_size_rounds_to_kib() {
        assert_eq!(RawFile::new("a.bin", vec![0u8; 100]).display_size(), "0KB");
        assert_eq!(RawFile::new("a.bin", vec![0u8; 1536]).display_size(), "2KB");
        assert_eq!(RawFile::new("a.bin", vec![0u8; 10 * 1024]).display_size(), "10KB");
    }

    #[test]
    fn test_attachment_ids_are_unique() {
        let file = RawFile::new("a.txt", "x");
        let a = Attachment::new(file.clone());
        let b = Attachment::new(file);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_attachment_id_parses_from_display() {
        let id = AttachmentId::new();
        let parsed: AttachmentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
