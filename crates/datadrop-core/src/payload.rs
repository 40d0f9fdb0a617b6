//! Multipart payload layout
//!
//! The outbound request is described here as plain data so the layout can be
//! inspected and tested without an HTTP client. Transports turn a
//! [`MultipartPayload`] into their own multipart body.
//!
//! Wire layout:
//! - `company`: company name, verbatim
//! - `manager`: primary uploader's name, verbatim
//! - `uploaders`: JSON array of `{"name", "contact"}` objects
//! - one file part per attachment, field `{sectionKey}[]`, sections in catalog
//!   order and attachments in staging order

use bytes::Bytes;

use crate::error::IntakeResult;
use crate::models::FormFields;
use crate::staging::StagingStore;

pub const COMPANY_FIELD: &str = "company";
pub const MANAGER_FIELD: &str = "manager";
pub const UPLOADERS_FIELD: &str = "uploaders";

/// Multipart field name for a section's files.
pub fn section_field_name(section_key: &str) -> String {
    format!("{}[]", section_key)
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Bytes,
    },
}

impl PayloadPart {
    pub fn name(&self) -> &str {
        match self {
            PayloadPart::Text { name, .. } | PayloadPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    parts: Vec<PayloadPart>,
}

impl MultipartPayload {
    /// Flatten scalar fields and every staged attachment into parts.
    pub fn encode(fields: &FormFields, staging: &StagingStore) -> IntakeResult<Self> {
        let mut parts = vec![
            PayloadPart::Text {
                name: COMPANY_FIELD.to_string(),
                value: fields.company.clone(),
            },
            PayloadPart::Text {
                name: MANAGER_FIELD.to_string(),
                value: fields.manager_name().to_string(),
            },
            PayloadPart::Text {
                name: UPLOADERS_FIELD.to_string(),
                value: serde_json::to_string(&fields.uploaders)?,
            },
        ];

        for (section_key, attachments) in staging.iter() {
            let field = section_field_name(section_key);
            parts.extend(attachments.iter().map(|a| PayloadPart::File {
                name: field.clone(),
                file_name: a.file.name.clone(),
                content_type: a.file.content_type.clone(),
                data: a.file.data.clone(),
            }));
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<PayloadPart> {
        self.parts
    }

    pub fn file_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, PayloadPart::File { .. }))
            .count()
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            PayloadPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Total size of all file parts in bytes.
    pub fn file_bytes(&self) -> u64 {
        self.parts
            .iter()
            .map(|p| match p {
                PayloadPart::File { data, .. } => data.len() as u64,
                PayloadPart::Text { .. } => 0,
            })
            .sum()
    }
}
