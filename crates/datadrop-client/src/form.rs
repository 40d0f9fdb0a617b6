//! Conversion of a [`MultipartPayload`] into a reqwest multipart form.

use anyhow::{Context, Result};
use datadrop_core::{MultipartPayload, PayloadPart};
use reqwest::multipart::{Form, Part};
use reqwest::Body;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Build the request body. File bytes are passed through untouched.
pub fn build_form(payload: MultipartPayload) -> Result<Form> {
    let mut form = Form::new();

    for part in payload.into_parts() {
        form = match part {
            PayloadPart::Text { name, value } => form.text(name, value),
            PayloadPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let len = data.len() as u64;
                let file_part = match Part::stream_with_length(Body::from(data.clone()), len)
                    .file_name(file_name.clone())
                    .mime_str(&content_type)
                {
                    Ok(part) => part,
                    Err(_) => {
                        tracing::debug!(
                            file_name = %file_name,
                            content_type = %content_type,
                            "Invalid content type, sending as octet-stream"
                        );
                        Part::stream_with_length(Body::from(data), len)
                            .file_name(file_name)
                            .mime_str(FALLBACK_CONTENT_TYPE)
                            .context("Failed to build file part")?
                    }
                };
                form.part(name, file_part)
            }
        };
    }

    Ok(form)
}
