//! Plain-text views printed by the `datadrop` binary.

use std::fmt::Write;

use datadrop_core::{
    Catalog, Draft, ErrorMetadata, IntakeError, MultipartPayload, PayloadPart, Receipt,
    StagingStore,
};

use crate::truncate_string;

const VALUE_PREVIEW_LEN: usize = 60;

/// Categories, their sections and numbered export steps.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for category in catalog.categories() {
        let _ = writeln!(
            out,
            "{} {} {}",
            category.code,
            category.icon,
            category.label.to_uppercase()
        );
        for key in &category.sections {
            let Some(section) = catalog.section(key) else {
                continue;
            };
            let _ = writeln!(out, "  [{}] {}", section.key, section.label);
            if !section.description.is_empty() {
                let _ = writeln!(out, "      {}", section.description);
            }
            for (i, step) in section.steps.iter().enumerate() {
                let _ = writeln!(out, "      {:02}. {}", i + 1, step);
            }
        }
        out.push('\n');
    }
    out
}

/// Staged files with sizes, grouped the way the catalog groups sections.
pub fn render_staging(catalog: &Catalog, staging: &StagingStore) -> String {
    let mut out = String::new();
    for category in catalog.categories() {
        let count = staging.category_count(category);
        if count == 0 {
            continue;
        }
        let _ = writeln!(out, "{} {} ({})", category.code, category.label, count);
        for key in &category.sections {
            let Some(attachments) = staging.attachments(key) else {
                continue;
            };
            if attachments.is_empty() {
                continue;
            }
            let label = catalog
                .section(key)
                .map(|s| s.label.as_str())
                .unwrap_or(key.as_str());
            let _ = writeln!(out, "  {} ({})", label, attachments.len());
            for attachment in attachments {
                let _ = writeln!(
                    out,
                    "    {} {}",
                    attachment.file_name(),
                    attachment.file.display_size()
                );
            }
        }
    }
    let _ = writeln!(out, "{} FILES ATTACHED", staging.total_count());
    out
}

/// Part-by-part layout of a request body, without file contents.
pub fn render_payload(payload: &MultipartPayload) -> String {
    let mut out = String::new();
    for part in payload.parts() {
        match part {
            PayloadPart::Text { name, value } => {
                let _ = writeln!(
                    out,
                    "{:<12} {}",
                    name,
                    truncate_string(value, VALUE_PREVIEW_LEN)
                );
            }
            PayloadPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let _ = writeln!(
                    out,
                    "{:<12} {} ({}, {} bytes)",
                    name,
                    file_name,
                    content_type,
                    data.len()
                );
            }
        }
    }
    out
}

pub fn render_receipt(receipt: &Receipt) -> String {
    format!(
        "Submission received.\nReference: {}\nSubmitted at: {}\nFiles: {}\n",
        receipt.reference_id,
        receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        receipt.file_count
    )
}

pub fn render_draft(draft: &Draft) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Saved at: {}", draft.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Company:  {}", draft.fields.company);
    for (i, uploader) in draft.fields.uploaders.iter().enumerate() {
        let role = if i == 0 { "Manager" } else { "Uploader" };
        if uploader.contact.is_empty() {
            let _ = writeln!(out, "{}: {}", role, uploader.name);
        } else {
            let _ = writeln!(out, "{}: {} <{}>", role, uploader.name, uploader.contact);
        }
    }
    for (section, names) in draft.file_names.iter().filter(|(_, n)| !n.is_empty()) {
        let _ = writeln!(out, "  {}: {}", section, names.join(", "));
    }
    out
}

/// Error text for the terminal.
///
/// Outside production, errors the user cannot fix also show their cause chain.
pub fn render_error(err: &IntakeError, is_production: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[ERROR] {}", err.client_message());
    if !is_production && !err.is_recoverable() {
        for line in err.detailed_message().lines() {
            let _ = writeln!(out, "        {}", line.trim_start());
        }
    }
    if let Some(action) = err.suggested_action() {
        let _ = writeln!(out, "        {}", action);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use datadrop_core::{FormFields, RawFile, Uploader};

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_render_catalog_lists_every_section() {
        let catalog = catalog();
        let text = render_catalog(&catalog);
        for key in catalog.section_keys() {
            assert!(text.contains(&format!("[{}]", key)), "missing {}", key);
        }
        assert!(text.contains("SEC-01"));
        assert!(text.contains("01. "));
    }

    #[test]
    fn test_render_staging_counts_and_sizes() {
        let catalog = catalog();
        let mut staging = StagingStore::new(&catalog);
        staging
            .add_files(
                "ga4",
                vec![RawFile::new("report.csv", vec![b'x'; 2048])],
            )
            .unwrap();
        staging
            .add_files("meta", vec![RawFile::new("ads.csv", "a")])
            .unwrap();

        let text = render_staging(&catalog, &staging);
        assert!(text.contains("report.csv 2KB"));
        assert!(text.contains("ads.csv 0KB"));
        assert!(text.contains("2 FILES ATTACHED"));
        assert!(!text.contains("SEC-04"));
    }

    #[test]
    fn test_render_staging_empty() {
        let catalog = catalog();
        let staging = StagingStore::new(&catalog);
        assert_eq!(render_staging(&catalog, &staging), "0 FILES ATTACHED\n");
    }

    #[test]
    fn test_render_payload_layout() {
        let catalog = catalog();
        let mut staging = StagingStore::new(&catalog);
        staging
            .add_files("ga4", vec![RawFile::new("report.csv", "abc")])
            .unwrap();
        let fields = FormFields::new("Acme", vec![Uploader::new("Kim", "")]);
        let payload = MultipartPayload::encode(&fields, &staging).unwrap();

        let text = render_payload(&payload);
        assert!(text.contains("company      Acme"));
        assert!(text.contains("manager      Kim"));
        assert!(text.contains("ga4[]        report.csv (text/csv, 3 bytes)"));
    }

    #[test]
    fn test_render_error_recoverable_is_short() {
        let err = IntakeError::Submission("Server error: 500".into());
        assert_eq!(
            render_error(&err, false),
            "[ERROR] Server error: 500\n        Submit again; staged files are kept\n"
        );
    }

    #[test]
    fn test_render_error_details_hidden_in_production() {
        let err = IntakeError::from(anyhow::anyhow!("disk full").context("writing draft"));

        let dev = render_error(&err, false);
        assert!(dev.starts_with("[ERROR] Internal error\n"));
        assert!(dev.contains("Caused by: writing draft"));

        let prod = render_error(&err, true);
        assert_eq!(prod, "[ERROR] Internal error\n");
    }

    #[test]
    fn test_render_draft() {
        let mut staging = StagingStore::with_sections(["ga4"]);
        staging
            .add_files("ga4", vec![RawFile::new("report.csv", "a")])
            .unwrap();
        let draft = Draft::new(
            FormFields::new(
                "Acme",
                vec![Uploader::new("Kim", "kim@acme.test"), Uploader::new("Lee", "")],
            ),
            staging.file_names(),
        );
        let text = render_draft(&draft);
        assert!(text.contains("Company:  Acme"));
        assert!(text.contains("Manager: Kim <kim@acme.test>"));
        assert!(text.contains("Uploader: Lee"));
        assert!(text.contains("ga4: report.csv"));
    }
}
