use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FormFields;

/// Attachment-free snapshot of the form.
///
/// Only file names are recorded; restoring a draft never recreates attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(flatten)]
    pub fields: FormFields,
    #[serde(default)]
    pub file_names: IndexMap<String, Vec<String>>,
    pub saved_at: DateTime<Utc>,
}

impl Draft {
    pub fn new(fields: FormFields, file_names: IndexMap<String, Vec<String>>) -> Self {
        Self {
            fields,
            file_names,
            saved_at: Utc::now(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.file_names.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Uploader;

    #[test]
    fn test_draft_json_shape() {
        let mut file_names = IndexMap::new();
        file_names.insert("ga4".to_string(), vec!["report.csv".to_string()]);
        let draft = Draft::new(
            FormFields::new("Acme", vec![Uploader::new("Kim", "kim@acme.test")]),
            file_names,
        );

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["company"], "Acme");
        assert_eq!(value["uploaders"][0]["name"], "Kim");
        assert_eq!(value["uploaders"][0]["contact"], "kim@acme.test");
        assert_eq!(value["fileNames"]["ga4"][0], "report.csv");
        assert!(value["savedAt"].as_str().unwrap().contains('T'));

        let back: Draft = serde_json::from_value(value).unwrap();
        assert_eq!(back, draft);
        assert_eq!(back.file_count(), 1);
    }

    #[test]
    fn test_draft_without_file_names_parses() {
        let draft: Draft = serde_json::from_str(
            r#"{"company":"Acme","savedAt":"2026-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(draft.fields.company, "Acme");
        assert!(draft.fields.uploaders.is_empty());
        assert_eq!(draft.file_count(), 0);
    }
}
