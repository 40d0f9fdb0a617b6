//! Section catalog
//!
//! The set of data-source sections and their accordion grouping is configuration
//! data. A default catalog is embedded in the binary; deployments can point
//! `DATADROP_CATALOG_PATH` at their own JSON document with the same shape.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IntakeError, IntakeResult};

const DEFAULT_CATALOG_JSON: &str = include_str!("../../catalog/default.json");

/// Display metadata for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Step-by-step export instructions, possibly empty.
    #[serde(default)]
    pub steps: Vec<String>,
}

/// A display grouping of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub code: String,
    pub sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    sections: Vec<SectionSpec>,
    #[serde(default)]
    categories: Vec<CategorySpec>,
}

impl Catalog {
    /// Build a catalog and check its invariants.
    pub fn new(sections: Vec<SectionSpec>, categories: Vec<CategorySpec>) -> IntakeResult<Self> {
        let catalog = Self {
            sections,
            categories,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> IntakeResult<Self> {
        Self::from_json(DEFAULT_CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> IntakeResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)
            .map_err(|e| IntakeError::InvalidCatalog(format!("failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> IntakeResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            IntakeError::InvalidCatalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, otherwise the builtin catalog.
    pub fn load(path: Option<&Path>) -> IntakeResult<Self> {
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading section catalog from file");
                Self::from_file(path)
            }
            None => Self::builtin(),
        }
    }

    fn validate(&self) -> IntakeResult<()> {
        if self.sections.is_empty() {
            return Err(IntakeError::InvalidCatalog(
                "catalog has no sections".to_string(),
            ));
        }

        let mut keys = HashSet::new();
        for section in &self.sections {
            if section.key.trim().is_empty() {
                return Err(IntakeError::InvalidCatalog(
                    "section key must not be empty".to_string(),
                ));
            }
            if !keys.insert(section.key.as_str()) {
                return Err(IntakeError::InvalidCatalog(format!(
                    "duplicate section key '{}'",
                    section.key
                )));
            }
        }

        let mut category_keys = HashSet::new();
        for category in &self.categories {
            if !category_keys.insert(category.key.as_str()) {
                return Err(IntakeError::InvalidCatalog(format!(
                    "duplicate category key '{}'",
                    category.key
                )));
            }
            if let Some(missing) = category
                .sections
                .iter()
                .find(|key| !keys.contains(key.as_str()))
            {
                return Err(IntakeError::InvalidCatalog(format!(
                    "category '{}' references unknown section '{}'",
                    category.key, missing
                )));
            }
        }

        Ok(())
    }

    /// Sections in catalog order.
    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    pub fn categories(&self) -> &[CategorySpec] {
        &self.categories
    }

    pub fn section(&self, key: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn category(&self, key: &str) -> Option<&CategorySpec> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(key: &str) -> SectionSpec {
        SectionSpec {
            key: key.to_string(),
            label: key.to_uppercase(),
            description: String::new(),
            steps: vec![],
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        let keys: Vec<&str> = catalog.section_keys().collect();
        assert_eq!(
            keys,
            vec![
                "ga4",
                "gsc",
                "googleAds",
                "meta",
                "tiktok",
                "ga",
                "semrush",
                "mediaKit",
                "brandGuide"
            ]
        );
        assert_eq!(catalog.categories().len(), 4);
        assert_eq!(catalog.category("social").unwrap().code, "SEC-02");
        assert_eq!(catalog.section("ga4").unwrap().steps.len(), 4);
        assert!(catalog.section("mediaKit").unwrap().steps.is_empty());
    }

    #[test]
    fn test_duplicate_section_key_rejected() {
        let result = Catalog::new(vec![section("a"), section("a")], vec![]);
        assert!(matches!(result, Err(IntakeError::InvalidCatalog(_))));
    }

    #[test]
    fn test_category_with_unknown_section_rejected() {
        let category = CategorySpec {
            key: "c".to_string(),
            label: "C".to_string(),
            icon: String::new(),
            code: String::new(),
            sections: vec!["a".to_string(), "missing".to_string()],
        };
        let err = Catalog::new(vec![section("a")], vec![category]).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(Catalog::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_from_file_reads_custom_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"sections":[{"key":"crm","label":"CRM export"}],
                "categories":[{"key":"sales","label":"Sales","sections":["crm"]}]}"#,
        )
        .unwrap();

        let catalog = Catalog::load(Some(&path)).unwrap();
        assert_eq!(catalog.section_keys().collect::<Vec<_>>(), vec!["crm"]);
        assert_eq!(catalog.category("sales").unwrap().sections, vec!["crm"]);
    }

    #[test]
    fn test_unparsable_catalog_is_invalid() {
        let result = Catalog::from_json("{not json");
        assert!(matches!(result, Err(IntakeError::InvalidCatalog(_))));
    }
}
