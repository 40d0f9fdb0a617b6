//! Staging store
//!
//! Holds the pending attachments of every section, keyed by section key and kept
//! in catalog order. The key set is fixed when the store is created; only the
//! per-section lists change. Counts are always derived from the lists.

use indexmap::IndexMap;

use crate::error::{IntakeError, IntakeResult};
use crate::models::{Attachment, AttachmentId, Catalog, CategorySpec, RawFile};

#[derive(Debug, Clone, Default)]
pub struct StagingStore {
    sections: IndexMap<String, Vec<Attachment>>,
}

impl StagingStore {
    /// One empty list per catalog section.
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_sections(catalog.section_keys())
    }

    pub fn with_sections<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: keys.into_iter().map(|k| (k.into(), Vec::new())).collect(),
        }
    }

    /// Append `files` to the tail of a section, each under a fresh id.
    ///
    /// Returns the ids in the order the files were given.
    pub fn add_files(
        &mut self,
        section_key: &str,
        files: impl IntoIterator<Item = RawFile>,
    ) -> IntakeResult<Vec<AttachmentId>> {
        let list = self
            .sections
            .get_mut(section_key)
            .ok_or_else(|| IntakeError::UnknownSection(section_key.to_string()))?;

        let start = list.len();
        list.extend(files.into_iter().map(Attachment::new));
        let ids: Vec<AttachmentId> = list[start..].iter().map(|a| a.id).collect();

        tracing::debug!(
            section = %section_key,
            added = ids.len(),
            section_count = list.len(),
            "Staged files"
        );

        Ok(ids)
    }

    /// Remove the attachment with `attachment_id` from a section.
    ///
    /// Returns `Ok(false)` when nothing matched; the list is left untouched.
    pub fn remove_file(
        &mut self,
        section_key: &str,
        attachment_id: AttachmentId,
    ) -> IntakeResult<bool> {
        let list = self
            .sections
            .get_mut(section_key)
            .ok_or_else(|| IntakeError::UnknownSection(section_key.to_string()))?;

        let Some(pos) = list.iter().position(|a| a.id == attachment_id) else {
            return Ok(false);
        };
        let removed = list.remove(pos);

        tracing::debug!(
            section = %section_key,
            attachment_id = %removed.id,
            file_name = %removed.file.name,
            "Removed staged file"
        );

        Ok(true)
    }

    pub fn total_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.sections
            .values()
            .flatten()
            .map(|a| a.file.size())
            .sum()
    }

    /// Number of attachments in one section; zero for unknown keys.
    pub fn section_count(&self, section_key: &str) -> usize {
        self.sections.get(section_key).map_or(0, Vec::len)
    }

    /// Aggregate count over a category's member sections.
    pub fn category_count(&self, category: &CategorySpec) -> usize {
        category
            .sections
            .iter()
            .map(|key| self.section_count(key))
            .sum()
    }

    pub fn attachments(&self, section_key: &str) -> Option<&[Attachment]> {
        self.sections.get(section_key).map(Vec::as_slice)
    }

    pub fn contains_section(&self, section_key: &str) -> bool {
        self.sections.contains_key(section_key)
    }

    /// Sections and their attachments in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Attachment])> {
        self.sections
            .iter()
            .map(|(key, list)| (key.as_str(), list.as_slice()))
    }

    /// File names per section, for drafts.
    pub fn file_names(&self) -> IndexMap<String, Vec<String>> {
        self.sections
            .iter()
            .map(|(key, list)| {
                (
                    key.clone(),
                    list.iter().map(|a| a.file.name.clone()).collect(),
                )
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}
