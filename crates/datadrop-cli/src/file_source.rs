//! Files picked from the command line.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use datadrop_core::{FileSource, IntakeError, IntakeResult, RawFile};

/// Reads a fixed list of paths from disk.
#[derive(Debug, Clone, Default)]
pub struct PathFileSource {
    paths: Vec<PathBuf>,
}

impl PathFileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

fn file_name_of(path: &Path) -> IntakeResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| IntakeError::InvalidInput(format!("Not a file path: {}", path.display())))
}

#[async_trait]
impl FileSource for PathFileSource {
    async fn request_files(&self) -> IntakeResult<Vec<RawFile>> {
        let mut files = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let data = tokio::fs::read(path).await.map_err(|e| {
                IntakeError::InvalidInput(format!("Failed to read file {}: {}", path.display(), e))
            })?;
            let name = file_name_of(path)?;
            tracing::debug!(path = %path.display(), size_bytes = data.len(), "Read file");
            files.push(RawFile::new(name, data));
        }
        Ok(files)
    }
}

/// Parse a `SECTION=PATH` argument.
pub fn parse_file_arg(arg: &str) -> Result<(String, PathBuf), String> {
    let (section, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected SECTION=PATH, got '{}'", arg))?;
    let section = section.trim();
    let path = path.trim();
    if section.is_empty() || path.is_empty() {
        return Err(format!("expected SECTION=PATH, got '{}'", arg));
    }
    Ok((section.to_string(), PathBuf::from(path)))
}

/// Group `(section, path)` pairs by section, keeping first-seen section order
/// and argument order within a section.
fn group_by_section(files: &[(String, PathBuf)]) -> Vec<(String, Vec<PathBuf>)> {
    let mut groups: Vec<(String, Vec<PathBuf>)> = Vec::new();
    for (section, path) in files {
        match groups.iter_mut().find(|(key, _)| key == section) {
            Some((_, paths)) => paths.push(path.clone()),
            None => groups.push((section.clone(), vec![path.clone()])),
        }
    }
    groups
}

/// One file source per section named on the command line.
pub fn sources_by_section(files: &[(String, PathBuf)]) -> Vec<(String, PathFileSource)> {
    group_by_section(files)
        .into_iter()
        .map(|(section, paths)| (section, PathFileSource::new(paths)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_arg() {
        let (section, path) = parse_file_arg("ga4=exports/report.csv").unwrap();
        assert_eq!(section, "ga4");
        assert_eq!(path, PathBuf::from("exports/report.csv"));

        assert!(parse_file_arg("report.csv").is_err());
        assert!(parse_file_arg("=report.csv").is_err());
        assert!(parse_file_arg("ga4=").is_err());
    }

    #[test]
    fn test_sources_by_section_keeps_order() {
        let files = vec![
            ("meta".to_string(), PathBuf::from("a.csv")),
            ("ga4".to_string(), PathBuf::from("b.csv")),
            ("meta".to_string(), PathBuf::from("c.csv")),
        ];
        let sources = sources_by_section(&files);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].0, "meta");
        assert_eq!(
            sources[0].1.paths(),
            &[PathBuf::from("a.csv"), PathBuf::from("c.csv")]
        );
        assert_eq!(sources[1].0, "ga4");
    }

    #[tokio::test]
    async fn test_path_file_source_reads_bytes_and_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, b"a,b\n1,2\n").unwrap();

        let source = PathFileSource::new(vec![path]);
        let files = source.request_files().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "report.csv");
        assert_eq!(files[0].content_type, "text/csv");
        assert_eq!(files[0].data.as_ref(), b"a,b\n1,2\n");
    }

    #[tokio::test]
    async fn test_path_file_source_missing_file() {
        let source = PathFileSource::new(vec![PathBuf::from("/definitely/not/here.csv")]);
        let err = source.request_files().await.unwrap_err();
        assert!(matches!(err, IntakeError::InvalidInput(_)));
    }
}
