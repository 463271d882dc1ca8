use crate::domain::{MarkingInput, Markings};
use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Where marking overlays come from
pub trait MarkingSource {
    /// Load the raw overlay document
    fn load(&self) -> Result<MarkingInput>;

    /// Short description for log output
    fn describe(&self) -> String;

    /// Load and resolve, dropping malformed dates
    fn load_markings(&self) -> Result<Markings> {
        Ok(self.load()?.resolve())
    }
}

/// Overlays stored as a camelCase JSON document on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, input: &MarkingInput) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            serde_json::to_string_pretty(input).context("Failed to serialize markings to JSON")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write markings file: {}", self.path.display()))?;
        Ok(())
    }
}

impl MarkingSource for JsonFileSource {
    fn load(&self) -> Result<MarkingInput> {
        if !self.path.exists() {
            debug!("no markings file at {}", self.path.display());
            return Ok(MarkingInput::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read markings file: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse markings file: {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlockedMarking, DotMarking, Dot, Marking};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let source = JsonFileSource::new(temp_dir.path().join("markings.json"));
        assert!(source.load_markings().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let source = JsonFileSource::new(temp_dir.path().join("nested").join("markings.json"));

        let input = MarkingInput {
            blocked_dates: Some(BlockedMarking {
                dates: vec!["2023-04-03".to_string()],
                ..BlockedMarking::default()
            }),
            dot_dates: vec![DotMarking {
                marking: Marking::default(),
                date: "2023-04-05".to_string(),
                dots: vec![Dot::new("#489F70")],
            }],
            period_dates: None,
        };
        source.save(&input).unwrap();

        let markings = source.load_markings().unwrap();
        let date = NaiveDate::from_ymd_opt(2023, 4, 3).unwrap();
        assert!(markings.lookup(date).is_blocked());
        assert_eq!(markings.dots.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("markings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileSource::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse markings file"));
    }
}
