//! File writer for generated output units.
//!
//! Writes each [`SourceUnit`] to `<out_dir>/<snake_name>.generated.rs`,
//! skipping files whose on-disk content is already byte-identical so reruns
//! leave timestamps alone. Supports dry-run mode.

use crate::error::{CliResult, WriteError};
use dtogen_core::SourceUnit;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Result of a write operation.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Existing file already had identical content; nothing written.
    Unchanged {
        /// Path to the up-to-date file.
        path: PathBuf,
    },
    /// Dry run; content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    /// Create a new file writer.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Path a unit is written to under the given output directory.
    pub fn unit_path(out_dir: &Path, unit: &SourceUnit) -> PathBuf {
        out_dir.join(unit.file_name())
    }

    /// Write one unit under the output directory.
    pub fn write_unit(&self, out_dir: &Path, unit: &SourceUnit) -> CliResult<WriteResult> {
        self.write(&Self::unit_path(out_dir, unit), &unit.content)
    }

    /// Write content to a file.
    ///
    /// In dry-run mode, returns the content without writing. Otherwise the
    /// write is skipped when the file already holds identical content.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        if let Ok(existing) = std::fs::read_to_string(path) {
            if existing == content {
                return Ok(WriteResult::Unchanged {
                    path: path.to_path_buf(),
                });
            }
        }

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::Unchanged { path } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the write touched the filesystem.
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }
}

/// Target names appearing more than once in a batch.
///
/// Later units overwrite earlier ones at the same path; the command layer
/// warns about these before writing.
pub fn duplicate_targets(units: &[SourceUnit]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for unit in units {
        *counts.entry(unit.name.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn unit(name: &str, content: &str) -> SourceUnit {
        SourceUnit {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn writes_unit_to_snake_case_path() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(false);

        let result = writer
            .write_unit(dir.path(), &unit("OrderSummaryDto", "pub struct OrderSummaryDto {}\n"))
            .unwrap();

        assert!(result.was_written());
        assert_eq!(
            result.path(),
            dir.path().join("order_summary_dto.generated.rs")
        );
        assert!(result.path().exists());
    }

    #[test]
    fn creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("nested/generated");
        let writer = FileWriter::new(false);

        let result = writer
            .write_unit(&out_dir, &unit("OrderDto", "pub struct OrderDto {}\n"))
            .unwrap();

        assert!(result.was_written());
        assert!(result.path().exists());
    }

    #[test]
    fn identical_rewrite_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(false);
        let unit = unit("OrderDto", "pub struct OrderDto {}\n");

        let first = writer.write_unit(dir.path(), &unit).unwrap();
        assert!(first.was_written());

        let second = writer.write_unit(dir.path(), &unit).unwrap();
        assert!(matches!(second, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn changed_content_is_rewritten() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(false);

        writer
            .write_unit(dir.path(), &unit("OrderDto", "pub struct OrderDto {}\n"))
            .unwrap();
        let result = writer
            .write_unit(
                dir.path(),
                &unit("OrderDto", "pub struct OrderDto { pub id: u64 }\n"),
            )
            .unwrap();

        assert!(result.was_written());
        assert_eq!(
            std::fs::read_to_string(result.path()).unwrap(),
            "pub struct OrderDto { pub id: u64 }\n"
        );
    }

    #[test]
    fn dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(true);

        let result = writer
            .write_unit(dir.path(), &unit("OrderDto", "pub struct OrderDto {}\n"))
            .unwrap();

        assert!(matches!(result, WriteResult::DryRun { .. }));
        assert!(!result.path().exists());
        if let WriteResult::DryRun { content, .. } = result {
            assert_eq!(content, "pub struct OrderDto {}\n");
        }
    }

    #[test]
    fn reports_duplicate_target_names() {
        let units = vec![
            unit("OrderDto", "a"),
            unit("CustomerDto", "b"),
            unit("OrderDto", "c"),
        ];

        assert_eq!(duplicate_targets(&units), vec!["OrderDto"]);
    }
}
