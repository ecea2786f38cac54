//! Source file scanner for discovering Rust files.
//!
//! Recursively scans a directory for `.rs` files, respecting `.gitignore`
//! patterns and an optional glob filter, and yields each file with its
//! content already read.

use crate::error::{CliResult, ScanError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// A discovered source file with its content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute path to the file.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,

    /// File content.
    pub content: String,
}

/// Scanner for discovering Rust source files.
#[derive(Debug)]
pub struct SourceScanner {
    /// Root directory to scan.
    root: PathBuf,

    /// Whether to respect .gitignore files.
    respect_gitignore: bool,

    /// Optional glob filter pattern.
    filter: Option<glob::Pattern>,
}

impl SourceScanner {
    /// Create a new scanner for the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            respect_gitignore: true,
            filter: None,
        }
    }

    /// Set whether to respect .gitignore files.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Set a glob filter pattern; only matching files are included.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.filter = Some(glob_pattern);
        Ok(self)
    }

    /// Scan the directory and return all discovered Rust files.
    pub fn scan(&self) -> CliResult<Vec<SourceFile>> {
        if !self.root.exists() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .hidden(false)
            .build();

        for entry in walker {
            let entry = entry.map_err(ScanError::Walk)?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if path.extension().map_or(true, |ext| ext != "rs") {
                continue;
            }
            // Never re-scan our own output.
            if path.to_string_lossy().ends_with(".generated.rs") {
                continue;
            }

            if let Some(ref pattern) = self.filter {
                let relative = self.relative_path(path);
                if !pattern.matches_path(&relative) {
                    continue;
                }
            }

            let content = std::fs::read_to_string(path).map_err(|e| ScanError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

            files.push(SourceFile {
                path: path.to_path_buf(),
                relative_path: self.relative_path(path),
                content,
            });
        }

        if files.is_empty() {
            return Err(ScanError::no_rust_files(self.root.clone()).into());
        }

        Ok(files)
    }

    /// Scan without failing on empty results.
    ///
    /// Used by watch reruns, where an empty tree is not fatal.
    pub fn scan_allow_empty(&self) -> CliResult<Vec<SourceFile>> {
        match self.scan() {
            Ok(files) => Ok(files),
            Err(crate::error::CliError::Scan(ScanError::NoRustFiles { .. })) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Get the relative path from root.
    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("lib.rs"), "pub mod shop;").unwrap();

        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/shop.rs"), "pub struct Order;").unwrap();
        fs::write(dir.path().join("src/views.rs"), "pub struct OrderView;").unwrap();

        fs::write(dir.path().join("README.md"), "# Test").unwrap();
        fs::write(
            dir.path().join("src/order_dto.generated.rs"),
            "pub struct OrderDto {}",
        )
        .unwrap();

        dir
    }

    #[test]
    fn finds_all_rust_files() {
        let dir = create_test_dir();
        let files = SourceScanner::new(dir.path()).scan().unwrap();

        assert_eq!(files.len(), 4);

        let paths: Vec<_> = files
            .iter()
            .map(|f| f.relative_path.to_string_lossy().to_string())
            .collect();
        assert!(paths.iter().any(|p| p.ends_with("main.rs")));
        assert!(paths.iter().any(|p| p.contains("shop.rs")));
    }

    #[test]
    fn skips_non_rust_and_generated_files() {
        let dir = create_test_dir();
        let files = SourceScanner::new(dir.path()).scan().unwrap();

        for file in &files {
            assert!(file.path.extension().is_some_and(|ext| ext == "rs"));
            assert!(!file.path.to_string_lossy().ends_with(".generated.rs"));
        }
    }

    #[test]
    fn filter_narrows_the_scan() {
        let dir = create_test_dir();
        let scanner = SourceScanner::new(dir.path())
            .with_filter("**/shop.rs")
            .unwrap();

        let files = scanner.scan().unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].relative_path.to_string_lossy().contains("shop.rs"));
    }

    #[test]
    fn invalid_filter_pattern_errors() {
        let result = SourceScanner::new(".").with_filter("[invalid");
        assert!(matches!(result, Err(ScanError::InvalidPattern { .. })));
    }

    #[test]
    fn nonexistent_directory_errors() {
        let result = SourceScanner::new("/nonexistent/path").scan();

        assert!(matches!(
            result.unwrap_err(),
            crate::error::CliError::Scan(ScanError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn empty_directory_errors_unless_allowed() {
        let dir = TempDir::new().unwrap();
        let scanner = SourceScanner::new(dir.path());

        assert!(matches!(
            scanner.scan().unwrap_err(),
            crate::error::CliError::Scan(ScanError::NoRustFiles { .. })
        ));
        assert!(scanner.scan_allow_empty().unwrap().is_empty());
    }

    #[test]
    fn content_is_read_during_scan() {
        let dir = create_test_dir();
        let files = SourceScanner::new(dir.path()).scan().unwrap();

        let main = files
            .iter()
            .find(|f| f.relative_path.to_string_lossy().ends_with("main.rs"))
            .unwrap();
        assert_eq!(main.content, "fn main() {}");
    }
}
