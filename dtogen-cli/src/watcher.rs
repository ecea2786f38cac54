//! File watcher for development mode.
//!
//! Watches the scan root and yields debounced change events for Rust source
//! files so the generate command can rerun synthesis on save. Generated
//! outputs are filtered out to keep writes from retriggering the loop.

use crate::error::{CliResult, WatchError};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Event types for file changes.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// A file was modified or created.
    Modified(PathBuf),
    /// A file was deleted.
    Deleted(PathBuf),
    /// An error occurred.
    Error(String),
}

/// File watcher for monitoring Rust source files.
pub struct FileWatcher {
    /// Root directory to watch.
    root: PathBuf,
    /// Debounce duration in milliseconds.
    debounce_ms: u64,
}

impl FileWatcher {
    /// Create a new file watcher for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            debounce_ms: 500,
        }
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Start watching for file changes.
    ///
    /// Returns the debouncer (drop it to stop watching) and a receiver that
    /// yields events for `.rs` files under the root.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        let path = event.path;
                        if !is_source_file(&path) {
                            continue;
                        }

                        let watch_event = if path.exists() {
                            WatchEvent::Modified(path)
                        } else {
                            WatchEvent::Deleted(path)
                        };

                        let _ = tx.send(watch_event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Init(e.to_string()))?;

        Ok((debouncer, rx))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Rust source files only, minus our own generated outputs.
fn is_source_file(path: &Path) -> bool {
    if path.extension().map_or(true, |ext| ext != "rs") {
        return false;
    }
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| !n.ends_with(".generated.rs"))
}

impl WatchEvent {
    /// Get the path associated with this event.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error(_))
    }

    /// Get the error message if this is an error event.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_event_path() {
        let path = PathBuf::from("/test/file.rs");

        let modified = WatchEvent::Modified(path.clone());
        assert_eq!(modified.path(), Some(path.as_path()));

        let deleted = WatchEvent::Deleted(path.clone());
        assert_eq!(deleted.path(), Some(path.as_path()));

        let error = WatchEvent::Error("test error".to_string());
        assert_eq!(error.path(), None);
    }

    #[test]
    fn watch_event_error_accessors() {
        let modified = WatchEvent::Modified(PathBuf::from("/test"));
        assert!(!modified.is_error());
        assert_eq!(modified.error_message(), None);

        let error = WatchEvent::Error("test error".to_string());
        assert!(error.is_error());
        assert_eq!(error.error_message(), Some("test error"));
    }

    #[test]
    fn filters_non_source_files() {
        assert!(is_source_file(Path::new("/src/models.rs")));
        assert!(!is_source_file(Path::new("/src/models.ts")));
        assert!(!is_source_file(Path::new("/src/Makefile")));
        assert!(!is_source_file(Path::new("/generated/order_dto.generated.rs")));
    }

    #[test]
    fn watcher_defaults() {
        let watcher = FileWatcher::new("/test/path");
        assert_eq!(watcher.root(), Path::new("/test/path"));
        assert_eq!(watcher.debounce_ms, 500);

        let watcher = watcher.with_debounce(1000);
        assert_eq!(watcher.debounce_ms, 1000);
    }
}
