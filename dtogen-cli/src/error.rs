//! Error types for the CLI.
//!
//! Host-side failures carry a structured taxonomy; the core deliberately has
//! none (a bad request degrades to "no output"), so everything here is about
//! I/O, scanning, parsing, and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error during source file scanning.
    #[error("Failed to scan directory: {0}")]
    Scan(#[from] ScanError),

    /// Error during descriptor extraction.
    #[error("Failed to extract types: {0}")]
    Extract(#[from] ExtractError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Error during file watching.
    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),

    /// Validation failed (generated files out of date).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during source file scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Directory does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// No Rust files found in directory.
    #[error("No Rust files found in: {path}")]
    NoRustFiles { path: PathBuf },

    /// Invalid filter pattern.
    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO error during scanning.
    #[error("IO error scanning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from ignore crate walker.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Error during descriptor extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Syntax error in Rust source.
    #[error("Syntax error in {file}: {message}")]
    Syntax { file: PathBuf, message: String },

    /// Malformed `#[dto(...)]` request options.
    #[error("Invalid #[dto(...)] options on '{item}' in {file}: {message}")]
    InvalidOptions {
        file: PathBuf,
        item: String,
        message: String,
    },

    /// A request names a source type the index does not know.
    #[error("Request on '{item}' names unknown source type '{source_name}'")]
    UnknownSource { item: String, source_name: String },

    /// Multiple extraction errors collected.
    #[error("Multiple extraction errors:\n{}", format_errors(.0))]
    Multiple(Vec<ExtractError>),
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Config file already present and `--force` was not given.
    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error during file watching.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize watcher.
    #[error("Failed to initialize file watcher: {0}")]
    Init(String),

    /// Error from notify crate.
    #[error("Watch notification error: {0}")]
    Notify(String),
}

/// Format multiple errors for display.
fn format_errors(errors: &[ExtractError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("  {}. {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ExtractError {
    /// Create a syntax error for a file that failed to parse.
    pub fn syntax(file: PathBuf, message: impl Into<String>) -> Self {
        Self::Syntax {
            file,
            message: message.into(),
        }
    }

    /// Create an invalid-options error for an annotated item.
    pub fn invalid_options(
        file: PathBuf,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidOptions {
            file,
            item: item.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-source error for a request.
    pub fn unknown_source(item: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::UnknownSource {
            item: item.into(),
            source_name: source_name.into(),
        }
    }
}

impl ScanError {
    /// Create a directory not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }

    /// Create a no Rust files error.
    pub fn no_rust_files(path: PathBuf) -> Self {
        Self::NoRustFiles { path }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }
}
