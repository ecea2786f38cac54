//! # dtogen-cli
//!
//! CLI library for generating derived transfer types from Rust source files.
//!
//! This crate is the host around `dtogen-core`: it discovers source files,
//! extracts type descriptors and synthesis requests from them, drives the
//! synthesizer, and writes the generated units to disk.
//!
//! ## Architecture
//!
//! - [`config`] - `dtogen.toml` loading and CLI-argument merging
//! - [`scanner`] - source file discovery and filtering
//! - [`extract`] - the metadata facility: type indexing, descriptor
//!   construction, and request collection
//! - [`generator`] - batch driving of the core synthesizer
//! - [`writer`] - file output with dry-run and unchanged detection
//! - [`watcher`] - file system watching for development mode
//! - [`error`] - error types and handling

pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod scanner;
pub mod watcher;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use extract::{Extraction, Extractor, TypeIndex};
pub use generator::DtoGenerator;
pub use scanner::{SourceFile, SourceScanner};
pub use watcher::FileWatcher;
pub use writer::{FileWriter, WriteResult};
