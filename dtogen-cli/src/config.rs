//! Configuration management for the CLI.
//!
//! Loads `dtogen.toml`, merges command-line overrides, and carries the
//! free-standing `[[generate]]` directives that request synthesis without an
//! annotated type.

use crate::error::{CliResult, ConfigError};
use dtogen_core::DtoOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "dtogen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Scan configuration.
    pub scan: ScanConfig,

    /// Free-standing request directives.
    ///
    /// These have no invoking context: no name/module inheritance and no
    /// override hooks, exactly like a request issued away from any type.
    #[serde(rename = "generate")]
    pub directives: Vec<DtoOptions>,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,
}

/// Scan configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Input directory containing Rust source files.
    pub input: PathBuf,

    /// Whether to respect .gitignore files.
    pub respect_gitignore: bool,

    /// Optional glob filter for scanned files.
    pub filter: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            respect_gitignore: true,
            filter: None,
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref input) = args.input {
            config.scan.input = input.clone();
        }

        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref filter) = args.filter {
            config.scan.filter = Some(filter.clone());
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# dtogen configuration file

[output]
# Output directory for generated files (<target>.generated.rs per request)
dir = "./generated"

[scan]
# Input directory containing Rust source files
input = "."

# Whether to respect .gitignore files while scanning
respect_gitignore = true

# Optional glob filter for scanned files
# filter = "src/**/*.rs"

# Free-standing request directives. Each table is one synthesis request
# without an invoking type; recognized keys match the #[dto(...)] options.
#
# [[generate]]
# source = "crate::shop::Order"
# name = "OrderExport"
# exclude = ["internal"]
# make_optional = true
# required = ["id"]
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Input directory override.
    pub input: Option<PathBuf>,

    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Scan filter override.
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert_eq!(config.scan.input, PathBuf::from("."));
        assert!(config.scan.respect_gitignore);
        assert_eq!(config.scan.filter, None);
        assert!(config.directives.is_empty());
    }

    #[test]
    fn merge_cli_args_overrides() {
        let config = Config::default();
        let args = CliArgs {
            input: Some(PathBuf::from("./src")),
            output: Some(PathBuf::from("./custom")),
            filter: Some("**/*.rs".to_string()),
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.scan.input, PathBuf::from("./src"));
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
        assert_eq!(merged.scan.filter.as_deref(), Some("**/*.rs"));
    }

    #[test]
    fn merge_cli_args_preserves_unset() {
        let config = Config::default();
        let merged = ConfigManager::merge_cli_args(config, &CliArgs::default());

        assert_eq!(merged.output.dir, PathBuf::from("./generated"));
        assert_eq!(merged.scan.input, PathBuf::from("."));
    }

    #[test]
    fn parses_toml_with_directives() {
        let toml = r#"
[output]
dir = "./out"

[scan]
input = "./src"
respect_gitignore = false
filter = "**/models.rs"

[[generate]]
source = "crate::shop::Order"
name = "OrderExport"
exclude = ["internal"]

[[generate]]
source = "crate::shop::Customer"
make_optional = true
required = ["id"]
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./out"));
        assert!(!config.scan.respect_gitignore);
        assert_eq!(config.directives.len(), 2);
        assert_eq!(config.directives[0].source, "crate::shop::Order");
        assert_eq!(config.directives[0].name.as_deref(), Some("OrderExport"));
        assert!(config.directives[1].make_optional);
        assert_eq!(config.directives[1].required, vec!["id"]);
    }

    #[test]
    fn default_content_parses_back() {
        let config: Config = toml::from_str(ConfigManager::default_config_content()).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert!(config.directives.is_empty());
    }
}
