//! # dtogen
//!
//! CLI tool for synthesizing derived transfer types from annotated Rust
//! source files.
//!
//! ## Usage
//!
//! ```bash
//! # Generate derived types from the current directory
//! dtogen generate
//!
//! # Generate into a specific output directory
//! dtogen generate --output ./generated
//!
//! # Watch mode for development
//! dtogen generate --watch
//!
//! # Dry run to preview changes
//! dtogen generate --dry-run
//!
//! # Initialize configuration
//! dtogen init
//!
//! # Validate generated files are up-to-date
//! dtogen validate
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use dtogen_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    error::{CliError, ConfigError},
    extract::Extractor,
    generator::DtoGenerator,
    scanner::SourceScanner,
    watcher::FileWatcher,
    writer::{duplicate_targets, FileWriter, WriteResult},
};
use dtogen_core::SourceUnit;

#[derive(Parser)]
#[command(name = "dtogen")]
#[command(author, version, about = "Synthesize derived transfer types from Rust sources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate derived types from annotated Rust source files
    Generate {
        /// Input directory containing Rust source files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Watch for file changes and regenerate
        #[arg(short, long)]
        watch: bool,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter source files by path pattern (glob)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Initialize a new dtogen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that generated files are up-to-date
    Validate {
        /// Input directory containing Rust source files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory holding generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            watch,
            dry_run,
            config,
            filter,
        } => cmd_generate(input, output, watch, dry_run, config, filter),

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Validate {
            input,
            output,
            config,
        } => cmd_validate(input, output, config),
    }
}

/// Generate command implementation.
fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    watch: bool,
    dry_run: bool,
    config_path: Option<PathBuf>,
    filter: Option<String>,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            input,
            output,
            filter,
        },
    );

    if watch {
        run_watch_mode(&config, dry_run)
    } else {
        run_generate(&config, dry_run, false)
    }
}

/// The scan/extract/synthesize pipeline, shared by generate and validate.
///
/// `allow_empty` relaxes the no-files scan error for watch reruns, where
/// the tree may legitimately be empty between edits.
fn synthesize_units(config: &Config, allow_empty: bool) -> Result<Vec<SourceUnit>, CliError> {
    println!("{}", "Scanning for Rust source files...".cyan());

    let mut scanner = SourceScanner::new(&config.scan.input)
        .with_gitignore(config.scan.respect_gitignore);
    if let Some(pattern) = config.scan.filter.as_deref() {
        scanner = scanner.with_filter(pattern)?;
    }

    let files = if allow_empty {
        scanner.scan_allow_empty()?
    } else {
        scanner.scan()?
    };
    if files.is_empty() {
        println!("{}", "No Rust files found.".yellow());
        return Ok(Vec::new());
    }

    println!("  Found {} Rust file(s)", files.len().to_string().green());

    println!("{}", "Extracting #[dto(...)] requests...".cyan());

    let extraction = Extractor::new().extract(&files);

    if !extraction.errors.is_empty() {
        println!(
            "{} {} parse error(s):",
            "Warning:".yellow(),
            extraction.errors.len()
        );
        for error in &extraction.errors {
            println!("  {}", error);
        }
    }
    for warning in &extraction.skipped {
        println!("{} {}", "Warning:".yellow(), warning);
    }

    let generator = DtoGenerator::new();
    let (mut requests, warnings) =
        generator.directive_requests(&extraction.index, &config.directives);
    for warning in &warnings {
        println!("{} {}", "Warning:".yellow(), warning);
    }
    let mut all_requests = extraction.requests;
    all_requests.append(&mut requests);

    if all_requests.is_empty() {
        println!("{}", "No synthesis requests found.".yellow());
        return Ok(Vec::new());
    }

    println!(
        "  Found {} request(s)",
        all_requests.len().to_string().green()
    );

    println!("{}", "Synthesizing derived types...".cyan());

    let output = generator.generate(&all_requests);
    for source in &output.skipped {
        println!(
            "{} Skipped request on {} (unsupported source kind)",
            "Warning:".yellow(),
            source
        );
    }
    for name in duplicate_targets(&output.units) {
        println!(
            "{} Multiple requests produce {}; the last one wins",
            "Warning:".yellow(),
            name
        );
    }

    println!(
        "  Generated {} derived type(s)",
        output.units.len().to_string().green()
    );

    Ok(output.units)
}

/// Run synthesis once and write the results.
fn run_generate(config: &Config, dry_run: bool, allow_empty: bool) -> Result<(), CliError> {
    let units = synthesize_units(config, allow_empty)?;

    let writer = FileWriter::new(dry_run);
    for unit in &units {
        match writer.write_unit(&config.output.dir, unit)? {
            WriteResult::Written { path, bytes } => {
                println!(
                    "{} Written {} bytes to {}",
                    "✓".green(),
                    bytes,
                    path.display()
                );
            }
            WriteResult::Unchanged { path } => {
                println!("{} Up-to-date: {}", "✓".green(), path.display());
            }
            WriteResult::DryRun { content, path } => {
                println!(
                    "{} Would write to {}:",
                    "[dry-run]".yellow(),
                    path.display()
                );
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    Ok(())
}

/// Run in watch mode.
fn run_watch_mode(config: &Config, dry_run: bool) -> Result<(), CliError> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", config.scan.input.display());
    println!("  Press Ctrl+C to stop\n");

    run_generate(config, dry_run, true)?;

    let watcher = FileWatcher::new(&config.scan.input);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if event.is_error() {
            println!(
                "{} {}",
                "Watch error:".red(),
                event.error_message().unwrap_or("Unknown error")
            );
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        if let Err(e) = run_generate(config, dry_run, true) {
            println!("{} {}", "Generation error:".red(), e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(ConfigError::AlreadyExists { path: output }.into());
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Validate command implementation.
///
/// Re-runs synthesis and compares each unit against the file on disk.
fn cmd_validate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    println!("{}", "Validating generated files...".cyan());

    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            input,
            output,
            filter: None,
        },
    );

    let units = synthesize_units(&config, true)?;

    let mut stale = Vec::new();
    for unit in &units {
        let path = FileWriter::unit_path(&config.output.dir, unit);
        match std::fs::read_to_string(&path) {
            Ok(existing) if existing == unit.content => {}
            _ => stale.push(path),
        }
    }

    if stale.is_empty() {
        println!("{} Generated files are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} Generated files are out of date:", "✗".red());
        for path in &stale {
            println!("  {}", path.display());
        }
        println!("  Run 'dtogen generate' to update");
        Err(CliError::Validation(format!(
            "{} generated file(s) out of date",
            stale.len()
        )))
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
