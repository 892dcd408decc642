//! csvcat - robust CSV directory concatenation
//!
//! Reads every `.csv` file in an input directory, trying multiple text
//! encodings and sniffing the field delimiter per file, then concatenates
//! the readable files into a single UTF-8 (BOM) comma-delimited CSV with a
//! `source_file` provenance column.
//!
//! Exit codes:
//!   0 - Normal termination (including per-file read failures, an empty
//!       input directory, or nothing readable)
//!   1 - Runtime error (bad input directory, config error, write failure)
//!   2 - --strict and at least one file could not be read

mod aggregate;
mod cli;
mod config;
mod merge;
mod models;
mod reader;
mod report;
mod scanner;
mod writer;

use anyhow::{bail, Context, Result};
use cli::Args;
use config::Config;
use models::RunOutcome;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("csvcat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the concatenation
    match run(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .csvcat.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".csvcat.toml");

    if path.exists() {
        eprintln!("⚠️  .csvcat.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .csvcat.toml")?;

    println!("✅ Created .csvcat.toml with default settings.");
    println!("   Edit it to customize paths, sniffing, and the delimiter list.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete concatenation workflow. Returns exit code (0 or 2).
fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input_dir = PathBuf::from(&config.general.input);
    let output_path = PathBuf::from(&config.general.output);

    if !input_dir.is_dir() {
        bail!("input path is not a directory: {}", input_dir.display());
    }

    // Handle --dry-run: list candidate files and exit
    if args.dry_run {
        return handle_dry_run(&input_dir);
    }

    let options = aggregate::AggregateOptions {
        input_dir,
        output_path,
        reader: config.reader_options()?,
        show_progress: !args.quiet,
    };

    let report = aggregate::run(&options)?;

    // Console summary
    print!("{}", report::generate_text_summary(&report));

    // Optional machine-readable run report
    if let Some(ref path) = config.report.path {
        let path = Path::new(path);
        report::write_json_report(&report, path)?;
        println!("📝 Run report saved to: {}", path.display());
    }

    // Check --strict
    if args.strict && !report.failures.is_empty() {
        eprintln!(
            "\n⛔ {} file(s) could not be read. Failing (exit code 2).",
            report.failures.len()
        );
        return Ok(2);
    }

    if matches!(report.outcome, RunOutcome::Written { .. }) && !report.failures.is_empty() {
        warn!("{} of {} files were skipped", report.failures.len(), report.metadata.files_found);
    }

    Ok(0)
}

/// Handle --dry-run: list the files that would be read, then exit.
fn handle_dry_run(input_dir: &Path) -> Result<i32> {
    println!("\n🔍 Dry run: listing candidate files (nothing will be read)...\n");

    let files = scanner::discover(input_dir)?;

    if files.is_empty() {
        println!("   No CSV files found in {}", input_dir.display());
    } else {
        for file in &files {
            println!("     📄 {}", file.display());
        }
        println!("\n   Total: {} files", files.len());
    }

    println!("\n✅ Dry run complete. No files were read.");
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .csvcat.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
