//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// csvcat - concatenate a folder of messy CSV files into one
///
/// Reads every .csv file in the input directory, trying a fixed list of
/// text encodings and auto-detecting the field delimiter per file, then
/// merges the readable files into a single comma-delimited UTF-8 (BOM)
/// CSV with a source_file provenance column.
///
/// Examples:
///   csvcat data
///   csvcat data -o output/concatenated.csv
///   csvcat exports --report run.json --strict
///   csvcat data --dry-run
///   csvcat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing the CSV files to concatenate
    ///
    /// Defaults to "data" (or the value from .csvcat.toml).
    #[arg(value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output file path for the combined CSV
    ///
    /// Defaults to "output/concatenated.csv" (or the value from
    /// .csvcat.toml). Parent directories are created if absent.
    #[arg(short, long, value_name = "FILE", env = "CSVCAT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .csvcat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// List the files that would be read, without reading them
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with code 2 if any file could not be read
    ///
    /// Useful for CI pipelines. By default partial failures still
    /// terminate with exit code 0.
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .csvcat.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate the input directory if provided (the config default is
        // checked later, once the config is loaded)
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Input directory does not exist: {}", input.display()));
            }
            if !input.is_dir() {
                return Err(format!("Input path is not a directory: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: None,
            output: None,
            report: None,
            config: None,
            dry_run: false,
            strict: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_input_directory() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("/definitely/not/a/real/directory"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_skipped_for_init_config() {
        let mut args = make_args();
        args.init_config = true;
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
