//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.csvcat.toml` files.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::reader::{sniff, ReaderOptions};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Reader settings.
    #[serde(default)]
    pub reader: ReaderConfig,

    /// Run report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Input directory scanned for CSV files.
    #[serde(default = "default_input")]
    pub input: String,

    /// Output path for the combined CSV.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_input() -> String {
    "data".to_string()
}

fn default_output() -> String {
    "output/concatenated.csv".to_string()
}

/// Robust reader settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Number of lines sampled for delimiter inference.
    #[serde(default = "default_sniff_lines")]
    pub sniff_lines: usize,

    /// Recognized field delimiters, each a single character.
    #[serde(default = "default_delimiters")]
    pub delimiters: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            sniff_lines: default_sniff_lines(),
            delimiters: default_delimiters(),
        }
    }
}

fn default_sniff_lines() -> usize {
    sniff::DEFAULT_SNIFF_LINES
}

fn default_delimiters() -> Vec<String> {
    sniff::DEFAULT_DELIMITERS
        .iter()
        .map(|&d| (d as char).to_string())
        .collect()
}

/// Run report settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Path for the JSON run report; not written when absent.
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".csvcat.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only values
    /// the user actually supplied override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.general.input = input.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(ref report) = args.report {
            self.report.path = Some(report.display().to_string());
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Build validated reader options from the `[reader]` section.
    pub fn reader_options(&self) -> Result<ReaderOptions> {
        ensure!(
            !self.reader.delimiters.is_empty(),
            "recognized delimiter list must not be empty"
        );
        ensure!(
            self.reader.sniff_lines > 0,
            "sniff_lines must be at least 1"
        );

        let mut delimiters = Vec::with_capacity(self.reader.delimiters.len());
        for delimiter in &self.reader.delimiters {
            let bytes = delimiter.as_bytes();
            ensure!(
                bytes.len() == 1,
                "delimiter {:?} must be a single ASCII character",
                delimiter
            );
            delimiters.push(bytes[0]);
        }

        Ok(ReaderOptions {
            delimiters,
            sniff_lines: self.reader.sniff_lines,
        })
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
