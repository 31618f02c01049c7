//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// DataReport - summary reports for CSV, spreadsheet, JSON and text files
///
/// Reads input files from the data directory and writes plain-text
/// reports to the processed directory. Without arguments every processor
/// runs with its built-in defaults.
///
/// Examples:
///   datareport
///   datareport csv json
///   datareport --data-dir ./inputs --output-dir ./reports text
///   datareport --config reports.toml --fail-on-input-error
///   datareport --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Processors to run, in order (default: all)
    #[arg(value_name = "PROCESSOR")]
    pub processors: Vec<ProcessorKind>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .datareport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to read input files from
    #[arg(long, value_name = "DIR", env = "DATAREPORT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory to write reports to
    #[arg(long, value_name = "DIR", env = "DATAREPORT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip the report and exit non-zero when an input cannot be read
    ///
    /// By default an unreadable input still produces an (empty) report.
    #[arg(long)]
    pub fail_on_input_error: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .datareport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// One of the independent file processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProcessorKind {
    /// Numeric statistics over a CSV column
    Csv,
    /// Word occurrences in spreadsheet columns
    Excel,
    /// Labels grouped by key from a JSON document
    Json,
    /// Word occurrences in a text file
    Text,
}

impl ProcessorKind {
    pub const ALL: [ProcessorKind; 4] = [
        ProcessorKind::Csv,
        ProcessorKind::Excel,
        ProcessorKind::Json,
        ProcessorKind::Text,
    ];
}

impl fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorKind::Csv => write!(f, "CSV"),
            ProcessorKind::Excel => write!(f, "Excel"),
            ProcessorKind::Json => write!(f, "JSON"),
            ProcessorKind::Text => write!(f, "text"),
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                return Err(format!(
                    "Config file does not exist: {}",
                    config_path.display()
                ));
            }
        }

        if let Some(ref data_dir) = self.data_dir {
            if data_dir.exists() && !data_dir.is_dir() {
                return Err(format!(
                    "Data path is not a directory: {}",
                    data_dir.display()
                ));
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

    /// Processors to run, without duplicates; all of them when none were named.
    pub fn selected_processors(&self) -> Vec<ProcessorKind> {
        if self.processors.is_empty() {
            return ProcessorKind::ALL.to_vec();
        }

        let mut selected = Vec::new();
        for kind in &self.processors {
            if !selected.contains(kind) {
                selected.push(*kind);
            }
        }
        selected
    }
}
