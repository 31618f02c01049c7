//! DataReport - summary reports for tabular, spreadsheet, JSON and text files
//!
//! A CLI tool that runs independent file processors, each reading one
//! input file and writing one plain-text report.
//!
//! Exit codes:
//!   0 - Success (including empty reports for unreadable inputs)
//!   1 - Configuration error, report write failure, or an unreadable
//!       input with --fail-on-input-error

mod analysis;
mod cli;
mod config;
mod diagnostics;
mod error;
mod models;
mod processors;
mod report;
mod sources;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use diagnostics::TracingSink;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("DataReport v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .datareport.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  .datareport.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .datareport.toml")?;

    println!("✅ Created .datareport.toml with default settings.");
    println!("   Edit it to customize directories, fields, columns and words.");
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

/// Run every selected processor. Returns the exit code (0 or 1).
fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate().context("Invalid configuration")?;

    debug!(
        "Data directory: {}, output directory: {}, on input error: {:?}",
        config.general.data_dir.display(),
        config.general.processed_dir.display(),
        config.general.on_input_error
    );

    let sink = TracingSink;
    let mut failed = Vec::new();

    for kind in args.selected_processors() {
        info!("Starting {} processing...", kind);

        match processors::run(kind, &config, &sink) {
            Ok(output) => {
                info!("{} processing complete.", kind);
                if !args.quiet {
                    println!("📄 {} report: {}", kind, output.display());
                }
            }
            Err(e) => {
                error!("{} processing failed: {:#}", kind, e);
                failed.push(kind);
            }
        }
    }

    if failed.is_empty() {
        Ok(0)
    } else {
        eprintln!("\n⛔ Failed processors: {:?}", failed);
        Ok(1)
    }
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
            info!("Loaded default config from {}", config::DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
