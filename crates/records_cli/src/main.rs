mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use records_core::DEFAULT_MAX_DEPTH;
use records_validator::{DEFAULT_SCHEMA_DIR, MAX_DEPTH_ENV, SCHEMA_DIR_ENV, ValidatorConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rcv")]
#[command(version, about = "Record schema validator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing schema documents
    #[arg(long, global = true, env = SCHEMA_DIR_ENV, default_value = DEFAULT_SCHEMA_DIR)]
    schema_dir: PathBuf,

    /// Maximum nesting depth for schemas and records
    #[arg(long, global = true, env = MAX_DEPTH_ENV, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON record against a schema
    Validate {
        /// Path to the record file (JSON)
        record: PathBuf,

        /// Schema name, relative to the schema directory
        #[arg(short, long)]
        schema: String,

        /// Which check to run
        #[arg(short, long, value_enum, default_value_t = CheckKind::All)]
        check: CheckKind,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load a schema and print a summary of it
    Check {
        /// Schema name, relative to the schema directory
        schema: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Checks selectable with `validate --check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckKind {
    /// Every check, as one report
    All,
    /// Top-level required fields only
    Required,
    /// Declared types
    Types,
    /// Patterns and named formats
    Format,
    /// Allowed values and numeric bounds
    Constraints,
}

/// Output formats for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let config = ValidatorConfig::builder()
        .schema_dir(cli.schema_dir)
        .max_depth(cli.max_depth)
        .build()
        .context("Invalid validator configuration")?;

    // Execute command
    match cli.command {
        Commands::Validate {
            record,
            schema,
            check,
            format,
        } => commands::validate::execute(config, &record, &schema, check, format),

        Commands::Check { schema, format } => commands::check::execute(config, &schema, format),
    }
}
