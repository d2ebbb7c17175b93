//! Crosswalk CLI: compare institutional learning outcomes against a reference
//! framework from the terminal.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Crosswalk: learning-outcome alignment against a reference framework
#[derive(Parser, Debug)]
#[command(name = "crosswalk", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (holds `.crosswalk/config.toml`)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compare institutional statements against the reference framework
    Compare {
        /// File with one statement per line ("-" reads stdin)
        input: Option<PathBuf>,
        /// Statement given inline (repeatable)
        #[arg(short, long = "statement")]
        statements: Vec<String>,
        /// Export format instead of the summary: json or csv
        #[arg(short, long)]
        format: Option<String>,
        /// Write the export to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Force lexical similarity regardless of configuration
        #[arg(long)]
        lexical: bool,
    },
    /// Score a single pair of statements
    Similarity {
        /// Institutional statement
        institutional: String,
        /// Reference statement
        reference: String,
        /// Force lexical similarity regardless of configuration
        #[arg(long)]
        lexical: bool,
    },
    /// Print the reference framework
    Framework {
        /// Print as JSON instead of an outline
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create default configuration file
    Init,
    /// Show current configuration
    Show,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    // Human-readable layer for stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer for structured logging
    let log_dir = crosswalk_core::config::log_dir().unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "crosswalk.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    commands::handle_command(cli.command, &workspace)
}
