//! import-fence CLI tool.
//!
//! Usage:
//! ```bash
//! import-fence check --from src/repositories --deny src/db
//! import-fence check --from src/repositories --deny src/db --tsconfig web/tsconfig.json --format json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Folder-level dependency conformance checker for TypeScript/JavaScript projects
#[derive(Parser)]
#[command(name = "import-fence")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the governing tsconfig file
    #[arg(short, long, global = true, default_value = import_fence_core::DEFAULT_TSCONFIG)]
    tsconfig: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that one folder does not depend on another
    Check {
        /// Folder whose files are scanned, relative to the tsconfig directory
        #[arg(long)]
        from: String,

        /// Forbidden folder, relative to the tsconfig directory
        #[arg(long)]
        deny: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check { from, deny, format } => {
            commands::check::run(from, deny, &cli.tsconfig, format)
        }
    }
}
