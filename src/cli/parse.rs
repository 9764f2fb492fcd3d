//! CLI parse: clap types for launchplan. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Launchplan CLI - Randomized task plans and staggered account launches
#[derive(Parser)]
#[command(name = "launchplan")]
#[command(about = "Randomized per-account task plans and staggered launch schedules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate task plans for the selected accounts
    Plan {
        /// Use accounts 1..=N instead of the configured selection
        #[arg(long)]
        accounts: Option<usize>,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Compute launch offsets across the window
    Schedule {
        /// Window length in hours (enables scheduling for this call)
        #[arg(long)]
        hours: Option<u64>,
        /// Use accounts 1..=N instead of the configured selection
        #[arg(long)]
        accounts: Option<usize>,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a run manifest with every plan and start offset
    Manifest {
        /// Manifest file to write
        #[arg(long)]
        output: PathBuf,
        /// Window length in hours (enables scheduling for this call)
        #[arg(long)]
        hours: Option<u64>,
        /// Use accounts 1..=N instead of the configured selection
        #[arg(long)]
        accounts: Option<usize>,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run plans with the dry-run executor
    Simulate {
        /// Run an existing manifest instead of preparing a new run
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Divide every start offset by this factor
        #[arg(long, default_value = "3600")]
        speedup: u32,
        /// Use accounts 1..=N instead of the configured selection
        #[arg(long)]
        accounts: Option<usize>,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate the loaded configuration
    Validate,
    /// Print the built-in configuration as TOML
    Defaults,
}
