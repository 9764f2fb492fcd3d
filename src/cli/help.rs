//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log fields (e.g. "plan", "simulate").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Plan { .. } => "plan",
        Commands::Schedule { .. } => "schedule",
        Commands::Manifest { .. } => "manifest",
        Commands::Simulate { .. } => "simulate",
        Commands::Validate => "validate",
        Commands::Defaults => "defaults",
    }
}
