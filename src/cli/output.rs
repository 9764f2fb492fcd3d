//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::LaunchError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &LaunchError) -> String {
    match e {
        LaunchError::ConfigError(msg) => format!("Configuration error: {}", msg),
        other => other.to_string(),
    }
}
