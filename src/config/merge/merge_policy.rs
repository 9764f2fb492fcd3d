//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources replace earlier ones key by key. `categories` is an array,
//! so a file that declares it replaces the built-in layout entirely.

use crate::schedule::DEFAULT_MIN_SPACING_SECS;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Ok(Config::builder()
        .set_default("schedule.enabled", false)?
        .set_default("schedule.window_hours", 24)?
        .set_default("schedule.min_spacing_secs", DEFAULT_MIN_SPACING_SECS)?
        .set_default("run.random_for_each_account", true)?
        .set_default("accounts.keys_file", "data/private_keys.txt")?)
}
