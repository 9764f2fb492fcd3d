//! Workspace config files: `config/config.toml`, then `config/{LAUNCHPLAN_ENV}.toml`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

const DEFAULT_ENV: &str = "development";

/// Workspace files in merge order; later files override earlier ones.
pub fn workspace_config_paths(workspace_root: &Path) -> [PathBuf; 2] {
    let env_name = std::env::var("LAUNCHPLAN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ]
}

/// Add the workspace files that exist to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(workspace_config_paths(workspace_root)
        .into_iter()
        .filter(|path| path.exists())
        .fold(builder, |builder, path| {
            builder.add_source(File::from(path).required(false))
        }))
}
