//! `launchplan` executable: parses flags, installs the subscriber, runs one command.

use clap::Parser;
use launchplan::cli::{map_error, Cli, RunContext};
use launchplan::config::ConfigLoader;
use launchplan::error::LaunchError;
use launchplan::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use std::process::ExitCode;
use tracing::{debug, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(Some(&logging_for(&cli))) {
        eprintln!("launchplan: cannot start logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!(error = %e, "launchplan exited with an error");
            eprintln!("{}", map_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, LaunchError> {
    let context = RunContext::new(cli.workspace.clone(), cli.config.clone())?;
    debug!(workspace = %cli.workspace.display(), "configuration loaded");
    context.execute(&cli.command)
}

/// Logging section of the loaded configuration with command-line flags applied on top.
/// An unreadable configuration falls back to built-in logging; `run` reports the real error.
fn logging_for(cli: &Cli) -> LoggingConfig {
    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.workspace),
    };
    let mut logging = loaded.map(|c| c.logging).unwrap_or_default();
    apply_flags(cli, &mut logging);
    logging
}

fn apply_flags(cli: &Cli, logging: &mut LoggingConfig) {
    logging.enabled &= !cli.quiet;
    if cli.verbose {
        logging.level = "debug".into();
    }
    for (flag, field) in [
        (&cli.log_level, &mut logging.level),
        (&cli.log_format, &mut logging.format),
        (&cli.log_output, &mut logging.output),
    ] {
        if let Some(value) = flag {
            field.clone_from(value);
        }
    }

    logging.file = if logging.enabled && logging.output == "file" {
        Some(resolve_log_file_path(cli.log_file.clone(), logging.file.take()))
    } else {
        cli.log_file.clone().or(logging.file.take())
    };
}
