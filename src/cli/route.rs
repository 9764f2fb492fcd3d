//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::accounts::first_accounts;
use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_plans_json, format_plans_text, format_run_report_json, format_run_report_text,
    format_schedule_json, format_schedule_text, ScheduleRow,
};
use crate::config::{ConfigLoader, LaunchConfig};
use crate::error::LaunchError;
use crate::manifest::{prepare_run, RunManifest, RunRequest};
use crate::orchestrator::{AccountPlans, DryRunExecutor, Orchestrator, ScaledDelays};
use crate::random::run_rng;
use crate::schedule::window_from_hours;
use crate::types::AccountId;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: workspace, config path, and the loaded config.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: LaunchConfig,
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    ///
    /// The config is not validated here so that `validate` can report every problem.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, LaunchError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(config, workspace_root, config_path))
    }

    pub fn with_config(
        config: LaunchConfig,
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            config,
            workspace_root,
            config_path,
        }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, LaunchError> {
        let started = Instant::now();
        let name = command_name(command);
        info!(command = name, "Command started");
        let result = self.execute_inner(command);
        info!(
            command = name,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, LaunchError> {
        match command {
            Commands::Plan {
                accounts,
                seed,
                format,
            } => self.handle_plan(*accounts, *seed, format),
            Commands::Schedule {
                hours,
                accounts,
                seed,
                format,
            } => self.handle_schedule(*hours, *accounts, *seed, format),
            Commands::Manifest {
                output,
                hours,
                accounts,
                seed,
            } => self.handle_manifest(output, *hours, *accounts, *seed),
            Commands::Simulate {
                manifest,
                speedup,
                accounts,
                seed,
                format,
            } => self.handle_simulate(manifest.as_deref(), *speedup, *accounts, *seed, format),
            Commands::Validate => self.handle_validate(),
            Commands::Defaults => LaunchConfig::default().to_toml(),
        }
    }

    fn handle_plan(
        &self,
        accounts: Option<usize>,
        seed: Option<u64>,
        format: &str,
    ) -> Result<String, LaunchError> {
        let generator = self.config.generator()?;
        let accounts = self.select_accounts(accounts)?;
        let mut rng = run_rng(self.seed(seed))?;
        let plans = AccountPlans::generate(
            &generator,
            &accounts,
            self.config.run.random_for_each_account,
            &mut rng,
        );
        match format {
            "json" => format_plans_json(&accounts, &plans),
            _ => Ok(format_plans_text(&accounts, &plans)),
        }
    }

    fn handle_schedule(
        &self,
        hours: Option<u64>,
        accounts: Option<usize>,
        seed: Option<u64>,
        format: &str,
    ) -> Result<String, LaunchError> {
        let accounts = self.select_accounts(accounts)?;
        let window_secs = self.window_secs(hours)?;
        let mut rng = run_rng(self.seed(seed))?;
        let schedule = self
            .config
            .scheduler()
            .schedule(accounts.len(), window_secs, &mut rng)?;

        let epoch = Local::now();
        let launch_times = schedule.launch_times(&epoch).ok_or_else(|| {
            LaunchError::ConfigError(format!(
                "Launch window of {}s is out of calendar range",
                window_secs
            ))
        })?;
        let rows: Vec<ScheduleRow> = accounts
            .iter()
            .zip(schedule.offsets())
            .zip(schedule.increments())
            .zip(launch_times)
            .enumerate()
            .map(
                |(launch_order, (((&account, &offset_secs), delay_secs), launch_at))| ScheduleRow {
                    launch_order,
                    account,
                    offset_secs,
                    delay_secs,
                    launch_at,
                },
            )
            .collect();

        match format {
            "json" => format_schedule_json(&rows, window_secs),
            _ => Ok(format_schedule_text(&rows, window_secs)),
        }
    }

    fn handle_manifest(
        &self,
        output: &Path,
        hours: Option<u64>,
        accounts: Option<usize>,
        seed: Option<u64>,
    ) -> Result<String, LaunchError> {
        let manifest = self.prepare(hours, accounts, seed)?;
        manifest.save(output)?;
        info!(path = %output.display(), "Manifest written");
        Ok(format!(
            "Wrote manifest for {} accounts to {}",
            manifest.entries.len(),
            output.display()
        ))
    }

    fn handle_simulate(
        &self,
        manifest_path: Option<&Path>,
        speedup: u32,
        accounts: Option<usize>,
        seed: Option<u64>,
        format: &str,
    ) -> Result<String, LaunchError> {
        let manifest = match manifest_path {
            Some(path) => RunManifest::load(path)?,
            None => self.prepare(None, accounts, seed)?,
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let executor = DryRunExecutor::new();
        let delays = ScaledDelays::new(manifest.clone(), speedup);
        let report = runtime.block_on(Orchestrator::new().run(
            &manifest.accounts(),
            &manifest,
            &delays,
            &executor,
        ));

        match format {
            "json" => format_run_report_json(&report),
            _ => Ok(format_run_report_text(&report)),
        }
    }

    fn handle_validate(&self) -> Result<String, LaunchError> {
        self.config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            LaunchError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        let source = match self.config_path {
            Some(ref path) => path.display().to_string(),
            None => self.workspace_root.display().to_string(),
        };
        Ok(format!("Configuration is valid ({})", source))
    }

    fn prepare(
        &self,
        hours: Option<u64>,
        accounts: Option<usize>,
        seed: Option<u64>,
    ) -> Result<RunManifest, LaunchError> {
        let generator = self.config.generator()?;
        let seed = self.seed(seed);
        let request = RunRequest {
            accounts: self.select_accounts(accounts)?,
            window_secs: self.window_secs(hours)?,
            per_account_plans: self.config.run.random_for_each_account,
            seed,
        };
        let mut rng = run_rng(seed)?;
        prepare_run(&generator, &self.config.scheduler(), &request, &mut rng)
    }

    fn select_accounts(&self, count: Option<usize>) -> Result<Vec<AccountId>, LaunchError> {
        let accounts = match count {
            Some(count) => first_accounts(count)?,
            None => self.config.accounts.resolve(&self.workspace_root)?,
        };
        Ok(accounts)
    }

    fn seed(&self, flag: Option<u64>) -> Option<u64> {
        flag.or(self.config.run.seed)
    }

    /// `--hours` enables scheduling for one call; otherwise the config decides.
    fn window_secs(&self, hours: Option<u64>) -> Result<u64, LaunchError> {
        match hours {
            Some(hours) => Ok(window_from_hours(hours)?),
            None => self.config.window_secs(),
        }
    }
}
