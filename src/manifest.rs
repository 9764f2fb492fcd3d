//! Run manifest: the plans and start offsets of one run as structured data.
//!
//! A worker process loads the manifest and uses it directly as its plan and
//! delay provider; no generated code or shared module state is involved.

use crate::accounts::ensure_unique;
use crate::error::LaunchError;
use crate::orchestrator::{AccountPlans, DelayProvider, PlanProvider};
use crate::plan::{TaskPlan, TaskPlanGenerator};
use crate::schedule::LaunchScheduler;
use crate::types::AccountId;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Inputs for one run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub accounts: Vec<AccountId>,
    pub window_secs: u64,
    /// Draw a fresh plan per account; otherwise one plan is shared
    pub per_account_plans: bool,
    /// Recorded in the manifest; the caller seeds `rng` with it
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub account: AccountId,
    pub launch_order: usize,
    pub start_offset_secs: u64,
    pub plan: TaskPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunManifest {
    pub created_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub window_secs: u64,
    pub per_account_plans: bool,
    pub entries: Vec<ManifestEntry>,
}

/// Compute the schedule, then one plan per account in account order.
///
/// The draw order is fixed so that a seeded `rng` reproduces the run.
pub fn prepare_run<R: Rng + ?Sized>(
    generator: &TaskPlanGenerator,
    scheduler: &LaunchScheduler,
    request: &RunRequest,
    rng: &mut R,
) -> Result<RunManifest, LaunchError> {
    ensure_unique(&request.accounts)?;
    let schedule = scheduler.schedule(request.accounts.len(), request.window_secs, rng)?;
    let mut plans = AccountPlans::generate(
        generator,
        &request.accounts,
        request.per_account_plans,
        rng,
    );

    let mut entries = Vec::with_capacity(request.accounts.len());
    for (launch_order, (&account, &offset)) in request
        .accounts
        .iter()
        .zip(schedule.offsets())
        .enumerate()
    {
        let plan = plans
            .remove(account)
            .ok_or(LaunchError::MissingPlan(account))?;
        entries.push(ManifestEntry {
            account,
            launch_order,
            start_offset_secs: offset,
            plan,
        });
    }

    tracing::info!(
        accounts = entries.len(),
        window_secs = request.window_secs,
        "Prepared run manifest"
    );
    Ok(RunManifest {
        created_at: Utc::now(),
        seed: request.seed,
        window_secs: request.window_secs,
        per_account_plans: request.per_account_plans,
        entries,
    })
}

impl RunManifest {
    pub fn accounts(&self) -> Vec<AccountId> {
        self.entries.iter().map(|e| e.account).collect()
    }

    /// Check entry order and offset invariants.
    pub fn validate(&self) -> Result<(), LaunchError> {
        let mut previous = 0u64;
        let mut seen = std::collections::HashSet::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.launch_order != index {
                return Err(LaunchError::InvalidManifest(format!(
                    "entry {} has launch_order {}",
                    index, entry.launch_order
                )));
            }
            if !seen.insert(entry.account) {
                return Err(LaunchError::InvalidManifest(format!(
                    "account {} appears more than once",
                    entry.account
                )));
            }
            if index == 0 && entry.start_offset_secs != 0 {
                return Err(LaunchError::InvalidManifest(
                    "first account must start at offset 0".to_string(),
                ));
            }
            if entry.start_offset_secs < previous {
                return Err(LaunchError::InvalidManifest(format!(
                    "offsets decrease at account {}",
                    entry.account
                )));
            }
            previous = entry.start_offset_secs;
        }
        if previous != self.window_secs && !self.entries.is_empty() {
            return Err(LaunchError::InvalidManifest(format!(
                "last offset {} does not match window {}",
                previous, self.window_secs
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, LaunchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LaunchError> {
        let manifest: RunManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn save(&self, path: &Path) -> Result<(), LaunchError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, LaunchError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl PlanProvider for RunManifest {
    fn plan_for(&self, account: AccountId) -> Option<&TaskPlan> {
        self.entries
            .iter()
            .find(|e| e.account == account)
            .map(|e| &e.plan)
    }
}

impl DelayProvider for RunManifest {
    fn start_offset(&self, launch_order: usize) -> Duration {
        self.entries
            .get(launch_order)
            .map(|e| Duration::from_secs(e.start_offset_secs))
            .unwrap_or(Duration::ZERO)
    }
}
