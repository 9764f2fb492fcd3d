//! Integration tests for the manifest handoff and a full dry run

use launchplan::config::LaunchConfig;
use launchplan::manifest::{prepare_run, RunManifest, RunRequest};
use launchplan::orchestrator::{
    AccountStatus, ActionExecutor, DryRunExecutor, Orchestrator, PlanProvider, ScaledDelays,
};
use launchplan::random::run_rng;
use launchplan::types::AccountId;
use launchplan::error::LaunchError;
use parking_lot::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

fn manifest(accounts: Vec<AccountId>, window_secs: u64, seed: u64) -> RunManifest {
    let config = LaunchConfig::default();
    let request = RunRequest {
        accounts,
        window_secs,
        per_account_plans: true,
        seed: Some(seed),
    };
    let mut rng = run_rng(Some(seed)).unwrap();
    prepare_run(
        &config.generator().unwrap(),
        &config.scheduler(),
        &request,
        &mut rng,
    )
    .unwrap()
}

#[test]
fn test_manifest_survives_disk_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("manifest.json");
    let original = manifest(vec![2, 4, 6, 8], 86_400, 17);
    original.save(&path).unwrap();

    let loaded = RunManifest::load(&path).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.accounts(), vec![2, 4, 6, 8]);
    assert_eq!(loaded.entries.last().unwrap().start_offset_secs, 86_400);
    for entry in &loaded.entries {
        assert_eq!(entry.plan.head(), ["faucet"]);
        assert_eq!(entry.plan.actions().last().unwrap(), "logs");
    }
}

#[test]
fn test_manifest_is_reproducible_from_seed() {
    let a = manifest(vec![1, 2, 3], 3_600, 23);
    let b = manifest(vec![1, 2, 3], 3_600, 23);
    assert_eq!(a.entries, b.entries);
}

#[test]
fn test_hand_edited_manifest_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("manifest.json");
    let mut edited = manifest(vec![1, 2], 600, 1);
    edited.entries[1].account = 1;
    std::fs::write(&path, serde_json::to_string(&edited).unwrap()).unwrap();
    assert!(matches!(
        RunManifest::load(&path),
        Err(LaunchError::InvalidManifest(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_dry_run_follows_manifest() {
    let manifest = manifest(vec![1, 2, 3], 7_200, 31);
    let executor = DryRunExecutor::new();
    let epoch = Instant::now();
    let report = Orchestrator::new()
        .run(&manifest.accounts(), &manifest, &manifest, &executor)
        .await;

    assert_eq!(report.succeeded(), 3);
    assert!(epoch.elapsed() >= Duration::from_secs(7_200));
    for account in manifest.accounts() {
        let executed: Vec<String> = executor
            .executed()
            .into_iter()
            .filter(|(a, _)| *a == account)
            .map(|(_, action)| action)
            .collect();
        assert_eq!(executed, manifest.plan_for(account).unwrap().actions());
    }
}

#[tokio::test(start_paused = true)]
async fn test_speedup_shortens_the_run() {
    let manifest = manifest(vec![1, 2], 3_600, 2);
    let executor = DryRunExecutor::new();
    let epoch = Instant::now();
    Orchestrator::new()
        .run(
            &manifest.accounts(),
            &manifest,
            &ScaledDelays::new(manifest.clone(), 3_600),
            &executor,
        )
        .await;
    assert!(epoch.elapsed() < Duration::from_secs(5));
}

/// Fails every action named `action` for every account.
struct RejectingExecutor {
    action: &'static str,
    calls: Mutex<usize>,
}

impl ActionExecutor for RejectingExecutor {
    async fn execute(&self, account: AccountId, action: &str) -> Result<(), LaunchError> {
        *self.calls.lock() += 1;
        if action == self.action {
            return Err(LaunchError::ActionFailed {
                account,
                action: action.to_string(),
                message: "insufficient balance".to_string(),
            });
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_failing_terminal_marks_every_account_failed() {
    let manifest = manifest(vec![1, 2], 0, 9);
    let executor = RejectingExecutor {
        action: "logs",
        calls: Mutex::new(0),
    };
    let report = Orchestrator::new()
        .run(&manifest.accounts(), &manifest, &manifest, &executor)
        .await;

    assert_eq!(report.failed(), 2);
    for outcome in &report.outcomes {
        assert!(matches!(
            &outcome.status,
            AccountStatus::Failed { action, .. } if action == "logs"
        ));
        let plan = manifest.plan_for(outcome.account).unwrap();
        assert_eq!(outcome.completed.len(), plan.len() - 1);
    }
    let total: usize = manifest.entries.iter().map(|e| e.plan.len()).sum();
    assert_eq!(*executor.calls.lock(), total);
}
