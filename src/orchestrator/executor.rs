//! Account execution: one concurrent future per account, actions sequential
//! within an account. A failure ends only the failing account.

use crate::error::LaunchError;
use crate::orchestrator::providers::{DelayProvider, PlanProvider};
use crate::types::{AccountId, ActionId};
use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Runs one opaque action for one account.
#[allow(async_fn_in_trait)]
pub trait ActionExecutor: Send + Sync {
    async fn execute(&self, account: AccountId, action: &str) -> Result<(), LaunchError>;
}

/// Executor that only logs and records actions.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    executed: Mutex<Vec<(AccountId, ActionId)>>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executed `(account, action)` pairs in completion order.
    pub fn executed(&self) -> Vec<(AccountId, ActionId)> {
        self.executed.lock().clone()
    }
}

impl ActionExecutor for DryRunExecutor {
    async fn execute(&self, account: AccountId, action: &str) -> Result<(), LaunchError> {
        info!(account, action, "Dry run: action skipped");
        self.executed.lock().push((account, action.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccountStatus {
    Completed,
    Failed { action: ActionId, message: String },
    MissingPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOutcome {
    pub account: AccountId,
    pub launch_order: usize,
    pub completed: Vec<ActionId>,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Outcomes in launch order
    pub outcomes: Vec<AccountOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == AccountStatus::Completed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn outcome(&self, account: AccountId) -> Option<&AccountOutcome> {
        self.outcomes.iter().find(|o| o.account == account)
    }
}

/// Drives a run: account `i` starts once `delays.start_offset(i)` has elapsed
/// since the call began.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orchestrator;

impl Orchestrator {
    pub fn new() -> Self {
        Self
    }

    pub async fn run<P, D, E>(
        &self,
        accounts: &[AccountId],
        plans: &P,
        delays: &D,
        executor: &E,
    ) -> RunReport
    where
        P: PlanProvider,
        D: DelayProvider,
        E: ActionExecutor,
    {
        info!(accounts = accounts.len(), "Run started");
        let mut futures = FuturesUnordered::new();
        for (launch_order, &account) in accounts.iter().enumerate() {
            let delay = delays.start_offset(launch_order);
            futures.push(async move {
                if !delay.is_zero() {
                    info!(
                        account,
                        launch_order,
                        delay_secs = delay.as_secs(),
                        "Waiting before launch"
                    );
                    tokio::time::sleep(delay).await;
                }
                self.run_account(account, launch_order, plans, executor)
                    .await
            });
        }

        let mut outcomes = Vec::with_capacity(accounts.len());
        while let Some(outcome) = futures.next().await {
            outcomes.push(outcome);
        }
        outcomes.sort_by_key(|o| o.launch_order);

        let report = RunReport { outcomes };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Run finished"
        );
        report
    }

    async fn run_account<P, E>(
        &self,
        account: AccountId,
        launch_order: usize,
        plans: &P,
        executor: &E,
    ) -> AccountOutcome
    where
        P: PlanProvider,
        E: ActionExecutor,
    {
        let mut outcome = AccountOutcome {
            account,
            launch_order,
            completed: Vec::new(),
            status: AccountStatus::Completed,
        };

        let Some(plan) = plans.plan_for(account) else {
            warn!(account, "{}", LaunchError::MissingPlan(account));
            outcome.status = AccountStatus::MissingPlan;
            return outcome;
        };

        info!(account, "Task execution plan: {}", plan.execution_line());
        for (index, action) in plan.actions().iter().enumerate() {
            info!(account, "Executing task {}: {}", index + 1, action);
            if let Err(err) = executor.execute(account, action).await {
                error!(account, action = action.as_str(), error = %err, "Task failed");
                outcome.status = AccountStatus::Failed {
                    action: action.clone(),
                    message: err.to_string(),
                };
                return outcome;
            }
            outcome.completed.push(action.clone());
        }
        info!(account, tasks = outcome.completed.len(), "Account finished");
        outcome
    }
}
