use crate::plan::{TaskPlan, TaskPlanGenerator};
use crate::schedule::Schedule;
use crate::types::AccountId;
use rand::Rng;
use std::collections::BTreeMap;
use std::time::Duration;

/// Source of an account's already-generated plan.
pub trait PlanProvider: Send + Sync {
    fn plan_for(&self, account: AccountId) -> Option<&TaskPlan>;
}

/// Start offset, from the run epoch, for the account at `launch_order`.
pub trait DelayProvider: Send + Sync {
    fn start_offset(&self, launch_order: usize) -> Duration;
}

impl DelayProvider for Schedule {
    /// Launches beyond the schedule start immediately.
    fn start_offset(&self, launch_order: usize) -> Duration {
        self.start_delay(launch_order).unwrap_or(Duration::ZERO)
    }
}

/// Divides another provider's offsets, for dry runs.
#[derive(Debug, Clone)]
pub struct ScaledDelays<D> {
    inner: D,
    speedup: u32,
}

impl<D: DelayProvider> ScaledDelays<D> {
    /// `speedup` of 0 is treated as 1.
    pub fn new(inner: D, speedup: u32) -> Self {
        Self {
            inner,
            speedup: speedup.max(1),
        }
    }
}

impl<D: DelayProvider> DelayProvider for ScaledDelays<D> {
    fn start_offset(&self, launch_order: usize) -> Duration {
        self.inner.start_offset(launch_order) / self.speedup
    }
}

/// Explicit account → plan mapping, owned by the caller for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPlans {
    plans: BTreeMap<AccountId, TaskPlan>,
}

impl AccountPlans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate plans for `accounts`, in order.
    ///
    /// With `per_account` off, one plan is drawn and shared by every account.
    pub fn generate<R: Rng + ?Sized>(
        generator: &TaskPlanGenerator,
        accounts: &[AccountId],
        per_account: bool,
        rng: &mut R,
    ) -> Self {
        let mut plans = Self::new();
        if per_account {
            for &account in accounts {
                plans.insert(account, generator.generate(rng));
            }
        } else if !accounts.is_empty() {
            let shared = generator.generate(rng);
            for &account in accounts {
                plans.insert(account, shared.clone());
            }
        }
        plans
    }

    pub fn insert(&mut self, account: AccountId, plan: TaskPlan) -> Option<TaskPlan> {
        self.plans.insert(account, plan)
    }

    pub fn remove(&mut self, account: AccountId) -> Option<TaskPlan> {
        self.plans.remove(&account)
    }

    pub fn get(&self, account: AccountId) -> Option<&TaskPlan> {
        self.plans.get(&account)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AccountId, &TaskPlan)> {
        self.plans.iter().map(|(account, plan)| (*account, plan))
    }
}

impl PlanProvider for AccountPlans {
    fn plan_for(&self, account: AccountId) -> Option<&TaskPlan> {
        self.get(account)
    }
}
