//! Orchestrator: waits out each account's start offset, then runs its plan.
//! Plans, delays and action execution are injected through the provider and
//! executor seams; nothing here knows what an action does.

pub mod executor;
pub mod providers;

pub use executor::{
    AccountOutcome, AccountStatus, ActionExecutor, DryRunExecutor, Orchestrator, RunReport,
};
pub use providers::{AccountPlans, DelayProvider, PlanProvider, ScaledDelays};
