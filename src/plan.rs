//! Task plans: role layout of category pools and the per-account plan generator.
//! Pure computation; execution of the planned actions lives in the orchestrator.

pub mod generator;
pub mod layout;

pub use generator::{TaskPlan, TaskPlanGenerator};
pub use layout::{CategoryRole, PlanLayout};
