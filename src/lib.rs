//! Launchplan: Randomized Task Plans and Staggered Launches
//!
//! Builds a randomized, role-ordered list of actions for every account and
//! spreads the accounts' start times across a fixed window. Plans and start
//! offsets can be handed to a worker as a JSON run manifest and driven by the
//! orchestrator against any action executor.

pub mod accounts;
pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod plan;
pub mod random;
pub mod schedule;
pub mod types;
