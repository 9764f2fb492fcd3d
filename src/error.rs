//! Error types for plan generation, launch scheduling and run orchestration.

use crate::types::{AccountId, ActionId};
use thiserror::Error;

/// Category definition errors. Raised at load time, never during generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CategoryError {
    #[error("Category name cannot be empty")]
    EmptyName,

    #[error("Category '{category}': {field} cannot be negative (got {value})")]
    NegativeCount {
        category: String,
        field: &'static str,
        value: i64,
    },

    #[error("Category '{category}': max ({max}) is less than min ({min})")]
    InvertedRange { category: String, min: i64, max: i64 },

    #[error("Category '{category}': probability must be a finite number")]
    NonFiniteProbability { category: String },

    #[error("Category '{category}': terminal category needs exactly one action, found {count}")]
    TerminalCandidates { category: String, count: usize },

    #[error("Category '{category}': action identifier cannot be empty")]
    EmptyAction { category: String },

    #[error("Category '{category}': rule {rule} is not allowed in the {role} role")]
    InvalidRole {
        category: String,
        role: &'static str,
        rule: &'static str,
    },

    #[error("Only one {role} category is allowed, found '{first}' and '{second}'")]
    DuplicateRole {
        role: &'static str,
        first: String,
        second: String,
    },
}

/// Launch schedule errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Cannot schedule a run with zero accounts")]
    NoAccounts,

    #[error("Window of {hours} hours does not fit in seconds")]
    WindowOverflow { hours: u64 },
}

/// Account selection errors
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid account range [{start}, {end}]")]
    InvalidRange { start: usize, end: usize },

    #[error("Account index 0 is not valid, accounts are numbered from 1")]
    ZeroIndex,

    #[error("Account {0} is listed more than once")]
    DuplicateAccount(AccountId),

    #[error("Key file not found: {0}")]
    KeysFileMissing(std::path::PathBuf),

    #[error("No accounts selected for the run")]
    Empty,

    #[error("Key file I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Top-level error for the library and CLI
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Category error: {0}")]
    Category(#[from] CategoryError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Randomness source failed: {0}")]
    Randomness(String),

    #[error("No task plan for account {0}")]
    MissingPlan(AccountId),

    #[error("Account {account}: action '{action}' failed: {message}")]
    ActionFailed {
        account: AccountId,
        action: ActionId,
        message: String,
    },

    #[error("Invalid run manifest: {0}")]
    InvalidManifest(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for LaunchError {
    fn from(err: config::ConfigError) -> Self {
        LaunchError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for LaunchError {
    fn from(err: serde_json::Error) -> Self {
        LaunchError::Serialization(err.to_string())
    }
}

impl From<rand::Error> for LaunchError {
    fn from(err: rand::Error) -> Self {
        LaunchError::Randomness(err.to_string())
    }
}
