//! Configuration System
//!
//! Layered configuration for plan generation, launch scheduling, account
//! selection and logging. Sources are merged by [`ConfigLoader`]; the result
//! is checked as a whole by [`LaunchConfig::validate`].

use crate::accounts::AccountsConfig;
use crate::category::{Candidate, CategoryPool, RuleSpec};
use crate::error::{CategoryError, LaunchError};
use crate::logging::LoggingConfig;
use crate::plan::{CategoryRole, PlanLayout, TaskPlanGenerator};
use crate::schedule::{window_from_hours, LaunchScheduler, DEFAULT_MIN_SPACING_SECS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Categories in declaration order; head order follows this list
    #[serde(default = "default_categories")]
    pub categories: Vec<CategorySpec>,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub accounts: AccountsConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One category as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub role: CategoryRole,
    pub rule: RuleSpec,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl CategorySpec {
    pub fn new(
        name: impl Into<String>,
        role: CategoryRole,
        rule: RuleSpec,
        candidates: Vec<Candidate>,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            rule,
            candidates,
        }
    }

    /// Validated pool for this category.
    pub fn build(&self) -> Result<CategoryPool, CategoryError> {
        CategoryPool::new(self.name.clone(), self.candidates.clone(), &self.rule)
    }
}

/// Launch window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Spread launches over the window; when off every account starts at once
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_window_hours")]
    pub window_hours: u64,

    /// Preferred minimum gap between consecutive launches
    #[serde(default = "default_min_spacing_secs")]
    pub min_spacing_secs: u64,
}

fn default_window_hours() -> u64 {
    24
}

fn default_min_spacing_secs() -> u64 {
    DEFAULT_MIN_SPACING_SECS
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window_hours: default_window_hours(),
            min_spacing_secs: default_min_spacing_secs(),
        }
    }
}

/// Per-run generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Draw a separate plan for every account
    #[serde(default = "default_true")]
    pub random_for_each_account: bool,

    /// Fixed seed for reproducible runs; OS entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            random_for_each_account: true,
            seed: None,
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            schedule: ScheduleConfig::default(),
            accounts: AccountsConfig::default(),
            run: RunConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn enabled_all(actions: &[&str]) -> Vec<Candidate> {
    actions.iter().map(|a| Candidate::enabled(*a)).collect()
}

/// Built-in category layout.
pub fn default_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new(
            "INITIAL",
            CategoryRole::Head,
            RuleSpec::FixedAll,
            vec![
                Candidate::enabled("faucet"),
                Candidate::disabled("memebridge"),
                Candidate::disabled("dusted"),
            ],
        ),
        CategorySpec::new(
            "SWAPS",
            CategoryRole::Body,
            RuleSpec::RangeSample { min: 1, max: 3 },
            enabled_all(&["swaps", "bean", "ambient", "izumi"]),
        ),
        CategorySpec::new(
            "STAKES",
            CategoryRole::Body,
            RuleSpec::RangeSample { min: 1, max: 3 },
            enabled_all(&["apriori", "magma", "shmonad", "kintsu"]),
        ),
        CategorySpec::new(
            "MINT",
            CategoryRole::Body,
            RuleSpec::RangeSample { min: 2, max: 4 },
            enabled_all(&[
                "monadverse",
                "magiceden",
                "accountable",
                "owlto",
                "lilchogstars",
                "demask",
                "monadking",
                "monadking_unlocked",
            ]),
        ),
        CategorySpec::new(
            "GAMES",
            CategoryRole::Body,
            RuleSpec::FixedAll,
            enabled_all(&["frontrunner"]),
        ),
        CategorySpec::new(
            "OTHER",
            CategoryRole::Body,
            RuleSpec::ProbabilitySingle { probability: 30.0 },
            enabled_all(&["nad_domains", "aircraft"]),
        ),
        CategorySpec::new(
            "COLLECT",
            CategoryRole::Collect,
            RuleSpec::ProbabilitySingle { probability: 50.0 },
            enabled_all(&["collect_all_to_monad"]),
        ),
        CategorySpec::new(
            "TERMINAL",
            CategoryRole::Terminal,
            RuleSpec::FixedTerminal,
            enabled_all(&["logs"]),
        ),
    ]
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Category(String, String),
    Layout(String),
    Schedule(String),
    Accounts(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Category(name, msg) => write!(f, "Category '{}': {}", name, msg),
            ValidationError::Layout(msg) => write!(f, "Layout: {}", msg),
            ValidationError::Schedule(msg) => write!(f, "Schedule: {}", msg),
            ValidationError::Accounts(msg) => write!(f, "Accounts: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl LaunchConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut names = HashSet::new();
        let mut pools = Vec::with_capacity(self.categories.len());
        for spec in &self.categories {
            if !spec.name.is_empty() && !names.insert(spec.name.as_str()) {
                errors.push(ValidationError::Category(
                    spec.name.clone(),
                    "declared more than once".to_string(),
                ));
            }
            match spec.build() {
                Ok(pool) => pools.push((spec.role, pool)),
                Err(e) => errors.push(ValidationError::Category(spec.name.clone(), e.to_string())),
            }
        }

        // Role checks only make sense once every pool built
        if pools.len() == self.categories.len() {
            if let Err(e) = PlanLayout::from_roles(pools) {
                errors.push(ValidationError::Layout(e.to_string()));
            }
        }

        if let Err(e) = window_from_hours(self.schedule.window_hours) {
            errors.push(ValidationError::Schedule(e.to_string()));
        }

        if let Err(e) = self.accounts.validate() {
            errors.push(ValidationError::Accounts(e.to_string()));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validated layout built from `categories`.
    pub fn plan_layout(&self) -> Result<PlanLayout, CategoryError> {
        let pools = self
            .categories
            .iter()
            .map(|spec| spec.build().map(|pool| (spec.role, pool)))
            .collect::<Result<Vec<_>, _>>()?;
        PlanLayout::from_roles(pools)
    }

    pub fn generator(&self) -> Result<TaskPlanGenerator, CategoryError> {
        Ok(TaskPlanGenerator::new(self.plan_layout()?))
    }

    pub fn scheduler(&self) -> LaunchScheduler {
        LaunchScheduler::new(self.schedule.min_spacing_secs)
    }

    /// Launch window in seconds; zero when scheduling is off.
    pub fn window_secs(&self) -> Result<u64, LaunchError> {
        if !self.schedule.enabled {
            return Ok(0);
        }
        Ok(window_from_hours(self.schedule.window_hours)?)
    }

    /// Render as TOML, the format config files are written in.
    pub fn to_toml(&self) -> Result<String, LaunchError> {
        toml::to_string_pretty(self).map_err(|e| LaunchError::Serialization(e.to_string()))
    }
}
