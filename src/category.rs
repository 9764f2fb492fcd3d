//! Category pools: named candidate actions with one selection rule.
//!
//! Pools are validated once, when they are built from configuration. The
//! generator clamps again per run, because candidates can be disabled after
//! validation and the live pool can shrink below a declared range.

use crate::error::CategoryError;
use crate::types::ActionId;
use serde::{Deserialize, Serialize};

/// One candidate action and its enabled flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub action: ActionId,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Candidate {
    pub fn enabled(action: impl Into<ActionId>) -> Self {
        Self {
            action: action.into(),
            enabled: true,
        }
    }

    pub fn disabled(action: impl Into<ActionId>) -> Self {
        Self {
            action: action.into(),
            enabled: false,
        }
    }
}

/// Selection rule as written in configuration, before validation.
///
/// Counts are signed so that negative values can be reported instead of
/// failing deserialization with an opaque message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    FixedAll,
    RangeSample { min: i64, max: i64 },
    ProbabilitySingle { probability: f64 },
    FixedTerminal,
}

/// Validated selection rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionRule {
    /// Every enabled candidate, in declared order.
    FixedAll,
    /// `k` distinct enabled candidates, `k` uniform in `[min, max]` after clamping.
    RangeSample { min: usize, max: usize },
    /// One uniform pick with probability `probability` percent, always in `[0, 100]`.
    ProbabilitySingle { probability: f64 },
    /// The single designated action, appended last.
    FixedTerminal,
}

impl SelectionRule {
    pub fn name(&self) -> &'static str {
        match self {
            SelectionRule::FixedAll => "fixed_all",
            SelectionRule::RangeSample { .. } => "range_sample",
            SelectionRule::ProbabilitySingle { .. } => "probability_single",
            SelectionRule::FixedTerminal => "fixed_terminal",
        }
    }
}

impl RuleSpec {
    /// Validate against category `name`. Probabilities are clamped, not rejected.
    pub fn validate(&self, name: &str) -> Result<SelectionRule, CategoryError> {
        match *self {
            RuleSpec::FixedAll => Ok(SelectionRule::FixedAll),
            RuleSpec::FixedTerminal => Ok(SelectionRule::FixedTerminal),
            RuleSpec::RangeSample { min, max } => {
                if min < 0 {
                    return Err(CategoryError::NegativeCount {
                        category: name.to_string(),
                        field: "min",
                        value: min,
                    });
                }
                if max < 0 {
                    return Err(CategoryError::NegativeCount {
                        category: name.to_string(),
                        field: "max",
                        value: max,
                    });
                }
                if max < min {
                    return Err(CategoryError::InvertedRange {
                        category: name.to_string(),
                        min,
                        max,
                    });
                }
                Ok(SelectionRule::RangeSample {
                    min: min as usize,
                    max: max as usize,
                })
            }
            RuleSpec::ProbabilitySingle { probability } => {
                if !probability.is_finite() {
                    return Err(CategoryError::NonFiniteProbability {
                        category: name.to_string(),
                    });
                }
                let clamped = probability.clamp(0.0, 100.0);
                if clamped != probability {
                    tracing::warn!(
                        category = name,
                        probability,
                        clamped,
                        "Probability outside [0, 100], clamped"
                    );
                }
                Ok(SelectionRule::ProbabilitySingle {
                    probability: clamped,
                })
            }
        }
    }
}

/// Named pool of candidate actions
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPool {
    name: String,
    candidates: Vec<Candidate>,
    rule: SelectionRule,
}

impl CategoryPool {
    /// Build and validate a pool.
    pub fn new(
        name: impl Into<String>,
        candidates: Vec<Candidate>,
        rule: &RuleSpec,
    ) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if candidates.iter().any(|c| c.action.trim().is_empty()) {
            return Err(CategoryError::EmptyAction { category: name });
        }
        let rule = rule.validate(&name)?;
        if rule == SelectionRule::FixedTerminal && candidates.len() != 1 {
            return Err(CategoryError::TerminalCandidates {
                category: name,
                count: candidates.len(),
            });
        }
        Ok(Self {
            name,
            candidates,
            rule,
        })
    }

    pub fn fixed_all<I, S>(name: impl Into<String>, actions: I) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ActionId>,
    {
        Self::new(name, enabled_all(actions), &RuleSpec::FixedAll)
    }

    pub fn range_sample<I, S>(
        name: impl Into<String>,
        actions: I,
        min: i64,
        max: i64,
    ) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ActionId>,
    {
        Self::new(name, enabled_all(actions), &RuleSpec::RangeSample { min, max })
    }

    pub fn probability_single<I, S>(
        name: impl Into<String>,
        actions: I,
        probability: f64,
    ) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ActionId>,
    {
        Self::new(
            name,
            enabled_all(actions),
            &RuleSpec::ProbabilitySingle { probability },
        )
    }

    pub fn fixed_terminal(
        name: impl Into<String>,
        action: impl Into<ActionId>,
    ) -> Result<Self, CategoryError> {
        Self::new(
            name,
            vec![Candidate::enabled(action)],
            &RuleSpec::FixedTerminal,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> SelectionRule {
        self.rule
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Enabled candidates, in declared order.
    pub fn enabled_actions(&self) -> Vec<&ActionId> {
        self.candidates
            .iter()
            .filter(|c| c.enabled)
            .map(|c| &c.action)
            .collect()
    }

    /// Toggle a candidate between runs. Returns false if `action` is not in the pool.
    pub fn set_enabled(&mut self, action: &str, enabled: bool) -> bool {
        match self.candidates.iter_mut().find(|c| c.action == action) {
            Some(candidate) => {
                candidate.enabled = enabled;
                true
            }
            None => false,
        }
    }
}

fn enabled_all<I, S>(actions: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: Into<ActionId>,
{
    actions.into_iter().map(Candidate::enabled).collect()
}
