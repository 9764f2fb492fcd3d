//! Plan generator: head in declared order, one shuffled body, fixed tail.

use crate::category::{CategoryPool, SelectionRule};
use crate::plan::layout::PlanLayout;
use crate::types::ActionId;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ordered actions for one account, with segment boundaries.
///
/// Deserialization checks that the boundaries fit inside `actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlanRecord")]
pub struct TaskPlan {
    actions: Vec<ActionId>,
    head_len: usize,
    body_len: usize,
}

/// Serialized form of [`TaskPlan`], before the boundary check.
#[derive(Deserialize)]
struct PlanRecord {
    actions: Vec<ActionId>,
    head_len: usize,
    body_len: usize,
}

impl TryFrom<PlanRecord> for TaskPlan {
    type Error = String;

    fn try_from(record: PlanRecord) -> Result<Self, Self::Error> {
        let segments = record.head_len.checked_add(record.body_len);
        match segments {
            Some(total) if total <= record.actions.len() => Ok(Self {
                actions: record.actions,
                head_len: record.head_len,
                body_len: record.body_len,
            }),
            _ => Err(format!(
                "plan segments (head {}, body {}) exceed its {} actions",
                record.head_len,
                record.body_len,
                record.actions.len()
            )),
        }
    }
}

impl TaskPlan {
    /// Plan with every action in the head segment, e.g. from a plain list.
    pub fn from_actions(actions: Vec<ActionId>) -> Self {
        let head_len = actions.len();
        Self {
            actions,
            head_len,
            body_len: 0,
        }
    }

    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn head(&self) -> &[ActionId] {
        &self.actions[..self.head_len]
    }

    pub fn body(&self) -> &[ActionId] {
        &self.actions[self.head_len..self.head_len + self.body_len]
    }

    pub fn tail(&self) -> &[ActionId] {
        &self.actions[self.head_len + self.body_len..]
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn into_actions(self) -> Vec<ActionId> {
        self.actions
    }

    /// Numbered one-line rendering: `1. faucet | 2. bean | 3. logs`.
    pub fn execution_line(&self) -> String {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, action)| format!("{}. {}", i + 1, action))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Generates task plans from a fixed layout.
///
/// Holds no per-call state: all randomness comes from the caller's generator,
/// so repeated calls yield independent plans.
#[derive(Debug, Clone)]
pub struct TaskPlanGenerator {
    layout: PlanLayout,
}

impl TaskPlanGenerator {
    pub fn new(layout: PlanLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PlanLayout {
        &self.layout
    }

    /// Layout access between runs (enable or disable candidates).
    pub fn layout_mut(&mut self) -> &mut PlanLayout {
        &mut self.layout
    }

    /// Generate one account's plan.
    ///
    /// Draw order: body categories in declared order, the body shuffle, then
    /// the collect draw. Head and terminal consume no randomness.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> TaskPlan {
        let mut actions: Vec<ActionId> = Vec::new();

        for pool in self.layout.head() {
            actions.extend(pool.enabled_actions().into_iter().cloned());
        }
        let head_len = actions.len();

        let mut body: Vec<ActionId> = Vec::new();
        for pool in self.layout.body() {
            select_into(pool, rng, &mut body);
        }
        body.shuffle(rng);
        let body_len = body.len();
        actions.extend(body);

        if let Some(collect) = self.layout.collect() {
            if let SelectionRule::ProbabilitySingle { probability } = collect.rule() {
                let roll: f64 = rng.gen_range(0.0..100.0);
                if roll < probability {
                    if let Some(action) = collect.enabled_actions().choose(rng) {
                        actions.push((*action).clone());
                    }
                }
            }
        }

        if let Some(terminal) = self.layout.terminal() {
            if let Some(action) = terminal.enabled_actions().first() {
                actions.push((*action).clone());
            }
        }

        let plan = TaskPlan {
            actions,
            head_len,
            body_len,
        };
        tracing::debug!(
            head = plan.head().len(),
            body = plan.body().len(),
            tail = plan.tail().len(),
            "Generated task plan"
        );
        plan
    }
}

/// Apply one body category's rule, appending its picks to `out` unshuffled.
fn select_into<R: Rng + ?Sized>(pool: &CategoryPool, rng: &mut R, out: &mut Vec<ActionId>) {
    let enabled = pool.enabled_actions();
    if enabled.is_empty() {
        return;
    }
    match pool.rule() {
        SelectionRule::FixedAll => {
            out.extend(enabled.into_iter().cloned());
        }
        SelectionRule::RangeSample { min, max } => {
            let effective_max = max.min(enabled.len());
            let effective_min = min.min(effective_max);
            let k = rng.gen_range(effective_min..=effective_max);
            if k > 0 {
                out.extend(enabled.choose_multiple(rng, k).map(|a| (*a).clone()));
            }
        }
        SelectionRule::ProbabilitySingle { probability } => {
            let roll: f64 = rng.gen_range(0.0..100.0);
            if roll < probability {
                if let Some(action) = enabled.choose(rng) {
                    out.push((*action).clone());
                }
            }
        }
        // Rejected for the body role by the layout.
        SelectionRule::FixedTerminal => {}
    }
}
