use crate::category::{CategoryPool, SelectionRule};
use crate::error::CategoryError;
use serde::{Deserialize, Serialize};

/// Structural position of a category within a task plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryRole {
    /// Ordered prefix, never shuffled.
    Head,
    /// Middle segment, shuffled across all body categories together.
    Body,
    /// Probability draw placed after the body.
    Collect,
    /// Designated last action.
    Terminal,
}

impl CategoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryRole::Head => "head",
            CategoryRole::Body => "body",
            CategoryRole::Collect => "collect",
            CategoryRole::Terminal => "terminal",
        }
    }

    /// Whether a category with `rule` may take this role.
    pub fn accepts(&self, rule: SelectionRule) -> bool {
        match self {
            CategoryRole::Head => matches!(rule, SelectionRule::FixedAll),
            CategoryRole::Body => matches!(
                rule,
                SelectionRule::FixedAll
                    | SelectionRule::RangeSample { .. }
                    | SelectionRule::ProbabilitySingle { .. }
            ),
            CategoryRole::Collect => matches!(rule, SelectionRule::ProbabilitySingle { .. }),
            CategoryRole::Terminal => matches!(rule, SelectionRule::FixedTerminal),
        }
    }
}

/// Category pools partitioned by role.
///
/// Head and body keep insertion order. At most one collect and one terminal
/// category exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanLayout {
    head: Vec<CategoryPool>,
    body: Vec<CategoryPool>,
    collect: Option<CategoryPool>,
    terminal: Option<CategoryPool>,
}

impl PlanLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from `(role, pool)` pairs in declared order.
    pub fn from_roles<I>(pools: I) -> Result<Self, CategoryError>
    where
        I: IntoIterator<Item = (CategoryRole, CategoryPool)>,
    {
        let mut layout = Self::new();
        for (role, pool) in pools {
            layout.push(role, pool)?;
        }
        Ok(layout)
    }

    /// Add `pool` under `role`, rejecting rules the role does not accept.
    pub fn push(&mut self, role: CategoryRole, pool: CategoryPool) -> Result<(), CategoryError> {
        if !role.accepts(pool.rule()) {
            return Err(CategoryError::InvalidRole {
                category: pool.name().to_string(),
                role: role.as_str(),
                rule: pool.rule().name(),
            });
        }
        match role {
            CategoryRole::Head => self.head.push(pool),
            CategoryRole::Body => self.body.push(pool),
            CategoryRole::Collect => Self::set_single(&mut self.collect, role, pool)?,
            CategoryRole::Terminal => Self::set_single(&mut self.terminal, role, pool)?,
        }
        Ok(())
    }

    fn set_single(
        slot: &mut Option<CategoryPool>,
        role: CategoryRole,
        pool: CategoryPool,
    ) -> Result<(), CategoryError> {
        if let Some(existing) = slot {
            return Err(CategoryError::DuplicateRole {
                role: role.as_str(),
                first: existing.name().to_string(),
                second: pool.name().to_string(),
            });
        }
        *slot = Some(pool);
        Ok(())
    }

    pub fn with(mut self, role: CategoryRole, pool: CategoryPool) -> Result<Self, CategoryError> {
        self.push(role, pool)?;
        Ok(self)
    }

    pub fn head(&self) -> &[CategoryPool] {
        &self.head
    }

    pub fn body(&self) -> &[CategoryPool] {
        &self.body
    }

    pub fn collect(&self) -> Option<&CategoryPool> {
        self.collect.as_ref()
    }

    pub fn terminal(&self) -> Option<&CategoryPool> {
        self.terminal.as_ref()
    }

    /// All pools with their roles, head first, terminal last.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryRole, &CategoryPool)> {
        self.head
            .iter()
            .map(|p| (CategoryRole::Head, p))
            .chain(self.body.iter().map(|p| (CategoryRole::Body, p)))
            .chain(self.collect.iter().map(|p| (CategoryRole::Collect, p)))
            .chain(self.terminal.iter().map(|p| (CategoryRole::Terminal, p)))
    }

    /// Mutable access for toggling candidates between runs.
    pub fn pool_mut(&mut self, name: &str) -> Option<&mut CategoryPool> {
        self.head
            .iter_mut()
            .chain(self.body.iter_mut())
            .chain(self.collect.iter_mut())
            .chain(self.terminal.iter_mut())
            .find(|p| p.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_empty()
            && self.body.is_empty()
            && self.collect.is_none()
            && self.terminal.is_none()
    }
}
