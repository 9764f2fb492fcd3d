//! Account selection for a run.
//!
//! Resolution order: a non-zero `range` wins; with `range = [0, 0]` an
//! `exact` list is used as given; otherwise every key in `keys_file` is an
//! account, numbered from 1.

use crate::error::AccountError;
use crate::types::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Account selection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsConfig {
    /// Inclusive 1-based range; `[0, 0]` means "not set"
    #[serde(default)]
    pub range: [usize; 2],

    /// Explicit account indices, in launch order
    #[serde(default)]
    pub exact: Vec<AccountId>,

    /// Key file, one key per non-blank line; relative to the workspace root
    #[serde(default = "default_keys_file")]
    pub keys_file: PathBuf,
}

fn default_keys_file() -> PathBuf {
    PathBuf::from("data/private_keys.txt")
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            range: [0, 0],
            exact: Vec::new(),
            keys_file: default_keys_file(),
        }
    }
}

impl AccountsConfig {
    /// Static checks that need no filesystem access.
    pub fn validate(&self) -> Result<(), AccountError> {
        let [start, end] = self.range;
        if (start, end) != (0, 0) {
            if start == 0 || end < start {
                return Err(AccountError::InvalidRange { start, end });
            }
        } else {
            if self.exact.iter().any(|&id| id == 0) {
                return Err(AccountError::ZeroIndex);
            }
            ensure_unique(&self.exact)?;
        }
        Ok(())
    }

    /// Ordered account list for the run.
    pub fn resolve(&self, workspace_root: &Path) -> Result<Vec<AccountId>, AccountError> {
        self.validate()?;
        let [start, end] = self.range;
        let accounts: Vec<AccountId> = if (start, end) != (0, 0) {
            (start..=end).collect()
        } else if !self.exact.is_empty() {
            self.exact.clone()
        } else {
            let count = count_keys(&self.keys_path(workspace_root))?;
            (1..=count).collect()
        };

        if accounts.is_empty() {
            return Err(AccountError::Empty);
        }
        tracing::debug!(count = accounts.len(), "Resolved accounts");
        Ok(accounts)
    }

    pub fn keys_path(&self, workspace_root: &Path) -> PathBuf {
        if self.keys_file.is_absolute() {
            self.keys_file.clone()
        } else {
            workspace_root.join(&self.keys_file)
        }
    }
}

/// First `count` accounts, for CLI overrides.
pub fn first_accounts(count: usize) -> Result<Vec<AccountId>, AccountError> {
    if count == 0 {
        return Err(AccountError::Empty);
    }
    Ok((1..=count).collect())
}

/// Reject an account list that names the same account twice.
pub fn ensure_unique(accounts: &[AccountId]) -> Result<(), AccountError> {
    let mut seen = HashSet::with_capacity(accounts.len());
    match accounts.iter().find(|&&id| !seen.insert(id)) {
        Some(&id) => Err(AccountError::DuplicateAccount(id)),
        None => Ok(()),
    }
}

fn count_keys(path: &Path) -> Result<usize, AccountError> {
    if !path.exists() {
        return Err(AccountError::KeysFileMissing(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().filter(|line| !line.trim().is_empty()).count())
}
