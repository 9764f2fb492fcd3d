//! Shared identifiers.

/// Opaque action identifier, matched by the external executor.
pub type ActionId = String;

/// 1-based account index.
pub type AccountId = usize;
