//! Merge rules for layered configuration.

pub mod merge_policy;

pub use merge_policy::builder_with_defaults;
