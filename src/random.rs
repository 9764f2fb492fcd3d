//! Randomness source for a run.
//!
//! A seeded source makes a whole run reproducible: `prepare_run` draws the
//! schedule first and then one plan per account, in account order.

use crate::error::LaunchError;
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator type used by the CLI and the run builder.
pub type RunRng = ChaCha8Rng;

/// Build the run generator: seeded when `seed` is set, otherwise from OS entropy.
///
/// Entropy failures are returned as [`LaunchError::Randomness`]; no retry.
pub fn run_rng(seed: Option<u64>) -> Result<RunRng, LaunchError> {
    match seed {
        Some(seed) => Ok(ChaCha8Rng::seed_from_u64(seed)),
        None => Ok(ChaCha8Rng::from_rng(OsRng)?),
    }
}
