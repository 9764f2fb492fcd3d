//! Launch scheduling: staggered start offsets spanning a fixed window.
//!
//! The window is split into `N - 1` random non-negative increments that sum
//! to exactly `W`. Each increment is drawn between an adaptive spacing floor
//! and its fair share of what is left; the last one takes the remainder. The
//! floor gives way when the window is too tight, full consumption never does.

use crate::error::ScheduleError;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone};
use rand::Rng;
use serde::Serialize;
use std::time::Duration;

/// Default minimum spacing between consecutive launches, in seconds.
pub const DEFAULT_MIN_SPACING_SECS: u64 = 300;

const SECS_PER_HOUR: u64 = 3600;

/// Convert a window in whole hours to seconds.
pub fn window_from_hours(hours: u64) -> Result<u64, ScheduleError> {
    hours
        .checked_mul(SECS_PER_HOUR)
        .ok_or(ScheduleError::WindowOverflow { hours })
}

/// Start offsets, in seconds from the run epoch, one per account in run order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    offsets: Vec<u64>,
}

impl Schedule {
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offset(&self, index: usize) -> Option<u64> {
        self.offsets.get(index).copied()
    }

    /// Total span: the last offset.
    pub fn window_secs(&self) -> u64 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Gap before each launch; the first launch has none.
    pub fn increments(&self) -> Vec<u64> {
        let mut previous = 0;
        self.offsets
            .iter()
            .map(|&offset| {
                let gap = offset.saturating_sub(previous);
                previous = offset;
                gap
            })
            .collect()
    }

    /// Wall-clock launch times relative to `epoch`, or `None` if any falls
    /// outside the representable date range.
    pub fn launch_times<Tz: TimeZone>(&self, epoch: &DateTime<Tz>) -> Option<Vec<DateTime<Tz>>> {
        self.offsets
            .iter()
            .map(|&offset| {
                let secs = i64::try_from(offset).ok()?;
                epoch
                    .clone()
                    .checked_add_signed(ChronoDuration::try_seconds(secs)?)
            })
            .collect()
    }

    pub fn start_delay(&self, index: usize) -> Option<Duration> {
        self.offset(index).map(Duration::from_secs)
    }
}

/// Human rendering of an offset: `immediately` or `in 1h 2m 3s`.
pub fn format_offset(offset_secs: u64) -> String {
    if offset_secs == 0 {
        return "immediately".to_string();
    }
    let hours = offset_secs / SECS_PER_HOUR;
    let minutes = (offset_secs % SECS_PER_HOUR) / 60;
    let seconds = offset_secs % 60;
    format!("in {}h {}m {}s", hours, minutes, seconds)
}

/// Computes launch schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchScheduler {
    min_spacing_floor_secs: u64,
}

impl Default for LaunchScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SPACING_SECS)
    }
}

impl LaunchScheduler {
    pub fn new(min_spacing_floor_secs: u64) -> Self {
        Self {
            min_spacing_floor_secs,
        }
    }

    pub fn min_spacing_floor_secs(&self) -> u64 {
        self.min_spacing_floor_secs
    }

    /// Spacing floor for `accounts` launches over `window_secs`.
    ///
    /// Sparse runs keep at least the configured floor; dense runs use a
    /// share of the window instead.
    pub fn min_interval(&self, accounts: usize, window_secs: u64) -> u64 {
        let divisor = (accounts as u64).saturating_mul(2).max(1);
        self.min_spacing_floor_secs.max(window_secs / divisor)
    }

    /// Compute `accounts` offsets spanning exactly `window_secs`.
    ///
    /// Draws `accounts - 2` values from `rng` (the last slot is forced).
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        accounts: usize,
        window_secs: u64,
        rng: &mut R,
    ) -> Result<Schedule, ScheduleError> {
        if accounts == 0 {
            return Err(ScheduleError::NoAccounts);
        }

        let mut offsets = Vec::with_capacity(accounts);
        offsets.push(0);
        if accounts == 1 {
            return Ok(Schedule { offsets });
        }

        let slots = accounts - 1;
        let min_interval = self.min_interval(accounts, window_secs);
        let mut remaining = window_secs;
        let mut elapsed = 0u64;

        for slot in 0..slots {
            let delay = if slot == slots - 1 {
                remaining
            } else {
                let max_delay = remaining / (slots - slot) as u64;
                let min_delay = min_interval.min(max_delay);
                tracing::trace!(slot, min_delay, max_delay, "Drawing launch delay");
                rng.gen_range(min_delay..=max_delay)
            };
            remaining -= delay;
            elapsed += delay;
            offsets.push(elapsed);
        }

        tracing::debug!(
            accounts,
            window_secs,
            min_interval,
            "Computed launch schedule"
        );
        Ok(Schedule { offsets })
    }
}
