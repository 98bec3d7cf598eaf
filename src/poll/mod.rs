//! Polling helpers for hosts that drive the probe themselves.
//!
//! Scheduling policy belongs to the host. This module only provides the
//! pieces most hosts need around [`C600Probe::update`]:
//!
//! - [`SnapshotSlot`]: an interrupt-safe cell holding the last good snapshot
//!   (feature `shared-snapshot`)
//! - [`poll_once`]: one update cycle that publishes into a slot and leaves it
//!   untouched on failure (feature `shared-snapshot`)
//! - [`run_poll_loop`]: a blocking loop pacing [`poll_once`] with a
//!   `DelayNs` provider (features `delay-loop` and `shared-snapshot`)
//!
//! [`C600Probe::update`]: crate::probe::C600Probe::update

#[cfg(feature = "shared-snapshot")]
mod slot;
#[cfg(feature = "shared-snapshot")]
pub use slot::*;

#[cfg(all(feature = "delay-loop", feature = "shared-snapshot"))]
mod delay;
#[cfg(all(feature = "delay-loop", feature = "shared-snapshot"))]
pub use delay::*;

use crate::consts::DEFAULT_SCAN_INTERVAL_SECS;

/// Milliseconds in one second.
pub const MILLIS_PER_SECOND: u32 = 1_000;

/// Converts a poll interval in seconds to milliseconds, saturating at `u32::MAX`.
pub const fn interval_ms(secs: u32) -> u32 {
    secs.saturating_mul(MILLIS_PER_SECOND)
}

/// [`DEFAULT_SCAN_INTERVAL_SECS`] in milliseconds.
pub const DEFAULT_SCAN_INTERVAL_MS: u32 = interval_ms(DEFAULT_SCAN_INTERVAL_SECS);
