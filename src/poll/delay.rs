use super::{SnapshotSlot, interval_ms, poll_once};
use crate::error::UpdateError;
use crate::probe::C600Probe;
use crate::transport::FrameSource;
use embedded_hal::delay::DelayNs;

/// Runs one update cycle, publishes it, then waits `interval_secs`.
///
/// Returns the outcome of the update; the wait happens either way.
pub fn poll_and_wait<S: FrameSource, D: DelayNs>(
    probe: &mut C600Probe<S>,
    slot: &SnapshotSlot,
    delay: &mut D,
    interval_secs: u32,
) -> Result<(), UpdateError<S::Error>> {
    let result = poll_once(probe, slot);
    delay.delay_ms(interval_ms(interval_secs));
    result
}

/// Runs a blocking loop that polls the probe every `interval_secs`.
///
/// # Arguments
/// - `probe`: The probe to read from.
/// - `slot`: Where successful snapshots are published.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `interval_secs`: Seconds between reads, e.g.
///   [`DEFAULT_SCAN_INTERVAL_SECS`](crate::consts::DEFAULT_SCAN_INTERVAL_SECS).
///
/// # Example
/// ```rust,no_run
/// # use c600::{C600Probe, DecoderConfig, FrameSource};
/// # use c600::consts::DEFAULT_SCAN_INTERVAL_SECS;
/// # use c600::poll::{run_poll_loop, SnapshotSlot};
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// # struct Link;
/// # impl FrameSource for Link {
/// #     type Error = ();
/// #     fn address(&self) -> &str { "" }
/// #     fn read_frame(&mut self, _: &mut [u8]) -> nb::Result<usize, ()> {
/// #         Err(nb::Error::Other(()))
/// #     }
/// # }
/// static LATEST: SnapshotSlot = SnapshotSlot::new();
///
/// let mut probe = C600Probe::new(Link, DecoderConfig::default());
/// let mut delay = NoopDelay::new();
/// run_poll_loop(&mut probe, &LATEST, &mut delay, DEFAULT_SCAN_INTERVAL_SECS);
/// ```
///
/// # Notes
/// - This loop never returns; it is intended for single-purpose polling firmware.
/// - Failed updates are logged and skipped; the slot keeps the last good snapshot.
pub fn run_poll_loop<S: FrameSource, D: DelayNs>(
    probe: &mut C600Probe<S>,
    slot: &SnapshotSlot,
    delay: &mut D,
    interval_secs: u32,
) {
    loop {
        let _ = poll_and_wait(probe, slot, delay, interval_secs);
    }
}
