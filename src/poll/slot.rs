use crate::error::UpdateError;
use crate::probe::C600Probe;
use crate::snapshot::DeviceSnapshot;
use crate::transport::FrameSource;
use core::cell::RefCell;
use core::fmt;
use critical_section::Mutex;

/// Holds the most recent successfully decoded snapshot.
///
/// Safe to share between the main loop and interrupt handlers; every access
/// runs inside `critical_section::with`. Suitable for a `static`:
///
/// ```rust
/// use c600::poll::SnapshotSlot;
///
/// static LATEST: SnapshotSlot = SnapshotSlot::new();
///
/// assert!(LATEST.latest().is_none());
/// ```
pub struct SnapshotSlot {
    inner: Mutex<RefCell<Option<DeviceSnapshot>>>,
}

impl SnapshotSlot {
    /// An empty slot.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Stores `snapshot`, returning the one it replaces.
    pub fn publish(&self, snapshot: DeviceSnapshot) -> Option<DeviceSnapshot> {
        critical_section::with(|cs| self.inner.borrow(cs).replace(Some(snapshot)))
    }

    /// A copy of the most recent snapshot.
    pub fn latest(&self) -> Option<DeviceSnapshot> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().clone())
    }

    /// Runs `f` on the most recent snapshot without copying it.
    pub fn with<R>(&self, f: impl FnOnce(Option<&DeviceSnapshot>) -> R) -> R {
        critical_section::with(|cs| f(self.inner.borrow(cs).borrow().as_ref()))
    }

    /// Removes and returns the most recent snapshot.
    pub fn take(&self) -> Option<DeviceSnapshot> {
        critical_section::with(|cs| self.inner.borrow(cs).take())
    }
}

impl Default for SnapshotSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SnapshotSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotSlot").finish_non_exhaustive()
    }
}

/// Runs one update cycle and publishes the result into `slot`.
///
/// On failure the slot keeps its previous snapshot, so consumers keep seeing
/// the last good readings instead of zeros. The error is returned for the
/// host to report as a failed update.
pub fn poll_once<S: FrameSource>(
    probe: &mut C600Probe<S>,
    slot: &SnapshotSlot,
) -> Result<(), UpdateError<S::Error>> {
    match probe.update() {
        Ok(snapshot) => {
            debug!("publishing snapshot with {} readings", snapshot.readings.len());
            let _ = slot.publish(snapshot);
            Ok(())
        }
        Err(e) => {
            warn!(
                "update of {} failed ({}), keeping previous snapshot",
                probe.source().address(),
                if e.is_transport() { "transport" } else { "decode" }
            );
            Err(e)
        }
    }
}
