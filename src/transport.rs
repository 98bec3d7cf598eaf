//! Frame source abstraction.
//!
//! The BLE link itself (scanning, connecting, retrying) lives outside this
//! crate. Whatever owns the connection exposes it as a [`FrameSource`]: one
//! call reads the telemetry characteristic
//! ([`READ_CHARACTERISTIC_UUID`](crate::consts::READ_CHARACTERISTIC_UUID))
//! once.

use core::fmt::Debug;

/// A connected probe that can be asked for its current frame.
pub trait FrameSource {
    /// Associated error type for link failures.
    type Error: Debug;

    /// Transport address of the probe (e.g. its BLE MAC address).
    fn address(&self) -> &str;

    /// Attempts to read one raw frame into `buf`.
    ///
    /// Returns `Ok(len)` with the length of the frame, or
    /// `Err(nb::Error::WouldBlock)` if the read has not completed yet. Link
    /// failures are returned as `Err(nb::Error::Other(Self::Error))`.
    ///
    /// A `len` larger than `buf.len()` reports a frame that did not fit; only
    /// the first `buf.len()` bytes are written.
    fn read_frame(&mut self, buf: &mut [u8]) -> nb::Result<usize, Self::Error>;
}

impl<T: FrameSource + ?Sized> FrameSource for &mut T {
    type Error = T::Error;

    fn address(&self) -> &str {
        (**self).address()
    }

    fn read_frame(&mut self, buf: &mut [u8]) -> nb::Result<usize, Self::Error> {
        (**self).read_frame(buf)
    }
}
