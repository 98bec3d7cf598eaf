//! One update cycle against a connected C600 probe.
//!
//! [`C600Probe`] owns a [`FrameSource`] and a fixed frame buffer. Each call
//! to [`update`](C600Probe::update) reads one frame, descrambles it in the
//! buffer, decodes the header and sensors, and returns a fresh
//! [`DeviceSnapshot`].
//!
//! ## Example
//!
//! ```rust
//! use c600::{C600Probe, DecoderConfig, FrameSource};
//!
//! struct Link;
//!
//! impl FrameSource for Link {
//!     type Error = ();
//!     fn address(&self) -> &str {
//!         "C4:7C:8D:6A:3B:01"
//!     }
//!     fn read_frame(&mut self, _buf: &mut [u8]) -> nb::Result<usize, ()> {
//!         Err(nb::Error::Other(()))
//!     }
//! }
//!
//! let mut probe = C600Probe::new(Link, DecoderConfig::default());
//! assert!(probe.update().unwrap_err().is_transport());
//! ```

use crate::consts::MAX_FRAME_LEN;
use crate::error::{DecodeError, UpdateError};
use crate::frame::{DescrambledFrame, FrameHeader};
use crate::mapper::{DecoderConfig, map_sensors};
use crate::snapshot::{DeviceSnapshot, Text, text};
use crate::transport::FrameSource;

/// A C600 probe reachable through a [`FrameSource`].
#[derive(Debug)]
pub struct C600Probe<S> {
    source: S,
    config: DecoderConfig,
    identifier: Option<Text>,
    hw_version: Option<Text>,
    sw_version: Option<Text>,
    buf: [u8; MAX_FRAME_LEN],
}

impl<S: FrameSource> C600Probe<S> {
    /// Creates a probe reading from `source`.
    pub fn new(source: S, config: DecoderConfig) -> Self {
        Self {
            source,
            config,
            identifier: None,
            hw_version: None,
            sw_version: None,
            buf: [0; MAX_FRAME_LEN],
        }
    }

    /// Sets the advertised local name copied into every snapshot.
    ///
    /// Usually the name that matched [`is_c600_name`](crate::consts::is_c600_name)
    /// during discovery.
    pub fn set_identifier(&mut self, identifier: Option<&str>) {
        self.identifier = identifier.map(text);
    }

    /// Sets the version strings copied into every snapshot.
    ///
    /// The frame does not carry them; the host learns them elsewhere.
    pub fn set_versions(&mut self, hw_version: Option<&str>, sw_version: Option<&str>) {
        self.hw_version = hw_version.map(text);
        self.sw_version = sw_version.map(text);
    }

    /// The decoder settings.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The underlying frame source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the underlying frame source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the probe and returns its frame source.
    pub fn release(self) -> S {
        self.source
    }

    /// Reads and decodes one frame.
    ///
    /// Blocks until the source completes the read.
    ///
    /// # Errors
    /// - [`UpdateError::Transport`] if the source failed to read.
    /// - [`UpdateError::Decode`] if the frame is longer than [`MAX_FRAME_LEN`]
    ///   or could not be decoded under the configured policy.
    pub fn update(&mut self) -> Result<DeviceSnapshot, UpdateError<S::Error>> {
        let len =
            nb::block!(self.source.read_frame(&mut self.buf)).map_err(UpdateError::Transport)?;
        if len > MAX_FRAME_LEN {
            return Err(DecodeError::FrameTooLong {
                len,
                max: MAX_FRAME_LEN,
            }
            .into());
        }
        debug!("raw frame from {}: {:?}", self.source.address(), &self.buf[..len]);

        let frame = DescrambledFrame::descramble(&mut self.buf[..len]);
        debug!("descrambled frame: {:?}", frame.as_bytes());

        let header = FrameHeader::parse(&frame);
        let readings = map_sensors(&frame, &self.config.calibration, self.config.policy)?;

        let mut snapshot = DeviceSnapshot::new(self.source.address(), header, readings);
        snapshot.identifier = self.identifier.clone();
        snapshot.hw_version = self.hw_version.clone();
        snapshot.sw_version = self.sw_version.clone();
        Ok(snapshot)
    }
}
