//! Device snapshots: everything known about the probe after one update.

use crate::frame::FrameHeader;
use crate::sensor::{Sensor, SensorReadings, SensorValue};

#[cfg(not(feature = "std"))]
use crate::consts::TEXT_CAPACITY;

/// String type for addresses and version strings.
#[cfg(feature = "std")]
pub type Text = String;

/// String type for addresses and version strings.
///
/// Without `std` this is a fixed-capacity string; longer input is truncated
/// at a character boundary.
#[cfg(not(feature = "std"))]
pub type Text = heapless::String<TEXT_CAPACITY>;

/// Builds a [`Text`] from a string slice.
#[cfg(feature = "std")]
pub fn text(s: &str) -> Text {
    Text::from(s)
}

/// Builds a [`Text`] from a string slice.
#[cfg(not(feature = "std"))]
pub fn text(s: &str) -> Text {
    let mut out = Text::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// The result of one successful update cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    /// Transport address of the probe.
    pub address: Text,
    /// Advertised local name (e.g. `BLE-C600 1234`), if the host kept it
    /// from discovery.
    pub identifier: Option<Text>,
    /// Hardware version, if the host knows it.
    pub hw_version: Option<Text>,
    /// Software version, if the host knows it.
    pub sw_version: Option<Text>,
    /// Header fields of the decoded frame.
    pub header: FrameHeader,
    /// Decoded sensor readings.
    pub readings: SensorReadings,
}

impl DeviceSnapshot {
    /// Creates a snapshot without version information.
    pub fn new(address: &str, header: FrameHeader, readings: SensorReadings) -> Self {
        Self {
            address: text(address),
            identifier: None,
            hw_version: None,
            sw_version: None,
            header,
            readings,
        }
    }

    /// Sets the advertised local name.
    pub fn with_identifier(mut self, name: &str) -> Self {
        self.identifier = Some(text(name));
        self
    }

    /// Sets the hardware version.
    pub fn with_hw_version(mut self, version: &str) -> Self {
        self.hw_version = Some(text(version));
        self
    }

    /// Sets the software version.
    pub fn with_sw_version(mut self, version: &str) -> Self {
        self.sw_version = Some(text(version));
        self
    }

    /// Shorthand for `self.readings.get(sensor)`.
    pub fn reading(&self, sensor: Sensor) -> Option<SensorValue> {
        self.readings.get(sensor)
    }
}
