//! Battery calibration.
//!
//! The probe reports its battery as a raw reading. Two reference values, the
//! raw reading of an empty and of a full battery, map it linearly onto a
//! percentage:
//!
//! ```text
//! percent = clamp(round(100 * (raw - empty) / (full - empty)), 0, 100)
//! ```
//!
//! Rounding is half-to-even. Readings outside the calibrated range are
//! clamped instead of rejected, since the device drifts slightly past both
//! ends.

use libm::rint;

use crate::error::CalibrationError;

/// Raw battery readings for an empty and a full battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct BatteryCalibration {
    empty: i16,
    full: i16,
}

impl BatteryCalibration {
    /// Factory calibration of the C600.
    ///
    /// The probe's own firmware shows `raw / 31.9` as its battery
    /// percentage, i.e. an empty reference of 0 and a full reference of 3190.
    pub const C600_DEFAULT: Self = Self {
        empty: 0,
        full: 3190,
    };

    /// Creates a calibration from the empty and full reference readings.
    ///
    /// Fails if both are equal, which would make every percentage a
    /// division by zero.
    pub const fn new(empty: i16, full: i16) -> Result<Self, CalibrationError> {
        if empty == full {
            return Err(CalibrationError::Degenerate { raw: empty });
        }
        Ok(Self { empty, full })
    }

    /// Raw reading of an empty battery.
    pub const fn empty(&self) -> i16 {
        self.empty
    }

    /// Raw reading of a full battery.
    pub const fn full(&self) -> i16 {
        self.full
    }

    /// Converts a raw battery reading to a percentage in `0..=100`.
    pub fn percent(&self, raw: i16) -> u8 {
        let span = f64::from(i32::from(self.full) - i32::from(self.empty));
        let above_empty = f64::from(i32::from(raw) - i32::from(self.empty));
        let percent = rint(100.0 * above_empty / span);
        percent.clamp(0.0, 100.0) as u8
    }
}

impl Default for BatteryCalibration {
    fn default() -> Self {
        Self::C600_DEFAULT
    }
}
