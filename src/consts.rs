//! Constants describing the BLE-C600 telemetry frame and its transport.
//!
//! This module defines the byte layout of the descrambled frame, the size
//! limits used for buffers, and the identifiers the host needs to find the
//! right characteristic.
//!
//! ## Frame layout
//!
//! All multi-byte fields are signed 16-bit big-endian words. Offsets index
//! the *descrambled* frame.
//!
//! | Offset | Width | Field |
//! |--------|-------|-------|
//! | 1      | 1     | protocol constant |
//! | 2      | 1     | product-name code |
//! | 3      | 2     | pH (x100) |
//! | 5      | 2     | electrical conductivity |
//! | 7      | 2     | total dissolved solids |
//! | 9      | 2     | oxidation-reduction potential (mV) |
//! | 11     | 2     | free chlorine (x10) |
//! | 13     | 2     | temperature (x10, °C) |
//! | 15     | 2     | battery (raw) |
//! | 17     | 1     | status flags |
//!
//! These values should be used wherever field extraction or buffer sizing is
//! implemented so that every layer agrees on the frame boundaries.

/// 128-bit UUID of the characteristic carrying the telemetry frame.
pub const READ_CHARACTERISTIC_UUID: &str = "0000ff02-0000-1000-8000-00805f9b34fb";

/// See [`READ_CHARACTERISTIC_UUID`](crate::consts::READ_CHARACTERISTIC_UUID)
pub const READ_CHARACTERISTIC_UUID_U128: u128 = 0x0000ff02_0000_1000_8000_00805f9b34fb;

/// Prefix of the local name the probe advertises.
pub const DEVICE_NAME_PREFIX: &str = "BLE-C600";

/// Smallest frame in which every known field can be read.
///
/// The highest accessed offset is the status byte at 17.
pub const MIN_FRAME_LEN: usize = 18;

/// Capacity of the buffer a frame is read into.
///
/// The probe rejects longer frames with
/// [`DecodeError::FrameTooLong`](crate::error::DecodeError::FrameTooLong).
pub const MAX_FRAME_LEN: usize = 64;

/// Capacity of address and version strings when built without `std`.
pub const TEXT_CAPACITY: usize = 32;

/// Default number of seconds between two reads of the characteristic.
pub const DEFAULT_SCAN_INTERVAL_SECS: u32 = 60;

/// Offset of the protocol constant byte.
pub const PROTOCOL_OFFSET: usize = 1;
/// Offset of the product-name code byte.
pub const PRODUCT_CODE_OFFSET: usize = 2;
/// Offset of the pH word.
pub const PH_OFFSET: usize = 3;
/// Offset of the electrical conductivity word.
pub const EC_OFFSET: usize = 5;
/// Offset of the total dissolved solids word.
pub const TDS_OFFSET: usize = 7;
/// Offset of the oxidation-reduction potential word.
pub const ORP_OFFSET: usize = 9;
/// Offset of the free chlorine word.
pub const CHLORINE_OFFSET: usize = 11;
/// Offset of the temperature word.
pub const TEMPERATURE_OFFSET: usize = 13;
/// Offset of the battery word.
pub const BATTERY_OFFSET: usize = 15;
/// Offset of the packed status byte.
pub const STATUS_OFFSET: usize = 17;

/// Salinity in ppm per unit of electrical conductivity.
pub const SALT_PER_EC: f64 = 0.55;

/// Returns `true` if an advertised local name belongs to a C600 probe.
pub fn is_c600_name(local_name: &str) -> bool {
    local_name.starts_with(DEVICE_NAME_PREFIX)
}
