//! # c600
//!
//! A portable, no_std decoder for the telemetry frame of the BLE-C600
//! water-quality probe.
//!
//! The probe publishes one obfuscated frame on a BLE characteristic. This
//! crate turns that frame into calibrated readings:
//!
//! - a bit-exact **descrambler** reversing the device's per-pair bit-lane
//!   exchange
//! - fixed-offset **field extraction** of signed big-endian words
//! - per-sensor **scaling rules** for pH, ORP, EC, salt, TDS, free chlorine,
//!   temperature and battery
//!
//! The BLE connection stays with the host; it is plugged in through the
//! [`FrameSource`] trait.
//!
//! ## Crate features
//! | Feature                     | Description |
//! |-----------------------------|-------------|
//! | `std`                       | Disables `#![no_std]` support and replaces `heapless::String`s with `std::string::String`s |
//! | `shared-snapshot` (default) | Interrupt-safe [`poll::SnapshotSlot`] using `critical_section::with` |
//! | `delay-loop`                | Blocking poll loop driven by `embedded_hal::delay::DelayNs` |
//! | `defmt-0-3`                 | Uses `defmt` logging |
//! | `log`                       | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust
//! use c600::{map_sensors, BatteryCalibration, DecodePolicy, DescrambledFrame, Sensor};
//!
//! // One frame as read from the characteristic.
//! let mut raw = [
//!     0xFF, 0x88, 0xFE, 0x77, 0xF6, 0x8A, 0xFD, 0xAF, 0xFC, 0x6F, 0xFF, 0x96, 0xFD, 0xF8, 0xF7,
//!     0x53, 0xFB, 0x73,
//! ];
//! let frame = DescrambledFrame::descramble(&mut raw);
//! let readings = map_sensors(&frame, &BatteryCalibration::C600_DEFAULT, DecodePolicy::Lenient)?;
//!
//! for reading in readings.iter() {
//!     println!("{}: {}", reading.sensor.name(), reading.value);
//! }
//! assert_eq!(readings.get(Sensor::Temperature).map(|v| v.as_f64()), Some(26.5));
//! # Ok::<(), c600::DecodeError>(())
//! ```
//!
//! ## Error handling
//!
//! - Battery calibration with equal empty/full references is rejected up
//!   front ([`CalibrationError`]).
//! - Short frames either lose the unreadable fields or fail as a whole,
//!   depending on [`DecodePolicy`].
//! - [`C600Probe::update`] separates link failures ([`UpdateError::Transport`])
//!   from malformed frames ([`UpdateError::Decode`]).
//!
//! --
//! Designed for `#![no_std]` use on BLE-capable microcontrollers as well as
//! hosts with `std`.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

#[cfg(feature = "shared-snapshot")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod calibration;
pub mod consts;
pub mod descramble;
pub mod error;
pub mod frame;
pub mod mapper;
pub mod poll;
pub mod probe;
pub mod sensor;
pub mod snapshot;
pub mod transport;

pub use calibration::BatteryCalibration;
pub use descramble::{descramble_buffer, descramble_in_place, scramble_in_place};
pub use error::{CalibrationError, DecodeError, FieldError, UpdateError};
pub use frame::{DescrambledFrame, FrameHeader, StatusFlags, read_i16, read_u8};
pub use mapper::{DecodePolicy, DecoderConfig, map_sensors};
pub use probe::C600Probe;
pub use sensor::{Sensor, SensorReading, SensorReadings, SensorValue, Unit};
pub use snapshot::DeviceSnapshot;
pub use transport::FrameSource;
