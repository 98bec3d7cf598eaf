//! Mapping of descrambled frames to calibrated sensor readings.
//!
//! Each sensor is a signed big-endian word at a fixed offset, scaled by a
//! per-sensor rule:
//!
//! | Sensor      | Offset | Rule |
//! |-------------|--------|------|
//! | pH          | 3      | `raw / 100` |
//! | EC          | 5      | `raw` |
//! | salt        | –      | `EC * 0.55` |
//! | TDS         | 7      | `raw` |
//! | ORP         | 9      | `raw / 1000` (mV to V) |
//! | cloro       | 11     | `raw / 10`, negative readings become 0 |
//! | temperature | 13     | `raw / 10` |
//! | battery     | 15     | see [`BatteryCalibration::percent`] |
//!
//! Fields are evaluated in offset order. What happens to a field that lies
//! past the end of a short frame is chosen with [`DecodePolicy`].

use crate::calibration::BatteryCalibration;
use crate::consts::{MIN_FRAME_LEN, SALT_PER_EC};
use crate::error::{DecodeError, FieldError};
use crate::frame::DescrambledFrame;
use crate::sensor::{Sensor, SensorReadings, SensorValue};

/// Word-backed sensors in the order they are decoded.
const DECODE_ORDER: [Sensor; 7] = [
    Sensor::Ph,
    Sensor::Ec,
    Sensor::Tds,
    Sensor::Orp,
    Sensor::Chlorine,
    Sensor::Temperature,
    Sensor::Battery,
];

/// What to do with a field that lies past the end of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum DecodePolicy {
    /// Log and omit the field. Fails only if no sensor could be read.
    #[default]
    Lenient,
    /// Fail the whole decode on the first unreadable field.
    Strict,
}

/// Settings shared by every decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Battery reference readings.
    pub calibration: BatteryCalibration,
    /// Short-frame handling.
    pub policy: DecodePolicy,
}

impl DecoderConfig {
    /// Creates a config from its parts.
    pub const fn new(calibration: BatteryCalibration, policy: DecodePolicy) -> Self {
        Self {
            calibration,
            policy,
        }
    }
}

/// Applies a sensor's scaling rule to its raw word.
fn scale(sensor: Sensor, raw: i16, calibration: &BatteryCalibration) -> SensorValue {
    match sensor {
        Sensor::Ph => SensorValue::Float(f64::from(raw) / 100.0),
        Sensor::Ec | Sensor::Tds => SensorValue::Int(i32::from(raw)),
        Sensor::Salt => SensorValue::Float(f64::from(raw) * SALT_PER_EC),
        Sensor::Orp => SensorValue::Float(f64::from(raw) / 1000.0),
        Sensor::Chlorine if raw < 0 => SensorValue::Float(0.0),
        Sensor::Chlorine | Sensor::Temperature => SensorValue::Float(f64::from(raw) / 10.0),
        Sensor::Battery => SensorValue::Int(i32::from(calibration.percent(raw))),
    }
}

/// Decodes every sensor from a descrambled frame.
///
/// # Returns
/// - The readings that could be decoded. Under [`DecodePolicy::Lenient`]
///   unreadable fields are missing from the set.
/// - [`DecodeError::FieldOutOfRange`] under [`DecodePolicy::Strict`] if any
///   sensor word lies past the end of the frame.
/// - [`DecodeError::FrameTooShort`] under [`DecodePolicy::Strict`] if every
///   sensor word is present but the status byte is not.
/// - [`DecodeError::FrameTooShort`] under [`DecodePolicy::Lenient`] if no
///   sensor could be read at all.
pub fn map_sensors(
    frame: &DescrambledFrame<'_>,
    calibration: &BatteryCalibration,
    policy: DecodePolicy,
) -> Result<SensorReadings, DecodeError> {
    let mut readings = SensorReadings::new();

    for sensor in DECODE_ORDER {
        let Some(offset) = sensor.offset() else {
            continue;
        };
        let raw = match frame.read_i16(offset) {
            Ok(raw) => raw,
            Err(FieldError::OutOfRange { offset, len }) => match policy {
                DecodePolicy::Strict => {
                    return Err(DecodeError::FieldOutOfRange { sensor, offset, len });
                }
                DecodePolicy::Lenient => {
                    warn!(
                        "omitting {:?}: offset {} past end of {}-byte frame",
                        sensor, offset, len
                    );
                    continue;
                }
            },
        };
        debug!("{:?} raw {} at offset {}", sensor, raw, offset);

        let _ = readings.insert(sensor, scale(sensor, raw, calibration));
        if sensor == Sensor::Ec {
            let _ = readings.insert(Sensor::Salt, scale(Sensor::Salt, raw, calibration));
        }
    }

    if readings.is_empty() || (policy == DecodePolicy::Strict && !frame.is_complete()) {
        return Err(DecodeError::FrameTooShort {
            len: frame.len(),
            min: MIN_FRAME_LEN,
        });
    }
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{
        BATTERY_OFFSET, CHLORINE_OFFSET, EC_OFFSET, ORP_OFFSET, PH_OFFSET, TDS_OFFSET,
        TEMPERATURE_OFFSET,
    };

    fn put(frame: &mut [u8], offset: usize, raw: i16) {
        frame[offset..offset + 2].copy_from_slice(&raw.to_be_bytes());
    }

    fn sample_frame(battery_raw: i16) -> [u8; MIN_FRAME_LEN] {
        let mut frame = [0u8; MIN_FRAME_LEN];
        put(&mut frame, PH_OFFSET, 750);
        put(&mut frame, EC_OFFSET, 1200);
        put(&mut frame, TDS_OFFSET, 800);
        put(&mut frame, ORP_OFFSET, 450);
        put(&mut frame, CHLORINE_OFFSET, 30);
        put(&mut frame, TEMPERATURE_OFFSET, 265);
        put(&mut frame, BATTERY_OFFSET, battery_raw);
        frame
    }

    fn decode_with(bytes: &[u8], policy: DecodePolicy) -> Result<SensorReadings, DecodeError> {
        map_sensors(
            &DescrambledFrame::from_descrambled(bytes),
            &BatteryCalibration::C600_DEFAULT,
            policy,
        )
    }

    fn float(readings: &SensorReadings, sensor: Sensor) -> f64 {
        readings.get(sensor).unwrap().as_f64()
    }

    #[test]
    fn test_full_frame() {
        let frame = sample_frame(BatteryCalibration::C600_DEFAULT.full());
        let readings = decode_with(&frame, DecodePolicy::Strict).unwrap();

        assert_eq!(readings.len(), Sensor::COUNT);
        assert_eq!(readings.get(Sensor::Ph), Some(SensorValue::Float(7.5)));
        assert_eq!(readings.get(Sensor::Ec), Some(SensorValue::Int(1200)));
        assert!((float(&readings, Sensor::Salt) - 660.0).abs() < 1e-9);
        assert_eq!(readings.get(Sensor::Tds), Some(SensorValue::Int(800)));
        assert_eq!(readings.get(Sensor::Chlorine), Some(SensorValue::Float(3.0)));
        assert!((float(&readings, Sensor::Orp) - 0.45).abs() < 1e-12);
        assert_eq!(readings.get(Sensor::Temperature), Some(SensorValue::Float(26.5)));
        assert_eq!(readings.get(Sensor::Battery), Some(SensorValue::Int(100)));
    }

    #[test]
    fn test_chlorine_clipped() {
        let mut frame = sample_frame(0);
        put(&mut frame, CHLORINE_OFFSET, -5);
        let readings = decode_with(&frame, DecodePolicy::Strict).unwrap();
        assert_eq!(readings.get(Sensor::Chlorine), Some(SensorValue::Float(0.0)));

        put(&mut frame, CHLORINE_OFFSET, 100);
        let readings = decode_with(&frame, DecodePolicy::Strict).unwrap();
        assert_eq!(readings.get(Sensor::Chlorine), Some(SensorValue::Float(10.0)));
    }

    #[test]
    fn test_negative_temperature_kept() {
        let mut frame = sample_frame(0);
        put(&mut frame, TEMPERATURE_OFFSET, -15);
        let readings = decode_with(&frame, DecodePolicy::Strict).unwrap();
        assert_eq!(readings.get(Sensor::Temperature), Some(SensorValue::Float(-1.5)));
    }

    #[test]
    fn test_battery_clamped() {
        let cal = BatteryCalibration::new(2900, 3300).unwrap();
        for (raw, expected) in [(2500, 0), (2900, 0), (3300, 100), (3500, 100), (3000, 25)] {
            let frame = sample_frame(raw);
            let readings =
                map_sensors(&DescrambledFrame::from_descrambled(&frame), &cal, DecodePolicy::Strict)
                    .unwrap();
            assert_eq!(readings.get(Sensor::Battery), Some(SensorValue::Int(expected)));
        }
    }

    #[test]
    fn test_salt_follows_ec() {
        for ec in [0i16, 1, 999, 1200, 5000, -40] {
            let mut frame = sample_frame(0);
            put(&mut frame, EC_OFFSET, ec);
            let readings = decode_with(&frame, DecodePolicy::Lenient).unwrap();
            assert!((float(&readings, Sensor::Salt) - f64::from(ec) * 0.55).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic() {
        let frame = sample_frame(1500);
        assert_eq!(
            decode_with(&frame, DecodePolicy::Lenient),
            decode_with(&frame, DecodePolicy::Lenient)
        );
    }

    #[test]
    fn test_short_frame_lenient_omits_fields() {
        let frame = sample_frame(3190);
        let readings = decode_with(&frame[..10], DecodePolicy::Lenient).unwrap();

        let present: Vec<Sensor> = readings.iter().map(|r| r.sensor).collect();
        assert_eq!(present, vec![Sensor::Ec, Sensor::Salt, Sensor::Tds, Sensor::Ph]);
        assert!(!readings.contains(Sensor::Orp));
        assert!(!readings.contains(Sensor::Chlorine));
        assert!(!readings.contains(Sensor::Temperature));
        assert!(!readings.contains(Sensor::Battery));
    }

    #[test]
    fn test_short_frame_strict_names_first_field() {
        let frame = sample_frame(3190);
        assert_eq!(
            decode_with(&frame[..10], DecodePolicy::Strict),
            Err(DecodeError::FieldOutOfRange { sensor: Sensor::Orp, offset: 9, len: 10 })
        );
    }

    #[test]
    fn test_missing_status_byte() {
        let frame = sample_frame(3190);
        assert_eq!(
            decode_with(&frame[..17], DecodePolicy::Strict),
            Err(DecodeError::FrameTooShort { len: 17, min: MIN_FRAME_LEN })
        );
        assert_eq!(
            decode_with(&frame[..16], DecodePolicy::Strict),
            Err(DecodeError::FieldOutOfRange { sensor: Sensor::Battery, offset: 15, len: 16 })
        );

        let readings = decode_with(&frame[..17], DecodePolicy::Lenient).unwrap();
        assert_eq!(readings.len(), Sensor::COUNT);
    }

    #[test]
    fn test_tiny_frame_fails_in_both_policies() {
        let frame = [0x00, 0x01, 0x02, 0x03];
        assert_eq!(
            decode_with(&frame, DecodePolicy::Lenient),
            Err(DecodeError::FrameTooShort { len: 4, min: MIN_FRAME_LEN })
        );
        assert_eq!(
            decode_with(&frame, DecodePolicy::Strict),
            Err(DecodeError::FieldOutOfRange { sensor: Sensor::Ph, offset: 3, len: 4 })
        );
        assert_eq!(
            decode_with(&[], DecodePolicy::Lenient),
            Err(DecodeError::FrameTooShort { len: 0, min: MIN_FRAME_LEN })
        );
    }
}
