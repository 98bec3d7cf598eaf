//! Sensor kinds and decoded values.
//!
//! The probe reports a fixed, closed set of eight quantities. Each
//! [`Sensor`] variant carries its presentation metadata (key, display name,
//! unit) and where it lives in the frame, so consumers can handle every kind
//! exhaustively.

use core::fmt;
use core::str::FromStr;

use crate::consts::{
    BATTERY_OFFSET, CHLORINE_OFFSET, EC_OFFSET, ORP_OFFSET, PH_OFFSET, TDS_OFFSET,
    TEMPERATURE_OFFSET,
};

/// A quantity reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Sensor {
    /// Battery level, 0–100 %.
    Battery,
    /// Electrical conductivity, µS/cm.
    Ec,
    /// Salinity derived from conductivity, ppm.
    Salt,
    /// Total dissolved solids, ppm.
    Tds,
    /// Free chlorine, ppm.
    Chlorine,
    /// pH, unitless.
    Ph,
    /// Oxidation-reduction potential, volts.
    Orp,
    /// Water temperature, °C.
    Temperature,
}

/// Unit a sensor value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Unit {
    /// Percent.
    Percent,
    /// Parts per million.
    PartsPerMillion,
    /// Volts.
    Volt,
    /// Microsiemens per centimetre.
    MicrosiemensPerCm,
    /// Degrees Celsius.
    Celsius,
}

impl Unit {
    /// Display symbol of the unit.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::PartsPerMillion => "ppm",
            Unit::Volt => "V",
            Unit::MicrosiemensPerCm => "µS/cm",
            Unit::Celsius => "°C",
        }
    }
}

impl Sensor {
    /// Number of sensor kinds.
    pub const COUNT: usize = 8;

    /// Every sensor kind, in declaration order.
    pub const ALL: [Sensor; Sensor::COUNT] = [
        Sensor::Battery,
        Sensor::Ec,
        Sensor::Salt,
        Sensor::Tds,
        Sensor::Chlorine,
        Sensor::Ph,
        Sensor::Orp,
        Sensor::Temperature,
    ];

    /// Short key identifying the sensor, as used by the host integration.
    pub const fn key(&self) -> &'static str {
        match self {
            Sensor::Battery => "battery",
            Sensor::Ec => "EC",
            Sensor::Salt => "salt",
            Sensor::Tds => "TDS",
            Sensor::Chlorine => "cloro",
            Sensor::Ph => "pH",
            Sensor::Orp => "ORP",
            Sensor::Temperature => "temperature",
        }
    }

    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Sensor::Battery => "Battery",
            Sensor::Ec => "Electrical Conductivity",
            Sensor::Salt => "Salt",
            Sensor::Tds => "Total Dissolved Solids",
            Sensor::Chlorine => "Free Chlorine",
            Sensor::Ph => "pH",
            Sensor::Orp => "Oxidation-Reduction Potential",
            Sensor::Temperature => "Temperature",
        }
    }

    /// Unit of the decoded value, `None` for pH.
    pub const fn unit(&self) -> Option<Unit> {
        match self {
            Sensor::Battery => Some(Unit::Percent),
            Sensor::Ec => Some(Unit::MicrosiemensPerCm),
            Sensor::Salt | Sensor::Tds | Sensor::Chlorine => Some(Unit::PartsPerMillion),
            Sensor::Ph => None,
            Sensor::Orp => Some(Unit::Volt),
            Sensor::Temperature => Some(Unit::Celsius),
        }
    }

    /// Offset of the sensor's word in the descrambled frame.
    ///
    /// `None` for salt, which is derived from conductivity.
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Sensor::Battery => Some(BATTERY_OFFSET),
            Sensor::Ec => Some(EC_OFFSET),
            Sensor::Salt => None,
            Sensor::Tds => Some(TDS_OFFSET),
            Sensor::Chlorine => Some(CHLORINE_OFFSET),
            Sensor::Ph => Some(PH_OFFSET),
            Sensor::Orp => Some(ORP_OFFSET),
            Sensor::Temperature => Some(TEMPERATURE_OFFSET),
        }
    }

    const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown sensor key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown sensor key")]
pub struct UnknownSensor;

impl FromStr for Sensor {
    type Err = UnknownSensor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sensor::ALL
            .into_iter()
            .find(|sensor| sensor.key() == s)
            .ok_or(UnknownSensor)
    }
}

/// A decoded sensor value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum SensorValue {
    /// Integer-valued reading (conductivity, TDS, battery).
    Int(i32),
    /// Scaled reading.
    Float(f64),
}

impl SensorValue {
    /// The value as a float.
    pub fn as_f64(&self) -> f64 {
        match *self {
            SensorValue::Int(v) => f64::from(v),
            SensorValue::Float(v) => v,
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValue::Int(v) => write!(f, "{v}"),
            SensorValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One named reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct SensorReading {
    /// Which quantity this is.
    pub sensor: Sensor,
    /// The decoded value.
    pub value: SensorValue,
}

/// The set of readings decoded from one frame.
///
/// Holds at most one value per [`Sensor`]; a sensor is absent when its
/// field could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReadings {
    values: [Option<SensorValue>; Sensor::COUNT],
}

impl SensorReadings {
    /// An empty set.
    pub const fn new() -> Self {
        Self {
            values: [None; Sensor::COUNT],
        }
    }

    /// Stores `value` for `sensor`, returning the previous value if any.
    pub fn insert(&mut self, sensor: Sensor, value: SensorValue) -> Option<SensorValue> {
        self.values[sensor.index()].replace(value)
    }

    /// The value for `sensor`, if it was decoded.
    pub fn get(&self, sensor: Sensor) -> Option<SensorValue> {
        self.values[sensor.index()]
    }

    /// Returns `true` if `sensor` was decoded.
    pub fn contains(&self, sensor: Sensor) -> bool {
        self.get(sensor).is_some()
    }

    /// Number of decoded sensors.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Returns `true` if nothing was decoded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the decoded readings in [`Sensor::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = SensorReading> + '_ {
        Sensor::ALL.into_iter().filter_map(move |sensor| {
            self.get(sensor).map(|value| SensorReading { sensor, value })
        })
    }
}
