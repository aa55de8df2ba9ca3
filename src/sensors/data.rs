//! Data structures for one cycle of sensor readings.

use crate::bounded::BoundedString;
use serde::{Deserialize, Serialize};

/// Capacity of an interface address: dotted IPv4 is at most 15 characters.
pub const IP_CAPACITY: usize = 15;

/// Capacity of a one-wire sensor identity.
pub const SENSOR_ID_CAPACITY: usize = 31;

/// Interface address text, e.g. `"192.168.1.10"`.
pub type IpString = BoundedString<IP_CAPACITY>;

/// One-wire sensor identity, e.g. `"28.0000057A3B2C"`.
pub type SensorId = BoundedString<SENSOR_ID_CAPACITY>;

/// Everything gathered for one display refresh.
///
/// Built fresh every cycle and dropped after rendering. Missing sources are
/// ordinary states here, not errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// IPv4 address of the watched interface, if it has one
    pub ip: Option<IpString>,
    /// CPU temperature in Celsius; 0.0 when the thermal zone is unreadable
    pub cpu_celsius: f64,
    /// Number of one-wire devices present under the sensor root
    pub onewire_count: usize,
    /// First readable one-wire temperature sensor
    pub onewire: Option<OneWireReading>,
}

/// A single one-wire temperature sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneWireReading {
    /// Sensor identity (directory name under the sensor root)
    pub id: SensorId,
    /// Temperature in Celsius, as reported by the sensor without scaling
    pub celsius: f64,
}

impl OneWireReading {
    pub fn new(id: &str, celsius: f64) -> Self {
        Self {
            id: SensorId::truncated(id),
            celsius,
        }
    }
}
