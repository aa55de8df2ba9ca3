//! Sensor source locations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the sensor reader looks for its facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Network interface whose IPv4 address is shown
    pub interface: String,
    /// Thermal zone file holding the CPU temperature in millidegrees
    pub thermal_zone: PathBuf,
    /// Mount point of the one-wire filesystem
    pub onewire_root: PathBuf,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            interface: crate::DEFAULT_INTERFACE.to_string(),
            thermal_zone: PathBuf::from(crate::DEFAULT_THERMAL_ZONE),
            onewire_root: PathBuf::from(crate::DEFAULT_ONEWIRE_ROOT),
        }
    }
}

impl SensorConfig {
    /// Set the watched network interface.
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    /// Set the thermal zone file.
    pub fn with_thermal_zone(mut self, path: impl Into<PathBuf>) -> Self {
        self.thermal_zone = path.into();
        self
    }

    /// Set the one-wire filesystem root.
    pub fn with_onewire_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.onewire_root = path.into();
        self
    }
}
