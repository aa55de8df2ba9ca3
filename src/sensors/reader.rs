//! Sensor reading from sysfs, the one-wire filesystem and the network stack.
//!
//! Every public read here is soft: failures are logged at debug level and
//! turned into `None`, `0` or `0.0`. Nothing is held open between calls.

use crate::error::{Result, StatusError};
use crate::sensors::{
    config::SensorConfig,
    data::{IpString, OneWireReading, SensorSnapshot},
    traits::SensorSource,
};
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use sysinfo::Networks;
use tracing::debug;

/// Length of a one-wire directory name, `FF.XXXXXXXXXXXX`.
const SENSOR_NAME_LEN: usize = 15;

/// Position of the `.` between family code and serial number.
const FAMILY_SEPARATOR_INDEX: usize = 2;

/// Family code of DS18B20 temperature sensors.
const TEMPERATURE_FAMILY: &str = "28";

/// Per-sensor file with the temperature in Celsius.
const TEMPERATURE_FILE: &str = "temperature";

/// Reads host and one-wire facts for the status screen.
#[derive(Debug, Clone, Default)]
pub struct SensorReader {
    config: SensorConfig,
}

impl SensorReader {
    /// Create a reader for the given source locations.
    pub fn new(config: SensorConfig) -> Self {
        Self { config }
    }

    /// IPv4 address assigned to interface `name`.
    ///
    /// Returns `None` when the interface is missing or has no IPv4 address.
    pub fn read_interface_ip(&self, name: &str) -> Option<IpString> {
        match interface_ipv4(name) {
            Ok(addr) => Some(IpString::truncated(&addr.to_string())),
            Err(err) => {
                debug!("IP address of {} unavailable: {}", name, err);
                None
            }
        }
    }

    /// CPU temperature in Celsius.
    ///
    /// An unreadable thermal zone yields `0.0`, which callers cannot tell
    /// apart from a real reading of zero degrees.
    pub fn read_cpu_temperature(&self) -> f64 {
        match read_millidegrees(&self.config.thermal_zone) {
            Ok(millidegrees) => millidegrees as f64 / 1000.0,
            Err(err) => {
                debug!(
                    "CPU temperature unavailable from {}: {}",
                    self.config.thermal_zone.display(),
                    err
                );
                0.0
            }
        }
    }

    /// Number of one-wire devices of any family under the sensor root.
    pub fn count_onewire_sensors(&self) -> usize {
        match self.sensor_dirs() {
            Ok(names) => names.len(),
            Err(err) => {
                debug!(
                    "One-wire root {} unavailable: {}",
                    self.config.onewire_root.display(),
                    err
                );
                0
            }
        }
    }

    /// First temperature sensor, in directory enumeration order, whose
    /// reading can be parsed.
    ///
    /// Enumeration order is whatever the filesystem returns; no sorting is
    /// applied. Sensors with unreadable or malformed files are skipped and
    /// the next candidate is tried, rather than keeping the last match or
    /// giving up on the first bad file.
    pub fn read_first_temperature_sensor(&self) -> Option<OneWireReading> {
        let names = match self.sensor_dirs() {
            Ok(names) => names,
            Err(err) => {
                debug!(
                    "One-wire root {} unavailable: {}",
                    self.config.onewire_root.display(),
                    err
                );
                return None;
            }
        };

        names
            .iter()
            .filter(|name| name.starts_with(TEMPERATURE_FAMILY))
            .find_map(|name| {
                let path = self.config.onewire_root.join(name).join(TEMPERATURE_FILE);
                match read_celsius(&path) {
                    Ok(celsius) => Some(OneWireReading::new(name, celsius)),
                    Err(err) => {
                        debug!("Skipping sensor {}: {}", name, err);
                        None
                    }
                }
            })
    }

    /// Names of sensor directories under the one-wire root.
    fn sensor_dirs(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.config.onewire_root)?.flatten() {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                if is_sensor_name(name) {
                    names.push(name.to_string());
                }
            }
        }

        Ok(names)
    }
}

impl SensorSource for SensorReader {
    fn snapshot(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            ip: self.read_interface_ip(&self.config.interface),
            cpu_celsius: self.read_cpu_temperature(),
            onewire_count: self.count_onewire_sensors(),
            onewire: self.read_first_temperature_sensor(),
        }
    }
}

/// Whether `name` follows the one-wire `FF.XXXXXXXXXXXX` naming.
pub fn is_sensor_name(name: &str) -> bool {
    name.len() == SENSOR_NAME_LEN && name.as_bytes()[FAMILY_SEPARATOR_INDEX] == b'.'
}

fn interface_ipv4(name: &str) -> Result<Ipv4Addr> {
    let networks = Networks::new_with_refreshed_list();
    let data = networks
        .list()
        .get(name)
        .ok_or_else(|| StatusError::sensor_unavailable(format!("no interface named {name}")))?;

    data.ip_networks()
        .iter()
        .find_map(|network| match network.addr {
            IpAddr::V4(addr) => Some(addr),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| StatusError::sensor_unavailable(format!("{name} has no IPv4 address")))
}

fn read_millidegrees(path: &Path) -> Result<i64> {
    let raw = fs::read_to_string(path)?;
    raw.trim()
        .parse::<i64>()
        .map_err(|e| StatusError::sensor_unavailable(format!("bad thermal value {raw:?}: {e}")))
}

fn read_celsius(path: &Path) -> Result<f64> {
    let raw = fs::read_to_string(path)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| StatusError::sensor_unavailable(format!("bad temperature {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static SCRATCH_ID: AtomicUsize = AtomicUsize::new(0);

    /// Throwaway directory under the system temp dir, removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Self {
            let id = SCRATCH_ID.fetch_add(1, Ordering::SeqCst);
            let path = std::env::temp_dir()
                .join(format!("oled_status_reader_{}_{}", std::process::id(), id));
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn sensor(&self, name: &str, temperature: Option<&str>) {
            let dir = self.0.join(name);
            fs::create_dir_all(&dir).unwrap();
            if let Some(value) = temperature {
                fs::write(dir.join(TEMPERATURE_FILE), value).unwrap();
            }
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn reader_for(root: &Path) -> SensorReader {
        SensorReader::new(
            SensorConfig::default()
                .with_onewire_root(root)
                .with_thermal_zone(root.join("thermal_temp")),
        )
    }

    #[test]
    fn test_sensor_name_convention() {
        assert!(is_sensor_name("28.0000057A3B2C"));
        assert!(is_sensor_name("10.67C6697351FF"));
        assert!(!is_sensor_name("28.short"));
        assert!(!is_sensor_name("bus.0"));
        assert!(!is_sensor_name("2800000057A3B2C"));
        assert!(!is_sensor_name(""));
    }

    #[test]
    fn test_cpu_temperature_conversion() {
        let scratch = Scratch::new();
        fs::write(scratch.0.join("thermal_temp"), "45000\n").unwrap();
        assert_eq!(reader_for(&scratch.0).read_cpu_temperature(), 45.0);
    }

    #[test]
    fn test_cpu_temperature_unreadable_is_zero() {
        let scratch = Scratch::new();
        assert_eq!(reader_for(&scratch.0).read_cpu_temperature(), 0.0);

        fs::write(scratch.0.join("thermal_temp"), "garbage").unwrap();
        assert_eq!(reader_for(&scratch.0).read_cpu_temperature(), 0.0);
    }

    #[test]
    fn test_empty_directory() {
        let scratch = Scratch::new();
        let reader = reader_for(&scratch.0);
        assert_eq!(reader.count_onewire_sensors(), 0);
        assert!(reader.read_first_temperature_sensor().is_none());
    }

    #[test]
    fn test_missing_directory() {
        let reader = reader_for(Path::new("/nonexistent/oled_status/1wire"));
        assert_eq!(reader.count_onewire_sensors(), 0);
        assert!(reader.read_first_temperature_sensor().is_none());
    }

    #[test]
    fn test_single_temperature_sensor() {
        let scratch = Scratch::new();
        scratch.sensor("28.0000057A3B2C", Some("23.5"));

        let reader = reader_for(&scratch.0);
        assert_eq!(reader.count_onewire_sensors(), 1);

        let reading = reader.read_first_temperature_sensor().unwrap();
        assert_eq!(reading.id.as_str(), "28.0000057A3B2C");
        assert_eq!(reading.celsius, 23.5);
    }

    #[test]
    fn test_owfs_padded_value() {
        let scratch = Scratch::new();
        scratch.sensor("28.0000057A3B2C", Some("     19.8125"));

        let reading = reader_for(&scratch.0).read_first_temperature_sensor().unwrap();
        assert_eq!(reading.celsius, 19.8125);
    }

    #[test]
    fn test_count_ignores_non_sensors() {
        let scratch = Scratch::new();
        scratch.sensor("28.0000057A3B2C", Some("20.0"));
        scratch.sensor("10.67C6697351FF", None);
        scratch.sensor("bus.0", None);
        scratch.sensor("settings", None);
        fs::write(scratch.0.join("28.FFFFFFFFFFFF"), "not a dir").unwrap();

        assert_eq!(reader_for(&scratch.0).count_onewire_sensors(), 2);
    }

    #[test]
    fn test_non_temperature_family_not_read() {
        let scratch = Scratch::new();
        scratch.sensor("10.67C6697351FF", Some("30.0"));

        let reader = reader_for(&scratch.0);
        assert_eq!(reader.count_onewire_sensors(), 1);
        assert!(reader.read_first_temperature_sensor().is_none());
    }

    #[test]
    fn test_unparseable_sensor_is_skipped() {
        let scratch = Scratch::new();
        scratch.sensor("28.000000000001", Some("n/a"));

        assert!(reader_for(&scratch.0).read_first_temperature_sensor().is_none());

        scratch.sensor("28.000000000002", Some("18.0"));
        let reading = reader_for(&scratch.0).read_first_temperature_sensor().unwrap();
        assert_eq!(reading.id.as_str(), "28.000000000002");
    }

    #[test]
    fn test_unknown_interface_has_no_ip() {
        let reader = SensorReader::default();
        assert!(reader.read_interface_ip("no-such-if0").is_none());
    }

    #[test]
    fn test_snapshot_tolerates_everything_missing() {
        let mut reader = SensorReader::new(
            SensorConfig::default()
                .with_interface("no-such-if0")
                .with_thermal_zone("/nonexistent/temp")
                .with_onewire_root("/nonexistent/1wire"),
        );

        assert_eq!(reader.snapshot(), SensorSnapshot::default());
    }
}
