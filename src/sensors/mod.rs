//! Host and one-wire sensor collection.
//!
//! This module reads the facts shown on the status screen: the IPv4 address
//! of a network interface, the CPU temperature from sysfs, and the one-wire
//! temperature sensors exposed by an OWFS mount. Every read is independent
//! and degrades to an empty value instead of failing.

pub mod config;
pub mod data;
pub mod reader;
pub mod traits;

// Re-export commonly used items
pub use config::SensorConfig;
pub use data::{IpString, OneWireReading, SensorId, SensorSnapshot};
pub use reader::SensorReader;
pub use traits::SensorSource;
