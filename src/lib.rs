//! # OLED Status - host and one-wire readout for SSD1306 panels
//!
//! Polls a few host facts (interface IPv4 address, CPU temperature) and the
//! one-wire temperature sensors exposed by an OWFS mount, renders them as
//! text with a 5x7 bitmap font, and pushes the frame to a 128x64 SSD1306
//! OLED over I2C once a second.
//!
//! ## Features
//!
//! - **Fault-tolerant sensors**: unplugged sensors, missing mounts or a down
//!   network show up as blank fields, never as a crash
//! - **Bounded rendering**: fixed-capacity text and clipped buffer writes
//! - **Drift-free refresh**: wake-ups on a grid of absolute deadlines
//! - **Two layouts**: a titled one-wire server screen and a compact one
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oled_status::{DisplayConfig, DisplayTransport, RefreshScheduler, SensorReader, Ssd1306I2c};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DisplayConfig::default();
//!     let mut panel = Ssd1306I2c::open("/dev/i2c-1", config.address)?;
//!     panel.init().await?;
//!
//!     let mut scheduler = RefreshScheduler::from_config(panel, SensorReader::default(), &config);
//!     scheduler.run().await?;
//!     Ok(())
//! }
//! ```

pub mod bounded;
pub mod display;
pub mod error;
pub mod scheduler;
pub mod sensors;

// Re-export public API
pub use bounded::BoundedString;
pub use display::{
    draw_char, draw_string, DisplayBuffer, DisplayConfig, DisplayTransport, FrameComposer,
    Layout, Ssd1306I2c,
};
pub use error::{Result, StatusError};
pub use scheduler::{RefreshScheduler, SchedulerState};
pub use sensors::{OneWireReading, SensorConfig, SensorReader, SensorSnapshot, SensorSource};

/// The default refresh interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// The default network interface shown on screen
pub const DEFAULT_INTERFACE: &str = "eth0";

/// The default CPU thermal zone (millidegrees Celsius)
pub const DEFAULT_THERMAL_ZONE: &str = "/sys/devices/virtual/thermal/thermal_zone0/temp";

/// The default OWFS mount point
pub const DEFAULT_ONEWIRE_ROOT: &str = "/mnt/1wire";

/// The usual 7-bit I2C address of SSD1306 modules
pub const SSD1306_I2C_ADDR: u16 = 0x3C;
