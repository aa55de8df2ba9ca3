//! Display and refresh configuration.

use crate::display::frame::Layout;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the panel and its refresh loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 7-bit I2C address of the panel
    pub address: u16,
    /// Refresh interval in milliseconds
    pub interval_ms: u64,
    /// Screen layout
    pub layout: Layout,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: crate::SSD1306_I2C_ADDR,
            interval_ms: crate::DEFAULT_INTERVAL_MS,
            layout: Layout::default(),
        }
    }
}

impl DisplayConfig {
    /// Set the panel bus address.
    pub fn with_address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }

    /// Set the refresh interval.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Set the screen layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
