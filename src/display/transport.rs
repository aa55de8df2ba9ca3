//! Display transport: SSD1306 over Linux I2C.

use crate::display::buffer::{DisplayBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::{Result, StatusError};
use embedded_hal::i2c::I2c;
use linux_embedded_hal::I2cdev;
use std::future::Future;
use std::path::Path;
use tracing::{debug, info};

/// Control byte announcing a command stream.
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing display RAM data.
const CONTROL_DATA: u8 = 0x40;

const LAST_COLUMN: u8 = (DISPLAY_WIDTH - 1) as u8;
const LAST_PAGE: u8 = (DISPLAY_HEIGHT / 8 - 1) as u8;

/// Power-up sequence for a 128x64 panel with internal charge pump.
#[rustfmt::skip]
pub const INIT_SEQUENCE: &[u8] = &[
    0xAE,       // display off
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // no display offset
    0x40,       // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1,       // segment remap
    0xC8,       // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH deselect
    0xA4,       // follow RAM
    0xA6,       // non-inverted
    0xAF,       // display on
];

/// Sent before every frame: wake the panel and reset the write window to
/// the full screen so the next flush starts at the top-left corner.
#[rustfmt::skip]
pub const DRAW_COMMAND: &[u8] = &[
    0xAF,
    0x21, 0x00, LAST_COLUMN,
    0x22, 0x00, LAST_PAGE,
];

/// A stateful display reached over some bus.
///
/// Every failure here is fatal to the refresh loop.
pub trait DisplayTransport {
    /// Bring the panel from power-on into a drawable state.
    fn init(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Send a raw command stream.
    fn send_command(&mut self, payload: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Flush a full frame.
    fn send_buffer(&mut self, buffer: &DisplayBuffer) -> impl Future<Output = Result<()>> + Send;
}

/// SSD1306 controller on an I2C bus device node such as `/dev/i2c-1`.
pub struct Ssd1306I2c {
    bus: I2cdev,
    address: u8,
}

impl Ssd1306I2c {
    /// Open the bus node. The panel is not touched until [`init`](DisplayTransport::init).
    pub fn open(path: impl AsRef<Path>, address: u16) -> Result<Self> {
        let path = path.as_ref();
        let address = u8::try_from(address)
            .ok()
            .filter(|a| *a <= 0x7F)
            .ok_or_else(|| {
                StatusError::invalid_arguments(format!("{address:#x} is not a 7-bit I2C address"))
            })?;

        let bus = I2cdev::new(path).map_err(|e| {
            StatusError::transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        info!("Opened {} (address {:#04x})", path.display(), address);
        Ok(Self { bus, address })
    }

    fn write(&mut self, control: u8, bytes: &[u8]) -> Result<()> {
        let mut message = Vec::with_capacity(bytes.len() + 1);
        message.push(control);
        message.extend_from_slice(bytes);

        self.bus
            .write(self.address, &message)
            .map_err(|e| StatusError::transport(e.to_string()))
    }
}

impl DisplayTransport for Ssd1306I2c {
    async fn init(&mut self) -> Result<()> {
        self.write(CONTROL_COMMAND, INIT_SEQUENCE)?;
        debug!("Display initialized");
        Ok(())
    }

    async fn send_command(&mut self, payload: &[u8]) -> Result<()> {
        self.write(CONTROL_COMMAND, payload)
    }

    async fn send_buffer(&mut self, buffer: &DisplayBuffer) -> Result<()> {
        for page in buffer.pages() {
            self.write(CONTROL_DATA, page)?;
        }
        Ok(())
    }
}
