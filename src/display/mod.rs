//! Frame buffer, text rendering and the SSD1306 transport.
//!
//! A frame is composed from scratch every cycle: the [`FrameComposer`] blanks
//! its [`DisplayBuffer`], paints the status lines with the 5x7 font, and the
//! buffer is then flushed whole through a [`DisplayTransport`].

pub mod buffer;
pub mod config;
pub mod font;
pub mod frame;
pub mod text;
pub mod transport;

// Re-export commonly used items
pub use buffer::{DisplayBuffer, BUFFER_LEN, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use config::DisplayConfig;
pub use frame::{FrameComposer, Layout};
pub use text::{draw_char, draw_string};
pub use transport::{DisplayTransport, Ssd1306I2c, DRAW_COMMAND};
