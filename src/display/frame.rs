//! Status screen layout.

use crate::bounded::BoundedString;
use crate::display::buffer::{DisplayBuffer, DISPLAY_WIDTH};
use crate::display::text::draw_string;
use crate::sensors::SensorSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Heading shown by [`Layout::OneWireServer`].
pub const TITLE: &str = "   === 1wire server === ";

/// Formatted line capacity for [`Layout::OneWireServer`] (32-byte buffer).
const SERVER_LINE: usize = 31;

/// Formatted line capacity for [`Layout::MachineState`] (50-byte buffer).
const MACHINE_LINE: usize = 49;

/// Which status screen to draw.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Title, IP, CPU temperature, sensor count and first sensor reading
    #[default]
    OneWireServer,
    /// Compact IP, CPU temperature and first sensor reading
    MachineState,
}

/// Byte offset of text row `row` (each row is one 8-pixel page).
pub const fn row(row: usize) -> usize {
    row * DISPLAY_WIDTH
}

/// Owns the frame buffer and paints one snapshot into it per cycle.
#[derive(Debug, Clone)]
pub struct FrameComposer {
    buffer: DisplayBuffer,
    layout: Layout,
}

impl FrameComposer {
    pub fn new(layout: Layout) -> Self {
        Self {
            buffer: DisplayBuffer::new(),
            layout,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Most recently composed frame.
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Blank the buffer and lay out `snapshot` on it.
    pub fn compose(&mut self, snapshot: &SensorSnapshot) -> &DisplayBuffer {
        self.buffer.clear();

        match self.layout {
            Layout::OneWireServer => self.compose_onewire_server(snapshot),
            Layout::MachineState => self.compose_machine_state(snapshot),
        }

        &self.buffer
    }

    fn compose_onewire_server(&mut self, snapshot: &SensorSnapshot) {
        let buffer = &mut self.buffer;

        draw_string(buffer, row(0), TITLE);
        draw_ip(buffer, row(2), snapshot);
        draw_formatted::<SERVER_LINE>(
            buffer,
            row(3),
            format_args!("Temp: {:.1}", snapshot.cpu_celsius),
        );
        draw_formatted::<SERVER_LINE>(
            buffer,
            row(4),
            format_args!("OWFS: {} sensors", snapshot.onewire_count),
        );
        if let Some(sensor) = &snapshot.onewire {
            draw_formatted::<SERVER_LINE>(
                buffer,
                row(5),
                format_args!(" {}: {:.1}", sensor.id, sensor.celsius),
            );
        }
    }

    fn compose_machine_state(&mut self, snapshot: &SensorSnapshot) {
        let buffer = &mut self.buffer;

        draw_ip(buffer, row(0), snapshot);
        draw_formatted::<MACHINE_LINE>(
            buffer,
            row(1),
            format_args!("Temp: {:.1}", snapshot.cpu_celsius),
        );
        draw_string(buffer, row(2), "OWFS:");
        if let Some(sensor) = &snapshot.onewire {
            draw_formatted::<MACHINE_LINE>(
                buffer,
                row(3),
                format_args!(" {}: {:.1}", sensor.id, sensor.celsius),
            );
        }
    }
}

impl Default for FrameComposer {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

/// `"IP  : <address>"`, leaving the address blank when unknown.
fn draw_ip(buffer: &mut DisplayBuffer, offset: usize, snapshot: &SensorSnapshot) -> usize {
    let next = draw_string(buffer, offset, "IP  : ");
    let ip = snapshot.ip.as_ref().map(|ip| ip.as_str()).unwrap_or("");
    draw_string(buffer, next, ip)
}

/// Format into an `N`-byte line, truncating, then paint it.
fn draw_formatted<const N: usize>(
    buffer: &mut DisplayBuffer,
    offset: usize,
    args: fmt::Arguments<'_>,
) -> usize {
    let mut line = BoundedString::<N>::new();
    // BoundedString truncates instead of reporting an error
    let _ = line.write_fmt(args);
    draw_string(buffer, offset, &line)
}
