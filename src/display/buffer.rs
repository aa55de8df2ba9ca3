//! Frame buffer for a 128x64 monochrome panel.

/// Panel width in pixels.
pub const DISPLAY_WIDTH: usize = 128;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT: usize = 64;

/// Bytes in one full frame.
pub const BUFFER_LEN: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;

/// One full frame in SSD1306 page layout.
///
/// Byte `i` covers column `i % 128` of page `i / 128`; bit 0 is the top pixel
/// of the 8-pixel column. Offsets are byte indices, so one text row is
/// [`DISPLAY_WIDTH`] bytes. Writes that run past the end are clipped.
#[derive(Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    bytes: [u8; BUFFER_LEN],
}

impl DisplayBuffer {
    /// Create an all-dark frame.
    pub fn new() -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Copy `columns` in starting at `offset`, dropping whatever does not
    /// fit. Returns the number of bytes actually written.
    pub fn write_columns(&mut self, offset: usize, columns: &[u8]) -> usize {
        if offset >= BUFFER_LEN {
            return 0;
        }
        let end = (offset + columns.len()).min(BUFFER_LEN);
        let written = end - offset;
        self.bytes[offset..end].copy_from_slice(&columns[..written]);
        written
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Frame split into 8-pixel-high pages, top first.
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.chunks(DISPLAY_WIDTH)
    }

    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DisplayBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.bytes.iter().filter(|&&b| b != 0).count();
        f.debug_struct("DisplayBuffer")
            .field("len", &BUFFER_LEN)
            .field("non_zero_bytes", &lit)
            .finish()
    }
}
