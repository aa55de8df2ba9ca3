//! Text rendering into a [`DisplayBuffer`].

use crate::display::buffer::DisplayBuffer;
use crate::display::font::{glyph, GLYPH_WIDTH};

/// Paint `c` at byte `offset` and return the offset of the next glyph.
///
/// Characters without a glyph, including anything outside ASCII, paint
/// nothing but still advance by one glyph width. Columns that would land
/// past the end of the buffer are dropped.
pub fn draw_char(buffer: &mut DisplayBuffer, offset: usize, c: char) -> usize {
    let code = u8::try_from(c).unwrap_or(0);
    buffer.write_columns(offset, glyph(code));
    offset.saturating_add(GLYPH_WIDTH)
}

/// Paint every character of `text` left to right from `offset`.
///
/// No wrapping is done beyond what the page layout implies: a run longer
/// than the row continues into the next page.
pub fn draw_string(buffer: &mut DisplayBuffer, offset: usize, text: &str) -> usize {
    text.chars()
        .fold(offset, |next, c| draw_char(buffer, next, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::buffer::BUFFER_LEN;

    #[test]
    fn test_draw_char_copies_glyph() {
        let mut buffer = DisplayBuffer::new();
        assert_eq!(draw_char(&mut buffer, 10, 'A'), 15);
        assert_eq!(&buffer.as_bytes()[10..15], glyph(b'A'));
    }

    #[test]
    fn test_unknown_char_advances_without_drawing() {
        let mut buffer = DisplayBuffer::new();
        assert_eq!(draw_char(&mut buffer, 0, '\u{7f}'), 5);
        assert_eq!(draw_char(&mut buffer, 5, '°'), 10);
        assert_eq!(draw_char(&mut buffer, 10, '\0'), 15);
        assert!(buffer.is_blank());
    }

    #[test]
    fn test_empty_string() {
        let mut buffer = DisplayBuffer::new();
        assert_eq!(draw_string(&mut buffer, 0, ""), 0);
        assert!(buffer.is_blank());
    }

    #[test]
    fn test_draw_string_composes() {
        let mut split = DisplayBuffer::new();
        let next = draw_string(&mut split, 0, "AB");
        let end = draw_string(&mut split, next, "CD");

        let mut whole = DisplayBuffer::new();
        assert_eq!(draw_string(&mut whole, 0, "ABCD"), end);
        assert_eq!(split, whole);
        assert_eq!(end, 20);
    }

    #[test]
    fn test_draw_past_end_does_not_panic() {
        let mut buffer = DisplayBuffer::new();
        let end = draw_string(&mut buffer, BUFFER_LEN - 7, "XYZ");
        assert_eq!(end, BUFFER_LEN + 8);
        assert_eq!(&buffer.as_bytes()[BUFFER_LEN - 7..BUFFER_LEN - 2], glyph(b'X'));
        assert_eq!(&buffer.as_bytes()[BUFFER_LEN - 2..], &glyph(b'Y')[..2]);
    }
}
