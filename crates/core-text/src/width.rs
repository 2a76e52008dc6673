//! Display width of a single code point at a given screen column.
//!
//! Rules (shared by the line renderer, viewport adjustment and the column
//! conversion helpers):
//! - newline occupies 1 cell;
//! - tab advances to the next tab stop: `tab_size - (column % tab_size)`;
//! - anything else uses the Unicode glyph width. Code points without a
//!   defined width (controls) count as 1. Zero-width glyphs stay 0.
//!
//! A `tab_size` of 0 is treated as 1 so every tab still consumes a cell.

use unicode_width::UnicodeWidthChar;

/// Glyph width of `c` ignoring tab stops. Unknown widths clamp to 1.
#[inline]
pub fn glyph_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(1)
}

/// Cells a tab consumes when it starts at `column`.
#[inline]
pub fn tab_width(column: usize, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    tab_size - (column % tab_size)
}

/// Cells `c` consumes when it starts at `column`.
#[inline]
pub fn cell_width(column: usize, c: char, tab_size: usize) -> usize {
    match c {
        '\n' => 1,
        '\t' => tab_width(column, tab_size),
        _ => glyph_width(c),
    }
}
