//! Conversions between character indices and visual columns within one line.
//!
//! Both walk the line from its start applying `cell_width`, so tab stops are
//! honoured relative to column 0 of the line. The two functions are inverses
//! for any index that does not fall inside a multi-cell glyph or tab and is
//! not preceded by zero-width glyphs. For a column that lands inside a
//! multi-cell glyph, `column_to_char_index` returns the index *after* that
//! glyph; callers (mouse mapping, vertical cursor motion) should not rely on
//! which side they land.

use crate::width::cell_width;

/// Visual column of the character at `char_index` in a character sequence.
/// Indices past the end clamp to the column just after the last character.
pub fn column_at<I>(chars: I, char_index: usize, tab_size: usize) -> usize
where
    I: IntoIterator<Item = char>,
{
    let mut column = 0;
    for c in chars.into_iter().take(char_index) {
        column += cell_width(column, c, tab_size);
    }
    column
}

/// Character index shown at visual `column` in a character sequence.
pub fn index_at<I>(chars: I, column: usize, tab_size: usize) -> usize
where
    I: IntoIterator<Item = char>,
{
    let mut walked = 0;
    let mut index = 0;
    for c in chars {
        if walked >= column {
            break;
        }
        walked += cell_width(walked, c, tab_size);
        index += 1;
    }
    index
}

/// Returns the column where the character at `char_index` of `line` starts.
pub fn char_index_to_column(line: &str, char_index: usize, tab_size: usize) -> usize {
    column_at(line.chars(), char_index, tab_size)
}

/// Returns the index of the character of `line` that sits on `column`.
pub fn column_to_char_index(line: &str, column: usize, tab_size: usize) -> usize {
    index_at(line.chars(), column, tab_size)
}
