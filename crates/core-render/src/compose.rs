//! Joined buffer: a contiguous copy of the rows relevant to one frame.
//!
//! Rows `[first, end)` of the document are concatenated with a single `'\n'`
//! between consecutive rows (none after the last). Offsets are character
//! (code point) indices into that text. Reading at or past `len()` yields
//! `TERMINATOR`, which the line renderer treats as end of line.
//!
//! Pattern matching runs over a UTF-8 copy of the same text; `find` maps the
//! regex byte offsets back to character offsets so callers never see bytes.

use crate::error::{Result, reserve, reserve_str};
use core_text::Buffer;
use regex::Regex;

/// Read past the end of a joined buffer.
pub const TERMINATOR: char = '\0';

/// A pattern match in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatch {
    pub offset: usize,
    pub len: usize,
}

impl TextMatch {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Where the next search starts. Empty matches still advance by one so a
    /// pattern like `x*` cannot stall a scan.
    pub fn resume_at(&self) -> usize {
        if self.len == 0 {
            self.offset + 1
        } else {
            self.end()
        }
    }
}

#[derive(Debug, Default)]
pub struct JoinedBuffer {
    chars: Vec<char>,
    text: String,
    /// Byte position of every character plus one trailing entry for `text.len()`.
    byte_offsets: Vec<usize>,
    line_offsets: Vec<usize>,
    first_row: usize,
}

impl JoinedBuffer {
    /// Join document rows `[first, end)`; `end` is clamped to the row count.
    pub fn compose(buffer: &Buffer, first: usize, end: usize) -> Result<Self> {
        let end = end.min(buffer.line_count());
        let mut joined = JoinedBuffer {
            first_row: first,
            ..Default::default()
        };
        let rows = end.saturating_sub(first);

        let (mut n_chars, mut n_bytes) = (rows.saturating_sub(1), rows.saturating_sub(1));
        for row in first..end {
            if let Some(chars) = buffer.line_chars(row) {
                for c in chars {
                    n_chars += 1;
                    n_bytes += c.len_utf8();
                }
            }
        }
        reserve(&mut joined.chars, n_chars, "joined buffer")?;
        reserve(&mut joined.byte_offsets, n_chars + 1, "joined buffer offsets")?;
        reserve_str(&mut joined.text, n_bytes, "joined buffer text")?;
        reserve(&mut joined.line_offsets, rows, "line offsets")?;

        for row in first..end {
            if row > first {
                joined.push('\n');
            }
            joined.line_offsets.push(joined.chars.len());
            if let Some(chars) = buffer.line_chars(row) {
                for c in chars {
                    joined.push(c);
                }
            }
        }
        joined.byte_offsets.push(joined.text.len());
        Ok(joined)
    }

    fn push(&mut self, c: char) {
        self.byte_offsets.push(self.text.len());
        self.chars.push(c);
        self.text.push(c);
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Character at `offset`, or `TERMINATOR` at and past the end.
    pub fn char_at(&self, offset: usize) -> char {
        self.chars.get(offset).copied().unwrap_or(TERMINATOR)
    }

    /// Start offset of every composed row, strictly increasing.
    pub fn line_offsets(&self) -> &[usize] {
        &self.line_offsets
    }

    /// Start offset of the `idx`-th composed row.
    pub fn line_start(&self, idx: usize) -> Option<usize> {
        self.line_offsets.get(idx).copied()
    }

    /// Document row of the first composed row.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Start offset of document row `row`, if it was composed.
    pub fn row_start(&self, row: usize) -> Option<usize> {
        row.checked_sub(self.first_row)
            .and_then(|idx| self.line_start(idx))
    }

    /// First match of `regex` starting at or after character `from`.
    pub fn find(&self, regex: &Regex, from: usize) -> Option<TextMatch> {
        let start = *self.byte_offsets.get(from)?;
        let m = regex.find_at(&self.text, start)?;
        let offset = self.char_offset(m.start());
        let end = self.char_offset(m.end());
        Some(TextMatch {
            offset,
            len: end - offset,
        })
    }

    /// Text covered by `m`.
    pub fn slice(&self, m: TextMatch) -> &str {
        let start = self.byte_offsets[m.offset.min(self.len())];
        let end = self.byte_offsets[m.end().min(self.len())];
        &self.text[start..end]
    }

    fn char_offset(&self, byte: usize) -> usize {
        self.byte_offsets.partition_point(|&b| b < byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn buffer(text: &str) -> Buffer {
        Buffer::from_str("t", text).unwrap()
    }

    #[test]
    fn rows_are_joined_with_single_newlines() {
        let joined = JoinedBuffer::compose(&buffer("ab\ncd\nef"), 0, 3).unwrap();
        assert_eq!(joined.as_str(), "ab\ncd\nef");
        assert_eq!(joined.line_offsets(), &[0, 3, 6]);
        assert_eq!(joined.len(), 8);
    }

    #[test]
    fn range_is_clamped_to_document() {
        let joined = JoinedBuffer::compose(&buffer("ab\ncd\nef"), 1, 99).unwrap();
        assert_eq!(joined.as_str(), "cd\nef");
        assert_eq!(joined.first_row(), 1);
        assert_eq!(joined.row_start(2), Some(3));
        assert_eq!(joined.row_start(0), None);
        assert_eq!(joined.row_start(3), None);
    }

    #[test]
    fn reading_past_end_yields_terminator() {
        let joined = JoinedBuffer::compose(&buffer("x"), 0, 1).unwrap();
        assert_eq!(joined.char_at(0), 'x');
        assert_eq!(joined.char_at(1), TERMINATOR);
        assert_eq!(joined.char_at(50), TERMINATOR);
    }

    #[test]
    fn empty_rows_keep_their_offsets() {
        let joined = JoinedBuffer::compose(&buffer("\n\nz"), 0, 3).unwrap();
        assert_eq!(joined.line_offsets(), &[0, 1, 2]);
        assert_eq!(joined.char_at(2), 'z');
    }

    #[test]
    fn find_reports_character_offsets() {
        let joined = JoinedBuffer::compose(&buffer("héllo wörld"), 0, 1).unwrap();
        let re = Regex::new("w.rld").unwrap();
        let m = joined.find(&re, 0).unwrap();
        assert_eq!(m, TextMatch { offset: 6, len: 5 });
        assert_eq!(joined.slice(m), "wörld");
        assert!(joined.find(&re, 7).is_none());
        assert!(joined.find(&re, 40).is_none());
    }

    #[test]
    fn empty_match_resumes_past_itself() {
        let m = TextMatch { offset: 4, len: 0 };
        assert_eq!(m.resume_at(), 5);
        let m = TextMatch { offset: 4, len: 2 };
        assert_eq!(m.resume_at(), 6);
    }
}
