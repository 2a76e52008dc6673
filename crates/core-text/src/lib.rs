//! Rope-based line buffer plus the display width rules shared by the renderer
//! and by callers that map between screen columns and character indices.
//!
//! Lines are addressed by index and returned without their line terminator.
//! A buffer always holds at least one (possibly empty) line; text ending in a
//! newline yields a trailing empty line, so "one\ntwo\n" has three lines.
//!
//! Character indices are Unicode scalar value (code point) indices, not byte
//! offsets. All width decisions flow through `width::cell_width`.

use anyhow::Result;
use ropey::{Rope, RopeSlice};

pub mod columns;
pub mod width;

pub use columns::{char_index_to_column, column_to_char_index};
pub use width::{cell_width, glyph_width, tab_width};

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("lines", &self.line_count())
            .field("chars", &self.rope.len_chars())
            .finish()
    }
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            name: name.into(),
        })
    }

    /// Construct a buffer from already split lines (no terminators expected).
    pub fn from_lines<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                joined.push('\n');
            }
            joined.push_str(line.as_ref());
        }
        Self {
            rope: Rope::from_str(&joined),
            name: name.into(),
        }
    }

    /// Total number of lines in the buffer (never zero).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Return the requested line as an owned `String` without its terminator.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx < self.rope.len_lines() {
            Some(self.content_slice(idx).to_string())
        } else {
            None
        }
    }

    /// Iterate the characters of a line, terminator excluded.
    pub fn line_chars(&self, idx: usize) -> Option<ropey::iter::Chars<'_>> {
        if idx < self.rope.len_lines() {
            Some(self.content_slice(idx).chars())
        } else {
            None
        }
    }

    /// Length of a line in characters (terminator excluded); 0 past the end.
    pub fn line_char_len(&self, idx: usize) -> usize {
        if idx >= self.rope.len_lines() {
            return 0;
        }
        self.content_slice(idx).len_chars()
    }

    fn content_slice(&self, idx: usize) -> RopeSlice<'_> {
        let line = self.rope.line(idx);
        let mut end = line.len_chars();
        // Only LF breaks lines; a CR right before it belongs to the terminator.
        if end > 0 && line.char(end - 1) == '\n' {
            end -= 1;
            if end > 0 && line.char(end - 1) == '\r' {
                end -= 1;
            }
        }
        line.slice(..end)
    }
}
