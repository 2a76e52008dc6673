//! Document state consumed by the renderer.
//!
//! A `Document` owns the text lines plus everything the screen drawing core
//! reads about how they are being viewed: the cursor, the scroll origin
//! (`top_row`, `left_column`), an optional selection and the syntax
//! definition used for highlighting. The renderer only borrows a document;
//! scroll corrections it computes are handed back to the caller, which
//! persists them with `set_top_row` / `set_left_column`.
//!
//! Invariants (after every public mutator):
//! * `cursor.row < line_count()`.
//! * `cursor.col <= line_char_len(cursor.row)` (col is a character index; the
//!   position just past the last character is allowed).
//! * A stored selection is normalized: `begin <= end`, `end` exclusive.

use anyhow::Result;
use core_syntax::SyntaxDefinition;
use core_text::Buffer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

/// Cursor position as (row, character index). Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Marked region, `[begin, end)` in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub begin: Cursor,
    pub end: Cursor,
}

impl Selection {
    /// Construct a selection normalizing endpoint order.
    pub fn new(a: Cursor, b: Cursor) -> Self {
        if a <= b {
            Self { begin: a, end: b }
        } else {
            Self { begin: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// True if any part of the selection lies on rows `[first, first + rows)`.
    pub fn touches_rows(&self, first: usize, rows: usize) -> bool {
        self.end.row >= first && self.begin.row < first.saturating_add(rows)
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    buffer: Buffer,
    cursor: Cursor,
    top_row: usize,
    left_column: usize,
    selection: Option<Selection>,
    syntax: Option<Arc<SyntaxDefinition>>,
}

impl Document {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
            top_row: 0,
            left_column: 0,
            selection: None,
            syntax: None,
        }
    }

    /// Build a document from raw text (`\n` or `\r\n` separated).
    pub fn from_text(name: impl Into<String>, text: &str) -> Result<Self> {
        Ok(Self::new(Buffer::from_str(name, text)?))
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn name(&self) -> &str {
        &self.buffer.name
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line(&self, row: usize) -> Option<String> {
        self.buffer.line(row)
    }

    pub fn line_char_len(&self, row: usize) -> usize {
        self.buffer.line_char_len(row)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the cursor, clamping into the document.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row_clamped = row.min(self.line_count().saturating_sub(1));
        let col_clamped = col.min(self.line_char_len(row_clamped));
        if row_clamped != row || col_clamped != col {
            trace!(target: "state", row, col, row_clamped, col_clamped, "cursor_clamped");
        }
        self.cursor = Cursor::new(row_clamped, col_clamped);
    }

    pub fn top_row(&self) -> usize {
        self.top_row
    }

    pub fn set_top_row(&mut self, top_row: usize) {
        self.top_row = top_row;
    }

    pub fn left_column(&self) -> usize {
        self.left_column
    }

    pub fn set_left_column(&mut self, left_column: usize) {
        self.left_column = left_column;
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_selection(&mut self, a: Cursor, b: Cursor) {
        self.selection = Some(Selection::new(a, b));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn syntax(&self) -> Option<&SyntaxDefinition> {
        self.syntax.as_deref()
    }

    pub fn set_syntax(&mut self, syntax: Option<Arc<SyntaxDefinition>>) {
        self.syntax = syntax;
    }
}

/// Process-wide "exit requested" latch for drivers that poll between frames.
#[derive(Debug, Default)]
pub struct ExitFlag(AtomicBool);

impl ExitFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
