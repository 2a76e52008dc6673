//! Turns one row of the joined buffer into attribute runs.
//!
//! The row is walked from its start offset, tracking the visual column of
//! each character. Characters left of `left_column` are skipped; a tab or
//! wide glyph straddling the left edge contributes spaces for the cells that
//! fall inside the window. Tabs expand to spaces. A glyph that would cross the
//! right edge is replaced by a single space. End of line renders as one space
//! and the rest of the row is padded with the normal attribute, so every row
//! is exactly `width` cells wide.
//!
//! A new run starts whenever the attribute changes or the current run would
//! exceed `RUN_CAPACITY` cells. A multi-cell run carrying the cursor attribute
//! (a tab under the cursor) is split so only its first cell shows the cursor.

use crate::compose::{JoinedBuffer, TERMINATOR};
use crate::frame::{Row, Run};
use crate::paint::AttributeBuffer;
use crate::viewport::Viewport;
use core_syntax::Attr;
use core_text::width::cell_width;

/// Upper bound on cells per run.
pub const RUN_CAPACITY: usize = 128;

pub struct LineRenderer<'a> {
    buffer: &'a JoinedBuffer,
    attrs: &'a AttributeBuffer,
    left: usize,
    width: usize,
    tab_size: usize,
    normal: Attr,
    cursor: Attr,
}

impl<'a> LineRenderer<'a> {
    pub fn new(
        buffer: &'a JoinedBuffer,
        attrs: &'a AttributeBuffer,
        viewport: &Viewport,
        normal: Attr,
        cursor: Attr,
    ) -> Self {
        Self {
            buffer,
            attrs,
            left: viewport.left_column,
            width: viewport.width,
            tab_size: viewport.tab_size,
            normal,
            cursor,
        }
    }

    /// Render the row starting at `start`; `None` renders a blank row.
    pub fn row(&self, start: Option<usize>) -> Row {
        let mut out = RunBuilder::new(self.normal, self.cursor);
        if let Some(start) = start {
            self.walk(start, &mut out);
        }
        if out.width < self.width {
            let pad = self.width - out.width;
            out.push(self.normal, ' ', pad, pad);
        }
        out.finish()
    }

    fn walk(&self, start: usize, out: &mut RunBuilder) {
        let right = self.left + self.width;
        let mut column = 0;
        let mut offset = start;
        while column < right {
            let c = self.buffer.char_at(offset);
            let eol = c == '\n' || c == TERMINATOR;
            let cells = if eol { 1 } else { cell_width(column, c, self.tab_size) };
            let attr = self.attrs.get(offset).unwrap_or(self.normal);

            if column < self.left {
                let inside = (column + cells).saturating_sub(self.left).min(self.width);
                out.push(attr, ' ', inside, inside);
            } else if eol {
                out.push(attr, ' ', 1, 1);
            } else if c == '\t' {
                let n = cells.min(right - column);
                out.push(attr, ' ', n, n);
            } else if column + cells > right {
                out.push(attr, ' ', 1, 1);
            } else {
                out.push(attr, c, 1, cells);
            }

            if eol {
                break;
            }
            column += cells;
            offset += 1;
        }
    }
}

struct RunBuilder {
    runs: Vec<Run>,
    current: Option<Run>,
    width: usize,
    normal: Attr,
    cursor: Attr,
}

impl RunBuilder {
    fn new(normal: Attr, cursor: Attr) -> Self {
        Self {
            runs: Vec::new(),
            current: None,
            width: 0,
            normal,
            cursor,
        }
    }

    /// Append `count` copies of `glyph` occupying `cells` cells in total.
    /// Multi-glyph spans are single-cell spaces and may be split across runs.
    fn push(&mut self, attr: Attr, glyph: char, count: usize, cells: usize) {
        if count == 0 {
            return;
        }
        if count == 1 {
            self.append(attr, glyph, 1, cells);
            return;
        }
        // Only the first cell of a spread-out cursor shows the cursor.
        if attr == self.cursor && self.cursor != self.normal {
            self.append(attr, glyph, 1, 1);
            self.push(self.normal, glyph, count - 1, cells - 1);
            return;
        }
        let mut remaining = count;
        while remaining > 0 {
            let room = match &self.current {
                Some(run) if run.attr == attr && run.width < RUN_CAPACITY => {
                    RUN_CAPACITY - run.width
                }
                _ => RUN_CAPACITY,
            };
            let n = remaining.min(room);
            self.append(attr, glyph, n, n);
            remaining -= n;
        }
    }

    fn append(&mut self, attr: Attr, glyph: char, count: usize, cells: usize) {
        let fits = matches!(
            &self.current,
            Some(run) if run.attr == attr && run.width + cells <= RUN_CAPACITY
        );
        if !fits {
            self.flush();
        }
        let run = self
            .current
            .get_or_insert_with(|| Run::new(attr, String::new(), 0));
        run.text.extend(std::iter::repeat_n(glyph, count));
        run.width += cells;
        self.width += cells;
    }

    fn flush(&mut self) {
        if let Some(run) = self.current.take() {
            self.runs.push(run);
        }
    }

    fn finish(mut self) -> Row {
        self.flush();
        Row { runs: self.runs }
    }
}
