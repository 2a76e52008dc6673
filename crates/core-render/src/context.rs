//! Per-call render state.
//!
//! A `RenderContext` is built for one `render` call and dropped afterwards:
//! the adjusted viewport, the joined buffer covering preread plus visible
//! rows, the attribute buffer, and the offsets the passes need. Nothing in
//! here outlives the call, so concurrent renderers never share it.

use crate::compose::JoinedBuffer;
use crate::error::Result;
use crate::frame::Frame;
use crate::line::LineRenderer;
use crate::paint::{AttributeBuffer, paint_keywords, paint_matching_bracket, paint_syntax};
use crate::viewport::{PREREAD_LINES, Viewport};
use core_state::{Document, Selection};
use core_syntax::{Attr, ColorTable, KeywordTable};
use tracing::trace;

/// Inputs shared across documents: palette, keyword table and screen geometry.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings<'a> {
    pub colors: &'a ColorTable,
    pub keywords: Option<&'a KeywordTable>,
    pub width: usize,
    pub height: usize,
    pub tab_size: usize,
    pub preread_lines: usize,
}

impl<'a> RenderSettings<'a> {
    pub fn new(colors: &'a ColorTable, width: usize, height: usize) -> Self {
        Self {
            colors,
            keywords: None,
            width,
            height,
            tab_size: 8,
            preread_lines: PREREAD_LINES,
        }
    }

    pub fn with_keywords(mut self, keywords: &'a KeywordTable) -> Self {
        self.keywords = Some(keywords);
        self
    }

    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_preread_lines(mut self, preread_lines: usize) -> Self {
        self.preread_lines = preread_lines;
        self
    }
}

#[derive(Debug)]
pub struct RenderContext {
    pub viewport: Viewport,
    pub top_moved: bool,
    pub left_moved: bool,
    pub buffer: JoinedBuffer,
    pub attrs: AttributeBuffer,
    /// Offset of the first visible row in `buffer`.
    pub visible: usize,
    /// Offset of the cursor in `buffer`.
    pub cursor: usize,
    pub normal: Attr,
    pub cursor_attr: Attr,
}

impl RenderContext {
    /// Adjust the viewport for the cursor and compose the buffer.
    pub fn prepare(doc: &Document, settings: &RenderSettings<'_>) -> Result<Self> {
        let cursor = doc.cursor();
        let mut viewport = Viewport::new(settings.width, settings.height, settings.tab_size)
            .at(doc.top_row(), doc.left_column());
        let top_moved = viewport.adjust_row(cursor.row);

        let preread = viewport.preread_count(settings.preread_lines);
        let first = viewport.top_row - preread;
        let buffer = JoinedBuffer::compose(doc.buffer(), first, viewport.bottom_row())?;

        let left_moved = match doc.buffer().line_chars(cursor.row) {
            Some(chars) => viewport.adjust_column(chars, cursor.col),
            None => false,
        };

        let normal = settings.colors.normal();
        let attrs = AttributeBuffer::for_buffer(&buffer, normal)?;
        let visible = buffer.line_start(preread).unwrap_or(buffer.len());
        let col = cursor.col.min(doc.line_char_len(cursor.row));
        let cursor_offset = buffer
            .row_start(cursor.row)
            .map_or(buffer.len(), |start| start + col);

        trace!(
            target: "render.engine",
            top = viewport.top_row,
            left = viewport.left_column,
            preread,
            chars = buffer.len(),
            "context_prepared"
        );
        Ok(Self {
            viewport,
            top_moved,
            left_moved,
            buffer,
            attrs,
            visible,
            cursor: cursor_offset,
            normal,
            cursor_attr: settings.colors.cursor(),
        })
    }

    /// Run the highlighting passes in order: keywords, syntax, selection,
    /// matching bracket, cursor.
    pub fn paint(&mut self, doc: &Document, settings: &RenderSettings<'_>) {
        if let Some(keywords) = settings.keywords {
            paint_keywords(&self.buffer, &mut self.attrs, keywords, self.visible);
        }
        if let Some(syntax) = doc.syntax() {
            paint_syntax(&self.buffer, &mut self.attrs, syntax);
        }
        if let Some((start, end)) = doc.selection().and_then(|sel| self.selection_span(doc, sel)) {
            self.attrs.fill(settings.colors.selection(), start, end - start);
        }
        paint_matching_bracket(
            &self.buffer,
            &mut self.attrs,
            settings.colors.matching(),
            self.cursor,
            self.visible,
        );
        self.attrs.fill(Some(self.cursor_attr), self.cursor, 1);
    }

    /// Buffer span covered by `sel`, or `None` when it misses the viewport.
    /// Parts above the viewport start at the first visible offset; parts
    /// below it run to the end of the buffer.
    pub fn selection_span(&self, doc: &Document, sel: Selection) -> Option<(usize, usize)> {
        if sel.is_empty() || !sel.touches_rows(self.viewport.top_row, self.viewport.height) {
            return None;
        }
        let len = self.buffer.len();
        let offset_of = |row: usize, col: usize| {
            self.buffer
                .row_start(row)
                .map(|start| start + col.min(doc.line_char_len(row)))
        };
        let start = if sel.begin.row < self.viewport.top_row {
            self.visible
        } else {
            offset_of(sel.begin.row, sel.begin.col)?
        };
        let end = if sel.end.row >= self.viewport.bottom_row() {
            len
        } else {
            offset_of(sel.end.row, sel.end.col).unwrap_or(len)
        };
        let (start, end) = (start.min(len), end.min(len));
        (start < end).then_some((start, end))
    }

    /// Lay out every screen row. Rows below the last document row are blank.
    pub fn layout(&self) -> Frame {
        let renderer = LineRenderer::new(
            &self.buffer,
            &self.attrs,
            &self.viewport,
            self.normal,
            self.cursor_attr,
        );
        let preread = self.viewport.top_row - self.buffer.first_row();
        Frame {
            rows: (0..self.viewport.height)
                .map(|r| renderer.row(self.buffer.line_start(preread + r)))
                .collect(),
        }
    }
}
