//! Viewport placement.
//!
//! The viewport is the window of the document shown on screen: `top_row` and
//! `left_column` are its origin, `width`/`height` its size in cells. Before
//! each frame the origin is nudged by the minimal amount that keeps the cursor
//! inside the window, always leaving a one-cell margin at the far edge
//! (`extent - 2` rather than `extent - 1`).
//!
//! Guarantees after `adjust_row` / `adjust_column`:
//! * `top_row <= cursor_row <= top_row + max(height, 2) - 2`
//! * the same relation for the cursor's visual column and `left_column`
//! * neither origin moves when the cursor was already inside the window.

use core_text::columns::column_at;

/// Default upper bound on lines composed above the viewport so multi-line
/// constructs opening above the screen still paint correctly.
pub const PREREAD_LINES: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top_row: usize,
    pub left_column: usize,
    pub width: usize,
    pub height: usize,
    pub tab_size: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize, tab_size: usize) -> Self {
        Self {
            top_row: 0,
            left_column: 0,
            width,
            height,
            tab_size: tab_size.max(1),
        }
    }

    pub fn at(mut self, top_row: usize, left_column: usize) -> Self {
        self.top_row = top_row;
        self.left_column = left_column;
        self
    }

    /// One past the last document row shown.
    pub fn bottom_row(&self) -> usize {
        self.top_row.saturating_add(self.height)
    }

    pub fn adjust_row(&mut self, cursor_row: usize) -> bool {
        adjust_row(cursor_row, &mut self.top_row, self.height)
    }

    /// Adjust `left_column` for a cursor at `cursor_char_index` on the line
    /// yielded by `line`. The visual column accounts for tab stops and
    /// wide glyphs.
    pub fn adjust_column<I>(&mut self, line: I, cursor_char_index: usize) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        let column = column_at(line, cursor_char_index, self.tab_size);
        adjust_column(column, &mut self.left_column, self.width)
    }

    pub fn preread_count(&self, preread_lines: usize) -> usize {
        preread_count(self.top_row, preread_lines)
    }
}

/// Scroll `top_row` so `cursor_row` is visible. Returns true when it moved.
pub fn adjust_row(cursor_row: usize, top_row: &mut usize, height: usize) -> bool {
    adjust_origin(cursor_row, top_row, height)
}

/// Scroll `left_column` so the visual `cursor_column` is visible. Returns
/// true when it moved.
pub fn adjust_column(cursor_column: usize, left_column: &mut usize, width: usize) -> bool {
    adjust_origin(cursor_column, left_column, width)
}

/// Rows composed above `top_row` (never more than exist).
pub fn preread_count(top_row: usize, preread_lines: usize) -> usize {
    top_row.min(preread_lines)
}

fn adjust_origin(position: usize, origin: &mut usize, extent: usize) -> bool {
    let before = *origin;
    let span = extent.saturating_sub(2);
    if position < *origin {
        *origin = position;
    }
    if position > *origin + span {
        *origin = position - span;
    }
    before != *origin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_scrolls_down_with_margin() {
        let mut top = 0;
        assert!(adjust_row(30, &mut top, 25));
        assert_eq!(top, 7);
        assert!(!adjust_row(30, &mut top, 25));
    }

    #[test]
    fn row_scrolls_up_to_cursor() {
        let mut top = 40;
        assert!(adjust_row(12, &mut top, 25));
        assert_eq!(top, 12);
    }

    #[test]
    fn row_inside_window_is_untouched() {
        let mut top = 10;
        assert!(!adjust_row(10, &mut top, 25));
        assert!(!adjust_row(33, &mut top, 25));
        assert_eq!(top, 10);
    }

    #[test]
    fn tiny_extents_pin_origin_to_cursor() {
        let mut top = 0;
        adjust_row(5, &mut top, 1);
        assert_eq!(top, 5);
        let mut left = 9;
        adjust_column(3, &mut left, 0);
        assert_eq!(left, 3);
    }

    #[test]
    fn column_uses_visual_width_of_tabs() {
        let mut vp = Viewport::new(10, 5, 8);
        // two tabs put the cursor at column 16
        assert!(vp.adjust_column("\t\tx".chars(), 2));
        assert_eq!(vp.left_column, 8);
    }

    #[test]
    fn preread_never_exceeds_rows_above() {
        assert_eq!(preread_count(0, PREREAD_LINES), 0);
        assert_eq!(preread_count(20, PREREAD_LINES), 20);
        assert_eq!(preread_count(500, PREREAD_LINES), 60);
        let vp = Viewport::new(80, 25, 8).at(70, 0);
        assert_eq!(vp.preread_count(10), 10);
        assert_eq!(vp.bottom_row(), 95);
    }
}
