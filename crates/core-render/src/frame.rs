//! Rendered output: attribute runs grouped into rows, rows into frames.

use core_syntax::Attr;

/// Consecutive cells sharing one attribute. `width` is the number of screen
/// cells the text occupies, which differs from its character count for wide
/// and zero-width glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub attr: Attr,
    pub text: String,
    pub width: usize,
}

impl Run {
    pub fn new(attr: Attr, text: impl Into<String>, width: usize) -> Self {
        Self {
            attr,
            text: text.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub runs: Vec<Run>,
}

impl Row {
    pub fn width(&self) -> usize {
        self.runs.iter().map(|r| r.width).sum()
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Attribute painted on screen column `column` of this row.
    pub fn attr_at(&self, column: usize) -> Option<Attr> {
        let mut start = 0;
        for run in &self.runs {
            if column < start + run.width {
                return Some(run.attr);
            }
            start += run.width;
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub rows: Vec<Row>,
}

impl Frame {
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Frame as handed to the caller: `None` marks a row identical to the same
/// row of the previous frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameDelta {
    pub rows: Vec<Option<Row>>,
}

impl FrameDelta {
    pub fn full(frame: &Frame) -> Self {
        Self {
            rows: frame.rows.iter().cloned().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that need repainting, with their screen row index.
    pub fn changed(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.as_ref().map(|r| (i, r)))
    }

    pub fn changed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_width_counts_cells_not_chars() {
        let row = Row {
            runs: vec![Run::new(Attr(0), "ab", 2), Run::new(Attr(1), "界", 2)],
        };
        assert_eq!(row.width(), 4);
        assert_eq!(row.text(), "ab界");
        assert_eq!(row.attr_at(1), Some(Attr(0)));
        assert_eq!(row.attr_at(3), Some(Attr(1)));
        assert_eq!(row.attr_at(4), None);
    }

    #[test]
    fn delta_reports_changed_rows() {
        let delta = FrameDelta {
            rows: vec![None, Some(Row::default()), None],
        };
        assert_eq!(delta.changed_count(), 1);
        assert_eq!(delta.changed().map(|(i, _)| i).collect::<Vec<_>>(), vec![1]);
    }
}
