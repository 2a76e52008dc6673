//! Frame differ.
//!
//! Keeps the last frame handed out and, when asked to optimize, replaces every
//! row that is structurally equal to the same row of that frame with `None`.
//! Rows past the end of the shorter frame always count as changed. The frame
//! remembered for the next comparison is always the complete new frame, never
//! the reduced one, so a row omitted once is still compared correctly later.

use crate::frame::{Frame, FrameDelta};
use tracing::trace;

#[derive(Debug, Default)]
pub struct FrameDiffer {
    previous: Option<Frame>,
}

impl FrameDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diff(&mut self, frame: Frame, optimize: bool) -> FrameDelta {
        let delta = match (&self.previous, optimize) {
            (Some(previous), true) => FrameDelta {
                rows: frame
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| match previous.rows.get(i) {
                        Some(old) if old == row => None,
                        _ => Some(row.clone()),
                    })
                    .collect(),
            },
            _ => FrameDelta::full(&frame),
        };
        trace!(
            target: "render.engine",
            rows = delta.len(),
            changed = delta.changed_count(),
            optimize,
            "frame_diff"
        );
        self.previous = Some(frame);
        delta
    }

    pub fn previous(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    /// Forget the remembered frame so the next diff reports every row.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
