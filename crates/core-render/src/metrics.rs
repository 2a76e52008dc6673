//! Render counters.
//!
//! Relaxed atomics so a shared `Renderer` can be inspected without locking.
//! Values are monotonic except the `last_*` gauges.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RenderMetrics {
    /// Frames produced.
    pub frames: AtomicU64,
    /// Frames diffed against a previous frame.
    pub optimized_frames: AtomicU64,
    pub rows_painted: AtomicU64,
    /// Rows reported as unchanged (`None`).
    pub rows_skipped: AtomicU64,
    /// Frames whose viewport origin had to move to follow the cursor.
    pub scroll_adjustments: AtomicU64,
    pub last_buffer_chars: AtomicU64,
    pub last_render_ns: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderMetricsSnapshot {
    pub frames: u64,
    pub optimized_frames: u64,
    pub rows_painted: u64,
    pub rows_skipped: u64,
    pub scroll_adjustments: u64,
    pub last_buffer_chars: u64,
    pub last_render_ns: u64,
}

impl RenderMetrics {
    pub fn snapshot(&self) -> RenderMetricsSnapshot {
        RenderMetricsSnapshot {
            frames: self.frames.load(Ordering::Relaxed),
            optimized_frames: self.optimized_frames.load(Ordering::Relaxed),
            rows_painted: self.rows_painted.load(Ordering::Relaxed),
            rows_skipped: self.rows_skipped.load(Ordering::Relaxed),
            scroll_adjustments: self.scroll_adjustments.load(Ordering::Relaxed),
            last_buffer_chars: self.last_buffer_chars.load(Ordering::Relaxed),
            last_render_ns: self.last_render_ns.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn record_frame(&self, painted: usize, skipped: usize, optimized: bool) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        if optimized {
            self.optimized_frames.fetch_add(1, Ordering::Relaxed);
        }
        self.rows_painted.fetch_add(painted as u64, Ordering::Relaxed);
        self.rows_skipped.fetch_add(skipped as u64, Ordering::Relaxed);
    }
}
