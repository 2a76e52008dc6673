//! Renderer facade: one call turns a document and settings into a frame.
//!
//! Each `render` call runs the whole pipeline on fresh per-call buffers:
//! viewport adjustment, composition of preread plus visible rows, the
//! highlighting passes, row layout, and finally the diff against the
//! previous frame. The only state carried between calls is the remembered
//! frame (for optimization) and the counters.

use crate::context::{RenderContext, RenderSettings};
use crate::diff::FrameDiffer;
use crate::error::Result;
use crate::frame::{Frame, FrameDelta};
use crate::metrics::{RenderMetrics, RenderMetricsSnapshot};
use core_state::Document;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{debug, debug_span, trace};

/// Frame plus the scroll corrections computed while rendering it. The
/// document itself is never mutated by `render`; callers persist the new
/// origin with `persist_scroll`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOutput {
    pub frame: FrameDelta,
    /// New top row, if the viewport had to scroll vertically.
    pub top_row: Option<usize>,
    /// New left column, if the viewport had to scroll horizontally.
    pub left_column: Option<usize>,
}

impl RenderOutput {
    pub fn scrolled(&self) -> bool {
        self.top_row.is_some() || self.left_column.is_some()
    }

    pub fn persist_scroll(&self, doc: &mut Document) {
        if let Some(top) = self.top_row {
            doc.set_top_row(top);
        }
        if let Some(left) = self.left_column {
            doc.set_left_column(left);
        }
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    differ: FrameDiffer,
    metrics: RenderMetrics,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `doc` into a frame of `settings.height` rows of
    /// `settings.width` cells. With `optimize`, rows equal to the previous
    /// frame come back as `None`. Without a document the call is a no-op
    /// producing an empty frame.
    pub fn render(
        &mut self,
        doc: Option<&Document>,
        settings: &RenderSettings<'_>,
        optimize: bool,
    ) -> Result<RenderOutput> {
        let Some(doc) = doc else {
            trace!(target: "render.engine", "no_document");
            return Ok(RenderOutput::default());
        };
        let span = debug_span!(
            target: "render.engine",
            "render",
            doc = doc.name(),
            width = settings.width,
            height = settings.height,
            optimize
        );
        let _enter = span.enter();
        let started = Instant::now();

        let mut ctx = RenderContext::prepare(doc, settings)?;
        ctx.paint(doc, settings);
        let frame = ctx.layout();
        let diffed = optimize && self.differ.previous().is_some();
        let delta = self.differ.diff(frame, optimize);

        let painted = delta.changed_count();
        let skipped = delta.len() - painted;
        self.metrics.record_frame(painted, skipped, diffed);
        if ctx.top_moved || ctx.left_moved {
            self.metrics
                .scroll_adjustments
                .fetch_add(1, Ordering::Relaxed);
        }
        self.metrics
            .last_buffer_chars
            .store(ctx.buffer.len() as u64, Ordering::Relaxed);
        let elapsed = started.elapsed().as_nanos() as u64;
        self.metrics.last_render_ns.store(elapsed, Ordering::Relaxed);

        debug!(
            target: "render.engine",
            painted,
            skipped,
            top = ctx.viewport.top_row,
            left = ctx.viewport.left_column,
            elapsed_ns = elapsed,
            "render_complete"
        );
        Ok(RenderOutput {
            frame: delta,
            top_row: ctx.top_moved.then_some(ctx.viewport.top_row),
            left_column: ctx.left_moved.then_some(ctx.viewport.left_column),
        })
    }

    /// Render and write any scroll correction back into `doc`.
    pub fn render_document(
        &mut self,
        doc: &mut Document,
        settings: &RenderSettings<'_>,
        optimize: bool,
    ) -> Result<FrameDelta> {
        let output = self.render(Some(doc), settings, optimize)?;
        output.persist_scroll(doc);
        Ok(output.frame)
    }

    /// Drop the remembered frame, e.g. after the screen was cleared.
    pub fn invalidate(&mut self) {
        self.differ.reset();
    }

    pub fn previous_frame(&self) -> Option<&Frame> {
        self.differ.previous()
    }

    pub fn metrics(&self) -> &RenderMetrics {
        &self.metrics
    }

    pub fn metrics_snapshot(&self) -> RenderMetricsSnapshot {
        self.metrics.snapshot()
    }
}
