//! Screen drawing core: turns a document view into rows of attribute runs.
//!
//! Pipeline for one frame (see `render_engine::Renderer::render`):
//! 1. `viewport`: nudge the scroll origin so the cursor is visible.
//! 2. `compose`: join the visible rows, plus up to `preread_lines` rows above
//!    them, into one buffer with `'\n'` between rows.
//! 3. `paint`: fill one attribute per character. Passes run in order and
//!    later ones win: keywords, syntax rules, selection, matching bracket,
//!    cursor.
//! 4. `line`: walk each visible row into runs, expanding tabs, clipping to
//!    the window and padding to the full width.
//! 5. `diff`: with optimization on, rows equal to the previous frame are
//!    returned as `None`.
//!
//! Invariants:
//! - Every row of a returned frame is exactly `width` cells wide.
//! - The cursor cell always carries the cursor attribute.
//! - Rendering never mutates the document. Scroll corrections are returned in
//!   `RenderOutput` and persisted by the caller.
//! - All per-call buffers are allocated with `try_reserve`; exhaustion is
//!   reported as `RenderError::Allocation`.
//!
//! Offsets are character (code point) indices throughout. Widths follow
//! `core_text::width`, re-exported here together with the column helpers
//! callers need to map screen positions back to text.

pub mod bracket;
pub mod compose;
pub mod context;
pub mod diff;
pub mod error;
pub mod frame;
pub mod line;
pub mod metrics;
pub mod paint;
pub mod render_engine;
pub mod viewport;

pub use compose::{JoinedBuffer, TERMINATOR, TextMatch};
pub use context::{RenderContext, RenderSettings};
pub use diff::FrameDiffer;
pub use error::{RenderError, Result};
pub use frame::{Frame, FrameDelta, Row, Run};
pub use line::{LineRenderer, RUN_CAPACITY};
pub use metrics::{RenderMetrics, RenderMetricsSnapshot};
pub use paint::AttributeBuffer;
pub use render_engine::{RenderOutput, Renderer};
pub use viewport::{PREREAD_LINES, Viewport};

pub use core_text::{char_index_to_column, column_to_char_index};
