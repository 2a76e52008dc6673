//! hilite entrypoint: render a highlighted window of a text file and print it.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::{EditorSettings, Highlighting, load_from};
use core_render::{RenderSettings, Renderer};
use core_state::{Cursor, Document};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod display;

use display::Palette;

const SAMPLE_NAME: &str = "sample.c";
const SAMPLE: &str = r#"/* hilite sample
 * block comments may span lines */
#include <stdio.h>

static int count(const char *s) {
	int n = 0;
	while (s[n] != '\0') {
		n++; // tabs expand to stops
	}
	return n;
}

int main(void) {
	printf("%d\n", count("界 wide glyphs"));
	return 0;
}
"#;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "hilite", version, about = "Render a highlighted window of a text file")]
struct Args {
    /// File to render. A built-in C sample is used when omitted.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `hilite.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Cursor row (0-based).
    #[arg(long, default_value_t = 0)]
    pub row: usize,
    /// Cursor character index within the row (0-based).
    #[arg(long, default_value_t = 0)]
    pub col: usize,
    /// Window width in cells; defaults to the terminal width.
    #[arg(long)]
    pub width: Option<u16>,
    /// Window height in rows; defaults to the terminal height minus one.
    #[arg(long)]
    pub height: Option<u16>,
    /// Selection as `ROW:COL-ROW:COL`.
    #[arg(long, value_parser = parse_selection)]
    pub select: Option<SelectionArg>,
    /// Print attribute codes instead of terminal colors.
    #[arg(long)]
    pub annotate: bool,
    /// Step the cursor down one row per frame until the end of the file,
    /// reporting how many rows each frame repaints.
    #[arg(long)]
    pub walk: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectionArg {
    from: Cursor,
    to: Cursor,
}

fn parse_position(s: &str) -> Result<Cursor, String> {
    let (row, col) = s
        .split_once(':')
        .ok_or_else(|| format!("`{s}` is not ROW:COL"))?;
    let row = row.trim().parse().map_err(|e| format!("row `{row}`: {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("col `{col}`: {e}"))?;
    Ok(Cursor::new(row, col))
}

fn parse_selection(s: &str) -> Result<SelectionArg, String> {
    let (from, to) = s
        .split_once('-')
        .ok_or_else(|| format!("`{s}` is not ROW:COL-ROW:COL"))?;
    Ok(SelectionArg {
        from: parse_position(from)?,
        to: parse_position(to)?,
    })
}

struct App {
    log_guard: Option<WorkerGuard>,
}

impl App {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join("hilite.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "hilite.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    fn run(&mut self, args: Args) -> Result<()> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let config = load_from(args.config.clone())?;
        let editor = config.editor_settings();
        let highlighting = config.highlighting()?;
        let mut doc = load_document(&args, &highlighting)?;
        let (width, height) = window_size(&args);

        info!(
            target: "runtime.startup",
            doc = doc.name(),
            lines = doc.line_count(),
            syntax = doc.syntax().map(|s| s.name.as_str()),
            width,
            height,
            tab_size = editor.tab_size,
            config_override = args.config.is_some(),
            "bootstrap_complete"
        );

        let settings = render_settings(&highlighting, &editor, width, height);
        let mut renderer = Renderer::new();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        let frame = renderer.render_document(&mut doc, &settings, editor.optimize)?;
        if args.annotate {
            display::write_annotated(&mut out, &frame)?;
        } else {
            let palette = Palette::from_colors(&highlighting.colors);
            display::write_frame(&mut out, &frame, &palette)?;
        }

        if args.walk {
            walk(&mut renderer, &mut doc, &settings, editor.optimize, &mut out)?;
        }

        let snap = renderer.metrics_snapshot();
        info!(
            target: "runtime",
            frames = snap.frames,
            rows_painted = snap.rows_painted,
            rows_skipped = snap.rows_skipped,
            last_render_ns = snap.last_render_ns,
            "shutdown"
        );
        Ok(())
    }
}

fn load_document(args: &Args, highlighting: &Highlighting) -> Result<Document> {
    let mut doc = match args.path.as_ref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("file");
            debug!(target: "io", file = %path.display(), size_bytes = text.len(), "file_read_ok");
            let mut doc = Document::from_text(name, &text)?;
            doc.set_syntax(highlighting.syntax_for_path(path));
            doc
        }
        None => {
            let mut doc = Document::from_text(SAMPLE_NAME, SAMPLE)?;
            doc.set_syntax(highlighting.syntax_for_path(Path::new(SAMPLE_NAME)));
            doc
        }
    };
    if doc.syntax().is_none() {
        debug!(target: "runtime.startup", doc = doc.name(), "no_syntax_for_extension");
    }
    doc.set_cursor(args.row, args.col);
    if doc.cursor() != Cursor::new(args.row, args.col) {
        warn!(target: "runtime.startup", row = args.row, col = args.col, "cursor_clamped");
    }
    if let Some(sel) = args.select {
        doc.set_selection(sel.from, sel.to);
    }
    Ok(doc)
}

fn window_size(args: &Args) -> (usize, usize) {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 25));
    let width = args.width.unwrap_or(w);
    let height = args.height.unwrap_or(h.saturating_sub(1));
    (usize::from(width), usize::from(height))
}

fn render_settings<'a>(
    highlighting: &'a Highlighting,
    editor: &EditorSettings,
    width: usize,
    height: usize,
) -> RenderSettings<'a> {
    RenderSettings::new(&highlighting.colors, width, height)
        .with_keywords(&highlighting.keywords)
        .with_tab_size(editor.tab_size)
        .with_preread_lines(editor.preread_lines)
}

fn walk<W: Write>(
    renderer: &mut Renderer,
    doc: &mut Document,
    settings: &RenderSettings<'_>,
    optimize: bool,
    out: &mut W,
) -> Result<()> {
    loop {
        let row = doc.cursor().row + 1;
        if row >= doc.line_count() {
            break;
        }
        doc.set_cursor(row, doc.cursor().col);
        let frame = renderer.render_document(doc, settings, optimize)?;
        writeln!(
            out,
            "row {row:>4}: top {:>4}, repainted {}/{}",
            doc.top_row(),
            frame.changed_count(),
            frame.len()
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    App::new().run(args)
}
