//! Terminal output for rendered frames.
//!
//! Attribute codes are opaque to the renderer; this is the one place that
//! turns them into terminal styles. The well-known codes get fixed treatments
//! and every other code cycles through a small foreground palette.

use core_render::{FrameDelta, Row};
use core_syntax::{Attr, ColorTable};
use crossterm::queue;
use crossterm::style::{Attribute, Color, ContentStyle, Print, PrintStyledContent, StyledContent};
use std::io::{self, Write};

const FOREGROUNDS: [Color; 6] = [
    Color::Green,
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    normal: Attr,
    cursor: Attr,
    selection: Option<Attr>,
    matching: Option<Attr>,
}

impl Palette {
    pub fn from_colors(colors: &ColorTable) -> Self {
        Self {
            normal: colors.normal(),
            cursor: colors.cursor(),
            selection: colors.selection(),
            matching: colors.matching(),
        }
    }

    pub fn style(&self, attr: Attr) -> ContentStyle {
        let mut style = ContentStyle::new();
        if attr == self.normal {
            return style;
        }
        if attr == self.cursor {
            style.attributes.set(Attribute::Reverse);
        } else if Some(attr) == self.selection {
            style.background_color = Some(Color::DarkBlue);
        } else if Some(attr) == self.matching {
            style.attributes.set(Attribute::Bold);
            style.attributes.set(Attribute::Underlined);
        } else {
            style.foreground_color = Some(FOREGROUNDS[usize::from(attr.0) % FOREGROUNDS.len()]);
        }
        style
    }
}

/// Print every changed row with terminal styling. Unchanged rows print as
/// empty lines so row positions stay aligned. Returns rows printed.
pub fn write_frame<W: Write>(
    out: &mut W,
    frame: &FrameDelta,
    palette: &Palette,
) -> io::Result<usize> {
    let mut printed = 0;
    for row in &frame.rows {
        if let Some(row) = row {
            for run in &row.runs {
                let style = palette.style(run.attr);
                queue!(out, PrintStyledContent(StyledContent::new(style, run.text.as_str())))?;
            }
            printed += 1;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()?;
    Ok(printed)
}

/// Plain-text form of a row: each run prefixed with its attribute code,
/// e.g. `[6]if[0](x)`.
pub fn annotate_row(row: &Row) -> String {
    let mut line = String::new();
    for run in &row.runs {
        line.push('[');
        line.push_str(&run.attr.0.to_string());
        line.push(']');
        line.push_str(&run.text);
    }
    line
}

pub fn write_annotated<W: Write>(out: &mut W, frame: &FrameDelta) -> io::Result<usize> {
    let mut printed = 0;
    for (i, row) in frame.rows.iter().enumerate() {
        match row {
            Some(row) => {
                writeln!(out, "{i:>3} {}", annotate_row(row).trim_end())?;
                printed += 1;
            }
            None => writeln!(out, "{i:>3} =")?,
        }
    }
    out.flush()?;
    Ok(printed)
}
