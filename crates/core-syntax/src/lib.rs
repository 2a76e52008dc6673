//! Highlighting vocabulary shared by configuration, documents and the renderer.
//!
//! * `Attr` is an opaque style code. The renderer never interprets it; the
//!   display driver maps it to colors/fonts.
//! * `ColorTable` resolves style names (`normal`, `cursor`, `comment`, ...) to
//!   codes. A missing name resolves to `None`, which every painting pass treats
//!   as "leave the underlying attribute alone".
//! * `SyntaxDefinition` is an ordered rule list; each rule pairs an optional
//!   attribute with a `Pattern` that is either a single regex (paint every
//!   match) or a start/end pair (paint a possibly multiline block).
//! * `KeywordTable` maps whole words to attributes with an optional resolver
//!   callback consulted for words missing from the map.
//!
//! Regexes are compiled once here; a bad expression is reported as
//! `SyntaxError::InvalidPattern` at configuration time and never reaches the
//! render path.

use thiserror::Error;

pub mod builtin;
mod color;
mod keyword;
mod pattern;

pub use color::{Attr, CURSOR, ColorTable, MATCHING, NORMAL, SELECTION};
pub use keyword::{DEFAULT_WORD_PATTERN, KeywordTable, WordResolver};
pub use pattern::{Pattern, SyntaxDefinition, SyntaxRule};

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub(crate) fn compile(expr: &str) -> Result<regex::Regex, SyntaxError> {
    regex::Regex::new(expr).map_err(|source| SyntaxError::InvalidPattern {
        pattern: expr.to_string(),
        source,
    })
}
