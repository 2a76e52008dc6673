//! Built-in palette and a C-family definition used when no configuration
//! provides its own.

use crate::{Attr, ColorTable, KeywordTable, Pattern, SyntaxDefinition, SyntaxError};

pub const COMMENT: &str = "comment";
pub const STRING: &str = "string";
pub const KEYWORD: &str = "keyword";
pub const TYPE: &str = "type";

const C_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue",
    "return", "goto", "struct", "union", "enum", "typedef", "static", "extern", "const",
    "sizeof",
];

const C_TYPES: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned",
];

/// Codes 0..=7 for the well-known and built-in style names.
pub fn default_palette() -> ColorTable {
    [
        (crate::NORMAL, Attr(0)),
        (crate::CURSOR, Attr(1)),
        (crate::SELECTION, Attr(2)),
        (crate::MATCHING, Attr(3)),
        (COMMENT, Attr(4)),
        (STRING, Attr(5)),
        (KEYWORD, Attr(6)),
        (TYPE, Attr(7)),
    ]
    .into_iter()
    .collect()
}

/// Block comments, line comments, string and char literals.
pub fn c_syntax(colors: &ColorTable) -> Result<SyntaxDefinition, SyntaxError> {
    let mut def = SyntaxDefinition::new("c").with_extensions(["c", "h", "cpp", "hpp", "rs"]);
    def.push_named(colors, STRING, Pattern::single(r#""(\\.|[^"\\\n])*""#)?);
    def.push_named(colors, STRING, Pattern::single(r"'(\\.|[^'\\\n])'")?);
    def.push_named(colors, COMMENT, Pattern::single(r"//[^\n]*")?);
    def.push_named(colors, COMMENT, Pattern::block(r"/\*", r"\*/")?);
    Ok(def)
}

/// Keyword and type names of the C family.
pub fn c_keywords(colors: &ColorTable) -> KeywordTable {
    let mut table = KeywordTable::new();
    if let Some(attr) = colors.get(KEYWORD) {
        for word in C_KEYWORDS {
            table.insert(*word, attr);
        }
    }
    if let Some(attr) = colors.get(TYPE) {
        for word in C_TYPES {
            table.insert(*word, attr);
        }
    }
    table
}
