use crate::{Attr, ColorTable, SyntaxError, compile};
use regex::Regex;
use tracing::debug;

/// How a syntax rule selects text.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Paint every match.
    Single(Regex),
    /// Paint from each `start` match through the next `end` match, possibly
    /// spanning lines; an unterminated block runs to the end of the text.
    Block { start: Regex, end: Regex },
}

impl Pattern {
    pub fn single(expr: &str) -> Result<Self, SyntaxError> {
        Ok(Pattern::Single(compile(expr)?))
    }

    pub fn block(start: &str, end: &str) -> Result<Self, SyntaxError> {
        Ok(Pattern::Block {
            start: compile(start)?,
            end: compile(end)?,
        })
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Pattern::Block { .. })
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxRule {
    /// `None` when the rule's color name did not resolve; such rules never paint.
    pub attr: Option<Attr>,
    pub pattern: Pattern,
}

/// Ordered highlighting rules for one language. Later rules overwrite earlier
/// ones where their matches overlap.
#[derive(Debug, Clone, Default)]
pub struct SyntaxDefinition {
    pub name: String,
    pub extensions: Vec<String>,
    rules: Vec<SyntaxRule>,
}

impl SyntaxDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extensions: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn push(&mut self, attr: Option<Attr>, pattern: Pattern) {
        self.rules.push(SyntaxRule { attr, pattern });
    }

    /// Push a rule whose attribute is looked up by style name.
    pub fn push_named(&mut self, colors: &ColorTable, color: &str, pattern: Pattern) {
        let attr = colors.get(color);
        if attr.is_none() {
            debug!(target: "syntax", syntax = self.name.as_str(), color, "unresolved_rule_color");
        }
        self.push(attr, pattern);
    }

    pub fn rules(&self) -> &[SyntaxRule] {
        &self.rules
    }

    /// Case-insensitive extension match (`"rs"`, not `".rs"`).
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}
