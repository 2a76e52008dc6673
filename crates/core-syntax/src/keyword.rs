use crate::{Attr, SyntaxError, compile};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Default word matcher used by the keyword pass.
pub const DEFAULT_WORD_PATTERN: &str = r"\b\w+\b";

static DEFAULT_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_WORD_PATTERN).expect("default word pattern compiles"));

/// Callback consulted for words missing from the keyword map.
pub type WordResolver = Box<dyn Fn(&str) -> Option<Attr>>;

/// Whole-word highlighting: word regex + word -> attribute map + resolver.
pub struct KeywordTable {
    word_regex: Regex,
    words: HashMap<String, Attr>,
    resolver: Option<WordResolver>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            word_regex: DEFAULT_WORD_REGEX.clone(),
            words: HashMap::new(),
            resolver: None,
        }
    }
}

impl std::fmt::Debug for KeywordTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordTable")
            .field("word_regex", &self.word_regex.as_str())
            .field("words", &self.words.len())
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a custom word regex.
    pub fn with_pattern(expr: &str) -> Result<Self, SyntaxError> {
        Ok(Self {
            word_regex: compile(expr)?,
            ..Self::default()
        })
    }

    pub fn insert(&mut self, word: impl Into<String>, attr: Attr) -> Option<Attr> {
        self.words.insert(word.into(), attr)
    }

    pub fn set_resolver<F>(&mut self, resolver: F)
    where
        F: Fn(&str) -> Option<Attr> + 'static,
    {
        self.resolver = Some(Box::new(resolver));
    }

    pub fn word_regex(&self) -> &Regex {
        &self.word_regex
    }

    /// Attribute for `word`: the map first, then the resolver, else `None`.
    pub fn resolve(&self, word: &str) -> Option<Attr> {
        if let Some(attr) = self.words.get(word) {
            return Some(*attr);
        }
        self.resolver.as_ref().and_then(|r| r(word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.resolver.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_wins_over_resolver() {
        let mut table = KeywordTable::new();
        table.insert("if", Attr(1));
        table.set_resolver(|w| w.starts_with('i').then_some(Attr(9)));
        assert_eq!(table.resolve("if"), Some(Attr(1)));
        assert_eq!(table.resolve("int"), Some(Attr(9)));
        assert_eq!(table.resolve("x"), None);
    }

    #[test]
    fn default_word_regex_splits_on_boundaries() {
        let table = KeywordTable::new();
        let words: Vec<&str> = table
            .word_regex()
            .find_iter("if(x_1) else")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(words, vec!["if", "x_1", "else"]);
    }

    #[test]
    fn custom_pattern_rejects_bad_regex() {
        assert!(KeywordTable::with_pattern("[a-").is_err());
        assert!(KeywordTable::with_pattern("[A-Z]+").is_ok());
    }
}
