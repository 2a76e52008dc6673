//! Configuration loading and parsing.
//!
//! Parses `hilite.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! tab_size = 8        # clamped to 1..=64
//! preread_lines = 60  # lines composed above the viewport for block matching
//! optimize = true     # skip repaint of rows unchanged since the last frame
//!
//! [colors]            # merged over the built-in palette
//! comment = 4
//!
//! [words]             # replaces the built-in keyword table when present
//! pattern = '\b\w+\b'
//! [words.colors]
//! fn = "keyword"
//!
//! [[syntax]]          # replaces the built-in definitions when present
//! name = "c"
//! extensions = ["c", "h"]
//! [[syntax.rules]]
//! color = "comment"
//! start = '/\*'
//! end = '\*/'
//! ```
//!
//! Unknown fields are ignored. A file that fails to parse falls back to
//! defaults (logged at warn) so a typo never prevents the editor from drawing.
//! Regex errors, on the other hand, are reported when highlighting is built.

use anyhow::{Context, Result, bail};
use core_syntax::{Attr, ColorTable, KeywordTable, Pattern, SyntaxDefinition, builtin};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::{fs, path::PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_TAB_SIZE: usize = 8;
pub const MAX_TAB_SIZE: usize = 64;
pub const DEFAULT_PREREAD_LINES: usize = 60;

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_size")]
    pub tab_size: usize,
    #[serde(default = "EditorConfig::default_preread_lines")]
    pub preread_lines: usize,
    #[serde(default = "EditorConfig::default_optimize")]
    pub optimize: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: Self::default_tab_size(),
            preread_lines: Self::default_preread_lines(),
            optimize: Self::default_optimize(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_size() -> usize {
        DEFAULT_TAB_SIZE
    }
    const fn default_preread_lines() -> usize {
        DEFAULT_PREREAD_LINES
    }
    const fn default_optimize() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WordsConfig {
    pub pattern: Option<String>,
    /// word -> style name
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RuleConfig {
    pub color: String,
    pub pattern: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyntaxConfig {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub colors: BTreeMap<String, Attr>,
    pub words: Option<WordsConfig>,
    #[serde(default)]
    pub syntax: Vec<SyntaxConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Effective editor settings after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    pub tab_size: usize,
    pub preread_lines: usize,
    pub optimize: bool,
}

/// Everything the renderer needs to color a document.
#[derive(Debug)]
pub struct Highlighting {
    pub colors: ColorTable,
    pub keywords: KeywordTable,
    pub syntaxes: Vec<Arc<SyntaxDefinition>>,
}

impl Highlighting {
    /// Definition whose extension list matches `path`, if any.
    pub fn syntax_for_path(&self, path: &Path) -> Option<Arc<SyntaxDefinition>> {
        let ext = path.extension()?.to_str()?;
        self.syntaxes
            .iter()
            .find(|s| s.matches_extension(ext))
            .cloned()
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("hilite.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("hilite").join("hilite.toml");
    }
    PathBuf::from("hilite.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    Ok(parse_str(&content).unwrap_or_else(|e| {
        warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
        Config::default()
    }))
}

/// Parse configuration text; errors are returned rather than defaulted.
pub fn parse_str(content: &str) -> Result<Config> {
    let file = toml::from_str::<ConfigFile>(content).context("parsing configuration")?;
    Ok(Config {
        raw: Some(content.to_string()),
        file,
    })
}

impl Config {
    /// Clamp raw editor values into their valid ranges.
    pub fn editor_settings(&self) -> EditorSettings {
        let raw = self.file.editor.tab_size;
        let tab_size = raw.clamp(1, MAX_TAB_SIZE);
        if tab_size != raw {
            info!(
                target: "config",
                raw,
                clamped = tab_size,
                max = MAX_TAB_SIZE,
                "tab_size_clamped"
            );
        }
        EditorSettings {
            tab_size,
            preread_lines: self.file.editor.preread_lines,
            optimize: self.file.editor.optimize,
        }
    }

    /// Built-in palette with configured entries layered on top.
    pub fn color_table(&self) -> ColorTable {
        let mut colors = builtin::default_palette();
        colors.extend(self.file.colors.iter().map(|(k, v)| (k.clone(), *v)));
        colors
    }

    pub fn keyword_table(&self, colors: &ColorTable) -> Result<KeywordTable> {
        let Some(words) = self.file.words.as_ref() else {
            return Ok(builtin::c_keywords(colors));
        };
        let mut table = match words.pattern.as_deref() {
            Some(expr) => KeywordTable::with_pattern(expr)?,
            None => KeywordTable::new(),
        };
        for (word, color) in &words.colors {
            match colors.get(color) {
                Some(attr) => {
                    table.insert(word.clone(), attr);
                }
                None => {
                    warn!(
                        target: "config",
                        word = word.as_str(),
                        color = color.as_str(),
                        "keyword_color_unknown"
                    );
                }
            }
        }
        Ok(table)
    }

    pub fn syntax_definitions(&self, colors: &ColorTable) -> Result<Vec<Arc<SyntaxDefinition>>> {
        if self.file.syntax.is_empty() {
            return Ok(vec![Arc::new(builtin::c_syntax(colors)?)]);
        }
        self.file
            .syntax
            .iter()
            .map(|s| build_syntax(s, colors).map(Arc::new))
            .collect()
    }

    pub fn highlighting(&self) -> Result<Highlighting> {
        let colors = self.color_table();
        let keywords = self.keyword_table(&colors)?;
        let syntaxes = self.syntax_definitions(&colors)?;
        Ok(Highlighting {
            colors,
            keywords,
            syntaxes,
        })
    }
}

fn build_syntax(cfg: &SyntaxConfig, colors: &ColorTable) -> Result<SyntaxDefinition> {
    let mut def = SyntaxDefinition::new(cfg.name.clone()).with_extensions(cfg.extensions.clone());
    for rule in &cfg.rules {
        let pattern = match (&rule.pattern, &rule.start, &rule.end) {
            (Some(p), None, None) => Pattern::single(p)?,
            (None, Some(s), Some(e)) => Pattern::block(s, e)?,
            _ => bail!(
                "syntax `{}`: rule for `{}` needs either `pattern` or both `start` and `end`",
                cfg.name,
                rule.color
            ),
        };
        def.push_named(colors, &rule.color, pattern);
    }
    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        let settings = cfg.editor_settings();
        assert_eq!(settings.tab_size, DEFAULT_TAB_SIZE);
        assert_eq!(settings.preread_lines, DEFAULT_PREREAD_LINES);
        assert!(settings.optimize);
    }

    #[test]
    fn parses_editor_section() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[editor]\ntab_size = 4\npreread_lines = 10\noptimize = false\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let settings = cfg.editor_settings();
        assert_eq!(settings.tab_size, 4);
        assert_eq!(settings.preread_lines, 10);
        assert!(!settings.optimize);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor\ntab_size = ").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.editor_settings().tab_size, DEFAULT_TAB_SIZE);
        assert!(parse_str("[editor\n").is_err());
    }

    #[test]
    fn colors_merge_over_builtin_palette() {
        let cfg = parse_str("[colors]\nnormal = 10\nheading = 42\n").unwrap();
        let colors = cfg.color_table();
        assert_eq!(colors.normal(), Attr(10));
        assert_eq!(colors.get("heading"), Some(Attr(42)));
        assert_eq!(colors.cursor(), Attr(1));
    }

    #[test]
    fn custom_words_resolve_through_colors() {
        let cfg = parse_str(
            "[words]\npattern = '[a-z]+'\n[words.colors]\nfn = \"keyword\"\nlet = \"nope\"\n",
        )
        .unwrap();
        let colors = cfg.color_table();
        let table = cfg.keyword_table(&colors).unwrap();
        assert_eq!(table.resolve("fn"), Some(Attr(6)));
        assert_eq!(table.resolve("let"), None);
        assert_eq!(table.word_regex().as_str(), "[a-z]+");
    }

    #[test]
    fn syntax_rules_build_in_order() {
        let cfg = parse_str(
            r#"
[[syntax]]
name = "shell"
extensions = ["sh"]
[[syntax.rules]]
color = "comment"
pattern = '#[^\n]*'
[[syntax.rules]]
color = "string"
start = '"'
end = '"'
"#,
        )
        .unwrap();
        let hl = cfg.highlighting().unwrap();
        assert_eq!(hl.syntaxes.len(), 1);
        let def = &hl.syntaxes[0];
        assert_eq!(def.name, "shell");
        assert_eq!(def.rules().len(), 2);
        assert!(!def.rules()[0].pattern.is_block());
        assert!(def.rules()[1].pattern.is_block());
        assert!(hl.syntax_for_path(Path::new("run.sh")).is_some());
        assert!(hl.syntax_for_path(Path::new("main.c")).is_none());
    }

    #[test]
    fn incomplete_rule_is_an_error() {
        let cfg = parse_str(
            "[[syntax]]\nname = \"x\"\n[[syntax.rules]]\ncolor = \"comment\"\nstart = 'a'\n",
        )
        .unwrap();
        let err = cfg.highlighting().unwrap_err();
        assert!(err.to_string().contains("needs either"));
    }

    #[test]
    fn builtin_syntax_when_none_configured() {
        let cfg = Config::default();
        let hl = cfg.highlighting().unwrap();
        assert_eq!(hl.syntaxes.len(), 1);
        assert!(hl.syntax_for_path(Path::new("lib.h")).is_some());
        assert!(!hl.keywords.is_empty());
    }

    #[test]
    fn tab_clamp_logging_uses_config_target() {
        let cfg = parse_str("[editor]\ntab_size = 0\n").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let settings = with_default(subscriber, || cfg.editor_settings());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("tab_size_clamped"));
        assert_eq!(settings.tab_size, 1);
    }
}
