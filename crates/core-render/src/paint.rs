//! Attribute buffer and the highlighting passes that fill it.
//!
//! One attribute per joined-buffer character plus a trailing slot for the
//! terminator. Passes run in a fixed order and later passes overwrite earlier
//! ones: keywords, syntax rules, selection, matching bracket, cursor.
//! A pass given `None` for its attribute skips painting but still advances.

use crate::bracket::matching_bracket;
use crate::compose::JoinedBuffer;
use crate::error::{Result, reserve};
use core_syntax::{Attr, KeywordTable, Pattern, SyntaxDefinition, SyntaxRule};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBuffer {
    attrs: Vec<Attr>,
}

impl AttributeBuffer {
    /// `len` slots all holding `base`.
    pub fn filled(len: usize, base: Attr) -> Result<Self> {
        let mut attrs = Vec::new();
        reserve(&mut attrs, len, "attribute buffer")?;
        attrs.resize(len, base);
        Ok(Self { attrs })
    }

    /// Sized for `buffer` including the terminator slot.
    pub fn for_buffer(buffer: &JoinedBuffer, base: Attr) -> Result<Self> {
        Self::filled(buffer.len() + 1, base)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn get(&self, offset: usize) -> Option<Attr> {
        self.attrs.get(offset).copied()
    }

    pub fn as_slice(&self) -> &[Attr] {
        &self.attrs
    }

    /// Paint `[offset, offset + len)`, clamped to the buffer. Returns the
    /// offset just past the requested span.
    pub fn fill(&mut self, attr: Option<Attr>, offset: usize, len: usize) -> usize {
        let end = offset.saturating_add(len);
        if let Some(attr) = attr {
            let from = offset.min(self.attrs.len());
            let to = end.min(self.attrs.len());
            self.attrs[from..to].fill(attr);
        }
        end
    }
}

/// Whole-word pass. Scans from `from` (the first visible offset); words with
/// no resolved attribute are left untouched. Returns the number of words
/// examined.
pub fn paint_keywords(
    buffer: &JoinedBuffer,
    attrs: &mut AttributeBuffer,
    keywords: &KeywordTable,
    from: usize,
) -> usize {
    let regex = keywords.word_regex();
    let mut offset = from;
    let mut words = 0;
    while let Some(m) = buffer.find(regex, offset) {
        attrs.fill(keywords.resolve(buffer.slice(m)), m.offset, m.len);
        offset = m.resume_at();
        words += 1;
    }
    words
}

/// Apply every rule of `syntax` in order over the whole buffer, preread
/// rows included.
pub fn paint_syntax(buffer: &JoinedBuffer, attrs: &mut AttributeBuffer, syntax: &SyntaxDefinition) {
    for rule in syntax.rules() {
        paint_rule(buffer, attrs, rule);
    }
}

pub fn paint_rule(buffer: &JoinedBuffer, attrs: &mut AttributeBuffer, rule: &SyntaxRule) {
    match &rule.pattern {
        Pattern::Single(regex) => {
            let mut offset = 0;
            while let Some(m) = buffer.find(regex, offset) {
                attrs.fill(rule.attr, m.offset, m.len);
                offset = m.resume_at();
            }
        }
        Pattern::Block { start, end } => {
            let mut offset = 0;
            while let Some(open) = buffer.find(start, offset) {
                offset = attrs.fill(rule.attr, open.offset, open.len);
                match buffer.find(end, offset) {
                    Some(close) => {
                        let until = attrs.fill(rule.attr, offset, close.end() - offset);
                        offset = until.max(open.offset + 1);
                    }
                    None => {
                        attrs.fill(rule.attr, offset, buffer.len().saturating_sub(offset));
                        break;
                    }
                }
            }
        }
    }
}

/// Cursor-bracket pass. Paints the partner bracket, when one is found, and
/// returns its offset.
pub fn paint_matching_bracket(
    buffer: &JoinedBuffer,
    attrs: &mut AttributeBuffer,
    attr: Option<Attr>,
    cursor: usize,
    visible: usize,
) -> Option<usize> {
    let found = matching_bracket(buffer, cursor, visible)?;
    trace!(target: "render.paint", cursor, found, "matching_bracket");
    attrs.fill(attr, found, 1);
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Buffer;
    use pretty_assertions::assert_eq;

    const N: Attr = Attr(0);
    const C: Attr = Attr(4);

    fn joined(text: &str) -> JoinedBuffer {
        let buffer = Buffer::from_str("t", text).unwrap();
        JoinedBuffer::compose(&buffer, 0, buffer.line_count()).unwrap()
    }

    fn attrs_for(buf: &JoinedBuffer) -> AttributeBuffer {
        AttributeBuffer::for_buffer(buf, N).unwrap()
    }

    fn codes(attrs: &AttributeBuffer) -> Vec<u16> {
        attrs.as_slice().iter().map(|a| a.0).collect()
    }

    #[test]
    fn fill_clamps_and_reports_end() {
        let mut attrs = AttributeBuffer::filled(4, N).unwrap();
        assert_eq!(attrs.fill(Some(C), 2, 10), 12);
        assert_eq!(codes(&attrs), vec![0, 0, 4, 4]);
        assert_eq!(attrs.fill(None, 0, 2), 2);
        assert_eq!(codes(&attrs), vec![0, 0, 4, 4]);
    }

    #[test]
    fn keyword_pass_paints_known_words_only() {
        let buf = joined("if(x)");
        let mut attrs = attrs_for(&buf);
        let mut table = KeywordTable::new();
        table.insert("if", Attr(6));
        assert_eq!(paint_keywords(&buf, &mut attrs, &table, 0), 2);
        assert_eq!(codes(&attrs), vec![6, 6, 0, 0, 0, 0]);
    }

    #[test]
    fn keyword_pass_falls_back_to_resolver() {
        let buf = joined("if(xy)");
        let mut attrs = attrs_for(&buf);
        let mut table = KeywordTable::new();
        table.insert("if", Attr(6));
        table.set_resolver(|w| (w == "xy").then_some(Attr(7)));
        assert_eq!(paint_keywords(&buf, &mut attrs, &table, 0), 2);
        assert_eq!(codes(&attrs), vec![6, 6, 0, 7, 7, 0, 0]);
    }

    #[test]
    fn keyword_pass_starts_at_visible_offset() {
        let buf = joined("if\nif");
        let mut attrs = attrs_for(&buf);
        let mut table = KeywordTable::new();
        table.insert("if", Attr(6));
        paint_keywords(&buf, &mut attrs, &table, 3);
        assert_eq!(codes(&attrs), vec![0, 0, 0, 6, 6, 0]);
    }

    #[test]
    fn block_rule_spans_rows() {
        let buf = joined("a /* b\nc */ d");
        let mut attrs = attrs_for(&buf);
        let rule = SyntaxRule {
            attr: Some(C),
            pattern: Pattern::block(r"/\*", r"\*/").unwrap(),
        };
        paint_rule(&buf, &mut attrs, &rule);
        assert_eq!(
            codes(&attrs),
            vec![0, 0, 4, 4, 4, 4, 4, 4, 4, 4, 4, 0, 0, 0]
        );
    }

    #[test]
    fn unterminated_block_runs_to_end_but_not_terminator() {
        let buf = joined("x /* y");
        let mut attrs = attrs_for(&buf);
        let rule = SyntaxRule {
            attr: Some(C),
            pattern: Pattern::block(r"/\*", r"\*/").unwrap(),
        };
        paint_rule(&buf, &mut attrs, &rule);
        assert_eq!(codes(&attrs), vec![0, 0, 4, 4, 4, 4, 0]);
    }

    #[test]
    fn later_rules_overwrite_earlier_ones() {
        let buf = joined(r#"s = "a // b";"#);
        let mut attrs = attrs_for(&buf);
        let mut def = SyntaxDefinition::new("c");
        def.push(Some(Attr(4)), Pattern::single(r"//[^\n]*").unwrap());
        def.push(Some(Attr(5)), Pattern::single(r#""[^"]*""#).unwrap());
        paint_syntax(&buf, &mut attrs, &def);
        let got = codes(&attrs);
        assert!(got[4..12].iter().all(|&c| c == 5));
        assert_eq!(got[12], 4);
        assert_eq!(got[3], 0);
    }

    #[test]
    fn unresolved_rule_paints_nothing() {
        let buf = joined("abc");
        let mut attrs = attrs_for(&buf);
        let rule = SyntaxRule {
            attr: None,
            pattern: Pattern::single("b").unwrap(),
        };
        paint_rule(&buf, &mut attrs, &rule);
        assert_eq!(codes(&attrs), vec![0, 0, 0, 0]);
    }

    #[test]
    fn empty_matches_do_not_stall() {
        let buf = joined("aaa");
        let mut attrs = attrs_for(&buf);
        let rule = SyntaxRule {
            attr: Some(C),
            pattern: Pattern::single("b*").unwrap(),
        };
        paint_rule(&buf, &mut attrs, &rule);
        assert_eq!(codes(&attrs), vec![0, 0, 0, 0]);
    }

    #[test]
    fn bracket_pass_paints_partner() {
        let buf = joined("a(b(c)d)e");
        let mut attrs = attrs_for(&buf);
        assert_eq!(paint_matching_bracket(&buf, &mut attrs, Some(Attr(3)), 1, 0), Some(7));
        assert_eq!(attrs.get(7), Some(Attr(3)));
        assert_eq!(attrs.get(1), Some(N));
    }
}
