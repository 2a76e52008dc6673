use serde::Deserialize;
use std::collections::HashMap;

/// Style name painted under every character before any overlay.
pub const NORMAL: &str = "normal";
/// Style name of the single cell under the cursor.
pub const CURSOR: &str = "cursor";
/// Style name of the selected region.
pub const SELECTION: &str = "selection";
/// Style name of the bracket matching the one under the cursor.
pub const MATCHING: &str = "matching";

/// Opaque attribute code resolved through the display driver's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Attr(pub u16);

impl From<u16> for Attr {
    fn from(v: u16) -> Self {
        Attr(v)
    }
}

/// Style name -> attribute code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: HashMap<String, Attr>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, attr: Attr) -> Option<Attr> {
        self.entries.insert(name.into(), attr)
    }

    pub fn get(&self, name: &str) -> Option<Attr> {
        self.entries.get(name).copied()
    }

    /// Lookup falling back to `Attr::default()` for unknown names.
    pub fn attr_or_default(&self, name: &str) -> Attr {
        self.get(name).unwrap_or_default()
    }

    pub fn normal(&self) -> Attr {
        self.attr_or_default(NORMAL)
    }

    pub fn cursor(&self) -> Attr {
        self.attr_or_default(CURSOR)
    }

    pub fn selection(&self) -> Option<Attr> {
        self.get(SELECTION)
    }

    pub fn matching(&self) -> Option<Attr> {
        self.get(MATCHING)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Attr)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, Attr)> for ColorTable {
    fn from_iter<T: IntoIterator<Item = (S, Attr)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<S: Into<String>> Extend<(S, Attr)> for ColorTable {
    fn extend<T: IntoIterator<Item = (S, Attr)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.entries.insert(k.into(), v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_names_fall_back() {
        let table = ColorTable::new();
        assert_eq!(table.normal(), Attr(0));
        assert_eq!(table.cursor(), Attr(0));
        assert_eq!(table.selection(), None);
        assert_eq!(table.matching(), None);
    }

    #[test]
    fn collects_from_pairs() {
        let table: ColorTable = [("normal", Attr(3)), ("cursor", Attr(9))]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.normal(), Attr(3));
        assert_eq!(table.cursor(), Attr(9));
        assert_eq!(table.get("comment"), None);
    }
}
