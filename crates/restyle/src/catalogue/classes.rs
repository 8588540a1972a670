//! Ordered, de-duplicated CSS class token lists.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered set of CSS class tokens.
///
/// Class lists are written the way they appear in a `class` attribute: a
/// single whitespace-separated string. Internally the tokens are kept in
/// first-seen order with duplicates and empty tokens removed, so two strings
/// that differ only in spacing or repetition produce equal lists.
///
/// # Example
///
/// ```rust
/// use restyle::ClassList;
///
/// let classes = ClassList::parse("  alert   alert-warn alert ");
/// assert_eq!(classes.len(), 2);
/// assert_eq!(classes.to_string(), "alert alert-warn");
/// assert!(classes.contains("alert-warn"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Creates an empty class list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whitespace-separated class string.
    pub fn parse(raw: &str) -> Self {
        raw.split_whitespace().collect()
    }

    /// Returns `true` if the list holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Iterates over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns `true` if `token` is in the list.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Returns `true` if every token of `other` is in this list.
    ///
    /// An empty `other` is never contained, so an inert style cannot match
    /// arbitrary elements.
    pub fn contains_all(&self, other: &ClassList) -> bool {
        !other.is_empty() && other.iter().all(|t| self.contains(t))
    }

    /// Adds a token, returning `false` if it was already present or blank.
    pub fn insert(&mut self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() || token.split_whitespace().count() != 1 || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Removes a token, returning `true` if it was present.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Adds every token of `other` not already present.
    pub fn union_with(&mut self, other: &ClassList) {
        for token in other.iter() {
            self.insert(token);
        }
    }

    /// Joins the tokens with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.tokens.join(separator)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(" "))
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = ClassList::new();
        for token in iter {
            for part in token.as_ref().split_whitespace() {
                list.insert(part);
            }
        }
        list
    }
}

impl From<&str> for ClassList {
    fn from(raw: &str) -> Self {
        ClassList::parse(raw)
    }
}

impl From<String> for ClassList {
    fn from(raw: String) -> Self {
        ClassList::parse(&raw)
    }
}

impl<'a> IntoIterator for &'a ClassList {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens
            .iter()
            .map(String::as_str as fn(&'a String) -> &'a str)
    }
}

impl Serialize for ClassList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClassList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ClassList::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dedups_and_keeps_order() {
        let list = ClassList::parse("b a b  c a");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_blank() {
        assert!(ClassList::parse("").is_empty());
        assert!(ClassList::parse(" \t\n ").is_empty());
    }

    #[test]
    fn test_insert_rejects_blank_and_compound() {
        let mut list = ClassList::new();
        assert!(list.insert("a"));
        assert!(!list.insert("a"));
        assert!(!list.insert("  "));
        assert!(!list.insert("b c"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut list = ClassList::parse("a b");
        assert!(list.remove("a"));
        assert!(!list.remove("a"));
        assert_eq!(list.to_string(), "b");
    }

    #[test]
    fn test_contains_all() {
        let element = ClassList::parse("alert alert-warn big");
        assert!(element.contains_all(&ClassList::parse("alert-warn alert")));
        assert!(!element.contains_all(&ClassList::parse("alert note")));
        assert!(!element.contains_all(&ClassList::new()));
    }

    #[test]
    fn test_union_with() {
        let mut list = ClassList::parse("a b");
        list.union_with(&ClassList::parse("b c"));
        assert_eq!(list.to_string(), "a b c");
    }

    #[test]
    fn test_serde_as_string() {
        let list = ClassList::parse("x  y");
        assert_eq!(serde_json::to_string(&list).unwrap(), "\"x y\"");
        let back: ClassList = serde_json::from_str("\" y x y \"").unwrap();
        assert_eq!(back.to_string(), "y x");
    }
}
