#![forbid(unsafe_code)]

//! Generic record access by dotted field path.
//!
//! The engine never interprets what a record *is*; it only asks for the value
//! behind a [`FieldPath`]. Anything that implements [`Record`] can be ranked.
//!
//! # Example
//!
//! ```
//! use shelf_core::record::{Document, FieldPath, Record};
//!
//! let book = Document::new()
//!     .with("title", "Dune")
//!     .with("author", Document::new().with("name", "Frank Herbert"));
//!
//! let name = book.field(&FieldPath::parse("author.name")).unwrap();
//! assert_eq!(name.as_text(), "Frank Herbert");
//! assert!(book.field(&FieldPath::parse("author.born")).is_none());
//! ```

use std::borrow::Cow;
use std::fmt;

/// A scalar value extracted from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
}

impl FieldValue<'_> {
    /// Text form used for similarity scoring.
    ///
    /// Integral numbers render without a fractional part, so `1965.0` reads as
    /// `"1965"`.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_ref()),
            Self::Number(n) => Cow::Owned(format_number(*n)),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// A parsed dotted path such as `author.name`.
///
/// Parsing never fails. A path with an empty segment (`""`, `"a..b"`,
/// `".a"`, `"a."`) is malformed and resolves to no value on every record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
        let segments = if segments.iter().any(String::is_empty) {
            Vec::new()
        } else {
            segments
        };
        Self {
            raw: raw.to_owned(),
            segments,
        }
    }

    /// The path exactly as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Path segments in lookup order; empty for malformed paths.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path can never resolve.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A caller-defined record the engine can extract fields from.
pub trait Record {
    /// Resolve `path`, or `None` when any segment is missing, the path is
    /// malformed, or the target is not a scalar.
    fn field(&self, path: &FieldPath) -> Option<FieldValue<'_>>;
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, path: &FieldPath) -> Option<FieldValue<'_>> {
        (**self).field(path)
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn field(&self, path: &FieldPath) -> Option<FieldValue<'_>> {
        (**self).field(path)
    }
}

/// A value stored in a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Nested(Document),
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Self::Nested(doc)
    }
}

/// An ordered name → value map usable as a [`Record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a top-level entry, keeping first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a top-level entry.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Record for Document {
    fn field(&self, path: &FieldPath) -> Option<FieldValue<'_>> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.get(first)?;
        for segment in rest {
            match current {
                Value::Nested(doc) => current = doc.get(segment)?,
                _ => return None,
            }
        }
        match current {
            Value::Text(text) => Some(FieldValue::Text(Cow::Borrowed(text))),
            Value::Number(n) => Some(FieldValue::Number(*n)),
            Value::Nested(_) => None,
        }
    }
}

#[cfg(feature = "json")]
impl Record for serde_json::Value {
    fn field(&self, path: &FieldPath) -> Option<FieldValue<'_>> {
        use serde_json::Value as Json;

        if path.is_malformed() {
            return None;
        }
        let mut current = self;
        for segment in path.segments() {
            current = match current {
                Json::Object(map) => map.get(segment)?,
                Json::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        match current {
            Json::String(text) => Some(FieldValue::Text(Cow::Borrowed(text))),
            Json::Number(n) => n.as_f64().map(FieldValue::Number),
            _ => None,
        }
    }
}
