//! Document model for promptml.
//!
//! A [`Document`] is the structured form of a prompt template file:
//!
//! - `metadata`: ordered key/value pairs; "title" is the one required key
//! - `variables`: declared placeholders, each required or carrying a default
//! - `parts`: named blocks of reusable content selected by conditionals
//! - `template`: the raw template body with `{{variable}}` tokens and
//!   `<if .../>` directives
//!
//! Documents are plain data. Validation and rendering never mutate them, so
//! a single instance is safe for unlimited concurrent read-only use.

use serde::Serialize;
use serde::ser::SerializeMap;

/// Metadata key that every valid document must carry.
pub const TITLE_KEY: &str = "title";

/// Ordered string-to-string metadata for a document.
///
/// Keys keep their document order. Inserting an existing key replaces its
/// value in place rather than appending a duplicate entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Create an empty metadata map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, replacing the value if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The document title, if present.
    pub fn title(&self) -> Option<&str> {
        self.get(TITLE_KEY)
    }

    /// Iterate entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}

// Serialized as a JSON map so `show --json` output reads naturally.
impl Serialize for Metadata {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A declared template variable.
///
/// A required variable must be supplied at render time and carries no
/// default; a non-required variable must carry a default that applies when
/// no value is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Variable name, unique within a document.
    pub name: String,
    /// Whether a value must be supplied at render time.
    pub required: bool,
    /// Fallback value for non-required variables.
    pub default: Option<String>,
}

impl Variable {
    /// Declare a required variable.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
        }
    }

    /// Declare an optional variable with a default value.
    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: Some(default.into()),
        }
    }
}

/// A named block of reusable content.
///
/// Parts are pure data: they are referenced by name from conditional
/// directives in the template and are never nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    /// Part name, unique within a document.
    pub name: String,
    /// Literal content, may be empty.
    pub content: String,
}

impl Part {
    /// Create a part.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// The structured in-memory prompt document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Ordered metadata; must include a non-empty title to validate.
    pub metadata: Metadata,
    /// Declared variables in declaration order, unique by name.
    pub variables: Vec<Variable>,
    /// Reusable parts in document order, unique by name.
    pub parts: Vec<Part>,
    /// Raw template body.
    pub template: String,
}

impl Document {
    /// Look up a declared variable by name (first match wins).
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Look up a part by name (first match wins).
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }
}
