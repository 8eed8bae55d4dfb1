//! Localized string tables
//!
//! A string table maps opaque string keys to per-language text. All
//! user-facing labels in component metadata (`textKey`,
//! `descriptionTextKey`, option labels, default text) resolve through one
//! of these tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mapping from string key to per-language localized text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringTable(HashMap<String, HashMap<String, String>>);

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a key in a specific language.
    ///
    /// There is no fallback chain across languages: a key present only
    /// under another language still resolves to `None`, and the caller
    /// decides whether that is fatal.
    pub fn resolve(&self, key: &str, language: &str) -> Option<&str> {
        self.0.get(key)?.get(language).map(String::as_str)
    }

    /// Whether the key exists in the table under any language.
    ///
    /// Schema cross-checks only require key presence; they do not pick a
    /// language.
    pub fn has_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<HashMap<String, HashMap<String, String>>> for StringTable {
    fn from(inner: HashMap<String, HashMap<String, String>>) -> Self {
        Self(inner)
    }
}
