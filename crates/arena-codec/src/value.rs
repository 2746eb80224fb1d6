//! Typed value tree

use crate::{CodecError, CodecResult, Decode};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A canonical value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Binary(Vec<u8>),
    Text(String),
    List(Vec<Value>),
    Dictionary(Dictionary),
}

impl Value {
    /// Name of the variant, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Binary(_) => "binary",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Dictionary(_) => "dictionary",
        }
    }

    pub fn as_dictionary(&self) -> CodecResult<&Dictionary> {
        match self {
            Self::Dictionary(dict) => Ok(dict),
            other => Err(mismatch("dictionary", other)),
        }
    }

    pub fn as_binary(&self) -> CodecResult<&[u8]> {
        match self {
            Self::Binary(bytes) => Ok(bytes),
            other => Err(mismatch("binary", other)),
        }
    }

    pub fn as_text(&self) -> CodecResult<&str> {
        match self {
            Self::Text(text) => Ok(text),
            other => Err(mismatch("text", other)),
        }
    }

    pub fn as_integer(&self) -> CodecResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => Err(mismatch("integer", other)),
        }
    }

    pub fn as_boolean(&self) -> CodecResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            other => Err(mismatch("boolean", other)),
        }
    }
}

pub(crate) fn mismatch(expected: &'static str, found: &Value) -> CodecError {
    CodecError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Self::Dictionary(dict)
    }
}

/// A dictionary key.
///
/// Variant order matters: the derived `Ord` puts every binary key before
/// every text key and compares within a variant by raw bytes, which is the
/// canonical key order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Binary(Vec<u8>),
    Text(String),
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Key {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Self::Binary(bytes.to_vec())
    }
}

/// An ordered key-value map
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dictionary(BTreeMap<Key, Value>);

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a text key
    pub fn get_text_key(&self, key: &str) -> Option<&Value> {
        self.0.get(&Key::Text(key.to_string()))
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in canonical key order
    pub fn iter(&self) -> btree_map::Iter<'_, Key, Value> {
        self.0.iter()
    }

    /// Merge `other` into this dictionary. Keys already present keep their value.
    pub fn union(mut self, other: Dictionary) -> Self {
        for (key, value) in other.0 {
            self.0.entry(key).or_insert(value);
        }
        self
    }

    /// Decode a required text-keyed field
    pub fn get_as<T: Decode>(&self, key: &str) -> CodecResult<T> {
        let value = self
            .get_text_key(key)
            .ok_or_else(|| CodecError::MissingKey(key.to_string()))?;
        T::from_value(value).map_err(|e| e.in_field(key))
    }

    /// Decode an optional text-keyed field
    pub fn get_optional<T: Decode>(&self, key: &str) -> CodecResult<Option<T>> {
        match self.get_text_key(key) {
            Some(value) => T::from_value(value).map(Some).map_err(|e| e.in_field(key)),
            None => Ok(None),
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Key, &'a Value);
    type IntoIter = btree_map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Key, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
