use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Normalized, language-neutral value tree used for cross-client comparison.
///
/// Maps keep insertion order (the source record's field order). Ordering is
/// only discarded when rendering through [`SortedView`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CanonicalValue {
    /// Absent value.
    #[default]
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Numeric leaf; integers and floats stay distinct (`150` vs `150.0`).
    Number(Number),
    /// String leaf (also used for temporal values).
    String(String),
    /// Ordered mapping with string keys.
    Map(CanonicalMap),
    /// Ordered sequence.
    Sequence(Vec<CanonicalValue>),
}

impl CanonicalValue {
    /// Builds a float leaf. Non-finite input has no JSON form and becomes `Null`.
    pub fn from_f64(value: f64) -> Self {
        Number::from_f64(value)
            .map(CanonicalValue::Number)
            .unwrap_or(CanonicalValue::Null)
    }

    /// Converts an arbitrary JSON value, keeping its object member order.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CanonicalValue::Null,
            Value::Bool(b) => CanonicalValue::Bool(*b),
            Value::Number(n) => CanonicalValue::Number(n.clone()),
            Value::String(s) => CanonicalValue::String(s.clone()),
            Value::Array(items) => {
                CanonicalValue::Sequence(items.iter().map(CanonicalValue::from_json).collect())
            }
            Value::Object(map) => CanonicalValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), CanonicalValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalValue::Null)
    }

    /// Returns the string leaf, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CanonicalValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the map, if any.
    pub fn as_map(&self) -> Option<&CanonicalMap> {
        match self {
            CanonicalValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the sequence, if any.
    pub fn as_sequence(&self) -> Option<&[CanonicalValue]> {
        match self {
            CanonicalValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&CanonicalValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Returns a view that serializes with object keys sorted at every level.
    pub fn sorted(&self) -> SortedView<'_> {
        SortedView(self)
    }

    /// Renders key-sorted JSON with 2-space indentation.
    pub fn to_pretty_sorted_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.sorted())
    }
}

impl From<bool> for CanonicalValue {
    fn from(value: bool) -> Self {
        CanonicalValue::Bool(value)
    }
}

impl From<i64> for CanonicalValue {
    fn from(value: i64) -> Self {
        CanonicalValue::Number(value.into())
    }
}

impl From<u64> for CanonicalValue {
    fn from(value: u64) -> Self {
        CanonicalValue::Number(value.into())
    }
}

impl From<usize> for CanonicalValue {
    fn from(value: usize) -> Self {
        CanonicalValue::Number((value as u64).into())
    }
}

impl From<&str> for CanonicalValue {
    fn from(value: &str) -> Self {
        CanonicalValue::String(value.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(value: String) -> Self {
        CanonicalValue::String(value)
    }
}

impl From<CanonicalMap> for CanonicalValue {
    fn from(value: CanonicalMap) -> Self {
        CanonicalValue::Map(value)
    }
}

impl From<Vec<CanonicalValue>> for CanonicalValue {
    fn from(value: Vec<CanonicalValue>) -> Self {
        CanonicalValue::Sequence(value)
    }
}

impl<T: Into<CanonicalValue>> From<Option<T>> for CanonicalValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CanonicalValue::Null)
    }
}

/// Insertion-ordered string-keyed map.
///
/// Re-inserting an existing key replaces its value without moving it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonicalMap {
    entries: Vec<(String, CanonicalValue)>,
}

impl CanonicalMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<CanonicalValue>,
    ) -> Option<CanonicalValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&CanonicalValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, CanonicalValue)> for CanonicalMap {
    fn from_iter<I: IntoIterator<Item = (String, CanonicalValue)>>(iter: I) -> Self {
        let mut map = CanonicalMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for CanonicalMap {
    type Item = (String, CanonicalValue);
    type IntoIter = std::vec::IntoIter<(String, CanonicalValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CanonicalValue::Null => serializer.serialize_unit(),
            CanonicalValue::Bool(b) => serializer.serialize_bool(*b),
            CanonicalValue::Number(n) => n.serialize(serializer),
            CanonicalValue::String(s) => serializer.serialize_str(s),
            CanonicalValue::Map(map) => map.serialize(serializer),
            CanonicalValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for CanonicalMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}

/// Serialization view that emits object keys in lexicographic order at every level.
///
/// Keys compare by UTF-8 bytes, which matches code point order.
#[derive(Debug, Clone, Copy)]
pub struct SortedView<'a>(&'a CanonicalValue);

impl Serialize for SortedView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            CanonicalValue::Map(map) => {
                let sorted: BTreeMap<&str, &CanonicalValue> = map.iter().collect();
                let mut out = serializer.serialize_map(Some(sorted.len()))?;
                for (key, value) in sorted {
                    out.serialize_entry(key, &SortedView(value))?;
                }
                out.end()
            }
            CanonicalValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&SortedView(item))?;
                }
                seq.end()
            }
            leaf => leaf.serialize(serializer),
        }
    }
}
