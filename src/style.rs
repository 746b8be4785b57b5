//! Order-preserving resolved-style mapping
//!
//! Style enumeration order is part of the snapshot format, so the mapping is
//! kept as an ordered list of pairs and (de)serialized as a JSON object in
//! that order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Resolved style values keyed by hyphenated property name
///
/// Values are kept exactly as the host style resolution reported them; no
/// unit normalization happens here.
///
/// # Examples
///
/// ```
/// use layout_parity::style::StyleMap;
///
/// let styles: StyleMap = serde_json::from_str(r#"{"display":"block","color":"red"}"#)?;
/// assert_eq!(styles.get("color"), Some("red"));
/// assert_eq!(styles.keys().collect::<Vec<_>>(), vec!["display", "color"]);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property, keeping its first enumeration position
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Value of a property, if present
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.as_str())
    }

    /// Property names in enumeration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(property, value)` pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no properties are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned pairs in enumeration order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries.clone()
    }
}

impl FromIterator<(String, String)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (property, value) in iter {
            map.insert(property, value);
        }
        map
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (property, value) in &self.entries {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}

struct StyleMapVisitor;

impl<'de> Visitor<'de> for StyleMapVisitor {
    type Value = StyleMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of style property names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StyleMap, A::Error> {
        let mut map = StyleMap::new();
        while let Some((property, value)) = access.next_entry::<String, String>()? {
            map.insert(property, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StyleMapVisitor)
    }
}
