//! Style maps attached to pages and elements.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A flat mapping of style-property name to literal value.
///
/// Values are numbers or strings, occasionally a nested object for compound
/// properties. Insertion order is kept for emission; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(IndexMap<String, Value>);

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(property, value);
        self
    }

    /// Insert or replace a property.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(property.into(), value.into());
    }

    /// Remove a property, keeping the order of the rest.
    pub fn remove(&mut self, property: &str) -> Option<Value> {
        self.0.shift_remove(property)
    }

    /// Get a property value.
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.0.get(property)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no properties are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate properties in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Whether `position` is `absolute`.
    pub fn is_absolutely_positioned(&self) -> bool {
        self.get("position").and_then(Value::as_str) == Some("absolute")
    }
}

impl FromIterator<(String, Value)> for Style {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Style {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
