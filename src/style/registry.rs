//! Named style dictionaries.

use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the set provided by [`StyleRegistry::builtin`].
pub const DEFAULT_STYLE_SET: &str = "default";

/// Read-only mapping from a style-set name to its nested dictionary.
///
/// Built once during initialization and then shared by reference; nothing
/// mutates it afterwards, so concurrent readers need no locking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRegistry {
    sets: BTreeMap<String, Value>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dictionary under `name`, replacing any previous one.
    pub fn register(mut self, name: impl Into<String>, dictionary: Value) -> Self {
        let name = name.into();
        log::debug!("registering style set '{}'", name);
        self.sets.insert(name, dictionary);
        self
    }

    /// Load a registry from a JSON object of `{ "<set>": { ... } }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(sets) = value else {
            return Err(Error::InvalidRegistry(
                "expected an object mapping set names to dictionaries".to_string(),
            ));
        };

        let mut registry = Self::new();
        for (name, dictionary) in sets {
            if !dictionary.is_object() {
                return Err(Error::InvalidRegistry(format!(
                    "style set '{}' is not an object",
                    name
                )));
            }
            registry = registry.register(name, dictionary);
        }
        Ok(registry)
    }

    /// Load a registry from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Registry holding the built-in `default` set.
    pub fn builtin() -> Self {
        Self::new().register(
            DEFAULT_STYLE_SET,
            json!({
                "colors": {
                    "primary": "#1f4fd8",
                    "secondary": "#f2b705",
                    "text": "#1a1a1a",
                    "muted": "#6b7280",
                    "background": "#ffffff"
                },
                "fonts": {
                    "heading": "Georgia, serif",
                    "body": "Helvetica, Arial, sans-serif"
                },
                "fontSizes": {
                    "title": 48,
                    "heading": 32,
                    "body": 16,
                    "caption": 12
                },
                "spacing": {
                    "sm": 8,
                    "md": 16,
                    "lg": 32
                },
                "radii": {
                    "card": 8
                }
            }),
        )
    }

    /// Look up a dictionary by set name.
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        self.sets.get(name)
    }

    /// Look up a dotted path (`colors.primary`) inside a named set.
    pub fn resolve_path(&self, name: &str, path: &str) -> Option<&Value> {
        self.resolve(name)
            .and_then(|dictionary| lookup_path(dictionary, path))
    }

    /// Check if a set is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Registered set names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if no sets are registered.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Resolve a dotted path by successive property lookup.
///
/// Array elements are addressed by numeric segments (`shadows.0`). An empty
/// path resolves to the dictionary itself.
pub fn lookup_path<'a>(dictionary: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(dictionary);
    }
    path.split('.').try_fold(dictionary, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
