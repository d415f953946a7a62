//! Ordered name/value properties attached to tiles and objects

use serde::{Deserialize, Serialize};

/// A single named string attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// An ordered list of properties.
///
/// Insertion order is preserved and duplicate names are allowed; lookup
/// returns the first match, so a duplicate never shadows an earlier entry.
/// This is deliberately not an associative map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Vec<Property>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property, keeping any existing entry with the same name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(Property {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Value of the first property whose name matches exactly.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|prop| prop.name == name)
            .map(|prop| prop.value.as_str())
    }

    /// Like [`get`](Self::get), but falls back to `default` on a miss.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Property>> for Properties {
    fn from(props: Vec<Property>) -> Self {
        Properties(props)
    }
}

/// Anything that carries a property list.
///
/// Implemented by `Tile` and `Object`; the lookup logic is shared through
/// [`get_property`] rather than duplicated per entity type.
pub trait HasProperties {
    fn properties(&self) -> &Properties;
}

/// Look up a named property on an optional entity.
///
/// Returns `default` when the entity is absent or no property matches.
/// Matching is byte-exact and first-match-wins; the store is never mutated.
pub fn get_property<'a, T: HasProperties>(
    entity: Option<&'a T>,
    name: &str,
    default: &'a str,
) -> &'a str {
    entity
        .and_then(|e| e.properties().get(name))
        .unwrap_or(default)
}
