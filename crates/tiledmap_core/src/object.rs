//! Placed objects and their named groupings

use crate::property::{HasProperties, Properties};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A non-grid map entity (marker, region, spawn point).
///
/// Objects are owned by the map; groups reference them by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    /// Unique identifier for this instance
    pub id: Uuid,
    pub name: String,
    /// Type name (e.g., "NPC", "Enemy", "Chest")
    pub kind: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Object {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: kind.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(name, value);
        self
    }
}

impl HasProperties for Object {
    fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// A named grouping of map-owned objects.
///
/// Holds object ids only; ownership (and teardown) of the objects themselves
/// stays with the map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub name: String,
    pub objects: Vec<Uuid>,
}

impl ObjectGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn add(&mut self, id: Uuid) {
        self.objects.push(id);
    }
}
