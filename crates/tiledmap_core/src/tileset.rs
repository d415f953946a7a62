//! Tilesets and the tile definitions they own

use crate::pixel::PixelData;
use crate::property::{HasProperties, Properties};
use serde::{Deserialize, Serialize};

/// A single tile definition.
///
/// Owned by exactly one [`Tileset`]; the map-wide tile index refers back to
/// it by position rather than holding a second owner. Id 0 is reserved for
/// "no tile" and must never appear here.
#[derive(Debug, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    /// Cut-out pixel region for this tile, owned here, released on drop.
    #[serde(skip)]
    pub bitmap: Option<Box<dyn PixelData>>,
    #[serde(default)]
    pub properties: Properties,
}

impl Tile {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            bitmap: None,
            properties: Properties::new(),
        }
    }

    pub fn with_bitmap(mut self, bitmap: Box<dyn PixelData>) -> Self {
        self.bitmap = Some(bitmap);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(name, value);
        self
    }
}

impl HasProperties for Tile {
    fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// A named collection of tile definitions backed by one shared image.
#[derive(Debug, Serialize, Deserialize)]
pub struct Tileset {
    pub name: String,
    /// Path of the image file this tileset was cut from.
    pub source: String,
    /// The shared source image, owned here, released on drop.
    #[serde(skip)]
    pub bitmap: Option<Box<dyn PixelData>>,
    pub tiles: Vec<Tile>,
}

impl Tileset {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            bitmap: None,
            tiles: Vec::new(),
        }
    }

    pub fn with_bitmap(mut self, bitmap: Box<dyn PixelData>) -> Self {
        self.bitmap = Some(bitmap);
        self
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }
}
