//! Core data model for tile-based maps
//!
//! This crate provides the fundamental types for representing a loaded tile
//! map in memory:
//! - `Map` - root of the ownership graph: layers, tilesets, objects, groups
//! - `TileLayer` - a single width x height grid of packed cells
//! - `Cell` / `FlipFlags` - packed tile id plus orientation bits
//! - `Tileset` / `Tile` - tile definitions backed by a shared image
//! - `Object` / `ObjectGroup` - non-grid entities and their named groupings
//! - `Properties` - ordered name/value attributes with default-fallback lookup
//!
//! Parsing map files and rendering are out of scope: a loader constructs and
//! populates a `Map`, a renderer queries it. This crate only defines the
//! graph, its query operations, and its ownership contract.

mod cell;
mod error;
mod layer;
mod map;
mod object;
mod pixel;
mod property;
mod tileset;

pub use cell::{Cell, FlipFlags};
pub use error::MapError;
pub use layer::TileLayer;
pub use map::Map;
pub use object::{Object, ObjectGroup};
pub use pixel::PixelData;
pub use property::{get_property, HasProperties, Properties, Property};
pub use tileset::{Tile, Tileset};
