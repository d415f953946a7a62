//! The map aggregate: ownership root and query surface

use crate::error::MapError;
use crate::layer::TileLayer;
use crate::object::{Object, ObjectGroup};
use crate::pixel::PixelData;
use crate::tileset::{Tile, Tileset};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A complete loaded map: layers, tilesets, objects and their groupings.
///
/// The map is the root of the ownership graph. Every layer, tileset, tile,
/// object, property list and pixel resource is owned by value somewhere
/// under it, so dropping the map releases the whole graph exactly once in
/// structural order; there is no separate teardown call. The tile index is
/// the one non-owning piece: it maps tile ids to positions inside `tilesets`
/// and is dropped with the map it indexes.
///
/// Queries take `&self` and never mutate, so concurrent readers are safe as
/// long as no one holds `&mut Map` at the same time.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Map {
    /// Layout convention, e.g. "orthogonal" or "isometric".
    pub orientation: String,
    /// Map size in tiles.
    pub width: u32,
    pub height: u32,
    /// Tile size in pixels.
    pub tile_width: u32,
    pub tile_height: u32,
    pub layers: Vec<TileLayer>,
    pub tilesets: Vec<Tileset>,
    pub objects: Vec<Object>,
    pub object_groups: Vec<ObjectGroup>,
    /// Tile id -> (tileset index, tile index). Derived from `tilesets`;
    /// rebuild after mutating them or after deserializing.
    #[serde(skip)]
    tile_index: HashMap<u32, (usize, usize)>,
    /// Offscreen render target owned by the map, released on drop.
    #[serde(skip)]
    pub backbuffer: Option<Box<dyn PixelData>>,
}

impl Map {
    pub fn new(
        orientation: impl Into<String>,
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> Self {
        Self {
            orientation: orientation.into(),
            width,
            height,
            tile_width,
            tile_height,
            ..Self::default()
        }
    }

    pub fn add_layer(&mut self, layer: TileLayer) {
        self.layers.push(layer);
    }

    /// Add a tileset and fold its tiles into the tile index.
    pub fn add_tileset(&mut self, tileset: Tileset) {
        self.tilesets.push(tileset);
        self.rebuild_tile_index();
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_object_group(&mut self, group: ObjectGroup) {
        self.object_groups.push(group);
    }

    /// Rebuild the tile index from `tilesets` alone.
    ///
    /// The reserved id 0 is never indexed. If two tilesets define the same
    /// id, the later tileset wins.
    pub fn rebuild_tile_index(&mut self) {
        self.tile_index.clear();
        for (tileset_idx, tileset) in self.tilesets.iter().enumerate() {
            for (tile_idx, tile) in tileset.tiles.iter().enumerate() {
                if tile.id == 0 {
                    warn!(
                        "tileset {:?} defines reserved tile id 0, skipping",
                        tileset.name
                    );
                    continue;
                }
                if let Some((prev, _)) = self.tile_index.insert(tile.id, (tileset_idx, tile_idx)) {
                    warn!(
                        "tile id {} in tileset {:?} shadows an entry from tileset {:?}",
                        tile.id, tileset.name, self.tilesets[prev].name
                    );
                }
            }
        }
        debug!(
            "indexed {} tiles across {} tilesets",
            self.tile_index.len(),
            self.tilesets.len()
        );
    }

    /// Look up a tile definition by id.
    ///
    /// Id 0 always yields `None`, even if the index somehow carries a
    /// zero-keyed entry. An unknown id is an absence, not an error.
    pub fn get_tile(&self, id: u32) -> Option<&Tile> {
        if id == 0 {
            return None;
        }
        let &(tileset_idx, tile_idx) = self.tile_index.get(&id)?;
        self.tilesets.get(tileset_idx)?.tiles.get(tile_idx)
    }

    /// Bare tile ids at `(x, y)`, one per layer in layer order.
    ///
    /// 0 means "no tile on this layer"; the vector length always equals the
    /// layer count. A layer whose grid does not cover the coordinate makes
    /// the whole query fail with [`MapError::OutOfBounds`].
    pub fn tiles_at(&self, x: u32, y: u32) -> Result<Vec<u32>, MapError> {
        self.layers
            .iter()
            .map(|layer| layer.tile_id_at(x, y))
            .collect()
    }

    /// Look up a map-owned object by id.
    pub fn object(&self, id: Uuid) -> Option<&Object> {
        self.objects.iter().find(|object| object.id == id)
    }

    /// Resolve a group's member ids against the map-owned objects.
    ///
    /// Ids that no longer resolve are skipped.
    pub fn objects_in<'a>(&'a self, group: &'a ObjectGroup) -> impl Iterator<Item = &'a Object> {
        group.objects.iter().filter_map(|id| self.object(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, FlipFlags};
    use crate::property::get_property;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Pixel stub that counts how many times it gets released.
    #[derive(Debug)]
    struct CountingBitmap(Arc<AtomicUsize>);

    impl PixelData for CountingBitmap {}

    impl Drop for CountingBitmap {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn test_map() -> Map {
        let mut map = Map::new("orthogonal", 4, 4, 16, 16);

        let mut terrain = Tileset::new("terrain", "terrain.png");
        terrain.add_tile(Tile::new(1).with_property("solid", "true"));
        terrain.add_tile(Tile::new(2));
        map.add_tileset(terrain);

        let mut deco = Tileset::new("deco", "deco.png");
        deco.add_tile(Tile::new(3).with_property("solid", "false"));
        map.add_tileset(deco);

        let mut ground = TileLayer::new("ground", 4, 4);
        ground.set_cell(0, 0, Cell::new(1, FlipFlags::empty())).unwrap();
        ground.set_cell(1, 0, Cell::new(2, FlipFlags::HORIZONTAL)).unwrap();
        map.add_layer(ground);

        let mut overlay = TileLayer::new("overlay", 4, 4);
        overlay.set_cell(0, 0, Cell::new(3, FlipFlags::empty())).unwrap();
        map.add_layer(overlay);

        map.add_layer(TileLayer::new("sky", 4, 4));

        map
    }

    #[test]
    fn test_tiles_at_returns_one_id_per_layer() {
        let map = test_map();
        assert_eq!(map.tiles_at(0, 0).unwrap(), vec![1, 3, 0]);
        assert_eq!(map.tiles_at(1, 0).unwrap(), vec![2, 0, 0]);
        assert_eq!(map.tiles_at(3, 3).unwrap(), vec![0, 0, 0]);
        assert_eq!(map.tiles_at(0, 0).unwrap().len(), map.layers.len());
    }

    #[test]
    fn test_tiles_at_masks_flip_flags() {
        let map = test_map();
        // (1, 0) holds tile 2 flipped horizontally on the ground layer.
        assert_eq!(map.tiles_at(1, 0).unwrap()[0], 2);
        assert!(map.layers[0].is_flipped_horizontally(1, 0).unwrap());
    }

    #[test]
    fn test_tiles_at_out_of_bounds() {
        let map = test_map();
        assert!(map.tiles_at(4, 0).is_err());
        assert!(map.tiles_at(0, 17).is_err());
    }

    #[test]
    fn test_get_tile_spans_tilesets() {
        let map = test_map();
        assert_eq!(map.get_tile(1).unwrap().id, 1);
        assert_eq!(map.get_tile(3).unwrap().id, 3);
        assert!(map.get_tile(99).is_none());
        assert_eq!(
            get_property(map.get_tile(1), "solid", "false"),
            "true"
        );
        assert_eq!(
            get_property(map.get_tile(99), "solid", "false"),
            "false"
        );
    }

    #[test]
    fn test_get_tile_zero_is_always_absent() {
        let mut map = Map::new("orthogonal", 1, 1, 16, 16);
        let mut bad = Tileset::new("bad", "bad.png");
        // A zero id must neither be indexed nor returned.
        bad.add_tile(Tile::new(0));
        bad.add_tile(Tile::new(1));
        map.add_tileset(bad);
        assert!(map.get_tile(0).is_none());
        assert!(map.get_tile(1).is_some());
    }

    #[test]
    fn test_rebuild_is_a_pure_function_of_tilesets() {
        let mut map = test_map();
        let before: Vec<u32> = {
            let mut ids: Vec<u32> = map.tile_index.keys().copied().collect();
            ids.sort_unstable();
            ids
        };
        map.rebuild_tile_index();
        map.rebuild_tile_index();
        let mut after: Vec<u32> = map.tile_index.keys().copied().collect();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_duplicate_id_later_tileset_wins() {
        let mut map = Map::new("orthogonal", 1, 1, 16, 16);
        let mut first = Tileset::new("first", "a.png");
        first.add_tile(Tile::new(7).with_property("from", "first"));
        map.add_tileset(first);
        let mut second = Tileset::new("second", "b.png");
        second.add_tile(Tile::new(7).with_property("from", "second"));
        map.add_tileset(second);
        assert_eq!(get_property(map.get_tile(7), "from", ""), "second");
    }

    #[test]
    fn test_object_group_resolution() {
        let mut map = test_map();
        let guard = Object::new("guard", "NPC").with_property("dialogue", "intro");
        let guard_id = guard.id;
        map.add_object(guard);
        let mut group = ObjectGroup::new("npcs");
        group.add(guard_id);
        group.add(Uuid::new_v4()); // dangling reference, skipped
        map.add_object_group(group);

        let group = &map.object_groups[0];
        let resolved: Vec<&Object> = map.objects_in(group).collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "guard");
        assert_eq!(get_property(map.object(guard_id), "dialogue", ""), "intro");
        assert_eq!(get_property(map.object(Uuid::new_v4()), "dialogue", "x"), "x");
    }

    #[test]
    fn test_drop_releases_every_bitmap_exactly_once() {
        let released = Arc::new(AtomicUsize::new(0));
        let bitmap = || -> Box<dyn PixelData> { Box::new(CountingBitmap(released.clone())) };

        let mut map = Map::new("orthogonal", 2, 2, 16, 16);
        let mut tileset = Tileset::new("terrain", "terrain.png").with_bitmap(bitmap());
        tileset.add_tile(Tile::new(1).with_bitmap(bitmap()));
        tileset.add_tile(Tile::new(2).with_bitmap(bitmap()));
        map.add_tileset(tileset);
        let mut deco = Tileset::new("deco", "deco.png").with_bitmap(bitmap());
        deco.add_tile(Tile::new(3).with_bitmap(bitmap()));
        map.add_tileset(deco);
        map.backbuffer = Some(bitmap());

        assert_eq!(released.load(Ordering::SeqCst), 0);
        drop(map);
        // 2 tileset images + 3 tile regions + 1 backbuffer.
        assert_eq!(released.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_serde_roundtrip_rebuilds_index() {
        let map = test_map();
        let json = serde_json::to_string(&map).unwrap();
        let mut restored: Map = serde_json::from_str(&json).unwrap();

        // The index is skipped during serialization and derived after load.
        assert!(restored.get_tile(1).is_none());
        restored.rebuild_tile_index();

        assert_eq!(restored.orientation, "orthogonal");
        assert_eq!(restored.layers.len(), map.layers.len());
        assert_eq!(restored.tiles_at(0, 0).unwrap(), vec![1, 3, 0]);
        assert_eq!(get_property(restored.get_tile(1), "solid", "false"), "true");
    }
}
