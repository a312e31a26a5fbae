//! The live renderer, as seen from the map.

use crate::{
    coord::TileCoords,
    tile::Tile,
};
use vek::*;


/// Receives map edits as they happen, and answers terrain height queries.
///
/// The map never reads anything back from the engine except through
/// `height_at`.
pub trait Engine {
    /// A single tile changed.
    fn push_tile(&mut self, cc: Vec2<i64>, ltc: Vec2<u16>, tile: &Tile);

    /// A chunk's material assignment changed. `block` is the chunk's
    /// rendered material block, see `Chunk::materials_block`.
    fn push_chunk_materials(&mut self, cc: Vec2<i64>, block: &str) {
        let _ = (cc, block);
    }

    /// Terrain height at a world-space position, in world units.
    fn height_at(&self, x: f32, z: f32) -> f32;
}

impl<E: Engine + ?Sized> Engine for &mut E {
    fn push_tile(&mut self, cc: Vec2<i64>, ltc: Vec2<u16>, tile: &Tile) {
        (**self).push_tile(cc, ltc, tile)
    }

    fn push_chunk_materials(&mut self, cc: Vec2<i64>, block: &str) {
        (**self).push_chunk_materials(cc, block)
    }

    fn height_at(&self, x: f32, z: f32) -> f32 {
        (**self).height_at(x, z)
    }
}


/// Engine which ignores everything. All terrain is at height 0.
#[derive(Debug, Copy, Clone, Default)]
pub struct NullEngine;

impl Engine for NullEngine {
    fn push_tile(&mut self, _: Vec2<i64>, _: Vec2<u16>, _: &Tile) {}

    fn height_at(&self, _: f32, _: f32) -> f32 {
        0.0
    }
}


/// Engine which records everything pushed to it. All terrain is at
/// `height`.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    pub pushed: Vec<(TileCoords, Tile)>,
    pub pushed_chunk_materials: Vec<(Vec2<i64>, String)>,
    pub height: f32,
}

impl RecordingEngine {
    /// Most recently pushed value of the tile at `coords`.
    pub fn last_pushed(&self, coords: TileCoords) -> Option<&Tile> {
        self.pushed.iter().rev()
            .find(|&&(c, _)| c == coords)
            .map(|(_, tile)| tile)
    }
}

impl Engine for RecordingEngine {
    fn push_tile(&mut self, cc: Vec2<i64>, ltc: Vec2<u16>, tile: &Tile) {
        self.pushed.push((TileCoords::new(cc, ltc), *tile));
    }

    fn push_chunk_materials(&mut self, cc: Vec2<i64>, block: &str) {
        self.pushed_chunk_materials.push((cc, block.to_owned()));
    }

    fn height_at(&self, _: f32, _: f32) -> f32 {
        self.height
    }
}
