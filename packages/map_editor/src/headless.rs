//! Engine without a renderer.

use pfmap::{
    Engine,
    Map,
    Tile,
    X_COORDS_PER_TILE,
    Y_COORDS_PER_TILE,
    Z_COORDS_PER_TILE,
    cc_ltc_to_gtc,
};
use vek::*;


/// Stands in for the live renderer when running without one.
///
/// Keeps its own copy of the terrain, updated only through what the map
/// pushes to it, and answers height queries from that copy, the way the
/// renderer answers them from its meshes.
#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    tile_cols: i64,
    tile_rows: i64,
    // row-major by gtc
    tiles: Vec<Tile>,
    tile_pushes: usize,
    chunk_material_pushes: usize,
}

impl HeadlessEngine {
    /// Take a snapshot of `map`'s terrain.
    pub fn new(map: &Map) -> Self {
        let mut engine = HeadlessEngine {
            tile_cols: map.tile_cols(),
            tile_rows: map.tile_rows(),
            tiles: vec![Tile::default(); (map.tile_cols() * map.tile_rows()) as usize],
            tile_pushes: 0,
            chunk_material_pushes: 0,
        };
        for (coords, tile) in map.tiles() {
            if let Some(i) = engine.idx(coords.gtc()) {
                engine.tiles[i] = *tile;
            }
        }
        engine
    }

    fn idx(&self, gtc: Vec2<i64>) -> Option<usize> {
        if gtc.x >= 0 && gtc.y >= 0 && gtc.x < self.tile_cols && gtc.y < self.tile_rows {
            Some((gtc.y * self.tile_cols + gtc.x) as usize)
        } else {
            None
        }
    }

    pub fn tile(&self, gtc: Vec2<i64>) -> Option<&Tile> {
        self.idx(gtc).map(|i| &self.tiles[i])
    }

    /// Number of single tile pushes received.
    pub fn tile_pushes(&self) -> usize {
        self.tile_pushes
    }

    pub fn chunk_material_pushes(&self) -> usize {
        self.chunk_material_pushes
    }
}

impl Engine for HeadlessEngine {
    fn push_tile(&mut self, cc: Vec2<i64>, ltc: Vec2<u16>, tile: &Tile) {
        self.tile_pushes += 1;
        let gtc = cc_ltc_to_gtc(cc, ltc);
        match self.idx(gtc) {
            Some(i) => self.tiles[i] = *tile,
            None => warn!(?gtc, "pushed tile outside of terrain"),
        }
    }

    fn push_chunk_materials(&mut self, cc: Vec2<i64>, block: &str) {
        self.chunk_material_pushes += 1;
        trace!(?cc, lines = block.lines().count(), "pushed chunk materials");
    }

    fn height_at(&self, x: f32, z: f32) -> f32 {
        let col = x / X_COORDS_PER_TILE;
        let row = z / Z_COORDS_PER_TILE;
        if !(col >= 0.0 && row >= 0.0) {
            return 0.0;
        }
        match self.tile(Vec2::new(col.floor() as i64, row.floor() as i64)) {
            Some(tile) => tile.height_at(col.fract(), row.fract()) * Y_COORDS_PER_TILE,
            None => 0.0,
        }
    }
}
