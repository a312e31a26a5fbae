//! Painting squares of tiles.

use crate::{
    coord::TileCoords,
    engine::{
        Engine,
        RecordingEngine,
    },
    error::Result,
    map::{
        Map,
        TileEdit,
    },
    smooth::{
        SmoothDirection,
        smooth_border,
    },
};
use vek::*;


/// What a brush paints.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BrushKind {
    /// Set the top material, by material table index.
    Material(usize),
    /// Make tiles flat at a height.
    Height(i32),
}

/// What happens at the border of the painted square.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum EdgeMode {
    /// Leave the surroundings alone.
    #[default]
    Hard,
    /// Smooth the ring of tiles around the square into ramps and corners.
    Smooth,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Brush {
    pub kind: BrushKind,
    /// The brush covers the `(2 * radius + 1)` tiles wide square centered on
    /// the cursor.
    pub radius: i64,
    pub edges: EdgeMode,
}

impl Brush {
    /// Brush covering `size` by `size` tiles. Even sizes round down.
    pub fn with_size(kind: BrushKind, size: i64, edges: EdgeMode) -> Self {
        Brush {
            kind,
            radius: size.max(1) / 2,
            edges,
        }
    }

    /// Paint the brush's square around `cursor`, clipped to the map.
    ///
    /// With smooth edges, also smooths the ring just outside the square and
    /// then moves every position in `objects` vertically onto the terrain as
    /// `engine` reports it. The smoothing direction follows the change in
    /// the cursor tile's height. If that did not change, the ring is
    /// smoothed both ways, lowering first.
    ///
    /// A material brush also pushes the material block of every chunk it
    /// touched.
    ///
    /// The whole edit is worked out on a copy of the map first. If any part
    /// of it fails, neither `map`, `engine` nor `objects` are changed.
    ///
    /// Panics if `cursor` is not within the map.
    pub fn apply<E: Engine>(
        &self,
        map: &mut Map,
        mut engine: E,
        cursor: TileCoords,
        objects: &mut [Vec3<f32>],
    ) -> Result<()> {
        let mut scratch = map.clone();
        let mut staged = RecordingEngine::default();
        let touched_ccs = self.paint(&mut scratch, &mut staged, cursor)?;

        *map = scratch;
        for (coords, tile) in &staged.pushed {
            engine.push_tile(coords.cc, coords.ltc, tile);
        }
        if let BrushKind::Material(_) = self.kind {
            for cc in touched_ccs {
                map.push_chunk_materials(cc, &mut engine);
            }
        }
        if self.edges == EdgeMode::Smooth {
            for pos in objects.iter_mut() {
                pos.y = engine.height_at(pos.x, pos.z);
            }
        }

        trace!(gtc = ?cursor.gtc(), brush = ?self, pushes = staged.pushed.len(), "applied brush");
        Ok(())
    }

    /// Returns the ccs of the chunks painted, not counting smoothing.
    fn paint(
        &self,
        map: &mut Map,
        engine: &mut RecordingEngine,
        cursor: TileCoords,
    ) -> Result<Vec<Vec2<i64>>> {
        let prior_height = map.tile_at(cursor).base_height;
        let r = self.radius;
        let mut touched_ccs = Vec::new();

        for y in -r..=r {
            for x in -r..=r {
                let coords = match map.relative_tile_coords(cursor, Vec2::new(x, y)) {
                    Some(coords) => coords,
                    None => continue,
                };
                match self.kind {
                    BrushKind::Material(material) => {
                        let tile = *map.tile_at(coords);
                        map.update_tile_material(
                            coords,
                            material,
                            tile.blend_mode,
                            tile.blend_normals,
                            &mut *engine,
                        )?;
                    }
                    BrushKind::Height(height) => {
                        map.update_tile(coords, TileEdit::flat(height), &mut *engine)?;
                    }
                }
                if !touched_ccs.contains(&coords.cc) {
                    touched_ccs.push(coords.cc);
                }
            }
        }

        if self.edges == EdgeMode::Smooth {
            let new_height = map.tile_at(cursor).base_height;
            let directions = match SmoothDirection::between(prior_height, new_height) {
                Some(direction) => vec![direction],
                None => vec![SmoothDirection::Lower, SmoothDirection::Raise],
            };
            for direction in directions {
                smooth_border(map, &mut *engine, cursor.gtc(), r + 1, direction)?;
            }
        }
        Ok(touched_ccs)
    }
}
