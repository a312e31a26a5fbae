//! Blending edited terrain into its surroundings.
//!
//! After a brush flattens a square of tiles to a new height, the tiles
//! around it still sit at their old heights, leaving a cliff. Smoothing
//! reshapes a ring of tiles around the brush into ramps and corners.
//!
//! For each tile, every one of its 4 corners is a grid point shared with up
//! to 3 other tiles. The height at that point is taken as the max (when
//! raising) or min (when lowering) of that point's height in all tiles
//! touching it. Every corner then snaps to one of two levels: high if it
//! equals the highest of the 4, otherwise low. Which corners are high picks
//! the new shape, marching squares style, see `TileShape::from_corner_case`.

use crate::{
    compass::{
        Corner,
        PerCorner,
        CORNERS,
    },
    coord::TileCoords,
    engine::Engine,
    error::Result,
    map::{
        Map,
        TileEdit,
        check_heights,
    },
    tile::{
        TileShape,
        Tile,
    },
};
use vek::*;


#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SmoothDirection {
    Raise,
    Lower,
}

impl SmoothDirection {
    /// Direction of a height change. `None` if there is no change.
    pub fn between(old: i32, new: i32) -> Option<Self> {
        if new > old {
            Some(SmoothDirection::Raise)
        } else if new < old {
            Some(SmoothDirection::Lower)
        } else {
            None
        }
    }

    fn reduce(self, a: i32, b: i32) -> i32 {
        match self {
            SmoothDirection::Raise => a.max(b),
            SmoothDirection::Lower => a.min(b),
        }
    }
}


/// New geometry computed for a tile.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SmoothedTile {
    pub shape: TileShape,
    pub base_height: i32,
    pub ramp_height: i32,
}

/// Compute the smoothed geometry of the tile at `gtc`, without applying it.
/// `None` if `gtc` is outside the map.
///
/// Neighbors outside the map are left out, not treated as height 0.
pub fn smoothed_tile(map: &Map, gtc: Vec2<i64>, direction: SmoothDirection) -> Option<SmoothedTile> {
    smoothed_tile_in(|gtc| map.tile_at_gtc(gtc).copied(), gtc, direction)
}

fn smoothed_tile_in<F>(tile_at: F, gtc: Vec2<i64>, direction: SmoothDirection) -> Option<SmoothedTile>
where
    F: Fn(Vec2<i64>) -> Option<Tile>,
{
    let tile = tile_at(gtc)?;

    let heights = PerCorner::from_fn(|corner| {
        let v = corner.to_vec();
        [Vec2::new(v.x, 0), v, Vec2::new(0, v.y)]
            .into_iter()
            .filter_map(|offset| {
                let neighbor = tile_at(gtc + offset)?;
                // the neighbor's corner at the same grid point
                let shared = Corner::from_vec(v - offset * 2)?;
                Some(neighbor.corner_height(shared))
            })
            .fold(tile.corner_height(corner), |a, b| direction.reduce(a, b))
    });

    let high = heights.iter().copied().fold(i32::MIN, i32::max);
    let low = heights.iter().copied().fold(i32::MAX, i32::min);
    let case = CORNERS.into_iter()
        .filter(|&corner| heights[corner] == high)
        .fold(0, |case, corner| case | corner.case_bit());

    Some(SmoothedTile {
        shape: TileShape::from_corner_case(case),
        base_height: low,
        ramp_height: high - low,
    })
}


/// Smoothed tiles not yet written to the map, layered over it.
struct Staged<'a> {
    map: &'a Map,
    tiles: Vec<(Vec2<i64>, SmoothedTile)>,
}

impl<'a> Staged<'a> {
    fn new(map: &'a Map) -> Self {
        Staged {
            map,
            tiles: Vec::new(),
        }
    }

    fn tile_at(&self, gtc: Vec2<i64>) -> Option<Tile> {
        let mut tile = *self.map.tile_at_gtc(gtc)?;
        if let Some(&(_, smoothed)) = self.tiles.iter().rev().find(|&&(g, _)| g == gtc) {
            tile.shape = smoothed.shape;
            tile.base_height = smoothed.base_height;
            tile.ramp_height = smoothed.ramp_height;
        }
        Some(tile)
    }

    fn push(&mut self, gtc: Vec2<i64>, smoothed: SmoothedTile) -> Result<()> {
        check_heights(gtc, smoothed.base_height, smoothed.ramp_height)?;
        self.tiles.push((gtc, smoothed));
        Ok(())
    }
}

/// Smooth the square ring of tiles `ring_radius` tiles out from `center`.
///
/// The ring's edge tiles are all computed from the terrain as it was before
/// the pass. The ring's 4 corner tiles, which each border two edges, are
/// then computed one by one, each seeing the edges and corners before it.
/// Ring tiles outside the map are skipped.
///
/// Nothing is written until every tile of the ring is known to fit the
/// file format's height ranges. If one does not, this fails with the map
/// and `engine` untouched.
///
/// Returns the number of tiles which changed.
pub fn smooth_border<E: Engine>(
    map: &mut Map,
    mut engine: E,
    center: Vec2<i64>,
    ring_radius: i64,
    direction: SmoothDirection,
) -> Result<usize> {
    let r = ring_radius;
    assert!(r >= 0, "negative ring radius");

    let edges = (-r + 1..r)
        .flat_map(|i| [
            Vec2::new(i, -r),
            Vec2::new(r, i),
            Vec2::new(i, r),
            Vec2::new(-r, i),
        ])
        .filter_map(|offset| {
            let gtc = center + offset;
            smoothed_tile(map, gtc, direction).map(|smoothed| (gtc, smoothed))
        })
        .collect::<Vec<_>>();
    let corners = if r == 0 {
        vec![center]
    } else {
        CORNERS.into_iter().map(|corner| center + corner.to_vec() * r).collect()
    };

    let mut staged = Staged::new(map);
    for (gtc, smoothed) in edges {
        staged.push(gtc, smoothed)?;
    }
    for gtc in corners {
        if let Some(smoothed) = smoothed_tile_in(|g| staged.tile_at(g), gtc, direction) {
            staged.push(gtc, smoothed)?;
        }
    }
    let staged = staged.tiles;

    let mut changed = 0;
    for (gtc, smoothed) in staged {
        changed += apply(map, &mut engine, gtc, smoothed)? as usize;
    }

    trace!(?center, ring_radius, ?direction, changed, "smoothed border");
    Ok(changed)
}

fn apply<E: Engine>(
    map: &mut Map,
    engine: E,
    gtc: Vec2<i64>,
    smoothed: SmoothedTile,
) -> Result<bool> {
    let coords = TileCoords::from_gtc(gtc);
    let tile = map.tile_at(coords);
    if tile.shape == smoothed.shape
        && tile.base_height == smoothed.base_height
        && tile.ramp_height == smoothed.ramp_height
    {
        return Ok(false);
    }
    let edit = TileEdit::shaped(smoothed.shape, smoothed.base_height, smoothed.ramp_height);
    map.update_tile(coords, edit, engine)?;
    Ok(true)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecordingEngine;

    fn set_flat(map: &mut Map, gtc: Vec2<i64>, height: i32) {
        map.update_tile(TileCoords::from_gtc(gtc), TileEdit::flat(height), RecordingEngine::default())
            .unwrap();
    }

    fn geometry(map: &Map, gtc: Vec2<i64>) -> (TileShape, i32, i32) {
        let tile = map.tile_at_gtc(gtc).unwrap();
        (tile.shape, tile.base_height, tile.ramp_height)
    }

    #[test]
    fn test_between() {
        assert_eq!(SmoothDirection::between(0, 3), Some(SmoothDirection::Raise));
        assert_eq!(SmoothDirection::between(0, -3), Some(SmoothDirection::Lower));
        assert_eq!(SmoothDirection::between(2, 2), None);
    }

    #[test]
    fn test_flat_terrain_unchanged() {
        let mut map = Map::new(1, 1);
        for x in 5..15 {
            for y in 5..15 {
                set_flat(&mut map, Vec2::new(x, y), 3);
            }
        }
        let before = map.clone();
        for direction in [SmoothDirection::Raise, SmoothDirection::Lower] {
            for r in 0..4 {
                let mut engine = RecordingEngine::default();
                let changed = smooth_border(&mut map, &mut engine, Vec2::new(10, 10), r, direction)
                    .unwrap();
                assert_eq!(changed, 0);
                assert!(engine.pushed.is_empty());
            }
        }
        assert_eq!(map, before);
    }

    #[test]
    fn test_plateau() {
        let mut map = Map::new(1, 1);
        let c = Vec2::new(2, 2);
        set_flat(&mut map, c, 5);

        let mut engine = RecordingEngine::default();
        let changed = smooth_border(&mut map, &mut engine, c, 1, SmoothDirection::Raise).unwrap();
        assert_eq!(changed, 8);
        assert_eq!(engine.pushed.len(), 8);

        let expected = [
            (Vec2::new(0, -1), TileShape::RampNS),
            (Vec2::new(0, 1), TileShape::RampSN),
            (Vec2::new(-1, 0), TileShape::RampWE),
            (Vec2::new(1, 0), TileShape::RampEW),
            (Vec2::new(-1, -1), TileShape::CornerConcaveNW),
            (Vec2::new(1, -1), TileShape::CornerConcaveNE),
            (Vec2::new(1, 1), TileShape::CornerConcaveSE),
            (Vec2::new(-1, 1), TileShape::CornerConcaveSW),
        ];
        for (offset, shape) in expected {
            assert_eq!(geometry(&map, c + offset), (shape, 0, 5), "{:?}", offset);
        }
        assert_eq!(geometry(&map, c), (TileShape::Flat, 5, 0));
        assert_eq!(geometry(&map, c + Vec2::new(2, 0)), (TileShape::Flat, 0, 0));
    }

    #[test]
    fn test_plateau_slopes_face_center() {
        let mut map = Map::new(1, 1);
        let c = Vec2::new(6, 6);
        set_flat(&mut map, c, 5);
        smooth_border(&mut map, RecordingEngine::default(), c, 1, SmoothDirection::Raise).unwrap();

        for corner in CORNERS {
            let tile = map.tile_at_gtc(c + corner.to_vec()).unwrap();
            // only the corner touching the plateau is up
            for other in CORNERS {
                let expected = if other == corner.opposite() { 5 } else { 0 };
                assert_eq!(tile.corner_height(other), expected);
            }
        }
    }

    #[test]
    fn test_pit() {
        let mut map = Map::new(1, 1);
        let c = Vec2::new(4, 4);
        set_flat(&mut map, c, -4);
        smooth_border(&mut map, RecordingEngine::default(), c, 1, SmoothDirection::Lower).unwrap();

        assert_eq!(geometry(&map, c + Vec2::new(0, -1)), (TileShape::RampSN, -4, 4));
        assert_eq!(geometry(&map, c + Vec2::new(-1, -1)), (TileShape::CornerConvexSE, -4, 4));
    }

    #[test]
    fn test_saddle_collapses_to_flat() {
        let mut map = Map::new(1, 1);
        set_flat(&mut map, Vec2::new(9, 9), 5);
        set_flat(&mut map, Vec2::new(11, 11), 5);

        let smoothed = smoothed_tile(&map, Vec2::new(10, 10), SmoothDirection::Raise).unwrap();
        assert_eq!(smoothed.shape, TileShape::Flat);
        assert_eq!(smoothed.base_height, 0);

        set_flat(&mut map, Vec2::new(9, 11), 5);
        set_flat(&mut map, Vec2::new(11, 9), 5);
        set_flat(&mut map, Vec2::new(9, 9), 0);
        set_flat(&mut map, Vec2::new(11, 11), 0);
        let smoothed = smoothed_tile(&map, Vec2::new(10, 10), SmoothDirection::Raise).unwrap();
        assert_eq!(smoothed.shape, TileShape::Flat);
    }

    #[test]
    fn test_map_edge_neighbors_excluded() {
        let mut map = Map::new(1, 1);
        set_flat(&mut map, Vec2::new(1, 1), 2);

        let smoothed = smoothed_tile(&map, Vec2::new(0, 0), SmoothDirection::Lower).unwrap();
        assert_eq!(smoothed.shape, TileShape::Flat);
        assert_eq!(smoothed.base_height, 0);

        let smoothed = smoothed_tile(&map, Vec2::new(0, 0), SmoothDirection::Raise).unwrap();
        assert_eq!(smoothed.shape, TileShape::CornerConcaveNW);

        assert_eq!(smoothed_tile(&map, Vec2::new(-1, 0), SmoothDirection::Raise), None);
    }

    #[test]
    fn test_ring_clipped_at_map_edge() {
        let mut map = Map::new(1, 1);
        set_flat(&mut map, Vec2::new(0, 0), 3);
        let mut engine = RecordingEngine::default();
        let changed = smooth_border(&mut map, &mut engine, Vec2::new(0, 0), 1, SmoothDirection::Raise)
            .unwrap();
        assert_eq!(changed, 3);
        assert_eq!(geometry(&map, Vec2::new(1, 0)), (TileShape::RampEW, 0, 3));
        assert_eq!(geometry(&map, Vec2::new(0, 1)), (TileShape::RampSN, 0, 3));
        assert_eq!(geometry(&map, Vec2::new(1, 1)), (TileShape::CornerConcaveSE, 0, 3));
    }

    #[test]
    fn test_ring_out_of_range_writes_nothing() {
        // a ring tile between a high plateau and a deep pit would need a
        // ramp taller than the file format allows
        let mut map = Map::new(1, 1);
        let c = Vec2::new(10, 10);
        set_flat(&mut map, c, 50);
        for x in 11..14 {
            for y in 8..13 {
                set_flat(&mut map, Vec2::new(x, y), -60);
            }
        }
        let before = map.clone();

        let mut engine = RecordingEngine::default();
        let e = smooth_border(&mut map, &mut engine, c, 1, SmoothDirection::Raise).unwrap_err();
        assert_eq!(e.kind(), crate::error::ErrorKind::HeightRange);
        assert!(engine.pushed.is_empty());
        assert_eq!(map, before);
    }
}
