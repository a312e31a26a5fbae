//! Coordinate arithmetic and engine-wide grid constants.

use vek::*;


/// Number of tile rows in a chunk.
pub const TILES_PER_CHUNK_ROWS: u16 = 32;

/// Number of tile columns in a chunk.
pub const TILES_PER_CHUNK_COLS: u16 = 32;

/// Number of tiles in a chunk, and thus of local tile indices.
pub const NUM_LTIS: usize = TILES_PER_CHUNK_ROWS as usize * TILES_PER_CHUNK_COLS as usize;

/// Extent of a chunk in tiles, as <cols, rows>.
pub const CHUNK_EXTENT: Vec2<i64> = Vec2 {
    x: TILES_PER_CHUNK_COLS as i64,
    y: TILES_PER_CHUNK_ROWS as i64,
};

/// Max number of materials a map's material table can hold. Material
/// indices are in `0..MAX_MATERIALS`.
pub const MAX_MATERIALS: usize = 999;

/// World-space width of a tile along the x axis (columns).
pub const X_COORDS_PER_TILE: f32 = 8.0;

/// World-space height of one unit of tile height.
pub const Y_COORDS_PER_TILE: f32 = 4.0;

/// World-space width of a tile along the z axis (rows).
pub const Z_COORDS_PER_TILE: f32 = 8.0;


fn validate_ltc<N>(ltc: Vec2<N>) -> Vec2<u16>
where
    N: TryInto<u16>,
{
    let x = ltc.x.try_into().ok().expect("ltc x out of range");
    let y = ltc.y.try_into().ok().expect("ltc y out of range");

    assert!(x < TILES_PER_CHUNK_COLS, "ltc x out of range");
    assert!(y < TILES_PER_CHUNK_ROWS, "ltc y out of range");

    Vec2 { x, y }
}

/// Convert local tile coordinate to local tile index.
///
/// Panics if out of range.
pub fn ltc_to_lti<N>(ltc: Vec2<N>) -> usize
where
    N: TryInto<u16>,
{
    let ltc = validate_ltc(ltc);
    ltc.y as usize * TILES_PER_CHUNK_COLS as usize + ltc.x as usize
}

/// Convert local tile index to local tile coordinate.
pub fn lti_to_ltc(lti: usize) -> Vec2<u16> {
    assert!(lti < NUM_LTIS, "lti out of range");
    Vec2 {
        x: (lti % TILES_PER_CHUNK_COLS as usize) as u16,
        y: (lti / TILES_PER_CHUNK_COLS as usize) as u16,
    }
}

/// Get chunk coordinate part of global tile coordinate.
pub fn gtc_get_cc(gtc: Vec2<i64>) -> Vec2<i64> {
    Vec2 {
        x: gtc.x.div_euclid(CHUNK_EXTENT.x),
        y: gtc.y.div_euclid(CHUNK_EXTENT.y),
    }
}

/// Get local tile coordinate part of global tile coordinate.
pub fn gtc_get_ltc(gtc: Vec2<i64>) -> Vec2<u16> {
    Vec2 {
        x: gtc.x.rem_euclid(CHUNK_EXTENT.x) as u16,
        y: gtc.y.rem_euclid(CHUNK_EXTENT.y) as u16,
    }
}

/// Combine chunk coordinate and local tile coordinate into global tile
/// coordinate.
pub fn cc_ltc_to_gtc<N>(cc: Vec2<i64>, ltc: Vec2<N>) -> Vec2<i64>
where
    N: TryInto<u16>,
{
    let ltc = validate_ltc(ltc);
    cc * CHUNK_EXTENT + Vec2::new(ltc.x as i64, ltc.y as i64)
}


/// Address of a tile within a map, as chunk coordinate plus local tile
/// coordinate.
///
/// Only meaningful relative to the map it was issued for. Replacing the map
/// invalidates it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TileCoords {
    pub cc: Vec2<i64>,
    pub ltc: Vec2<u16>,
}

impl TileCoords {
    pub fn new(cc: Vec2<i64>, ltc: Vec2<u16>) -> Self {
        validate_ltc(ltc);
        TileCoords { cc, ltc }
    }

    /// Split a global tile coordinate. Does not check it against any map.
    pub fn from_gtc(gtc: Vec2<i64>) -> Self {
        TileCoords {
            cc: gtc_get_cc(gtc),
            ltc: gtc_get_ltc(gtc),
        }
    }

    pub fn gtc(self) -> Vec2<i64> {
        cc_ltc_to_gtc(self.cc, self.ltc)
    }

    pub fn lti(self) -> usize {
        ltc_to_lti(self.ltc)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lti_packing() {
        for lti in 0..NUM_LTIS {
            assert_eq!(lti, ltc_to_lti(lti_to_ltc(lti)));
        }
    }

    #[test]
    fn test_coord_splitting_joining() {
        for x in -70..70 {
            for y in -70..70 {
                let gtc = Vec2::new(x, y);
                let coords = TileCoords::from_gtc(gtc);
                assert_eq!(gtc, coords.gtc());
                assert_eq!(coords, TileCoords::from_gtc(coords.gtc()));
            }
        }
    }

    #[test]
    fn test_gtc_crosses_chunk_boundary() {
        let coords = TileCoords::from_gtc(Vec2::new(31, 32));
        assert_eq!(coords.cc, Vec2::new(0, 1));
        assert_eq!(coords.ltc, Vec2::new(31, 0));

        let coords = TileCoords::from_gtc(Vec2::new(-1, 0));
        assert_eq!(coords.cc, Vec2::new(-1, 0));
        assert_eq!(coords.ltc, Vec2::new(31, 0));
    }

    #[test]
    #[should_panic]
    fn test_ltc_out_of_range() {
        ltc_to_lti(Vec2::new(TILES_PER_CHUNK_COLS, 0));
    }
}
