//! The tile value type and its derived elevations.

use crate::compass::{
    Corner,
    PerCorner,
    Edge,
    PerEdge,
    CORNERS,
};


/// Min value of `Tile::base_height` which can be saved.
pub const MIN_BASE_HEIGHT: i32 = -99;

/// Max value of `Tile::base_height` which can be saved.
pub const MAX_BASE_HEIGHT: i32 = 99;

/// Max value of `Tile::ramp_height` which can be saved. The min is 0.
pub const MAX_RAMP_HEIGHT: i32 = 99;

/// Number of shape codes, including reserved ones.
pub const NUM_TILE_SHAPES: usize = 16;


/// Geometry of a tile.
///
/// Ramps are named after the direction they rise in, so `RampSN` rises from
/// south to north and has its north edge raised.
///
/// A concave corner named after corner C has only the corner opposite C
/// raised, forming a notch. A convex corner named after corner C has every
/// corner except C raised.
///
/// Reserved codes have no geometry of their own and are treated as flat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(u8)]
pub enum TileShape {
    #[default]
    Flat = 0,
    RampSN = 1,
    RampNS = 2,
    RampEW = 3,
    RampWE = 4,
    CornerConcaveSW = 5,
    CornerConvexSW = 6,
    CornerConcaveSE = 7,
    CornerConvexSE = 8,
    CornerConcaveNW = 9,
    CornerConvexNW = 10,
    CornerConcaveNE = 11,
    CornerConvexNE = 12,
    Reserved13 = 13,
    Reserved14 = 14,
    Reserved15 = 15,
}

const SHAPES: [TileShape; NUM_TILE_SHAPES] = [
    TileShape::Flat,
    TileShape::RampSN,
    TileShape::RampNS,
    TileShape::RampEW,
    TileShape::RampWE,
    TileShape::CornerConcaveSW,
    TileShape::CornerConvexSW,
    TileShape::CornerConcaveSE,
    TileShape::CornerConvexSE,
    TileShape::CornerConcaveNW,
    TileShape::CornerConvexNW,
    TileShape::CornerConcaveNE,
    TileShape::CornerConvexNE,
    TileShape::Reserved13,
    TileShape::Reserved14,
    TileShape::Reserved15,
];

/// Marching squares table, indexed by the high corners' `Corner::case_bit`s
/// or'd together.
///
/// The two saddles (NE+SW, and NW+SE) cannot be represented by a single tile
/// and collapse to flat.
const SHAPE_FOR_CASE: [TileShape; 16] = [
    TileShape::Flat,            // 0b0000
    TileShape::CornerConcaveNE, // 0b0001 SW
    TileShape::CornerConcaveNW, // 0b0010 SE
    TileShape::RampNS,          // 0b0011 SE SW
    TileShape::CornerConcaveSW, // 0b0100 NE
    TileShape::Flat,            // 0b0101 NE SW (saddle)
    TileShape::RampWE,          // 0b0110 NE SE
    TileShape::CornerConvexNW,  // 0b0111 NE SE SW
    TileShape::CornerConcaveSE, // 0b1000 NW
    TileShape::RampEW,          // 0b1001 NW SW
    TileShape::Flat,            // 0b1010 NW SE (saddle)
    TileShape::CornerConvexNE,  // 0b1011 NW SE SW
    TileShape::RampSN,          // 0b1100 NW NE
    TileShape::CornerConvexSE,  // 0b1101 NW NE SW
    TileShape::CornerConvexSW,  // 0b1110 NW NE SE
    TileShape::Flat,            // 0b1111
];

impl TileShape {
    /// Look up by 4-bit code. `None` if the code does not fit in 4 bits.
    pub fn from_code(code: u8) -> Option<Self> {
        SHAPES.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Shape for a marching squares case index. Panics if `index >= 16`.
    pub fn from_corner_case(index: u8) -> Self {
        SHAPE_FOR_CASE[index as usize]
    }

    pub fn is_ramp(self) -> bool {
        matches!(
            self,
            TileShape::RampSN | TileShape::RampNS | TileShape::RampEW | TileShape::RampWE
        )
    }

    pub fn is_corner(self) -> bool {
        self.corner().is_some()
    }

    /// For corner shapes, the corner the shape is named after and whether it
    /// is convex.
    pub fn corner(self) -> Option<(Corner, bool)> {
        match self {
            TileShape::CornerConcaveSW => Some((Corner::SW, false)),
            TileShape::CornerConvexSW => Some((Corner::SW, true)),
            TileShape::CornerConcaveSE => Some((Corner::SE, false)),
            TileShape::CornerConvexSE => Some((Corner::SE, true)),
            TileShape::CornerConcaveNW => Some((Corner::NW, false)),
            TileShape::CornerConvexNW => Some((Corner::NW, true)),
            TileShape::CornerConcaveNE => Some((Corner::NE, false)),
            TileShape::CornerConvexNE => Some((Corner::NE, true)),
            _ => None,
        }
    }

    /// For concave corner shapes, the single raised corner.
    pub fn notch(self) -> Option<Corner> {
        match self.corner() {
            Some((corner, false)) => Some(corner.opposite()),
            _ => None,
        }
    }

    /// Which corners sit at `base_height + ramp_height`.
    pub fn raised_corners(self) -> PerCorner<bool> {
        match (self, self.corner()) {
            (_, Some((corner, true))) => PerCorner::from_fn(|c| c != corner),
            (_, Some((corner, false))) => PerCorner::from_fn(|c| c == corner.opposite()),
            (TileShape::RampSN, None) => raised_along(Edge::Top),
            (TileShape::RampNS, None) => raised_along(Edge::Bottom),
            (TileShape::RampEW, None) => raised_along(Edge::Left),
            (TileShape::RampWE, None) => raised_along(Edge::Right),
            (_, None) => PerCorner::repeat(false),
        }
    }

    /// Which edges sit entirely at `base_height + ramp_height`.
    pub fn raised_edges(self) -> PerEdge<bool> {
        let corners = self.raised_corners();
        PerEdge::from_fn(|edge| edge.corners().into_iter().all(|c| corners[c]))
    }

    /// Marching squares case index of this shape's raised corners.
    pub fn corner_case(self) -> u8 {
        let corners = self.raised_corners();
        CORNERS.into_iter()
            .filter(|&c| corners[c])
            .fold(0, |index, c| index | c.case_bit())
    }
}

fn raised_along(edge: Edge) -> PerCorner<bool> {
    let [a, b] = edge.corners();
    PerCorner::from_fn(|c| c == a || c == b)
}


#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u8)]
pub enum BlendMode {
    NoBlend = 0,
    #[default]
    Blur = 1,
}

impl BlendMode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BlendMode::NoBlend),
            1 => Some(BlendMode::Blur),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}


/// One tile of terrain.
///
/// Heights are signed integers rather than the narrower ranges the file
/// format can hold, so that intermediate editing results can be computed
/// freely. Writing a tile whose fields do not fit is a bug, see
/// `tile_codec`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tile {
    pub shape: TileShape,
    /// Height of the tile's low corners.
    pub base_height: i32,
    /// Height of the tile's raised corners above `base_height`.
    pub ramp_height: i32,
    /// Index into the map's material table.
    pub top_material: usize,
    /// Index into the map's material table.
    pub side_material: usize,
    pub pathable: bool,
    pub blend_mode: BlendMode,
    pub blend_normals: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Tile {
            shape: TileShape::Flat,
            base_height: 0,
            ramp_height: 0,
            top_material: 0,
            side_material: 1,
            pathable: true,
            blend_mode: BlendMode::Blur,
            blend_normals: true,
        }
    }
}

impl Tile {
    /// Height of an edge. An edge is raised only if the whole edge is raised.
    pub fn edge_height(&self, edge: Edge) -> i32 {
        if self.shape.raised_edges()[edge] {
            self.base_height + self.ramp_height
        } else {
            self.base_height
        }
    }

    /// Height of a corner. The max of the two edges meeting there, except
    /// for the notch of a concave corner shape, which is raised although
    /// neither of its edges is.
    pub fn corner_height(&self, corner: Corner) -> i32 {
        if self.shape.notch() == Some(corner) {
            return self.base_height + self.ramp_height;
        }
        let [a, b] = corner.edges();
        self.edge_height(a).max(self.edge_height(b))
    }

    pub fn corner_heights(&self) -> PerCorner<i32> {
        PerCorner::from_fn(|corner| self.corner_height(corner))
    }

    pub fn top_left_height(&self) -> i32 {
        self.corner_height(Corner::NW)
    }

    pub fn top_right_height(&self) -> i32 {
        self.corner_height(Corner::NE)
    }

    pub fn bottom_left_height(&self) -> i32 {
        self.corner_height(Corner::SW)
    }

    pub fn bottom_right_height(&self) -> i32 {
        self.corner_height(Corner::SE)
    }

    /// Sample the surface height, in height units, at a position within the
    /// tile. `fx` goes west to east and `fz` north to south, both in `0..=1`.
    pub fn height_at(&self, fx: f32, fz: f32) -> f32 {
        let h = self.corner_heights().map(|h| h as f32);
        let north = h[Corner::NW] + (h[Corner::NE] - h[Corner::NW]) * fx;
        let south = h[Corner::SW] + (h[Corner::SE] - h[Corner::SW]) * fx;
        north + (south - north) * fz
    }
}
