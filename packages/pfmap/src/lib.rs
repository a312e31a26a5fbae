//! Terrain map data model for the map editor.
//!
//! Basic example:
//!
//! ```
//! use pfmap::{
//!     Map,
//!     TileCoords,
//!     TileEdit,
//!     TileShape,
//!     RecordingEngine,
//! };
//! use vek::*;
//!
//! // a blank 2x2 chunk map, all flat at height 0
//! let mut map = Map::new(2, 2);
//! let mut engine = RecordingEngine::default();
//!
//! // raise one tile, crossing into the second chunk column
//! let coords = TileCoords::from_gtc(Vec2::new(40, 3));
//! map.update_tile(coords, TileEdit::flat(5), &mut engine).unwrap();
//!
//! assert_eq!(map.tile_at(coords).base_height, 5);
//! assert_eq!(map.tile_at(coords).shape, TileShape::Flat);
//! assert_eq!(engine.pushed.len(), 1);
//!
//! // and it survives a trip through the file format
//! let text = map.to_pfmap_string();
//! let map2: Map = text.parse().unwrap();
//! assert_eq!(map2.tile_at(coords).base_height, 5);
//! ```
//!
//! ## tiles, chunks
//!
//! The map is a finite rectangular grid of _tiles_. Each tile has one of a
//! small catalogue of shapes (flat, four ramps, eight corners) and a pair of
//! integer heights. Tiles are grouped into _chunks_ of
//! `TILES_PER_CHUNK_ROWS` by `TILES_PER_CHUNK_COLS` tiles, and the map is a
//! grid of `chunk_rows` by `chunk_cols` chunks.
//!
//! ## coordinates
//!
//! All coordinates are `vek::Vec2`s wherein `x` is the column and `y` is the
//! row. Rows grow southwards and columns grow eastwards.
//!
//! - A _chunk coordinate_ (cc) identifies a chunk within the map.
//! - A _local tile coordinate_ (ltc) identifies a tile within a chunk.
//! - A _local tile index_ (lti) is an ltc flattened in row-major order, which
//!   is also the order tiles are stored and serialized in.
//! - A _global tile coordinate_ (gtc) is `cc * chunk extent + ltc`. Because
//!   it is plain arithmetic, neighbor lookups which cross chunk boundaries
//!   are just additions followed by a bounds check.
//!
//! ## file format
//!
//! Maps are stored as line-oriented ASCII text, conventionally with the
//! `.pfmap` extension. See the `map` module.

#[macro_use]
extern crate tracing;

mod error;
mod coord;
mod compass;
mod tile;
mod tile_codec;
mod material;
mod chunk;
mod map;
mod engine;
mod smooth;
mod brush;


pub use self::{
    error::{
        Result,
        Error,
        ErrorKind,
    },
    coord::{
        TILES_PER_CHUNK_ROWS,
        TILES_PER_CHUNK_COLS,
        NUM_LTIS,
        MAX_MATERIALS,
        X_COORDS_PER_TILE,
        Y_COORDS_PER_TILE,
        Z_COORDS_PER_TILE,
        CHUNK_EXTENT,
        TileCoords,
        ltc_to_lti,
        lti_to_ltc,
        gtc_get_cc,
        gtc_get_ltc,
        cc_ltc_to_gtc,
    },
    compass::{
        NUM_CORNERS,
        CORNERS,
        NUM_EDGES,
        EDGES,
        Corner,
        PerCorner,
        Edge,
        PerEdge,
    },
    tile::{
        MIN_BASE_HEIGHT,
        MAX_BASE_HEIGHT,
        MAX_RAMP_HEIGHT,
        NUM_TILE_SHAPES,
        TileShape,
        BlendMode,
        Tile,
    },
    tile_codec::{
        TILE_RECORD_LEN,
        encode_tile,
        tile_to_record,
        decode_tile,
    },
    material::{
        DEFAULT_MATERIALS,
        Material,
        MaterialTable,
    },
    chunk::Chunk,
    map::{
        PFMAP_VERSION,
        PFMAP_EXTENSION,
        Map,
        TileEdit,
    },
    engine::{
        Engine,
        NullEngine,
        RecordingEngine,
    },
    smooth::{
        SmoothDirection,
        SmoothedTile,
        smoothed_tile,
        smooth_border,
    },
    brush::{
        BrushKind,
        EdgeMode,
        Brush,
    },
};
