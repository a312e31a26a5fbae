//! The map: a grid of chunks plus a material table, and its file format.
//!
//! ## file format
//!
//! Line-oriented ASCII, fields separated by spaces:
//!
//! ```text
//! version 1.0
//! num_materials <M>
//! num_rows <R>
//! num_cols <C>
//! material <name> <texture>      (M times)
//! <tile block of chunk 0,0>
//! <tile block of chunk 0,1>
//! ...
//! <tile block of chunk R-1,C-1>
//! ```
//!
//! Each tile block is `NUM_LTIS` tile records in row-major order, written
//! four per line. The four header lines are read by key, so their order
//! does not matter, but each must appear exactly once. Blank lines are
//! ignored.

use crate::{
    coord::{
        CHUNK_EXTENT,
        X_COORDS_PER_TILE,
        Y_COORDS_PER_TILE,
        Z_COORDS_PER_TILE,
        TileCoords,
    },
    chunk::{
        Chunk,
        LineCursor,
    },
    engine::Engine,
    error::{
        Error,
        Result,
        bail,
        ensure,
        err,
    },
    material::{
        Material,
        MaterialTable,
    },
    tile::{
        MIN_BASE_HEIGHT,
        MAX_BASE_HEIGHT,
        MAX_RAMP_HEIGHT,
        TileShape,
        BlendMode,
        Tile,
    },
};
use std::{
    fmt::Write,
    fs,
    path::{
        Path,
        PathBuf,
    },
    str::FromStr,
};
use vek::*;


/// The only file format version this crate reads and writes.
pub const PFMAP_VERSION: f32 = 1.0;

/// Conventional file extension of map files, without the dot.
pub const PFMAP_EXTENSION: &str = "pfmap";


/// New geometry and side material for a tile.
///
/// `None` fields leave the tile's current value in place.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TileEdit {
    pub shape: TileShape,
    pub base_height: i32,
    pub ramp_height: i32,
    pub side_material: Option<usize>,
    pub blend_mode: Option<BlendMode>,
    pub blend_normals: Option<bool>,
}

impl TileEdit {
    /// Make the tile flat at `height`.
    pub fn flat(height: i32) -> Self {
        TileEdit::shaped(TileShape::Flat, height, 0)
    }

    pub fn shaped(shape: TileShape, base_height: i32, ramp_height: i32) -> Self {
        TileEdit {
            shape,
            base_height,
            ramp_height,
            side_material: None,
            blend_mode: None,
            blend_normals: None,
        }
    }
}


/// Fails unless the heights can be stored in the file format.
pub(crate) fn check_heights(gtc: Vec2<i64>, base_height: i32, ramp_height: i32) -> Result<()> {
    ensure!(
        (MIN_BASE_HEIGHT..=MAX_BASE_HEIGHT).contains(&base_height),
        HeightRange, None, "base height {} at {:?}", base_height, gtc,
    );
    ensure!(
        (0..=MAX_RAMP_HEIGHT).contains(&ramp_height),
        HeightRange, None, "ramp height {} at {:?}", ramp_height, gtc,
    );
    Ok(())
}


/// A finite grid of `chunk_rows` by `chunk_cols` chunks, and the material
/// table their tiles index into.
///
/// Chunk coordinates range over `<0..chunk_cols, 0..chunk_rows>`. Global
/// tile coordinates range over `<0..tile_cols, 0..tile_rows>`.
#[derive(Debug, Clone)]
pub struct Map {
    chunk_rows: usize,
    chunk_cols: usize,
    // row-major
    chunks: Vec<Chunk>,
    materials: MaterialTable,
    path: Option<PathBuf>,
}

impl Map {
    /// Blank map: every tile flat at height 0, default materials, no
    /// backing file.
    ///
    /// Panics if either dimension is 0.
    pub fn new(chunk_rows: usize, chunk_cols: usize) -> Self {
        assert!(chunk_rows > 0 && chunk_cols > 0, "map must have at least 1 chunk");
        Map {
            chunk_rows,
            chunk_cols,
            chunks: vec![Chunk::default(); chunk_rows * chunk_cols],
            materials: MaterialTable::with_defaults(),
            path: None,
        }
    }

    pub fn chunk_rows(&self) -> usize {
        self.chunk_rows
    }

    pub fn chunk_cols(&self) -> usize {
        self.chunk_cols
    }

    pub fn tile_rows(&self) -> i64 {
        self.chunk_rows as i64 * CHUNK_EXTENT.y
    }

    pub fn tile_cols(&self) -> i64 {
        self.chunk_cols as i64 * CHUNK_EXTENT.x
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// File this map was loaded from or last saved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains_cc(&self, cc: Vec2<i64>) -> bool {
        cc.x >= 0 && cc.y >= 0
            && cc.x < self.chunk_cols as i64
            && cc.y < self.chunk_rows as i64
    }

    pub fn contains_gtc(&self, gtc: Vec2<i64>) -> bool {
        gtc.x >= 0 && gtc.y >= 0
            && gtc.x < self.tile_cols()
            && gtc.y < self.tile_rows()
    }

    fn chunk_idx(&self, cc: Vec2<i64>) -> Option<usize> {
        if self.contains_cc(cc) {
            Some(cc.y as usize * self.chunk_cols + cc.x as usize)
        } else {
            None
        }
    }

    pub fn chunk(&self, cc: Vec2<i64>) -> Option<&Chunk> {
        self.chunk_idx(cc).map(|i| &self.chunks[i])
    }

    /// Iterate chunks with their ccs, in row-major order.
    pub fn chunks(&self) -> impl Iterator<Item=(Vec2<i64>, &Chunk)> + '_ {
        self.chunks.iter().enumerate().map(move |(i, chunk)| {
            let cc = Vec2::new((i % self.chunk_cols) as i64, (i / self.chunk_cols) as i64);
            (cc, chunk)
        })
    }

    /// Iterate every tile in the map, chunk by chunk.
    pub fn tiles(&self) -> impl Iterator<Item=(TileCoords, &Tile)> + '_ {
        self.chunks()
            .flat_map(|(cc, chunk)| chunk.iter()
                .map(move |(ltc, tile)| (TileCoords { cc, ltc }, tile)))
    }

    /// Coordinates of the tile `offset` tiles away from `origin`, or `None`
    /// if that falls outside the map. There is no wraparound.
    pub fn relative_tile_coords(
        &self,
        origin: TileCoords,
        offset: Vec2<i64>,
    ) -> Option<TileCoords> {
        let gtc = origin.gtc() + offset;
        if self.contains_gtc(gtc) {
            Some(TileCoords::from_gtc(gtc))
        } else {
            None
        }
    }

    /// Panics if `coords` is not within this map.
    pub fn tile_at(&self, coords: TileCoords) -> &Tile {
        match self.chunk(coords.cc) {
            Some(chunk) => &chunk[coords.ltc],
            None => panic!("tile coords {:?} outside of map", coords),
        }
    }

    fn tile_at_mut(&mut self, coords: TileCoords) -> &mut Tile {
        match self.chunk_idx(coords.cc) {
            Some(i) => &mut self.chunks[i][coords.ltc],
            None => panic!("tile coords {:?} outside of map", coords),
        }
    }

    pub fn tile_at_gtc(&self, gtc: Vec2<i64>) -> Option<&Tile> {
        if self.contains_gtc(gtc) {
            Some(self.tile_at(TileCoords::from_gtc(gtc)))
        } else {
            None
        }
    }

    pub fn relative_tile(&self, origin: TileCoords, offset: Vec2<i64>) -> Option<&Tile> {
        self.relative_tile_coords(origin, offset).map(|coords| self.tile_at(coords))
    }

    /// Resolve a tile's top and side materials.
    pub fn tile_materials(&self, coords: TileCoords) -> Result<(&Material, &Material)> {
        let tile = self.tile_at(coords);
        Ok((self.material(tile.top_material)?, self.material(tile.side_material)?))
    }

    fn material(&self, i: usize) -> Result<&Material> {
        self.materials.get(i)
            .ok_or_else(|| err!(
                MaterialIndex, None,
                "material {} not in table of {}", i, self.materials.len(),
            ))
    }

    /// Replace a tile's geometry, and optionally its side material and
    /// blending, then push it to `engine`.
    ///
    /// Panics if `coords` is not within this map. Fails, leaving the tile
    /// untouched, if the side material does not resolve or the heights
    /// cannot be saved.
    pub fn update_tile<E: Engine>(
        &mut self,
        coords: TileCoords,
        edit: TileEdit,
        mut engine: E,
    ) -> Result<()> {
        check_heights(coords.gtc(), edit.base_height, edit.ramp_height)?;
        if let Some(side_material) = edit.side_material {
            self.material(side_material)?;
        }

        let tile = self.tile_at_mut(coords);
        tile.shape = edit.shape;
        tile.base_height = edit.base_height;
        tile.ramp_height = edit.ramp_height;
        if let Some(side_material) = edit.side_material {
            tile.side_material = side_material;
        }
        if let Some(blend_mode) = edit.blend_mode {
            tile.blend_mode = blend_mode;
        }
        if let Some(blend_normals) = edit.blend_normals {
            tile.blend_normals = blend_normals;
        }
        let tile = *tile;

        trace!(gtc = ?coords.gtc(), ?tile, "updated tile");
        engine.push_tile(coords.cc, coords.ltc, &tile);
        Ok(())
    }

    /// Replace a tile's top material and blending, then push it to `engine`.
    pub fn update_tile_material<E: Engine>(
        &mut self,
        coords: TileCoords,
        top_material: usize,
        blend_mode: BlendMode,
        blend_normals: bool,
        mut engine: E,
    ) -> Result<()> {
        self.material(top_material)?;

        let tile = self.tile_at_mut(coords);
        tile.top_material = top_material;
        tile.blend_mode = blend_mode;
        tile.blend_normals = blend_normals;
        let tile = *tile;

        trace!(gtc = ?coords.gtc(), top_material, "updated tile material");
        engine.push_tile(coords.cc, coords.ltc, &tile);
        Ok(())
    }

    /// Add a material to the table, returning its index. If a material with
    /// the same texture is already present, returns that one's index.
    pub fn add_material(&mut self, material: Material) -> Result<usize> {
        let i = self.materials.push(material)?;
        debug!(i, "added material");
        Ok(i)
    }

    /// Push a chunk's material block to `engine`. Panics if `cc` is not
    /// within this map.
    pub fn push_chunk_materials<E: Engine>(&self, cc: Vec2<i64>, mut engine: E) {
        match self.chunk(cc) {
            Some(chunk) => engine.push_chunk_materials(cc, &chunk.materials_block(&self.materials)),
            None => panic!("chunk coords {:?} outside of map", cc),
        }
    }

    /// Terrain surface height at a world-space position, in world units.
    ///
    /// World space has its origin at the map's north-west corner, with `x`
    /// growing eastwards along columns and `z` southwards along rows.
    /// Returns `None` outside the map.
    pub fn height_at_point(&self, x: f32, z: f32) -> Option<f32> {
        let col = x / X_COORDS_PER_TILE;
        let row = z / Z_COORDS_PER_TILE;
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let gtc = Vec2::new(col.floor() as i64, row.floor() as i64);
        let tile = self.tile_at_gtc(gtc)?;
        Some(tile.height_at(col.fract(), row.fract()) * Y_COORDS_PER_TILE)
    }

    /// Append this map in the file format.
    pub fn write_pfmap(&self, buf: &mut String) {
        writeln!(buf, "version {:.1}", PFMAP_VERSION).unwrap();
        writeln!(buf, "num_materials {}", self.materials.len()).unwrap();
        writeln!(buf, "num_rows {}", self.chunk_rows).unwrap();
        writeln!(buf, "num_cols {}", self.chunk_cols).unwrap();
        self.materials.write_pfmap(buf);
        for chunk in &self.chunks {
            chunk.write_pfmap(buf);
        }
    }

    pub fn to_pfmap_string(&self) -> String {
        let mut buf = String::new();
        self.write_pfmap(&mut buf);
        buf
    }

    /// Parse a map from the file format. The result has no backing path.
    ///
    /// Either the whole text is valid and yields a complete map, or this
    /// fails.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = LineCursor::new(text);
        let header = Header::parse(&mut lines)?;

        let mut declared = Vec::new();
        for _ in 0..header.num_materials {
            let (line_num, line) = match lines.next_line() {
                Some(next) => next,
                None => bail!(
                    MalformedData, Some(lines.line_num()),
                    "material list truncated after {} of {}", declared.len(), header.num_materials,
                ),
            };
            declared.push(Material::parse_pfmap_line(line).map_err(|e| e.at_line(line_num))?);
        }
        let materials = MaterialTable::from_declared(declared)?;

        let mut chunks = Vec::new();
        for _ in 0..header.num_rows * header.num_cols {
            chunks.push(Chunk::parse_pfmap(&mut lines)?);
        }
        if let Some((line_num, line)) = lines.next_line() {
            bail!(MalformedData, Some(line_num), "trailing data {:?}", line);
        }

        let map = Map {
            chunk_rows: header.num_rows,
            chunk_cols: header.num_cols,
            chunks,
            materials,
            path: None,
        };
        map.validate_material_indices()?;
        Ok(map)
    }

    fn validate_material_indices(&self) -> Result<()> {
        for (coords, tile) in self.tiles() {
            for i in [tile.top_material, tile.side_material] {
                ensure!(
                    self.materials.contains_index(i),
                    MaterialIndex, None,
                    "tile {:?} references material {}, table has {}",
                    coords.gtc(), i, self.materials.len(),
                );
            }
        }
        Ok(())
    }

    /// Read and parse a map file. The result is backed by `path`.
    pub fn try_read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut map = Map::parse(&text)?;
        map.path = Some(path.to_owned());
        Ok(map)
    }

    /// Read and parse a map file, logging and returning `None` on failure.
    pub fn read<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        match Map::try_read(path) {
            Ok(map) => {
                info!(
                    ?path,
                    rows = map.chunk_rows,
                    cols = map.chunk_cols,
                    materials = map.materials.len(),
                    "loaded map",
                );
                Some(map)
            }
            Err(e) => {
                error!(%e, ?path, "failed to load map");
                None
            }
        }
    }

    /// Write to the backing path. Fails if there is none.
    pub fn save(&self) -> Result<()> {
        match self.path {
            Some(ref path) => self.write_file(path),
            None => bail!(NoPath, None, "use save_as to choose a path"),
        }
    }

    /// Write to `path`, and make it the backing path if that succeeds.
    pub fn save_as<P: Into<PathBuf>>(&mut self, path: P) -> Result<()> {
        let path = path.into();
        self.write_file(&path)?;
        self.path = Some(path);
        Ok(())
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_pfmap_string())
            .map_err(|e| {
                error!(%e, ?path, "failed to save map");
                Error::from(e)
            })?;
        debug!(?path, "saved map");
        Ok(())
    }
}

/// Compares dimensions, materials and tiles. The backing path is ignored.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.chunk_rows == other.chunk_rows
            && self.chunk_cols == other.chunk_cols
            && self.materials == other.materials
            && self.chunks == other.chunks
    }
}

impl Eq for Map {}

impl FromStr for Map {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Map::parse(s)
    }
}


struct Header {
    num_materials: usize,
    num_rows: usize,
    num_cols: usize,
}

const HEADER_KEYS: [&str; 4] = ["version", "num_materials", "num_rows", "num_cols"];

impl Header {
    fn parse(lines: &mut LineCursor) -> Result<Self> {
        let mut values: [Option<(usize, &str)>; 4] = [None; 4];

        for _ in 0..HEADER_KEYS.len() {
            let (line_num, line) = match lines.next_line() {
                Some(next) => next,
                None => bail!(MalformedData, Some(lines.line_num()), "header truncated"),
            };
            let mut tokens = line.split_whitespace();
            let (key, value) = match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(key), Some(value), None) => (key, value),
                _ => bail!(MalformedData, Some(line_num), "expected `<key> <value>`, got {:?}", line),
            };
            let slot = match HEADER_KEYS.iter().position(|&k| k == key) {
                Some(i) => &mut values[i],
                None => bail!(MalformedData, Some(line_num), "unknown header key {:?}", key),
            };
            ensure!(slot.is_none(), MalformedData, Some(line_num), "duplicate header key {:?}", key);
            *slot = Some((line_num, value));
        }

        // all 4 slots are filled, as 4 lines were read without duplicates
        let [version, num_materials, num_rows, num_cols] = values.map(|v| v.unwrap_or((0, "")));

        // compared as written, so "1" or "1.00" are not taken for "1.0"
        let (line_num, value) = version;
        let expected = format!("{:.1}", PFMAP_VERSION);
        ensure!(
            value == expected,
            UnsupportedVersion, Some(line_num), "version {:?}, expected {}", value, expected,
        );

        let header = Header {
            num_materials: parse_count("num_materials", num_materials)?,
            num_rows: parse_count("num_rows", num_rows)?,
            num_cols: parse_count("num_cols", num_cols)?,
        };
        ensure!(
            header.num_rows > 0 && header.num_cols > 0,
            MalformedData, Some(lines.line_num()),
            "map of {}x{} chunks is empty", header.num_rows, header.num_cols,
        );
        Ok(header)
    }
}

fn parse_count(key: &str, (line_num, value): (usize, &str)) -> Result<usize> {
    value.parse()
        .map_err(|_| err!(MalformedData, Some(line_num), "{} {:?} is not a count", key, value))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::{
            NullEngine,
            RecordingEngine,
        },
        error::ErrorKind,
        coord::{
            NUM_LTIS,
            lti_to_ltc,
        },
    };

    fn header(version: &str, rows: usize, cols: usize) -> String {
        format!("version {}\nnum_materials 0\nnum_rows {}\nnum_cols {}\n", version, rows, cols)
    }

    #[test]
    fn test_blank_map() {
        let map = Map::new(2, 3);
        assert_eq!(map.tile_rows(), 64);
        assert_eq!(map.tile_cols(), 96);
        assert_eq!(map.materials(), &MaterialTable::with_defaults());
        assert_eq!(map.tiles().count(), 6 * NUM_LTIS);
        assert!(map.tiles().all(|(_, tile)| *tile == Tile::default()));
    }

    #[test]
    fn test_header_written_canonically() {
        let text = Map::new(1, 2).to_pfmap_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("version 1.0"));
        assert_eq!(lines.next(), Some("num_materials 3"));
        assert_eq!(lines.next(), Some("num_rows 1"));
        assert_eq!(lines.next(), Some("num_cols 2"));
        assert_eq!(lines.next(), Some("material Grass grass.png"));
    }

    #[test]
    fn test_header_any_order() {
        let text = Map::new(1, 1).to_pfmap_string();
        let reordered = text.replacen(
            "version 1.0\nnum_materials 3\nnum_rows 1\nnum_cols 1\n",
            "num_cols 1\n\nnum_rows 1\nversion 1.0\nnum_materials 3\n",
            1,
        );
        assert_eq!(reordered.parse::<Map>().unwrap(), Map::new(1, 1));
    }

    #[test]
    fn test_header_rejects() {
        let chunk = Map::new(1, 1).to_pfmap_string().lines().skip(7).collect::<Vec<_>>().join("\n");

        let cases = [
            (header("2.0", 1, 1), ErrorKind::UnsupportedVersion),
            (header("one", 1, 1), ErrorKind::UnsupportedVersion),
            (header("1", 1, 1), ErrorKind::UnsupportedVersion),
            (header("1.00", 1, 1), ErrorKind::UnsupportedVersion),
            (header("1e0", 1, 1), ErrorKind::UnsupportedVersion),
            (header("1.0", 0, 1), ErrorKind::MalformedData),
            (header("1.0", 1, 1).replace("num_cols", "num_rows"), ErrorKind::MalformedData),
            (header("1.0", 1, 1).replace("num_cols", "num_colz"), ErrorKind::MalformedData),
            (header("1.0", 1, 1).replace("num_rows 1", "num_rows 1 2"), ErrorKind::MalformedData),
            (header("1.0", 1, 1).replace("num_rows 1", "num_rows -1"), ErrorKind::MalformedData),
        ];
        for (head, kind) in cases {
            let text = format!("{}{}", head, chunk);
            assert_eq!(text.parse::<Map>().unwrap_err().kind(), kind, "{}", head);
        }

        // sanity check the fixture
        format!("{}{}", header("1.0", 1, 1), chunk).parse::<Map>().unwrap();
    }

    #[test]
    fn test_trailing_data() {
        let mut text = Map::new(1, 1).to_pfmap_string();
        text.push_str("\n\nmaterial Extra extra.png\n");
        let e = text.parse::<Map>().unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MalformedData);
        assert_eq!(e.line(), Some(7 + NUM_LTIS / 4 + 3));
    }

    #[test]
    fn test_material_index_validated_on_load() {
        let mut text = Map::new(1, 1).to_pfmap_string();
        let last = text.rfind("0+0000000001").unwrap();
        text.replace_range(last..last + 12, "0+0000000005");
        let e = text.parse::<Map>().unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MaterialIndex);
    }

    #[test]
    fn test_relative_tile_coords_boundary() {
        let map = Map::new(1, 2);
        let origin = TileCoords::from_gtc(Vec2::new(31, 0));

        assert_eq!(
            map.relative_tile_coords(origin, Vec2::new(1, 0)),
            Some(TileCoords::new(Vec2::new(1, 0), Vec2::new(0, 0))),
        );
        for offset in [
            Vec2::new(0, -1),
            Vec2::new(-32, 0),
            Vec2::new(33, 0),
            Vec2::new(0, 32),
            Vec2::new(-100, -100),
        ] {
            assert_eq!(map.relative_tile_coords(origin, offset), None, "{:?}", offset);
            assert_eq!(map.relative_tile(origin, offset), None);
        }
        assert!(map.relative_tile(origin, Vec2::new(32, 31)).is_some());
    }

    #[test]
    fn test_update_tile_pushes() {
        let mut map = Map::new(1, 1);
        let mut engine = RecordingEngine::default();
        let coords = TileCoords::from_gtc(Vec2::new(3, 4));
        let edit = TileEdit {
            side_material: Some(2),
            blend_mode: Some(BlendMode::NoBlend),
            ..TileEdit::shaped(TileShape::RampNS, -1, 2)
        };
        map.update_tile(coords, edit, &mut engine).unwrap();

        let tile = *map.tile_at(coords);
        assert_eq!(tile.shape, TileShape::RampNS);
        assert_eq!(tile.base_height, -1);
        assert_eq!(tile.ramp_height, 2);
        assert_eq!(tile.side_material, 2);
        assert_eq!(tile.blend_mode, BlendMode::NoBlend);
        assert_eq!(tile.top_material, 0);
        assert!(tile.blend_normals);
        assert_eq!(engine.pushed, [(coords, tile)]);
    }

    #[test]
    fn test_update_tile_rejects() {
        let mut map = Map::new(1, 1);
        let mut engine = RecordingEngine::default();
        let coords = TileCoords::from_gtc(Vec2::new(0, 0));

        let edit = TileEdit { side_material: Some(3), ..TileEdit::flat(1) };
        let e = map.update_tile(coords, edit, &mut engine).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MaterialIndex);

        let e = map.update_tile(coords, TileEdit::flat(100), &mut engine).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::HeightRange);

        let e = map.update_tile(coords, TileEdit::shaped(TileShape::RampSN, 0, -2), &mut engine)
            .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::HeightRange);

        let e = map.update_tile_material(coords, 7, BlendMode::Blur, true, &mut engine).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MaterialIndex);

        assert_eq!(*map.tile_at(coords), Tile::default());
        assert!(engine.pushed.is_empty());
    }

    #[test]
    fn test_tile_materials() {
        let mut map = Map::new(1, 1);
        let snow = map.add_material(Material::new("Snow", "snow.png").unwrap()).unwrap();
        let coords = TileCoords::from_gtc(Vec2::new(9, 9));
        map.update_tile_material(coords, snow, BlendMode::Blur, false, NullEngine).unwrap();

        let (top, side) = map.tile_materials(coords).unwrap();
        assert_eq!(top.name(), "Snow");
        assert_eq!(side.name(), "Cliffs");
    }

    #[test]
    fn test_height_at_point() {
        let mut map = Map::new(1, 1);
        let coords = TileCoords::from_gtc(Vec2::new(1, 2));
        map.update_tile(coords, TileEdit::shaped(TileShape::RampWE, 1, 2), &mut RecordingEngine::default())
            .unwrap();

        let x = 1.5 * X_COORDS_PER_TILE;
        let z = 2.5 * Z_COORDS_PER_TILE;
        assert_eq!(map.height_at_point(x, z), Some(2.0 * Y_COORDS_PER_TILE));
        assert_eq!(map.height_at_point(0.0, 0.0), Some(0.0));
        assert_eq!(map.height_at_point(-1.0, 0.0), None);
        assert_eq!(map.height_at_point(0.0, 32.0 * Z_COORDS_PER_TILE), None);
    }

    #[test]
    fn test_push_chunk_materials() {
        let map = Map::new(1, 2);
        let mut engine = RecordingEngine::default();
        map.push_chunk_materials(Vec2::new(1, 0), &mut engine);
        assert_eq!(
            engine.pushed_chunk_materials,
            [(Vec2::new(1, 0), "chunk_materials 2\nmaterial Grass grass.png\nmaterial Cliffs cliffs.png\n".to_owned())],
        );
    }

    #[test]
    fn test_save_without_path() {
        let map = Map::new(1, 1);
        assert_eq!(map.save().unwrap_err().kind(), ErrorKind::NoPath);
    }

    #[test]
    fn test_lti_order_matches_file_order() {
        let mut map = Map::new(1, 1);
        let coords = TileCoords::new(Vec2::new(0, 0), lti_to_ltc(5));
        map.update_tile(coords, TileEdit::flat(-4), &mut RecordingEngine::default()).unwrap();
        let text = map.to_pfmap_string();
        let first_block_line = text.lines().nth(8).unwrap();
        assert_eq!(first_block_line.split(' ').nth(1), Some("0-0400000001111000000000"));
    }
}
