//! Fixed-size blocks of tiles.

use crate::{
    coord::{
        NUM_LTIS,
        ltc_to_lti,
        lti_to_ltc,
    },
    error::{
        Result,
        bail,
        ensure,
    },
    material::MaterialTable,
    tile::Tile,
    tile_codec::{
        TILE_RECORD_LEN,
        encode_tile,
        decode_tile,
    },
};
use std::{
    collections::BTreeSet,
    fmt::Write,
    ops::{
        Index,
        IndexMut,
    },
};
use vek::*;


/// Tile records per line when writing.
const RECORDS_PER_LINE: usize = 4;


/// `TILES_PER_CHUNK_ROWS` by `TILES_PER_CHUNK_COLS` tiles, stored row-major.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chunk {
    tiles: Vec<Tile>,
}

impl Default for Chunk {
    fn default() -> Self {
        Chunk {
            tiles: vec![Tile::default(); NUM_LTIS],
        }
    }
}

impl Index<Vec2<u16>> for Chunk {
    type Output = Tile;

    fn index(&self, ltc: Vec2<u16>) -> &Tile {
        &self.tiles[ltc_to_lti(ltc)]
    }
}

impl IndexMut<Vec2<u16>> for Chunk {
    fn index_mut(&mut self, ltc: Vec2<u16>) -> &mut Tile {
        &mut self.tiles[ltc_to_lti(ltc)]
    }
}

impl Chunk {
    /// Iterate tiles with their ltcs, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item=(Vec2<u16>, &Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(lti, tile)| (lti_to_ltc(lti), tile))
    }

    /// Sorted material indices referenced by any tile, top or side.
    pub fn used_materials(&self) -> Vec<usize> {
        self.tiles.iter()
            .flat_map(|tile| [tile.top_material, tile.side_material])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Render the per-chunk material block the renderer takes when a
    /// chunk's material assignment changes: a `chunk_materials <n>` line
    /// followed by one `material` line per used material.
    ///
    /// Indices which do not resolve in `materials` are skipped.
    pub fn materials_block(&self, materials: &MaterialTable) -> String {
        let used = self.used_materials()
            .into_iter()
            .filter_map(|i| materials.get(i))
            .collect::<Vec<_>>();
        let mut buf = String::new();
        writeln!(buf, "chunk_materials {}", used.len()).unwrap();
        for material in used {
            writeln!(buf, "material {} {}", material.name(), material.texture()).unwrap();
        }
        buf
    }

    /// Append this chunk's tile block, `RECORDS_PER_LINE` records per line.
    pub fn write_pfmap(&self, buf: &mut String) {
        buf.reserve(NUM_LTIS * (TILE_RECORD_LEN + 1));
        for (lti, tile) in self.tiles.iter().enumerate() {
            encode_tile(tile, buf);
            if (lti + 1) % RECORDS_PER_LINE == 0 || lti + 1 == NUM_LTIS {
                buf.push('\n');
            } else {
                buf.push(' ');
            }
        }
    }

    /// Parse one tile block, consuming exactly as many lines as needed.
    ///
    /// Records may be wrapped arbitrarily, but a block always ends at the
    /// end of a line.
    pub(crate) fn parse_pfmap(lines: &mut LineCursor) -> Result<Self> {
        let mut tiles = Vec::with_capacity(NUM_LTIS);
        while tiles.len() < NUM_LTIS {
            let (line_num, line) = match lines.next_line() {
                Some(next) => next,
                None => bail!(
                    MalformedData, Some(lines.line_num()),
                    "chunk block truncated after {} of {} tiles", tiles.len(), NUM_LTIS,
                ),
            };
            for token in line.split_whitespace() {
                ensure!(
                    tiles.len() < NUM_LTIS,
                    MalformedData, Some(line_num), "tile record {:?} past end of chunk block", token,
                );
                tiles.push(decode_tile(token).map_err(|e| e.at_line(line_num))?);
            }
        }
        Ok(Chunk { tiles })
    }
}


/// Iterates the non-blank lines of a text along with their 1-based line
/// numbers.
pub(crate) struct LineCursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line_num: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        LineCursor {
            lines: text.lines().enumerate(),
            line_num: 0,
        }
    }

    pub(crate) fn next_line(&mut self) -> Option<(usize, &'a str)> {
        for (i, line) in &mut self.lines {
            self.line_num = i + 1;
            if !line.trim().is_empty() {
                return Some((self.line_num, line));
            }
        }
        None
    }

    /// Number of the last line read, or 0 before the first.
    pub(crate) fn line_num(&self) -> usize {
        self.line_num
    }
}
