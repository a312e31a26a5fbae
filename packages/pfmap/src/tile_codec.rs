//! Fixed-width text records for single tiles.
//!
//! A record is 24 ASCII characters with no separators:
//!
//! | width | field                 |
//! |-------|-----------------------|
//! | 1     | shape code, hex digit |
//! | 1     | `+` or `-`            |
//! | 2     | `abs(base_height)`    |
//! | 2     | `ramp_height`         |
//! | 3     | `top_material`        |
//! | 3     | `side_material`       |
//! | 1     | `pathable`, 0 or 1    |
//! | 1     | blend mode code       |
//! | 1     | `blend_normals`, 0/1  |
//! | 9     | reserved, `0`s        |

use crate::{
    coord::MAX_MATERIALS,
    error::{
        Result,
        bail,
        ensure,
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
use std::fmt::Write;


/// Length of a tile record in bytes.
pub const TILE_RECORD_LEN: usize = 24;

const RESERVED: &str = "000000000";


/// Append the record for `tile` to `buf`.
///
/// Panics if any field is out of the range the format can hold. That can
/// only happen if the in-memory model has already been corrupted.
pub fn encode_tile(tile: &Tile, buf: &mut String) {
    assert!(
        (MIN_BASE_HEIGHT..=MAX_BASE_HEIGHT).contains(&tile.base_height),
        "tile base_height {} out of range", tile.base_height,
    );
    assert!(
        (0..=MAX_RAMP_HEIGHT).contains(&tile.ramp_height),
        "tile ramp_height {} out of range", tile.ramp_height,
    );
    assert!(
        tile.top_material < MAX_MATERIALS,
        "tile top_material {} out of range", tile.top_material,
    );
    assert!(
        tile.side_material < MAX_MATERIALS,
        "tile side_material {} out of range", tile.side_material,
    );

    let start = buf.len();
    write!(
        buf,
        "{:X}{}{:02}{:02}{:03}{:03}{}{}{}{}",
        tile.shape.code(),
        if tile.base_height < 0 { '-' } else { '+' },
        tile.base_height.unsigned_abs(),
        tile.ramp_height,
        tile.top_material,
        tile.side_material,
        tile.pathable as u8,
        tile.blend_mode.code(),
        tile.blend_normals as u8,
        RESERVED,
    ).unwrap();
    debug_assert_eq!(buf.len() - start, TILE_RECORD_LEN);
}

/// Encode `tile` as a fresh record string.
pub fn tile_to_record(tile: &Tile) -> String {
    let mut buf = String::with_capacity(TILE_RECORD_LEN);
    encode_tile(tile, &mut buf);
    buf
}

/// Parse a record.
///
/// Only the syntax is checked. Heights and material indices are accepted
/// as written, and whether the material indices resolve is up to the
/// consumer.
pub fn decode_tile(record: &str) -> Result<Tile> {
    ensure!(
        record.is_ascii(),
        MalformedData, None, "tile record {:?} is not ASCII", record,
    );
    ensure!(
        record.len() == TILE_RECORD_LEN,
        MalformedData, None,
        "tile record {:?} has length {}, expected {}", record, record.len(), TILE_RECORD_LEN,
    );
    let b = record.as_bytes();

    let shape = match (b[0] as char).to_digit(16) {
        Some(code) => TileShape::from_code(code as u8).unwrap_or_default(),
        None => bail!(MalformedData, None, "tile record {:?} has bad shape digit", record),
    };
    let sign = match b[1] {
        b'+' => 1,
        b'-' => -1,
        _ => bail!(MalformedData, None, "tile record {:?} has bad height sign", record),
    };
    let base_height = sign * decimal(record, 2..4)? as i32;
    let ramp_height = decimal(record, 4..6)? as i32;
    let top_material = decimal(record, 6..9)? as usize;
    let side_material = decimal(record, 9..12)? as usize;
    let pathable = flag(record, 12)?;
    let blend_mode = BlendMode::from_code(decimal(record, 13..14)? as u8);
    let blend_mode = match blend_mode {
        Some(blend_mode) => blend_mode,
        None => bail!(MalformedData, None, "tile record {:?} has bad blend mode", record),
    };
    let blend_normals = flag(record, 14)?;

    Ok(Tile {
        shape,
        base_height,
        ramp_height,
        top_material,
        side_material,
        pathable,
        blend_mode,
        blend_normals,
    })
}

fn decimal(record: &str, range: std::ops::Range<usize>) -> Result<u32> {
    let field = &record[range];
    ensure!(
        field.bytes().all(|c| c.is_ascii_digit()),
        MalformedData, None, "tile record {:?} has non-numeric field {:?}", record, field,
    );
    Ok(field.bytes().fold(0, |n, c| n * 10 + (c - b'0') as u32))
}

fn flag(record: &str, i: usize) -> Result<bool> {
    match record.as_bytes()[i] {
        b'0' => Ok(false),
        b'1' => Ok(true),
        _ => bail!(MalformedData, None, "tile record {:?} has bad flag at {}", record, i),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample() -> Tile {
        Tile {
            shape: TileShape::CornerConvexNE,
            base_height: -7,
            ramp_height: 12,
            top_material: 3,
            side_material: 998,
            pathable: false,
            blend_mode: BlendMode::NoBlend,
            blend_normals: true,
        }
    }

    #[test]
    fn test_encode_layout() {
        assert_eq!(tile_to_record(&sample()), "C-0712003998001000000000");
        assert_eq!(tile_to_record(&Tile::default()), "0+0000000001111000000000");
    }

    #[test]
    fn test_decode_inverts_encode() {
        let extremes = [
            Tile { base_height: MIN_BASE_HEIGHT, ramp_height: MAX_RAMP_HEIGHT, ..sample() },
            Tile { base_height: MAX_BASE_HEIGHT, ramp_height: 0, ..sample() },
            Tile { shape: TileShape::Reserved15, ..Tile::default() },
            sample(),
            Tile::default(),
        ];
        for tile in extremes {
            let record = tile_to_record(&tile);
            assert_eq!(record.len(), TILE_RECORD_LEN);
            assert_eq!(decode_tile(&record).unwrap(), tile);
        }
    }

    #[test]
    fn test_decode_lowercase_hex() {
        let tile = decode_tile("c-0712003998001000000000").unwrap();
        assert_eq!(tile.shape, TileShape::CornerConvexNE);
    }

    #[test]
    fn test_decode_ignores_padding() {
        let tile = decode_tile("0+0000000001111123456789").unwrap();
        assert_eq!(tile, Tile::default());
    }

    #[test]
    fn test_decode_does_not_range_check() {
        let tile = decode_tile("0+0000500501111000000000").unwrap();
        assert_eq!(tile.top_material, 500);
        assert_eq!(tile.side_material, 501);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let bad = [
            "",
            "0+000000000111100000000",
            "0+00000000011110000000000",
            "G+0000000001111000000000",
            "0*0000000001111000000000",
            "0+0a00000001111000000000",
            "0+00000 0001111000000000",
            "0+0000000001121000000000",
            "0+0000000001211000000000",
            "0+0000000001112000000000",
            "0+000000000111100000000é",
        ];
        for record in bad {
            let e = decode_tile(record).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::MalformedData, "{:?}", record);
        }
    }

    #[test]
    #[should_panic]
    fn test_encode_base_height_out_of_range() {
        tile_to_record(&Tile { base_height: 150, ..Tile::default() });
    }

    #[test]
    #[should_panic]
    fn test_encode_negative_ramp() {
        tile_to_record(&Tile { ramp_height: -1, ..Tile::default() });
    }

    #[test]
    #[should_panic]
    fn test_encode_material_out_of_range() {
        tile_to_record(&Tile { top_material: MAX_MATERIALS, ..Tile::default() });
    }
}
