// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;

use anyhow::Result;
use tempfile::tempdir;

use dds_bc4::blocktexture::{Block, Tile, TileOrder};
use dds_bc4::container::dds::{DDSHeader, FourCC};
use dds_bc4::dimensions::{Dimensioned, Dimensions};
use dds_bc4::error::TextureError;
use dds_bc4::format::DecodeOptions;
use dds_bc4::s3tc::bc4::{decode_block, BC4Block};
use dds_bc4::texture::GrayTexture;
use dds_bc4::*;

/// Assemble a DDS file from a header and a run of BC4 blocks
fn dds_file(header: DDSHeader, blocks: &[BC4Block]) -> Result<Vec<u8>> {
    let mut bytes = header.to_bytes()?;
    if header.is_dx10() {
        bytes.extend_from_slice(&[0; DDSHeader::DX10_LEN]);
    }
    for block in blocks {
        bytes.extend_from_slice(&block.to_bytes());
    }
    Ok(bytes)
}

/// Four distinct blocks, each in a different palette mode or with a different code pattern
fn quadrant_blocks() -> [BC4Block; 4] {
    [
        BC4Block::new([200, 100], [0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 5, 6, 7]),
        BC4Block::new([100, 200], [7; 16]),
        BC4Block::new([10, 250], [6, 2, 3, 4, 5, 1, 0, 7, 6, 2, 3, 4, 5, 1, 0, 7]),
        BC4Block::new([255, 0], [3; 16]),
    ]
}

fn tile_at(texture: &GrayTexture, x: u32, y: u32) -> Tile {
    std::array::from_fn(|r| {
        std::array::from_fn(|c| texture.get(x + c as u32, y + r as u32).unwrap())
    })
}

#[test]
/// An 8x8 file decodes to four quadrants placed column by column.
fn decode_8x8_column_major() -> Result<()> {
    let blocks = quadrant_blocks();
    let bytes = dds_file(DDSHeader::new(Dimensions::new(8, 8), FourCC::BC4U), &blocks)?;

    let texture = read_texture(&bytes)?;
    assert_eq!(texture.dimensions(), Dimensions::new(8, 8));
    assert_eq!(texture.as_bytes().len(), 64);

    let tiles: Vec<Tile> = blocks
        .iter()
        .map(|b| decode_block(&b.to_bytes()))
        .collect::<Result<_, _>>()?;

    assert_eq!(tile_at(&texture, 0, 0), tiles[0], "top left");
    assert_eq!(tile_at(&texture, 0, 4), tiles[1], "bottom left");
    assert_eq!(tile_at(&texture, 4, 0), tiles[2], "top right");
    assert_eq!(tile_at(&texture, 4, 4), tiles[3], "bottom right");
    Ok(())
}

#[test]
fn decode_8x8_row_major() -> Result<()> {
    let blocks = quadrant_blocks();
    let bytes = dds_file(DDSHeader::new(Dimensions::new(8, 8), FourCC::BC4U), &blocks)?;
    let options = DecodeOptions {
        tile_order: TileOrder::RowMajor,
        ..Default::default()
    };

    let texture = read_texture_with(&bytes, &options)?;
    assert_eq!(tile_at(&texture, 0, 0), blocks[0].to_tile(), "top left");
    assert_eq!(tile_at(&texture, 4, 0), blocks[1].to_tile(), "top right");
    assert_eq!(tile_at(&texture, 0, 4), blocks[2].to_tile(), "bottom left");
    assert_eq!(tile_at(&texture, 4, 4), blocks[3].to_tile(), "bottom right");
    Ok(())
}

#[test]
/// A non-square image: column-major walks down two tiles before moving right.
fn decode_non_square() -> Result<()> {
    let blocks: Vec<BC4Block> = (0..6u8)
        .map(|i| BC4Block::new([i * 40, i * 40], [0; 16]))
        .collect();
    let bytes = dds_file(DDSHeader::new(Dimensions::new(12, 8), FourCC::BC4U), &blocks)?;

    let texture = read_texture(&bytes)?;
    assert_eq!((texture.width(), texture.height()), (12, 8));
    for (i, (x, y)) in [(0, 0), (0, 4), (4, 0), (4, 4), (8, 0), (8, 4)].into_iter().enumerate() {
        assert_eq!(texture.get(x, y), Some(i as u8 * 40), "tile {i}");
        assert_eq!(texture.get(x + 3, y + 3), Some(i as u8 * 40), "tile {i}");
    }
    Ok(())
}

#[test]
fn parallel_decode_matches_sequential() -> Result<()> {
    let blocks: Vec<BC4Block> = (0..64u32)
        .map(|i| {
            let codes = std::array::from_fn(|p| ((i as usize + p) % 8) as u8);
            BC4Block::new([(i * 3) as u8, (255 - i * 2) as u8], codes)
        })
        .collect();
    let bytes = dds_file(DDSHeader::new(Dimensions::new(32, 32), FourCC::BC4U), &blocks)?;

    for tile_order in [TileOrder::ColumnMajor, TileOrder::RowMajor] {
        let sequential = DecodeOptions {
            tile_order,
            ..Default::default()
        };
        let parallel = DecodeOptions {
            parallel: true,
            ..sequential
        };
        assert_eq!(
            read_texture_with(&bytes, &sequential)?,
            read_texture_with(&bytes, &parallel)?,
            "{tile_order}"
        );
    }
    Ok(())
}

#[test]
fn trailing_data_is_ignored() -> Result<()> {
    let blocks = quadrant_blocks();
    let mut bytes = dds_file(DDSHeader::new(Dimensions::new(8, 8), FourCC::BC4U), &blocks)?;
    let expected = read_texture(&bytes)?;

    bytes.extend_from_slice(&[0xFF; 40]);
    assert_eq!(read_texture(&bytes)?, expected);
    Ok(())
}

#[test]
fn empty_surface() -> Result<()> {
    let bytes = dds_file(DDSHeader::new(Dimensions::new(0, 0), FourCC::BC4U), &[])?;
    let texture = read_texture(&bytes)?;
    assert!(texture.as_bytes().is_empty());
    Ok(())
}

#[test]
fn unsupported_format() -> Result<()> {
    let bytes = dds_file(
        DDSHeader::new(Dimensions::new(8, 8), FourCC(*b"BC1U")),
        &quadrant_blocks(),
    )?;

    match read_texture(&bytes) {
        Err(TextureError::UnsupportedFormat(four_cc)) => {
            assert_eq!(four_cc.to_string(), "BC1U")
        }
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
    Ok(())
}

#[test]
/// The DX10 header is detected and skipped, but its format is never interpreted.
fn dx10_is_unsupported() -> Result<()> {
    let header = DDSHeader::new(Dimensions::new(8, 8), FourCC::DX10);
    let bytes = dds_file(header, &quadrant_blocks())?;
    assert_eq!(DDSHeader::parse(&bytes)?.data_offset(), 148);

    assert!(matches!(
        read_texture(&bytes),
        Err(TextureError::UnsupportedFormat(FourCC::DX10))
    ));
    Ok(())
}

#[test]
fn truncated_header() {
    assert!(matches!(
        read_texture(&[0; 64]),
        Err(TextureError::TruncatedInput {
            needed: 128,
            actual: 64
        })
    ));
}

#[test]
fn truncated_blocks() -> Result<()> {
    let blocks = quadrant_blocks();
    let mut bytes = dds_file(DDSHeader::new(Dimensions::new(8, 8), FourCC::BC4U), &blocks)?;
    bytes.truncate(bytes.len() - 3);

    assert!(matches!(
        read_texture(&bytes),
        Err(TextureError::TruncatedInput {
            needed: 32,
            actual: 29
        })
    ));
    Ok(())
}

#[test]
fn unaligned_dimensions() -> Result<()> {
    let bytes = dds_file(
        DDSHeader::new(Dimensions::new(6, 8), FourCC::BC4U),
        &quadrant_blocks(),
    )?;
    assert!(matches!(
        read_texture(&bytes),
        Err(TextureError::BlockAlignment {
            width: 6,
            height: 8
        })
    ));
    Ok(())
}

#[test]
fn strict_mode_checks_magic() -> Result<()> {
    let mut header = DDSHeader::new(Dimensions::new(8, 8), FourCC::BC4U);
    header.magic = *b"XXXX";
    let bytes = dds_file(header, &quadrant_blocks())?;

    // the lenient default trusts the header
    assert!(read_texture(&bytes).is_ok());

    let strict = DecodeOptions {
        strict: true,
        ..Default::default()
    };
    assert!(matches!(
        read_texture_with(&bytes, &strict),
        Err(TextureError::MalformedHeader(_))
    ));
    Ok(())
}

#[test]
fn missing_file() -> Result<()> {
    let d = tempdir()?;

    let missing = d.path().join("missing.dds");
    assert!(matches!(
        read_texture_file(&missing, &DecodeOptions::default()),
        Err(TextureError::InputNotFound(path)) if path == missing
    ));

    // a directory is not a regular file either
    assert!(matches!(
        read_texture_file(d.path(), &DecodeOptions::default()),
        Err(TextureError::InputNotFound(_))
    ));
    Ok(())
}

#[test]
/// Decode from disk, save as PNG, and load the PNG back.
fn save_png() -> Result<()> {
    let d = tempdir()?;
    let input = d.path().join("texture.dds");
    let output = d.path().join("texture.png");

    let bytes = dds_file(
        DDSHeader::new(Dimensions::new(8, 8), FourCC::BC4U),
        &quadrant_blocks(),
    )?;
    fs::write(&input, bytes)?;

    let texture = read_texture_file(&input, &DecodeOptions::default())?;
    texture.save(&output)?;

    let reloaded = image::open(&output)?.into_luma8();
    assert_eq!(reloaded.dimensions(), (8, 8));
    assert_eq!(reloaded.into_raw(), texture.into_bytes());
    Ok(())
}
