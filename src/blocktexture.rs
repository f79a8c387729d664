// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use itertools::Itertools;
use rayon::prelude::*;

use crate::dimensions::Dimensions;
use crate::error::{TextureError, TextureResult};
use crate::format::DecodeOptions;
use crate::texture::GrayTexture;

/// A decoded 4x4 block of single-channel pixels, row-major
pub type Tile = [[u8; 4]; 4];

pub trait Block: Sized {
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;
    // = [u8; 8], etc. Many thanks to @kornel@mastodon.social
    const SIZE: usize;
    const WIDTH: usize = 4;
    const HEIGHT: usize = 4;

    fn to_bytes(&self) -> Self::Bytes;
    fn from_bytes(bytes: &Self::Bytes) -> Self;
    fn to_tile(&self) -> Tile;

    /// Parse a block from a slice, which must be exactly [`Self::SIZE`] bytes long
    fn from_slice(bytes: &[u8]) -> TextureResult<Self> {
        let invalid = || TextureError::InvalidBlockSize {
            expected: Self::SIZE,
            actual: bytes.len(),
        };
        if bytes.len() != Self::SIZE {
            return Err(invalid());
        }
        let bytes = <Self::Bytes as TryFrom<&[u8]>>::try_from(bytes).map_err(|_| invalid())?;
        Ok(Self::from_bytes(&bytes))
    }
}

/// Order in which consecutive blocks are laid out over the image
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display, clap::ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum TileOrder {
    /// Fill a 4-pixel-wide column of tiles top to bottom, then move right
    #[default]
    ColumnMajor,
    /// Fill a 4-pixel-tall row of tiles left to right, then move down
    RowMajor,
}

impl TileOrder {
    /// The (tile column, tile row) of every tile, in decode order
    pub fn positions(self, tiles_wide: usize, tiles_high: usize) -> Vec<(usize, usize)> {
        match self {
            TileOrder::ColumnMajor => (0..tiles_wide).cartesian_product(0..tiles_high).collect_vec(),
            TileOrder::RowMajor => (0..tiles_high)
                .cartesian_product(0..tiles_wide)
                .map(|(row, col)| (col, row))
                .collect_vec(),
        }
    }
}

/// Decode a tightly packed run of `B` blocks covering `dimensions` and assemble them into a texture.
///
/// `data` may run past the last block; anything after it is ignored.
pub fn decode_blocks<B: Block>(
    dimensions: Dimensions,
    data: &[u8],
    options: &DecodeOptions,
) -> TextureResult<GrayTexture> {
    dimensions.check_aligned(B::WIDTH, B::HEIGHT)?;

    let tiles_wide = dimensions.width() as usize / B::WIDTH;
    let tiles_high = dimensions.height() as usize / B::HEIGHT;
    let needed = dimensions.pixels() / (B::WIDTH * B::HEIGHT) as u64 * B::SIZE as u64;
    if (data.len() as u64) < needed {
        return Err(TextureError::TruncatedInput {
            needed,
            actual: data.len() as u64,
        });
    }
    let data = &data[..needed as usize];

    tracing::debug!(
        blocks = tiles_wide * tiles_high,
        %dimensions,
        tile_order = %options.tile_order,
        parallel = options.parallel,
        "decoding blocks"
    );

    let tiles: Vec<Tile> = if options.parallel {
        data.par_chunks_exact(B::SIZE)
            .map(|chunk| B::from_slice(chunk).map(|block| block.to_tile()))
            .collect::<TextureResult<_>>()?
    } else {
        data.chunks_exact(B::SIZE)
            .map(|chunk| B::from_slice(chunk).map(|block| block.to_tile()))
            .collect::<TextureResult<_>>()?
    };

    let mut texture = GrayTexture::new(dimensions);
    for (tile, (col, row)) in tiles
        .iter()
        .zip(options.tile_order.positions(tiles_wide, tiles_high))
    {
        texture.blit(col * B::WIDTH, row * B::HEIGHT, tile);
    }

    Ok(texture)
}
