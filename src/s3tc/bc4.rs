// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use arrayvec::ArrayVec;
use bitvec::prelude::*;

use crate::blocktexture::{decode_blocks, Block, Tile};
use crate::dimensions::Dimensions;
use crate::error::TextureResult;
use crate::format::{DecodeOptions, TextureDecoder};
use crate::texture::GrayTexture;

/// The eight intensities a BC4 block can select from
pub type Palette = ArrayVec<u8, 8>;

/// Build the palette for a pair of endpoints.
///
/// If `endpoint0 > endpoint1` the six remaining entries are interpolated between them in sevenths.
/// Otherwise four entries are interpolated in fifths and the last two are 0 and 255.
/// Interpolated values are truncated, not rounded.
pub fn palette(endpoint0: u8, endpoint1: u8) -> Palette {
    let (e0, e1) = (endpoint0 as u16, endpoint1 as u16);
    let mut palette = Palette::new();
    palette.push(endpoint0);
    palette.push(endpoint1);

    if endpoint0 > endpoint1 {
        palette.extend((1..=6).map(|k| ((e0 * (7 - k) + e1 * k) / 7) as u8));
    } else {
        palette.extend((1..=4).map(|k| ((e0 * (5 - k) + e1 * k) / 5) as u8));
        palette.push(u8::MIN);
        palette.push(u8::MAX);
    }

    palette
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC4Block {
    endpoints: [u8; 2],
    /// 3-bit palette index for each pixel, row-major
    codes: [u8; 16],
}

impl BC4Block {
    /// Codes are masked to their low 3 bits
    pub fn new(endpoints: [u8; 2], codes: [u8; 16]) -> Self {
        Self {
            endpoints,
            codes: codes.map(|c| c & 0b111),
        }
    }

    pub fn endpoints(&self) -> [u8; 2] {
        self.endpoints
    }

    pub fn codes(&self) -> [u8; 16] {
        self.codes
    }

    pub fn palette(&self) -> Palette {
        palette(self.endpoints[0], self.endpoints[1])
    }
}

impl Block for BC4Block {
    type Bytes = [u8; 8];
    const SIZE: usize = 8;

    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 8];
        let bits = bytes.view_bits_mut::<Lsb0>();

        // store endpoints
        bits[0..8].store_le(self.endpoints[0]);
        bits[8..16].store_le(self.endpoints[1]);

        // pixel i occupies bits 3i..3i+3 of a 48-bit little-endian integer
        let codes_packed = self
            .codes
            .iter()
            .rev()
            .fold(0u64, |packed, &code| (packed << 3) | code as u64);
        bits[16..].store_le(codes_packed);

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let bits = bytes.view_bits::<Lsb0>();

        // load endpoints
        let endpoint0: u8 = bits[0..8].load_le();
        let endpoint1: u8 = bits[8..16].load_le();

        // load codes
        let codes_packed: u64 = bits[16..].load_le();
        let codes = std::array::from_fn(|i| ((codes_packed >> (3 * i)) & 0b111) as u8);

        Self {
            endpoints: [endpoint0, endpoint1],
            codes,
        }
    }

    fn to_tile(&self) -> Tile {
        let palette = self.palette();
        std::array::from_fn(|row| {
            std::array::from_fn(|col| palette[self.codes[row * 4 + col] as usize])
        })
    }
}

/// Decode a single 8-byte BC4 block into a 4x4 tile
pub fn decode_block(bytes: &[u8]) -> TextureResult<Tile> {
    Ok(BC4Block::from_slice(bytes)?.to_tile())
}

/// Decoder for BC4 UNORM ("BC4U") surfaces
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BC4Unorm;

impl TextureDecoder for BC4Unorm {
    fn name(&self) -> &'static str {
        "BC4U"
    }

    fn block_size(&self) -> usize {
        BC4Block::SIZE
    }

    fn decode(
        &self,
        dimensions: Dimensions,
        data: &[u8],
        options: &DecodeOptions,
    ) -> TextureResult<GrayTexture> {
        decode_blocks::<BC4Block>(dimensions, data, options)
    }
}
