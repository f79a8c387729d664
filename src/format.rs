// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use enum_dispatch::enum_dispatch;

use crate::blocktexture::TileOrder;
use crate::container::dds::FourCC;
use crate::dimensions::Dimensions;
use crate::error::{TextureError, TextureResult};
use crate::s3tc::bc4::BC4Unorm;
use crate::texture::GrayTexture;

/// Knobs for turning a container's surface data into a texture
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// How consecutive blocks are laid out over the image
    pub tile_order: TileOrder,
    /// Reject headers whose magic or size fields are wrong
    pub strict: bool,
    /// Decode blocks on the rayon thread pool
    pub parallel: bool,
}

#[enum_dispatch]
pub trait TextureDecoder {
    /// The FourCC this decoder handles
    fn name(&self) -> &'static str;

    /// Bytes per compressed block
    fn block_size(&self) -> usize;

    /// Decode a surface of `dimensions` from `data`, which starts at the first block
    fn decode(
        &self,
        dimensions: Dimensions,
        data: &[u8],
        options: &DecodeOptions,
    ) -> TextureResult<GrayTexture>;
}

/// Every surface format this crate can decode
#[enum_dispatch(TextureDecoder)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    BC4Unorm,
}

impl TryFrom<FourCC> for Format {
    type Error = TextureError;

    fn try_from(four_cc: FourCC) -> TextureResult<Self> {
        match four_cc {
            FourCC::BC4U => Ok(BC4Unorm.into()),
            other => Err(TextureError::UnsupportedFormat(other)),
        }
    }
}
