// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::Debug;

use crate::dimensions::Dimensioned;
use crate::error::{TextureError, TextureResult};
use crate::format::{DecodeOptions, Format, TextureDecoder};
use crate::texture::GrayTexture;

pub mod dds;

/// A header for a texture container. Contains information about dimensions and texture format,
/// but does not contain any actual texture data.
pub trait ContainerHeader: Sized + Clone + Debug + Dimensioned {
    /// Parse the header from the start of a file's contents
    fn parse(bytes: &[u8]) -> TextureResult<Self>;

    /// Sanity-check fields that do not affect decoding
    fn validate(&self) -> TextureResult<()> {
        Ok(())
    }

    /// Get the texture format indicated by this container header
    fn format(&self) -> TextureResult<Format>;

    /// Offset from the start of the file to the first byte of surface data
    fn data_offset(&self) -> usize;

    /// Read a texture in this container type using default options. The header object is not exposed
    fn read_texture(bytes: &[u8]) -> TextureResult<GrayTexture> {
        Self::read_texture_with(bytes, &DecodeOptions::default())
    }

    /// Read a texture in this container type. The header object is not exposed
    fn read_texture_with(bytes: &[u8], options: &DecodeOptions) -> TextureResult<GrayTexture> {
        let header = Self::parse(bytes)?;
        if options.strict {
            header.validate()?;
        }
        header.to_texture(bytes, options)
    }

    /// Decode the surface described by this header out of the file contents it was parsed from
    fn to_texture(&self, bytes: &[u8], options: &DecodeOptions) -> TextureResult<GrayTexture> {
        let format = self.format()?;
        let data = bytes
            .get(self.data_offset()..)
            .ok_or(TextureError::TruncatedInput {
                needed: self.data_offset() as u64,
                actual: bytes.len() as u64,
            })?;
        format.decode(self.dimensions(), data, options)
    }
}
