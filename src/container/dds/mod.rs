// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

use crate::container::ContainerHeader;
use crate::dimensions::Dimensioned;
use crate::error::{TextureError, TextureResult};
use crate::format::{DecodeOptions, Format};

pub use header::{Caps1, Caps2, DDSFlags, DDSHeader};
pub use pixel_format::{FourCC, PixelFormat, PixelFormatFlags};

mod header;
mod pixel_format;


/// Decode the contents of a DDS file using default options
pub fn read_texture(bytes: &[u8]) -> TextureResult {
    DDSHeader::read_texture(bytes)
}

pub fn read_texture_with(bytes: &[u8], options: &DecodeOptions) -> TextureResult {
    DDSHeader::read_texture_with(bytes, options)
}

/// Load and decode the DDS file at `path`
pub fn read_texture_file(path: impl AsRef<Path>, options: &DecodeOptions) -> TextureResult {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(TextureError::InputNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "read DDS file");
    read_texture_with(&bytes, options)
}

impl ContainerHeader for DDSHeader {
    fn parse(bytes: &[u8]) -> TextureResult<Self> {
        let header = DDSHeader::parse(bytes)?;
        tracing::debug!(
            dimensions = %header.dimensions(),
            four_cc = %header.four_cc(),
            dx10 = header.is_dx10(),
            data_offset = header.data_offset(),
            "parsed DDS header"
        );

        if let Some(mips) = header.mips().filter(|&m| m > 1) {
            tracing::warn!(mips, "file has a mip chain; only the top level is decoded");
        }
        if header.is_cubemap() {
            tracing::warn!("file is a cubemap; only the first face is decoded");
        }
        if header.is_volume() {
            tracing::warn!(
                depth = header.depth,
                "file is a volume texture; only the first slice is decoded"
            );
        }

        Ok(header)
    }

    fn validate(&self) -> TextureResult<()> {
        DDSHeader::validate(self)
    }

    fn format(&self) -> TextureResult<Format> {
        Format::try_from(self.four_cc())
    }

    fn data_offset(&self) -> usize {
        DDSHeader::data_offset(self)
    }
}
