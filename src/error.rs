// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::container::dds::FourCC;
use crate::texture::GrayTexture;

#[derive(Error, Diagnostic, Debug)]
pub enum TextureError {
    #[error("Input file not found: {}", .0.display())]
    #[diagnostic(code(dds_bc4::input_not_found), help("check that the path names a regular file"))]
    InputNotFound(PathBuf),

    #[error("Truncated input: needed {needed} bytes but only {actual} are available")]
    #[diagnostic(code(dds_bc4::truncated_input))]
    TruncatedInput { needed: u64, actual: u64 },

    #[error("Malformed header: {0}")]
    #[diagnostic(code(dds_bc4::malformed_header))]
    MalformedHeader(String),

    #[error("Unsupported format: '{0}'")]
    #[diagnostic(code(dds_bc4::unsupported_format), help("only BC4U textures can be decoded"))]
    UnsupportedFormat(FourCC),

    #[error("Dimensions {width}x{height} are not a multiple of the 4x4 block size")]
    #[diagnostic(code(dds_bc4::block_alignment))]
    BlockAlignment { width: u32, height: u32 },

    #[error("Invalid block size: expected {expected} bytes, got {actual}")]
    #[diagnostic(code(dds_bc4::invalid_block_size))]
    InvalidBlockSize { expected: usize, actual: usize },

    #[error("Error in file header: {0}")]
    Header(#[from] binrw::error::Error),

    #[error("IO error in file contents: {0}")]
    IO(#[from] std::io::Error),

    #[error("Error writing image: {0}")]
    Image(#[from] image::ImageError),
}

pub type TextureResult<T = GrayTexture> = Result<T, TextureError>;
