// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Debug, Formatter};
use std::path::Path;

use image::{GrayImage, Luma};

use crate::blocktexture::Tile;
use crate::dimensions::{Dimensioned, Dimensions};
use crate::error::TextureResult;

/// A decoded single-channel surface, stored row-major with one byte per pixel
#[derive(Clone, PartialEq, Eq)]
pub struct GrayTexture {
    dimensions: Dimensions,
    buffer: Vec<u8>,
}

impl GrayTexture {
    /// A black texture of the given size
    pub(crate) fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            buffer: vec![0; dimensions.pixels() as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Pixel at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.buffer
            .get(y as usize * self.width() as usize + x as usize)
            .copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.chunks(self.width().max(1) as usize)
    }

    /// Copy a 4x4 tile so that its top-left pixel lands on column `x`, row `y`
    pub(crate) fn blit(&mut self, x: usize, y: usize, tile: &Tile) {
        let width = self.width() as usize;
        for (r, row) in tile.iter().enumerate() {
            let start = (y + r) * width + x;
            self.buffer[start..start + row.len()].copy_from_slice(row);
        }
    }

    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            Luma([self.buffer[y as usize * self.width() as usize + x as usize]])
        })
    }

    /// Encode the texture with the image format implied by the extension of `path`
    pub fn save(&self, path: impl AsRef<Path>) -> TextureResult<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}

impl Dimensioned for GrayTexture {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl Debug for GrayTexture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrayTexture")
            .field("dimensions", &self.dimensions)
            .field("bytes", &self.buffer.len())
            .finish()
    }
}
