// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Display, Formatter};

use crate::error::{TextureError, TextureResult};

/// Width and height of a single 2D surface, in pixels
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    /// Total pixel count, widened so that it cannot overflow for any pair of `u32` sides
    pub fn pixels(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Fail unless both sides are a whole number of `block_width` x `block_height` blocks
    pub fn check_aligned(self, block_width: usize, block_height: usize) -> TextureResult<()> {
        if self.width as usize % block_width != 0 || self.height as usize % block_height != 0 {
            return Err(TextureError::BlockAlignment {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl From<[u32; 2]> for Dimensions {
    fn from([width, height]: [u32; 2]) -> Self {
        Self::new(width, height)
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

pub trait Dimensioned {
    fn dimensions(&self) -> Dimensions;
}
