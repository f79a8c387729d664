// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Debug, Display, Formatter};

use binrw::binrw;
use enumflags2::{bitflags, BitFlags};

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormatFlags {
    AlphaPixels = 0x1,
    Alpha = 0x2,
    FourCC = 0x4,
    RGB = 0x40,
    YUV = 0x200,
    Luminance = 0x20000,
}

#[binrw]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const DX10: Self = Self(*b"DX10");
    pub const BC4U: Self = Self(*b"BC4U");
}

impl AsRef<[u8]> for FourCC {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<FourCC> for [u8; 4] {
    fn from(four_cc: FourCC) -> Self {
        four_cc.0
    }
}

impl From<&[u8; 4]> for FourCC {
    fn from(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }
}

impl Display for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_ref())[..])
    }
}

impl Debug for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match std::str::from_utf8(self.as_ref()) {
            Ok(as_str) => write!(f, "FourCC({as_str:?})"),
            Err(_) => write!(f, "FourCC({:#010X})", u32::from_le_bytes(self.0)),
        }
    }
}

/// The 32-byte pixel format record embedded in the DDS header at offset 0x4C
#[binrw]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    pub size: u32,
    pub flags: u32,
    pub four_cc: FourCC,
    pub bit_count: u32,
    pub color_bit_masks: [u32; 3],
    pub alpha_bit_mask: u32,
}

impl PixelFormat {
    pub const SIZE: u32 = 32;

    /// A pixel format that defers to the compressed format named by `four_cc`
    pub fn compressed(four_cc: FourCC) -> Self {
        Self {
            size: Self::SIZE,
            flags: PixelFormatFlags::FourCC as u32,
            four_cc,
            bit_count: 0,
            color_bit_masks: [0; 3],
            alpha_bit_mask: 0,
        }
    }

    /// Known flags; unknown bits stay in [`Self::flags`] but are dropped here
    pub fn pixel_format_flags(&self) -> BitFlags<PixelFormatFlags> {
        BitFlags::from_bits_truncate(self.flags)
    }

    pub fn is_dx10(&self) -> bool {
        self.four_cc == FourCC::DX10
    }
}
