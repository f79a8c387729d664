// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Cursor;

use binrw::{binrw, BinRead, BinWrite};
use enumflags2::{bitflags, make_bitflags, BitFlags};

use crate::dimensions::{Dimensioned, Dimensions};
use crate::error::{TextureError, TextureResult};

use super::pixel_format::{FourCC, PixelFormat};

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DDSFlags {
    Caps = 0x1,
    Height = 0x2,
    Width = 0x4,
    Pitch = 0x8,
    PixelFormat = 0x1000,
    MipmapCount = 0x20000,
    LinearSize = 0x80000,
    Depth = 0x800000,
}

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Caps1 {
    Complex = 0x8,
    Mipmap = 0x400000,
    Texture = 0x1000,
}

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Caps2 {
    Cubemap = 0x200,
    CubemapPositiveX = 0x400,
    CubemapNegativeX = 0x800,
    CubemapPositiveY = 0x1000,
    CubemapNegativeY = 0x2000,
    CubemapPositiveZ = 0x4000,
    CubemapNegativeZ = 0x8000,
    Volume = 0x200000,
}

/// The fixed 128-byte DDS header, magic included.
///
/// | offset | field                  |
/// |--------|------------------------|
/// | 0x00   | `magic`                |
/// | 0x04   | `size`                 |
/// | 0x08   | `flags`                |
/// | 0x0C   | `height`               |
/// | 0x10   | `width`                |
/// | 0x14   | `pitch_or_linear_size` |
/// | 0x18   | `depth`                |
/// | 0x1C   | `mipmap_count`         |
/// | 0x20   | `reserved1`            |
/// | 0x4C   | `pixel_format`         |
/// | 0x54   | `pixel_format.four_cc` |
/// | 0x6C   | `caps1` .. `caps4`     |
/// | 0x7C   | `reserved2`            |
///
/// Every field is kept verbatim. Nothing is checked while reading; see [`DDSHeader::validate`].
#[binrw]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct DDSHeader {
    pub magic: [u8; 4],
    pub size: u32,
    pub flags: u32,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mipmap_count: u32,
    pub reserved1: [u32; 11],
    pub pixel_format: PixelFormat,
    pub caps1: u32,
    pub caps2: u32,
    pub caps3: u32,
    pub caps4: u32,
    pub reserved2: u32,
}

impl DDSHeader {
    pub const MAGIC: [u8; 4] = *b"DDS ";
    /// Value of the size field, which excludes the magic
    pub const SIZE: u32 = 124;
    /// Bytes occupied by the header on disk, magic included
    pub const LEN: usize = 128;
    /// Bytes occupied by the DX10 extended header that follows when the FourCC is "DX10"
    pub const DX10_LEN: usize = 20;

    /// Create a well-formed header for a single compressed surface
    pub fn new(dimensions: Dimensions, four_cc: FourCC) -> Self {
        let flags = make_bitflags!(DDSFlags::{Caps | Width | Height | PixelFormat});
        Self {
            magic: Self::MAGIC,
            size: Self::SIZE,
            flags: flags.bits(),
            height: dimensions.height(),
            width: dimensions.width(),
            pitch_or_linear_size: 0,
            depth: 0,
            mipmap_count: 0,
            reserved1: [0; 11],
            pixel_format: PixelFormat::compressed(four_cc),
            caps1: Caps1::Texture as u32,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }

    /// Read the header from the start of `bytes`. Only the first [`Self::LEN`] bytes are looked at.
    pub fn parse(bytes: &[u8]) -> TextureResult<Self> {
        let header_bytes = bytes.get(..Self::LEN).ok_or(TextureError::TruncatedInput {
            needed: Self::LEN as u64,
            actual: bytes.len() as u64,
        })?;

        Ok(Self::read(&mut Cursor::new(header_bytes))?)
    }

    pub fn to_bytes(&self) -> TextureResult<Vec<u8>> {
        let mut writer = Cursor::new(Vec::with_capacity(Self::LEN));
        self.write(&mut writer)?;
        Ok(writer.into_inner())
    }

    /// Check the magic and size fields
    pub fn validate(&self) -> TextureResult<()> {
        if self.magic != Self::MAGIC {
            return Err(TextureError::MalformedHeader(format!(
                "bad magic {:?}, expected {:?}",
                String::from_utf8_lossy(&self.magic),
                String::from_utf8_lossy(&Self::MAGIC)
            )));
        }
        if self.size != Self::SIZE {
            return Err(TextureError::MalformedHeader(format!(
                "header size is {}, expected {}",
                self.size,
                Self::SIZE
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn four_cc(&self) -> FourCC {
        self.pixel_format.four_cc
    }

    pub fn is_dx10(&self) -> bool {
        self.pixel_format.is_dx10()
    }

    /// Byte offset of the first compressed block
    pub fn data_offset(&self) -> usize {
        match self.is_dx10() {
            true => Self::LEN + Self::DX10_LEN,
            false => Self::LEN,
        }
    }

    pub fn dds_flags(&self) -> BitFlags<DDSFlags> {
        BitFlags::from_bits_truncate(self.flags)
    }

    pub fn caps1_flags(&self) -> BitFlags<Caps1> {
        BitFlags::from_bits_truncate(self.caps1)
    }

    pub fn caps2_flags(&self) -> BitFlags<Caps2> {
        BitFlags::from_bits_truncate(self.caps2)
    }

    /// Number of mip levels declared by the header, if any
    pub fn mips(&self) -> Option<u32> {
        // MipmapCount flag might not be set, so count a mipmap_count value greater than 1 as equivalent
        (self.dds_flags().contains(DDSFlags::MipmapCount) || self.mipmap_count > 1)
            .then_some(self.mipmap_count)
    }

    pub fn is_cubemap(&self) -> bool {
        self.caps2_flags().contains(Caps2::Cubemap)
    }

    pub fn is_volume(&self) -> bool {
        self.caps2_flags().contains(Caps2::Volume) || self.dds_flags().contains(DDSFlags::Depth)
    }
}

impl Dimensioned for DDSHeader {
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}
