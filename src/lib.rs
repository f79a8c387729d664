// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub mod blocktexture;
pub mod container;
pub mod dimensions;
pub mod error;
pub mod format;
pub mod s3tc;
pub mod texture;

pub use container::dds::{read_texture, read_texture_file, read_texture_with};
