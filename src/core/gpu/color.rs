// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Color format conversion
//!
//! Converts between 24-bit RGB words and the 15-bit packed format stored in VRAM.
//!
//! # Layouts
//!
//! ```text
//! 24-bit:  0x00RRGGBB
//! 15-bit:  bits 0-4 red, bits 5-9 green, bits 10-14 blue
//! ```
//!
//! The 15-bit layout reverses the channel order of the 24-bit word. The
//! conversion keeps the top 5 bits of each channel, so a round trip through
//! both functions zeroes the low 3 bits of every channel.

use crate::core::error::GpuError;

/// Convert a 24-bit RGB word to the 15-bit VRAM format
///
/// # Examples
///
/// ```
/// use psx_gpu::core::gpu::to_15bit;
///
/// assert_eq!(to_15bit(0xFF0000), 0x001F); // red
/// assert_eq!(to_15bit(0x00FF00), 0x03E0); // green
/// assert_eq!(to_15bit(0x0000FF), 0x7C00); // blue
/// ```
#[inline]
pub fn to_15bit(color: u32) -> u16 {
    let mut packed = 0u32;
    packed |= (color & 0xF8_0000) >> 19;
    packed |= (color & 0x00_F800) >> 6;
    packed |= (color & 0x00_00F8) << 7;
    packed as u16
}

/// Expand a 15-bit VRAM color back to a 24-bit RGB word
///
/// The low 3 bits of each channel are zero. Alpha is left at zero; callers
/// that need an opaque color OR in `0xFF000000` themselves.
///
/// # Examples
///
/// ```
/// use psx_gpu::core::gpu::to_24bit;
///
/// assert_eq!(to_24bit(0x001F), 0xF80000);
/// assert_eq!(to_24bit(0x7FFF), 0xF8F8F8);
/// ```
#[inline]
pub fn to_24bit(color: u16) -> u32 {
    let color = color as u32;
    let mut expanded = 0u32;
    expanded |= (color & 0x7C00) >> 7;
    expanded |= (color & 0x03E0) << 6;
    expanded |= (color & 0x001F) << 19;
    expanded
}

/// Average a set of packed 24-bit colors
///
/// Each channel of `0x..BBGGRR` input words is averaged separately (integer
/// division). The result has full alpha: `0xFFBBGGRR`.
///
/// # Errors
///
/// Returns [`GpuError::InvalidInput`] for an empty slice.
///
/// # Examples
///
/// ```
/// use psx_gpu::core::gpu::color_mean;
///
/// let mean = color_mean(&[0x000000, 0x0000FE]).unwrap();
/// assert_eq!(mean, 0xFF00007F);
/// assert!(color_mean(&[]).is_err());
/// ```
pub fn color_mean(colors: &[u32]) -> Result<u32, GpuError> {
    if colors.is_empty() {
        return Err(GpuError::InvalidInput(
            "color_mean requires at least one color".to_string(),
        ));
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for &color in colors {
        r += (color & 0xFF) as u64;
        g += ((color >> 8) & 0xFF) as u64;
        b += ((color >> 16) & 0xFF) as u64;
    }

    let n = colors.len() as u64;
    let (r, g, b) = ((r / n) as u32, (g / n) as u32, (b / n) as u32);

    Ok(0xFF << 24 | (b & 0xFF) << 16 | (g & 0xFF) << 8 | (r & 0xFF))
}
