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

//! Video memory store
//!
//! 1024×512 cells of 16-bit color, the single source of truth for pixel data
//! written by fills, copies and CPU uploads (and by the external rasterizer).

use crate::core::error::GpuError;

/// Clamp a value to an inclusive maximum
///
/// Values above `max` become `max`; nothing is wrapped or rejected. Every
/// command that derives a coordinate or size from its arguments goes through
/// this helper.
///
/// # Examples
///
/// ```
/// use psx_gpu::core::gpu::clamp_max;
///
/// assert_eq!(clamp_max(1500u32, 1023), 1023);
/// assert_eq!(clamp_max(12u32, 1023), 12);
/// ```
#[inline]
pub fn clamp_max<T: PartialOrd>(value: T, max: T) -> T {
    if value > max {
        max
    } else {
        value
    }
}

/// VRAM: 1024×512 pixels, 16-bit per pixel
///
/// Stored as a flat Vec in row-major order. Coordinates passed to
/// [`Vram::read`] and [`Vram::write`] wrap to the 10-bit/9-bit hardware range.
#[derive(Clone)]
pub struct Vram {
    pixels: Vec<u16>,
}

impl Vram {
    /// VRAM width in pixels
    pub const WIDTH: usize = 1024;

    /// VRAM height in pixels
    pub const HEIGHT: usize = 512;

    /// Total VRAM size in pixels
    pub const SIZE: usize = Self::WIDTH * Self::HEIGHT;

    /// Largest valid X coordinate
    pub const MAX_X: u32 = (Self::WIDTH - 1) as u32;

    /// Largest valid Y coordinate
    pub const MAX_Y: u32 = (Self::HEIGHT - 1) as u32;

    /// Create a VRAM store with every cell black
    pub fn new() -> Self {
        Self {
            pixels: vec![0x0000; Self::SIZE],
        }
    }

    #[inline(always)]
    fn index(x: u32, y: u32) -> usize {
        let x = (x & 0x3FF) as usize;
        let y = (y & 0x1FF) as usize;
        y * Self::WIDTH + x
    }

    /// Read a 16-bit cell
    #[inline(always)]
    pub fn read(&self, x: u32, y: u32) -> u16 {
        self.pixels[Self::index(x, y)]
    }

    /// Write a 16-bit cell
    #[inline(always)]
    pub fn write(&mut self, x: u32, y: u32, value: u16) {
        self.pixels[Self::index(x, y)] = value;
    }

    /// Copy a rectangle within VRAM
    ///
    /// Copies row by row, left to right, straight from the live store. When
    /// source and destination overlap, cells already overwritten earlier in
    /// the same copy are read back as the new value.
    pub fn copy_region(
        &mut self,
        src_x: u32,
        src_y: u32,
        dst_x: u32,
        dst_y: u32,
        width: u32,
        height: u32,
    ) {
        for y in 0..height {
            for x in 0..width {
                let pixel = self.read(src_x + x, src_y + y);
                self.write(dst_x + x, dst_y + y, pixel);
            }
        }
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: u16) {
        self.pixels.fill(value);
    }

    /// Raw row-major view of the store
    pub fn as_slice(&self) -> &[u16] {
        &self.pixels
    }

    /// Replace the whole store with a row-major image
    ///
    /// # Errors
    ///
    /// Returns [`GpuError::InvalidVramSize`] if `pixels` is not exactly
    /// [`Vram::SIZE`] cells long.
    pub fn load(&mut self, pixels: &[u16]) -> Result<(), GpuError> {
        if pixels.len() != Self::SIZE {
            return Err(GpuError::InvalidVramSize {
                expected: Self::SIZE,
                got: pixels.len(),
            });
        }
        self.pixels.copy_from_slice(pixels);
        Ok(())
    }
}

impl Default for Vram {
    fn default() -> Self {
        Self::new()
    }
}
