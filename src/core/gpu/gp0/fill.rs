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

//! GP0 Fill Rectangle command
//!
//! GP0(0x02) writes a solid color straight into VRAM. It is the usual way to
//! clear framebuffers, so it bypasses the drawing area, offset and mask bits.

use super::super::color::to_15bit;
use super::super::vram::Vram;
use super::super::GPU;

impl GPU {
    /// GP0(0x02): Fill Rectangle in VRAM
    ///
    /// # Command Format
    ///
    /// ```text
    /// Command word:
    /// Bits 0-23:  Color (passed to the 15-bit codec as-is)
    /// Bits 24-31: Command (0x02)
    ///
    /// Parameter 1: Top-Left Corner
    /// Bits 0-15:  X coordinate (in VRAM)
    /// Bits 16-31: Y coordinate (in VRAM)
    ///
    /// Parameter 2: Size
    /// Bits 0-15:  Width (in pixels)
    /// Bits 16-31: Height (in pixels)
    /// ```
    ///
    /// Rows `[y, y+h)` and columns `[x, x+w)` are written. Cells past the
    /// right or bottom edge of VRAM are skipped rather than wrapped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    ///
    /// gpu.write_gp0(0x0200FF00); // green
    /// gpu.write_gp0(0x00320032); // X=50, Y=50
    /// gpu.write_gp0(0x00040004); // 4×4
    ///
    /// assert_eq!(gpu.read_vram(50, 50), 0x03E0);
    /// assert_eq!(gpu.read_vram(53, 53), 0x03E0);
    /// assert_eq!(gpu.read_vram(54, 50), 0x0000);
    /// ```
    pub(in crate::core::gpu) fn gp0_fill_rectangle(&mut self, argument: u32, arguments: &[u32]) {
        let [origin, size] = match arguments {
            [origin, size, ..] => [*origin, *size],
            _ => return,
        };

        let x = origin & 0xFFFF;
        let y = origin >> 16;
        let width = size & 0xFFFF;
        let height = size >> 16;
        let color = to_15bit(argument);

        log::debug!(
            "Fill Rectangle: ({}, {}) size {}×{} color=0x{:04X}",
            x,
            y,
            width,
            height,
            color
        );

        let end_x = (x + width).min(Vram::WIDTH as u32);
        let end_y = (y + height).min(Vram::HEIGHT as u32);

        for row in y..end_y {
            for column in x..end_x {
                self.vram.write(column, row, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_clips_at_vram_edge() {
        let mut gpu = GPU::new();
        gpu.gp0_fill_rectangle(0xFFFFFF, &[(510 << 16) | 1020, (8 << 16) | 8]);

        assert_eq!(gpu.read_vram(1023, 511), 0x7FFF);
        assert_eq!(gpu.read_vram(1020, 510), 0x7FFF);
        // Nothing wrapped to the opposite edges
        assert_eq!(gpu.read_vram(0, 0), 0x0000);
        assert_eq!(gpu.read_vram(0, 510), 0x0000);
        assert_eq!(gpu.read_vram(1020, 0), 0x0000);
    }

    #[test]
    fn test_fill_zero_size_writes_nothing() {
        let mut gpu = GPU::new();
        gpu.gp0_fill_rectangle(0xFFFFFF, &[0, 0]);
        assert!(gpu.vram.as_slice().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_fill_origin_entirely_outside() {
        let mut gpu = GPU::new();
        gpu.gp0_fill_rectangle(0xFFFFFF, &[(600 << 16) | 2000, (4 << 16) | 4]);
        assert!(gpu.vram.as_slice().iter().all(|&p| p == 0));
    }
}
