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

//! GP0 VRAM transfer commands
//!
//! Implements CPU→VRAM, VRAM→CPU and VRAM→VRAM transfers. Uploads and
//! readbacks share one [`TransferRegion`]; only one of them can be active.

use serde::{Deserialize, Serialize};

use crate::core::error::GpuError;

use super::super::vram::{clamp_max, Vram};
use super::super::{ReadMode, GPU};

/// Rectangle walked by an upload or readback
///
/// `end_x`/`end_y` are exclusive. The cursor moves left to right and wraps
/// back to `start_x` at `end_x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRegion {
    pub start_x: u32,
    pub start_y: u32,
    pub current_x: u32,
    pub current_y: u32,
    pub end_x: u32,
    pub end_y: u32,
}

impl TransferRegion {
    /// Decode a position word and a size word
    ///
    /// ```text
    /// Position: X bits 0-15, Y bits 16-31 (clamped to 1023/511)
    /// Size:     W bits 0-15, H bits 16-31 (0 means the full range)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::gpu::TransferRegion;
    ///
    /// let region = TransferRegion::from_words(0x0000_03FE, 0x0001_0004);
    /// assert_eq!((region.start_x, region.end_x), (1022, 1024));
    /// assert_eq!((region.start_y, region.end_y), (0, 1));
    /// ```
    pub fn from_words(position: u32, size: u32) -> Self {
        let start_x = clamp_max(position & 0xFFFF, Vram::MAX_X);
        let start_y = clamp_max(position >> 16, Vram::MAX_Y);

        let width = clamp_max((size & 0xFFFF).wrapping_sub(1), Vram::MAX_X) + 1;
        let height = clamp_max((size >> 16).wrapping_sub(1), Vram::MAX_Y) + 1;

        Self {
            start_x,
            start_y,
            current_x: start_x,
            current_y: start_y,
            end_x: clamp_max(start_x + width - 1, Vram::MAX_X) + 1,
            end_y: clamp_max(start_y + height - 1, Vram::MAX_Y) + 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> u32 {
        self.end_y - self.start_y
    }

    /// Check that a restored region lies inside VRAM with the cursor in bounds
    pub fn validate(&self) -> Result<(), GpuError> {
        let x_ok = self.start_x <= self.current_x
            && self.current_x <= self.end_x
            && self.end_x <= Vram::WIDTH as u32;
        let y_ok = self.start_y <= self.current_y
            && self.current_y <= self.end_y
            && self.end_y <= Vram::HEIGHT as u32;

        if x_ok && y_ok {
            Ok(())
        } else {
            Err(GpuError::InvalidState(format!("transfer region out of bounds: {:?}", self)))
        }
    }

    /// Move the cursor `step` cells right; returns true once past the last row
    fn advance(&mut self, step: u32) -> bool {
        self.current_x += step;
        if self.current_x >= self.end_x {
            self.current_x = self.start_x;
            self.current_y += 1;
            return self.current_y >= self.end_y;
        }
        false
    }
}

impl GPU {
    /// GP0(0xA0): CPU→VRAM Transfer header
    ///
    /// # Command Format
    ///
    /// ```text
    /// Word 0: Command (0xA0000000)
    /// Word 1: Destination (X bits 0-15, Y bits 16-31)
    /// Word 2: Size (Width bits 0-15, Height bits 16-31)
    /// Word 3...: Pixel data, two pixels per word (low half first)
    /// ```
    ///
    /// After the header every GP0 word is pixel data until the rectangle is
    /// full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    ///
    /// gpu.write_gp0(0xA0000000);
    /// gpu.write_gp0(0x00000010); // X=16, Y=0
    /// gpu.write_gp0(0x00010002); // 2×1
    /// gpu.write_gp0(0x7FFF001F);
    ///
    /// assert_eq!(gpu.read_vram(16, 0), 0x001F);
    /// assert_eq!(gpu.read_vram(17, 0), 0x7FFF);
    /// assert!(gpu.decoder().is_idle());
    /// ```
    pub(in crate::core::gpu) fn gp0_cpu_to_vram(&mut self, arguments: &[u32]) {
        let [position, size] = match arguments {
            [position, size, ..] => [*position, *size],
            _ => return,
        };

        self.region = TransferRegion::from_words(position, size);

        log::debug!(
            "CPU→VRAM transfer: ({}, {}) size {}×{}",
            self.region.start_x,
            self.region.start_y,
            self.region.width(),
            self.region.height()
        );

        self.gp0.stream_upload();
    }

    /// Write one streamed upload word (two pixels)
    ///
    /// A pixel that falls past the end of the rectangle is discarded.
    pub(in crate::core::gpu) fn upload_word(&mut self, word: u32) {
        for pixel in [word as u16, (word >> 16) as u16] {
            self.vram
                .write(self.region.current_x, self.region.current_y, pixel);

            if self.region.advance(1) {
                log::debug!("CPU→VRAM transfer complete");
                self.gp0.finish();
                return;
            }
        }
    }

    /// GP0(0xC0): VRAM→CPU Transfer
    ///
    /// # Command Format
    ///
    /// ```text
    /// Word 0: Command (0xC0000000)
    /// Word 1: Source (X bits 0-15, Y bits 16-31)
    /// Word 2: Size (Width bits 0-15, Height bits 16-31)
    /// ```
    ///
    /// Data is then read from GPUREAD, two pixels per read.
    pub(in crate::core::gpu) fn gp0_vram_to_cpu(&mut self, arguments: &[u32]) {
        let [position, size] = match arguments {
            [position, size, ..] => [*position, *size],
            _ => return,
        };

        self.region = TransferRegion::from_words(position, size);
        self.read_mode = ReadMode::VramToCpu;

        log::debug!(
            "VRAM→CPU transfer: ({}, {}) size {}×{}",
            self.region.start_x,
            self.region.start_y,
            self.region.width(),
            self.region.height()
        );
    }

    /// Produce the next GPUREAD word of a readback
    ///
    /// The word packs the pixel under the cursor (low half) and its right
    /// neighbour (high half), then the cursor moves two cells.
    pub(in crate::core::gpu) fn read_vram_word(&mut self) -> u32 {
        let (x, y) = (self.region.current_x, self.region.current_y);
        let word = self.vram.read(x, y) as u32 | (self.vram.read(x + 1, y) as u32) << 16;

        if self.region.advance(2) {
            log::debug!("VRAM→CPU transfer complete");
            self.read_mode = ReadMode::Register;
            self.ready_vram_to_cpu = false;
        }

        word
    }

    /// GP0(0x80): VRAM→VRAM Transfer
    ///
    /// # Command Format
    ///
    /// ```text
    /// Word 0: Command (0x80000000)
    /// Word 1: Source (X bits 0-15, Y bits 16-31)
    /// Word 2: Destination (X bits 0-15, Y bits 16-31)
    /// Word 3: Size (Width bits 0-15, Height bits 16-31)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    /// gpu.write_vram(0, 0, 0x1234);
    ///
    /// gpu.write_gp0(0x80000000);
    /// gpu.write_gp0(0x00000000); // from (0, 0)
    /// gpu.write_gp0(0x00640064); // to (100, 100)
    /// gpu.write_gp0(0x00010001); // 1×1
    ///
    /// assert_eq!(gpu.read_vram(100, 100), 0x1234);
    /// ```
    pub(in crate::core::gpu) fn gp0_vram_to_vram(&mut self, arguments: &[u32]) {
        let [source, destination, size] = match arguments {
            [source, destination, size, ..] => [*source, *destination, *size],
            _ => return,
        };

        let src_x = clamp_max(source & 0xFFFF, Vram::MAX_X);
        let src_y = clamp_max(source >> 16, Vram::MAX_Y);
        let dst_x = clamp_max(destination & 0xFFFF, Vram::MAX_X);
        let dst_y = clamp_max(destination >> 16, Vram::MAX_Y);
        let width = clamp_max((size & 0xFFFF).wrapping_sub(1), Vram::MAX_X) + 1;
        let height = clamp_max((size >> 16).wrapping_sub(1), Vram::MAX_Y) + 1;

        log::debug!(
            "VRAM→VRAM transfer: ({}, {}) → ({}, {}) size {}×{}",
            src_x,
            src_y,
            dst_x,
            dst_y,
            width,
            height
        );

        self.vram
            .copy_region(src_x, src_y, dst_x, dst_y, width, height);
    }
}
