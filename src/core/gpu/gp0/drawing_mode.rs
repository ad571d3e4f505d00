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

//! GP0 drawing mode setting commands (0xE1-0xE6)
//!
//! These take effect immediately; none of them buffers argument words.

use super::super::registers::{DrawMode, DrawingArea, DrawingOffset, MaskSettings, TextureWindow};
use super::super::GPU;

impl GPU {
    /// GP0(0xE1): Draw Mode Setting
    ///
    /// Stores the 24-bit argument as the draw mode register. Bits 0-10 show up
    /// in GPUSTAT and textured rectangles take their texture page from it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    /// gpu.write_gp0(0xE1000215);
    /// assert_eq!(gpu.status() & 0x7FF, 0x215);
    /// ```
    pub(in crate::core::gpu) fn gp0_draw_mode(&mut self, argument: u32) {
        self.draw_mode = DrawMode::new(argument);

        log::debug!(
            "Draw mode: page=({}, {}) depth={} semi={} dither={}",
            self.draw_mode.texture_page_x_base(),
            self.draw_mode.texture_page_y_base(),
            self.draw_mode.texture_depth(),
            self.draw_mode.semi_transparency(),
            self.draw_mode.dithering()
        );
    }

    /// GP0(0xE2): Texture Window Setting
    pub(in crate::core::gpu) fn gp0_texture_window(&mut self, argument: u32) {
        self.texture_window = TextureWindow::from_argument(argument);
        log::debug!("Texture window: {:?}", self.texture_window);
    }

    /// GP0(0xE3): Set Drawing Area Top-Left
    ///
    /// ```text
    /// Bits 0-9:   X coordinate
    /// Bits 10-19: Y coordinate
    /// ```
    pub(in crate::core::gpu) fn gp0_draw_area_top_left(&mut self, argument: u32) {
        let (x, y) = DrawingArea::decode_corner(argument);
        self.drawing_area.x1 = x;
        self.drawing_area.y1 = y;
        log::debug!("Drawing area top-left: ({}, {})", x, y);
    }

    /// GP0(0xE4): Set Drawing Area Bottom-Right
    pub(in crate::core::gpu) fn gp0_draw_area_bottom_right(&mut self, argument: u32) {
        let (x, y) = DrawingArea::decode_corner(argument);
        self.drawing_area.x2 = x;
        self.drawing_area.y2 = y;
        log::debug!("Drawing area bottom-right: ({}, {})", x, y);
    }

    /// GP0(0xE5): Set Drawing Offset
    ///
    /// ```text
    /// Bits 0-10:  X offset (signed 11-bit)
    /// Bits 11-21: Y offset (signed 11-bit)
    /// ```
    pub(in crate::core::gpu) fn gp0_draw_offset(&mut self, argument: u32) {
        self.drawing_offset = DrawingOffset::from_argument(argument);
        log::debug!(
            "Drawing offset: ({}, {})",
            self.drawing_offset.x,
            self.drawing_offset.y
        );
    }

    /// GP0(0xE6): Mask Bit Setting
    pub(in crate::core::gpu) fn gp0_mask_settings(&mut self, argument: u32) {
        self.mask_settings = MaskSettings::from_argument(argument);
        log::debug!(
            "Mask settings: set={} check={}",
            self.mask_settings.set_mask_while_drawing,
            self.mask_settings.check_mask_before_draw
        );
    }
}
