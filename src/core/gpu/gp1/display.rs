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

//! GP1 display configuration commands
//!
//! Display enable, display area, display ranges and display mode. None of
//! these affect drawing; they only change what GPUSTAT reports and what a
//! video output stage would scan out.

use super::super::registers::DisplayMode;
use super::super::GPU;

impl GPU {
    /// GP1(0x03): Display Enable
    ///
    /// # Arguments
    ///
    /// * `argument` - Bit 0: 0=Enable, 1=Disable
    pub(in crate::core::gpu) fn gp1_display_enable(&mut self, argument: u32) {
        self.display_control.display_disabled = argument & 1 != 0;

        log::debug!(
            "Display {}",
            if self.display_control.display_disabled {
                "disabled"
            } else {
                "enabled"
            }
        );
    }

    /// GP1(0x05): Start of Display Area
    ///
    /// # Arguments
    ///
    /// * `argument` - Bits 0-9: X coordinate, Bits 10-18: Y coordinate
    pub(in crate::core::gpu) fn gp1_display_area_start(&mut self, argument: u32) {
        self.display_control.area_x = (argument & 0x3FF) as u16;
        self.display_control.area_y = ((argument >> 10) & 0x1FF) as u16;

        log::debug!(
            "Display area start: ({}, {})",
            self.display_control.area_x,
            self.display_control.area_y
        );
    }

    /// GP1(0x06): Horizontal Display Range
    ///
    /// # Arguments
    ///
    /// * `argument` - Bits 0-11: X1 start, Bits 12-23: X2 end
    pub(in crate::core::gpu) fn gp1_horizontal_display_range(&mut self, argument: u32) {
        self.display_control.range_x1 = (argument & 0xFFF) as u16;
        self.display_control.range_x2 = ((argument >> 12) & 0xFFF) as u16;

        log::debug!(
            "Horizontal display range: {} to {}",
            self.display_control.range_x1,
            self.display_control.range_x2
        );
    }

    /// GP1(0x07): Vertical Display Range
    ///
    /// # Arguments
    ///
    /// * `argument` - Bits 0-9: Y1 start, Bits 10-19: Y2 end
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    /// gpu.write_gp1(0x07000000 | (0x100 << 10) | 0x10);
    /// assert_eq!(gpu.display_control().range_y1, 0x10);
    /// assert_eq!(gpu.display_control().range_y2, 0x100);
    /// ```
    pub(in crate::core::gpu) fn gp1_vertical_display_range(&mut self, argument: u32) {
        self.display_control.range_y1 = (argument & 0x3FF) as u16;
        self.display_control.range_y2 = ((argument >> 10) & 0x3FF) as u16;

        log::debug!(
            "Vertical display range: {} to {}",
            self.display_control.range_y1,
            self.display_control.range_y2
        );
    }

    /// GP1(0x08): Display Mode
    ///
    /// ```text
    /// Bits 0-1: Horizontal resolution 1
    /// Bit 2:    Vertical resolution
    /// Bit 3:    Video mode (NTSC/PAL)
    /// Bit 4:    Display color depth
    /// Bit 5:    Vertical interlace
    /// Bit 6:    Horizontal resolution 2
    /// Bit 7:    Reverse flag
    /// ```
    pub(in crate::core::gpu) fn gp1_display_mode(&mut self, argument: u32) {
        self.display_mode = DisplayMode::new(argument);

        log::debug!(
            "Display mode: {:?} {:?} {:?} {:?} interlaced={}",
            self.display_mode.horizontal_res(),
            self.display_mode.vertical_res(),
            self.display_mode.video_mode(),
            self.display_mode.color_depth(),
            self.display_mode.interlaced()
        );
    }
}
