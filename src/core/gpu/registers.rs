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

//! GPU register type definitions
//!
//! This module contains the configuration registers written through GP0(E1h..E6h)
//! and GP1, including the packed draw-mode and display-mode registers.
//!
//! Packed registers keep a single integer as backing store and expose named
//! field accessors, so the layout does not depend on struct layout rules.

use serde::{Deserialize, Serialize};

/// Draw mode register, GP0(E1h) ("Texpage")
///
/// ```text
///   Bit 0-3:   Texture page X Base   (N*64)
///   Bit 4:     Texture page Y Base   (N*256)
///   Bit 5-6:   Semi Transparency     (0=B/2+F/2, 1=B+F, 2=B-F, 3=B+F/4)
///   Bit 7-8:   Texture page colors   (0=4bit, 1=8bit, 2=15bit)
///   Bit 9:     Dithering enabled
///   Bit 10:    Drawing to display area allowed
///   Bit 11:    Texture disable
///   Bit 12:    Textured rectangle X-flip
///   Bit 13:    Textured rectangle Y-flip
/// ```
///
/// # Examples
///
/// ```
/// use psx_gpu::core::gpu::DrawMode;
///
/// let mode = DrawMode::new(0x0000_0192);
/// assert_eq!(mode.texture_page_x_base(), 128);
/// assert_eq!(mode.texture_page_y_base(), 256);
/// assert_eq!(mode.texture_depth(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawMode(u32);

impl DrawMode {
    /// Register width mask (24-bit argument)
    pub const MASK: u32 = 0x00FF_FFFF;

    /// Create a draw mode register from a raw GP0(E1h) argument
    pub fn new(raw: u32) -> Self {
        Self(raw & Self::MASK)
    }

    /// Raw 24-bit register value
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Texture page X base in pixels (N×64)
    pub fn texture_page_x_base(self) -> u32 {
        (self.0 & 0xF) * 64
    }

    /// Texture page Y base in pixels (0 or 256)
    pub fn texture_page_y_base(self) -> u32 {
        ((self.0 >> 4) & 1) * 256
    }

    /// Semi-transparency mode (0-3)
    pub fn semi_transparency(self) -> u8 {
        ((self.0 >> 5) & 3) as u8
    }

    /// Texture page color depth field (0=4bit, 1=8bit, 2/3=15bit)
    pub fn texture_depth(self) -> u8 {
        ((self.0 >> 7) & 3) as u8
    }

    pub fn dithering(self) -> bool {
        (self.0 >> 9) & 1 != 0
    }

    pub fn draw_to_display(self) -> bool {
        (self.0 >> 10) & 1 != 0
    }

    pub fn texture_disable(self) -> bool {
        (self.0 >> 11) & 1 != 0
    }

    pub fn rect_x_flip(self) -> bool {
        (self.0 >> 12) & 1 != 0
    }

    pub fn rect_y_flip(self) -> bool {
        (self.0 >> 13) & 1 != 0
    }
}

/// Display mode register, GP1(08h)
///
/// ```text
///   Bit 0-1: Horizontal resolution 1 (0=256, 1=320, 2=512, 3=640)
///   Bit 2:   Vertical resolution     (0=240, 1=480)
///   Bit 3:   Video mode              (0=NTSC, 1=PAL)
///   Bit 4:   Display color depth     (0=15bit, 1=24bit)
///   Bit 5:   Vertical interlace
///   Bit 6:   Horizontal resolution 2 (0=256/320/512/640, 1=368)
///   Bit 7:   Reverse flag
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMode(u32);

impl DisplayMode {
    /// Register width mask
    pub const MASK: u32 = 0xFF;

    pub fn new(raw: u32) -> Self {
        Self(raw & Self::MASK)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn horizontal_res_1(self) -> u8 {
        (self.0 & 3) as u8
    }

    pub fn vertical_res(self) -> VerticalRes {
        if (self.0 >> 2) & 1 != 0 {
            VerticalRes::R480
        } else {
            VerticalRes::R240
        }
    }

    pub fn video_mode(self) -> VideoMode {
        if (self.0 >> 3) & 1 != 0 {
            VideoMode::PAL
        } else {
            VideoMode::NTSC
        }
    }

    pub fn color_depth(self) -> ColorDepth {
        if (self.0 >> 4) & 1 != 0 {
            ColorDepth::C24Bit
        } else {
            ColorDepth::C15Bit
        }
    }

    pub fn interlaced(self) -> bool {
        (self.0 >> 5) & 1 != 0
    }

    pub fn horizontal_res_2(self) -> u8 {
        ((self.0 >> 6) & 1) as u8
    }

    pub fn reverse_flag(self) -> bool {
        (self.0 >> 7) & 1 != 0
    }

    /// Decoded horizontal resolution
    pub fn horizontal_res(self) -> HorizontalRes {
        match (self.horizontal_res_2(), self.horizontal_res_1()) {
            (1, _) => HorizontalRes::R368,
            (_, 0) => HorizontalRes::R256,
            (_, 1) => HorizontalRes::R320,
            (_, 2) => HorizontalRes::R512,
            _ => HorizontalRes::R640,
        }
    }
}

/// Horizontal resolution modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalRes {
    /// 256 pixels wide
    R256,

    /// 320 pixels wide (most common)
    R320,

    /// 512 pixels wide
    R512,

    /// 640 pixels wide
    R640,

    /// 368 pixels wide (rarely used)
    R368,
}

/// Vertical resolution modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalRes {
    /// 240 lines (NTSC) or 256 lines (PAL)
    R240,

    /// 480 lines (NTSC interlaced) or 512 lines (PAL interlaced)
    R480,
}

/// Video mode (refresh rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoMode {
    /// NTSC mode: 60Hz refresh rate
    NTSC,

    /// PAL mode: 50Hz refresh rate
    PAL,
}

/// Display color depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    /// 15-bit color (5-5-5 RGB)
    C15Bit,

    /// 24-bit color (8-8-8 RGB)
    C24Bit,
}

/// Texture window settings, GP0(E2h)
///
/// All four fields are 5 bits wide, in 8-pixel steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureWindow {
    pub mask_x: u8,
    pub mask_y: u8,
    pub offset_x: u8,
    pub offset_y: u8,
}

impl TextureWindow {
    /// Decode a GP0(E2h) argument
    pub fn from_argument(argument: u32) -> Self {
        Self {
            mask_x: (argument & 0x1F) as u8,
            mask_y: ((argument >> 5) & 0x1F) as u8,
            offset_x: ((argument >> 10) & 0x1F) as u8,
            offset_y: ((argument >> 15) & 0x1F) as u8,
        }
    }

    /// Pack back into the GP0(E2h) layout (used by GP1(10h) info queries)
    pub fn to_argument(self) -> u32 {
        (self.mask_x as u32)
            | (self.mask_y as u32) << 5
            | (self.offset_x as u32) << 10
            | (self.offset_y as u32) << 15
    }
}

/// Drawing area corners, GP0(E3h)/GP0(E4h)
///
/// X and Y are 10 bits each. Reset clears every corner to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingArea {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl DrawingArea {
    /// Decode a corner argument into (x, y)
    pub fn decode_corner(argument: u32) -> (u16, u16) {
        ((argument & 0x3FF) as u16, ((argument >> 10) & 0x3FF) as u16)
    }

    pub fn top_left_info(self) -> u32 {
        (self.y1 as u32) << 10 | self.x1 as u32
    }

    pub fn bottom_right_info(self) -> u32 {
        (self.y2 as u32) << 10 | self.x2 as u32
    }
}

/// Drawing offset, GP0(E5h)
///
/// Signed 11-bit values, sign-extended on write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingOffset {
    pub x: i16,
    pub y: i16,
}

impl DrawingOffset {
    pub fn from_argument(argument: u32) -> Self {
        // Take bits 0-10, shift left by 5, then arithmetic shift right by 5
        let x = ((argument & 0x7FF) as i16) << 5 >> 5;
        let y = (((argument >> 11) & 0x7FF) as i16) << 5 >> 5;
        Self { x, y }
    }

    pub fn to_info(self) -> u32 {
        ((self.y as u16 as u32) & 0x7FF) << 11 | ((self.x as u16 as u32) & 0x7FF)
    }
}

/// Mask bit settings, GP0(E6h)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSettings {
    /// Set bit 15 of every pixel drawn
    pub set_mask_while_drawing: bool,

    /// Skip pixels whose bit 15 is already set
    pub check_mask_before_draw: bool,
}

impl MaskSettings {
    pub fn from_argument(argument: u32) -> Self {
        Self {
            set_mask_while_drawing: argument & 1 != 0,
            check_mask_before_draw: (argument >> 1) & 1 != 0,
        }
    }
}

/// Horizontal display range X1 after reset
pub const DEFAULT_DISPLAY_RANGE_X1: u16 = 0x200;

/// Horizontal display range X2 after reset (256 pixels × 10 dots)
pub const DEFAULT_DISPLAY_RANGE_X2: u16 = 0x200 + 256 * 10;

/// Vertical display range Y1 after reset
pub const DEFAULT_DISPLAY_RANGE_Y1: u16 = 0x10;

/// Vertical display range Y2 after reset
pub const DEFAULT_DISPLAY_RANGE_Y2: u16 = 0x10 + 240;

/// Display control state written through GP1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayControl {
    /// Display disabled, GP1(03h)
    pub display_disabled: bool,

    /// Interrupt request flag, cleared by GP1(02h)
    pub irq: bool,

    /// DMA direction (0=Off, 1=FIFO, 2=CPUtoGP0, 3=GPUREADtoCPU), GP1(04h)
    pub dma_direction: u8,

    /// Display area start in VRAM, GP1(05h)
    pub area_x: u16,
    pub area_y: u16,

    /// Horizontal display range, GP1(06h)
    pub range_x1: u16,
    pub range_x2: u16,

    /// Vertical display range, GP1(07h)
    pub range_y1: u16,
    pub range_y2: u16,

    /// Texture disable allowed, GP1(09h)
    pub texture_disable_allowed: bool,

    /// Even/odd field currently displayed (interlace)
    pub odd_field: bool,
}

impl Default for DisplayControl {
    fn default() -> Self {
        Self {
            display_disabled: true,
            irq: false,
            dma_direction: 0,
            area_x: 0,
            area_y: 0,
            range_x1: DEFAULT_DISPLAY_RANGE_X1,
            range_x2: DEFAULT_DISPLAY_RANGE_X2,
            range_y1: DEFAULT_DISPLAY_RANGE_Y1,
            range_y2: DEFAULT_DISPLAY_RANGE_Y2,
            texture_disable_allowed: false,
            odd_field: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_mode_fields() {
        let mode = DrawMode::new(0x3FFF);
        assert_eq!(mode.texture_page_x_base(), 15 * 64);
        assert_eq!(mode.texture_page_y_base(), 256);
        assert_eq!(mode.semi_transparency(), 3);
        assert_eq!(mode.texture_depth(), 3);
        assert!(mode.dithering());
        assert!(mode.draw_to_display());
        assert!(mode.texture_disable());
        assert!(mode.rect_x_flip());
        assert!(mode.rect_y_flip());
    }

    #[test]
    fn test_draw_mode_masks_to_24_bits() {
        assert_eq!(DrawMode::new(0xE1FF_FFFF).raw(), 0x00FF_FFFF);
    }

    #[test]
    fn test_display_mode_fields() {
        let mode = DisplayMode::new(0x3F);
        assert_eq!(mode.horizontal_res_1(), 3);
        assert_eq!(mode.vertical_res(), VerticalRes::R480);
        assert_eq!(mode.video_mode(), VideoMode::PAL);
        assert_eq!(mode.color_depth(), ColorDepth::C24Bit);
        assert!(mode.interlaced());
        assert_eq!(mode.horizontal_res_2(), 0);
        assert!(!mode.reverse_flag());
        assert_eq!(mode.horizontal_res(), HorizontalRes::R640);
    }

    #[test]
    fn test_display_mode_368() {
        assert_eq!(DisplayMode::new(0x40).horizontal_res(), HorizontalRes::R368);
        assert_eq!(DisplayMode::new(0x01).horizontal_res(), HorizontalRes::R320);
        assert_eq!(DisplayMode::new(0x1_00).raw(), 0);
    }

    #[test]
    fn test_texture_window_round_trip() {
        let window = TextureWindow::from_argument(0x000F_FFFF);
        assert_eq!(window.mask_x, 0x1F);
        assert_eq!(window.offset_y, 0x1F);
        assert_eq!(window.to_argument(), 0x000F_FFFF);
    }

    #[test]
    fn test_drawing_offset_sign_extension() {
        let y = ((-20i16) as u16 as u32) & 0x7FF;
        let offset = DrawingOffset::from_argument(10 | (y << 11));
        assert_eq!(offset.x, 10);
        assert_eq!(offset.y, -20);
        assert_eq!(offset.to_info(), 10 | (y << 11));
    }

    #[test]
    fn test_display_control_defaults() {
        let control = DisplayControl::default();
        assert!(control.display_disabled);
        assert_eq!(control.range_x1, 0x200);
        assert_eq!(control.range_x2, 0x200 + 2560);
        assert_eq!(control.range_y1, 0x10);
        assert_eq!(control.range_y2, 0x10 + 240);
    }
}
