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

//! GPU (Graphics Processing Unit) command processor
//!
//! This module implements the command side of the PlayStation GPU:
//! - Decoding the GP0 (drawing/data) and GP1 (control) word streams
//! - Managing 1MB of VRAM (1024×512 pixels, 16-bit per pixel)
//! - Assembling polygons, lines and rectangles into triangles for an
//!   external rasterizer
//! - Reporting GPUSTAT and GPUREAD
//!
//! Pixel-accurate rasterization is not done here. Drawing commands only
//! append to the render list; fills, copies and uploads write VRAM directly.
//!
//! # Ports
//!
//! ```text
//!   offset 0  write: GP0 command/data    read: GPUREAD
//!   offset 4  write: GP1 control         read: GPUSTAT
//! ```
//!
//! # Color Format
//!
//! VRAM pixels use 16-bit color in 5-5-5 format:
//! - Bits 0-4: Red (5 bits)
//! - Bits 5-9: Green (5 bits)
//! - Bits 10-14: Blue (5 bits)
//! - Bit 15: Mask bit
//!
//! # References
//!
//! - [PSX-SPX: GPU](http://problemkaputt.de/psx-spx.htm#gpu)

use serde::{Deserialize, Serialize};

use crate::core::error::{GpuError, Result};
use crate::core::io_device::IODevice;

mod color;
mod gp0;
mod gp1;
mod primitives;
mod registers;
mod snapshot;
mod status;
#[cfg(test)]
mod tests;
mod vram;

pub use color::{color_mean, to_15bit, to_24bit};
pub use gp0::{
    CommandDecoder, CommandKind, DecoderState, LineArgs, PolygonArgs, RectangleArgs,
    TransferRegion, UploadPhase, MAX_ARGUMENTS, POLYLINE_TERMINATOR,
};
pub use gp1::GPU_VERSION;
pub use primitives::Vertex;
pub use registers::*;
pub use status::StatusFlags;
pub use vram::{clamp_max, Vram};

/// What a GPUREAD access returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadMode {
    /// The last staged value
    #[default]
    Register,

    /// The next two pixels of a VRAM→CPU transfer
    VramToCpu,

    /// The answer to the last GP1(10h) info query
    Info,
}

/// GPU state
///
/// Owns VRAM, the register file, the GP0 decoder and the render list. All
/// state changes happen inside port reads and writes; nothing runs in the
/// background.
///
/// # Examples
///
/// ```
/// use psx_gpu::core::GPU;
///
/// let mut gpu = GPU::new();
///
/// // Write a white pixel to VRAM
/// gpu.write_vram(100, 100, 0x7FFF);
/// assert_eq!(gpu.read_vram(100, 100), 0x7FFF);
/// ```
pub struct GPU {
    /// VRAM: 1024×512 pixels, 16-bit per pixel
    pub(in crate::core::gpu) vram: Vram,

    /// Draw mode, GP0(E1h)
    pub(in crate::core::gpu) draw_mode: DrawMode,

    /// Texture window, GP0(E2h)
    pub(in crate::core::gpu) texture_window: TextureWindow,

    /// Drawing area, GP0(E3h)/GP0(E4h)
    pub(in crate::core::gpu) drawing_area: DrawingArea,

    /// Drawing offset, GP0(E5h)
    pub(in crate::core::gpu) drawing_offset: DrawingOffset,

    /// Mask bit settings, GP0(E6h)
    pub(in crate::core::gpu) mask_settings: MaskSettings,

    /// Display mode, GP1(08h)
    pub(in crate::core::gpu) display_mode: DisplayMode,

    /// Display control state written by the other GP1 commands
    pub(in crate::core::gpu) display_control: DisplayControl,

    /// Set when a VRAM→CPU command is latched, cleared when its data has been read
    pub(in crate::core::gpu) ready_vram_to_cpu: bool,

    /// GP0 framing state
    pub(in crate::core::gpu) gp0: CommandDecoder,

    /// Source of GPUREAD data
    pub(in crate::core::gpu) read_mode: ReadMode,

    /// Last value staged for GPUREAD
    pub(in crate::core::gpu) gpuread: u32,

    /// Rectangle walked by the active upload or readback
    pub(in crate::core::gpu) region: TransferRegion,

    /// Triangles waiting for the rasterizer, three vertices each
    pub(in crate::core::gpu) render_list: Vec<Vertex>,
}

impl GPU {
    /// Create a new GPU instance in its power-on state
    ///
    /// VRAM is black, the display is disabled and the decoder waits for a
    /// command word.
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::GPU;
    ///
    /// let gpu = GPU::new();
    /// assert_eq!(gpu.read_vram(0, 0), 0x0000);
    /// assert!(gpu.decoder().is_idle());
    /// ```
    pub fn new() -> Self {
        Self {
            vram: Vram::new(),
            draw_mode: DrawMode::default(),
            texture_window: TextureWindow::default(),
            drawing_area: DrawingArea::default(),
            drawing_offset: DrawingOffset::default(),
            mask_settings: MaskSettings::default(),
            display_mode: DisplayMode::default(),
            display_control: DisplayControl::default(),
            ready_vram_to_cpu: false,
            gp0: CommandDecoder::new(),
            read_mode: ReadMode::Register,
            gpuread: 0,
            region: TransferRegion::default(),
            render_list: Vec::new(),
        }
    }

    /// Reset GPU to its power-on state
    ///
    /// Unlike GP1(00h), this also clears VRAM and the render list.
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_vram(500, 250, 0xFFFF);
    /// gpu.reset();
    /// assert_eq!(gpu.read_vram(500, 250), 0x0000);
    /// ```
    pub fn reset(&mut self) {
        self.reset_registers();
        self.vram.fill(0x0000);
        self.render_list.clear();
        self.gpuread = 0;
    }

    /// Restore registers, decoder and read port to their reset values
    ///
    /// Shared by [`GPU::reset`] and GP1(00h). VRAM is untouched.
    pub(in crate::core::gpu) fn reset_registers(&mut self) {
        self.draw_mode = DrawMode::default();
        self.texture_window = TextureWindow::default();
        self.drawing_area = DrawingArea::default();
        self.drawing_offset = DrawingOffset::default();
        self.mask_settings = MaskSettings::default();
        self.display_mode = DisplayMode::default();

        let odd_field = self.display_control.odd_field;
        self.display_control = DisplayControl {
            odd_field,
            ..DisplayControl::default()
        };

        self.gp0.reset();
        self.cancel_readback();
    }

    /// Leave readback mode and clear the ready-to-send flag
    pub(in crate::core::gpu) fn cancel_readback(&mut self) {
        self.read_mode = ReadMode::Register;
        self.ready_vram_to_cpu = false;
        self.region = TransferRegion::default();
    }

    /// Read a 32-bit GPU port
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset from the GPU base (0x1F801810)
    ///
    /// Offset 0 is GPUREAD, offset 4 is GPUSTAT. Other offsets read as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// assert_eq!(gpu.read(4), gpu.status());
    /// assert_eq!(gpu.read(0), 0);
    /// ```
    pub fn read(&mut self, offset: u32) -> u32 {
        match offset & !3 {
            0 => self.read_gpuread(),
            4 => self.status(),
            _ => {
                log::warn!("Read from unknown GPU port offset 0x{:X}", offset);
                0
            }
        }
    }

    /// Write a 32-bit GPU port
    ///
    /// Offset 0 feeds GP0, offset 4 feeds GP1. Other offsets are ignored.
    pub fn write(&mut self, offset: u32, value: u32) {
        match offset & !3 {
            0 => self.write_gp0(value),
            4 => self.write_gp1(value),
            _ => log::warn!(
                "Write to unknown GPU port offset 0x{:X}: 0x{:08X}",
                offset,
                value
            ),
        }
    }

    /// Read from GPUREAD register (0x1F801810)
    ///
    /// During a VRAM→CPU transfer each read returns the next two pixels.
    /// Otherwise the last staged value (an info answer or the final readback
    /// word) is returned again.
    pub fn read_gpuread(&mut self) -> u32 {
        if self.read_mode == ReadMode::VramToCpu {
            self.gpuread = self.read_vram_word();
        }
        self.gpuread
    }

    /// Read a 16-bit pixel from VRAM
    ///
    /// Coordinates wrap to 0-1023 / 0-511.
    #[inline(always)]
    pub fn read_vram(&self, x: u16, y: u16) -> u16 {
        self.vram.read(x as u32, y as u32)
    }

    /// Write a 16-bit pixel to VRAM
    ///
    /// Coordinates wrap to 0-1023 / 0-511.
    #[inline(always)]
    pub fn write_vram(&mut self, x: u16, y: u16, value: u16) {
        self.vram.write(x as u32, y as u32, value);
    }

    /// Whole VRAM, for a rasterizer or a frame dump
    pub fn vram(&self) -> &Vram {
        &self.vram
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn texture_window(&self) -> TextureWindow {
        self.texture_window
    }

    pub fn drawing_area(&self) -> DrawingArea {
        self.drawing_area
    }

    pub fn drawing_offset(&self) -> DrawingOffset {
        self.drawing_offset
    }

    pub fn mask_settings(&self) -> MaskSettings {
        self.mask_settings
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn display_control(&self) -> DisplayControl {
        self.display_control
    }

    pub fn read_mode(&self) -> ReadMode {
        self.read_mode
    }

    /// Set the field reported in GPUSTAT bit 31
    ///
    /// Field timing belongs to the video output stage, which calls this.
    pub fn set_odd_field(&mut self, odd: bool) {
        self.display_control.odd_field = odd;
    }
}

impl Default for GPU {
    fn default() -> Self {
        Self::new()
    }
}

impl GPU {
    /// Physical address of GP0/GPUREAD
    pub const BASE_ADDRESS: u32 = 0x1F80_1810;
}

impl IODevice for GPU {
    fn address_range(&self) -> (u32, u32) {
        (Self::BASE_ADDRESS, Self::BASE_ADDRESS + 7)
    }

    fn read_register(&mut self, offset: u32) -> Result<u32> {
        match offset {
            0..=7 => Ok(self.read(offset)),
            _ => Err(GpuError::InvalidRegister { offset }.into()),
        }
    }

    fn write_register(&mut self, offset: u32, value: u32) -> Result<()> {
        match offset {
            0..=7 => {
                self.write(offset, value);
                Ok(())
            }
            _ => Err(GpuError::InvalidRegister { offset }.into()),
        }
    }

    fn name(&self) -> &str {
        "GPU"
    }
}
