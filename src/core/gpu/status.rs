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

//! GPUSTAT computation
//!
//! The status word read from port 4 (0x1F801814) is assembled from the register
//! file on every read. Nothing is cached: the IRQ flag, DMA direction and
//! readback state can change between two reads.

use bitflags::bitflags;

use super::GPU;

bitflags! {
    /// Single-bit GPUSTAT positions
    ///
    /// Multi-bit fields (draw mode bits 0-10, horizontal resolution 1 at
    /// 17-18, DMA direction at 29-30) are packed separately.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u32 {
        const SET_MASK_BIT          = 1 << 11;
        const CHECK_MASK_BIT        = 1 << 12;
        const ALWAYS_SET            = 1 << 13;
        const REVERSE_FLAG          = 1 << 14;
        const TEXTURE_DISABLE       = 1 << 15;
        const HORIZONTAL_RES_2      = 1 << 16;
        const VERTICAL_RES          = 1 << 19;
        const VIDEO_MODE_PAL        = 1 << 20;
        const COLOR_DEPTH_24BIT     = 1 << 21;
        const VERTICAL_INTERLACE    = 1 << 22;
        const DISPLAY_DISABLED      = 1 << 23;
        const INTERRUPT_REQUEST     = 1 << 24;
        const DMA_READY             = 1 << 25;
        const READY_TO_RECEIVE_CMD  = 1 << 26;
        const READY_TO_SEND_VRAM    = 1 << 27;
        const READY_TO_RECEIVE_DMA  = 1 << 28;
        const ODD_FIELD             = 1 << 31;
    }
}

impl GPU {
    /// Get current GPU status register value
    ///
    /// Packs the register file into the 32-bit GPUSTAT layout:
    ///
    /// ```text
    ///   0-10  draw mode bits 0-10         19  vertical resolution
    ///   11    set mask while drawing      20  video mode
    ///   12    check mask before draw      21  display color depth
    ///   13    always 1                    22  interlace
    ///   14    reverse flag                23  display disabled
    ///   15    texture disable             24  IRQ
    ///   16    horizontal resolution 2     25  DMA ready
    ///   17-18 horizontal resolution 1     26  ready to receive command
    ///   27    ready to send VRAM to CPU   28  ready to receive DMA block
    ///   29-30 DMA direction               31  odd field
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::GPU;
    ///
    /// let gpu = GPU::new();
    /// let status = gpu.status();
    /// assert_ne!(status & (1 << 23), 0); // display disabled after power-on
    /// assert_ne!(status & (1 << 26), 0); // ready for commands
    /// ```
    pub fn status(&self) -> u32 {
        let mut flags = StatusFlags::ALWAYS_SET
            | StatusFlags::READY_TO_RECEIVE_CMD
            | StatusFlags::READY_TO_RECEIVE_DMA;

        let mask = self.mask_settings;
        let mode = self.display_mode;
        let control = self.display_control;

        flags.set(StatusFlags::SET_MASK_BIT, mask.set_mask_while_drawing);
        flags.set(StatusFlags::CHECK_MASK_BIT, mask.check_mask_before_draw);
        flags.set(StatusFlags::REVERSE_FLAG, mode.reverse_flag());
        flags.set(StatusFlags::TEXTURE_DISABLE, self.draw_mode.texture_disable());
        flags.set(StatusFlags::HORIZONTAL_RES_2, mode.horizontal_res_2() != 0);
        flags.set(StatusFlags::VERTICAL_RES, (mode.raw() >> 2) & 1 != 0);
        flags.set(StatusFlags::VIDEO_MODE_PAL, (mode.raw() >> 3) & 1 != 0);
        flags.set(StatusFlags::COLOR_DEPTH_24BIT, (mode.raw() >> 4) & 1 != 0);
        flags.set(StatusFlags::VERTICAL_INTERLACE, mode.interlaced());
        flags.set(StatusFlags::DISPLAY_DISABLED, control.display_disabled);
        flags.set(StatusFlags::INTERRUPT_REQUEST, control.irq);
        flags.set(StatusFlags::DMA_READY, self.dma_ready());
        flags.set(StatusFlags::READY_TO_SEND_VRAM, self.ready_vram_to_cpu);
        flags.set(StatusFlags::ODD_FIELD, control.odd_field);

        let mut status = flags.bits();
        status |= self.draw_mode.raw() & 0x7FF;
        status |= (mode.horizontal_res_1() as u32) << 17;
        status |= ((control.dma_direction as u32) & 0x03) << 29;
        status
    }

    /// GPUSTAT bit 25, which depends on the DMA direction
    fn dma_ready(&self) -> bool {
        match self.display_control.dma_direction {
            0 => false,
            1 | 2 => true,
            _ => self.ready_vram_to_cpu,
        }
    }
}
