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

//! MDEC (Macroblock Decoder) register shell
//!
//! The MDEC sits next to the GPU on the I/O bus. This module models its
//! register interface only: commands are framed and their parameter words are
//! counted, but no macroblock is ever decoded.
//!
//! ## Register Layout
//!
//! ```text
//! 0x1F801820 (bytes 0-3): W: command/parameter   R: data out (always 0)
//! 0x1F801824 (bytes 4-7): W: control             R: status
//! ```
//!
//! Access is byte-wide. A 32-bit word is handled once its highest byte
//! (offset 3 or 7) has been written.
//!
//! ## Commands (bits 29-31)
//!
//! ```text
//! 1: Decode macroblock  parameter words = bits 0-15
//! 2: Set quant table    16 words (32 when bit 0 "color" is set)
//! 3: Set scale table    32 words
//! ```
//!
//! ## Status Register
//!
//! ```text
//! 31:    Data-out FIFO empty (always 1)
//! 29:    Command busy
//! 28:    Data-in request (control bit 30)
//! 25:    Color
//! 0-15:  Remaining parameter words minus 1 (0xFFFF when idle)
//! ```
//!
//! ## References
//!
//! - [PSX-SPX: MDEC](http://problemkaputt.de/psx-spx.htm#macroblockdecodermdec)

use crate::core::error::{MdecError, Result};
use crate::core::io_device::IODevice;


/// Command currently receiving parameter words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdecCommand {
    DecodeMacroblock,
    SetQuantTable,
    SetScaleTable,
}

/// Macroblock decoder register state
pub struct MDEC {
    /// Bytes of the command/parameter word written so far
    command_latch: u32,

    /// Bytes of the control word written so far
    control_latch: u32,

    /// Command in progress
    current: Option<MdecCommand>,

    /// Parameter words still expected by `current`
    remaining: u32,

    /// Luminance and color (quant table command bit 0)
    color: bool,

    /// DMA enables from the control register (bits 30 and 29)
    dma_in_enabled: bool,
    dma_out_enabled: bool,
}

impl MDEC {
    /// Physical base address
    pub const BASE_ADDRESS: u32 = 0x1F80_1820;

    const STATUS_DATA_OUT_EMPTY: u32 = 1 << 31;
    const STATUS_BUSY: u32 = 1 << 29;
    const STATUS_DATA_IN_REQUEST: u32 = 1 << 28;
    const STATUS_COLOR: u32 = 1 << 25;

    pub fn new() -> Self {
        Self {
            command_latch: 0,
            control_latch: 0,
            current: None,
            remaining: 0,
            color: false,
            dma_in_enabled: false,
            dma_out_enabled: false,
        }
    }

    /// Abort the current command and clear every flag
    pub fn reset(&mut self) {
        *self = Self::new();
        log::debug!("MDEC reset");
    }

    /// Advance the device; decoding is not modelled so nothing happens
    pub fn step(&mut self) {}

    /// Command currently receiving parameters
    pub fn current_command(&self) -> Option<MdecCommand> {
        self.current
    }

    /// Data-in DMA enable (control bit 30)
    pub fn dma_in_enabled(&self) -> bool {
        self.dma_in_enabled
    }

    /// Data-out DMA enable (control bit 29)
    ///
    /// No data is ever produced, so this never raises a data-out request.
    pub fn dma_out_enabled(&self) -> bool {
        self.dma_out_enabled
    }

    /// Compose the status register
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::mdec::MDEC;
    ///
    /// let mdec = MDEC::new();
    /// assert_eq!(mdec.status(), 0x8000_FFFF);
    /// ```
    pub fn status(&self) -> u32 {
        let mut status = Self::STATUS_DATA_OUT_EMPTY;
        if self.current.is_some() {
            status |= Self::STATUS_BUSY;
        }
        if self.dma_in_enabled {
            status |= Self::STATUS_DATA_IN_REQUEST;
        }
        if self.color {
            status |= Self::STATUS_COLOR;
        }
        status | (self.remaining.wrapping_sub(1) & 0xFFFF)
    }

    /// Write one byte to the device
    ///
    /// # Errors
    ///
    /// Returns [`MdecError::InvalidRegister`] for offsets past 7.
    pub fn write8(&mut self, offset: u32, value: u8) -> Result<()> {
        let shift = (offset & 3) * 8;
        let mask = !(0xFFu32 << shift);

        match offset {
            0..=3 => {
                self.command_latch = (self.command_latch & mask) | ((value as u32) << shift);
                if offset == 3 {
                    self.handle_word(self.command_latch);
                }
            }
            4..=7 => {
                self.control_latch = (self.control_latch & mask) | ((value as u32) << shift);
                if offset == 7 {
                    self.handle_control(self.control_latch);
                }
            }
            _ => return Err(MdecError::InvalidRegister { offset }.into()),
        }
        Ok(())
    }

    /// Read one byte from the device
    ///
    /// # Errors
    ///
    /// Returns [`MdecError::InvalidRegister`] for offsets past 7.
    pub fn read8(&self, offset: u32) -> Result<u8> {
        let shift = (offset & 3) * 8;
        let word = match offset {
            0..=3 => 0,
            4..=7 => self.status(),
            _ => return Err(MdecError::InvalidRegister { offset }.into()),
        };
        Ok((word >> shift) as u8)
    }

    /// Handle a complete command or parameter word
    fn handle_word(&mut self, word: u32) {
        if self.current.is_some() {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                log::debug!("MDEC {:?} complete", self.current);
                self.current = None;
            }
            return;
        }

        let (command, parameters) = match word >> 29 {
            1 => (MdecCommand::DecodeMacroblock, word & 0xFFFF),
            2 => {
                self.color = word & 1 != 0;
                let words = if self.color { 32 } else { 16 };
                (MdecCommand::SetQuantTable, words)
            }
            3 => (MdecCommand::SetScaleTable, 32),
            other => {
                log::debug!("MDEC no-op command {} (0x{:08X})", other, word);
                return;
            }
        };

        log::debug!("MDEC {:?}: {} parameter words", command, parameters);

        if parameters > 0 {
            self.current = Some(command);
            self.remaining = parameters;
        }
    }

    /// Handle a complete control word
    ///
    /// ```text
    /// 31: Reset
    /// 30: Enable data-in DMA
    /// 29: Enable data-out DMA
    /// ```
    fn handle_control(&mut self, word: u32) {
        if word & (1 << 31) != 0 {
            self.reset();
            return;
        }
        self.dma_in_enabled = word & (1 << 30) != 0;
        self.dma_out_enabled = word & (1 << 29) != 0;
        log::debug!(
            "MDEC control: dma in={} out={}",
            self.dma_in_enabled,
            self.dma_out_enabled
        );
    }
}

impl Default for MDEC {
    fn default() -> Self {
        Self::new()
    }
}

impl IODevice for MDEC {
    fn address_range(&self) -> (u32, u32) {
        (Self::BASE_ADDRESS, Self::BASE_ADDRESS + 7)
    }

    /// 32-bit reads are four byte reads
    fn read_register(&mut self, offset: u32) -> Result<u32> {
        let base = offset & !3;
        let mut word = 0u32;
        for byte in 0..4 {
            word |= (self.read8(base + byte)? as u32) << (byte * 8);
        }
        Ok(word)
    }

    /// 32-bit writes are four byte writes, lowest byte first
    fn write_register(&mut self, offset: u32, value: u32) -> Result<()> {
        let base = offset & !3;
        for byte in 0..4 {
            self.write8(base + byte, (value >> (byte * 8)) as u8)?;
        }
        Ok(())
    }

    fn read_register8(&mut self, offset: u32) -> Result<u8> {
        self.read8(offset)
    }

    fn write_register8(&mut self, offset: u32, value: u8) -> Result<()> {
        self.write8(offset, value)
    }

    fn name(&self) -> &str {
        "MDEC"
    }
}
