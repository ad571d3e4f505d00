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

//! GP1 port: control commands

mod control;
mod display;
mod info;

pub use info::GPU_VERSION;

use super::GPU;

impl GPU {
    /// Process GP1 command (control commands)
    ///
    /// GP1 commands are single words and never touch the GP0 framing, except
    /// for the two reset commands.
    pub fn write_gp1(&mut self, word: u32) {
        let command = (word >> 24) & 0xFF;
        let argument = word & 0x00FF_FFFF;

        log::trace!("GP1 <- 0x{:08X}", word);

        match command {
            0x00 => self.gp1_reset_gpu(),
            0x01 => self.gp1_reset_command_buffer(),
            0x02 => self.gp1_acknowledge_interrupt(),
            0x03 => self.gp1_display_enable(argument),
            0x04 => self.gp1_dma_direction(argument),
            0x05 => self.gp1_display_area_start(argument),
            0x06 => self.gp1_horizontal_display_range(argument),
            0x07 => self.gp1_vertical_display_range(argument),
            0x08 => self.gp1_display_mode(argument),
            0x09 => self.gp1_texture_disable(argument),
            0x10..=0x1F => self.gp1_get_gpu_info(argument),
            _ => {
                log::warn!(
                    "Unhandled GP1 command: 0x{:02X} (argument 0x{:06X})",
                    command,
                    argument
                );
            }
        }
    }
}
