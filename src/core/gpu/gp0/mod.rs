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

//! GP0 port: drawing and VRAM transfer commands

mod decoder;
mod drawing_mode;
mod fill;
mod line;
mod polygon;
mod rectangle;
mod transfer;

pub use decoder::{
    CommandDecoder, CommandKind, DecoderState, LineArgs, PolygonArgs, RectangleArgs, UploadPhase,
    MAX_ARGUMENTS, POLYLINE_TERMINATOR,
};
pub use transfer::TransferRegion;

use super::GPU;

impl GPU {
    /// Process GP0 command (drawing and VRAM commands)
    ///
    /// Words are consumed strictly in order. A command word either executes
    /// immediately (E1h-E6h, no-ops) or starts buffering its argument words;
    /// the handler runs when the last argument arrives.
    ///
    /// # Arguments
    ///
    /// * `word` - 32-bit GP0 word
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_gp0(0x02FF0000); // fill with 0xFF0000
    /// gpu.write_gp0(0x00000000); // at (0, 0)
    /// gpu.write_gp0(0x00020002); // 2×2
    /// assert_eq!(gpu.read_vram(1, 1), 0x001F);
    /// assert_eq!(gpu.read_vram(2, 2), 0x0000);
    /// ```
    pub fn write_gp0(&mut self, word: u32) {
        log::trace!("GP0 <- 0x{:08X}", word);

        match self.gp0.state() {
            DecoderState::AwaitingCommand => self.latch_command(word),
            DecoderState::Buffering(CommandKind::CpuToVram(UploadPhase::Streaming)) => {
                self.upload_word(word);
            }
            DecoderState::Buffering(kind) => {
                if self.gp0.push(word) {
                    self.execute_command(kind);
                }
            }
        }
    }

    /// Handle a word that arrives while no command is pending
    fn latch_command(&mut self, word: u32) {
        self.gp0.latch(word);
        let opcode = self.gp0.opcode();
        let argument = self.gp0.argument();

        match opcode {
            0x00 | 0x01 => {}
            0x02 => self.gp0.begin(CommandKind::FillRectangle, 2),
            0x20..=0x3F => {
                let args = PolygonArgs::new(opcode);
                self.gp0
                    .begin(CommandKind::Polygon(args), args.argument_count());
            }
            0x40..=0x5F => {
                let args = LineArgs::new(opcode);
                self.gp0.begin(CommandKind::Line(args), args.argument_count());
            }
            0x60..=0x7F => {
                let args = RectangleArgs::new(opcode);
                self.gp0
                    .begin(CommandKind::Rectangle(args), args.argument_count());
            }
            0x80 => self.gp0.begin(CommandKind::VramToVram, 3),
            0xA0 => self
                .gp0
                .begin(CommandKind::CpuToVram(UploadPhase::Header), 2),
            0xC0 => {
                self.ready_vram_to_cpu = true;
                self.gp0.begin(CommandKind::VramToCpu, 2);
            }
            0xE1 => self.gp0_draw_mode(argument),
            0xE2 => self.gp0_texture_window(argument),
            0xE3 => self.gp0_draw_area_top_left(argument),
            0xE4 => self.gp0_draw_area_bottom_right(argument),
            0xE5 => self.gp0_draw_offset(argument),
            0xE6 => self.gp0_mask_settings(argument),
            _ => {
                log::warn!(
                    "Unhandled GP0 command: 0x{:02X} (argument 0x{:06X})",
                    opcode,
                    argument
                );
            }
        }
    }

    /// Run the handler for a fully buffered command
    fn execute_command(&mut self, kind: CommandKind) {
        let argument = self.gp0.argument();
        let (arguments, count) = self.gp0.take_arguments();
        let arguments = &arguments[..count];
        self.gp0.finish();

        match kind {
            CommandKind::FillRectangle => self.gp0_fill_rectangle(argument, arguments),
            CommandKind::Polygon(args) => self.gp0_polygon(args, argument, arguments),
            CommandKind::Line(args) => self.gp0_line(args, argument, arguments),
            CommandKind::Rectangle(args) => self.gp0_rectangle(args, argument, arguments),
            CommandKind::CpuToVram(_) => self.gp0_cpu_to_vram(arguments),
            CommandKind::VramToCpu => self.gp0_vram_to_cpu(arguments),
            CommandKind::VramToVram => self.gp0_vram_to_vram(arguments),
        }
    }

    /// Current GP0 framing state
    pub fn decoder(&self) -> &CommandDecoder {
        &self.gp0
    }
}
