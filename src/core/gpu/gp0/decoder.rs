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

//! GP0 command framing
//!
//! The GP0 port receives a flat stream of 32-bit words. The first word of a
//! command carries the opcode in bits 24-31 and a 24-bit argument (usually a
//! color) in bits 0-23. Most commands then need a fixed number of argument
//! words; poly-lines run until a terminator word.
//!
//! [`CommandDecoder`] holds the framing state for one GPU instance:
//!
//! ```text
//!   AwaitingCommand ──opcode──▶ Buffering(kind) ──last word──▶ AwaitingCommand
//!                                     │
//!                    CpuToVram(Header)└──header──▶ CpuToVram(Streaming) ──rect full──▶ AwaitingCommand
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::GpuError;

/// Size of the argument buffer (longest poly-line)
pub const MAX_ARGUMENTS: usize = 32;

/// Word that ends a poly-line argument stream
pub const POLYLINE_TERMINATOR: u32 = 0x5555_5555;

/// Polygon opcode flags, GP0(20h..3Fh)
///
/// ```text
///   Bit 0: raw texture (no color modulation)
///   Bit 1: semi-transparent
///   Bit 2: textured
///   Bit 3: quad (4 vertices) instead of triangle
///   Bit 4: Gouraud shaded
/// ```
///
/// # Examples
///
/// ```
/// use psx_gpu::core::gpu::PolygonArgs;
///
/// let args = PolygonArgs::new(0x3C); // shaded textured quad
/// assert_eq!(args.vertex_count(), 4);
/// assert_eq!(args.argument_count(), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonArgs(u8);

impl PolygonArgs {
    pub fn new(opcode: u8) -> Self {
        Self(opcode)
    }

    pub fn raw_texture(self) -> bool {
        self.0 & 0x01 != 0
    }

    pub fn semi_transparent(self) -> bool {
        self.0 & 0x02 != 0
    }

    pub fn textured(self) -> bool {
        self.0 & 0x04 != 0
    }

    pub fn quad(self) -> bool {
        self.0 & 0x08 != 0
    }

    pub fn shaded(self) -> bool {
        self.0 & 0x10 != 0
    }

    pub fn vertex_count(self) -> usize {
        if self.quad() {
            4
        } else {
            3
        }
    }

    /// Words following the command word
    ///
    /// Each vertex has a position word plus a texcoord word when textured.
    /// Shaded polygons carry a color word before every vertex but the first
    /// (whose color is the command argument).
    pub fn argument_count(self) -> usize {
        let n = self.vertex_count();
        let per_vertex = if self.textured() { 2 } else { 1 };
        let colors = if self.shaded() { n - 1 } else { 0 };
        n * per_vertex + colors
    }
}

/// Line opcode flags, GP0(40h..5Fh)
///
/// ```text
///   Bit 1: semi-transparent
///   Bit 3: poly-line (terminated by 0x55555555)
///   Bit 4: Gouraud shaded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineArgs(u8);

impl LineArgs {
    pub fn new(opcode: u8) -> Self {
        Self(opcode)
    }

    pub fn semi_transparent(self) -> bool {
        self.0 & 0x02 != 0
    }

    pub fn poly_line(self) -> bool {
        self.0 & 0x08 != 0
    }

    pub fn shaded(self) -> bool {
        self.0 & 0x10 != 0
    }

    /// Words following the command word
    ///
    /// A single line is start + end (+ end color when shaded). Poly-lines
    /// report the buffer size; the terminator word ends them earlier.
    pub fn argument_count(self) -> usize {
        if self.poly_line() {
            MAX_ARGUMENTS
        } else if self.shaded() {
            3
        } else {
            2
        }
    }
}

/// Rectangle opcode flags, GP0(60h..7Fh)
///
/// ```text
///   Bit 0:   raw texture
///   Bit 1:   semi-transparent
///   Bit 2:   textured
///   Bit 3-4: size (0=variable, 1=1×1, 2=8×8, 3=16×16)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangleArgs(u8);

impl RectangleArgs {
    pub fn new(opcode: u8) -> Self {
        Self(opcode)
    }

    pub fn raw_texture(self) -> bool {
        self.0 & 0x01 != 0
    }

    pub fn semi_transparent(self) -> bool {
        self.0 & 0x02 != 0
    }

    pub fn textured(self) -> bool {
        self.0 & 0x04 != 0
    }

    /// Fixed edge length, or `None` for variable-size rectangles
    pub fn fixed_size(self) -> Option<u32> {
        match (self.0 >> 3) & 3 {
            0 => None,
            1 => Some(1),
            2 => Some(8),
            _ => Some(16),
        }
    }

    /// Position word, texcoord word when textured, size word when variable
    pub fn argument_count(self) -> usize {
        let texture = if self.textured() { 1 } else { 0 };
        let size = if self.fixed_size().is_none() { 1 } else { 0 };
        1 + texture + size
    }
}

/// Progress of a CPU→VRAM upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPhase {
    /// Collecting the destination and size words
    Header,

    /// Every word is two pixels for the destination rectangle
    Streaming,
}

/// Command being framed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    FillRectangle,
    Polygon(PolygonArgs),
    Line(LineArgs),
    Rectangle(RectangleArgs),
    CpuToVram(UploadPhase),
    VramToCpu,
    VramToVram,
}

/// Decoder state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecoderState {
    /// Next word is a command word
    #[default]
    AwaitingCommand,

    /// Collecting argument words for a command
    Buffering(CommandKind),
}

/// GP0 framing state of one GPU
///
/// # Examples
///
/// ```
/// use psx_gpu::core::gpu::{CommandKind, DecoderState};
/// use psx_gpu::core::GPU;
///
/// let mut gpu = GPU::new();
/// gpu.write_gp0(0x02000000); // fill rectangle needs two more words
/// assert_eq!(
///     gpu.decoder().state(),
///     DecoderState::Buffering(CommandKind::FillRectangle)
/// );
/// assert_eq!(gpu.decoder().expected(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDecoder {
    state: DecoderState,
    opcode: u8,
    argument: u32,
    arguments: [u32; MAX_ARGUMENTS],
    expected: usize,
    received: usize,
    sentinel_terminated: bool,
}

impl CommandDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::AwaitingCommand,
            opcode: 0,
            argument: 0,
            arguments: [0; MAX_ARGUMENTS],
            expected: 0,
            received: 0,
            sentinel_terminated: false,
        }
    }

    /// Drop any partial command and wait for a command word
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DecoderState::AwaitingCommand
    }

    /// Latched opcode (bits 24-31 of the command word)
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Latched 24-bit argument (bits 0-23 of the command word)
    pub fn argument(&self) -> u32 {
        self.argument
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn received(&self) -> usize {
        self.received
    }

    /// Latch a command word without starting a buffered command
    pub(in crate::core::gpu) fn latch(&mut self, word: u32) {
        self.opcode = (word >> 24) as u8;
        self.argument = word & 0x00FF_FFFF;
        self.expected = 0;
        self.received = 0;
        self.sentinel_terminated = false;
    }

    /// Start buffering `expected` argument words for `kind`
    pub(in crate::core::gpu) fn begin(&mut self, kind: CommandKind, expected: usize) {
        self.state = DecoderState::Buffering(kind);
        self.expected = expected.min(MAX_ARGUMENTS);
        self.received = 0;
        self.sentinel_terminated = matches!(kind, CommandKind::Line(args) if args.poly_line());
    }

    /// Append an argument word; returns true once the command is complete
    ///
    /// In sentinel mode a terminator word completes the command without
    /// being stored.
    pub(in crate::core::gpu) fn push(&mut self, word: u32) -> bool {
        if self.sentinel_terminated && word == POLYLINE_TERMINATOR {
            self.expected = self.received;
            return true;
        }

        if self.received < self.expected {
            self.arguments[self.received] = word;
            self.received += 1;
        }

        self.received >= self.expected
    }

    /// Copy of the buffered argument words
    ///
    /// Handlers need `&mut GPU` while reading the arguments, so they work on
    /// a copy instead of borrowing the decoder.
    pub(in crate::core::gpu) fn take_arguments(&self) -> ([u32; MAX_ARGUMENTS], usize) {
        (self.arguments, self.received)
    }

    /// Return to `AwaitingCommand` after a command completes
    pub(in crate::core::gpu) fn finish(&mut self) {
        self.state = DecoderState::AwaitingCommand;
        self.sentinel_terminated = false;
    }

    /// Check the buffer counters of a restored decoder
    pub(in crate::core::gpu) fn validate(&self) -> Result<(), GpuError> {
        if self.expected > MAX_ARGUMENTS || self.received > self.expected {
            return Err(GpuError::InvalidState(format!(
                "decoder expects {} words with {} received (buffer holds {})",
                self.expected, self.received, MAX_ARGUMENTS
            )));
        }
        Ok(())
    }

    /// Switch a finished upload header into pixel streaming
    pub(in crate::core::gpu) fn stream_upload(&mut self) {
        self.state = DecoderState::Buffering(CommandKind::CpuToVram(UploadPhase::Streaming));
    }
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_argument_counts() {
        assert_eq!(PolygonArgs::new(0x20).argument_count(), 3);
        assert_eq!(PolygonArgs::new(0x24).argument_count(), 6);
        assert_eq!(PolygonArgs::new(0x28).argument_count(), 4);
        assert_eq!(PolygonArgs::new(0x2C).argument_count(), 8);
        assert_eq!(PolygonArgs::new(0x30).argument_count(), 5);
        assert_eq!(PolygonArgs::new(0x34).argument_count(), 8);
        assert_eq!(PolygonArgs::new(0x38).argument_count(), 7);
        assert_eq!(PolygonArgs::new(0x3C).argument_count(), 11);
    }

    #[test]
    fn test_line_argument_counts() {
        assert_eq!(LineArgs::new(0x40).argument_count(), 2);
        assert_eq!(LineArgs::new(0x50).argument_count(), 3);
        assert_eq!(LineArgs::new(0x48).argument_count(), MAX_ARGUMENTS);
        assert!(LineArgs::new(0x58).poly_line());
    }

    #[test]
    fn test_rectangle_argument_counts() {
        assert_eq!(RectangleArgs::new(0x60).argument_count(), 2);
        assert_eq!(RectangleArgs::new(0x64).argument_count(), 3);
        assert_eq!(RectangleArgs::new(0x68).argument_count(), 1);
        assert_eq!(RectangleArgs::new(0x7C).argument_count(), 2);
        assert_eq!(RectangleArgs::new(0x70).fixed_size(), Some(8));
        assert_eq!(RectangleArgs::new(0x78).fixed_size(), Some(16));
    }

    #[test]
    fn test_push_completes_at_expected_count() {
        let mut decoder = CommandDecoder::new();
        decoder.latch(0x0200_0000);
        decoder.begin(CommandKind::FillRectangle, 2);
        assert!(!decoder.push(1));
        assert!(decoder.push(2));
        let (arguments, count) = decoder.take_arguments();
        assert_eq!(&arguments[..count], &[1, 2]);
    }

    #[test]
    fn test_sentinel_not_stored() {
        let mut decoder = CommandDecoder::new();
        decoder.latch(0x4800_0000);
        decoder.begin(CommandKind::Line(LineArgs::new(0x48)), MAX_ARGUMENTS);
        assert!(!decoder.push(0x0000_0000));
        assert!(!decoder.push(0x0010_0010));
        assert!(decoder.push(0x5555_5555));
        assert_eq!(decoder.received(), 2);
        assert_eq!(decoder.expected(), 2);
    }

    #[test]
    fn test_polyline_vertex_resembling_sentinel_is_stored() {
        let mut decoder = CommandDecoder::new();
        decoder.latch(0x4800_0000);
        decoder.begin(CommandKind::Line(LineArgs::new(0x48)), MAX_ARGUMENTS);
        assert!(!decoder.push(0x0000_0000));
        assert!(!decoder.push(0x5000_5000));
        assert_eq!(decoder.received(), 2);
    }

    #[test]
    fn test_sentinel_ignored_for_fixed_commands() {
        let mut decoder = CommandDecoder::new();
        decoder.latch(0x4000_0000);
        decoder.begin(CommandKind::Line(LineArgs::new(0x40)), 2);
        assert!(!decoder.push(0x5555_5555));
        assert_eq!(decoder.received(), 1);
    }

    #[test]
    fn test_validate_rejects_oversized_counts() {
        let mut decoder = CommandDecoder::new();
        decoder.begin(CommandKind::FillRectangle, 2);
        assert!(decoder.validate().is_ok());

        decoder.expected = MAX_ARGUMENTS + 8;
        assert!(decoder.validate().is_err());

        decoder.expected = 2;
        decoder.received = 3;
        assert!(decoder.validate().is_err());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut decoder = CommandDecoder::new();
        decoder.latch(0x8000_0000);
        decoder.begin(CommandKind::VramToVram, 3);
        decoder.push(7);
        decoder.reset();
        assert!(decoder.is_idle());
        assert_eq!(decoder.received(), 0);
    }
}
