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

//! GP0 rectangle commands (0x60-0x7F)
//!
//! Rectangles are assembled as quads, so they leave the GPU as two triangles
//! like any other four-vertex polygon.

use super::super::primitives::{decode_position, Corner};
use super::super::vram::{clamp_max, Vram};
use super::super::GPU;
use super::RectangleArgs;

/// Pack a texture coordinate, each axis wrapping to 8 bits
#[inline]
fn texcoord(u: u32, v: u32) -> u32 {
    (u & 0xFF) | ((v & 0xFF) << 8)
}

impl GPU {
    /// GP0(0x60-0x7F): Rectangle
    ///
    /// # Command Format
    ///
    /// ```text
    /// Word 0: Color+Command
    /// Word 1: Vertex (top-left)
    /// Word 2: Texcoord+CLUT                (textured only)
    /// Word 3: Width (bits 0-15) + Height (bits 16-31)   (variable size only)
    /// ```
    ///
    /// The texture page comes from the current draw mode (GP0(E1h)) since the
    /// command has no page word of its own.
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    ///
    /// gpu.write_gp0(0x78FFFFFF); // 16×16 rectangle
    /// gpu.write_gp0(0x00200010); // at (16, 32)
    ///
    /// let corners: Vec<_> = gpu.render_list().iter().map(|v| (v.x, v.y)).collect();
    /// assert_eq!(corners[..3], [(16, 32), (32, 32), (16, 48)]);
    /// assert_eq!(corners[5], (32, 48));
    /// ```
    pub(in crate::core::gpu) fn gp0_rectangle(
        &mut self,
        args: RectangleArgs,
        argument: u32,
        arguments: &[u32],
    ) {
        if arguments.len() < args.argument_count() {
            return;
        }

        let (width, height) = match args.fixed_size() {
            Some(size) => (size, size),
            None => {
                let size = arguments[if args.textured() { 2 } else { 1 }];
                (
                    clamp_max(size & 0xFFFF, Vram::MAX_X),
                    clamp_max(size >> 16, Vram::MAX_Y),
                )
            }
        };

        let (x, y) = decode_position(arguments[0]);
        let (w, h) = (width as i32, height as i32);
        let color = argument & 0x00FF_FFFF;

        let mut texture = [0u32; 4];
        if args.textured() {
            let base = arguments[1];
            let (u, v) = (base & 0xFF, (base >> 8) & 0xFF);
            texture[0] = base;
            texture[1] = (self.draw_mode.raw() << 16) | texcoord(u + width, v);
            texture[2] = texcoord(u, v + height);
            texture[3] = texcoord(u + width, v + height);
        }

        log::debug!(
            "Rectangle 0x{:02X}: ({}, {}) size {}×{} textured={}",
            self.gp0.opcode(),
            x,
            y,
            width,
            height,
            args.textured()
        );

        let corners = [
            Corner::new(x, y, color, texture[0]),
            Corner::new(x + w, y, color, texture[1]),
            Corner::new(x, y + h, color, texture[2]),
            Corner::new(x + w, y + h, color, texture[3]),
        ];
        self.push_polygon(&corners, args.textured());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gpu::DrawMode;

    #[test]
    fn test_variable_size_clamped() {
        let mut gpu = GPU::new();
        gpu.gp0_rectangle(RectangleArgs::new(0x60), 0, &[0, 0xFFFF_FFFF]);

        let list = gpu.render_list();
        assert_eq!(list.len(), 6);
        assert_eq!((list[5].x, list[5].y), (1023, 511));
    }

    #[test]
    fn test_textured_rectangle_uses_draw_mode_page() {
        let mut gpu = GPU::new();
        // Page X=2*64, Y=256, 8-bit
        gpu.draw_mode = DrawMode::new(0x0000_0092);
        gpu.gp0_rectangle(
            RectangleArgs::new(0x74),
            0x808080,
            &[0x0000_0000, (0x100 << 22) | (1 << 16) | 0x1008],
        );

        let list = gpu.render_list();
        for vertex in list {
            assert_eq!(vertex.bit_depth, 8);
            assert_eq!((vertex.page_x, vertex.page_y), (128, 256));
            assert_eq!((vertex.clut_x, vertex.clut_y), (16, 0x100));
        }
        assert_eq!((list[0].u, list[0].v), (0x08, 0x10));
        assert_eq!((list[1].u, list[1].v), (0x10, 0x10));
        assert_eq!((list[2].u, list[2].v), (0x08, 0x18));
        assert_eq!((list[5].u, list[5].v), (0x10, 0x18));
    }

    #[test]
    fn test_texcoords_wrap_to_eight_bits() {
        let mut gpu = GPU::new();
        gpu.gp0_rectangle(RectangleArgs::new(0x7C), 0, &[0, 0x00F8]);
        let list = gpu.render_list();
        assert_eq!(list[1].u, 0x08);
    }
}
