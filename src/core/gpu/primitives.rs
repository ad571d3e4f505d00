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

//! GPU primitive assembly
//!
//! Drawing commands do not touch VRAM here. Each polygon, line or rectangle is
//! turned into triangles (three [`Vertex`] records each) and appended to the
//! render list, which an external rasterizer drains.
//!
//! # Quads
//!
//! A quad with corners 0..3 becomes two triangles, (0, 1, 2) and (1, 2, 3).
//! The second triangle fans from corner 1, not corner 0.

use serde::{Deserialize, Serialize};

use super::GPU;

/// One vertex of a render-list triangle
///
/// # Examples
///
/// ```
/// use psx_gpu::core::GPU;
///
/// let mut gpu = GPU::new();
/// gpu.write_gp0(0x20FF0000); // flat triangle, color 0xFF0000
/// gpu.write_gp0(0x00000000);
/// gpu.write_gp0(0x00000010);
/// gpu.write_gp0(0x00100000);
///
/// let vertex = gpu.render_list()[1];
/// assert_eq!((vertex.x, vertex.y), (16, 0));
/// assert_eq!((vertex.r, vertex.g, vertex.b), (0x00, 0x00, 0xFF));
/// assert_eq!(vertex.bit_depth, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// Position in console coordinates (not clamped)
    pub x: i32,
    pub y: i32,

    /// Color, 8 bits per channel
    pub r: u8,
    pub g: u8,
    pub b: u8,

    /// Texture coordinate inside the page (0 when untextured)
    pub u: u8,
    pub v: u8,

    /// Texture bit depth: 4, 8, 16, or 0 when untextured
    pub bit_depth: u8,

    /// CLUT origin in VRAM
    pub clut_x: u16,
    pub clut_y: u16,

    /// Texture page base in VRAM
    pub page_x: u16,
    pub page_y: u16,
}

/// A decoded corner handed to the assembler
///
/// `color` is a packed 24-bit command color, `texcoord` is the raw texture
/// word (coordinate in bits 0-15, CLUT or page attribute in bits 16-31).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(in crate::core::gpu) struct Corner {
    pub x: i32,
    pub y: i32,
    pub color: u32,
    pub texcoord: u32,
}

impl Corner {
    pub fn new(x: i32, y: i32, color: u32, texcoord: u32) -> Self {
        Self {
            x,
            y,
            color,
            texcoord,
        }
    }
}

/// Decode a vertex word into signed (x, y)
///
/// ```text
/// Bits 0-15:  X coordinate (signed 16-bit)
/// Bits 16-31: Y coordinate (signed 16-bit)
/// ```
#[inline]
pub(in crate::core::gpu) fn decode_position(word: u32) -> (i32, i32) {
    let x = (word & 0xFFFF) as u16 as i16 as i32;
    let y = ((word >> 16) & 0xFFFF) as u16 as i16 as i32;
    (x, y)
}

/// Texture sampling attributes shared by every vertex of one primitive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TextureAttributes {
    bit_depth: u8,
    clut_x: u16,
    clut_y: u16,
    page_x: u16,
    page_y: u16,
}

impl TextureAttributes {
    /// Decode CLUT from the first texture word and page from the second
    ///
    /// ```text
    /// word 0 bits 16-21: CLUT X / 16     bits 22-30: CLUT Y
    /// word 1 bits 16-19: page X / 64     bit 20:     page Y / 256
    ///        bits 23-24: depth (0=4bit, 1=8bit, 2/3=15bit)
    /// ```
    fn decode(clut_word: u32, page_word: u32) -> Self {
        let bit_depth = match (page_word >> 23) & 3 {
            0 => 4,
            1 => 8,
            _ => 16,
        };

        Self {
            bit_depth,
            clut_x: (((clut_word >> 16) & 0x3F) * 16) as u16,
            clut_y: ((clut_word >> 22) & 0x1FF) as u16,
            page_x: (((page_word >> 16) & 0xF) * 64) as u16,
            page_y: (((page_word >> 20) & 1) * 256) as u16,
        }
    }
}

impl GPU {
    /// Append a triangle or quad to the render list
    ///
    /// `corners` holds 3 or 4 entries. Quads are emitted as two triangles,
    /// (0, 1, 2) followed by (1, 2, 3). Untextured primitives get zero texture
    /// coordinates and bit depth 0.
    pub(in crate::core::gpu) fn push_polygon(&mut self, corners: &[Corner], textured: bool) {
        let attributes = if textured && corners.len() >= 2 {
            TextureAttributes::decode(corners[0].texcoord, corners[1].texcoord)
        } else {
            TextureAttributes::default()
        };

        let indices: &[usize] = if corners.len() >= 4 {
            &[0, 1, 2, 1, 2, 3]
        } else {
            &[0, 1, 2]
        };

        for &i in indices {
            let vertex = Self::make_vertex(&corners[i], &attributes, textured);
            self.render_list.push(vertex);
        }
    }

    fn make_vertex(corner: &Corner, attributes: &TextureAttributes, textured: bool) -> Vertex {
        let (u, v) = if textured {
            (
                (corner.texcoord & 0xFF) as u8,
                ((corner.texcoord >> 8) & 0xFF) as u8,
            )
        } else {
            (0, 0)
        };

        Vertex {
            x: corner.x,
            y: corner.y,
            r: (corner.color & 0xFF) as u8,
            g: ((corner.color >> 8) & 0xFF) as u8,
            b: ((corner.color >> 16) & 0xFF) as u8,
            u,
            v,
            bit_depth: attributes.bit_depth,
            clut_x: attributes.clut_x,
            clut_y: attributes.clut_y,
            page_x: attributes.page_x,
            page_y: attributes.page_y,
        }
    }

    /// Primitives assembled so far, in render order
    ///
    /// Every three consecutive vertices form one triangle. The list keeps
    /// growing until the consumer drains it.
    pub fn render_list(&self) -> &[Vertex] {
        &self.render_list
    }

    /// Iterate over the assembled triangles without consuming them
    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex]> {
        self.render_list.chunks_exact(3)
    }

    /// Remove and return every assembled vertex
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_gp0(0x68FFFFFF); // 1×1 rectangle
    /// gpu.write_gp0(0x00100010);
    ///
    /// let vertices: Vec<_> = gpu.drain_render_list().collect();
    /// assert_eq!(vertices.len(), 6);
    /// assert!(gpu.render_list().is_empty());
    /// ```
    pub fn drain_render_list(&mut self) -> std::vec::Drain<'_, Vertex> {
        self.render_list.drain(..)
    }
}
