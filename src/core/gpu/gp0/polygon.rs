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

//! GP0 polygon commands (0x20-0x3F)

use super::super::primitives::{decode_position, Corner};
use super::super::GPU;
use super::PolygonArgs;

impl GPU {
    /// GP0(0x20-0x3F): Polygon
    ///
    /// Decodes 3 or 4 vertices and hands them to the primitive assembler.
    ///
    /// # Command Format
    ///
    /// ```text
    /// Flat:     Color+Command, Vertex1, [Tex1], Vertex2, [Tex2], Vertex3, [Tex3], ...
    /// Shaded:   Color1+Command, Vertex1, [Tex1], Color2, Vertex2, [Tex2], Color3, ...
    ///
    /// Tex1 bits 16-31: CLUT     Tex2 bits 16-31: texture page
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    ///
    /// // Shaded triangle: red, green, blue corners
    /// gpu.write_gp0(0x300000FF);
    /// gpu.write_gp0(0x00000000);
    /// gpu.write_gp0(0x0000FF00);
    /// gpu.write_gp0(0x00000020);
    /// gpu.write_gp0(0x00FF0000);
    /// gpu.write_gp0(0x00200000);
    ///
    /// let colors: Vec<_> = gpu.render_list().iter().map(|v| (v.r, v.g, v.b)).collect();
    /// assert_eq!(colors, vec![(0xFF, 0, 0), (0, 0xFF, 0), (0, 0, 0xFF)]);
    /// ```
    pub(in crate::core::gpu) fn gp0_polygon(
        &mut self,
        args: PolygonArgs,
        argument: u32,
        arguments: &[u32],
    ) {
        let count = args.vertex_count();
        if arguments.len() < args.argument_count() {
            return;
        }

        let mut corners = [Corner::default(); 4];
        let mut next_color = argument;
        let mut words = arguments.iter().copied();

        for corner in corners.iter_mut().take(count) {
            let (x, y) = decode_position(words.next().unwrap_or_default());
            let texcoord = if args.textured() {
                words.next().unwrap_or_default()
            } else {
                0
            };

            *corner = Corner::new(x, y, next_color & 0x00FF_FFFF, texcoord);

            if args.shaded() {
                next_color = words.next().unwrap_or_default();
            }
        }

        log::debug!(
            "Polygon 0x{:02X}: {} vertices textured={} shaded={} semi={}",
            self.gp0.opcode(),
            count,
            args.textured(),
            args.shaded(),
            args.semi_transparent()
        );

        self.push_polygon(&corners[..count], args.textured());
    }
}
