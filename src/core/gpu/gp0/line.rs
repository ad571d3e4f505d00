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

//! GP0 line commands (0x40-0x5F)
//!
//! Lines are not rasterized here. Each segment becomes one thin triangle
//! `(sx, sy)`, `(sx+1, sy+1)`, `(ex, ey)` so the external rasterizer can treat
//! every primitive the same way. All three vertices take the segment's start
//! color.

use super::super::primitives::{decode_position, Corner};
use super::super::GPU;
use super::LineArgs;

impl GPU {
    /// GP0(0x40-0x5F): Line / Poly-line
    ///
    /// # Command Format
    ///
    /// ```text
    /// Flat:        Color+Command, Vertex1, Vertex2, [Vertex3, ..., 0x55555555]
    /// Shaded:      Color1+Command, Vertex1, Color2, Vertex2, [Color3, Vertex3, ..., 0x55555555]
    /// ```
    ///
    /// N vertices give N-1 segments; fewer than two vertices draw nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    ///
    /// gpu.write_gp0(0x48FFFFFF); // flat poly-line
    /// gpu.write_gp0(0x00000000);
    /// gpu.write_gp0(0x00000010);
    /// gpu.write_gp0(0x00100010);
    /// gpu.write_gp0(0x55555555);
    ///
    /// assert_eq!(gpu.triangles().count(), 2);
    /// ```
    pub(in crate::core::gpu) fn gp0_line(&mut self, args: LineArgs, argument: u32, arguments: &[u32]) {
        let points = Self::line_points(args, argument, arguments);

        log::debug!(
            "Line 0x{:02X}: {} points shaded={} poly={}",
            self.gp0.opcode(),
            points.len(),
            args.shaded(),
            args.poly_line()
        );

        for segment in points.windows(2) {
            let (start, end) = (segment[0], segment[1]);
            let corners = [
                start,
                Corner::new(start.x + 1, start.y + 1, start.color, 0),
                Corner::new(end.x, end.y, start.color, 0),
            ];
            self.push_polygon(&corners, false);
        }
    }

    /// Decode the vertex list of a line command
    ///
    /// Flat lines use the command color for every point. Shaded lines carry a
    /// color word before every point after the first.
    fn line_points(args: LineArgs, argument: u32, arguments: &[u32]) -> Vec<Corner> {
        let mut points = Vec::with_capacity(arguments.len());
        let mut color = argument & 0x00FF_FFFF;
        let mut words = arguments.iter().copied();

        if let Some(first) = words.next() {
            let (x, y) = decode_position(first);
            points.push(Corner::new(x, y, color, 0));
        }

        loop {
            if args.shaded() {
                match words.next() {
                    Some(next_color) => color = next_color & 0x00FF_FFFF,
                    None => break,
                }
            }
            let Some(word) = words.next() else {
                break;
            };
            let (x, y) = decode_position(word);
            points.push(Corner::new(x, y, color, 0));
        }

        points
    }
}
