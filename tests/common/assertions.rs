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

//! Custom assertions for GPU testing

use psx_gpu::core::gpu::Vertex;
use psx_gpu::core::GPU;

/// Assert VRAM pixel has expected color
#[allow(dead_code)]
pub fn assert_vram_pixel(gpu: &GPU, x: u16, y: u16, expected: u16) {
    let actual = gpu.read_vram(x, y);
    assert_eq!(
        actual, expected,
        "VRAM at ({}, {}) mismatch: expected 0x{:04X}, got 0x{:04X}",
        x, y, expected, actual
    );
}

/// Assert a status bit is set or clear
#[allow(dead_code)]
pub fn assert_status_bit(gpu: &GPU, bit: u32, expected: bool) {
    let status = gpu.status();
    assert_eq!(
        status & (1 << bit) != 0,
        expected,
        "GPUSTAT bit {} mismatch in 0x{:08X}",
        bit,
        status
    );
}

/// Assert a vertex sits at the given position
#[allow(dead_code)]
pub fn assert_vertex_at(vertex: &Vertex, x: i32, y: i32) {
    assert_eq!(
        (vertex.x, vertex.y),
        (x, y),
        "Vertex position mismatch: expected ({}, {}), got ({}, {})",
        x,
        y,
        vertex.x,
        vertex.y
    );
}
