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

//! Test fixtures for common test scenarios

use std::cell::RefCell;
use std::rc::Rc;

use psx_gpu::core::io_device::IoBus;
use psx_gpu::core::{GPU, MDEC};

/// GP0 port address on the bus
#[allow(dead_code)]
pub const GP0: u32 = 0x1F80_1810;

/// GP1 port address on the bus
#[allow(dead_code)]
pub const GP1: u32 = 0x1F80_1814;

/// Create a bus with a GPU and an MDEC attached
#[allow(dead_code)]
pub fn create_bus() -> (IoBus, Rc<RefCell<GPU>>, Rc<RefCell<MDEC>>) {
    let gpu = Rc::new(RefCell::new(GPU::new()));
    let mdec = Rc::new(RefCell::new(MDEC::new()));

    let mut bus = IoBus::new();
    bus.attach(gpu.clone());
    bus.attach(mdec.clone());

    (bus, gpu, mdec)
}

/// Feed a sequence of words to GP0
#[allow(dead_code)]
pub fn send_gp0(gpu: &mut GPU, words: &[u32]) {
    for &word in words {
        gpu.write_gp0(word);
    }
}

/// Upload a `width`×`height` block of pixels to VRAM at (x, y)
///
/// Pixels are packed two per word, low half first.
#[allow(dead_code)]
pub fn upload_pixels(gpu: &mut GPU, x: u16, y: u16, width: u16, height: u16, pixels: &[u16]) {
    gpu.write_gp0(0xA000_0000);
    gpu.write_gp0((y as u32) << 16 | x as u32);
    gpu.write_gp0((height as u32) << 16 | width as u32);

    for pair in pixels.chunks(2) {
        let lo = pair[0] as u32;
        let hi = pair.get(1).copied().unwrap_or(0) as u32;
        gpu.write_gp0(hi << 16 | lo);
    }
}

/// Read back a `width`×`height` block through GPUREAD
#[allow(dead_code)]
pub fn download_pixels(gpu: &mut GPU, x: u16, y: u16, width: u16, height: u16) -> Vec<u16> {
    gpu.write_gp0(0xC000_0000);
    gpu.write_gp0((y as u32) << 16 | x as u32);
    gpu.write_gp0((height as u32) << 16 | width as u32);

    let count = width as usize * height as usize;
    let mut pixels = Vec::with_capacity(count + 1);
    while pixels.len() < count {
        let word = gpu.read(0);
        pixels.push(word as u16);
        pixels.push((word >> 16) as u16);
    }
    pixels.truncate(count);
    pixels
}
