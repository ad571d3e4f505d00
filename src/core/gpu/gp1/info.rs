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

//! GP1(0x10-0x1F): GPU info queries

use super::super::{ReadMode, GPU};

/// Value returned for info code 7
pub const GPU_VERSION: u32 = 2;

impl GPU {
    /// GP1(0x10-0x1F): Get GPU Info
    ///
    /// Stages a register value in GPUREAD and switches the read port to info
    /// mode. Codes without an answer keep the previously staged value.
    ///
    /// ```text
    /// 0x02: Texture window
    /// 0x03: Drawing area top-left      (Y << 10) | X
    /// 0x04: Drawing area bottom-right  (Y << 10) | X
    /// 0x05: Drawing offset             (Y << 11) | X, 11 bits each
    /// 0x07: GPU version (2)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use psx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    /// gpu.write_gp0(0xE3000000 | (20 << 10) | 10);
    /// gpu.write_gp1(0x10000003);
    /// assert_eq!(gpu.read(0), (20 << 10) | 10);
    /// ```
    pub(in crate::core::gpu) fn gp1_get_gpu_info(&mut self, argument: u32) {
        let code = argument & 0xF;
        self.read_mode = ReadMode::Info;

        let value = match code {
            0x02 => self.texture_window.to_argument(),
            0x03 => self.drawing_area.top_left_info(),
            0x04 => self.drawing_area.bottom_right_info(),
            0x05 => self.drawing_offset.to_info(),
            0x07 => GPU_VERSION,
            _ => {
                log::warn!("Unhandled GPU info request: 0x{:X}", code);
                return;
            }
        };

        log::debug!("GPU info 0x{:X} = 0x{:08X}", code, value);
        self.gpuread = value;
    }
}
