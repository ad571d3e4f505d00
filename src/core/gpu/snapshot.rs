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

//! Capturing and restoring GPU state

use crate::core::error::Result;
use crate::core::save_state::{GpuState, StateSave};

use super::GPU;

impl GPU {
    /// Capture registers, decoder framing and VRAM
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_vram(1, 2, 0x1234);
    /// let state = gpu.snapshot();
    ///
    /// let mut other = GPU::new();
    /// other.restore(&state).unwrap();
    /// assert_eq!(other.read_vram(1, 2), 0x1234);
    /// ```
    pub fn snapshot(&self) -> GpuState {
        GpuState {
            vram: self.vram.as_slice().to_vec(),
            draw_mode: self.draw_mode,
            texture_window: self.texture_window,
            drawing_area: self.drawing_area,
            drawing_offset: self.drawing_offset,
            mask_settings: self.mask_settings,
            display_mode: self.display_mode,
            display_control: self.display_control,
            ready_vram_to_cpu: self.ready_vram_to_cpu,
            decoder: self.gp0.clone(),
            read_mode: self.read_mode,
            gpuread: self.gpuread,
            region: self.region,
        }
    }

    /// Overwrite this GPU with a captured state
    ///
    /// The render list is left as it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the VRAM image is not 1024×512 cells, or if the
    /// decoder counters or transfer region are out of range. Nothing is
    /// modified in that case.
    pub fn restore(&mut self, state: &GpuState) -> Result<()> {
        state.decoder.validate()?;
        state.region.validate()?;
        self.vram.load(&state.vram)?;

        self.draw_mode = state.draw_mode;
        self.texture_window = state.texture_window;
        self.drawing_area = state.drawing_area;
        self.drawing_offset = state.drawing_offset;
        self.mask_settings = state.mask_settings;
        self.display_mode = state.display_mode;
        self.display_control = state.display_control;
        self.ready_vram_to_cpu = state.ready_vram_to_cpu;
        self.gp0 = state.decoder.clone();
        self.read_mode = state.read_mode;
        self.gpuread = state.gpuread;
        self.region = state.region;

        log::debug!("GPU state restored");
        Ok(())
    }
}

impl StateSave for GPU {
    type State = GpuState;

    fn to_state(&self) -> GpuState {
        self.snapshot()
    }

    fn restore_from_state(&mut self, state: &GpuState) -> Result<()> {
        self.restore(state)
    }
}
