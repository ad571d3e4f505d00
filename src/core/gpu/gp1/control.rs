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

//! GP1 control commands
//!
//! Reset, interrupt acknowledge and DMA direction.

use super::super::GPU;

impl GPU {
    /// GP1(0x00): Reset GPU
    ///
    /// Restores every register to its power-on value and drops any partial
    /// GP0 command. VRAM and the render list are left alone.
    pub(in crate::core::gpu) fn gp1_reset_gpu(&mut self) {
        self.reset_registers();
        log::debug!("GPU reset");
    }

    /// GP1(0x01): Reset Command Buffer
    ///
    /// Drops a partially received GP0 command (including a pending upload)
    /// and cancels an unfinished readback.
    pub(in crate::core::gpu) fn gp1_reset_command_buffer(&mut self) {
        self.gp0.reset();
        self.cancel_readback();
        log::debug!("Command buffer reset");
    }

    /// GP1(0x02): Acknowledge GPU Interrupt
    pub(in crate::core::gpu) fn gp1_acknowledge_interrupt(&mut self) {
        self.display_control.irq = false;
        log::debug!("GPU interrupt acknowledged");
    }

    /// GP1(0x04): DMA Direction
    ///
    /// # Arguments
    ///
    /// * `argument` - Bits 0-1: Direction (0=Off, 1=FIFO, 2=CPUtoGP0, 3=GPUREADtoCPU)
    pub(in crate::core::gpu) fn gp1_dma_direction(&mut self, argument: u32) {
        let direction = (argument & 3) as u8;
        self.display_control.dma_direction = direction;

        match direction {
            0 => log::debug!("DMA off"),
            1 => log::debug!("DMA FIFO"),
            2 => log::debug!("DMA CPU→GP0"),
            _ => log::debug!("DMA GPUREAD→CPU"),
        }
    }

    /// GP1(0x09): Allow Texture Disable
    pub(in crate::core::gpu) fn gp1_texture_disable(&mut self, argument: u32) {
        self.display_control.texture_disable_allowed = argument & 1 != 0;
        log::debug!(
            "Texture disable allowed: {}",
            self.display_control.texture_disable_allowed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_command_buffer_aborts_upload() {
        let mut gpu = GPU::new();
        gpu.write_gp0(0xA000_0000);
        gpu.write_gp0(0x0000_0000);
        gpu.write_gp0(0x0001_0004);
        assert!(!gpu.decoder().is_idle());

        gpu.gp1_reset_command_buffer();
        assert!(gpu.decoder().is_idle());

        // The next word is a command again, not pixel data
        gpu.write_gp0(0x02FF_FFFF);
        assert_eq!(gpu.read_vram(0, 0), 0x0000);
    }

    #[test]
    fn test_dma_direction_masked() {
        let mut gpu = GPU::new();
        gpu.gp1_dma_direction(0xFF);
        assert_eq!(gpu.display_control.dma_direction, 3);
    }
}
