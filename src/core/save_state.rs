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

//! GPU save states
//!
//! A save state freezes everything a GPU needs to continue exactly where it
//! stopped, including a half-received GP0 command or an unfinished upload:
//! - Metadata (timestamp, free-form label)
//! - Register file (draw mode, texture window, drawing area/offset, mask,
//!   display mode and control)
//! - GP0 decoder framing and the active transfer region
//! - GPUREAD mode and staged value
//! - VRAM
//!
//! The render list is not saved; it belongs to whoever drains it.
//!
//! # Save State Format
//!
//! States are encoded with bincode. Register types reuse their serde derives
//! through bincode's serde compatibility layer.
//!
//! # Version Compatibility
//!
//! Loading a save state with a different version fails with
//! [`EmulatorError::SaveStateVersion`].
//!
//! # Example
//!
//! ```no_run
//! use psx_gpu::core::save_state::SaveState;
//! use psx_gpu::core::GPU;
//!
//! let mut gpu = GPU::new();
//! // ... feed commands ...
//!
//! let state = SaveState::from_gpu(&gpu, "before upload");
//! state.save_to_file("gpu.state").unwrap();
//!
//! // Later: load from file
//! let loaded = SaveState::load_from_file("gpu.state").unwrap();
//! loaded.apply(&mut gpu).unwrap();
//! ```

use bincode::{config, Decode, Encode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::error::{EmulatorError, Result};
use super::gpu::{
    CommandDecoder, DisplayControl, DisplayMode, DrawMode, DrawingArea, DrawingOffset,
    MaskSettings, ReadMode, TextureWindow, TransferRegion, Vram,
};
use super::GPU;

/// Save state version for compatibility checking
///
/// Increment whenever the encoded layout changes.
pub const SAVE_STATE_VERSION: u32 = 1;

/// Complete GPU save state
#[derive(Serialize, Deserialize, Encode, Decode)]
#[bincode(encode_bounds = "", decode_bounds = "")]
pub struct SaveState {
    /// Version number for compatibility checking
    pub version: u32,

    /// Save state metadata
    pub metadata: SaveStateMetadata,

    /// GPU registers, decoder and VRAM
    #[bincode(with_serde)]
    pub gpu: GpuState,
}

/// Save state metadata
#[derive(Serialize, Deserialize, Encode, Decode)]
#[bincode(encode_bounds = "", decode_bounds = "")]
pub struct SaveStateMetadata {
    /// Timestamp when the save state was created
    #[bincode(with_serde)]
    pub timestamp: DateTime<Utc>,

    /// Free-form description (e.g. the trace file that produced the state)
    pub label: String,
}

/// Everything needed to resume a GPU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuState {
    /// VRAM in row-major order (1024×512 cells)
    pub vram: Vec<u16>,

    pub draw_mode: DrawMode,
    pub texture_window: TextureWindow,
    pub drawing_area: DrawingArea,
    pub drawing_offset: DrawingOffset,
    pub mask_settings: MaskSettings,
    pub display_mode: DisplayMode,
    pub display_control: DisplayControl,
    pub ready_vram_to_cpu: bool,

    /// GP0 framing, including any partially received command
    pub decoder: CommandDecoder,

    pub read_mode: ReadMode,
    pub gpuread: u32,

    /// Active upload/readback rectangle and cursor
    pub region: TransferRegion,
}

impl Default for GpuState {
    fn default() -> Self {
        Self {
            vram: vec![0; Vram::SIZE],
            draw_mode: DrawMode::default(),
            texture_window: TextureWindow::default(),
            drawing_area: DrawingArea::default(),
            drawing_offset: DrawingOffset::default(),
            mask_settings: MaskSettings::default(),
            display_mode: DisplayMode::default(),
            display_control: DisplayControl::default(),
            ready_vram_to_cpu: false,
            decoder: CommandDecoder::new(),
            read_mode: ReadMode::default(),
            gpuread: 0,
            region: TransferRegion::default(),
        }
    }
}

impl SaveState {
    /// Capture the current state of `gpu`
    pub fn from_gpu(gpu: &GPU, label: impl Into<String>) -> Self {
        Self {
            version: SAVE_STATE_VERSION,
            metadata: SaveStateMetadata {
                timestamp: Utc::now(),
                label: label.into(),
            },
            gpu: gpu.to_state(),
        }
    }

    /// Restore `gpu` from this state
    ///
    /// # Errors
    ///
    /// Returns an error if the stored VRAM image has the wrong size.
    pub fn apply(&self, gpu: &mut GPU) -> Result<()> {
        gpu.restore_from_state(&self.gpu)
    }

    /// Save state to file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be created
    /// - Serialization fails
    /// - Write operation fails
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = config::standard();
        let encoded = bincode::encode_to_vec(self, config)?;
        let mut file = File::create(path)?;
        file.write_all(&encoded)?;
        Ok(())
    }

    /// Load state from file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be opened or read
    /// - Deserialization fails
    /// - Version is incompatible
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        let config = config::standard();
        let (state, _): (SaveState, usize) = bincode::decode_from_slice(&buffer, config)?;

        if state.version != SAVE_STATE_VERSION {
            return Err(EmulatorError::SaveStateVersion {
                expected: SAVE_STATE_VERSION,
                got: state.version,
            });
        }

        Ok(state)
    }
}

/// Components that can be captured into and restored from a save state
pub trait StateSave {
    /// The state type for this component
    type State: Serialize + for<'de> Deserialize<'de>;

    /// Capture this component
    fn to_state(&self) -> Self::State;

    /// Restore this component from a saved state
    fn restore_from_state(&mut self, state: &Self::State) -> Result<()>;
}
