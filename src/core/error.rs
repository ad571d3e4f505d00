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

/// Emulator error types
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid memory access at address 0x{address:08X}")]
    InvalidMemoryAccess { address: u32 },

    #[error("Trace parse error at line {line}: {reason}")]
    TraceParse { line: usize, reason: String },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Save state encode error: {0}")]
    SaveStateEncode(#[from] bincode::error::EncodeError),

    #[error("Save state decode error: {0}")]
    SaveStateDecode(#[from] bincode::error::DecodeError),

    #[error("Incompatible save state version: expected {expected}, got {got}")]
    SaveStateVersion { expected: u32, got: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    #[error("MDEC error: {0}")]
    Mdec(#[from] MdecError),
}

/// GPU-specific error types
#[derive(Error, Debug)]
pub enum GpuError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid GPU register offset: 0x{offset:02X}")]
    InvalidRegister { offset: u32 },

    #[error("Invalid VRAM image size: {got} pixels (expected {expected})")]
    InvalidVramSize { expected: usize, got: usize },

    #[error("Invalid GPU state: {0}")]
    InvalidState(String),
}

/// Macroblock decoder error types
#[derive(Error, Debug)]
pub enum MdecError {
    #[error("Invalid MDEC register offset: 0x{offset:02X}")]
    InvalidRegister { offset: u32 },
}
