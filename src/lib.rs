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

//! PlayStation GPU command processor
//!
//! This library decodes the GPU's GP0/GP1 word streams, keeps VRAM and the
//! register file up to date, and turns drawing commands into a list of
//! triangles for an external rasterizer.
//!
//! # Example
//!
//! ```
//! use psx_gpu::core::GPU;
//!
//! let mut gpu = GPU::new();
//!
//! // Flat-shaded triangle
//! gpu.write(0, 0x2000_00FF);
//! gpu.write(0, 0x0000_0000);
//! gpu.write(0, 0x0000_0040);
//! gpu.write(0, 0x0040_0000);
//!
//! assert_eq!(gpu.triangles().count(), 1);
//! ```

pub mod core;
