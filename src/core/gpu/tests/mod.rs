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

//! GPU module tests
//!
//! Tests are organized into the following modules:
//! - `basic`: Construction, reset and port dispatch
//! - `vram`: Uploads, readbacks, copies and fills end to end
//! - `gp0_commands`: GP0 framing across command boundaries
//! - `gp1_commands`: GP1 control commands and info queries
//! - `rendering`: Primitive assembly into the render list
//! - `status`: GPUSTAT bit positions
//! - `properties`: Property-based tests

mod gp0_commands;

use super::GPU;

/// Feed `words` to GP0 in order
fn send(gpu: &mut GPU, words: &[u32]) {
    for &word in words {
        gpu.write_gp0(word);
    }
}
