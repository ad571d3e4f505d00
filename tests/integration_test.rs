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

mod common;

use common::assertions::{assert_status_bit, assert_vertex_at, assert_vram_pixel};
use common::fixtures::{create_bus, download_pixels, send_gp0, upload_pixels, GP0, GP1};
use psx_gpu::core::config::Config;
use psx_gpu::core::error::{EmulatorError, Result};
use psx_gpu::core::save_state::SaveState;
use psx_gpu::core::trace::{parse_trace, replay};
use psx_gpu::core::GPU;

#[test]
fn test_basic_initialization() -> Result<()> {
    let mut gpu = GPU::new();
    assert!(gpu.decoder().is_idle());
    assert!(gpu.render_list().is_empty());
    assert_eq!(gpu.read(0), 0);
    Ok(())
}

#[test]
fn test_upload_then_readback() {
    let mut gpu = GPU::new();
    let pixels: Vec<u16> = (0..32).map(|i| 0x0400 + i).collect();

    upload_pixels(&mut gpu, 100, 200, 8, 4, &pixels);
    assert!(gpu.decoder().is_idle());
    assert_vram_pixel(&gpu, 100, 200, 0x0400);
    assert_vram_pixel(&gpu, 107, 203, 0x041F);

    let read = download_pixels(&mut gpu, 100, 200, 8, 4);
    assert_eq!(read, pixels);
    assert_status_bit(&gpu, 27, false);
}

#[test]
fn test_readback_sets_ready_flag_until_drained() {
    let mut gpu = GPU::new();
    send_gp0(&mut gpu, &[0xC000_0000, 0x0000_0000, 0x0001_0004]);
    assert_status_bit(&gpu, 27, true);

    gpu.read(0);
    assert_status_bit(&gpu, 27, true);
    gpu.read(0);
    assert_status_bit(&gpu, 27, false);
}

#[test]
fn test_drawing_commands_through_bus() -> Result<()> {
    let (bus, gpu, _mdec) = create_bus();

    // Drawing offset has no effect on assembled positions
    bus.write32(GP0, 0xE500_0000)?;
    // Shaded triangle
    for word in [
        0x3000_00FF,
        0x0010_0010,
        0x0000_FF00,
        0x0010_0020,
        0x00FF_0000,
        0x0020_0010,
    ] {
        bus.write32(GP0, word)?;
    }

    let gpu = gpu.borrow();
    let vertices = gpu.render_list();
    assert_eq!(vertices.len(), 3);
    assert_vertex_at(&vertices[0], 0x10, 0x10);
    assert_vertex_at(&vertices[1], 0x20, 0x10);
    assert_vertex_at(&vertices[2], 0x10, 0x20);
    assert_eq!((vertices[0].r, vertices[0].g, vertices[0].b), (0xFF, 0, 0));
    assert_eq!((vertices[1].r, vertices[1].g, vertices[1].b), (0, 0xFF, 0));
    assert_eq!((vertices[2].r, vertices[2].g, vertices[2].b), (0, 0, 0xFF));
    Ok(())
}

#[test]
fn test_gp1_through_bus() -> Result<()> {
    let (bus, gpu, _mdec) = create_bus();

    bus.write32(GP1, 0x0300_0001)?;
    assert_ne!(bus.read32(GP1)? & (1 << 23), 0);

    bus.write32(GP1, 0x0300_0000)?;
    assert_eq!(bus.read32(GP1)? & (1 << 23), 0);

    bus.write32(GP1, 0x1000_0007)?;
    assert_eq!(bus.read32(GP0)?, 2);

    assert!(gpu.borrow().decoder().is_idle());
    Ok(())
}

#[test]
fn test_mdec_alongside_gpu() -> Result<()> {
    let (bus, _gpu, mdec) = create_bus();

    // Scale table: 32 parameter words
    bus.write32(0x1F80_1820, 3 << 29)?;
    assert_ne!(bus.read32(0x1F80_1824)? & (1 << 29), 0);

    for _ in 0..32 {
        bus.write32(0x1F80_1820, 0)?;
    }
    assert_eq!(mdec.borrow().status(), 0x8000_FFFF);
    Ok(())
}

#[test]
fn test_unmapped_bus_address() {
    let (bus, _gpu, _mdec) = create_bus();
    assert!(matches!(
        bus.read32(0x1F80_1830),
        Err(EmulatorError::InvalidMemoryAccess { .. })
    ));
}

#[test]
fn test_trace_replay_matches_direct_writes() {
    let text = "\
        # shaded poly-line with three points\n\
        gp0 580000FF\n\
        gp0 00000000\n\
        gp0 0000FF00\n\
        gp0 00000010\n\
        gp0 00FF0000\n\
        gp0 00100010\n\
        gp0 55555555\n\
        read4\n";

    let entries = parse_trace(text).unwrap();
    let mut traced = GPU::new();
    let reads = replay(&mut traced, &entries);

    let mut direct = GPU::new();
    send_gp0(
        &mut direct,
        &[
            0x5800_00FF,
            0x0000_0000,
            0x0000_FF00,
            0x0000_0010,
            0x00FF_0000,
            0x0010_0010,
            0x5555_5555,
        ],
    );

    assert_eq!(traced.render_list(), direct.render_list());
    assert_eq!(traced.triangles().count(), 2);
    assert_eq!(reads, vec![direct.status()]);
}

#[test]
fn test_save_state_file_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("gpu.state");

    let mut gpu = GPU::new();
    send_gp0(&mut gpu, &[0x0200_00FF, 0x0000_0000, 0x0004_0004]);
    send_gp0(&mut gpu, &[0xE100_0123, 0xE500_0801]);
    gpu.write_gp1(0x0800_0007);

    SaveState::from_gpu(&gpu, "fill").save_to_file(&path)?;

    let loaded = SaveState::load_from_file(&path)?;
    assert_eq!(loaded.metadata.label, "fill");

    let mut restored = GPU::new();
    loaded.apply(&mut restored)?;

    assert_vram_pixel(&restored, 3, 3, 0x7C00);
    assert_eq!(restored.status(), gpu.status());
    assert_eq!(restored.drawing_offset(), gpu.drawing_offset());
    Ok(())
}

#[test]
fn test_config_file_drives_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("gpu-trace.toml");
    std::fs::write(
        &path,
        "log_level = \"debug\"\n[output]\ndump_primitives = true\n",
    )?;

    let config = Config::load(&path)?;
    assert!(config.output.dump_primitives);
    assert_eq!(config.output.save_state, None);
    Ok(())
}

#[test]
fn test_render_list_serializes_to_json() {
    let mut gpu = GPU::new();
    send_gp0(&mut gpu, &[0x6000_FFFF, 0x0000_0000, 0x0008_0008]);

    let json = serde_json::to_value(gpu.render_list()).unwrap();
    let vertices = json.as_array().unwrap();
    assert_eq!(vertices.len(), 6);
    assert_eq!(vertices[3]["x"], 8);
    assert_eq!(vertices[3]["y"], 0);
}
