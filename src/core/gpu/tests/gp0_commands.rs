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

use super::super::*;
use super::send;

#[test]
fn test_nop_and_cache_clear_keep_framing() {
    let mut gpu = GPU::new();
    send(&mut gpu, &[0x0000_0000, 0x0100_0000, 0x00FF_FFFF]);
    assert!(gpu.decoder().is_idle());
    assert!(gpu.render_list().is_empty());
}

#[test]
fn test_unknown_opcode_is_ignored() {
    let mut gpu = GPU::new();
    let status = gpu.status();

    send(&mut gpu, &[0xFF12_3456, 0x1F00_0000, 0xE700_0001]);

    assert!(gpu.decoder().is_idle());
    assert_eq!(gpu.status(), status);

    // Framing continues normally afterwards
    send(&mut gpu, &[0xE100_000F]);
    assert_eq!(gpu.draw_mode().raw(), 0x0F);
}

#[test]
fn test_decoder_latches_opcode_and_argument() {
    let mut gpu = GPU::new();
    gpu.write_gp0(0x2C80_8080);

    let decoder = gpu.decoder();
    assert_eq!(decoder.opcode(), 0x2C);
    assert_eq!(decoder.argument(), 0x80_8080);
    assert_eq!(decoder.expected(), 8);
    assert_eq!(decoder.received(), 0);
    assert_eq!(
        decoder.state(),
        DecoderState::Buffering(CommandKind::Polygon(PolygonArgs::new(0x2C)))
    );
}

#[test]
fn test_argument_counts() {
    let cases: &[(u32, usize)] = &[
        (0x0200_0000, 2),
        (0x2000_0000, 3),
        (0x2400_0000, 6),
        (0x2800_0000, 4),
        (0x2C00_0000, 8),
        (0x3000_0000, 5),
        (0x3400_0000, 8),
        (0x3800_0000, 7),
        (0x3C00_0000, 11),
        (0x4000_0000, 2),
        (0x5000_0000, 3),
        (0x4800_0000, MAX_ARGUMENTS),
        (0x6000_0000, 2),
        (0x6400_0000, 3),
        (0x6800_0000, 1),
        (0x7C00_0000, 2),
        (0x8000_0000, 3),
        (0xA000_0000, 2),
        (0xC000_0000, 2),
    ];

    for &(command, expected) in cases {
        let mut gpu = GPU::new();
        gpu.write_gp0(command);
        assert_eq!(
            gpu.decoder().expected(),
            expected,
            "command 0x{:08X}",
            command
        );
    }
}

#[test]
fn test_back_to_back_commands() {
    let mut gpu = GPU::new();
    send(
        &mut gpu,
        &[
            0x2000_00FF,
            0x0000_0000,
            0x0000_0010,
            0x0010_0000,
            0xE100_0200,
            0x6800_FF00,
            0x0020_0020,
        ],
    );

    assert!(gpu.decoder().is_idle());
    assert_eq!(gpu.draw_mode().raw(), 0x200);
    assert_eq!(gpu.render_list().len(), 9);
}

#[test]
fn test_immediate_commands_not_buffered() {
    let mut gpu = GPU::new();
    gpu.write_gp0(0xE300_0000 | (20 << 10) | 10);
    assert!(gpu.decoder().is_idle());
    assert_eq!(gpu.drawing_area().x1, 10);
    assert_eq!(gpu.drawing_area().y1, 20);
}

#[test]
fn test_polyline_sentinel() {
    let mut gpu = GPU::new();
    send(&mut gpu, &[0x4800_FFFF, 0x0000_0000, 0x0000_0010, POLYLINE_TERMINATOR]);

    assert!(gpu.decoder().is_idle());
    assert_eq!(gpu.triangles().count(), 1);
}

#[test]
fn test_polyline_vertex_at_5000_5000_keeps_framing() {
    let mut gpu = GPU::new();
    send(
        &mut gpu,
        &[0x4800_0000, 0x0000_0000, 0x5000_5000, 0x0010_0010, 0x5555_5555],
    );

    assert!(gpu.decoder().is_idle());
    assert_eq!(gpu.triangles().count(), 2);
    let list = gpu.render_list();
    assert_eq!((list[2].x, list[2].y), (0x5000, 0x5000));
    assert_eq!((list[5].x, list[5].y), (16, 16));
}

#[test]
fn test_sentinel_is_data_outside_polyline() {
    // Single flat line: the second word is a vertex even if it looks like a sentinel
    let mut gpu = GPU::new();
    send(&mut gpu, &[0x4000_FFFF, 0x0000_0000, 0x5555_5555]);

    assert!(gpu.decoder().is_idle());
    let vertices = gpu.render_list();
    assert_eq!(vertices.len(), 3);
    assert_eq!((vertices[2].x, vertices[2].y), (0x5555, 0x5555));
}

#[test]
fn test_polyline_buffer_limit_completes() {
    let mut gpu = GPU::new();
    gpu.write_gp0(0x4800_FFFF);
    for i in 0..MAX_ARGUMENTS as u32 {
        gpu.write_gp0(i << 16 | i);
    }

    assert!(gpu.decoder().is_idle());
    assert_eq!(gpu.triangles().count(), MAX_ARGUMENTS - 1);
}

#[test]
fn test_polyline_single_point_draws_nothing() {
    let mut gpu = GPU::new();
    send(&mut gpu, &[0x4800_FFFF, 0x0000_0000, 0x5555_5555]);
    assert!(gpu.decoder().is_idle());
    assert!(gpu.render_list().is_empty());
}

#[test]
fn test_upload_sub_state() {
    let mut gpu = GPU::new();
    gpu.write_gp0(0xA000_0000);
    assert_eq!(
        gpu.decoder().state(),
        DecoderState::Buffering(CommandKind::CpuToVram(UploadPhase::Header))
    );

    send(&mut gpu, &[0, 0x0001_0002]);
    assert_eq!(
        gpu.decoder().state(),
        DecoderState::Buffering(CommandKind::CpuToVram(UploadPhase::Streaming))
    );

    gpu.write_gp0(0);
    assert!(gpu.decoder().is_idle());
}

#[test]
fn test_readback_sets_flag_on_latch() {
    let mut gpu = GPU::new();
    gpu.write_gp0(0xC000_0000);
    assert!(gpu.ready_vram_to_cpu);
    assert_eq!(gpu.read_mode(), ReadMode::Register);

    send(&mut gpu, &[0, 0x0001_0002]);
    assert_eq!(gpu.read_mode(), ReadMode::VramToCpu);
}

#[test]
fn test_texture_window_and_offset() {
    let mut gpu = GPU::new();
    send(&mut gpu, &[0xE200_0000 | 0x1F | (3 << 5) | (7 << 10) | (1 << 15)]);
    send(&mut gpu, &[0xE500_0000 | (0x7FF << 11) | 0x001]);

    let window = gpu.texture_window();
    assert_eq!(
        (window.mask_x, window.mask_y, window.offset_x, window.offset_y),
        (0x1F, 3, 7, 1)
    );
    assert_eq!(gpu.drawing_offset().x, 1);
    assert_eq!(gpu.drawing_offset().y, -1);
}
