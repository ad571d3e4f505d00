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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use psx_gpu::core::gpu::{to_15bit, to_24bit};
use psx_gpu::core::GPU;
use std::hint::black_box;

fn polygon_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gp0_polygon");

    group.bench_function("flat_triangle", |b| {
        let mut gpu = GPU::new();
        b.iter(|| {
            gpu.write_gp0(black_box(0x2000_00FF));
            gpu.write_gp0(0x0000_0000);
            gpu.write_gp0(0x0000_0040);
            gpu.write_gp0(0x0040_0000);
            gpu.drain_render_list().for_each(drop);
        });
    });

    // Gouraud-shaded, textured quad: the longest fixed-size polygon packet
    group.bench_function("shaded_textured_quad", |b| {
        let mut gpu = GPU::new();
        b.iter(|| {
            gpu.write_gp0(black_box(0x3C00_00FF));
            for i in 0..4u32 {
                if i > 0 {
                    gpu.write_gp0(0x0000_FF00);
                }
                gpu.write_gp0((i * 16) << 16 | i * 16);
                gpu.write_gp0(0x0010_0000 | i);
            }
            gpu.drain_render_list().for_each(drop);
        });
    });

    group.finish();
}

fn line_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gp0_polyline");

    for points in [4u32, 16, 31].iter() {
        group.bench_with_input(BenchmarkId::new("flat", points), points, |b, &points| {
            let mut gpu = GPU::new();
            b.iter(|| {
                gpu.write_gp0(black_box(0x4800_FFFF));
                for i in 0..points {
                    gpu.write_gp0(i << 16 | i);
                }
                gpu.write_gp0(0x5555_5555);
                gpu.drain_render_list().for_each(drop);
            });
        });
    }

    group.finish();
}

fn vram_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gp0_vram");

    for size in [16u32, 64, 256].iter() {
        group.bench_with_input(BenchmarkId::new("fill", size), size, |b, &size| {
            let mut gpu = GPU::new();
            b.iter(|| {
                gpu.write_gp0(black_box(0x0200_7F7F));
                gpu.write_gp0(0x0000_0000);
                gpu.write_gp0(size << 16 | size);
            });
        });

        group.bench_with_input(BenchmarkId::new("upload", size), size, |b, &size| {
            let mut gpu = GPU::new();
            let words = size * size / 2;
            b.iter(|| {
                gpu.write_gp0(0xA000_0000);
                gpu.write_gp0(0x0000_0000);
                gpu.write_gp0(size << 16 | size);
                for i in 0..words {
                    gpu.write_gp0(black_box(i));
                }
            });
        });
    }

    group.bench_function("copy_64x64", |b| {
        let mut gpu = GPU::new();
        b.iter(|| {
            gpu.write_gp0(0x8000_0000);
            gpu.write_gp0(0x0000_0000);
            gpu.write_gp0(black_box(0x0100_0100));
            gpu.write_gp0(0x0040_0040);
        });
    });

    group.finish();
}

fn color_benchmark(c: &mut Criterion) {
    c.bench_function("color_round_trip", |b| {
        b.iter(|| {
            for color in (0..0x0100_0000u32).step_by(0x10101) {
                black_box(to_24bit(to_15bit(black_box(color))));
            }
        });
    });
}

criterion_group!(
    benches,
    polygon_benchmark,
    line_benchmark,
    vram_benchmark,
    color_benchmark
);
criterion_main!(benches);
