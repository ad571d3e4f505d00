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

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use psx_gpu::core::config::{Config, JsonStyle};
use psx_gpu::core::error::Result;
use psx_gpu::core::save_state::SaveState;
use psx_gpu::core::trace::{load_trace, replay};
use psx_gpu::core::GPU;

/// Replay a GPU port-access trace
#[derive(Parser)]
#[command(name = "gpu-trace")]
#[command(about = "Replay PlayStation GPU port accesses", long_about = None)]
struct Args {
    /// Path to the trace file
    trace_file: PathBuf,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print the render list as JSON after replay
    #[arg(short = 'd', long)]
    dump_primitives: bool,

    /// Write a save state after replay
    #[arg(short = 's', long)]
    save_state: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    info!("gpu-trace v{}", env!("CARGO_PKG_VERSION"));
    info!("Loading trace from: {}", args.trace_file.display());

    let entries = load_trace(&args.trace_file).inspect_err(|e| {
        error!("Failed to load trace: {}", e);
    })?;

    let mut gpu = GPU::new();
    let reads = replay(&mut gpu, &entries);

    info!("Replayed {} accesses ({} reads)", entries.len(), reads.len());
    info!("GPUSTAT: 0x{:08X}", gpu.status());
    info!("Primitives: {} triangles", gpu.triangles().count());

    for (index, value) in reads.iter().enumerate() {
        info!("read[{}] = 0x{:08X}", index, value);
    }

    if args.dump_primitives || config.output.dump_primitives {
        let json = match config.output.primitives_json {
            JsonStyle::Pretty => serde_json::to_string_pretty(gpu.render_list())?,
            JsonStyle::Compact => serde_json::to_string(gpu.render_list())?,
        };
        println!("{}", json);
    }

    if let Some(path) = args.save_state.or(config.output.save_state) {
        let label = args.trace_file.display().to_string();
        SaveState::from_gpu(&gpu, label).save_to_file(&path)?;
        info!("Save state written to: {}", path.display());
    }

    Ok(())
}
