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

//! Port-access traces
//!
//! A trace is a text file recording the GPU port accesses made by a program,
//! one per line:
//!
//! ```text
//! # fill a 16x16 block at the origin
//! gp1 03000000
//! gp0 020000FF
//! gp0 00000000
//! gp0 00100010
//! read4
//! ```
//!
//! `gp0`/`gp1` take a hexadecimal word (an optional `0x` prefix is accepted).
//! `read0` and `read4` read GPUREAD and GPUSTAT. Blank lines and everything
//! after `#` are ignored.

use std::fmt;
use std::path::Path;

use super::error::{EmulatorError, Result};
use super::GPU;

/// One recorded port access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEntry {
    /// Write to GP0 (offset 0)
    Gp0(u32),
    /// Write to GP1 (offset 4)
    Gp1(u32),
    /// Read GPUREAD (offset 0)
    Read0,
    /// Read GPUSTAT (offset 4)
    Read4,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::Gp0(word) => write!(f, "gp0 {:08X}", word),
            TraceEntry::Gp1(word) => write!(f, "gp1 {:08X}", word),
            TraceEntry::Read0 => write!(f, "read0"),
            TraceEntry::Read4 => write!(f, "read4"),
        }
    }
}

/// Parse a trace from text
///
/// # Errors
///
/// Returns [`EmulatorError::TraceParse`] with the 1-based line number of the
/// first malformed line.
///
/// # Examples
///
/// ```
/// use psx_gpu::core::trace::{parse_trace, TraceEntry};
///
/// let entries = parse_trace("gp1 0x03000001 # display off\nread4\n").unwrap();
/// assert_eq!(entries, vec![TraceEntry::Gp1(0x0300_0001), TraceEntry::Read4]);
/// ```
pub fn parse_trace(text: &str) -> Result<Vec<TraceEntry>> {
    let mut entries = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let error = |reason: String| EmulatorError::TraceParse {
            line: index + 1,
            reason,
        };

        let mut tokens = line.split_whitespace();
        let op = tokens.next().unwrap_or_default().to_ascii_lowercase();
        let operand = tokens.next();

        if let Some(extra) = tokens.next() {
            return Err(error(format!("unexpected token '{}'", extra)));
        }

        let entry = match (op.as_str(), operand) {
            ("gp0", Some(word)) => TraceEntry::Gp0(parse_word(word).map_err(&error)?),
            ("gp1", Some(word)) => TraceEntry::Gp1(parse_word(word).map_err(&error)?),
            ("gp0" | "gp1", None) => return Err(error(format!("'{}' needs a word", op))),
            ("read0", None) => TraceEntry::Read0,
            ("read4", None) => TraceEntry::Read4,
            ("read0" | "read4", Some(_)) => {
                return Err(error(format!("'{}' takes no operand", op)))
            }
            _ => return Err(error(format!("unknown access '{}'", op))),
        };
        entries.push(entry);
    }

    Ok(entries)
}

fn parse_word(token: &str) -> std::result::Result<u32, String> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).map_err(|e| format!("bad word '{}': {}", token, e))
}

/// Read and parse a trace file
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceEntry>> {
    let text = std::fs::read_to_string(path)?;
    parse_trace(&text)
}

/// Apply every access to `gpu` in order
///
/// Returns the values produced by `read0`/`read4` entries, in order.
///
/// # Examples
///
/// ```
/// use psx_gpu::core::trace::{replay, TraceEntry};
/// use psx_gpu::core::GPU;
///
/// let mut gpu = GPU::new();
/// let reads = replay(&mut gpu, &[TraceEntry::Gp1(0x1000_0007), TraceEntry::Read0]);
/// assert_eq!(reads, vec![2]);
/// ```
pub fn replay(gpu: &mut GPU, entries: &[TraceEntry]) -> Vec<u32> {
    let mut reads = Vec::new();

    for entry in entries {
        log::trace!("replay: {}", entry);
        match *entry {
            TraceEntry::Gp0(word) => gpu.write(0, word),
            TraceEntry::Gp1(word) => gpu.write(4, word),
            TraceEntry::Read0 => reads.push(gpu.read(0)),
            TraceEntry::Read4 => reads.push(gpu.read(4)),
        }
    }

    reads
}
