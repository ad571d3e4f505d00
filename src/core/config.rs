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

//! Tool configuration
//!
//! Settings for the trace player, read from a TOML file:
//!
//! ```toml
//! log_level = "debug"
//!
//! [output]
//! dump_primitives = true
//! primitives_json = "compact"
//! save_state = "after.state"
//! ```
//!
//! Every key is optional. Command line flags override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::Result;

/// JSON layout for primitive dumps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonStyle {
    #[default]
    Pretty,
    Compact,
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print the render list after replay
    pub dump_primitives: bool,

    /// Layout of the printed render list
    pub primitives_json: JsonStyle,

    /// Write a save state here after replay
    pub save_state: Option<PathBuf>,
}

/// Trace player configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,

    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::Io`](super::error::EmulatorError::Io) if the
    /// file cannot be read and
    /// [`EmulatorError::Config`](super::error::EmulatorError::Config) if it is
    /// not valid TOML for this layout.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&text)?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse a configuration from TOML text
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_gpu::core::config::{Config, JsonStyle};
    ///
    /// let config = Config::from_toml("[output]\nprimitives_json = \"compact\"").unwrap();
    /// assert_eq!(config.output.primitives_json, JsonStyle::Compact);
    /// assert_eq!(config.log_level, "info");
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
