// Copyright 2025 eraflo
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

use std::path::Path;

use anyhow::{Context, Result};
use veneer_core::StartupConfig;

use crate::fs::executable_dir;

/// File name of the startup configuration.
pub const STARTUP_CONFIG_FILE: &str = "veneer.ron";

/// Loads a [`StartupConfig`] from a RON file.
///
/// A missing file yields the default configuration.
///
/// ## Arguments
/// * `path` - Path of the RON file.
/// ## Returns
/// The parsed configuration, or an error if the file exists but cannot be read or parsed.
pub fn load_startup_config_from(path: &Path) -> Result<StartupConfig> {
    if !path.is_file() {
        log::debug!(
            "No startup configuration at {}, using defaults",
            path.display()
        );
        return Ok(StartupConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: StartupConfig =
        ron::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    log::info!(
        "Loaded startup configuration from {} ({} options)",
        path.display(),
        config.options.len()
    );
    Ok(config)
}

/// Loads `veneer.ron` from the directory of the running executable.
pub fn load_startup_config() -> Result<StartupConfig> {
    load_startup_config_from(&executable_dir()?.join(STARTUP_CONFIG_FILE))
}
