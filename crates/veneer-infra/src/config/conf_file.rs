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

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use veneer_core::config::{parse_conf, ConfigError, LayerSource, OptionValue};

use crate::fs::executable_dir;

/// A [`LayerSource`] that reads `<dir>/<layer name>` files.
#[derive(Debug, Clone)]
pub struct ConfFileSource {
    dir: PathBuf,
}

impl ConfFileSource {
    /// Reads layer files from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads layer files from the directory of the running executable.
    pub fn from_executable_dir() -> anyhow::Result<Self> {
        Ok(Self::new(executable_dir()?))
    }

    /// The directory layer files are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LayerSource for ConfFileSource {
    fn load(&self, name: &str) -> Result<BTreeMap<String, OptionValue>, ConfigError> {
        let path = self.dir.join(name);
        if !path.is_file() {
            log::debug!("No option file at {}", path.display());
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        parse_conf(&text)
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_an_empty_layer() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let source = ConfFileSource::new(dir.path());
        assert!(source.load("user.conf")?.is_empty());
        Ok(())
    }

    #[test]
    fn reads_values_from_file() -> anyhow::Result<()> {
        // --- 1. Setup ---
        let dir = tempdir()?;
        fs::write(
            dir.path().join("user.conf"),
            "# comment\nveneer.geometrySnapshot = true\nveneer.deviceReusePolicy = never\n",
        )?;

        // --- 2. Load ---
        let source = ConfFileSource::new(dir.path());
        let values = source.load("user.conf")?;

        // --- 3. Verify ---
        assert_eq!(
            values.get("veneer.geometrySnapshot"),
            Some(&OptionValue::Bool(true))
        );
        assert_eq!(
            values.get("veneer.deviceReusePolicy").and_then(|v| v.as_str()),
            Some("never")
        );
        assert_eq!(source.location(), dir.path().display().to_string());
        Ok(())
    }

    #[test]
    fn malformed_file_is_a_parse_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("quality.conf"), "ok = 1\nbroken line\n")?;
        let source = ConfFileSource::new(dir.path());
        match source.load("quality.conf") {
            Err(ConfigError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a parse error, got {other:?}"),
        }
        Ok(())
    }
}
