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

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

use super::error::ConfigError;
use super::layer::OptionValue;

/// Supplies the values of file-backed option layers.
pub trait LayerSource: Send + Sync + Debug {
    /// Loads the values of the layer named `name` (e.g. `user.conf`).
    ///
    /// A layer that does not exist yields an empty map, not an error.
    fn load(&self, name: &str) -> Result<BTreeMap<String, OptionValue>, ConfigError>;

    /// Human-readable location of the layers, for logging.
    fn location(&self) -> String;
}

/// Parses `key = value` lines.
///
/// Blank lines and lines starting with `#` are ignored, as is anything after a
/// `#` that follows the value. Later duplicates override earlier ones.
pub fn parse_conf(text: &str) -> Result<BTreeMap<String, OptionValue>, ConfigError> {
    let mut values = BTreeMap::new();
    for (number, line) in text.lines().enumerate() {
        let line = match line.find('#') {
            Some(hash) => &line[..hash],
            None => line,
        }
        .trim();
        if line.is_empty() {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Parse {
            line: number + 1,
            message: format!("expected 'key = value', found '{line}'"),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Parse {
                line: number + 1,
                message: "empty key".to_string(),
            });
        }
        values.insert(key.to_string(), OptionValue::parse(value));
    }
    Ok(values)
}

/// A [`LayerSource`] backed by in-memory text, keyed by layer name.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLayerSource {
    files: HashMap<String, String>,
}

impl InMemoryLayerSource {
    /// Creates a source with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the text of one layer.
    pub fn with_layer(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(name.into(), text.into());
        self
    }
}

impl LayerSource for InMemoryLayerSource {
    fn load(&self, name: &str) -> Result<BTreeMap<String, OptionValue>, ConfigError> {
        match self.files.get(name) {
            Some(text) => parse_conf(text),
            None => Ok(BTreeMap::new()),
        }
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
