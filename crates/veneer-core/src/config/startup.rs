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

use serde::{Deserialize, Serialize};

use super::layer::{priority, OptionLayer, OptionValue};

/// Name of the layer built from the startup configuration.
pub const STARTUP_LAYER_NAME: &str = "startup";

/// Configuration supplied by the host before the first device is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Raw option values, keyed by option name.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl StartupConfig {
    /// Sets one option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Converts the configuration into the `startup` option layer.
    pub fn to_layer(&self) -> OptionLayer {
        let mut layer = OptionLayer::new(STARTUP_LAYER_NAME, priority::STARTUP);
        for (key, value) in &self.options {
            layer.set(key.clone(), OptionValue::parse(value));
        }
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_ron() {
        let text = r#"(options: {"veneer.geometrySnapshot": "true"})"#;
        let config: StartupConfig = ron::from_str(text).unwrap();
        let layer = config.to_layer();
        assert_eq!(layer.priority(), priority::STARTUP);
        assert_eq!(
            layer.get("veneer.geometrySnapshot"),
            Some(&OptionValue::Bool(true))
        );
    }

    #[test]
    fn empty_ron_uses_defaults() {
        let config: StartupConfig = ron::from_str("()").unwrap();
        assert!(config.options.is_empty());
    }
}
