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

use super::layer::{merge_layers, OptionLayer, OptionValue};
use super::options::RuntimeOptions;

/// Owns the registered option layers and their resolved view.
#[derive(Debug, Default, Clone)]
pub struct OptionManager {
    layers: Vec<OptionLayer>,
    resolved: BTreeMap<String, OptionValue>,
}

impl OptionManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a layer and re-resolves.
    ///
    /// A layer with the same name replaces the earlier one in place.
    pub fn register(&mut self, layer: OptionLayer) {
        match self.layers.iter_mut().find(|l| l.name() == layer.name()) {
            Some(existing) => {
                log::debug!("Replacing option layer '{}'", layer.name());
                *existing = layer;
            }
            None => {
                log::debug!(
                    "Registering option layer '{}' (priority {}, {} values)",
                    layer.name(),
                    layer.priority(),
                    layer.values().len()
                );
                self.layers.push(layer);
            }
        }
        self.resolved = merge_layers(&self.layers);
    }

    /// Number of registered layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Registered layers in registration order.
    pub fn layers(&self) -> &[OptionLayer] {
        &self.layers
    }

    /// Looks up a registered layer by name.
    pub fn layer(&self, name: &str) -> Option<&OptionLayer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    /// The merged view of every active layer.
    pub fn resolved(&self) -> &BTreeMap<String, OptionValue> {
        &self.resolved
    }

    /// Resolved value of `key`.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.resolved.get(key)
    }

    /// Typed options read by the device layer.
    pub fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions::from_resolved(&self.resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_replaces_in_place() {
        let mut manager = OptionManager::new();
        let mut a = OptionLayer::new("a", 1);
        a.set("k", OptionValue::Int(1));
        manager.register(a);
        manager.register(OptionLayer::new("b", 1));

        let mut a2 = OptionLayer::new("a", 1);
        a2.set("k", OptionValue::Int(2));
        manager.register(a2);

        assert_eq!(manager.layer_count(), 2);
        assert_eq!(manager.layers()[0].name(), "a");
        assert_eq!(manager.get("k"), Some(&OptionValue::Int(2)));
    }
}
