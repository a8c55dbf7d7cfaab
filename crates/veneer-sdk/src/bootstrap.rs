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

//! One-time layered option initialization.

use std::sync::{Arc, Mutex};

use veneer_core::config::{priority, LayerSource, OptionLayer, OptionManager, RuntimeOptions};
use veneer_core::StartupConfig;

/// Name of the quality layer file.
pub const QUALITY_LAYER: &str = "quality.conf";
/// Name of the user layer file.
pub const USER_LAYER: &str = "user.conf";

const SYSTEM_LAYER_BLEND_STRENGTH: f32 = 1.0;
const SYSTEM_LAYER_BLEND_THRESHOLD: f32 = 0.1;

#[derive(Debug, Default)]
struct BootstrapState {
    initialized: bool,
    manager: OptionManager,
    options: RuntimeOptions,
}

/// Runs the option bootstrap exactly once.
///
/// The first call to [`OptionBootstrap::ensure_initialized`] builds every layer
/// and resolves [`RuntimeOptions`]. Later calls return the same options and only
/// log a no-op.
#[derive(Debug)]
pub struct OptionBootstrap {
    source: Arc<dyn LayerSource>,
    state: Mutex<BootstrapState>,
}

impl OptionBootstrap {
    /// Creates a bootstrap that reads file-backed layers from `source`.
    pub fn new(source: Arc<dyn LayerSource>) -> Self {
        Self {
            source,
            state: Mutex::new(BootstrapState::default()),
        }
    }

    /// Performs the bootstrap on first call and returns the resolved options.
    pub fn ensure_initialized(&self, startup: &StartupConfig) -> RuntimeOptions {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.initialized {
            log::debug!("Option layers already initialized");
            return state.options;
        }

        log::info!(
            "Initializing option layers from {}",
            self.source.location()
        );

        let mut pending = vec![
            system_layer(QUALITY_LAYER, priority::QUALITY),
            system_layer(USER_LAYER, priority::USER),
        ];

        log::info!("Applying startup configuration ({} options)", startup.options.len());
        let startup_layer = startup.to_layer();

        // Deferred load: file-backed layers read their values only now.
        for layer in &mut pending {
            match self.source.load(layer.name()) {
                Ok(values) => {
                    log::debug!("Loaded {} values from {}", values.len(), layer.name());
                    layer.replace_values(values);
                }
                Err(e) => log::warn!("Failed to load option layer {}: {e}", layer.name()),
            }
        }

        state.manager.register(startup_layer);
        for layer in pending {
            state.manager.register(layer);
        }

        state.options = state.manager.runtime_options();
        state.initialized = true;
        log::info!(
            "Option layers initialized: {} layers, {:?}",
            state.manager.layer_count(),
            state.options
        );
        state.options
    }

    /// Whether the bootstrap has run.
    pub fn is_initialized(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).initialized
    }

    /// Number of layers registered with the option manager.
    pub fn layer_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .manager
            .layer_count()
    }

    /// The resolved options. Defaults until the bootstrap has run.
    pub fn options(&self) -> RuntimeOptions {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).options
    }

    /// Runs `f` with the option manager.
    pub fn with_manager<R>(&self, f: impl FnOnce(&OptionManager) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&state.manager)
    }
}

fn system_layer(name: &str, priority: u32) -> OptionLayer {
    OptionLayer::new(name, priority)
        .with_enabled(true)
        .with_blend(SYSTEM_LAYER_BLEND_STRENGTH, SYSTEM_LAYER_BLEND_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use veneer_core::config::{keys, InMemoryLayerSource, ReusePolicy, STARTUP_LAYER_NAME};

    use super::*;

    #[test]
    fn system_layers_have_fixed_blend() {
        let bootstrap = OptionBootstrap::new(Arc::new(InMemoryLayerSource::new()));
        bootstrap.ensure_initialized(&StartupConfig::default());
        bootstrap.with_manager(|manager| {
            for name in [QUALITY_LAYER, USER_LAYER] {
                let layer = manager.layer(name).unwrap();
                assert!(layer.enabled());
                assert_eq!(layer.blend_strength(), 1.0);
                assert_eq!(layer.blend_threshold(), 0.1);
            }
            assert!(manager.layer(STARTUP_LAYER_NAME).is_some());
        });
    }

    #[test]
    fn user_layer_overrides_startup() {
        let source = InMemoryLayerSource::new()
            .with_layer(USER_LAYER, "veneer.deviceReusePolicy = never\n")
            .with_layer(QUALITY_LAYER, "veneer.geometrySnapshot = true\n");
        let bootstrap = OptionBootstrap::new(Arc::new(source));
        let startup = StartupConfig::default()
            .with_option(keys::DEVICE_REUSE_POLICY, "matching")
            .with_option(keys::LOG_SNAPSHOTS, "false");

        let options = bootstrap.ensure_initialized(&startup);
        assert_eq!(options.reuse_policy, ReusePolicy::Never);
        assert!(options.geometry_snapshot);
        assert!(!options.log_snapshots);
    }

    #[test]
    fn broken_layer_file_is_skipped() {
        let source = InMemoryLayerSource::new().with_layer(USER_LAYER, "not an option\n");
        let bootstrap = OptionBootstrap::new(Arc::new(source));
        let options = bootstrap.ensure_initialized(&StartupConfig::default());
        assert_eq!(options, RuntimeOptions::default());
        assert_eq!(bootstrap.layer_count(), 3);
    }
}
