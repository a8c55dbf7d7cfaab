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

//! Feature-level negotiation.

use std::sync::Arc;

use veneer_core::renderer::{BackendAdapter, BackendInstance, DEFAULT_FEATURE_LEVELS};
use veneer_core::{CreationError, FeatureLevel};

/// Answers whether an adapter supports a feature level.
#[derive(Debug, Clone)]
pub struct CapabilityProber {
    instance: Arc<dyn BackendInstance>,
}

impl CapabilityProber {
    /// Creates a prober that asks `instance`.
    pub fn new(instance: Arc<dyn BackendInstance>) -> Self {
        Self { instance }
    }

    /// Probes a single level.
    pub fn is_supported(&self, adapter: &Arc<dyn BackendAdapter>, level: FeatureLevel) -> bool {
        let supported = self.instance.check_feature_level_support(adapter, level);
        log::info!(
            "Probing feature level {level} on '{}': {}",
            adapter.desc().description,
            if supported { "supported" } else { "not supported" }
        );
        supported
    }
}

/// Picks the first candidate the adapter supports.
///
/// Candidates are probed in the order given and probing stops at the first
/// supported level. `None` or an empty slice falls back to
/// [`DEFAULT_FEATURE_LEVELS`].
pub fn negotiate_feature_level(
    prober: &CapabilityProber,
    adapter: &Arc<dyn BackendAdapter>,
    candidates: Option<&[FeatureLevel]>,
) -> Result<FeatureLevel, CreationError> {
    let candidates = match candidates {
        Some(list) if !list.is_empty() => list,
        _ => &DEFAULT_FEATURE_LEVELS[..],
    };

    match candidates
        .iter()
        .copied()
        .find(|&level| prober.is_supported(adapter, level))
    {
        Some(level) => {
            log::info!("Using feature level {level}");
            Ok(level)
        }
        None => {
            log::error!("None of the requested feature levels is supported: {candidates:?}");
            Err(CreationError::UnsupportedFeatureLevel {
                candidates: candidates.to_vec(),
            })
        }
    }
}
