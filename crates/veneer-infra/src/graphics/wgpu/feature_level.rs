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

//! Maps feature levels onto what `wgpu` can report about an adapter.
//!
//! `wgpu` has no notion of feature levels. A level is considered supported when
//! the adapter's downlevel capabilities, shader model, 2D texture limit and
//! optional features all reach the [`LevelRequirements`] of that level.

use veneer_core::renderer::FeatureLevel;
use wgpu::{DownlevelFlags, Features, ShaderModel};

/// What an adapter must expose to host a device at one feature level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRequirements {
    /// Downlevel flags that must all be present.
    pub downlevel: DownlevelFlags,
    /// Minimum shader model, as a rank (2, 4 or 5).
    pub shader_model: u8,
    /// Minimum `max_texture_dimension_2d`.
    pub max_texture_dimension_2d: u32,
    /// Optional features the device is created with.
    pub features: Features,
}

/// Requirements of `level`. Each level requires at least what the level below it does.
pub fn requirements(level: FeatureLevel) -> LevelRequirements {
    let dx10 = DownlevelFlags::BASE_VERTEX
        | DownlevelFlags::INDEPENDENT_BLEND
        | DownlevelFlags::COMPARISON_SAMPLERS
        | DownlevelFlags::NON_POWER_OF_TWO_MIPMAPPED_TEXTURES
        | DownlevelFlags::FULL_DRAW_INDEX_UINT32;
    let dx10_1 = dx10 | DownlevelFlags::CUBE_ARRAY_TEXTURES;
    let dx11 = dx10_1
        | DownlevelFlags::COMPUTE_SHADERS
        | DownlevelFlags::FRAGMENT_WRITABLE_STORAGE
        | DownlevelFlags::INDIRECT_EXECUTION;

    let (downlevel, shader_model, max_texture_dimension_2d, features) = match level {
        FeatureLevel::Level9_1 | FeatureLevel::Level9_2 => {
            (DownlevelFlags::empty(), 2, 2048, Features::empty())
        }
        FeatureLevel::Level9_3 => (DownlevelFlags::empty(), 2, 4096, Features::empty()),
        FeatureLevel::Level10_0 => (dx10, 4, 8192, Features::empty()),
        FeatureLevel::Level10_1 => (dx10_1, 4, 8192, Features::empty()),
        FeatureLevel::Level11_0 | FeatureLevel::Level11_1 => {
            (dx11, 5, 16384, Features::empty())
        }
        FeatureLevel::Level12_0 => (dx11, 5, 16384, Features::TEXTURE_BINDING_ARRAY),
        FeatureLevel::Level12_1 => (
            dx11,
            5,
            16384,
            Features::TEXTURE_BINDING_ARRAY | Features::CONSERVATIVE_RASTERIZATION,
        ),
    };

    LevelRequirements {
        downlevel,
        shader_model,
        max_texture_dimension_2d,
        features,
    }
}

/// Ranks a shader model so it can be compared.
fn shader_model_rank(model: ShaderModel) -> u8 {
    match model {
        ShaderModel::Sm2 => 2,
        ShaderModel::Sm4 => 4,
        ShaderModel::Sm5 => 5,
        #[allow(unreachable_patterns)]
        _ => 0,
    }
}

/// Reports whether `adapter` satisfies [`requirements`] of `level`. Never creates a device.
pub fn is_supported(adapter: &wgpu::Adapter, level: FeatureLevel) -> bool {
    let required = requirements(level);
    let downlevel = adapter.get_downlevel_capabilities();
    let limits = adapter.limits();

    downlevel.flags.contains(required.downlevel)
        && shader_model_rank(downlevel.shader_model) >= required.shader_model
        && limits.max_texture_dimension_2d >= required.max_texture_dimension_2d
        && adapter.features().contains(required.features)
}

/// The limits a device created at `level` requests from `adapter`.
pub fn required_limits(adapter: &wgpu::Adapter, level: FeatureLevel) -> wgpu::Limits {
    let base = match level {
        FeatureLevel::Level9_1 | FeatureLevel::Level9_2 | FeatureLevel::Level9_3 => {
            wgpu::Limits::downlevel_webgl2_defaults()
        }
        FeatureLevel::Level10_0 | FeatureLevel::Level10_1 => wgpu::Limits::downlevel_defaults(),
        _ => wgpu::Limits::default(),
    };
    let mut limits = base.using_resolution(adapter.limits());
    limits.max_texture_dimension_2d = limits
        .max_texture_dimension_2d
        .max(requirements(level).max_texture_dimension_2d);
    limits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirements_grow_with_the_level() {
        for pair in FeatureLevel::ALL.windows(2) {
            let lower = requirements(pair[0]);
            let higher = requirements(pair[1]);
            assert!(higher.downlevel.contains(lower.downlevel), "{:?}", pair);
            assert!(higher.features.contains(lower.features), "{:?}", pair);
            assert!(higher.shader_model >= lower.shader_model);
            assert!(higher.max_texture_dimension_2d >= lower.max_texture_dimension_2d);
        }
    }

    #[test]
    fn level_9_needs_no_downlevel_flags() {
        let required = requirements(FeatureLevel::Level9_1);
        assert!(required.downlevel.is_empty());
        assert!(required.features.is_empty());
    }

    #[test]
    fn level_11_needs_compute() {
        let required = requirements(FeatureLevel::Level11_0);
        assert!(required.downlevel.contains(DownlevelFlags::COMPUTE_SHADERS));
        assert_eq!(required.shader_model, 5);
    }
}
