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

//! Presentation surface descriptors.

use crate::renderer::api::util::enums::SurfaceFormat;

/// Describes the swap chain a caller asks for alongside a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapChainDescriptor {
    /// Width of each back buffer in pixels.
    pub width: u32,
    /// Height of each back buffer in pixels.
    pub height: u32,
    /// Pixel format of the back buffers.
    pub format: SurfaceFormat,
    /// Number of back buffers in the ring.
    pub buffer_count: u32,
    /// Whether presentation waits for vertical blank.
    pub vsync: bool,
}

impl Default for SwapChainDescriptor {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            format: SurfaceFormat::default(),
            buffer_count: 2,
            vsync: true,
        }
    }
}
