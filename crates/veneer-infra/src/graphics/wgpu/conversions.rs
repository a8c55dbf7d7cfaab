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

use wgpu::{Backend, DeviceType};

use veneer_core::renderer::{
    BufferUsage, GraphicsBackendType, IndexFormat, RendererDeviceType, SurfaceFormat,
};

/// A local extension trait to convert our types into WGPU-compatible types.
/// This avoids Rust's orphan rules while keeping an idiomatic `.into_wgpu()` syntax.
pub trait IntoWgpu<T> {
    /// Consumes self and converts it into a WGPU-compatible type.
    fn into_wgpu(self) -> T;
}

impl IntoWgpu<wgpu::BufferUsages> for BufferUsage {
    fn into_wgpu(self) -> wgpu::BufferUsages {
        let mut usages = wgpu::BufferUsages::empty();
        let table = [
            (BufferUsage::MAP_READ, wgpu::BufferUsages::MAP_READ),
            (BufferUsage::MAP_WRITE, wgpu::BufferUsages::MAP_WRITE),
            (BufferUsage::COPY_SRC, wgpu::BufferUsages::COPY_SRC),
            (BufferUsage::COPY_DST, wgpu::BufferUsages::COPY_DST),
            (BufferUsage::VERTEX, wgpu::BufferUsages::VERTEX),
            (BufferUsage::INDEX, wgpu::BufferUsages::INDEX),
            (BufferUsage::UNIFORM, wgpu::BufferUsages::UNIFORM),
        ];
        for (ours, theirs) in table {
            if self.contains(ours) {
                usages |= theirs;
            }
        }
        usages
    }
}

impl IntoWgpu<wgpu::IndexFormat> for IndexFormat {
    fn into_wgpu(self) -> wgpu::IndexFormat {
        match self {
            IndexFormat::Uint16 => wgpu::IndexFormat::Uint16,
            IndexFormat::Uint32 => wgpu::IndexFormat::Uint32,
        }
    }
}

impl IntoWgpu<wgpu::TextureFormat> for SurfaceFormat {
    fn into_wgpu(self) -> wgpu::TextureFormat {
        match self {
            SurfaceFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            SurfaceFormat::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            SurfaceFormat::Bgra8Unorm => wgpu::TextureFormat::Bgra8Unorm,
            SurfaceFormat::Bgra8UnormSrgb => wgpu::TextureFormat::Bgra8UnormSrgb,
            SurfaceFormat::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
        }
    }
}

/// Convert WGPU Backend to our generic GraphicsBackendType.
pub fn backend_to_type(backend: Backend) -> GraphicsBackendType {
    match backend {
        Backend::Vulkan => GraphicsBackendType::Vulkan,
        Backend::Dx12 => GraphicsBackendType::Dx12,
        Backend::Gl => GraphicsBackendType::OpenGL,
        Backend::Metal => GraphicsBackendType::Metal,
        Backend::BrowserWebGpu => GraphicsBackendType::WebGpu,
        #[allow(unreachable_patterns)]
        _ => GraphicsBackendType::Unknown,
    }
}

/// Converts WGPU DeviceType to our generic RendererDeviceType.
pub fn device_type_to_type(device_type: DeviceType) -> RendererDeviceType {
    match device_type {
        DeviceType::IntegratedGpu => RendererDeviceType::IntegratedGpu,
        DeviceType::DiscreteGpu => RendererDeviceType::DiscreteGpu,
        DeviceType::VirtualGpu => RendererDeviceType::VirtualGpu,
        DeviceType::Cpu => RendererDeviceType::Cpu,
        _ => RendererDeviceType::Unknown,
    }
}
