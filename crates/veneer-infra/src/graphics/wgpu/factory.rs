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

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use veneer_core::renderer::{
    AdapterFactory, AdapterHandle, BackendInstance, GraphicsDevice, ResourceError, SwapChain,
    SwapChainDescriptor,
};

use super::conversions::IntoWgpu;
use super::device::WgpuDevice;
use super::instance::WgpuInstance;

/// Hands out adapter handles that are already bound to a [`WgpuInstance`].
///
/// Handles from this factory take the resolver's native fast path.
#[derive(Debug)]
pub struct WgpuAdapterFactory {
    instance: Arc<WgpuInstance>,
}

impl WgpuAdapterFactory {
    /// Creates a factory over `instance`.
    pub fn new(instance: Arc<WgpuInstance>) -> Self {
        Self { instance }
    }

    /// The instance whose adapters this factory enumerates.
    pub fn instance(&self) -> &Arc<WgpuInstance> {
        &self.instance
    }
}

impl AdapterFactory for WgpuAdapterFactory {
    fn enum_adapter(self: Arc<Self>, index: usize) -> Option<AdapterHandle> {
        let adapter = self.instance.enum_adapter(index)?;
        let instance: Arc<dyn BackendInstance> = self.instance.clone();
        Some(
            AdapterHandle::new(adapter.desc().clone())
                .with_native(instance, adapter)
                .with_factory(self),
        )
    }

    fn create_swap_chain(
        &self,
        device: &Arc<dyn GraphicsDevice>,
        descriptor: &SwapChainDescriptor,
    ) -> Result<Arc<dyn SwapChain>, ResourceError> {
        let device = device
            .as_any()
            .downcast_ref::<WgpuDevice>()
            .ok_or_else(|| {
                ResourceError::BackendError(
                    "swap chain device does not belong to the wgpu backend".to_string(),
                )
            })?;
        Ok(Arc::new(WgpuSwapChain::new(device.clone(), descriptor)?))
    }
}

/// An offscreen swap chain: a ring of render-target textures.
pub struct WgpuSwapChain {
    device: WgpuDevice,
    descriptor: SwapChainDescriptor,
    textures: Vec<wgpu::Texture>,
    current: AtomicU32,
}

impl WgpuSwapChain {
    fn new(device: WgpuDevice, descriptor: &SwapChainDescriptor) -> Result<Self, ResourceError> {
        if descriptor.width == 0 || descriptor.height == 0 || descriptor.buffer_count == 0 {
            return Err(ResourceError::BackendError(format!(
                "invalid swap chain {}x{} with {} buffers",
                descriptor.width, descriptor.height, descriptor.buffer_count
            )));
        }
        let max = device.wgpu_device().limits().max_texture_dimension_2d;
        if descriptor.width > max || descriptor.height > max {
            return Err(ResourceError::BackendError(format!(
                "swap chain {}x{} exceeds the {max} texel limit",
                descriptor.width, descriptor.height
            )));
        }

        let format: wgpu::TextureFormat = descriptor.format.into_wgpu();
        let textures = (0..descriptor.buffer_count)
            .map(|index| {
                device
                    .wgpu_device()
                    .create_texture(&wgpu::TextureDescriptor {
                        label: Some(&format!("Veneer Back Buffer {index}")),
                        size: wgpu::Extent3d {
                            width: descriptor.width,
                            height: descriptor.height,
                            depth_or_array_layers: 1,
                        },
                        mip_level_count: 1,
                        sample_count: 1,
                        dimension: wgpu::TextureDimension::D2,
                        format,
                        usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                            | wgpu::TextureUsages::COPY_SRC,
                        view_formats: &[],
                    })
            })
            .collect();

        log::info!(
            "WgpuSwapChain: Created {} offscreen back buffers {}x{} ({:?})",
            descriptor.buffer_count,
            descriptor.width,
            descriptor.height,
            format
        );

        Ok(Self {
            device,
            descriptor: descriptor.clone(),
            textures,
            current: AtomicU32::new(0),
        })
    }

    /// The back buffer that will be presented next.
    pub fn current_texture(&self) -> Option<&wgpu::Texture> {
        self.textures
            .get(self.current.load(Ordering::Acquire) as usize)
    }
}

impl fmt::Debug for WgpuSwapChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuSwapChain")
            .field("descriptor", &self.descriptor)
            .field("current", &self.current)
            .finish()
    }
}

impl SwapChain for WgpuSwapChain {
    fn descriptor(&self) -> &SwapChainDescriptor {
        &self.descriptor
    }

    fn current_buffer_index(&self) -> u32 {
        self.current.load(Ordering::Acquire)
    }

    fn present(&self) -> Result<(), ResourceError> {
        // Flush whatever was recorded against the current back buffer.
        self.device.wgpu_queue().submit(std::iter::empty());
        if self.descriptor.vsync {
            self.device
                .wgpu_device()
                .poll(wgpu::PollType::wait_indefinitely())
                .map_err(|e| {
                    ResourceError::BackendError(format!("Failed to poll device: {e:?}"))
                })?;
        }
        let count = self.descriptor.buffer_count;
        let _ = self
            .current
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |index| {
                Some((index + 1) % count)
            });
        Ok(())
    }
}
