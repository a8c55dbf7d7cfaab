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

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use veneer_core::renderer::{
    AdapterDesc, AdapterFactory, BackendAdapter, BackendInstance, BackendLoader,
    ConstructionError, CreateDeviceFlags, FeatureLevel, GraphicsAdapterInfo, GraphicsDevice,
    Luid,
};

use super::conversions::{backend_to_type, device_type_to_type};
use super::device::WgpuDevice;
use super::factory::WgpuAdapterFactory;
use super::feature_level;

/// The entry point into the `wgpu` translation backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct WgpuLoader;

impl WgpuLoader {
    /// Creates the loader.
    pub fn new() -> Self {
        Self
    }
}

impl BackendLoader for WgpuLoader {
    fn name(&self) -> &str {
        "wgpu"
    }

    fn create_instance(&self) -> Result<Arc<dyn BackendInstance>, ConstructionError> {
        Ok(WgpuInstance::new()?)
    }

    fn create_factory(&self) -> Result<Arc<dyn AdapterFactory>, ConstructionError> {
        Ok(Arc::new(WgpuAdapterFactory::new(WgpuInstance::new()?)))
    }
}

/// One `wgpu` adapter as seen by a [`WgpuInstance`].
pub struct WgpuAdapter {
    adapter: wgpu::Adapter,
    desc: AdapterDesc,
    info: GraphicsAdapterInfo,
}

impl WgpuAdapter {
    /// Wraps the adapter enumerated at `index`.
    ///
    /// `wgpu` does not expose LUIDs, so one is derived from the enumeration index.
    /// Enumeration order is stable within a process, which keeps the LUID of an
    /// adapter identical across instances.
    fn new(adapter: wgpu::Adapter, index: usize) -> Self {
        let info = adapter.get_info();
        let desc = AdapterDesc {
            vendor_id: info.vendor,
            device_id: info.device,
            luid: Luid::from_u64(index as u64 + 1),
            description: info.name.clone(),
        };
        let info = GraphicsAdapterInfo {
            name: info.name,
            backend_type: backend_to_type(info.backend),
            device_type: device_type_to_type(info.device_type),
        };
        Self {
            adapter,
            desc,
            info,
        }
    }

    /// The underlying `wgpu` adapter.
    pub fn wgpu_adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }
}

impl fmt::Debug for WgpuAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuAdapter")
            .field("desc", &self.desc)
            .field("backend", &self.info.backend_type)
            .finish()
    }
}

impl BackendAdapter for WgpuAdapter {
    fn desc(&self) -> &AdapterDesc {
        &self.desc
    }

    fn info(&self) -> GraphicsAdapterInfo {
        self.info.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A `wgpu::Instance` and the adapters it enumerated when it was created.
pub struct WgpuInstance {
    #[allow(dead_code)]
    instance: wgpu::Instance,
    adapters: Vec<Arc<WgpuAdapter>>,
}

impl WgpuInstance {
    /// Creates an instance over every backend `wgpu` was built with.
    pub fn new() -> Result<Arc<Self>, ConstructionError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());
        let adapters: Vec<Arc<WgpuAdapter>> =
            pollster::block_on(instance.enumerate_adapters(wgpu::Backends::all()))
                .into_iter()
                .enumerate()
                .map(|(index, adapter)| Arc::new(WgpuAdapter::new(adapter, index)))
                .collect();

        if adapters.is_empty() {
            log::warn!("wgpu instance created, but no adapters were found");
        }
        for adapter in &adapters {
            log::debug!(
                "Found adapter \"{}\" ({:?}, {:04x}:{:04x}, LUID {})",
                adapter.info.name,
                adapter.info.backend_type,
                adapter.desc.vendor_id,
                adapter.desc.device_id,
                adapter.desc.luid
            );
        }

        Ok(Arc::new(Self { instance, adapters }))
    }

    /// Number of adapters this instance sees.
    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// The adapter at `index` as its concrete type.
    pub fn wgpu_adapter(&self, index: usize) -> Option<Arc<WgpuAdapter>> {
        self.adapters.get(index).cloned()
    }

    /// Recovers a [`WgpuAdapter`] that belongs to this instance.
    fn own_adapter<'a>(
        &self,
        adapter: &'a Arc<dyn BackendAdapter>,
    ) -> Result<&'a WgpuAdapter, ConstructionError> {
        adapter
            .as_any()
            .downcast_ref::<WgpuAdapter>()
            .ok_or_else(|| {
                ConstructionError::ForeignAdapter(format!(
                    "adapter \"{}\" does not belong to the wgpu backend",
                    adapter.desc().description
                ))
            })
    }
}

impl fmt::Debug for WgpuInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuInstance")
            .field("adapters", &self.adapters)
            .finish()
    }
}

impl BackendInstance for WgpuInstance {
    fn enum_adapter(&self, index: usize) -> Option<Arc<dyn BackendAdapter>> {
        self.adapters
            .get(index)
            .map(|adapter| Arc::clone(adapter) as Arc<dyn BackendAdapter>)
    }

    fn check_feature_level_support(
        &self,
        adapter: &Arc<dyn BackendAdapter>,
        level: FeatureLevel,
    ) -> bool {
        match self.own_adapter(adapter) {
            Ok(adapter) => feature_level::is_supported(&adapter.adapter, level),
            Err(e) => {
                log::warn!("Cannot probe feature level {level}: {e}");
                false
            }
        }
    }

    fn create_device(
        &self,
        adapter: &Arc<dyn BackendAdapter>,
        level: FeatureLevel,
        flags: CreateDeviceFlags,
    ) -> Result<Arc<dyn GraphicsDevice>, ConstructionError> {
        let adapter = self.own_adapter(adapter)?;
        let requirements = feature_level::requirements(level);
        let required_limits = feature_level::required_limits(&adapter.adapter, level);
        let label = format!("Veneer Device ({level})");

        if flags.contains(CreateDeviceFlags::DEBUG) {
            log::info!("Debug device requested; wgpu validation follows the instance flags");
        }

        let (device, queue) = pollster::block_on(adapter.adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some(&label),
                required_features: requirements.features,
                required_limits,
                ..Default::default()
            },
        ))
        .map_err(|e| {
            ConstructionError::DeviceCreation(format!(
                "Failed to create logical device at {level}: {e}"
            ))
        })?;

        device.on_uncaptured_error(Arc::new(|e| {
            log::error!("WGPU Uncaptured Error: {e:?}");
        }));

        log::info!(
            "Successfully created device at feature level {} on \"{}\" (Backend: {:?})",
            level,
            adapter.info.name,
            adapter.info.backend_type
        );

        Ok(Arc::new(WgpuDevice::new(device, queue, adapter.info.clone())))
    }
}
