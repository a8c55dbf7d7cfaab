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

//! In-memory backend shared by the integration tests.
//!
//! Every instance, device and buffer lives in host memory. Counters record how
//! often each backend operation ran so tests can assert on side effects.

#![allow(dead_code)]

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use veneer_core::config::InMemoryLayerSource;
use veneer_core::renderer::*;
use veneer_core::StartupConfig;
use veneer_sdk::DeviceRuntime;

/// Counters shared by every object of one mock backend.
#[derive(Debug, Default)]
pub struct MockStats {
    pub instances_created: AtomicUsize,
    pub factories_created: AtomicUsize,
    pub devices_created: AtomicUsize,
    pub buffers_created: AtomicUsize,
    pub maps: AtomicUsize,
    pub draws: AtomicUsize,
    pub copies: Mutex<Vec<(BufferId, u64, u64)>>,
    pub probes: Mutex<Vec<FeatureLevel>>,
    pub lookups: Mutex<Vec<&'static str>>,
}

pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

impl MockStats {
    pub fn probes(&self) -> Vec<FeatureLevel> {
        self.probes.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<&'static str> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn copies(&self) -> Vec<(BufferId, u64, u64)> {
        self.copies.lock().unwrap().clone()
    }
}

/// How the mock backend behaves.
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub adapters: Vec<AdapterDesc>,
    pub max_level: FeatureLevel,
    pub fail_device: bool,
    pub fail_factory: bool,
    /// Factory handles carry no native binding.
    pub foreign_factory_handles: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            adapters: vec![adapter_desc(0x10de, 0x2684, 1, "Mock GPU 0")],
            max_level: FeatureLevel::Level10_1,
            fail_device: false,
            fail_factory: false,
            foreign_factory_handles: false,
        }
    }
}

pub fn adapter_desc(vendor_id: u32, device_id: u32, luid: u64, name: &str) -> AdapterDesc {
    AdapterDesc {
        vendor_id,
        device_id,
        luid: Luid::from_u64(luid),
        description: name.to_string(),
    }
}

// --- Adapter ---

#[derive(Debug)]
pub struct MockAdapter {
    desc: AdapterDesc,
}

impl BackendAdapter for MockAdapter {
    fn desc(&self) -> &AdapterDesc {
        &self.desc
    }

    fn info(&self) -> GraphicsAdapterInfo {
        GraphicsAdapterInfo {
            name: self.desc.description.clone(),
            backend_type: GraphicsBackendType::Mock,
            device_type: RendererDeviceType::DiscreteGpu,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// --- Instance ---

#[derive(Debug)]
pub struct MockInstance {
    adapters: Vec<Arc<dyn BackendAdapter>>,
    config: MockConfig,
    stats: Arc<MockStats>,
}

impl MockInstance {
    pub fn new(config: MockConfig, stats: Arc<MockStats>) -> Self {
        let adapters = config
            .adapters
            .iter()
            .map(|desc| Arc::new(MockAdapter { desc: desc.clone() }) as Arc<dyn BackendAdapter>)
            .collect();
        Self {
            adapters,
            config,
            stats,
        }
    }
}

impl BackendInstance for MockInstance {
    fn enum_adapter(&self, index: usize) -> Option<Arc<dyn BackendAdapter>> {
        self.stats.lookups.lock().unwrap().push("index");
        self.adapters.get(index).cloned()
    }

    fn find_adapter_by_luid(&self, luid: &Luid) -> Option<Arc<dyn BackendAdapter>> {
        self.stats.lookups.lock().unwrap().push("luid");
        self.adapters.iter().find(|a| a.desc().luid == *luid).cloned()
    }

    fn find_adapter_by_device_id(
        &self,
        vendor_id: u32,
        device_id: u32,
    ) -> Option<Arc<dyn BackendAdapter>> {
        self.stats.lookups.lock().unwrap().push("device_id");
        self.adapters
            .iter()
            .find(|a| a.desc().vendor_id == vendor_id && a.desc().device_id == device_id)
            .cloned()
    }

    fn check_feature_level_support(
        &self,
        _adapter: &Arc<dyn BackendAdapter>,
        level: FeatureLevel,
    ) -> bool {
        self.stats.probes.lock().unwrap().push(level);
        level <= self.config.max_level
    }

    fn create_device(
        &self,
        adapter: &Arc<dyn BackendAdapter>,
        _level: FeatureLevel,
        _flags: CreateDeviceFlags,
    ) -> Result<Arc<dyn GraphicsDevice>, ConstructionError> {
        if self.config.fail_device {
            return Err(ConstructionError::DeviceCreation("mock refused".into()));
        }
        self.stats.devices_created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockDevice::new(adapter.info(), self.stats.clone())))
    }
}

// --- Loader and factory ---

pub struct MockLoader {
    pub config: MockConfig,
    pub stats: Arc<MockStats>,
}

impl MockLoader {
    pub fn new(config: MockConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            stats: Arc::new(MockStats::default()),
        })
    }
}

impl BackendLoader for MockLoader {
    fn name(&self) -> &str {
        "mock"
    }

    fn create_instance(&self) -> Result<Arc<dyn BackendInstance>, ConstructionError> {
        self.stats.instances_created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockInstance::new(
            self.config.clone(),
            self.stats.clone(),
        )))
    }

    fn create_factory(&self) -> Result<Arc<dyn AdapterFactory>, ConstructionError> {
        if self.config.fail_factory {
            return Err(ConstructionError::InstanceCreation("no factory".into()));
        }
        self.stats.factories_created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockFactory::new(
            self.config.clone(),
            self.stats.clone(),
        )))
    }
}

/// Enumerates the adapters of its own private instance.
#[derive(Debug)]
pub struct MockFactory {
    instance: Arc<MockInstance>,
    foreign: bool,
}

impl MockFactory {
    pub fn new(config: MockConfig, stats: Arc<MockStats>) -> Self {
        let foreign = config.foreign_factory_handles;
        Self {
            instance: Arc::new(MockInstance::new(config, stats)),
            foreign,
        }
    }
}

impl AdapterFactory for MockFactory {
    fn enum_adapter(self: Arc<Self>, index: usize) -> Option<AdapterHandle> {
        let adapter = self.instance.adapters.get(index)?.clone();
        let handle = AdapterHandle::new(adapter.desc().clone());
        let handle = if self.foreign {
            handle
        } else {
            handle.with_native(self.instance.clone(), adapter)
        };
        Some(handle.with_factory(self))
    }

    fn create_swap_chain(
        &self,
        device: &Arc<dyn GraphicsDevice>,
        descriptor: &SwapChainDescriptor,
    ) -> Result<Arc<dyn SwapChain>, ResourceError> {
        if device.as_any().downcast_ref::<MockDevice>().is_none() {
            return Err(ResourceError::BackendError("foreign device".into()));
        }
        Ok(Arc::new(MockSwapChain {
            descriptor: descriptor.clone(),
            index: AtomicU32::new(0),
        }))
    }
}

#[derive(Debug)]
pub struct MockSwapChain {
    descriptor: SwapChainDescriptor,
    index: AtomicU32,
}

impl SwapChain for MockSwapChain {
    fn descriptor(&self) -> &SwapChainDescriptor {
        &self.descriptor
    }

    fn current_buffer_index(&self) -> u32 {
        self.index.load(Ordering::SeqCst)
    }

    fn present(&self) -> Result<(), ResourceError> {
        let next = (self.current_buffer_index() + 1) % self.descriptor.buffer_count.max(1);
        self.index.store(next, Ordering::SeqCst);
        Ok(())
    }
}

// --- Device ---

#[derive(Debug)]
struct MockBuffer {
    data: Vec<u8>,
    usage: BufferUsage,
}

#[derive(Debug)]
pub struct MockDevice {
    info: GraphicsAdapterInfo,
    stats: Arc<MockStats>,
    buffers: Mutex<HashMap<BufferId, MockBuffer>>,
    next_id: AtomicUsize,
}

impl MockDevice {
    pub fn new(info: GraphicsAdapterInfo, stats: Arc<MockStats>) -> Self {
        Self {
            info,
            stats,
            buffers: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(0),
        }
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.lock().unwrap().len()
    }
}

impl GraphicsDevice for MockDevice {
    fn adapter_info(&self) -> GraphicsAdapterInfo {
        self.info.clone()
    }

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        self.create_buffer_with_data(descriptor, &[])
    }

    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        self.stats.buffers_created.fetch_add(1, Ordering::SeqCst);
        let size = align_up(descriptor.size.max(data.len() as u64));
        let mut contents = vec![0u8; size as usize];
        contents[..data.len()].copy_from_slice(data);
        let id = BufferId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.buffers.lock().unwrap().insert(
            id,
            MockBuffer {
                data: contents,
                usage: descriptor.usage,
            },
        );
        Ok(id)
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        self.buffers
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound)
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        let mut buffers = self.buffers.lock().unwrap();
        let buffer = buffers.get_mut(&id).ok_or(ResourceError::NotFound)?;
        let start = offset as usize;
        let end = start + data.len();
        if end > buffer.data.len() {
            return Err(ResourceError::OutOfBounds {
                offset,
                size: data.len() as u64,
                resource_size: buffer.data.len() as u64,
            });
        }
        buffer.data[start..end].copy_from_slice(data);
        Ok(())
    }

    fn buffer_size(&self, id: BufferId) -> Result<u64, ResourceError> {
        let buffers = self.buffers.lock().unwrap();
        buffers
            .get(&id)
            .map(|b| b.data.len() as u64)
            .ok_or(ResourceError::NotFound)
    }

    fn copy_buffer_region(
        &self,
        source: BufferId,
        source_offset: u64,
        destination: BufferId,
        destination_offset: u64,
        size: u64,
    ) -> Result<(), ResourceError> {
        for value in [source_offset, destination_offset, size] {
            if value % COPY_BUFFER_ALIGNMENT != 0 {
                return Err(ResourceError::Misaligned {
                    value,
                    alignment: COPY_BUFFER_ALIGNMENT,
                });
            }
        }
        self.stats
            .copies
            .lock()
            .unwrap()
            .push((source, source_offset, size));

        let mut buffers = self.buffers.lock().unwrap();
        let src = buffers.get(&source).ok_or(ResourceError::NotFound)?;
        let bytes = src
            .data
            .get(source_offset as usize..(source_offset + size) as usize)
            .ok_or(ResourceError::OutOfBounds {
                offset: source_offset,
                size,
                resource_size: src.data.len() as u64,
            })?
            .to_vec();
        let dst = buffers.get_mut(&destination).ok_or(ResourceError::NotFound)?;
        let start = destination_offset as usize;
        dst.data
            .get_mut(start..start + bytes.len())
            .ok_or(ResourceError::OutOfBounds {
                offset: destination_offset,
                size,
                resource_size: 0,
            })?
            .copy_from_slice(&bytes);
        Ok(())
    }

    fn map_read(&self, id: BufferId) -> Result<Vec<u8>, ResourceError> {
        self.stats.maps.fetch_add(1, Ordering::SeqCst);
        let buffers = self.buffers.lock().unwrap();
        let buffer = buffers.get(&id).ok_or(ResourceError::NotFound)?;
        if !buffer.usage.contains(BufferUsage::MAP_READ) {
            return Err(ResourceError::MapFailed("buffer is not MAP_READ".into()));
        }
        Ok(buffer.data.clone())
    }

    fn draw_indexed(
        &self,
        _state: &InputAssemblerState,
        _params: &DrawIndexedParams,
    ) -> Result<(), ResourceError> {
        self.stats.draws.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// --- Helpers ---

/// A runtime over a fresh mock backend with no layer files.
pub fn runtime(config: MockConfig) -> (DeviceRuntime, Arc<MockLoader>) {
    runtime_with(config, InMemoryLayerSource::new(), StartupConfig::default())
}

pub fn runtime_with(
    config: MockConfig,
    source: InMemoryLayerSource,
    startup: StartupConfig,
) -> (DeviceRuntime, Arc<MockLoader>) {
    let loader = MockLoader::new(config);
    let runtime = DeviceRuntime::new(loader.clone(), Arc::new(source), startup);
    (runtime, loader)
}

/// A standalone mock device, with the stats it reports into.
pub fn device() -> (Arc<MockDevice>, Arc<MockStats>) {
    let stats = Arc::new(MockStats::default());
    let device = Arc::new(MockDevice::new(
        GraphicsAdapterInfo::default(),
        stats.clone(),
    ));
    (device, stats)
}

pub fn native_handle(instance: Arc<MockInstance>, index: usize) -> AdapterHandle {
    let adapter = instance.adapters[index].clone();
    AdapterHandle::new(adapter.desc().clone()).with_native(instance, adapter)
}
