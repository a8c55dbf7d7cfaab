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
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wgpu::util::DeviceExt;

use veneer_core::renderer::{
    align_up, BufferDescriptor, BufferId, BufferUsage, DrawIndexedParams, GraphicsAdapterInfo,
    GraphicsDevice, InputAssemblerState, ResourceError, COPY_BUFFER_ALIGNMENT,
};

use super::conversions::IntoWgpu;

/// Internal data for a buffer resource.
#[derive(Debug)]
struct WgpuBufferEntry {
    wgpu_buffer: Arc<wgpu::Buffer>,
    usage: BufferUsage,
}

/// Holds the state of the `WgpuDevice` that is shared between clones.
struct WgpuDeviceInternal {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_info: GraphicsAdapterInfo,
    buffers: Mutex<HashMap<BufferId, WgpuBufferEntry>>,
    next_buffer_id: AtomicUsize,
    draw_count: AtomicU64,
}

impl fmt::Debug for WgpuDeviceInternal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuDeviceInternal")
            .field("adapter_info", &self.adapter_info)
            .field("next_buffer_id", &self.next_buffer_id)
            .field("draw_count", &self.draw_count)
            .finish()
    }
}

/// A `wgpu` logical device and queue behind the [`GraphicsDevice`] contract.
///
/// Cloning is cheap and every clone refers to the same device.
#[derive(Debug, Clone)]
pub struct WgpuDevice {
    internal: Arc<WgpuDeviceInternal>,
}

impl WgpuDevice {
    pub(crate) fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        adapter_info: GraphicsAdapterInfo,
    ) -> Self {
        Self {
            internal: Arc::new(WgpuDeviceInternal {
                device,
                queue,
                adapter_info,
                buffers: Mutex::new(HashMap::new()),
                next_buffer_id: AtomicUsize::new(0),
                draw_count: AtomicU64::new(0),
            }),
        }
    }

    fn generate_buffer_id(&self) -> BufferId {
        BufferId(self.internal.next_buffer_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Vertex and index buffers are always created copyable so their content can
    /// be read back.
    fn effective_usage(usage: BufferUsage) -> BufferUsage {
        if usage.intersects(BufferUsage::VERTEX | BufferUsage::INDEX) {
            usage | BufferUsage::COPY_SRC
        } else {
            usage
        }
    }

    fn insert_buffer(&self, buffer: wgpu::Buffer, usage: BufferUsage) -> BufferId {
        let id = self.generate_buffer_id();
        self.internal
            .buffers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                id,
                WgpuBufferEntry {
                    wgpu_buffer: Arc::new(buffer),
                    usage,
                },
            );
        id
    }

    /// Retrieves a reference-counted pointer to the internal WGPU buffer.
    /// Returns `None` if the ID is invalid.
    pub fn get_wgpu_buffer(&self, id: BufferId) -> Option<Arc<wgpu::Buffer>> {
        let buffers = self
            .internal
            .buffers
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        buffers.get(&id).map(|entry| Arc::clone(&entry.wgpu_buffer))
    }

    fn buffer_with_usage(
        &self,
        id: BufferId,
    ) -> Result<(Arc<wgpu::Buffer>, BufferUsage), ResourceError> {
        let buffers = self
            .internal
            .buffers
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        buffers
            .get(&id)
            .map(|entry| (Arc::clone(&entry.wgpu_buffer), entry.usage))
            .ok_or(ResourceError::NotFound)
    }

    /// The underlying `wgpu::Device`.
    pub fn wgpu_device(&self) -> &wgpu::Device {
        &self.internal.device
    }

    /// The underlying `wgpu::Queue`.
    pub fn wgpu_queue(&self) -> &wgpu::Queue {
        &self.internal.queue
    }

    /// Number of indexed draws issued on this device.
    pub fn draw_count(&self) -> u64 {
        self.internal.draw_count.load(Ordering::Relaxed)
    }

    /// Polls the underlying wgpu::Device in a blocking manner.
    fn poll_device_blocking(&self) -> Result<(), ResourceError> {
        self.internal
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .map(|_| ())
            .map_err(|e| ResourceError::BackendError(format!("Failed to poll device: {e:?}")))
    }
}

fn check_aligned(value: u64) -> Result<(), ResourceError> {
    if value % COPY_BUFFER_ALIGNMENT != 0 {
        return Err(ResourceError::Misaligned {
            value,
            alignment: COPY_BUFFER_ALIGNMENT,
        });
    }
    Ok(())
}

fn check_range(offset: u64, size: u64, resource_size: u64) -> Result<(), ResourceError> {
    match offset.checked_add(size) {
        Some(end) if end <= resource_size => Ok(()),
        _ => Err(ResourceError::OutOfBounds {
            offset,
            size,
            resource_size,
        }),
    }
}

impl GraphicsDevice for WgpuDevice {
    fn adapter_info(&self) -> GraphicsAdapterInfo {
        self.internal.adapter_info.clone()
    }

    // --- Buffer Operations ---

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        let usage = Self::effective_usage(descriptor.usage);
        // Sizes are padded so every buffer can take part in aligned copies.
        let size = align_up(descriptor.size.max(COPY_BUFFER_ALIGNMENT));

        let wgpu_buffer = self.internal.device.create_buffer(&wgpu::BufferDescriptor {
            label: descriptor.label.as_deref(),
            size,
            usage: usage.into_wgpu(),
            mapped_at_creation: false,
        });
        let id = self.insert_buffer(wgpu_buffer, usage);

        log::debug!(
            "WgpuDevice: Created buffer '{}' with ID: {:?}, size: {} bytes",
            descriptor.label.as_deref().unwrap_or_default(),
            id,
            size
        );
        Ok(id)
    }

    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        let usage = Self::effective_usage(descriptor.usage);
        let size = align_up(descriptor.size.max(data.len() as u64).max(COPY_BUFFER_ALIGNMENT));
        let mut contents = vec![0u8; size as usize];
        contents[..data.len()].copy_from_slice(data);

        let wgpu_buffer = self
            .internal
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: descriptor.label.as_deref(),
                contents: &contents,
                usage: usage.into_wgpu(),
            });
        let id = self.insert_buffer(wgpu_buffer, usage);

        log::debug!(
            "WgpuDevice: Created buffer '{}' with initial data. ID: {:?}, size: {} bytes",
            descriptor.label.as_deref().unwrap_or_default(),
            id,
            size
        );
        Ok(id)
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        let mut buffers = self
            .internal
            .buffers
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        match buffers.remove(&id) {
            Some(entry) => {
                entry.wgpu_buffer.destroy();
                log::debug!("WgpuDevice: Destroyed buffer with ID: {id:?}");
                Ok(())
            }
            None => Err(ResourceError::NotFound),
        }
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        let (buffer, _) = self.buffer_with_usage(id)?;
        check_range(offset, data.len() as u64, buffer.size())?;
        check_aligned(offset)?;

        // `Queue::write_buffer` requires a 4-byte multiple, so pad the tail with zeros.
        let padded_len = align_up(data.len() as u64);
        if padded_len == data.len() as u64 {
            self.internal.queue.write_buffer(&buffer, offset, data);
        } else {
            check_range(offset, padded_len, buffer.size())?;
            let mut padded = data.to_vec();
            padded.resize(padded_len as usize, 0);
            self.internal.queue.write_buffer(&buffer, offset, &padded);
        }

        log::debug!(
            "WgpuDevice: Wrote {} bytes to buffer ID: {:?} at offset {}",
            data.len(),
            id,
            offset
        );
        Ok(())
    }

    fn buffer_size(&self, id: BufferId) -> Result<u64, ResourceError> {
        self.buffer_with_usage(id).map(|(buffer, _)| buffer.size())
    }

    fn copy_buffer_region(
        &self,
        source: BufferId,
        source_offset: u64,
        destination: BufferId,
        destination_offset: u64,
        size: u64,
    ) -> Result<(), ResourceError> {
        let (src, src_usage) = self.buffer_with_usage(source)?;
        let (dst, dst_usage) = self.buffer_with_usage(destination)?;

        for value in [source_offset, destination_offset, size] {
            check_aligned(value)?;
        }
        check_range(source_offset, size, src.size())?;
        check_range(destination_offset, size, dst.size())?;
        if !src_usage.contains(BufferUsage::COPY_SRC) {
            return Err(ResourceError::BackendError(format!(
                "buffer {source:?} was not created with COPY_SRC"
            )));
        }
        if !dst_usage.contains(BufferUsage::COPY_DST) {
            return Err(ResourceError::BackendError(format!(
                "buffer {destination:?} was not created with COPY_DST"
            )));
        }

        let mut encoder = self
            .internal
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Veneer Copy Encoder"),
            });
        encoder.copy_buffer_to_buffer(&src, source_offset, &dst, destination_offset, size);
        self.internal.queue.submit(Some(encoder.finish()));
        Ok(())
    }

    fn map_read(&self, id: BufferId) -> Result<Vec<u8>, ResourceError> {
        let (buffer, usage) = self.buffer_with_usage(id)?;
        if !usage.contains(BufferUsage::MAP_READ) {
            return Err(ResourceError::MapFailed(format!(
                "buffer {id:?} was not created with MAP_READ"
            )));
        }

        let (sender, receiver) = crossbeam_channel::bounded(1);
        buffer.slice(..).map_async(wgpu::MapMode::Read, move |result| {
            // The receiver only disappears if map_read already returned.
            let _ = sender.send(result);
        });
        self.poll_device_blocking()?;

        receiver
            .recv()
            .map_err(|e| ResourceError::MapFailed(format!("map callback never ran: {e}")))?
            .map_err(|e| ResourceError::MapFailed(format!("WGPU map_async failed: {e:?}")))?;

        let bytes = buffer.slice(..).get_mapped_range().to_vec();
        buffer.unmap();
        Ok(bytes)
    }

    fn draw_indexed(
        &self,
        state: &InputAssemblerState,
        params: &DrawIndexedParams,
    ) -> Result<(), ResourceError> {
        let index_buffer = state.index_buffer.ok_or_else(|| {
            ResourceError::BackendError("draw_indexed without an index buffer".to_string())
        })?;
        self.buffer_with_usage(index_buffer.buffer)?;
        for binding in state.vertex_buffers.iter().flatten() {
            self.buffer_with_usage(binding.buffer)?;
        }

        let format: wgpu::IndexFormat = index_buffer.format.into_wgpu();
        self.internal.draw_count.fetch_add(1, Ordering::Relaxed);
        log::trace!(
            "WgpuDevice: draw_indexed count={} start={} base={} ({:?} indices)",
            params.index_count,
            params.start_index,
            params.base_vertex,
            format
        );
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
