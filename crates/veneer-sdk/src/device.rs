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

//! Front-end device and immediate context.

use std::sync::{Arc, Mutex};

use veneer_core::config::RuntimeOptions;
use veneer_core::renderer::{
    BackendAdapter, BackendInstance, CreateDeviceFlags, DrawIndexedParams, GraphicsAdapterInfo,
    GraphicsDevice, IndexBufferBinding, InputAssemblerState, InputLayout, ResourceError,
    VertexBufferBinding, MAX_VERTEX_BUFFER_SLOTS,
};
use veneer_core::FeatureLevel;

use crate::snapshot::{self, PositionSample};

/// A device handed back by the creation entry points.
///
/// Every `Device` owns its negotiated feature level and immediate context. The
/// backend device underneath may be shared with other `Device`s when the device
/// cache reuses it.
#[derive(Debug)]
pub struct Device {
    instance: Arc<dyn BackendInstance>,
    adapter: Arc<dyn BackendAdapter>,
    feature_level: FeatureLevel,
    flags: CreateDeviceFlags,
    backend: Arc<dyn GraphicsDevice>,
    context: Arc<DeviceContext>,
}

impl Device {
    pub(crate) fn new(
        instance: Arc<dyn BackendInstance>,
        adapter: Arc<dyn BackendAdapter>,
        feature_level: FeatureLevel,
        flags: CreateDeviceFlags,
        backend: Arc<dyn GraphicsDevice>,
        options: RuntimeOptions,
    ) -> Self {
        let context = Arc::new(DeviceContext::new(backend.clone(), options));
        Self {
            instance,
            adapter,
            feature_level,
            flags,
            backend,
            context,
        }
    }

    /// The negotiated feature level.
    pub fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }

    /// The flags the device was created with.
    pub fn creation_flags(&self) -> CreateDeviceFlags {
        self.flags
    }

    /// The immediate context.
    pub fn immediate_context(&self) -> Arc<DeviceContext> {
        self.context.clone()
    }

    /// Information about the adapter the device runs on.
    pub fn adapter_info(&self) -> GraphicsAdapterInfo {
        self.adapter.info()
    }

    /// The resolved backend adapter.
    pub fn adapter(&self) -> &Arc<dyn BackendAdapter> {
        &self.adapter
    }

    /// The backend instance that owns the adapter.
    pub fn instance(&self) -> &Arc<dyn BackendInstance> {
        &self.instance
    }

    /// The shared backend device.
    pub fn backend_device(&self) -> &Arc<dyn GraphicsDevice> {
        &self.backend
    }
}

/// The immediate context of a [`Device`].
///
/// Tracks input-assembler bindings and forwards draws to the backend. When the
/// geometry snapshot option is on, each indexed draw also samples its first
/// vertex position.
#[derive(Debug)]
pub struct DeviceContext {
    backend: Arc<dyn GraphicsDevice>,
    options: RuntimeOptions,
    state: Mutex<InputAssemblerState>,
    last_sample: Mutex<Option<PositionSample>>,
}

impl DeviceContext {
    fn new(backend: Arc<dyn GraphicsDevice>, options: RuntimeOptions) -> Self {
        Self {
            backend,
            options,
            state: Mutex::new(InputAssemblerState::default()),
            last_sample: Mutex::new(None),
        }
    }

    /// Binds an input layout, or unbinds with `None`.
    pub fn ia_set_input_layout(&self, layout: Option<Arc<InputLayout>>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).input_layout = layout;
    }

    /// Binds vertex buffers to consecutive slots starting at `start_slot`.
    ///
    /// Bindings that would land at or past [`MAX_VERTEX_BUFFER_SLOTS`] are dropped.
    pub fn ia_set_vertex_buffers(
        &self,
        start_slot: u32,
        bindings: &[Option<VertexBufferBinding>],
    ) {
        let start = (start_slot as usize).min(MAX_VERTEX_BUFFER_SLOTS);
        let kept = bindings.len().min(MAX_VERTEX_BUFFER_SLOTS - start);
        if kept < bindings.len() {
            log::warn!(
                "Ignoring {} vertex buffer bindings past slot limit {} (start slot {})",
                bindings.len() - kept,
                MAX_VERTEX_BUFFER_SLOTS,
                start_slot
            );
        }
        if kept == 0 {
            return;
        }

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let end = start + kept;
        if state.vertex_buffers.len() < end {
            state.vertex_buffers.resize(end, None);
        }
        state.vertex_buffers[start..end].copy_from_slice(&bindings[..kept]);
    }

    /// Binds an index buffer, or unbinds with `None`.
    pub fn ia_set_index_buffer(&self, binding: Option<IndexBufferBinding>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).index_buffer = binding;
    }

    /// A copy of the current input-assembler state.
    pub fn input_assembler_state(&self) -> InputAssemblerState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Issues an indexed draw.
    ///
    /// The snapshot side channel never changes the outcome of the draw.
    pub fn draw_indexed(
        &self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), ResourceError> {
        let params = DrawIndexedParams {
            index_count,
            start_index,
            base_vertex,
            start_instance: 0,
        };
        let state = self.input_assembler_state();

        if self.options.geometry_snapshot {
            let sample = snapshot::snapshot(self.backend.as_ref(), &state, &params);
            if let Some(sample) = &sample {
                if self.options.log_snapshots {
                    let [x, y, z] = sample.position;
                    log::info!("DrawIndexed first vertex: {x}, {y}, {z}");
                }
            }
            *self.last_sample.lock().unwrap_or_else(|e| e.into_inner()) = sample;
        }

        self.backend.draw_indexed(&state, &params)
    }

    /// The sample taken by the most recent snapshotting draw.
    pub fn last_position_sample(&self) -> Option<PositionSample> {
        *self.last_sample.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The backend device draws are forwarded to.
    pub fn backend_device(&self) -> &Arc<dyn GraphicsDevice> {
        &self.backend
    }
}
