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

//! End-to-end creation against the wgpu backend.
//!
//! Every test returns early when the machine exposes no adapter that can host a
//! device, so the suite stays green on headless builders.

use std::sync::Arc;

use anyhow::Result;
use veneer_core::config::{keys, InMemoryLayerSource};
use veneer_core::renderer::{
    AdapterFactory, AdapterHandle, BackendInstance, BackendLoader, BufferDescriptor, BufferUsage,
    GraphicsDevice, IndexBufferBinding, IndexFormat, InputElementDesc, InputLayout, SwapChain,
    SwapChainDescriptor, VertexBufferBinding,
};
use veneer_core::{FeatureLevel, StartupConfig, Status};
use veneer_infra::{WgpuDevice, WgpuInstance, WgpuLoader};
use veneer_sdk::{CreateDeviceParams, Device, DeviceOutputs, DeviceRuntime};

/// `true` if the default adapter can host a device at the lowest level.
fn has_capable_adapter() -> Result<bool> {
    let instance = WgpuInstance::new()?;
    Ok(instance.enum_adapter(0).is_some_and(|adapter| {
        instance.check_feature_level_support(&adapter, FeatureLevel::Level9_1)
    }))
}

fn runtime(startup: StartupConfig) -> DeviceRuntime {
    DeviceRuntime::new(
        Arc::new(WgpuLoader::new()),
        Arc::new(InMemoryLayerSource::new()),
        startup,
    )
}

fn create_device(runtime: &DeviceRuntime) -> Option<Arc<Device>> {
    let mut device = None;
    let status = runtime.create_device(
        &CreateDeviceParams::default(),
        DeviceOutputs {
            device: Some(&mut device),
            ..Default::default()
        },
    );
    assert_eq!(status, Status::Ok);
    device
}

#[test]
fn instances_agree_on_adapter_identity() -> Result<()> {
    let first = WgpuInstance::new()?;
    let second = WgpuInstance::new()?;
    assert_eq!(first.adapter_count(), second.adapter_count());

    for index in 0..first.adapter_count() {
        let a = first.enum_adapter(index).expect("adapter");
        let b = second.enum_adapter(index).expect("adapter");
        assert_eq!(a.desc(), b.desc());
        let found = second
            .find_adapter_by_luid(&a.desc().luid)
            .expect("same LUID in second instance");
        assert_eq!(found.desc().device_id, a.desc().device_id);
    }
    assert!(first.enum_adapter(first.adapter_count()).is_none());
    Ok(())
}

#[test]
fn factory_handles_are_native() -> Result<()> {
    let factory = WgpuLoader::new().create_factory()?;
    let Some(handle) = factory.enum_adapter(0) else {
        return Ok(());
    };
    assert!(handle.native().is_some());
    assert!(handle.factory().is_some());
    Ok(())
}

#[test]
fn creates_device_and_reads_back_geometry() -> Result<()> {
    if !has_capable_adapter()? {
        return Ok(());
    }

    // --- 1. Setup ---
    let runtime = runtime(StartupConfig::default().with_option(keys::GEOMETRY_SNAPSHOT, "true"));
    let device = create_device(&runtime).expect("device slot");
    let backend = device.backend_device();
    assert!(backend.as_any().downcast_ref::<WgpuDevice>().is_some());

    let vertices: Vec<[f32; 3]> = (0..6).map(|i| [i as f32, 0.5, 1.0]).collect();
    let indices: [u16; 4] = [4, 2, 3, 5];
    let vertex_buffer = backend.create_buffer_with_data(
        &BufferDescriptor {
            label: Some("vertices".into()),
            size: 0,
            usage: BufferUsage::VERTEX,
        },
        bytemuck::cast_slice(&vertices),
    )?;
    let index_buffer = backend.create_buffer_with_data(
        &BufferDescriptor {
            label: Some("indices".into()),
            size: 0,
            usage: BufferUsage::INDEX,
        },
        bytemuck::cast_slice(&indices),
    )?;

    // --- 2. Bind and draw ---
    let context = device.immediate_context();
    context.ia_set_input_layout(Some(Arc::new(InputLayout::new(vec![
        InputElementDesc::new("POSITION", 0, 0, 0),
    ]))));
    context.ia_set_vertex_buffers(
        0,
        &[Some(VertexBufferBinding {
            buffer: vertex_buffer,
            offset: 0,
            stride: 12,
        })],
    );
    context.ia_set_index_buffer(Some(IndexBufferBinding {
        buffer: index_buffer,
        format: IndexFormat::Uint16,
        offset: 0,
    }));
    context.draw_indexed(4, 0, -1)?;

    // --- 3. Verify ---
    let sample = context.last_position_sample().expect("snapshot taken");
    assert_eq!((sample.first_vertex, sample.last_vertex), (1, 4));
    assert_eq!(sample.position, [1.0, 0.5, 1.0]);
    let wgpu_device = backend
        .as_any()
        .downcast_ref::<WgpuDevice>()
        .expect("wgpu device");
    assert_eq!(wgpu_device.draw_count(), 1);
    Ok(())
}

#[test]
fn map_read_requires_map_read_usage() -> Result<()> {
    if !has_capable_adapter()? {
        return Ok(());
    }
    let runtime = runtime(StartupConfig::default());
    let device = create_device(&runtime).expect("device slot");
    let backend = device.backend_device();

    let buffer = backend.create_buffer(&BufferDescriptor {
        label: None,
        size: 6,
        usage: BufferUsage::UNIFORM | BufferUsage::COPY_DST,
    })?;
    assert_eq!(backend.buffer_size(buffer)?, 8);
    assert!(backend.map_read(buffer).is_err());
    backend.destroy_buffer(buffer)?;
    assert!(backend.destroy_buffer(buffer).is_err());
    Ok(())
}

#[test]
fn offscreen_swap_chain_rotates_buffers() -> Result<()> {
    if !has_capable_adapter()? {
        return Ok(());
    }
    let runtime = runtime(StartupConfig::default());
    let desc = SwapChainDescriptor {
        width: 64,
        height: 32,
        buffer_count: 3,
        vsync: false,
        ..Default::default()
    };
    let mut device = None;
    let mut swap_chain: Option<Arc<dyn SwapChain>> = None;
    let status = runtime.create_device_and_swap_chain(
        &CreateDeviceParams::default(),
        Some(&desc),
        Some(&mut swap_chain),
        DeviceOutputs {
            device: Some(&mut device),
            ..Default::default()
        },
    );
    assert_eq!(status, Status::Ok);

    let swap_chain = swap_chain.expect("swap chain slot");
    assert_eq!(swap_chain.descriptor().width, 64);
    assert_eq!(swap_chain.current_buffer_index(), 0);
    for expected in [1, 2, 0] {
        swap_chain.present()?;
        assert_eq!(swap_chain.current_buffer_index(), expected);
    }
    Ok(())
}

#[test]
fn foreign_handle_resolves_by_luid() -> Result<()> {
    if !has_capable_adapter()? {
        return Ok(());
    }
    let runtime = runtime(StartupConfig::default());
    let factory: Arc<dyn AdapterFactory> = WgpuLoader::new().create_factory()?;
    let native = Arc::clone(&factory).enum_adapter(0).expect("adapter 0");
    let foreign = AdapterHandle::new(native.desc().clone()).with_factory(factory);

    let resolved = runtime.resolver().resolve(&foreign)?;
    assert_eq!(resolved.adapter.desc().luid, native.desc().luid);
    assert!(runtime.resolver().has_root_instance());
    Ok(())
}
