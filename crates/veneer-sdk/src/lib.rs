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

//! The public-facing device-creation API of Veneer.
//!
//! A [`DeviceRuntime`] owns every piece of shared state: the root backend
//! instance, the option bootstrap and the device cache. Its entry points validate
//! the request, resolve the adapter, negotiate a feature level and hand back a
//! [`Device`] with its immediate [`DeviceContext`].

pub mod bootstrap;
pub mod cache;
pub mod device;
pub mod negotiator;
pub mod resolver;
pub mod runtime;
pub mod snapshot;

pub use bootstrap::OptionBootstrap;
pub use cache::{DeviceCache, DeviceRequest};
pub use device::{Device, DeviceContext};
pub use negotiator::{negotiate_feature_level, CapabilityProber};
pub use resolver::{AdapterResolver, ResolvedAdapter};
pub use runtime::{CreateDeviceParams, DeviceOutputs, DeviceRuntime, SoftwareModule};
pub use snapshot::PositionSample;

pub mod prelude {
    pub use crate::{
        CreateDeviceParams, Device, DeviceContext, DeviceOutputs, DeviceRuntime, PositionSample,
    };
    pub use veneer_core::renderer::{
        AdapterDesc, AdapterHandle, BufferDescriptor, BufferId, BufferUsage, CreateDeviceFlags,
        DriverType, FeatureLevel, IndexBufferBinding, IndexFormat, InputElementDesc, InputLayout,
        Luid, Status, SwapChainDescriptor, VertexBufferBinding,
    };
    pub use veneer_core::StartupConfig;
}
