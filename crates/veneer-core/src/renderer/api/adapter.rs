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

//! Adapter identities and the handle passed into device creation.

use std::fmt;
use std::sync::Arc;

use crate::renderer::api::util::enums::{GraphicsBackendType, RendererDeviceType};
use crate::renderer::traits::{AdapterFactory, BackendAdapter, BackendInstance};

/// A locally unique identifier for a physical adapter.
///
/// Stable for the lifetime of the system session, so it is the strongest key the
/// resolver can match an adapter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Luid {
    /// Low 32 bits.
    pub low_part: u32,
    /// High 32 bits.
    pub high_part: i32,
}

impl Luid {
    /// Builds a LUID from its packed 64-bit form.
    pub const fn from_u64(value: u64) -> Self {
        Self {
            low_part: value as u32,
            high_part: (value >> 32) as i32,
        }
    }

    /// Returns the packed 64-bit form.
    pub const fn as_u64(&self) -> u64 {
        ((self.high_part as u32 as u64) << 32) | self.low_part as u64
    }
}

impl fmt::Display for Luid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}:{:08x}", self.high_part as u32, self.low_part)
    }
}

/// The identity of an adapter as reported by the enumerating factory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdapterDesc {
    /// PCI vendor ID.
    pub vendor_id: u32,
    /// PCI device ID.
    pub device_id: u32,
    /// Locally unique identifier of the adapter.
    pub luid: Luid,
    /// Human readable adapter description.
    pub description: String,
}

/// Provides standardized, backend-agnostic information about a graphics adapter.
#[derive(Debug, Clone, Default)]
pub struct GraphicsAdapterInfo {
    /// The name of the adapter (e.g., "NVIDIA GeForce RTX 4090").
    pub name: String,
    /// The graphics API backend this adapter is associated with.
    pub backend_type: GraphicsBackendType,
    /// The physical type of the adapter.
    pub device_type: RendererDeviceType,
}

/// An instance and adapter pair already resolved by the translation backend.
#[derive(Clone)]
pub struct NativeAdapter {
    /// The instance that owns `adapter`.
    pub instance: Arc<dyn BackendInstance>,
    /// The backend adapter itself.
    pub adapter: Arc<dyn BackendAdapter>,
}

/// The abstract adapter handle a caller passes into device creation.
///
/// It always carries the adapter identity. A handle produced by the backend's own
/// factory also carries the native binding, which lets the resolver skip instance
/// creation entirely. Cloning is cheap.
#[derive(Clone)]
pub struct AdapterHandle {
    desc: AdapterDesc,
    native: Option<NativeAdapter>,
    factory: Option<Arc<dyn AdapterFactory>>,
}

impl AdapterHandle {
    /// Creates a foreign handle that only knows the adapter identity.
    pub fn new(desc: AdapterDesc) -> Self {
        Self {
            desc,
            native: None,
            factory: None,
        }
    }

    /// Attaches a backend-native binding.
    pub fn with_native(
        mut self,
        instance: Arc<dyn BackendInstance>,
        adapter: Arc<dyn BackendAdapter>,
    ) -> Self {
        self.native = Some(NativeAdapter { instance, adapter });
        self
    }

    /// Attaches the factory that enumerated this adapter.
    pub fn with_factory(mut self, factory: Arc<dyn AdapterFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// The adapter identity.
    pub fn desc(&self) -> &AdapterDesc {
        &self.desc
    }

    /// The native binding, if the handle came from the translation backend.
    pub fn native(&self) -> Option<&NativeAdapter> {
        self.native.as_ref()
    }

    /// The parent factory, if known.
    pub fn factory(&self) -> Option<&Arc<dyn AdapterFactory>> {
        self.factory.as_ref()
    }
}

impl fmt::Debug for AdapterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterHandle")
            .field("desc", &self.desc)
            .field("native", &self.native.is_some())
            .field("factory", &self.factory.is_some())
            .finish()
    }
}
