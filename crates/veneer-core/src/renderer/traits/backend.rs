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
use std::fmt::Debug;
use std::sync::Arc;

use crate::renderer::api::{
    AdapterDesc, CreateDeviceFlags, FeatureLevel, GraphicsAdapterInfo, Luid,
};
use crate::renderer::error::ConstructionError;
use crate::renderer::traits::{AdapterFactory, GraphicsDevice};

/// A backend-native reference to one physical GPU, bound to one [`BackendInstance`].
pub trait BackendAdapter: Send + Sync + Debug + 'static {
    /// The identity the resolver matches on.
    fn desc(&self) -> &AdapterDesc;

    /// Standardized information about the adapter.
    fn info(&self) -> GraphicsAdapterInfo;

    /// Allows the owning backend to recover its concrete adapter type.
    fn as_any(&self) -> &dyn Any;
}

/// The process-scoped handle to the underlying translation backend.
///
/// An instance enumerates the adapters it can see, answers capability queries and
/// builds devices. The lookup helpers have default implementations that walk
/// [`BackendInstance::enum_adapter`]; backends with a faster index can override them.
pub trait BackendInstance: Send + Sync + Debug + 'static {
    /// Returns the adapter at `index` in enumeration order, or `None` past the end.
    fn enum_adapter(&self, index: usize) -> Option<Arc<dyn BackendAdapter>>;

    /// Finds the adapter whose LUID equals `luid`.
    fn find_adapter_by_luid(&self, luid: &Luid) -> Option<Arc<dyn BackendAdapter>> {
        (0..)
            .map_while(|index| self.enum_adapter(index))
            .find(|adapter| adapter.desc().luid == *luid)
    }

    /// Finds the first adapter with the given PCI vendor and device IDs.
    fn find_adapter_by_device_id(
        &self,
        vendor_id: u32,
        device_id: u32,
    ) -> Option<Arc<dyn BackendAdapter>> {
        (0..)
            .map_while(|index| self.enum_adapter(index))
            .find(|adapter| {
                let desc = adapter.desc();
                desc.vendor_id == vendor_id && desc.device_id == device_id
            })
    }

    /// Reports whether `adapter` can host a device at `level`.
    ///
    /// Must not create a device.
    fn check_feature_level_support(
        &self,
        adapter: &Arc<dyn BackendAdapter>,
        level: FeatureLevel,
    ) -> bool;

    /// Builds a live device on `adapter` at `level`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if the backend refuses. No partially built
    /// device is ever returned.
    fn create_device(
        &self,
        adapter: &Arc<dyn BackendAdapter>,
        level: FeatureLevel,
        flags: CreateDeviceFlags,
    ) -> Result<Arc<dyn GraphicsDevice>, ConstructionError>;
}

/// The entry point into a translation backend.
pub trait BackendLoader: Send + Sync + 'static {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Creates a fresh backend instance.
    fn create_instance(&self) -> Result<Arc<dyn BackendInstance>, ConstructionError>;

    /// Creates the default adapter factory used when the caller supplies no adapter.
    fn create_factory(&self) -> Result<Arc<dyn AdapterFactory>, ConstructionError>;
}
