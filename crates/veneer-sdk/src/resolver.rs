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

//! Maps an abstract adapter handle onto a backend instance and adapter.

use std::sync::{Arc, Mutex};

use veneer_core::renderer::{AdapterHandle, BackendAdapter, BackendInstance, BackendLoader};
use veneer_core::CreationError;

/// A backend instance together with one of its adapters.
#[derive(Debug, Clone)]
pub struct ResolvedAdapter {
    /// The instance that owns `adapter`.
    pub instance: Arc<dyn BackendInstance>,
    /// The resolved adapter.
    pub adapter: Arc<dyn BackendAdapter>,
}

/// Resolves adapter handles, creating the root backend instance on first need.
///
/// Handles that already carry a native binding never touch the loader. Every
/// other handle is looked up on the root instance, which is created once and
/// reused for the lifetime of the resolver.
pub struct AdapterResolver {
    loader: Arc<dyn BackendLoader>,
    root: Mutex<Option<Arc<dyn BackendInstance>>>,
}

impl AdapterResolver {
    /// Creates a resolver that builds its root instance through `loader`.
    pub fn new(loader: Arc<dyn BackendLoader>) -> Self {
        Self {
            loader,
            root: Mutex::new(None),
        }
    }

    /// Returns the root instance, creating it on first call.
    pub fn root_instance(&self) -> Result<Arc<dyn BackendInstance>, CreationError> {
        let mut root = self.root.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(instance) = root.as_ref() {
            return Ok(instance.clone());
        }

        log::info!("Creating root {} instance", self.loader.name());
        let instance = self.loader.create_instance()?;
        *root = Some(instance.clone());
        Ok(instance)
    }

    /// Whether the root instance has been created.
    pub fn has_root_instance(&self) -> bool {
        self.root.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Resolves `handle` to a backend instance and adapter.
    ///
    /// Foreign handles are matched by LUID, then by vendor and device ID, then
    /// fall back to the first enumerated adapter.
    ///
    /// # Errors
    ///
    /// Returns [`CreationError::Resolution`] when all three lookups come back
    /// empty, or [`CreationError::Construction`] when the root instance cannot be
    /// created.
    pub fn resolve(&self, handle: &AdapterHandle) -> Result<ResolvedAdapter, CreationError> {
        if let Some(native) = handle.native() {
            log::debug!("Adapter '{}' is backend-native", handle.desc().description);
            return Ok(ResolvedAdapter {
                instance: native.instance.clone(),
                adapter: native.adapter.clone(),
            });
        }

        let desc = handle.desc();
        log::warn!(
            "Adapter '{}' is not backend-native, resolving through the root instance",
            desc.description
        );
        let instance = self.root_instance()?;

        let adapter = if let Some(adapter) = instance.find_adapter_by_luid(&desc.luid) {
            log::debug!("Matched adapter by LUID {}", desc.luid);
            adapter
        } else if let Some(adapter) =
            instance.find_adapter_by_device_id(desc.vendor_id, desc.device_id)
        {
            log::debug!(
                "Matched adapter by device ID {:04x}:{:04x}",
                desc.vendor_id,
                desc.device_id
            );
            adapter
        } else if let Some(adapter) = instance.enum_adapter(0) {
            log::warn!(
                "No adapter matches '{}', falling back to '{}'",
                desc.description,
                adapter.desc().description
            );
            adapter
        } else {
            return Err(CreationError::Resolution(format!(
                "no backend adapter matches '{}' and none is enumerable",
                desc.description
            )));
        };

        Ok(ResolvedAdapter { instance, adapter })
    }
}
