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

//! The device-creation entry points.
//!
//! Every call runs the same fixed sequence: validate the parameters, find a
//! factory and adapter, resolve the adapter onto the backend, run the option
//! bootstrap, negotiate the feature level, fetch the backend device from the
//! cache, optionally create a swap chain, then fill the output slots. Output
//! slots are cleared on entry and written only once every step has succeeded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use veneer_core::config::{LayerSource, RuntimeOptions};
use veneer_core::renderer::{
    AdapterFactory, AdapterHandle, BackendLoader, CreateDeviceFlags, DriverType, SwapChain,
    SwapChainDescriptor,
};
use veneer_core::{CreationError, FeatureLevel, StartupConfig, Status};

use crate::bootstrap::OptionBootstrap;
use crate::cache::{DeviceCache, DeviceRequest};
use crate::device::{Device, DeviceContext};
use crate::negotiator::{negotiate_feature_level, CapabilityProber};
use crate::resolver::AdapterResolver;

static GLOBAL_RUNTIME: OnceLock<Arc<DeviceRuntime>> = OnceLock::new();

/// An opaque handle to a caller-supplied software rasterizer module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoftwareModule(pub usize);

/// Inputs of [`DeviceRuntime::create_device`].
#[derive(Debug, Clone)]
pub struct CreateDeviceParams<'a> {
    /// The adapter to create the device on. `None` picks the first adapter of the
    /// default factory.
    pub adapter: Option<AdapterHandle>,
    /// Must be [`DriverType::Unknown`] when `adapter` is set.
    pub driver_type: DriverType,
    /// Must be `None` when `adapter` is set.
    pub software: Option<SoftwareModule>,
    /// Creation flags forwarded to the backend.
    pub flags: CreateDeviceFlags,
    /// Candidate feature levels, highest preference first.
    pub feature_levels: Option<&'a [FeatureLevel]>,
    /// SDK version the caller was built against.
    pub sdk_version: u32,
}

/// SDK version reported by callers built against the current headers.
pub const SDK_VERSION: u32 = 7;

impl Default for CreateDeviceParams<'_> {
    fn default() -> Self {
        Self {
            adapter: None,
            driver_type: DriverType::Hardware,
            software: None,
            flags: CreateDeviceFlags::empty(),
            feature_levels: None,
            sdk_version: SDK_VERSION,
        }
    }
}

impl<'a> CreateDeviceParams<'a> {
    /// Targets an explicit adapter. The driver type becomes [`DriverType::Unknown`].
    pub fn with_adapter(mut self, adapter: AdapterHandle) -> Self {
        self.adapter = Some(adapter);
        self.driver_type = DriverType::Unknown;
        self
    }

    /// Sets the candidate feature levels.
    pub fn with_feature_levels(mut self, levels: &'a [FeatureLevel]) -> Self {
        self.feature_levels = Some(levels);
        self
    }

    /// Sets the creation flags.
    pub fn with_flags(mut self, flags: CreateDeviceFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Caller-provided output slots. A `None` slot is not requested.
#[derive(Debug, Default)]
pub struct DeviceOutputs<'a> {
    /// Receives the created device.
    pub device: Option<&'a mut Option<Arc<Device>>>,
    /// Receives the negotiated feature level.
    pub feature_level: Option<&'a mut Option<FeatureLevel>>,
    /// Receives the immediate context.
    pub context: Option<&'a mut Option<Arc<DeviceContext>>>,
}

impl DeviceOutputs<'_> {
    fn clear(&mut self) {
        if let Some(slot) = self.device.as_deref_mut() {
            *slot = None;
        }
        if let Some(slot) = self.feature_level.as_deref_mut() {
            *slot = None;
        }
        if let Some(slot) = self.context.as_deref_mut() {
            *slot = None;
        }
    }
}

/// Owns the shared state behind the creation entry points.
///
/// Holds the root backend instance (through the resolver), the option bootstrap
/// and the device cache. Several runtimes can coexist; a process that needs a
/// single shared one can install it with [`DeviceRuntime::install_global`].
pub struct DeviceRuntime {
    loader: Arc<dyn BackendLoader>,
    resolver: AdapterResolver,
    bootstrap: OptionBootstrap,
    cache: DeviceCache,
    startup: StartupConfig,
    on_12_reported: AtomicBool,
}

impl DeviceRuntime {
    /// Creates a runtime.
    ///
    /// `layer_source` supplies the `quality.conf` and `user.conf` layers and
    /// `startup` is applied as the startup layer on the first creation call.
    pub fn new(
        loader: Arc<dyn BackendLoader>,
        layer_source: Arc<dyn LayerSource>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            resolver: AdapterResolver::new(loader.clone()),
            loader,
            bootstrap: OptionBootstrap::new(layer_source),
            cache: DeviceCache::new(),
            startup,
            on_12_reported: AtomicBool::new(false),
        }
    }

    /// Installs `runtime` as the process-wide runtime.
    ///
    /// Returns the runtime back if one is already installed.
    pub fn install_global(runtime: Arc<DeviceRuntime>) -> Result<(), Arc<DeviceRuntime>> {
        GLOBAL_RUNTIME.set(runtime)
    }

    /// The process-wide runtime, if one was installed.
    pub fn global() -> Option<Arc<DeviceRuntime>> {
        GLOBAL_RUNTIME.get().cloned()
    }

    /// The adapter resolver.
    pub fn resolver(&self) -> &AdapterResolver {
        &self.resolver
    }

    /// The option bootstrap.
    pub fn bootstrap(&self) -> &OptionBootstrap {
        &self.bootstrap
    }

    /// The device cache.
    pub fn cache(&self) -> &DeviceCache {
        &self.cache
    }

    /// Creates a device on an explicit adapter.
    ///
    /// `factory` is accepted for signature compatibility and not consulted.
    /// Returns [`Status::False`] when `device_out` is `None`.
    pub fn create_core_device(
        &self,
        _factory: Option<&Arc<dyn AdapterFactory>>,
        adapter: &AdapterHandle,
        flags: CreateDeviceFlags,
        feature_levels: Option<&[FeatureLevel]>,
        device_out: Option<&mut Option<Arc<Device>>>,
    ) -> Status {
        log::info!("Entry: create_core_device");
        let mut device_out = device_out;
        if let Some(slot) = device_out.as_deref_mut() {
            *slot = None;
        }

        match self.create_core(adapter, flags, feature_levels) {
            Ok(device) => {
                log::info!(
                    "Exit: create_core_device (feature level {})",
                    device.feature_level()
                );
                match device_out {
                    Some(slot) => {
                        *slot = Some(device);
                        Status::Ok
                    }
                    None => Status::False,
                }
            }
            Err(e) => {
                log::error!("create_core_device failed: {e}");
                e.status()
            }
        }
    }

    /// Creates a device, picking the default adapter when none is given.
    pub fn create_device(
        &self,
        params: &CreateDeviceParams<'_>,
        outputs: DeviceOutputs<'_>,
    ) -> Status {
        log::info!("Entry: create_device");
        self.create_device_and_swap_chain_internal(params, None, None, outputs)
    }

    /// Creates a device and a swap chain bound to it.
    ///
    /// Requesting `swap_chain_out` without `swap_chain_desc` is
    /// [`Status::InvalidArg`] and creates nothing.
    pub fn create_device_and_swap_chain(
        &self,
        params: &CreateDeviceParams<'_>,
        swap_chain_desc: Option<&SwapChainDescriptor>,
        swap_chain_out: Option<&mut Option<Arc<dyn SwapChain>>>,
        outputs: DeviceOutputs<'_>,
    ) -> Status {
        log::info!("Entry: create_device_and_swap_chain");
        self.create_device_and_swap_chain_internal(
            params,
            swap_chain_desc,
            swap_chain_out,
            outputs,
        )
    }

    /// Creating a device on top of an existing low-level device is not supported.
    ///
    /// Always returns [`Status::NotImpl`]. The first call per runtime logs an error.
    pub fn create_device_on_12(
        &self,
        _flags: CreateDeviceFlags,
        _feature_levels: Option<&[FeatureLevel]>,
    ) -> Status {
        if !self.on_12_reported.swap(true, Ordering::SeqCst) {
            log::error!("create_device_on_12: Not implemented");
        }
        Status::NotImpl
    }

    fn create_device_and_swap_chain_internal(
        &self,
        params: &CreateDeviceParams<'_>,
        swap_chain_desc: Option<&SwapChainDescriptor>,
        swap_chain_out: Option<&mut Option<Arc<dyn SwapChain>>>,
        mut outputs: DeviceOutputs<'_>,
    ) -> Status {
        let mut swap_chain_out = swap_chain_out;
        outputs.clear();
        if let Some(slot) = swap_chain_out.as_deref_mut() {
            *slot = None;
        }

        log::debug!(
            "Requested SDK version {}, driver type {:?}, flags {:?}",
            params.sdk_version,
            params.driver_type,
            params.flags
        );

        let wants_swap_chain = swap_chain_out.is_some();
        let result = self.build(params, wants_swap_chain.then_some(swap_chain_desc));

        let (device, swap_chain) = match result {
            Ok(built) => built,
            Err(e) => {
                log::error!("Device creation failed: {e}");
                return e.status();
            }
        };

        if let Some(slot) = outputs.feature_level {
            *slot = Some(device.feature_level());
        }
        let nothing_returned =
            outputs.device.is_none() && outputs.context.is_none() && swap_chain_out.is_none();
        if let Some(slot) = outputs.context {
            *slot = Some(device.immediate_context());
        }
        if let Some(slot) = outputs.device {
            *slot = Some(device);
        }
        if let (Some(slot), Some(swap_chain)) = (swap_chain_out, swap_chain) {
            *slot = Some(swap_chain);
        }

        let status = if nothing_returned {
            log::debug!("No output slot requested");
            Status::False
        } else {
            Status::Ok
        };
        log::info!("Exit: device creation ({status})");
        status
    }

    /// `swap_chain` is `None` when no swap chain is requested, `Some(None)` when
    /// one is requested without a descriptor.
    fn build(
        &self,
        params: &CreateDeviceParams<'_>,
        swap_chain: Option<Option<&SwapChainDescriptor>>,
    ) -> Result<(Arc<Device>, Option<Arc<dyn SwapChain>>), CreationError> {
        if let Some(None) = swap_chain {
            return Err(CreationError::Validation(
                "swap chain requested without a descriptor".to_string(),
            ));
        }

        let (factory, adapter) = self.select_adapter(params)?;
        let device = self.create_core(&adapter, params.flags, params.feature_levels)?;

        let swap_chain = match swap_chain.flatten() {
            Some(desc) => {
                let chain = factory
                    .create_swap_chain(device.backend_device(), desc)
                    .map_err(|e| CreationError::SwapChain(e.to_string()))?;
                log::info!("Created swap chain {}x{}", desc.width, desc.height);
                Some(chain)
            }
            None => None,
        };

        Ok((device, swap_chain))
    }

    fn select_adapter(
        &self,
        params: &CreateDeviceParams<'_>,
    ) -> Result<(Arc<dyn AdapterFactory>, AdapterHandle), CreationError> {
        match &params.adapter {
            None => {
                if params.driver_type != DriverType::Hardware {
                    log::warn!("Unsupported driver type {:?}", params.driver_type);
                }
                let factory = self.loader.create_factory().map_err(|e| {
                    log::error!("Failed to create an adapter factory");
                    CreationError::Factory(e.to_string())
                })?;
                let adapter = factory.clone().enum_adapter(0).ok_or_else(|| {
                    log::error!("No default adapter available");
                    CreationError::AdapterNotFound { index: 0 }
                })?;
                Ok((factory, adapter))
            }
            Some(adapter) => {
                let factory = adapter.factory().cloned().ok_or_else(|| {
                    log::error!("Failed to query the factory of the adapter");
                    CreationError::Validation("adapter has no parent factory".to_string())
                })?;
                if params.driver_type != DriverType::Unknown || params.software.is_some() {
                    return Err(CreationError::Validation(
                        "driver type and software module must be unset when an adapter is given"
                            .to_string(),
                    ));
                }
                Ok((factory, adapter.clone()))
            }
        }
    }

    fn create_core(
        &self,
        adapter: &AdapterHandle,
        flags: CreateDeviceFlags,
        feature_levels: Option<&[FeatureLevel]>,
    ) -> Result<Arc<Device>, CreationError> {
        let resolved = self.resolver.resolve(adapter)?;
        let options: RuntimeOptions = self.bootstrap.ensure_initialized(&self.startup);

        let prober = CapabilityProber::new(resolved.instance.clone());
        let level = negotiate_feature_level(&prober, &resolved.adapter, feature_levels)?;

        let request = DeviceRequest {
            luid: resolved.adapter.desc().luid,
            feature_level: level,
        };
        let backend = self.cache.get_or_create(options.reuse_policy, request, || {
            resolved
                .instance
                .create_device(&resolved.adapter, level, flags)
                .map_err(CreationError::from)
        })?;

        Ok(Arc::new(Device::new(
            resolved.instance,
            resolved.adapter,
            level,
            flags,
            backend,
            options,
        )))
    }
}
