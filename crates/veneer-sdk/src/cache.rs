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

//! Retention of the shared backend device.

use std::sync::{Arc, Mutex};

use veneer_core::config::ReusePolicy;
use veneer_core::renderer::{GraphicsDevice, Luid};
use veneer_core::{CreationError, FeatureLevel};

/// What a device-creation call asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceRequest {
    /// LUID of the resolved adapter.
    pub luid: Luid,
    /// The negotiated feature level.
    pub feature_level: FeatureLevel,
}

#[derive(Debug)]
struct CachedDevice {
    request: DeviceRequest,
    device: Arc<dyn GraphicsDevice>,
}

/// Holds at most one live backend device.
///
/// The check and the store happen under one lock, so two threads racing on the
/// first creation build a single device.
#[derive(Debug, Default)]
pub struct DeviceCache {
    slot: Mutex<Option<CachedDevice>>,
}

impl DeviceCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the retained device or builds one with `factory`.
    ///
    /// - [`ReusePolicy::Always`]: once a device is retained it is returned for
    ///   every request, whatever adapter or level that request names.
    /// - [`ReusePolicy::MatchingRequest`]: the retained device is returned only
    ///   for an identical request; otherwise a new one is built and replaces it.
    /// - [`ReusePolicy::Never`]: always builds and retains nothing.
    ///
    /// A failing `factory` leaves the cache untouched.
    pub fn get_or_create<F>(
        &self,
        policy: ReusePolicy,
        request: DeviceRequest,
        factory: F,
    ) -> Result<Arc<dyn GraphicsDevice>, CreationError>
    where
        F: FnOnce() -> Result<Arc<dyn GraphicsDevice>, CreationError>,
    {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(cached) = slot.as_ref() {
            let reusable = match policy {
                ReusePolicy::Always => true,
                ReusePolicy::MatchingRequest => cached.request == request,
                ReusePolicy::Never => false,
            };
            if reusable {
                if cached.request != request {
                    log::warn!(
                        "Reusing backend device created for {:?}, ignoring request for {:?}",
                        cached.request,
                        request
                    );
                } else {
                    log::info!("Reusing existing backend device");
                }
                return Ok(cached.device.clone());
            }
        }

        let device = factory()?;
        match policy {
            ReusePolicy::Never => {
                *slot = None;
            }
            ReusePolicy::Always | ReusePolicy::MatchingRequest => {
                log::info!("Stored backend device for reuse");
                *slot = Some(CachedDevice {
                    request,
                    device: device.clone(),
                });
            }
        }
        Ok(device)
    }

    /// Whether a device is retained.
    pub fn is_populated(&self) -> bool {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Drops the retained device.
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
