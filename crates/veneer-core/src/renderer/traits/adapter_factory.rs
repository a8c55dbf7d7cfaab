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

use std::fmt::Debug;
use std::sync::Arc;

use crate::renderer::api::{AdapterHandle, SwapChainDescriptor};
use crate::renderer::error::ResourceError;
use crate::renderer::traits::GraphicsDevice;

/// Enumerates adapters for callers and builds presentation surfaces.
pub trait AdapterFactory: Send + Sync + Debug + 'static {
    /// Returns a handle to the adapter at `index`, or `None` past the end.
    ///
    /// The returned handle names this factory as its parent.
    fn enum_adapter(self: Arc<Self>, index: usize) -> Option<AdapterHandle>;

    /// Creates a swap chain bound to `device`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceError`] if `device` does not belong to this backend or the
    /// back buffers cannot be allocated.
    fn create_swap_chain(
        &self,
        device: &Arc<dyn GraphicsDevice>,
        descriptor: &SwapChainDescriptor,
    ) -> Result<Arc<dyn SwapChain>, ResourceError>;
}

/// A presentation surface bound to one device.
pub trait SwapChain: Send + Sync + Debug + 'static {
    /// The descriptor the swap chain was created with.
    fn descriptor(&self) -> &SwapChainDescriptor;

    /// Index of the back buffer that will be presented next.
    fn current_buffer_index(&self) -> u32;

    /// Presents the current back buffer and advances the ring.
    fn present(&self) -> Result<(), ResourceError>;
}
