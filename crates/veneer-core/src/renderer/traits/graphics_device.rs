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

use crate::renderer::api::*;
use crate::renderer::error::ResourceError;

/// The live backend device.
///
/// One backend device can be shared by several front-end devices when the device
/// cache reuses it, so every method takes `&self`.
pub trait GraphicsDevice: Send + Sync + Debug + 'static {
    /// Gets information about the adapter this device was created on.
    fn adapter_info(&self) -> GraphicsAdapterInfo;

    /// Creates a new GPU buffer.
    /// ## Arguments
    /// * `descriptor` - A reference to a `BufferDescriptor` containing the buffer configuration.
    /// ## Returns
    /// A `Result` containing the ID of the created buffer or an error if the creation fails.
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError>;

    /// Creates a new GPU buffer and initializes it with the provided data.
    /// ## Arguments
    /// * `descriptor` - A reference to a `BufferDescriptor` containing the buffer configuration.
    /// * `data` - A slice of bytes containing the initial data for the buffer.
    /// ## Returns
    /// A `Result` containing the ID of the created buffer or an error if the creation fails.
    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError>;

    /// Destroys a GPU buffer.
    /// ## Arguments
    /// * `id` - The ID of the buffer to be destroyed.
    /// ## Returns
    /// A `Result` indicating success or failure of the operation.
    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError>;

    /// Writes data to a specific region of a GPU buffer.
    /// ## Arguments
    /// * `id` - The ID of the buffer to write to.
    /// * `offset` - The offset in bytes from the beginning of the buffer.
    /// * `data` - A slice of bytes containing the data to write.
    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError>;

    /// Returns the size of a buffer in bytes.
    fn buffer_size(&self, id: BufferId) -> Result<u64, ResourceError>;

    /// Copies `size` bytes between two buffers on the GPU timeline.
    ///
    /// Offsets and size must be multiples of [`COPY_BUFFER_ALIGNMENT`].
    fn copy_buffer_region(
        &self,
        source: BufferId,
        source_offset: u64,
        destination: BufferId,
        destination_offset: u64,
        size: u64,
    ) -> Result<(), ResourceError>;

    /// Maps a `MAP_READ` buffer, copies its whole content out and unmaps it.
    ///
    /// Blocks until every previously submitted copy into the buffer has completed.
    fn map_read(&self, id: BufferId) -> Result<Vec<u8>, ResourceError>;

    /// Issues an indexed draw with the given input-assembler state.
    fn draw_indexed(
        &self,
        state: &InputAssemblerState,
        params: &DrawIndexedParams,
    ) -> Result<(), ResourceError>;

    /// Allows the owning backend to recover its concrete device type.
    fn as_any(&self) -> &dyn Any;
}
