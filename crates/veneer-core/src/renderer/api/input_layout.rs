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

//! Input-assembler state bound on a device context.

use std::sync::Arc;

use crate::renderer::api::buffer::BufferId;
use crate::renderer::api::util::enums::IndexFormat;

/// The semantic name that identifies vertex positions.
pub const POSITION_SEMANTIC: &str = "POSITION";

/// One attribute of a vertex record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElementDesc {
    /// Semantic name, e.g. `POSITION`.
    pub semantic_name: String,
    /// Semantic index, distinguishing several attributes with the same name.
    pub semantic_index: u32,
    /// Byte offset of the attribute inside its vertex record.
    pub offset: u32,
    /// Vertex buffer slot the attribute is read from.
    pub binding: u32,
}

impl InputElementDesc {
    /// Convenience constructor.
    pub fn new(
        semantic_name: impl Into<String>,
        semantic_index: u32,
        offset: u32,
        binding: u32,
    ) -> Self {
        Self {
            semantic_name: semantic_name.into(),
            semantic_index,
            offset,
            binding,
        }
    }
}

/// An immutable list of vertex attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLayout {
    elements: Vec<InputElementDesc>,
}

impl InputLayout {
    /// Creates a layout from its attributes.
    pub fn new(elements: Vec<InputElementDesc>) -> Self {
        Self { elements }
    }

    /// All attributes in declaration order.
    pub fn elements(&self) -> &[InputElementDesc] {
        &self.elements
    }

    /// Finds the attribute with the given semantic. Names compare case-insensitively.
    pub fn find(&self, semantic_name: &str, semantic_index: u32) -> Option<&InputElementDesc> {
        self.elements.iter().find(|element| {
            element.semantic_index == semantic_index
                && element.semantic_name.eq_ignore_ascii_case(semantic_name)
        })
    }
}

/// A vertex buffer bound to an input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferBinding {
    /// The bound buffer.
    pub buffer: BufferId,
    /// Byte offset of the first vertex record.
    pub offset: u64,
    /// Byte size of one vertex record.
    pub stride: u32,
}

/// The bound index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBufferBinding {
    /// The bound buffer.
    pub buffer: BufferId,
    /// Width of each index.
    pub format: IndexFormat,
    /// Byte offset of index 0.
    pub offset: u64,
}

/// Number of vertex buffer slots a context exposes.
pub const MAX_VERTEX_BUFFER_SLOTS: usize = 32;

/// Snapshot of the input-assembler stage of a context.
#[derive(Debug, Clone, Default)]
pub struct InputAssemblerState {
    /// The bound input layout.
    pub input_layout: Option<Arc<InputLayout>>,
    /// Vertex buffers indexed by slot. `None` means the slot is empty.
    pub vertex_buffers: Vec<Option<VertexBufferBinding>>,
    /// The bound index buffer.
    pub index_buffer: Option<IndexBufferBinding>,
}

impl InputAssemblerState {
    /// The vertex buffer bound at `slot`, if any.
    pub fn vertex_buffer(&self, slot: u32) -> Option<&VertexBufferBinding> {
        self.vertex_buffers
            .get(slot as usize)
            .and_then(|binding| binding.as_ref())
    }
}

/// Arguments of an indexed draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawIndexedParams {
    /// Number of indices to draw.
    pub index_count: u32,
    /// First index to read from the index buffer.
    pub start_index: u32,
    /// Value added to each index before fetching the vertex.
    pub base_vertex: i32,
    /// First instance to draw.
    pub start_instance: u32,
}
