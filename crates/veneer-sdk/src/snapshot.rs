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

//! Geometry snapshots of indexed draws.
//!
//! The extractor reads the index range of a draw back from the GPU, derives the
//! smallest vertex range it touches and reads exactly that range to sample the
//! position of the first vertex. It never writes to the buffers it reads and
//! every failure degrades to "no sample".

use veneer_core::renderer::{
    align_down, align_up, BufferDescriptor, BufferId, BufferUsage, DrawIndexedParams,
    GraphicsDevice, InputAssemblerState, ResourceError, POSITION_SEMANTIC,
};

/// Size of a packed three-component float position.
const POSITION_SIZE: u32 = 12;

/// The position sampled from an indexed draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Position of the first vertex in the fetched range.
    pub position: [f32; 3],
    /// First vertex fetched, after applying the base vertex.
    pub first_vertex: u32,
    /// Last vertex fetched, inclusive.
    pub last_vertex: u32,
}

/// Samples the first vertex position touched by an indexed draw.
///
/// Returns `None` without any buffer I/O when no input layout, position
/// attribute, vertex buffer or index buffer is bound. Read failures are logged
/// and also yield `None`.
pub fn snapshot(
    device: &dyn GraphicsDevice,
    state: &InputAssemblerState,
    params: &DrawIndexedParams,
) -> Option<PositionSample> {
    let Some(layout) = state.input_layout.as_ref() else {
        log::trace!("Snapshot skipped: no input layout bound");
        return None;
    };
    let Some(attribute) = layout.find(POSITION_SEMANTIC, 0) else {
        log::trace!("Snapshot skipped: input layout has no POSITION0 attribute");
        return None;
    };
    let Some(vertex_buffer) = state.vertex_buffer(attribute.binding) else {
        log::trace!(
            "Snapshot skipped: no vertex buffer bound at slot {}",
            attribute.binding
        );
        return None;
    };
    let Some(index_buffer) = state.index_buffer else {
        log::trace!("Snapshot skipped: no index buffer bound");
        return None;
    };

    let width = index_buffer.format.byte_width();
    let index_offset = index_buffer.offset + u64::from(params.start_index) * width;
    let index_size = u64::from(params.index_count) * width;
    if index_size == 0 {
        return None;
    }

    let index_bytes = match read_buffer_range(device, index_buffer.buffer, index_offset, index_size)
    {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Snapshot: failed to read index buffer: {e}");
            return None;
        }
    };

    let Some((min_index, max_index)) = index_bounds(&index_bytes, width) else {
        log::debug!("Snapshot: no indices decoded");
        return None;
    };

    let (first_vertex, last_vertex) =
        vertex_range(min_index, max_index, params.base_vertex)?;

    let stride = vertex_buffer.stride;
    if stride == 0 {
        log::debug!("Snapshot skipped: vertex stride is zero");
        return None;
    }
    let vertex_offset = vertex_buffer.offset + u64::from(first_vertex) * u64::from(stride);
    let vertex_size = (u64::from(last_vertex) - u64::from(first_vertex) + 1) * u64::from(stride);

    let vertex_bytes =
        match read_buffer_range(device, vertex_buffer.buffer, vertex_offset, vertex_size) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Snapshot: failed to read vertex buffer: {e}");
                return None;
            }
        };

    if attribute.offset.saturating_add(POSITION_SIZE) > stride {
        log::debug!(
            "Snapshot skipped: position at offset {} does not fit in stride {stride}",
            attribute.offset
        );
        return None;
    }
    let base = attribute.offset as usize;
    let position = [
        read_f32_le(&vertex_bytes, base)?,
        read_f32_le(&vertex_bytes, base + 4)?,
        read_f32_le(&vertex_bytes, base + 8)?,
    ];

    Some(PositionSample {
        position,
        first_vertex,
        last_vertex,
    })
}

/// Applies `base_vertex` to the index bounds, clamping the low end at zero.
///
/// Returns `None` when the whole range lands below vertex zero.
pub fn vertex_range(min_index: u32, max_index: u32, base_vertex: i32) -> Option<(u32, u32)> {
    let first = (i64::from(min_index) + i64::from(base_vertex)).max(0);
    let last = i64::from(max_index) + i64::from(base_vertex);
    if last < first {
        return None;
    }
    Some((u32::try_from(first).ok()?, u32::try_from(last).ok()?))
}

/// Smallest and largest index in `bytes`, decoded at `width` bytes per index.
pub fn index_bounds(bytes: &[u8], width: u64) -> Option<(u32, u32)> {
    decode_indices(bytes, width)?
        .into_iter()
        .fold(None, |bounds, index| match bounds {
            None => Some((index, index)),
            Some((min, max)) => Some((min.min(index), max.max(index))),
        })
}

/// Decodes little-endian indices. `width` must be 2 or 4.
pub fn decode_indices(bytes: &[u8], width: u64) -> Option<Vec<u32>> {
    match width {
        2 => (0..bytes.len() / 2)
            .map(|i| read_u16_le(bytes, i * 2).map(u32::from))
            .collect(),
        4 => (0..bytes.len() / 4)
            .map(|i| read_u32_le(bytes, i * 4))
            .collect(),
        _ => None,
    }
}

/// Reads a little-endian `u16` at `offset`, or `None` if it would overrun.
pub fn read_u16_le(bytes: &[u8], offset: usize) -> Option<u16> {
    let raw = bytes.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes(raw.try_into().ok()?))
}

/// Reads a little-endian `u32` at `offset`, or `None` if it would overrun.
pub fn read_u32_le(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw = bytes.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes(raw.try_into().ok()?))
}

/// Reads a little-endian `f32` at `offset`, or `None` if it would overrun.
pub fn read_f32_le(bytes: &[u8], offset: usize) -> Option<f32> {
    read_u32_le(bytes, offset).map(f32::from_bits)
}

/// Copies `size` bytes at `offset` out of `buffer` through a staging buffer.
///
/// The copy is widened to the backend copy alignment and trimmed back before
/// returning. The staging buffer is destroyed on every path.
pub fn read_buffer_range(
    device: &dyn GraphicsDevice,
    buffer: BufferId,
    offset: u64,
    size: u64,
) -> Result<Vec<u8>, ResourceError> {
    let buffer_size = device.buffer_size(buffer)?;
    let end = offset.checked_add(size).ok_or(ResourceError::OutOfBounds {
        offset,
        size,
        resource_size: buffer_size,
    })?;
    if end > buffer_size {
        return Err(ResourceError::OutOfBounds {
            offset,
            size,
            resource_size: buffer_size,
        });
    }

    let copy_start = align_down(offset);
    let copy_end = align_up(end).min(buffer_size);
    let copy_size = copy_end - copy_start;

    let staging = device.create_buffer(&BufferDescriptor {
        label: Some("Snapshot Staging Buffer".into()),
        size: align_up(copy_size),
        usage: BufferUsage::MAP_READ | BufferUsage::COPY_DST,
    })?;

    let result = device
        .copy_buffer_region(buffer, copy_start, staging, 0, copy_size)
        .and_then(|()| device.map_read(staging));

    if let Err(e) = device.destroy_buffer(staging) {
        log::warn!("Failed to destroy snapshot staging buffer: {e}");
    }

    let data = result?;
    let skip = (offset - copy_start) as usize;
    data.get(skip..skip + size as usize)
        .map(<[u8]>::to_vec)
        .ok_or(ResourceError::OutOfBounds {
            offset,
            size,
            resource_size: data.len() as u64,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_base_vertex_clamps_low_end() {
        assert_eq!(vertex_range(2, 8, -3), Some((0, 5)));
        assert_eq!(vertex_range(2, 8, 4), Some((6, 12)));
        assert_eq!(vertex_range(1, 2, -5), None);
    }

    #[test]
    fn bounds_of_16_and_32_bit_indices() {
        let narrow: Vec<u8> = [5u16, 2, 8].iter().flat_map(|i| i.to_le_bytes()).collect();
        assert_eq!(index_bounds(&narrow, 2), Some((2, 8)));

        let wide: Vec<u8> = [70_000u32, 3].iter().flat_map(|i| i.to_le_bytes()).collect();
        assert_eq!(index_bounds(&wide, 4), Some((3, 70_000)));

        assert_eq!(index_bounds(&[], 2), None);
    }

    #[test]
    fn decode_rejects_unknown_width() {
        assert_eq!(decode_indices(&[0; 6], 3), None);
        assert_eq!(decode_indices(&[0; 4], 0), None);
        assert_eq!(decode_indices(&[], 0), None);
    }

    #[test]
    fn reads_are_bounds_checked() {
        let bytes = 1.5f32.to_le_bytes();
        assert_eq!(read_f32_le(&bytes, 0), Some(1.5));
        assert_eq!(read_f32_le(&bytes, 1), None);
        assert_eq!(read_u16_le(&bytes, 3), None);
        assert_eq!(read_u32_le(&bytes, usize::MAX), None);
    }
}
