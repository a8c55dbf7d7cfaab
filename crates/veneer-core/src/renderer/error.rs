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

//! Defines the hierarchy of error types for the device layer.

use crate::renderer::api::{FeatureLevel, Status};
use std::fmt;

/// An error related to the creation or use of a GPU buffer resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The buffer could not be found.
    NotFound,
    /// An attempt was made to access a resource out of its bounds.
    OutOfBounds {
        /// First byte of the requested range.
        offset: u64,
        /// Length of the requested range in bytes.
        size: u64,
        /// Total size of the resource.
        resource_size: u64,
    },
    /// A copy offset or size does not satisfy the backend alignment rules.
    Misaligned {
        /// The offending value.
        value: u64,
        /// The required alignment.
        alignment: u64,
    },
    /// The staging buffer could not be mapped for CPU access.
    MapFailed(String),
    /// An error originating from the specific graphics backend implementation.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound => write!(f, "Resource not found with ID."),
            ResourceError::OutOfBounds {
                offset,
                size,
                resource_size,
            } => write!(
                f,
                "Resource access out of bounds: {size} bytes at offset {offset} exceeds size {resource_size}."
            ),
            ResourceError::Misaligned { value, alignment } => {
                write!(f, "Value {value} is not aligned to {alignment} bytes.")
            }
            ResourceError::MapFailed(msg) => write!(f, "Failed to map buffer: {msg}"),
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// An error raised by the translation backend while building an instance or a device.
///
/// Backends return this as a typed result; the creation entry points convert it
/// into [`Status::Fail`] and never hand out a partially built device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The backend instance could not be created.
    InstanceCreation(String),
    /// The backend refused to create a logical device on the adapter.
    DeviceCreation(String),
    /// The adapter does not belong to the instance that was asked to use it.
    ForeignAdapter(String),
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::InstanceCreation(msg) => {
                write!(f, "Failed to create backend instance: {msg}")
            }
            ConstructionError::DeviceCreation(msg) => {
                write!(f, "Failed to create backend device: {msg}")
            }
            ConstructionError::ForeignAdapter(msg) => {
                write!(f, "Adapter does not belong to this instance: {msg}")
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

/// A high-level error produced while servicing a device-creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationError {
    /// The caller passed an invalid combination of parameters.
    Validation(String),
    /// No backend adapter matched the handle through any fallback.
    Resolution(String),
    /// None of the candidate feature levels is supported by the adapter.
    UnsupportedFeatureLevel {
        /// The candidate list that was probed, in probe order.
        candidates: Vec<FeatureLevel>,
    },
    /// The backend failed to build the device.
    Construction(ConstructionError),
    /// The default adapter factory could not be created.
    Factory(String),
    /// The factory has no adapter at the requested index.
    AdapterNotFound {
        /// The enumeration index that was requested.
        index: usize,
    },
    /// The presentation swap chain could not be created.
    SwapChain(String),
}

impl CreationError {
    /// Maps the error onto the status code reported by the entry points.
    pub fn status(&self) -> Status {
        match self {
            CreationError::Validation(_) => Status::InvalidArg,
            CreationError::AdapterNotFound { .. } => Status::NotFound,
            CreationError::Resolution(_)
            | CreationError::UnsupportedFeatureLevel { .. }
            | CreationError::Construction(_)
            | CreationError::Factory(_)
            | CreationError::SwapChain(_) => Status::Fail,
        }
    }
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationError::Validation(msg) => write!(f, "Invalid argument: {msg}"),
            CreationError::Resolution(msg) => write!(f, "Failed to resolve adapter: {msg}"),
            CreationError::UnsupportedFeatureLevel { candidates } => write!(
                f,
                "None of the requested feature levels is supported: {candidates:?}"
            ),
            CreationError::Construction(err) => write!(f, "Device construction failed: {err}"),
            CreationError::Factory(msg) => write!(f, "Failed to create adapter factory: {msg}"),
            CreationError::AdapterNotFound { index } => {
                write!(f, "No adapter available at index {index}")
            }
            CreationError::SwapChain(msg) => write!(f, "Failed to create swap chain: {msg}"),
        }
    }
}

impl std::error::Error for CreationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CreationError::Construction(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConstructionError> for CreationError {
    fn from(err: ConstructionError) -> Self {
        CreationError::Construction(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn resource_error_display() {
        let err = ResourceError::OutOfBounds {
            offset: 16,
            size: 32,
            resource_size: 40,
        };
        assert_eq!(
            format!("{err}"),
            "Resource access out of bounds: 32 bytes at offset 16 exceeds size 40."
        );
    }

    #[test]
    fn creation_error_wraps_construction_error() {
        let err: CreationError = ConstructionError::DeviceCreation("lost".to_string()).into();
        assert_eq!(
            format!("{err}"),
            "Device construction failed: Failed to create backend device: lost"
        );
        assert!(err.source().is_some());
        assert_eq!(err.status(), Status::Fail);
    }

    #[test]
    fn creation_error_status_mapping() {
        assert_eq!(
            CreationError::Validation("x".into()).status(),
            Status::InvalidArg
        );
        assert_eq!(
            CreationError::AdapterNotFound { index: 0 }.status(),
            Status::NotFound
        );
        assert_eq!(
            CreationError::UnsupportedFeatureLevel { candidates: vec![] }.status(),
            Status::Fail
        );
        assert_eq!(CreationError::Resolution("x".into()).status(), Status::Fail);
    }
}
