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

//! Provides the public, backend-agnostic device contracts for Veneer.
//!
//! This module defines the "common language" shared by the device layer and
//! whichever translation backend sits underneath it. It contains the abstract
//! `traits` (like [`BackendInstance`] and [`GraphicsDevice`]), plain data
//! structures (like [`AdapterHandle`] and [`InputAssemblerState`]) and the error
//! types returned across those seams.
//!
//! The 'how' is handled by a concrete backend implementation in `veneer-infra`
//! (a WGPU backend), and the orchestration that ties resolution, negotiation and
//! caching together lives in `veneer-sdk`.

pub mod api;
pub mod error;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::error::{ConstructionError, CreationError, ResourceError};
pub use self::traits::{
    AdapterFactory, BackendAdapter, BackendInstance, BackendLoader, GraphicsDevice, SwapChain,
};
