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

//! Defines the core architectural traits of the device layer.
//!
//! These contracts decouple the creation algorithms from any specific translation
//! backend.
//!
//! - [`BackendLoader`]: Entry point into a backend. Builds instances and factories.
//! - [`BackendInstance`]: Owns adapter enumeration, capability probing and device construction.
//! - [`BackendAdapter`]: One physical GPU bound to one instance.
//! - [`AdapterFactory`]: Enumerates adapters for callers and builds swap chains.
//! - [`GraphicsDevice`]: The live backend device shared by every front-end device.
//! - [`SwapChain`]: A presentation surface bound to a device.

mod adapter_factory;
mod backend;
mod graphics_device;

pub use self::adapter_factory::{AdapterFactory, SwapChain};
pub use self::backend::{BackendAdapter, BackendInstance, BackendLoader};
pub use self::graphics_device::GraphicsDevice;
