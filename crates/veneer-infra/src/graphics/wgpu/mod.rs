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

//! A translation backend built on `wgpu`.
//!
//! Adapters are enumerated across every backend `wgpu` was compiled with.
//! Feature levels are mapped onto `wgpu` downlevel flags, limits and features,
//! see [`feature_level`].

mod conversions;
mod device;
mod factory;
pub mod feature_level;
mod instance;

pub use self::device::WgpuDevice;
pub use self::factory::{WgpuAdapterFactory, WgpuSwapChain};
pub use self::instance::{WgpuAdapter, WgpuInstance, WgpuLoader};
