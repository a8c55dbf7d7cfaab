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

//! # Veneer Infra
//!
//! Concrete implementations of the contracts declared in `veneer-core`.
//!
//! - [`graphics::wgpu`]: a translation backend built on `wgpu`.
//! - [`config`]: `.conf` option layers and the RON startup configuration read
//!   from disk.
//! - [`fs`]: path helpers shared by the above.

pub mod config;
pub mod fs;
pub mod graphics;

pub use config::{load_startup_config, ConfFileSource, STARTUP_CONFIG_FILE};
pub use graphics::wgpu::{WgpuAdapterFactory, WgpuDevice, WgpuInstance, WgpuLoader};
