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

//! # Veneer Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! for the device bootstrap and capability-negotiation layer.
//!
//! Nothing in here talks to a GPU. Concrete backends live in `veneer-infra`,
//! and the algorithms that drive these contracts live in `veneer-sdk`.

#![warn(missing_docs)]

pub mod config;
pub mod renderer;

pub use config::{OptionLayer, OptionManager, OptionValue, RuntimeOptions, StartupConfig};
pub use renderer::{CreationError, FeatureLevel, Status};
