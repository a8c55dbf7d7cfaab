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

//! Layered runtime configuration.
//!
//! Options come from several named layers (startup configuration, the
//! `quality.conf` and `user.conf` files, ...). Each layer has a priority, and
//! [`merge_layers`] folds them into one resolved map where the highest priority
//! wins. [`RuntimeOptions`] is the typed view of that map that the device layer
//! reads.

mod error;
mod layer;
mod manager;
mod options;
mod source;
mod startup;

pub use self::error::ConfigError;
pub use self::layer::{merge_layers, priority, OptionLayer, OptionValue};
pub use self::manager::OptionManager;
pub use self::options::{keys, ReusePolicy, RuntimeOptions};
pub use self::source::{parse_conf, InMemoryLayerSource, LayerSource};
pub use self::startup::{StartupConfig, STARTUP_LAYER_NAME};
