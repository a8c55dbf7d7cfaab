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

//! Plain data types shared by every layer of the device stack.

pub mod adapter;
pub mod buffer;
pub mod feature_level;
pub mod flags;
pub mod input_layout;
pub mod status;
pub mod swap_chain;
pub mod util;

pub use self::adapter::*;
pub use self::buffer::*;
pub use self::feature_level::*;
pub use self::flags::*;
pub use self::input_layout::*;
pub use self::status::*;
pub use self::swap_chain::*;
pub use self::util::*;
