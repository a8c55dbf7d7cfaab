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

//! Device creation flags.

use bitflags::bitflags;

bitflags! {
    /// Flags that tune how a device is created.
    ///
    /// They are forwarded untouched to the backend and reported back by
    /// `Device::creation_flags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CreateDeviceFlags: u32 {
        /// The device is only ever used from one thread.
        const SINGLETHREADED = 0x1;
        /// Enable backend validation layers.
        const DEBUG = 0x2;
        /// Use the software reference rasterizer.
        const SWITCH_TO_REF = 0x4;
        /// Do not spawn internal threads for deferred work.
        const PREVENT_INTERNAL_THREADING_OPTIMIZATIONS = 0x8;
        /// BGRA surface formats must be supported.
        const BGRA_SUPPORT = 0x20;
        /// Allow shader debugging.
        const DEBUGGABLE = 0x40;
        /// Do not register the device with the debugger layer.
        const PREVENT_ALTERING_LAYER_SETTINGS_FROM_REGISTRY = 0x80;
        /// Disable the GPU timeout watchdog.
        const DISABLE_GPU_TIMEOUT = 0x100;
        /// Prefer video-capable adapters.
        const VIDEO_SUPPORT = 0x800;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bits_are_retained() {
        let flags = CreateDeviceFlags::from_bits_retain(0x20 | 0x1000);
        assert!(flags.contains(CreateDeviceFlags::BGRA_SUPPORT));
        assert_eq!(flags.bits(), 0x1020);
    }
}
