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

//! Status codes returned by the creation entry points.

use std::fmt;

/// The outcome of a creation entry point.
///
/// Callers may rely on the status alone: on any failure every output slot is
/// left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Full success.
    Ok,
    /// Success, but the caller requested no outputs.
    False,
    /// A bad combination of caller parameters.
    InvalidArg,
    /// Generic failure.
    Fail,
    /// The requested adapter does not exist.
    NotFound,
    /// The entry point is not implemented.
    NotImpl,
}

impl Status {
    /// Raw result code in the conventional 32-bit form.
    pub const fn code(self) -> u32 {
        match self {
            Status::Ok => 0x0000_0000,
            Status::False => 0x0000_0001,
            Status::InvalidArg => 0x8007_0057,
            Status::Fail => 0x8000_4005,
            Status::NotFound => 0x887A_0002,
            Status::NotImpl => 0x8000_4001,
        }
    }

    /// `true` for [`Status::Ok`] and [`Status::False`].
    pub const fn is_success(self) -> bool {
        matches!(self, Status::Ok | Status::False)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "S_OK",
            Status::False => "S_FALSE",
            Status::InvalidArg => "E_INVALIDARG",
            Status::Fail => "E_FAIL",
            Status::NotFound => "DXGI_ERROR_NOT_FOUND",
            Status::NotImpl => "E_NOTIMPL",
        };
        write!(f, "{name} (0x{:08x})", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes() {
        assert!(Status::Ok.is_success());
        assert!(Status::False.is_success());
        assert!(!Status::NotImpl.is_success());
        assert_eq!(Status::InvalidArg.to_string(), "E_INVALIDARG (0x80070057)");
    }
}
