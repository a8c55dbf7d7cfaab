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

//! Capability tiers a device can be created at.

use std::fmt;
use std::str::FromStr;

/// A bundle of guaranteed device features, totally ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureLevel {
    /// Level 9.1.
    Level9_1,
    /// Level 9.2.
    Level9_2,
    /// Level 9.3.
    Level9_3,
    /// Level 10.0.
    Level10_0,
    /// Level 10.1.
    Level10_1,
    /// Level 11.0.
    Level11_0,
    /// Level 11.1.
    Level11_1,
    /// Level 12.0.
    Level12_0,
    /// Level 12.1.
    Level12_1,
}

/// The candidate list used when the caller supplies none, highest first.
pub const DEFAULT_FEATURE_LEVELS: [FeatureLevel; 6] = [
    FeatureLevel::Level11_0,
    FeatureLevel::Level10_1,
    FeatureLevel::Level10_0,
    FeatureLevel::Level9_3,
    FeatureLevel::Level9_2,
    FeatureLevel::Level9_1,
];

impl FeatureLevel {
    /// Every level, weakest first.
    pub const ALL: [FeatureLevel; 9] = [
        FeatureLevel::Level9_1,
        FeatureLevel::Level9_2,
        FeatureLevel::Level9_3,
        FeatureLevel::Level10_0,
        FeatureLevel::Level10_1,
        FeatureLevel::Level11_0,
        FeatureLevel::Level11_1,
        FeatureLevel::Level12_0,
        FeatureLevel::Level12_1,
    ];

    /// The packed `0xMm00` code (major in the high nibble, minor below it).
    pub const fn code(self) -> u32 {
        let (major, minor) = self.version();
        (major << 12) | (minor << 8)
    }

    /// Decodes a packed `0xMm00` code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.code() == code)
    }

    /// `(major, minor)` version pair.
    pub const fn version(self) -> (u32, u32) {
        match self {
            FeatureLevel::Level9_1 => (9, 1),
            FeatureLevel::Level9_2 => (9, 2),
            FeatureLevel::Level9_3 => (9, 3),
            FeatureLevel::Level10_0 => (10, 0),
            FeatureLevel::Level10_1 => (10, 1),
            FeatureLevel::Level11_0 => (11, 0),
            FeatureLevel::Level11_1 => (11, 1),
            FeatureLevel::Level12_0 => (12, 0),
            FeatureLevel::Level12_1 => (12, 1),
        }
    }
}

impl fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.version();
        write!(f, "{major}_{minor}")
    }
}

/// Error returned when a feature level string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFeatureLevelError(pub String);

impl fmt::Display for ParseFeatureLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown feature level '{}'", self.0)
    }
}

impl std::error::Error for ParseFeatureLevelError {}

impl FromStr for FeatureLevel {
    type Err = ParseFeatureLevelError;

    /// Accepts `11_0`, `11.0` and the hexadecimal code form `0xb000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            return u32::from_str_radix(hex, 16)
                .ok()
                .and_then(Self::from_code)
                .ok_or_else(|| ParseFeatureLevelError(s.to_string()));
        }
        let normalized = trimmed.replace('.', "_");
        Self::ALL
            .into_iter()
            .find(|level| level.to_string() == normalized)
            .ok_or_else(|| ParseFeatureLevelError(s.to_string()))
    }
}
