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

use std::collections::BTreeMap;
use std::fmt;

use super::layer::OptionValue;

/// Option keys understood by the device layer.
pub mod keys {
    /// How the device cache reuses its backend device.
    pub const DEVICE_REUSE_POLICY: &str = "veneer.deviceReusePolicy";
    /// Enables the geometry snapshot on indexed draws.
    pub const GEOMETRY_SNAPSHOT: &str = "veneer.geometrySnapshot";
    /// Logs every sampled position.
    pub const LOG_SNAPSHOTS: &str = "veneer.logSnapshots";
}

/// When the device cache hands back its retained device instead of building one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReusePolicy {
    /// The first device is reused for every later request, even a different one.
    #[default]
    Always,
    /// Reuse only when adapter and feature level match; otherwise rebuild and replace.
    MatchingRequest,
    /// Never reuse.
    Never,
}

impl ReusePolicy {
    /// Parses `always`, `matching` or `never`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "always" => Some(ReusePolicy::Always),
            "matching" => Some(ReusePolicy::MatchingRequest),
            "never" => Some(ReusePolicy::Never),
            _ => None,
        }
    }
}

impl fmt::Display for ReusePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReusePolicy::Always => "always",
            ReusePolicy::MatchingRequest => "matching",
            ReusePolicy::Never => "never",
        })
    }
}

/// The typed options the device layer reads after bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Device cache policy.
    pub reuse_policy: ReusePolicy,
    /// Whether indexed draws run the geometry snapshot.
    pub geometry_snapshot: bool,
    /// Whether sampled positions are logged.
    pub log_snapshots: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            reuse_policy: ReusePolicy::Always,
            geometry_snapshot: false,
            log_snapshots: true,
        }
    }
}

impl RuntimeOptions {
    /// Reads the recognized keys out of a resolved option map.
    ///
    /// Missing keys keep their defaults. Malformed values are logged and ignored.
    pub fn from_resolved(resolved: &BTreeMap<String, OptionValue>) -> Self {
        let mut options = Self::default();

        if let Some(value) = resolved.get(keys::DEVICE_REUSE_POLICY) {
            match ReusePolicy::parse(&value.to_string()) {
                Some(policy) => options.reuse_policy = policy,
                None => log::warn!(
                    "Ignoring invalid value '{}' for {}",
                    value,
                    keys::DEVICE_REUSE_POLICY
                ),
            }
        }
        read_bool(resolved, keys::GEOMETRY_SNAPSHOT, &mut options.geometry_snapshot);
        read_bool(resolved, keys::LOG_SNAPSHOTS, &mut options.log_snapshots);

        options
    }
}

fn read_bool(resolved: &BTreeMap<String, OptionValue>, key: &str, target: &mut bool) {
    if let Some(value) = resolved.get(key) {
        match value.as_bool() {
            Some(flag) => *target = flag,
            None => log::warn!("Ignoring non-boolean value '{value}' for {key}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let options = RuntimeOptions::from_resolved(&BTreeMap::new());
        assert_eq!(options, RuntimeOptions::default());
        assert_eq!(options.reuse_policy, ReusePolicy::Always);
    }

    #[test]
    fn reads_recognized_keys() {
        let mut resolved = BTreeMap::new();
        resolved.insert(
            keys::DEVICE_REUSE_POLICY.to_string(),
            OptionValue::String("Matching".into()),
        );
        resolved.insert(keys::GEOMETRY_SNAPSHOT.to_string(), OptionValue::Bool(true));
        resolved.insert(keys::LOG_SNAPSHOTS.to_string(), OptionValue::Int(0));

        let options = RuntimeOptions::from_resolved(&resolved);
        assert_eq!(options.reuse_policy, ReusePolicy::MatchingRequest);
        assert!(options.geometry_snapshot);
        assert!(!options.log_snapshots);
    }

    #[test]
    fn invalid_policy_keeps_default() {
        let mut resolved = BTreeMap::new();
        resolved.insert(
            keys::DEVICE_REUSE_POLICY.to_string(),
            OptionValue::String("sometimes".into()),
        );
        assert_eq!(
            RuntimeOptions::from_resolved(&resolved).reuse_policy,
            ReusePolicy::Always
        );
    }
}
