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

/// Well-known layer priorities. Higher values win during [`merge_layers`].
pub mod priority {
    /// Built-in defaults.
    pub const DEFAULT: u32 = 0;
    /// The caller-supplied startup configuration.
    pub const STARTUP: u32 = 100;
    /// The `quality.conf` layer.
    pub const QUALITY: u32 = 200;
    /// The `user.conf` layer.
    pub const USER: u32 = 300;
}

/// A single option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// `true` or `false`.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Anything else.
    String(String),
}

impl OptionValue {
    /// Interprets raw text from a configuration file.
    ///
    /// `True`/`false` are matched case-insensitively. Integers are tried before
    /// floats. Everything else is kept as a string with surrounding quotes removed.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            return OptionValue::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return OptionValue::Bool(false);
        }
        if let Ok(value) = raw.parse::<i64>() {
            return OptionValue::Int(value);
        }
        if let Ok(value) = raw.parse::<f64>() {
            return OptionValue::Float(value);
        }
        let unquoted = raw
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(raw);
        OptionValue::String(unquoted.to_string())
    }

    /// The value as a boolean. Integers are `true` when non-zero.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            OptionValue::Int(value) => Some(*value != 0),
            _ => None,
        }
    }

    /// The value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The value as a float. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Float(value) => Some(*value),
            OptionValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// The value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{value}"),
            OptionValue::Int(value) => write!(f, "{value}"),
            OptionValue::Float(value) => write!(f, "{value}"),
            OptionValue::String(value) => write!(f, "{value}"),
        }
    }
}

/// A named, prioritized set of option values.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionLayer {
    name: String,
    priority: u32,
    enabled: bool,
    blend_strength: f32,
    blend_threshold: f32,
    values: BTreeMap<String, OptionValue>,
}

impl OptionLayer {
    /// Creates an empty, enabled layer at full strength.
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            priority,
            enabled: true,
            blend_strength: 1.0,
            blend_threshold: 0.0,
            values: BTreeMap::new(),
        }
    }

    /// Sets the blend strength and the threshold below which the layer is ignored.
    pub fn with_blend(mut self, strength: f32, threshold: f32) -> Self {
        self.blend_strength = strength.clamp(0.0, 1.0);
        self.blend_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables the layer.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Layer name, e.g. `user.conf`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merge priority.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Whether the layer is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Blend strength in `[0, 1]`.
    pub fn blend_strength(&self) -> f32 {
        self.blend_strength
    }

    /// Strength below which the layer does not contribute.
    pub fn blend_threshold(&self) -> f32 {
        self.blend_threshold
    }

    /// A layer contributes when enabled and its strength reaches the threshold.
    pub fn is_active(&self) -> bool {
        self.enabled && self.blend_strength >= self.blend_threshold
    }

    /// Sets one value.
    pub fn set(&mut self, key: impl Into<String>, value: OptionValue) {
        self.values.insert(key.into(), value);
    }

    /// Replaces every value of the layer.
    pub fn replace_values(&mut self, values: BTreeMap<String, OptionValue>) {
        self.values = values;
    }

    /// Looks up one value.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// All values.
    pub fn values(&self) -> &BTreeMap<String, OptionValue> {
        &self.values
    }
}

/// Folds `layers` into one resolved map.
///
/// Layers are applied from lowest to highest priority. Equal priorities keep
/// their order in `layers`, so the later one wins. Inactive layers are skipped.
/// A layer below full strength interpolates numeric values towards its own value;
/// any other value is replaced outright.
pub fn merge_layers(layers: &[OptionLayer]) -> BTreeMap<String, OptionValue> {
    let mut ordered: Vec<&OptionLayer> = layers.iter().filter(|l| l.is_active()).collect();
    ordered.sort_by_key(|layer| layer.priority);

    let mut resolved = BTreeMap::new();
    for layer in ordered {
        for (key, value) in &layer.values {
            let blended = match resolved.get(key) {
                Some(below) if layer.blend_strength < 1.0 => {
                    blend(below, value, layer.blend_strength)
                }
                _ => value.clone(),
            };
            resolved.insert(key.clone(), blended);
        }
    }
    resolved
}

fn blend(below: &OptionValue, above: &OptionValue, strength: f32) -> OptionValue {
    let t = f64::from(strength);
    match (below, above) {
        (OptionValue::Float(a), OptionValue::Float(b)) => OptionValue::Float(a + (b - a) * t),
        (OptionValue::Int(a), OptionValue::Float(b)) => {
            OptionValue::Float(*a as f64 + (b - *a as f64) * t)
        }
        (OptionValue::Float(a), OptionValue::Int(b)) => {
            OptionValue::Float(a + (*b as f64 - a) * t)
        }
        (OptionValue::Int(a), OptionValue::Int(b)) => {
            OptionValue::Int((*a as f64 + (*b as f64 - *a as f64) * t).round() as i64)
        }
        _ => above.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &str, priority: u32, key: &str, value: OptionValue) -> OptionLayer {
        let mut layer = OptionLayer::new(name, priority);
        layer.set(key, value);
        layer
    }

    #[test]
    fn parse_recognizes_types() {
        assert_eq!(OptionValue::parse("True"), OptionValue::Bool(true));
        assert_eq!(OptionValue::parse(" 42 "), OptionValue::Int(42));
        assert_eq!(OptionValue::parse("0.5"), OptionValue::Float(0.5));
        assert_eq!(
            OptionValue::parse("\"matching\""),
            OptionValue::String("matching".into())
        );
    }

    #[test]
    fn highest_priority_wins_regardless_of_order() {
        let layers = vec![
            layer("user.conf", priority::USER, "a", OptionValue::Int(3)),
            layer("startup", priority::STARTUP, "a", OptionValue::Int(1)),
            layer("quality.conf", priority::QUALITY, "a", OptionValue::Int(2)),
        ];
        assert_eq!(merge_layers(&layers)["a"], OptionValue::Int(3));
    }

    #[test]
    fn later_registration_wins_ties() {
        let layers = vec![
            layer("first", 10, "a", OptionValue::Bool(false)),
            layer("second", 10, "a", OptionValue::Bool(true)),
        ];
        assert_eq!(merge_layers(&layers)["a"], OptionValue::Bool(true));
    }

    #[test]
    fn inactive_layers_are_skipped() {
        let layers = vec![
            layer("base", 0, "a", OptionValue::Int(1)),
            layer("off", 10, "a", OptionValue::Int(2)).with_enabled(false),
            layer("weak", 20, "a", OptionValue::Int(3)).with_blend(0.05, 0.1),
        ];
        assert_eq!(merge_layers(&layers)["a"], OptionValue::Int(1));
    }

    #[test]
    fn partial_strength_blends_numbers() {
        let layers = vec![
            layer("base", 0, "a", OptionValue::Float(0.0)),
            layer("half", 10, "a", OptionValue::Float(1.0)).with_blend(0.5, 0.1),
        ];
        assert_eq!(merge_layers(&layers)["a"], OptionValue::Float(0.5));
    }

    #[test]
    fn blending_extreme_integers_does_not_overflow() {
        let layers = vec![
            layer("base", 0, "a", OptionValue::Int(i64::MIN)),
            layer("half", 10, "a", OptionValue::Int(i64::MAX)).with_blend(0.5, 0.1),
        ];
        assert_eq!(merge_layers(&layers)["a"], OptionValue::Int(0));
    }
}
