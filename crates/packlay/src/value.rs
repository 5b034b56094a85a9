//! Tagged value tree for open-ended descriptor subtrees.
//!
//! Loader options and unrecognized extension sections are not duck-typed
//! JSON: every node carries its merge policy as a variant, so the deep merge
//! is total. Untyped JSON ingress classifies arrays as replace-lists;
//! append-lists only arise from typed lowering (plugin lists).

use std::fmt;

use indexmap::IndexMap;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MergeError;

/// Ordered open map of extension values.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// Leaf value. `Null` models absence in untyped ingress: a null overlay
/// keeps the base value, and anything overrides a null base.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ScalarValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

/// A config subtree tagged with its merge policy.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Overlay value wins when present.
    Scalar(ScalarValue),
    /// Overlay list replaces the base list wholesale.
    Replace(Vec<ConfigValue>),
    /// Overlay list is appended after the base list.
    Append(Vec<ConfigValue>),
    /// Recursive per-key deep merge.
    Object(ConfigMap),
}

/// Shape of a [`ConfigValue`], reported in conflict errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    ReplaceList,
    AppendList,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Scalar => "a scalar",
            ValueKind::ReplaceList => "a list",
            ValueKind::AppendList => "an append-list",
            ValueKind::Object => "an object",
        };
        f.write_str(name)
    }
}

impl ConfigValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Scalar(_) => ValueKind::Scalar,
            ConfigValue::Replace(_) => ValueKind::ReplaceList,
            ConfigValue::Append(_) => ValueKind::AppendList,
            ConfigValue::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Scalar(ScalarValue::Null))
    }

    pub fn null() -> Self {
        ConfigValue::Scalar(ScalarValue::Null)
    }

    pub fn str(s: impl Into<String>) -> Self {
        ConfigValue::Scalar(ScalarValue::Str(s.into()))
    }

    pub fn int(n: i64) -> Self {
        ConfigValue::Scalar(ScalarValue::Int(n))
    }

    pub fn bool(b: bool) -> Self {
        ConfigValue::Scalar(ScalarValue::Bool(b))
    }
}

/// Merge `overlay` onto `base`, producing a new value. Total over every
/// (base kind, overlay kind) pair: matching kinds follow the kind's policy,
/// null never conflicts, and any other mismatch is a [`MergeError::ShapeConflict`]
/// carrying the dotted field path.
pub fn merge_value(
    base: &ConfigValue,
    overlay: &ConfigValue,
    path: &str,
) -> Result<ConfigValue, MergeError> {
    if overlay.is_null() {
        return Ok(base.clone());
    }
    if base.is_null() {
        return Ok(overlay.clone());
    }

    match (base, overlay) {
        (ConfigValue::Scalar(_), ConfigValue::Scalar(s)) => Ok(ConfigValue::Scalar(s.clone())),
        (ConfigValue::Replace(_), ConfigValue::Replace(items)) => {
            Ok(ConfigValue::Replace(items.clone()))
        }
        (ConfigValue::Append(base_items), ConfigValue::Append(overlay_items)) => {
            let mut items = base_items.clone();
            items.extend(overlay_items.iter().cloned());
            Ok(ConfigValue::Append(items))
        }
        (ConfigValue::Object(base_map), ConfigValue::Object(overlay_map)) => {
            Ok(ConfigValue::Object(merge_map(base_map, overlay_map, path)?))
        }
        (base, overlay) => Err(MergeError::ShapeConflict {
            path: path.to_string(),
            base: base.kind(),
            overlay: overlay.kind(),
        }),
    }
}

/// Per-key deep merge of two maps. Base key order is preserved; keys unique
/// to the overlay are appended in overlay order.
pub fn merge_map(
    base: &ConfigMap,
    overlay: &ConfigMap,
    path: &str,
) -> Result<ConfigMap, MergeError> {
    let mut merged = ConfigMap::with_capacity(base.len() + overlay.len());
    for (key, base_value) in base {
        let child_path = join_path(path, key);
        match overlay.get(key) {
            Some(overlay_value) => {
                merged.insert(key.clone(), merge_value(base_value, overlay_value, &child_path)?);
            }
            None => {
                merged.insert(key.clone(), base_value.clone());
            }
        }
    }
    for (key, overlay_value) in overlay {
        if !base.contains_key(key) {
            merged.insert(key.clone(), overlay_value.clone());
        }
    }
    Ok(merged)
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

impl From<&Value> for ConfigValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ConfigValue::Scalar(ScalarValue::Null),
            Value::Bool(b) => ConfigValue::Scalar(ScalarValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Scalar(ScalarValue::Int(i))
                } else {
                    ConfigValue::Scalar(ScalarValue::Float(n.as_f64().unwrap_or(0.0)))
                }
            }
            Value::String(s) => ConfigValue::Scalar(ScalarValue::Str(s.clone())),
            // Untyped arrays are replaced on merge, never concatenated.
            Value::Array(items) => {
                ConfigValue::Replace(items.iter().map(ConfigValue::from).collect())
            }
            Value::Object(map) => ConfigValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&ConfigValue> for Value {
    fn from(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Scalar(ScalarValue::Null) => Value::Null,
            ConfigValue::Scalar(ScalarValue::Bool(b)) => Value::Bool(*b),
            ConfigValue::Scalar(ScalarValue::Int(i)) => Value::Number((*i).into()),
            ConfigValue::Scalar(ScalarValue::Float(f)) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ConfigValue::Scalar(ScalarValue::Str(s)) => Value::String(s.clone()),
            ConfigValue::Replace(items) | ConfigValue::Append(items) => {
                Value::Array(items.iter().map(Value::from).collect())
            }
            ConfigValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ConfigValue::from(&value))
    }
}
