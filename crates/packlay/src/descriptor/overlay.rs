//! Overlay descriptors: the partial shape a build mode declares.
//!
//! Every field is optional; the merge keeps the base value wherever the
//! overlay is silent. Typed twins of the nested base sections keep the
//! field-by-field merge compiler-checked.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::plugin::PluginSpec;
use super::rules::Rule;
use super::{ChunkMode, Devtool};
use crate::error::{ConfigError, Result};
use crate::value::ConfigMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputOverlay>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleOverlay>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizationOverlay>,

    /// Appended after the base plugin list; never replaces it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<Devtool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerOverlay>,

    #[serde(flatten)]
    pub extra: ConfigMap,
}

impl ConfigOverlay {
    /// Create from `serde_json::Value` (for programmatic overlays).
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "overlay".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to `serde_json::Value`.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "overlay".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
}

/// Overlay rules replace base rules pattern-by-pattern; see `merge`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleOverlay {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<SplitChunksOverlay>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunksOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot: Option<bool>,
}
