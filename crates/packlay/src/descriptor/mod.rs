//! The Build Configuration Descriptor.
//!
//! `BuildConfig` is the single pure-data object the downstream bundler
//! runtime consumes: built once per invocation, never mutated after the
//! merge, discarded after the run. Field names serialize in the runtime's
//! camelCase wire shape.

mod overlay;
mod plugin;
mod rules;

pub use overlay::{
    ConfigOverlay, DevServerOverlay, ModuleOverlay, OptimizationOverlay, OutputOverlay,
    SplitChunksOverlay,
};
pub use plugin::{CompressionAlgorithm, CompressionOptions, PluginSpec};
pub use rules::{FilePattern, ModuleConfig, Rule, TransformStep};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::value::ConfigMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Source module the build starts from, resolved against the project root.
    pub entry: PathBuf,

    pub output: OutputConfig,

    #[serde(default)]
    pub module: ModuleConfig,

    #[serde(default, skip_serializing_if = "Optimization::is_empty")]
    pub optimization: Optimization,

    #[serde(default)]
    pub plugins: Vec<PluginSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<Devtool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,

    /// Unrecognized extension sections, deep-merged by the tagged value tree.
    #[serde(flatten)]
    pub extra: ConfigMap,
}

impl BuildConfig {
    /// Create from `serde_json::Value` (for programmatic descriptors).
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to `serde_json::Value`.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Bundle naming pattern with `[name]`/`[hash]`/`[ext]` placeholders.
    pub filename: String,

    /// Absolute destination directory.
    pub path: PathBuf,

    /// Runtime base path for asset references.
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

fn default_public_path() -> String {
    "/".to_string()
}

/// Bundle-splitting policy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<SplitChunks>,
}

impl Optimization {
    pub fn is_empty(&self) -> bool {
        self.split_chunks.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunks {
    pub chunks: ChunkMode,
    pub name: String,
    pub filename: String,
}

/// Which chunks participate in splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkMode {
    All,
    Async,
    Initial,
}

/// Source-map flavor. A scalar on merge: the overlay value wins outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Devtool {
    SourceMap,
    InlineSourceMap,
    EvalSourceMap,
    HiddenSourceMap,
}

/// Live-reload dev-server declaration. The server itself is hosted by the
/// runtime; this only describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_public_path")]
    pub public_path: String,

    #[serde(default)]
    pub hot: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            public_path: default_public_path(),
            hot: false,
        }
    }
}
