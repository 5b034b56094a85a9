//! Plugin declarations.
//!
//! Plugins are declared as data and executed by the downstream runtime; the
//! closed enum keeps the merge total and lets duplicate detection work on
//! the plugin kind rather than on instance options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::rules::FilePattern;

/// One enrichment stage run during the build, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum PluginSpec {
    /// Build progress reporting.
    Progress,

    /// HTML templating: emits an HTML page referencing the bundles.
    HtmlTemplate { template: String },

    /// Hot-module replacement capability (development only).
    HotReload,

    /// Output compression (production only).
    Compression(CompressionOptions),

    /// CSS extraction into standalone stylesheets (production only).
    CssExtract { filename: String },

    /// Pre-build cleanup of the output directory (production only).
    CleanOutput {
        path: PathBuf,
        #[serde(default)]
        allow_external: bool,
    },

    /// Bundle-composition visualization (production only).
    BundleAnalyzer,
}

impl PluginSpec {
    /// Stable kind name, used for duplicate detection and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PluginSpec::Progress => "progress",
            PluginSpec::HtmlTemplate { .. } => "html-template",
            PluginSpec::HotReload => "hot-reload",
            PluginSpec::Compression(_) => "compression",
            PluginSpec::CssExtract { .. } => "css-extract",
            PluginSpec::CleanOutput { .. } => "clean-output",
            PluginSpec::BundleAnalyzer => "bundle-analyzer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionOptions {
    /// Assets to compress, by file pattern.
    pub test: Vec<FilePattern>,

    /// Naming template for the compressed artifact.
    pub asset: String,

    pub algorithm: CompressionAlgorithm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    Gzip,
    Brotli,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plugin_serializes_with_kind_tag() {
        let plugin = PluginSpec::HtmlTemplate {
            template: "index.html".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&plugin).unwrap(),
            json!({"plugin": "html-template", "template": "index.html"})
        );
    }

    #[test]
    fn kind_ignores_options() {
        let a = PluginSpec::CssExtract {
            filename: "a.css".to_string(),
        };
        let b = PluginSpec::CssExtract {
            filename: "b.css".to_string(),
        };
        assert_eq!(a.kind(), b.kind());
        assert_ne!(a, b);
    }
}
