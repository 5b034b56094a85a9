//! Build modes and their overlays.
//!
//! Exactly one mode is selected per invocation. The development overlay
//! keeps styles inline and declares the live-reload server; the production
//! overlay extracts styles, compresses output, cleans the output directory,
//! and attaches the bundle analyzer.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::base::base_config;
use crate::descriptor::{
    BuildConfig, CompressionAlgorithm, CompressionOptions, ConfigOverlay, DevServerOverlay,
    Devtool, ModuleOverlay, PluginSpec, Rule,
};
use crate::error::{ConfigError, Result};
use crate::merge::merge;
use crate::project::ProjectRoot;
use crate::validate::validate_schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" => Ok(Mode::Development),
            "production" => Ok(Mode::Production),
            other => Err(ConfigError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}

const STYLE_PATTERN: &str = r"\.(sc|c)ss$";

/// Development overrides: inline styles, verbose source maps, hot reload.
pub fn development_overlay() -> ConfigOverlay {
    ConfigOverlay {
        module: Some(ModuleOverlay {
            rules: vec![Rule::new(
                STYLE_PATTERN,
                vec![
                    "style-loader".into(),
                    "css-loader".into(),
                    "sass-loader".into(),
                ],
            )],
        }),
        devtool: Some(Devtool::InlineSourceMap),
        dev_server: Some(DevServerOverlay {
            host: Some("0.0.0.0".to_string()),
            public_path: Some("/".to_string()),
            hot: Some(true),
        }),
        plugins: vec![PluginSpec::HotReload],
        ..Default::default()
    }
}

/// Production overrides: extracted styles, gzip compression, output cleanup,
/// bundle analysis.
pub fn production_overlay(root: &ProjectRoot) -> ConfigOverlay {
    ConfigOverlay {
        module: Some(ModuleOverlay {
            rules: vec![Rule::new(
                STYLE_PATTERN,
                vec![
                    "css-extract-loader".into(),
                    "css-loader".into(),
                    "sass-loader".into(),
                ],
            )],
        }),
        plugins: vec![
            PluginSpec::Compression(CompressionOptions {
                test: vec![r"\.js$".into(), r"\.css$".into()],
                asset: "[path].gz".to_string(),
                algorithm: CompressionAlgorithm::Gzip,
            }),
            PluginSpec::CssExtract {
                filename: "static/css/main.[hash].css".to_string(),
            },
            PluginSpec::CleanOutput {
                path: root.resolve("dist"),
                allow_external: true,
            },
            PluginSpec::BundleAnalyzer,
        ],
        ..Default::default()
    }
}

/// Compose the final descriptor for `mode`: base, then the mode overlay,
/// then schema validation. Single-shot and stateless; a malformed result
/// never reaches the caller.
pub fn compose(mode: Mode, root: &ProjectRoot) -> Result<BuildConfig> {
    debug!(%mode, "composing build descriptor");

    let base = base_config(root)?;
    let overlay = match mode {
        Mode::Development => development_overlay(),
        Mode::Production => production_overlay(root),
    };

    let config = merge(&base, &overlay)?;
    validate_schema(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_strings() {
        assert_eq!("development".parse::<Mode>().unwrap(), Mode::Development);
        assert_eq!("production".parse::<Mode>().unwrap(), Mode::Production);
        assert_eq!(Mode::Production.to_string(), "production");
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "staging".parse::<Mode>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode { mode } if mode == "staging"));
    }

    #[test]
    fn development_overlay_keeps_styles_inline() {
        let overlay = development_overlay();
        let rules = &overlay.module.as_ref().unwrap().rules;
        assert_eq!(rules[0].chain[0].loader, "style-loader");
        assert_eq!(overlay.devtool, Some(Devtool::InlineSourceMap));
    }

    #[test]
    fn production_overlay_extracts_styles() {
        let root = ProjectRoot::new("/proj").unwrap();
        let overlay = production_overlay(&root);
        let rules = &overlay.module.as_ref().unwrap().rules;
        assert_eq!(rules[0].chain[0].loader, "css-extract-loader");
        assert!(overlay.dev_server.is_none());
    }
}
