//! The overlay merger.
//!
//! Applied only overlay-onto-base, borrowing both inputs and producing a
//! fresh descriptor. Policy per field: scalars overlay-win, rules replace
//! per pattern, plugins append, nested sections merge field-by-field. The
//! overlay struct is destructured exhaustively so a new field cannot be
//! added without deciding its merge policy.

use tracing::debug;

use crate::descriptor::{
    BuildConfig, ConfigOverlay, DevServerConfig, ModuleConfig, Optimization, OutputConfig, Rule,
    SplitChunks,
};
use crate::error::MergeError;
use crate::value::merge_map;

/// Merge `overlay` onto `base`, producing the final descriptor.
///
/// Neither input is mutated. Fails with [`MergeError::DuplicatePlugin`] when
/// the same plugin kind appears on both sides, and with
/// [`MergeError::ShapeConflict`] when an extension field's shape differs
/// between base and overlay; a failed merge produces no partial output.
pub fn merge(base: &BuildConfig, overlay: &ConfigOverlay) -> Result<BuildConfig, MergeError> {
    let ConfigOverlay {
        entry,
        output,
        module,
        optimization,
        plugins,
        devtool,
        dev_server,
        extra,
    } = overlay;

    for plugin in plugins {
        if base.plugins.iter().any(|p| p.kind() == plugin.kind()) {
            return Err(MergeError::DuplicatePlugin {
                name: plugin.kind().to_string(),
            });
        }
    }

    let mut merged_plugins = base.plugins.clone();
    merged_plugins.extend(plugins.iter().cloned());

    let merged = BuildConfig {
        entry: entry.clone().unwrap_or_else(|| base.entry.clone()),
        output: merge_output(&base.output, output.as_ref()),
        module: merge_rules(&base.module, module.as_ref()),
        optimization: merge_optimization(&base.optimization, optimization.as_ref()),
        plugins: merged_plugins,
        devtool: devtool.or(base.devtool),
        dev_server: merge_dev_server(base.dev_server.as_ref(), dev_server.as_ref()),
        extra: merge_map(&base.extra, extra, "")?,
    };

    debug!(
        rules = merged.module.rules.len(),
        plugins = merged.plugins.len(),
        "merged overlay onto base descriptor"
    );
    Ok(merged)
}

fn merge_output(base: &OutputConfig, overlay: Option<&crate::descriptor::OutputOverlay>) -> OutputConfig {
    let Some(overlay) = overlay else {
        return base.clone();
    };
    OutputConfig {
        filename: overlay.filename.clone().unwrap_or_else(|| base.filename.clone()),
        path: overlay.path.clone().unwrap_or_else(|| base.path.clone()),
        public_path: overlay
            .public_path
            .clone()
            .unwrap_or_else(|| base.public_path.clone()),
    }
}

/// An overlay rule whose `test` pattern equals a base rule's replaces that
/// rule in the base rule's position, keeping first-match-wins ordering
/// stable under overlay. Overlay-only patterns are appended in overlay
/// order after the base rules.
fn merge_rules(base: &ModuleConfig, overlay: Option<&crate::descriptor::ModuleOverlay>) -> ModuleConfig {
    let Some(overlay) = overlay else {
        return base.clone();
    };

    let mut rules: Vec<Rule> = base
        .rules
        .iter()
        .map(|base_rule| {
            overlay
                .rules
                .iter()
                .find(|r| r.test == base_rule.test)
                .unwrap_or(base_rule)
                .clone()
        })
        .collect();

    for overlay_rule in &overlay.rules {
        if !base.rules.iter().any(|r| r.test == overlay_rule.test) {
            rules.push(overlay_rule.clone());
        }
    }

    ModuleConfig { rules }
}

fn merge_optimization(
    base: &Optimization,
    overlay: Option<&crate::descriptor::OptimizationOverlay>,
) -> Optimization {
    let Some(overlay) = overlay else {
        return base.clone();
    };
    let split_chunks = match (&base.split_chunks, &overlay.split_chunks) {
        (Some(base_sc), Some(overlay_sc)) => Some(SplitChunks {
            chunks: overlay_sc.chunks.unwrap_or(base_sc.chunks),
            name: overlay_sc.name.clone().unwrap_or_else(|| base_sc.name.clone()),
            filename: overlay_sc
                .filename
                .clone()
                .unwrap_or_else(|| base_sc.filename.clone()),
        }),
        // No base policy to fill the gaps: overlay fields over defaults.
        (None, Some(overlay_sc)) => Some(SplitChunks {
            chunks: overlay_sc.chunks.unwrap_or(crate::descriptor::ChunkMode::All),
            name: overlay_sc.name.clone().unwrap_or_default(),
            filename: overlay_sc.filename.clone().unwrap_or_default(),
        }),
        (base_sc, None) => base_sc.clone(),
    };
    Optimization { split_chunks }
}

fn merge_dev_server(
    base: Option<&DevServerConfig>,
    overlay: Option<&crate::descriptor::DevServerOverlay>,
) -> Option<DevServerConfig> {
    match (base, overlay) {
        (_, None) => base.cloned(),
        (None, Some(overlay)) => {
            let defaults = DevServerConfig::default();
            Some(DevServerConfig {
                host: overlay.host.clone().unwrap_or(defaults.host),
                public_path: overlay.public_path.clone().unwrap_or(defaults.public_path),
                hot: overlay.hot.unwrap_or(defaults.hot),
            })
        }
        (Some(base), Some(overlay)) => Some(DevServerConfig {
            host: overlay.host.clone().unwrap_or_else(|| base.host.clone()),
            public_path: overlay
                .public_path
                .clone()
                .unwrap_or_else(|| base.public_path.clone()),
            hot: overlay.hot.unwrap_or(base.hot),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DevServerOverlay, Devtool, ModuleOverlay, PluginSpec};
    use std::path::PathBuf;

    fn minimal_base() -> BuildConfig {
        BuildConfig {
            entry: PathBuf::from("/proj/src/index.js"),
            output: OutputConfig {
                filename: "index.js".to_string(),
                path: PathBuf::from("/proj/dist"),
                public_path: "./".to_string(),
            },
            module: ModuleConfig::default(),
            optimization: Optimization::default(),
            plugins: vec![PluginSpec::Progress],
            devtool: None,
            dev_server: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn empty_overlay_is_identity() {
        let base = minimal_base();
        let merged = merge(&base, &ConfigOverlay::default()).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn duplicate_plugin_kind_is_rejected() {
        let base = minimal_base();
        let overlay = ConfigOverlay {
            plugins: vec![PluginSpec::Progress],
            ..Default::default()
        };
        let err = merge(&base, &overlay).unwrap_err();
        assert_eq!(
            err,
            MergeError::DuplicatePlugin {
                name: "progress".to_string()
            }
        );
    }

    #[test]
    fn dev_server_created_from_overlay_alone() {
        let base = minimal_base();
        let overlay = ConfigOverlay {
            dev_server: Some(DevServerOverlay {
                host: Some("0.0.0.0".to_string()),
                public_path: None,
                hot: Some(true),
            }),
            ..Default::default()
        };
        let merged = merge(&base, &overlay).unwrap();
        let dev_server = merged.dev_server.unwrap();
        assert_eq!(dev_server.host, "0.0.0.0");
        assert_eq!(dev_server.public_path, "/");
        assert!(dev_server.hot);
    }

    #[test]
    fn overlay_only_rule_appends_after_base_rules() {
        let mut base = minimal_base();
        base.module.rules = vec![Rule::new(r"\.js$", vec!["babel-loader".into()])];
        let overlay = ConfigOverlay {
            module: Some(ModuleOverlay {
                rules: vec![Rule::new(r"\.(sc|c)ss$", vec!["style-loader".into()])],
            }),
            devtool: Some(Devtool::InlineSourceMap),
            ..Default::default()
        };
        let merged = merge(&base, &overlay).unwrap();
        assert_eq!(merged.module.rules.len(), 2);
        assert_eq!(merged.module.rules[0].test.source(), r"\.js$");
        assert_eq!(merged.module.rules[1].test.source(), r"\.(sc|c)ss$");
    }
}
