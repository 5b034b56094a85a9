//! The base configuration builder.
//!
//! Produces the descriptor fields shared by every build mode: entry, output
//! naming, the script/markup/image rules, chunk splitting, and the
//! enrichment plugins both modes carry. Style handling is deliberately
//! absent; each mode overlay declares its own chain.

use tracing::debug;

use crate::descriptor::{
    BuildConfig, ChunkMode, ModuleConfig, Optimization, OutputConfig, PluginSpec, Rule,
    SplitChunks, TransformStep,
};
use crate::error::Result;
use crate::project::ProjectRoot;
use crate::value::{ConfigMap, ConfigValue};

/// Build the canonical base descriptor for `root`. Pure: no filesystem
/// access, no ambient state.
pub fn base_config(root: &ProjectRoot) -> Result<BuildConfig> {
    debug!(root = %root.path().display(), "building base descriptor");

    let config = BuildConfig {
        entry: root.resolve("src/index.js"),
        output: OutputConfig {
            filename: "static/js/index.[hash].js".to_string(),
            path: root.resolve("dist"),
            public_path: "./".to_string(),
        },
        module: ModuleConfig {
            rules: vec![script_rule(), markup_rule(), image_rule()],
        },
        optimization: Optimization {
            split_chunks: Some(SplitChunks {
                chunks: ChunkMode::All,
                name: "commons".to_string(),
                filename: "static/js/[name].[hash].js".to_string(),
            }),
        },
        plugins: vec![
            PluginSpec::Progress,
            PluginSpec::HtmlTemplate {
                template: "index.html".to_string(),
            },
        ],
        devtool: None,
        dev_server: None,
        extra: ConfigMap::new(),
    };

    Ok(config)
}

fn script_rule() -> Rule {
    Rule::new(r"\.js$", vec!["babel-loader".into()]).with_exclude("/node_modules")
}

fn markup_rule() -> Rule {
    Rule::new(r"\.html$", vec!["html-loader".into()])
}

fn image_rule() -> Rule {
    let mut options = ConfigMap::new();
    options.insert("limit".to_string(), ConfigValue::int(8192));
    options.insert("name".to_string(), ConfigValue::str("[name].[hash].[ext]"));
    options.insert("outputPath".to_string(), ConfigValue::str("static/images"));
    options.insert("fallback".to_string(), ConfigValue::str("file-loader"));

    Rule::new(
        r"\.(png|jpg|gif)$",
        vec![TransformStep::with_options("url-loader", options)],
    )
}
