//! Packlay CLI entry point.
//!
//! Composes the descriptor for the requested mode and prints it as JSON on
//! stdout for the downstream build-tool runtime. Logs go to stderr so the
//! descriptor stream stays clean.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use packlay::{compose, validate_fs, ProjectRoot};
use packlay_cli::{cli, logger};
use tracing::debug;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let root = resolve_root(args.root)?;
    debug!(root = %root.path().display(), mode = %packlay::Mode::from(args.mode), "composing descriptor");

    let config = compose(args.mode.into(), &root).context("failed to compose build configuration")?;

    if args.check {
        validate_fs(&config, root.path()).context("configuration check failed")?;
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_json::to_string(&config)?
    };
    println!("{json}");

    Ok(())
}

fn resolve_root(root: Option<PathBuf>) -> Result<ProjectRoot> {
    let root = match root {
        Some(path) if path.is_relative() => {
            ProjectRoot::new(std::env::current_dir()?.join(path))?
        }
        Some(path) => ProjectRoot::new(path)?,
        None => ProjectRoot::from_env()?,
    };
    Ok(root)
}
