//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use packlay::Mode;

/// Compose a bundler configuration descriptor and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "packlay", version, about)]
pub struct Cli {
    /// Build mode to compose
    #[arg(value_enum)]
    pub mode: ModeArg,

    /// Project root directory (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Pretty-print the descriptor JSON
    #[arg(long)]
    pub pretty: bool,

    /// Validate that the entry module and HTML template exist before printing
    #[arg(long)]
    pub check: bool,

    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Build mode selector as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Inline styles, verbose source maps, live-reload server
    #[value(name = "development")]
    Development,

    /// Extracted styles, compression, output cleanup, bundle analysis
    #[value(name = "production")]
    Production,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Development => Mode::Development,
            ModeArg::Production => Mode::Production,
        }
    }
}
