//! Logging setup using the `tracing` ecosystem.
//!
//! Verbosity resolution order: `--verbose` (debug for packlay crates),
//! `--quiet` (errors only), the `RUST_LOG` environment variable, then info.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("packlay=debug,packlay_cli=debug")
    } else if quiet {
        EnvFilter::new("packlay=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("packlay=info,packlay_cli=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_filters_parse() {
        let _verbose = EnvFilter::new("packlay=debug,packlay_cli=debug");
        let _quiet = EnvFilter::new("packlay=error");
    }
}
