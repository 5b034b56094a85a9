//! Packlay CLI library: argument parsing and logging setup.

pub mod cli;
pub mod logger;
