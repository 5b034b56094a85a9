//! Error types for descriptor construction, validation, and merging.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::ValueKind;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fatal configuration errors: a descriptor that raises one never reaches
/// the build-execution phase.
#[derive(Debug, Error)]
pub enum ConfigError {
    // Project-root resolution
    #[error("project root must be an absolute path, got: {path}")]
    RootNotAbsolute { path: PathBuf },

    #[error("project root path is empty")]
    EmptyRoot,

    // Mode selection
    #[error("unknown build mode: {mode} (expected \"development\" or \"production\")")]
    UnknownMode { mode: String },

    // Schema validation (no filesystem checks)
    #[error("required field is missing or empty: {field}")]
    MissingField { field: String },

    #[error("invalid file pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("duplicate rule pattern: {pattern}")]
    DuplicateRule { pattern: String },

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // Filesystem validation (for CLI use)
    #[error("entry path not found: {path}")]
    EntryNotFound { path: PathBuf },

    #[error("HTML template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    // Untyped ingress/egress
    #[error("invalid config value for {field}")]
    InvalidValue {
        field: String,
        hint: Option<String>,
    },

    // Overlay merging
    #[error(transparent)]
    Merge(#[from] MergeError),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conflicts raised by the overlay merge. A failed merge produces no
/// partial descriptor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("incompatible shapes at `{path}`: base is {base}, overlay is {overlay}")]
    ShapeConflict {
        path: String,
        base: ValueKind,
        overlay: ValueKind,
    },

    #[error("plugin `{name}` is declared by both base and overlay")]
    DuplicatePlugin { name: String },
}
