//! Packlay composes bundler configuration from a canonical base descriptor
//! and a per-mode overlay.
//!
//! The library owns three things: the typed [`BuildConfig`] descriptor schema,
//! the overlay merge (scalars override, rules replace per pattern, plugins
//! append), and the two shipped modes. The resulting descriptor is pure data;
//! executing the build it describes is the downstream runtime's job.
//!
//! ```
//! use packlay::{compose, Mode, ProjectRoot};
//!
//! let root = ProjectRoot::new("/proj").unwrap();
//! let config = compose(Mode::Development, &root).unwrap();
//! assert_eq!(config.entry, std::path::PathBuf::from("/proj/src/index.js"));
//! ```

pub mod base;
pub mod descriptor;
pub mod error;
pub mod merge;
pub mod modes;
pub mod project;
pub mod validate;
pub mod value;

pub use base::base_config;
pub use descriptor::*;
pub use error::{ConfigError, MergeError, Result};
pub use merge::merge;
pub use modes::{compose, development_overlay, production_overlay, Mode};
pub use project::ProjectRoot;
pub use validate::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
pub use value::{ConfigMap, ConfigValue, ScalarValue, ValueKind};
