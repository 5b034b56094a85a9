//! Pluggable descriptor validation strategies.
//!
//! Schema validation checks the descriptor's own invariants and touches no
//! filesystem; the filesystem validator additionally checks that declared
//! files exist under the project root (for CLI use).

use std::path::Path;

use crate::descriptor::{BuildConfig, PluginSpec};
use crate::error::{ConfigError, Result};

/// Trait for pluggable descriptor validation strategies.
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks).
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        if config.entry.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
            });
        }
        if config.output.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "output.path".to_string(),
            });
        }
        if config.output.filename.is_empty() {
            return Err(ConfigError::MissingField {
                field: "output.filename".to_string(),
            });
        }

        // Every pattern must compile; duplicate test patterns would make the
        // later rule unreachable under first-match-wins.
        let mut seen = Vec::with_capacity(config.module.rules.len());
        for rule in &config.module.rules {
            rule.test.regex()?;
            if let Some(exclude) = &rule.exclude {
                exclude.regex()?;
            }
            if rule.chain.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("rule `{}` has an empty transform chain", rule.test.source()),
                    hint: Some("List at least one loader in `use`".to_string()),
                });
            }
            if seen.contains(&rule.test.source()) {
                return Err(ConfigError::DuplicateRule {
                    pattern: rule.test.source().to_string(),
                });
            }
            seen.push(rule.test.source());
        }

        // No duplicate plugin side effects in the final descriptor.
        let mut kinds = Vec::with_capacity(config.plugins.len());
        for plugin in &config.plugins {
            if kinds.contains(&plugin.kind()) {
                return Err(ConfigError::SchemaValidation {
                    message: format!("plugin `{}` is declared more than once", plugin.kind()),
                    hint: Some("Each plugin kind may appear at most once".to_string()),
                });
            }
            if let PluginSpec::Compression(options) = plugin {
                for pattern in &options.test {
                    pattern.regex()?;
                }
            }
            kinds.push(plugin.kind());
        }

        if let Some(dev_server) = &config.dev_server {
            if dev_server.host.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "devServer.host".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use). Runs schema validation first, then
/// checks that the entry module and any declared HTML template exist.
pub struct FsValidator {
    root: std::path::PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let entry = if config.entry.is_absolute() {
            config.entry.clone()
        } else {
            self.root.join(&config.entry)
        };
        if !entry.exists() {
            return Err(ConfigError::EntryNotFound { path: entry });
        }

        for plugin in &config.plugins {
            if let PluginSpec::HtmlTemplate { template } = plugin {
                let path = self.root.join(template);
                if !path.exists() {
                    return Err(ConfigError::TemplateNotFound { path });
                }
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation.
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation.
pub fn validate_fs(config: &BuildConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::base_config;
    use crate::descriptor::Rule;
    use crate::project::ProjectRoot;

    fn valid_config() -> BuildConfig {
        base_config(&ProjectRoot::new("/proj").unwrap()).unwrap()
    }

    #[test]
    fn schema_validator_accepts_base_config() {
        assert!(SchemaValidator.validate(&valid_config()).is_ok());
    }

    #[test]
    fn schema_validator_rejects_empty_filename() {
        let mut config = valid_config();
        config.output.filename.clear();
        let err = SchemaValidator.validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field } if field == "output.filename"));
    }

    #[test]
    fn schema_validator_rejects_invalid_pattern() {
        let mut config = valid_config();
        config.module.rules.push(Rule::new(r"\.((css$", vec!["css-loader".into()]));
        let err = SchemaValidator.validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn schema_validator_rejects_duplicate_rule_pattern() {
        let mut config = valid_config();
        config.module.rules.push(Rule::new(r"\.js$", vec!["swc-loader".into()]));
        let err = SchemaValidator.validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRule { pattern } if pattern == r"\.js$"));
    }

    #[test]
    fn schema_validator_rejects_empty_chain() {
        let mut config = valid_config();
        config.module.rules.push(Rule::new(r"\.svg$", Vec::new()));
        let err = SchemaValidator.validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaValidation { .. }));
    }

    #[test]
    fn schema_validator_rejects_repeated_plugin_kind() {
        let mut config = valid_config();
        config.plugins.push(PluginSpec::Progress);
        let err = SchemaValidator.validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaValidation { .. }));
    }
}
