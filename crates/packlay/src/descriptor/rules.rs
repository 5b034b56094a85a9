//! Module rules: (file pattern → transform chain) mappings.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::value::ConfigMap;

/// Regular-expression file pattern, compared by source text. The compiled
/// regex is cached on first use and never serialized.
#[derive(Default)]
pub struct FilePattern {
    source: String,
    compiled: OnceLock<Regex>,
}

impl FilePattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Compile (or fetch the cached) regex.
    pub fn regex(&self) -> Result<&Regex> {
        if let Some(re) = self.compiled.get() {
            return Ok(re);
        }
        let re = Regex::new(&self.source).map_err(|e| ConfigError::InvalidPattern {
            pattern: self.source.clone(),
            message: e.to_string(),
        })?;
        Ok(self.compiled.get_or_init(|| re))
    }

    pub fn matches(&self, path: &str) -> Result<bool> {
        Ok(self.regex()?.is_match(path))
    }
}

impl Clone for FilePattern {
    fn clone(&self) -> Self {
        FilePattern::new(self.source.clone())
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for FilePattern {}

impl fmt::Debug for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilePattern").field(&self.source).finish()
    }
}

impl From<&str> for FilePattern {
    fn from(source: &str) -> Self {
        FilePattern::new(source)
    }
}

impl Serialize for FilePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for FilePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Ok(FilePattern::new(source))
    }
}

/// One step of a transform chain: a loader name plus its options.
///
/// Serialized as a bare string when it has no options, matching the wire
/// shape bundler runtimes expect (`"babel-loader"` vs `{loader, options}`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformStep {
    pub loader: String,
    pub options: ConfigMap,
}

impl TransformStep {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: ConfigMap::new(),
        }
    }

    pub fn with_options(loader: impl Into<String>, options: ConfigMap) -> Self {
        Self {
            loader: loader.into(),
            options,
        }
    }
}

impl From<&str> for TransformStep {
    fn from(loader: &str) -> Self {
        TransformStep::new(loader)
    }
}

impl Serialize for TransformStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.options.is_empty() {
            serializer.serialize_str(&self.loader)
        } else {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry("loader", &self.loader)?;
            map.serialize_entry("options", &self.options)?;
            map.end()
        }
    }
}

impl<'de> Deserialize<'de> for TransformStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(String),
            Full {
                loader: String,
                #[serde(default)]
                options: ConfigMap,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Bare(loader) => Ok(TransformStep::new(loader)),
            Repr::Full { loader, options } => {
                if loader.is_empty() {
                    return Err(de::Error::custom("transform step loader cannot be empty"));
                }
                Ok(TransformStep { loader, options })
            }
        }
    }
}

/// A module rule: files matching `test` (and not `exclude`) run through the
/// transform chain in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub test: FilePattern,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<FilePattern>,

    #[serde(rename = "use")]
    pub chain: Vec<TransformStep>,
}

impl Rule {
    pub fn new(test: impl Into<FilePattern>, chain: Vec<TransformStep>) -> Self {
        Self {
            test: test.into(),
            exclude: None,
            chain,
        }
    }

    pub fn with_exclude(mut self, exclude: impl Into<FilePattern>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    /// Whether this rule applies to `path`.
    pub fn applies_to(&self, path: &str) -> Result<bool> {
        if !self.test.matches(path)? {
            return Ok(false);
        }
        if let Some(exclude) = &self.exclude {
            if exclude.matches(path)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Ordered rule list. Matching is first-match-wins per file; later rules for
/// the same file are shadowed even when their patterns overlap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl ModuleConfig {
    /// First rule whose pattern matches `path`.
    pub fn first_match(&self, path: &str) -> Result<Option<&Rule>> {
        for rule in &self.rules {
            if rule.applies_to(path)? {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }
}
