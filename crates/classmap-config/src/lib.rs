//! TOML mapping documents for classmap.
//!
//! A document carries optional `[builder]` options and any number of
//! `[[class]]` tables. Each class is replayed through
//! `ClassMetadataBuilder`, so a document and the equivalent chain of
//! builder calls produce the same descriptor.

mod class;
mod error;


pub use class::{ClassConfig, DiscriminatorColumnConfig, FieldConfig, SequenceGeneratorConfig};
pub use error::ConfigError;

use classmap_core::{builder::BuilderOptions, metadata::ClassMetadata};
use serde::Deserialize;
use std::{collections::BTreeSet, fs, path::Path};
use tracing::debug;

///
/// MappingConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MappingConfig {
    pub builder: BuilderOptions,

    #[serde(rename = "class")]
    pub classes: Vec<ClassConfig>,
}

impl MappingConfig {
    /// Parse a mapping document; class names must be unique.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;

        let mut seen = BTreeSet::new();
        for class in &config.classes {
            if !seen.insert(class.name.as_str()) {
                return Err(ConfigError::DuplicateClass(class.name.clone()));
            }
        }

        Ok(config)
    }

    /// Read and parse a mapping document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), classes = config.classes.len(), "mapping document loaded");

        Ok(config)
    }

    #[must_use]
    pub const fn builder_options(&self) -> BuilderOptions {
        self.builder
    }

    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassConfig> {
        self.classes.iter().find(|class| class.name == name)
    }

    /// Build the descriptor for one declared class.
    pub fn build_class(&self, name: &str) -> Result<ClassMetadata, ConfigError> {
        let class = self
            .class(name)
            .ok_or_else(|| ConfigError::UnknownClass(name.to_string()))?;

        class.build(self.builder)
    }

    /// Build descriptors for every class, in document order.
    pub fn build_all(&self) -> Result<Vec<ClassMetadata>, ConfigError> {
        self.classes
            .iter()
            .map(|class| class.build(self.builder))
            .collect()
    }
}
