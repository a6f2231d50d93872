use classmap_core::error::MappingError;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read mapping file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("class '{0}' is declared more than once")]
    DuplicateClass(String),

    #[error("class '{0}' is not declared")]
    UnknownClass(String),

    #[error("mapping for class '{class}' rejected: {source}")]
    Mapping {
        class: String,
        #[source]
        source: MappingError,
    },
}
