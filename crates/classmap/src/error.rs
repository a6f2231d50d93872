use classmap_config::ConfigError;
use classmap_core::error::MappingError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn display_with_kind(&self) -> String {
        format!("{}:{}: {}", self.origin, self.kind, self.message)
    }
}

impl From<MappingError> for Error {
    fn from(err: MappingError) -> Self {
        let kind = match err {
            MappingError::MissingFieldName { .. }
            | MappingError::MissingDiscriminatorColumnName { .. } => ErrorKind::Missing,
            MappingError::DuplicateColumnName { .. } => ErrorKind::Conflict,
            MappingError::UnsupportedOptimisticLockingType { .. }
            | MappingError::InvalidDiscriminatorColumnType { .. } => ErrorKind::Unsupported,
        };

        Self::new(kind, ErrorOrigin::Metadata, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Mapping { source, .. } => {
                let mut mapped = Self::from(source);
                mapped.origin = ErrorOrigin::Config;
                mapped
            }
            ConfigError::Io { .. } => Self::new(ErrorKind::Io, ErrorOrigin::Config, err.to_string()),
            ConfigError::Parse(_) => {
                Self::new(ErrorKind::Invalid, ErrorOrigin::Config, err.to_string())
            }
            ConfigError::DuplicateClass(_) => {
                Self::new(ErrorKind::Conflict, ErrorOrigin::Config, err.to_string())
            }
            ConfigError::UnknownClass(_) => {
                Self::new(ErrorKind::NotFound, ErrorOrigin::Config, err.to_string())
            }
        }
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorKind {
    #[display("conflict")]
    Conflict,
    #[display("invalid")]
    Invalid,
    #[display("io")]
    Io,
    #[display("missing")]
    Missing,
    #[display("not_found")]
    NotFound,
    #[display("unsupported")]
    Unsupported,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    #[display("metadata")]
    Metadata,
    #[display("config")]
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_error_keeps_message_and_classifies() {
        let err = Error::from(MappingError::DuplicateColumnName {
            class: "A".to_string(),
            column: "name".to_string(),
            existing: "title".to_string(),
        });

        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.origin, ErrorOrigin::Metadata);
        assert_eq!(
            err.display_with_kind(),
            "metadata:conflict: class 'A': column 'name' is already mapped by 'title'"
        );
    }

    #[test]
    fn config_mapping_error_is_attributed_to_config() {
        let err = Error::from(ConfigError::Mapping {
            class: "A".to_string(),
            source: MappingError::MissingFieldName {
                class: "A".to_string(),
            },
        });

        assert_eq!(err.kind, ErrorKind::Missing);
        assert_eq!(err.origin, ErrorOrigin::Config);
    }

    #[test]
    fn unknown_class_is_not_found() {
        let err = Error::from(ConfigError::UnknownClass("A".to_string()));

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.to_string(), "class 'A' is not declared");
    }
}
