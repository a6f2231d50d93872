use thiserror::Error as ThisError;

///
/// MappingError
///
/// Rejections raised by `ClassMetadata` setters.
/// The builder forwards these untouched.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MappingError {
    #[error("class '{class}': field mapping has no field name")]
    MissingFieldName { class: String },

    #[error("class '{class}': column '{column}' is already mapped by '{existing}'")]
    DuplicateColumnName {
        class: String,
        column: String,
        existing: String,
    },

    #[error("class '{class}': field '{field}' of type '{ty}' cannot be used for optimistic locking")]
    UnsupportedOptimisticLockingType {
        class: String,
        field: String,
        ty: String,
    },

    #[error("class '{class}': discriminator column has no name")]
    MissingDiscriminatorColumnName { class: String },

    #[error("class '{class}': discriminator column '{column}' cannot use type '{ty}'")]
    InvalidDiscriminatorColumnType {
        class: String,
        column: String,
        ty: String,
    },
}

impl MappingError {
    /// Class identifier of the descriptor that rejected the input.
    #[must_use]
    pub fn class(&self) -> &str {
        match self {
            Self::MissingFieldName { class }
            | Self::DuplicateColumnName { class, .. }
            | Self::UnsupportedOptimisticLockingType { class, .. }
            | Self::MissingDiscriminatorColumnName { class }
            | Self::InvalidDiscriminatorColumnType { class, .. } => class.as_str(),
        }
    }
}
