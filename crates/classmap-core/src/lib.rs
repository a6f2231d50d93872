//! Core mapping model for classmap: the per-class metadata descriptor, its
//! field/table/discriminator records, and the fluent builder that fills it.
#![warn(unreachable_pub)]

pub mod builder;
pub mod error;
pub mod metadata;
pub mod types;

///
/// CONSTANTS
///

/// Column length assigned to a discriminator column declared without one.
pub const DEFAULT_DISCRIMINATOR_LENGTH: u32 = 255;

/// Column type assigned to a discriminator column declared without one.
pub const DEFAULT_DISCRIMINATOR_TYPE: &str = "string";

/// Mapping type assigned to a field declared without one.
pub const DEFAULT_FIELD_TYPE: &str = "string";

///
/// Prelude
///
/// Domain vocabulary only; errors stay behind their module path.
///

pub mod prelude {
    pub use crate::{
        builder::{BuilderOptions, ClassMetadataBuilder, DiscriminatorMapMode},
        metadata::{
            ClassMetadata, DiscriminatorColumn, FieldMapping, FieldOptions, OptionValue,
            SequenceGeneratorDefinition, TableDefinition,
        },
        types::{ChangeTrackingPolicy, InheritanceType},
    };
}
