use crate::ConfigError;
use classmap_core::{
    builder::{BuilderOptions, ClassMetadataBuilder},
    error::MappingError,
    metadata::{ClassMetadata, FieldOptions, OptionValue, SequenceGeneratorDefinition},
    types::{ChangeTrackingPolicy, InheritanceType},
};
use serde::Deserialize;
use std::collections::BTreeMap;

///
/// ClassConfig
///
/// One `[[class]]` table of a mapping document.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClassConfig {
    pub name: String,

    #[serde(default)]
    pub table: Option<String>,

    #[serde(default)]
    pub mapped_superclass: Option<bool>,

    #[serde(default)]
    pub inheritance: Option<InheritanceType>,

    #[serde(default)]
    pub change_tracking: Option<ChangeTrackingPolicy>,

    #[serde(default)]
    pub indexes: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub unique_constraints: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub discriminator_column: Option<DiscriminatorColumnConfig>,

    #[serde(default)]
    pub discriminator_map: BTreeMap<String, String>,

    #[serde(default, rename = "field")]
    pub fields: Vec<FieldConfig>,

    #[serde(default)]
    pub sequence_generator: Option<SequenceGeneratorConfig>,
}

///
/// DiscriminatorColumnConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DiscriminatorColumnConfig {
    pub name: String,

    #[serde(default, rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub length: u32,
}

///
/// FieldConfig
///
/// A `[[class.field]]` entry. `primary` and `version` pick the builder
/// call; the remaining keys become the call's `FieldOptions`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,

    #[serde(default, rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub primary: bool,

    #[serde(default)]
    pub version: bool,

    #[serde(default)]
    pub column_name: Option<String>,

    #[serde(default)]
    pub length: Option<u32>,

    #[serde(default)]
    pub precision: Option<u32>,

    #[serde(default)]
    pub scale: Option<u32>,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub column_definition: Option<String>,

    #[serde(default)]
    pub id: Option<bool>,

    #[serde(default)]
    pub default: Option<OptionValue>,

    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

///
/// SequenceGeneratorConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SequenceGeneratorConfig {
    pub name: String,

    #[serde(default = "default_allocation_size")]
    pub allocation_size: u32,

    #[serde(default = "default_initial_value")]
    pub initial_value: i64,
}

const fn default_allocation_size() -> u32 {
    SequenceGeneratorDefinition::DEFAULT_ALLOCATION_SIZE
}

const fn default_initial_value() -> i64 {
    SequenceGeneratorDefinition::DEFAULT_INITIAL_VALUE
}

impl ClassConfig {
    /// Build a fresh descriptor for this class.
    pub fn build(&self, options: BuilderOptions) -> Result<ClassMetadata, ConfigError> {
        let mut metadata = ClassMetadata::new(self.name.as_str());
        self.apply(&mut metadata, options)?;

        Ok(metadata)
    }

    /// Replay this class table onto an existing descriptor through the builder.
    pub fn apply(
        &self,
        metadata: &mut ClassMetadata,
        options: BuilderOptions,
    ) -> Result<(), ConfigError> {
        let mut builder = ClassMetadataBuilder::with_options(metadata, options);

        self.drive(&mut builder)
            .map_err(|source| ConfigError::Mapping {
                class: self.name.clone(),
                source,
            })
    }

    // drive
    // structure first, then discriminator, fields and the sequence
    fn drive(&self, builder: &mut ClassMetadataBuilder<'_>) -> Result<(), MappingError> {
        if let Some(mapped_superclass) = self.mapped_superclass {
            builder.set_mapped_superclass(mapped_superclass);
        }

        if let Some(table) = &self.table {
            builder.table(table.as_str());
        }
        for (name, columns) in &self.indexes {
            builder.table_index(name.as_str(), columns.iter().cloned());
        }
        for (name, columns) in &self.unique_constraints {
            builder.table_unique_constraint(name.as_str(), columns.iter().cloned());
        }

        if let Some(inheritance) = self.inheritance {
            match inheritance {
                InheritanceType::None => builder.no_inheritance(),
                InheritanceType::SingleTable => builder.single_table_inheritance(),
                InheritanceType::Joined => builder.joined_table_inheritance(),
                InheritanceType::TablePerClass => builder.table_per_class_inheritance(),
            };
        }

        if let Some(policy) = self.change_tracking {
            match policy {
                ChangeTrackingPolicy::DeferredExplicit => {
                    builder.change_tracking_policy_deferred_explicit()
                }
                ChangeTrackingPolicy::DeferredImplicit => {
                    builder.change_tracking_policy_deferred_implicit()
                }
                ChangeTrackingPolicy::Notify => builder.change_tracking_policy_notify(),
            };
        }

        if let Some(column) = &self.discriminator_column {
            builder.discriminator_column(column.name.as_str(), column.ty.as_str(), column.length)?;
        }
        for (value, class) in &self.discriminator_map {
            builder.discriminator_map(value.as_str(), class.as_str());
        }

        for field in &self.fields {
            field.drive(builder)?;
        }

        if let Some(sequence) = &self.sequence_generator {
            builder.sequence_generator(
                sequence.name.as_str(),
                sequence.allocation_size,
                sequence.initial_value,
            );
        }

        Ok(())
    }
}

impl FieldConfig {
    /// The option keys of this entry, as passed to the builder.
    #[must_use]
    pub fn field_options(&self) -> FieldOptions {
        FieldOptions {
            column_name: self.column_name.clone(),
            length: self.length,
            precision: self.precision,
            scale: self.scale,
            nullable: self.nullable,
            unique: self.unique,
            column_definition: self.column_definition.clone(),
            id: self.id,
            default: self.default.clone(),
            options: self.options.clone(),
        }
    }

    fn drive(&self, builder: &mut ClassMetadataBuilder<'_>) -> Result<(), MappingError> {
        let name = self.name.as_str();
        let ty = self.ty.as_str();
        let mut options = self.field_options();

        if self.version {
            // a primary version column keeps its place in the identifier
            if self.primary && options.id.is_none() {
                options.id = Some(true);
            }
            builder.version_field(name, ty, options)?;
        } else if self.primary {
            builder.primary_field(name, ty, options)?;
        } else {
            builder.field(name, ty, options)?;
        }

        Ok(())
    }
}
