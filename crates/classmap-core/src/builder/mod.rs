//! Fluent builder over a borrowed `ClassMetadata`.
//!
//! Every call writes straight into the caller's descriptor and hands the
//! builder back for chaining. Calls that go through a descriptor setter
//! which can reject input return `Result<&mut Self, MappingError>`; the
//! error is passed through as-is.

mod options;

#[cfg(test)]
mod tests;

pub use options::{BuilderOptions, DiscriminatorMapMode};

use crate::{
    error::MappingError,
    metadata::{
        ClassMetadata, DiscriminatorColumn, FieldMapping, FieldOptions,
        SequenceGeneratorDefinition,
    },
    types::{ChangeTrackingPolicy, InheritanceType},
};
use tracing::{debug, warn};

///
/// ClassMetadataBuilder
///

pub struct ClassMetadataBuilder<'a> {
    metadata: &'a mut ClassMetadata,
    options: BuilderOptions,
}

impl<'a> ClassMetadataBuilder<'a> {
    #[must_use]
    pub fn new(metadata: &'a mut ClassMetadata) -> Self {
        Self::with_options(metadata, BuilderOptions::default())
    }

    #[must_use]
    pub const fn with_options(metadata: &'a mut ClassMetadata, options: BuilderOptions) -> Self {
        Self { metadata, options }
    }

    /// The descriptor passed at construction.
    #[must_use]
    pub fn class_metadata(&self) -> &ClassMetadata {
        &*self.metadata
    }

    pub fn class_metadata_mut(&mut self) -> &mut ClassMetadata {
        &mut *self.metadata
    }

    #[must_use]
    pub const fn options(&self) -> BuilderOptions {
        self.options
    }

    //
    // structure
    //

    pub fn mapped_superclass(&mut self) -> &mut Self {
        self.set_mapped_superclass(true)
    }

    pub fn set_mapped_superclass(&mut self, mapped_superclass: bool) -> &mut Self {
        debug!(class = %self.metadata.name, mapped_superclass, "mapped superclass");
        self.metadata.set_mapped_superclass(mapped_superclass);
        self
    }

    //
    // table
    //

    pub fn table(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        debug!(class = %self.metadata.name, table = %name, "table");
        self.metadata.set_table_name(name);
        self
    }

    pub fn table_index<I, C>(&mut self, name: impl Into<String>, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let name = name.into();
        let columns = collect_columns(columns);
        debug!(class = %self.metadata.name, index = %name, ?columns, "table index");
        self.metadata.add_table_index(name, columns);
        self
    }

    pub fn table_unique_constraint<I, C>(&mut self, name: impl Into<String>, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let name = name.into();
        let columns = collect_columns(columns);
        debug!(class = %self.metadata.name, constraint = %name, ?columns, "unique constraint");
        self.metadata.add_table_unique_constraint(name, columns);
        self
    }

    //
    // inheritance
    //

    pub fn joined_table_inheritance(&mut self) -> &mut Self {
        self.set_inheritance_type(InheritanceType::Joined)
    }

    pub fn single_table_inheritance(&mut self) -> &mut Self {
        self.set_inheritance_type(InheritanceType::SingleTable)
    }

    pub fn table_per_class_inheritance(&mut self) -> &mut Self {
        self.set_inheritance_type(InheritanceType::TablePerClass)
    }

    pub fn no_inheritance(&mut self) -> &mut Self {
        self.set_inheritance_type(InheritanceType::None)
    }

    //
    // discriminator
    //

    pub fn discriminator_column(
        &mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        length: u32,
    ) -> Result<&mut Self, MappingError> {
        let column = DiscriminatorColumn::new(name, ty, length);
        debug!(
            class = %self.metadata.name,
            column = %column.name,
            ty = %column.ty,
            length,
            "discriminator column"
        );
        self.metadata.set_discriminator_column(column)?;

        Ok(self)
    }

    pub fn discriminator_map(
        &mut self,
        value: impl Into<String>,
        class: impl Into<String>,
    ) -> &mut Self {
        let value = value.into();
        let class = strip_leading_separator(class.into());
        debug!(
            class = %self.metadata.name,
            value = %value,
            target = %class,
            mode = %self.options.discriminator_map,
            "discriminator map"
        );

        self.metadata
            .add_discriminator_map_entry(value.clone(), class.clone());

        if self.options.discriminator_map == DiscriminatorMapMode::Resolve {
            if class == self.metadata.name.trim_start_matches('\\') {
                self.metadata.set_discriminator_value(value);
            } else {
                self.metadata.add_sub_class(class);
            }
        }

        self
    }

    //
    // change tracking
    //

    pub fn change_tracking_policy_deferred_implicit(&mut self) -> &mut Self {
        self.set_change_tracking_policy(ChangeTrackingPolicy::DeferredImplicit)
    }

    pub fn change_tracking_policy_deferred_explicit(&mut self) -> &mut Self {
        self.set_change_tracking_policy(ChangeTrackingPolicy::DeferredExplicit)
    }

    pub fn change_tracking_policy_notify(&mut self) -> &mut Self {
        self.set_change_tracking_policy(ChangeTrackingPolicy::Notify)
    }

    //
    // fields
    //

    pub fn field(
        &mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        options: FieldOptions,
    ) -> Result<&mut Self, MappingError> {
        let mapping = FieldMapping::with_options(name, ty, options);
        debug!(class = %self.metadata.name, field = %mapping.field_name, ty = %mapping.ty, "field");
        self.metadata.map_field(mapping)?;

        Ok(self)
    }

    pub fn version_field(
        &mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        options: FieldOptions,
    ) -> Result<&mut Self, MappingError> {
        let mapping = FieldMapping::with_options(name, ty, options);
        debug!(class = %self.metadata.name, field = %mapping.field_name, ty = %mapping.ty, "version field");
        self.metadata.map_version_field(mapping)?;

        Ok(self)
    }

    /// Map a field that joins the identifier unless `options` sets `id`.
    pub fn primary_field(
        &mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        options: FieldOptions,
    ) -> Result<&mut Self, MappingError> {
        let options = FieldOptions {
            id: options.id.or(Some(true)),
            ..options
        };
        let mapping = FieldMapping::with_options(name, ty, options);
        debug!(class = %self.metadata.name, field = %mapping.field_name, ty = %mapping.ty, "primary field");
        self.metadata.map_field(mapping)?;

        Ok(self)
    }

    //
    // sequence generator
    //

    pub fn sequence_generator(
        &mut self,
        name: impl Into<String>,
        allocation_size: u32,
        initial_value: i64,
    ) -> &mut Self {
        let definition = SequenceGeneratorDefinition::new(name, allocation_size, initial_value);
        debug!(
            class = %self.metadata.name,
            sequence = %definition.sequence_name,
            allocation_size,
            initial_value,
            "sequence generator"
        );
        self.metadata.set_sequence_generator_definition(definition);
        self
    }

    /// `sequence_generator` with an allocation size and initial value of 1.
    pub fn default_sequence_generator(&mut self, name: impl Into<String>) -> &mut Self {
        self.sequence_generator(
            name,
            SequenceGeneratorDefinition::DEFAULT_ALLOCATION_SIZE,
            SequenceGeneratorDefinition::DEFAULT_INITIAL_VALUE,
        )
    }

    //
    // internals
    //

    fn set_inheritance_type(&mut self, inheritance_type: InheritanceType) -> &mut Self {
        let previous = self.metadata.inheritance_type;
        if previous != InheritanceType::None && previous != inheritance_type {
            warn!(class = %self.metadata.name, %previous, next = %inheritance_type, "inheritance type overwritten");
        }
        debug!(class = %self.metadata.name, inheritance = %inheritance_type, "inheritance type");
        self.metadata.set_inheritance_type(inheritance_type);
        self
    }

    fn set_change_tracking_policy(&mut self, policy: ChangeTrackingPolicy) -> &mut Self {
        let previous = self.metadata.change_tracking_policy;
        if previous != ChangeTrackingPolicy::default() && previous != policy {
            warn!(class = %self.metadata.name, %previous, next = %policy, "change tracking policy overwritten");
        }
        debug!(class = %self.metadata.name, %policy, "change tracking policy");
        self.metadata.set_change_tracking_policy(policy);
        self
    }
}

// `\App\User` and `App\User` name the same class.
fn strip_leading_separator(class: String) -> String {
    if class.starts_with('\\') {
        class.trim_start_matches('\\').to_string()
    } else {
        class
    }
}

fn collect_columns<I, C>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = C>,
    C: Into<String>,
{
    columns.into_iter().map(Into::into).collect()
}
