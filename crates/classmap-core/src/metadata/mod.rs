//! Per-class mapping descriptor.
//!
//! `ClassMetadata` owns every mapping setting for one persistent class.
//! Its setters keep the derived lookups (column names, identifier list,
//! version flags) consistent with `field_mappings`; the public fields stay
//! open for direct mutation by callers that bypass the builder.

mod discriminator;
mod field;
mod sequence;


pub use discriminator::{DiscriminatorColumn, FORBIDDEN_DISCRIMINATOR_TYPES};
pub use field::{FieldMapping, FieldOptions, OptionValue};
pub use sequence::SequenceGeneratorDefinition;

use crate::{
    error::MappingError,
    types::{ChangeTrackingPolicy, InheritanceType},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping types that can carry an optimistic-locking version.
pub const VERSION_TYPES: &[&str] = &["bigint", "datetime", "integer", "smallint"];

/// Default written into a `datetime` version column.
pub const DATETIME_VERSION_DEFAULT: &str = "CURRENT_TIMESTAMP";

///
/// TableDefinition
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indexes: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unique_constraints: BTreeMap<String, Vec<String>>,
}

///
/// ClassMetadata
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMetadata {
    pub name: String,
    pub table: TableDefinition,
    pub is_mapped_superclass: bool,
    pub inheritance_type: InheritanceType,
    pub discriminator_column: Option<DiscriminatorColumn>,
    pub discriminator_map: BTreeMap<String, String>,
    pub discriminator_value: Option<String>,
    pub sub_classes: Vec<String>,
    pub change_tracking_policy: ChangeTrackingPolicy,
    pub field_mappings: BTreeMap<String, FieldMapping>,

    /// field name -> column name
    pub column_names: BTreeMap<String, String>,

    /// column name -> field name
    pub field_names: BTreeMap<String, String>,

    pub identifier: Vec<String>,
    pub is_identifier_composite: bool,
    pub is_versioned: bool,
    pub version_field: Option<String>,
    pub sequence_generator_definition: Option<SequenceGeneratorDefinition>,
}

impl ClassMetadata {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: TableDefinition::default(),
            is_mapped_superclass: false,
            inheritance_type: InheritanceType::default(),
            discriminator_column: None,
            discriminator_map: BTreeMap::new(),
            discriminator_value: None,
            sub_classes: Vec::new(),
            change_tracking_policy: ChangeTrackingPolicy::default(),
            field_mappings: BTreeMap::new(),
            column_names: BTreeMap::new(),
            field_names: BTreeMap::new(),
            identifier: Vec::new(),
            is_identifier_composite: false,
            is_versioned: false,
            version_field: None,
            sequence_generator_definition: None,
        }
    }

    //
    // table
    //

    pub fn set_table_name(&mut self, name: impl Into<String>) {
        self.table.name = Some(name.into());
    }

    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table.name.as_deref()
    }

    pub fn add_table_index(&mut self, name: impl Into<String>, columns: Vec<String>) {
        self.table.indexes.insert(name.into(), columns);
    }

    pub fn add_table_unique_constraint(&mut self, name: impl Into<String>, columns: Vec<String>) {
        self.table.unique_constraints.insert(name.into(), columns);
    }

    pub const fn set_mapped_superclass(&mut self, mapped_superclass: bool) {
        self.is_mapped_superclass = mapped_superclass;
    }

    //
    // inheritance
    //

    pub const fn set_inheritance_type(&mut self, inheritance_type: InheritanceType) {
        self.inheritance_type = inheritance_type;
    }

    #[must_use]
    pub const fn is_inheritance_type_none(&self) -> bool {
        matches!(self.inheritance_type, InheritanceType::None)
    }

    #[must_use]
    pub const fn is_inheritance_type_single_table(&self) -> bool {
        matches!(self.inheritance_type, InheritanceType::SingleTable)
    }

    #[must_use]
    pub const fn is_inheritance_type_joined(&self) -> bool {
        matches!(self.inheritance_type, InheritanceType::Joined)
    }

    #[must_use]
    pub const fn is_inheritance_type_table_per_class(&self) -> bool {
        matches!(self.inheritance_type, InheritanceType::TablePerClass)
    }

    //
    // discriminator
    //

    /// Replace the discriminator column after completing its defaults.
    pub fn set_discriminator_column(
        &mut self,
        mut column: DiscriminatorColumn,
    ) -> Result<(), MappingError> {
        if column.name.is_empty() {
            return Err(MappingError::MissingDiscriminatorColumnName {
                class: self.name.clone(),
            });
        }

        column.complete();

        if column.has_forbidden_type() {
            return Err(MappingError::InvalidDiscriminatorColumnType {
                class: self.name.clone(),
                column: column.name,
                ty: column.ty,
            });
        }
        if let Some(existing) = self.field_names.get(&column.name) {
            return Err(MappingError::DuplicateColumnName {
                class: self.name.clone(),
                column: column.name,
                existing: existing.clone(),
            });
        }

        self.discriminator_column = Some(column);

        Ok(())
    }

    /// Add or overwrite one discriminator value. No other state changes.
    pub fn add_discriminator_map_entry(
        &mut self,
        value: impl Into<String>,
        class: impl Into<String>,
    ) {
        self.discriminator_map.insert(value.into(), class.into());
    }

    pub fn set_discriminator_value(&mut self, value: impl Into<String>) {
        self.discriminator_value = Some(value.into());
    }

    /// Record a subclass once, keeping first-seen order.
    pub fn add_sub_class(&mut self, class: impl Into<String>) {
        let class = class.into();

        if !self.sub_classes.contains(&class) {
            self.sub_classes.push(class);
        }
    }

    //
    // change tracking
    //

    pub const fn set_change_tracking_policy(&mut self, policy: ChangeTrackingPolicy) {
        self.change_tracking_policy = policy;
    }

    #[must_use]
    pub const fn is_change_tracking_deferred_implicit(&self) -> bool {
        matches!(
            self.change_tracking_policy,
            ChangeTrackingPolicy::DeferredImplicit
        )
    }

    #[must_use]
    pub const fn is_change_tracking_deferred_explicit(&self) -> bool {
        matches!(
            self.change_tracking_policy,
            ChangeTrackingPolicy::DeferredExplicit
        )
    }

    #[must_use]
    pub const fn is_change_tracking_notify(&self) -> bool {
        matches!(self.change_tracking_policy, ChangeTrackingPolicy::Notify)
    }

    //
    // fields
    //

    /// Register or replace the mapping for one field.
    ///
    /// The descriptor is left untouched when the mapping is rejected.
    pub fn map_field(&mut self, mut mapping: FieldMapping) -> Result<(), MappingError> {
        if mapping.field_name.is_empty() {
            return Err(MappingError::MissingFieldName {
                class: self.name.clone(),
            });
        }

        mapping.complete();
        self.check_column_free(&mapping.field_name, &mapping.column_name)?;

        let field = mapping.field_name.clone();
        let column = mapping.column_name.clone();

        // release the column held by a previous mapping of this field
        if let Some(previous) = self.column_names.insert(field.clone(), column.clone()) {
            self.field_names.remove(&previous);
        }
        self.field_names.insert(column, field.clone());

        self.sync_identifier(&field, mapping.id);
        if !mapping.version && self.version_field.as_deref() == Some(field.as_str()) {
            self.clear_version();
        }

        self.field_mappings.insert(field, mapping);

        Ok(())
    }

    /// Map `mapping` as the optimistic-locking version field.
    ///
    /// Integer versions default to `1`, datetime versions to
    /// `CURRENT_TIMESTAMP`. A previous version field is demoted to a
    /// plain field and loses a default equal to its version default.
    pub fn map_version_field(&mut self, mut mapping: FieldMapping) -> Result<(), MappingError> {
        mapping.complete();

        if !VERSION_TYPES.contains(&mapping.ty.as_str()) {
            return Err(MappingError::UnsupportedOptimisticLockingType {
                class: self.name.clone(),
                field: mapping.field_name,
                ty: mapping.ty,
            });
        }

        if mapping.default.is_none() {
            mapping.default = Some(version_default(&mapping.ty));
        }
        mapping.version = true;

        let field = mapping.field_name.clone();
        self.map_field(mapping)?;

        if let Some(previous) = self.version_field.replace(field.clone())
            && previous != field
            && let Some(old) = self.field_mappings.get_mut(&previous)
        {
            old.version = false;
            if old.default == Some(version_default(&old.ty)) {
                old.default = None;
            }
        }
        self.is_versioned = true;

        Ok(())
    }

    #[must_use]
    pub fn field_mapping(&self, field: &str) -> Option<&FieldMapping> {
        self.field_mappings.get(field)
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.field_mappings.contains_key(field)
    }

    #[must_use]
    pub fn column_name(&self, field: &str) -> Option<&str> {
        self.column_names.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn field_name_for_column(&self, column: &str) -> Option<&str> {
        self.field_names.get(column).map(String::as_str)
    }

    //
    // identifier
    //

    #[must_use]
    pub fn is_identifier(&self, field: &str) -> bool {
        self.identifier.iter().any(|id| id == field)
    }

    /// The identifier field when the key is a single column.
    #[must_use]
    pub fn single_identifier_field_name(&self) -> Option<&str> {
        match self.identifier.as_slice() {
            [field] => Some(field.as_str()),
            _ => None,
        }
    }

    //
    // sequence generator
    //

    pub fn set_sequence_generator_definition(&mut self, definition: SequenceGeneratorDefinition) {
        self.sequence_generator_definition = Some(definition);
    }

    //
    // internals
    //

    fn check_column_free(&self, field: &str, column: &str) -> Result<(), MappingError> {
        let owner = self
            .field_names
            .get(column)
            .filter(|owner| owner.as_str() != field)
            .cloned()
            .or_else(|| {
                self.discriminator_column
                    .as_ref()
                    .filter(|disc| disc.name == column)
                    .map(|disc| disc.field_name.clone())
            });

        match owner {
            Some(existing) => Err(MappingError::DuplicateColumnName {
                class: self.name.clone(),
                column: column.to_string(),
                existing,
            }),
            None => Ok(()),
        }
    }

    fn sync_identifier(&mut self, field: &str, is_id: bool) {
        if is_id {
            if !self.is_identifier(field) {
                self.identifier.push(field.to_string());
            }
        } else {
            self.identifier.retain(|id| id != field);
        }

        self.is_identifier_composite = self.identifier.len() > 1;
    }

    fn clear_version(&mut self) {
        self.version_field = None;
        self.is_versioned = false;
    }
}

fn version_default(ty: &str) -> OptionValue {
    if ty == "datetime" {
        OptionValue::from(DATETIME_VERSION_DEFAULT)
    } else {
        OptionValue::Int(1)
    }
}
