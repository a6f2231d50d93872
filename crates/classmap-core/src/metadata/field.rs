use crate::DEFAULT_FIELD_TYPE;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, ops::Not};

///
/// OptionValue
///
/// Scalar value carried by free-form mapping options and field defaults.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

///
/// FieldOptions
///
/// Caller-supplied settings merged over `{field_name, type}` when a field
/// is declared. Unset entries leave the mapping defaults in place.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FieldOptions {
    pub column_name: Option<String>,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub nullable: bool,
    pub unique: bool,
    pub column_definition: Option<String>,
    pub id: Option<bool>,
    pub default: Option<OptionValue>,
    pub options: BTreeMap<String, OptionValue>,
}

impl FieldOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn column_name(mut self, column: impl Into<String>) -> Self {
        self.column_name = Some(column.into());
        self
    }

    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    #[must_use]
    pub const fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub const fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    #[must_use]
    pub fn column_definition(mut self, definition: impl Into<String>) -> Self {
        self.column_definition = Some(definition.into());
        self
    }

    #[must_use]
    pub const fn id(mut self, id: bool) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Add one vendor option; a repeated key keeps the last value.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

///
/// FieldMapping
///
/// Column mapping for one persistent field.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub field_name: String,

    #[serde(rename = "type")]
    pub ty: String,

    pub column_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub unique: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_definition: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub id: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub version: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, OptionValue>,
}

impl FieldMapping {
    /// Build a plain mapping whose column shares the field's name.
    #[must_use]
    pub fn new(field_name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::with_options(field_name, ty, FieldOptions::default())
    }

    /// Merge `options` over `{field_name, ty}`.
    #[must_use]
    pub fn with_options(
        field_name: impl Into<String>,
        ty: impl Into<String>,
        options: FieldOptions,
    ) -> Self {
        let field_name = field_name.into();
        let column_name = options
            .column_name
            .unwrap_or_else(|| field_name.clone());

        Self {
            field_name,
            ty: ty.into(),
            column_name,
            length: options.length,
            precision: options.precision,
            scale: options.scale,
            nullable: options.nullable,
            unique: options.unique,
            column_definition: options.column_definition,
            id: options.id.unwrap_or(false),
            version: false,
            default: options.default,
            options: options.options,
        }
    }

    // complete
    // fill the type and column defaults left empty by direct construction
    pub(crate) fn complete(&mut self) {
        if self.ty.is_empty() {
            self.ty = DEFAULT_FIELD_TYPE.to_string();
        }
        if self.column_name.is_empty() {
            self.column_name.clone_from(&self.field_name);
        }
    }
}
