use crate::{DEFAULT_DISCRIMINATOR_LENGTH, DEFAULT_DISCRIMINATOR_TYPE};
use serde::{Deserialize, Serialize};

/// Column types a discriminator value cannot be stored in.
pub const FORBIDDEN_DISCRIMINATOR_TYPES: &[&str] =
    &["array", "boolean", "date", "datetime", "object", "time"];

///
/// DiscriminatorColumn
///
/// Column that tells subclass rows apart in shared storage.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscriminatorColumn {
    pub name: String,
    pub field_name: String,

    #[serde(rename = "type")]
    pub ty: String,

    pub length: u32,
}

impl DiscriminatorColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>, length: u32) -> Self {
        let name = name.into();

        Self {
            field_name: name.clone(),
            name,
            ty: ty.into(),
            length,
        }
    }

    // complete
    // mirror the name into field_name and fill type/length defaults
    pub(crate) fn complete(&mut self) {
        self.field_name.clone_from(&self.name);

        if self.ty.is_empty() {
            self.ty = DEFAULT_DISCRIMINATOR_TYPE.to_string();
        }
        if self.length == 0 {
            self.length = DEFAULT_DISCRIMINATOR_LENGTH;
        }
    }

    #[must_use]
    pub fn has_forbidden_type(&self) -> bool {
        FORBIDDEN_DISCRIMINATOR_TYPES.contains(&self.ty.as_str())
    }
}
