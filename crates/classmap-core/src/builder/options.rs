use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// DiscriminatorMapMode
///
/// What `discriminator_map` does beyond adding the map entry.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscriminatorMapMode {
    /// Only add the entry to the map.
    #[default]
    AppendOnly,

    /// Add the entry, then take the value as this class's discriminator
    /// value when the entry names the described class, or record the
    /// entry's class as a subclass otherwise.
    Resolve,
}

///
/// BuilderOptions
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuilderOptions {
    pub discriminator_map: DiscriminatorMapMode,
}

impl BuilderOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            discriminator_map: DiscriminatorMapMode::AppendOnly,
        }
    }

    #[must_use]
    pub const fn discriminator_map(mut self, mode: DiscriminatorMapMode) -> Self {
        self.discriminator_map = mode;
        self
    }
}
