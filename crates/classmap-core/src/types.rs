use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// InheritanceType
///
/// Storage strategy for a mapped class hierarchy.
/// Exactly one is active per descriptor.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum InheritanceType {
    #[default]
    None,
    SingleTable,
    Joined,
    TablePerClass,
}

impl InheritanceType {
    /// Whether rows of different classes share storage and need a discriminator.
    #[must_use]
    pub const fn uses_discriminator(self) -> bool {
        matches!(self, Self::SingleTable | Self::Joined)
    }
}

///
/// ChangeTrackingPolicy
///
/// How a unit of work detects modified fields.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[remain::sorted]
pub enum ChangeTrackingPolicy {
    DeferredExplicit,
    #[default]
    DeferredImplicit,
    Notify,
}

impl ChangeTrackingPolicy {
    // deferred policies compute changes at flush time
    #[must_use]
    pub const fn is_deferred(self) -> bool {
        matches!(self, Self::DeferredExplicit | Self::DeferredImplicit)
    }
}
