//! ## Crate layout
//! - `core`: the class descriptor, its records, and the fluent builder.
//! - `config`: TOML mapping documents replayed through the builder.
//! - `error`: the public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module carries the vocabulary needed to describe a class.

pub use classmap_config as config;
pub use classmap_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::MappingConfig,
        core::prelude::*,
        error::{Error, ErrorKind, ErrorOrigin},
    };
}
