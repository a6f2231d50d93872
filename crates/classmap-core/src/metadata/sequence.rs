use serde::{Deserialize, Serialize};

///
/// SequenceGeneratorDefinition
///
/// Database sequence feeding identifier values.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceGeneratorDefinition {
    pub sequence_name: String,
    pub allocation_size: u32,
    pub initial_value: i64,
}

impl SequenceGeneratorDefinition {
    pub const DEFAULT_ALLOCATION_SIZE: u32 = 1;
    pub const DEFAULT_INITIAL_VALUE: i64 = 1;

    #[must_use]
    pub fn new(sequence_name: impl Into<String>, allocation_size: u32, initial_value: i64) -> Self {
        Self {
            sequence_name: sequence_name.into(),
            allocation_size,
            initial_value,
        }
    }
}
