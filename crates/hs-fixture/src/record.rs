//! The JSON seed-fixture row format.
//!
//! Rows serialize in the loader's expected shape: a `model` tag, a
//! numeric `pk`, and a `fields` object whose keys depend on the model.
//! Optional system fields are omitted entirely when absent, while an
//! operation's `previous` serializes as an explicit `null` on the head
//! of a chain.

use serde::Serialize;

/// Model tag for system rows.
pub const SYSTEM_MODEL: &str = "CharacterCreator.System";
/// Model tag for operation rows.
pub const OPERATION_MODEL: &str = "CharacterCreator.Operation";

/// One row of the seed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Which model this row seeds.
    pub model: &'static str,
    /// Primary key. Sequential across the whole fixture, starting at 1.
    pub pk: u32,
    /// The model-specific payload.
    pub fields: Fields,
}

/// The payload of one fixture row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Fields {
    /// Payload of a system row.
    System(SystemFields),
    /// Payload of an operation row.
    Operation(OperationFields),
}

/// Field payload of a system row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemFields {
    /// The system's name.
    pub name: String,
    /// Edition label. Omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    /// Copyright notice. Omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Publisher name. Omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// Field payload of an operation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationFields {
    /// The operation's name (e.g. `"select"`).
    pub name: String,
    /// Display alias shown to players.
    pub alias: String,
    /// The pk of the preceding operation, or `null` for the chain head.
    pub previous: Option<u32>,
    /// The pk of the owning system.
    pub system: u32,
}
