//! The shape of one YAML system-definition file.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One system-definition document.
///
/// Only documents whose top level carries a `system` key are definitions;
/// anything else in the directory is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemDoc {
    /// The system's identity block.
    pub system: Option<SystemHeader>,
    /// The character-creation steps, in play order. Each entry is one
    /// single-key mapping of operation name to display alias.
    #[serde(default)]
    pub order: Vec<BTreeMap<String, String>>,
}

/// The `system:` block of a definition file.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemHeader {
    /// The system's name. Required.
    pub name: String,
    /// Edition label, if any.
    pub edition: Option<String>,
    /// Copyright notice, if any.
    pub copyright: Option<String>,
    /// Publisher name, if any.
    pub publisher: Option<String>,
}
