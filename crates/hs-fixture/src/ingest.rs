//! Loading compiled fixture rows into a [`Compendium`].
//!
//! The inverse of the compiler, used to validate a fixture the way the
//! eventual consumer would: every row becomes a catalog entity, with pk
//! references rewritten to typed ids.

use std::collections::BTreeMap;

use hs_core::{Compendium, Operation, OperationId, OperationKind, System, SystemId};

use crate::record::{Fields, Record};

/// Load fixture rows into a fresh compendium.
///
/// Rows that cannot be loaded (unknown operation name, reference to a pk
/// that was never emitted) are reported as issue strings and skipped;
/// loading always produces a compendium from whatever rows were sound.
pub fn load_compendium(records: &[Record]) -> (Compendium, Vec<String>) {
    let mut compendium = Compendium::new();
    let mut systems: BTreeMap<u32, SystemId> = BTreeMap::new();
    let mut operations: BTreeMap<u32, OperationId> = BTreeMap::new();
    let mut issues = Vec::new();

    for record in records {
        match &record.fields {
            Fields::System(fields) => {
                let mut system = System::new(fields.name.clone());
                system.edition = fields.edition.clone();
                system.copyright = fields.copyright.clone();
                system.publisher = fields.publisher.clone();
                match compendium.add_system(system) {
                    Ok(id) => {
                        systems.insert(record.pk, id);
                    }
                    Err(err) => issues.push(format!("system row {}: {err}", record.pk)),
                }
            }
            Fields::Operation(fields) => {
                let kind = match OperationKind::parse(&fields.name) {
                    Ok(kind) => kind,
                    Err(err) => {
                        issues.push(format!("operation row {}: {err}", record.pk));
                        continue;
                    }
                };
                let Some(system) = systems.get(&fields.system).copied() else {
                    issues.push(format!(
                        "operation row {}: unknown system pk {}",
                        record.pk, fields.system
                    ));
                    continue;
                };
                let previous = match fields.previous {
                    None => None,
                    Some(previous_pk) => match operations.get(&previous_pk).copied() {
                        Some(id) => Some(id),
                        None => {
                            issues.push(format!(
                                "operation row {}: unknown previous pk {previous_pk}",
                                record.pk
                            ));
                            continue;
                        }
                    },
                };
                let operation = Operation {
                    kind,
                    alias: fields.alias.clone(),
                    previous,
                    system: Some(system),
                };
                match compendium.add_operation(operation) {
                    Ok(id) => {
                        operations.insert(record.pk, id);
                    }
                    Err(err) => issues.push(format!("operation row {}: {err}", record.pk)),
                }
            }
        }
    }

    (compendium, issues)
}
