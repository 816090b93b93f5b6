//! Operation chain validation.
//!
//! Every system's operations must form one well-formed singly linked list:
//! exactly one head, no cycles, and no link into another system's chain.

use std::fmt;

use crate::catalog::Operation;
use crate::compendium::Compendium;
use crate::id::{OperationId, SystemId};

/// One problem found in a system's operation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainIssue {
    /// The system whose chain is broken.
    pub system: SystemId,
    /// What is wrong.
    pub message: String,
}

impl fmt::Display for ChainIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system {}: {}", self.system, self.message)
    }
}

/// Check every system's operation chain. Returns all problems found;
/// an empty vector means every chain is well-formed.
pub fn validate(compendium: &Compendium) -> Vec<ChainIssue> {
    let mut issues = Vec::new();

    for (system_id, _) in compendium.systems() {
        let ops: Vec<(OperationId, &Operation)> = compendium
            .operations()
            .filter(|(_, op)| op.system == Some(system_id))
            .collect();
        if ops.is_empty() {
            continue;
        }

        let heads = ops.iter().filter(|(_, op)| op.previous.is_none()).count();
        match heads {
            1 => {}
            0 => issues.push(ChainIssue {
                system: system_id,
                message: "operation chain has no head".to_string(),
            }),
            n => issues.push(ChainIssue {
                system: system_id,
                message: format!("operation chain has {n} heads"),
            }),
        }

        // Walk backwards from each operation. A well-formed chain reaches
        // its head in at most len steps.
        for (op_id, op) in &ops {
            let mut current = op.previous;
            let mut steps = 0;
            while let Some(previous_id) = current {
                steps += 1;
                if steps > ops.len() {
                    issues.push(ChainIssue {
                        system: system_id,
                        message: format!("operation {op_id} sits on a previous-link cycle"),
                    });
                    break;
                }
                let Some(previous) = compendium.get_operation(previous_id) else {
                    issues.push(ChainIssue {
                        system: system_id,
                        message: format!(
                            "operation {op_id} links to missing operation {previous_id}"
                        ),
                    });
                    break;
                };
                if previous.system != Some(system_id) {
                    issues.push(ChainIssue {
                        system: system_id,
                        message: format!(
                            "operation {op_id} links to operation {previous_id} of another system"
                        ),
                    });
                    break;
                }
                current = previous.previous;
            }
        }
    }

    issues
}
