//! Errors raised while resolving events.

use hs_core::{DiceId, EventId};
use thiserror::Error;

/// Convenience alias for mechanics results.
pub type MechResult<T> = Result<T, MechError>;

/// Everything that can go wrong while rolling an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MechError {
    /// The requested event does not exist in the compendium.
    #[error("event not found: {0}")]
    EventNotFound(EventId),
    /// An event references dice that do not exist.
    #[error("dice not found: {0}")]
    DiceNotFound(DiceId),
    /// A reroll was requested against an event with no reroll target.
    #[error("event {0} has no reroll target")]
    NoRerollTarget(EventId),
}
