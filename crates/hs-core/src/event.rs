//! The event graph: named nodes with dice-driven outcomes.
//!
//! Events link to each other through ids: `reroll_event` says where a
//! reroll trigger goes, `next_event` chains a follow-up event, and
//! [`NpcEvent`] edges drive NPC-only progression. Concrete outcomes are
//! recorded as [`EventRoll`] rows.

use serde::{Deserialize, Serialize};

use crate::id::{DiceId, EventId};

/// A named node in the event graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Display name. Unique.
    pub name: String,
    /// How to roll this event's outcome, if it is rolled at all.
    pub dice: Option<DiceId>,
    /// Where a reroll trigger goes.
    pub reroll_event: Option<EventId>,
    /// Chained follow-up event.
    pub next_event: Option<EventId>,
}

impl Event {
    /// Create an event with no dice and no links.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dice: None,
            reroll_event: None,
            next_event: None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One concrete roll result against a main event.
///
/// May itself point to a `roll_event` — the event triggered by this
/// particular roll value — forming a decision-tree edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRoll {
    /// The numeric roll.
    pub roll: i64,
    /// Human-readable outcome text, if the table gives one.
    pub outcome: Option<String>,
    /// NPC label, when the roll describes an NPC.
    pub npc: Option<String>,
    /// How many times this outcome has been rerolled. Starts at 1.
    pub reroll_count: i32,
    /// Whether the player chose this outcome rather than rolling it.
    pub selection: bool,
    /// The event this roll was made against.
    pub main_event: EventId,
    /// The event triggered by this roll value, if any.
    pub roll_event: Option<EventId>,
}

impl EventRoll {
    /// Create a fresh roll against `main_event`.
    pub fn new(main_event: EventId, roll: i64) -> Self {
        Self {
            roll,
            outcome: None,
            npc: None,
            reroll_count: 1,
            selection: false,
            main_event,
            roll_event: None,
        }
    }
}

/// A directed `current -> next` edge between two events, used to drive
/// NPC-only event progression independent of player rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcEvent {
    /// The event an NPC is currently at.
    pub current: EventId,
    /// The event the NPC moves to.
    pub next: EventId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_roll_defaults() {
        let roll = EventRoll::new(EventId(1), 7);
        assert_eq!(roll.roll, 7);
        assert_eq!(roll.reroll_count, 1);
        assert!(!roll.selection);
        assert!(roll.outcome.is_none());
        assert!(roll.roll_event.is_none());
    }
}
