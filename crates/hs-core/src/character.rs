//! The character aggregate: per-character concrete state.
//!
//! Character rows reference the rule catalog by id and are exclusively
//! owned by their character — removing the character removes them.

use serde::{Deserialize, Serialize};

use crate::id::{
    ArchetypeId, CharacterId, EventRollId, PointpoolId, RoleId, SkillId, StatisticId, SystemId,
    TraitId,
};

/// A named player-controlled entity linked to a system, role, and archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name. Unique.
    pub name: String,
    /// The game system the character was built in.
    pub system: Option<SystemId>,
    /// The character's role tag.
    pub role: Option<RoleId>,
    /// The character's archetype tag.
    pub archetype: Option<ArchetypeId>,
}

impl Character {
    /// Create an unlinked character.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: None,
            role: None,
            archetype: None,
        }
    }
}

/// A character's current value for one statistic, with optional bounds.
///
/// Consumers expect `minimum <= current <= maximum` when both bounds are
/// set; the store does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStatistic {
    /// The owning character.
    pub character: CharacterId,
    /// The statistic definition.
    pub statistic: StatisticId,
    /// Current value.
    pub current: i32,
    /// Lower bound, if any.
    pub minimum: Option<i32>,
    /// Upper bound, if any.
    pub maximum: Option<i32>,
}

/// A character's current value for one skill, with optional bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSkill {
    /// The owning character.
    pub character: CharacterId,
    /// The skill definition.
    pub skill: SkillId,
    /// Current value.
    pub current: i32,
    /// Lower bound, if any.
    pub minimum: Option<i32>,
    /// Upper bound, if any.
    pub maximum: Option<i32>,
}

/// A character's current value for one trait, with optional bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTrait {
    /// The owning character.
    pub character: CharacterId,
    /// The trait definition.
    pub trait_def: TraitId,
    /// Current value.
    pub current: i32,
    /// Lower bound, if any.
    pub minimum: Option<i32>,
    /// Upper bound, if any.
    pub maximum: Option<i32>,
}

/// A character's current/total budget for one named pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPointpool {
    /// The owning character.
    pub character: CharacterId,
    /// The pool definition.
    pub pointpool: PointpoolId,
    /// Points currently available.
    pub current: i32,
    /// Total points ever granted.
    pub total: i32,
}

/// A character's personal event history: one entry per witnessed roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEventRoll {
    /// The owning character.
    pub character: CharacterId,
    /// The recorded roll.
    pub event_roll: EventRollId,
}

/// An NPC's roll outcome as witnessed or caused by a player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcEventRoll {
    /// The NPC whose roll this is.
    pub npc: CharacterId,
    /// The player character present for the roll.
    pub character: CharacterId,
    /// The recorded roll.
    pub event_roll: EventRollId,
}
