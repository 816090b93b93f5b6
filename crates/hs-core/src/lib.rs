//! Core data model for the Heldenschmiede character creator.
//!
//! The model splits into three clusters, all owned by one [`Compendium`]:
//!
//! - the **rule catalog**: systems with their ordered operation chains,
//!   tags (archetypes, roles, point pools, trait categories), and the
//!   purchasable statistic/skill/trait definitions;
//! - the **event graph**: named events linked for rerolls, follow-ups,
//!   and NPC progression, plus recorded rolls;
//! - the **character aggregate**: characters and their per-character
//!   statistic, skill, trait, pool, and event-history rows.
//!
//! Rows reference each other through typed sequential ids, never through
//! owned pointers, so the whole store serializes flat and deletion can
//! cascade along the reference graph the way the persistence layer would.

pub mod catalog;
pub mod chain;
pub mod character;
pub mod compendium;
pub mod dice;
pub mod display;
pub mod error;
pub mod event;
pub mod id;

pub use catalog::{
    Archetype, Direction, Operation, OperationKind, Pointpool, Role, Skill, StatKind, Statistic,
    System, Tier, Trait, TraitCategory,
};
pub use character::{
    Character, CharacterEventRoll, CharacterPointpool, CharacterSkill, CharacterStatistic,
    CharacterTrait, NpcEventRoll,
};
pub use compendium::Compendium;
pub use dice::Dice;
pub use error::{CoreError, CoreResult, Kind};
pub use event::{Event, EventRoll, NpcEvent};
pub use id::{
    ArchetypeId, CharacterEventRollId, CharacterId, CharacterPointpoolId, CharacterSkillId,
    CharacterStatisticId, CharacterTraitId, DiceId, EventId, EventRollId, NpcEventId,
    NpcEventRollId, OperationId, PointpoolId, RoleId, SkillId, StatisticId, SystemId,
    TraitCategoryId, TraitId,
};
