//! Typed identifiers for every stored entity.
//!
//! Rows reference each other through these ids rather than in-memory
//! pointers, so self-referencing structures (operation chains, event links)
//! stay cycle-safe and cascade deletion can be an explicit cleanup pass.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(
            /// The raw sequential id.
            pub u32,
        );

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a stored dice expression.
    DiceId
);
entity_id!(
    /// Identifier of an archetype tag.
    ArchetypeId
);
entity_id!(
    /// Identifier of a role tag.
    RoleId
);
entity_id!(
    /// Identifier of a point pool tag.
    PointpoolId
);
entity_id!(
    /// Identifier of a trait category tag.
    TraitCategoryId
);
entity_id!(
    /// Identifier of a game system.
    SystemId
);
entity_id!(
    /// Identifier of a character-creation operation.
    OperationId
);
entity_id!(
    /// Identifier of a statistic definition.
    StatisticId
);
entity_id!(
    /// Identifier of a skill definition.
    SkillId
);
entity_id!(
    /// Identifier of a trait definition.
    TraitId
);
entity_id!(
    /// Identifier of an event-graph node.
    EventId
);
entity_id!(
    /// Identifier of a concrete event roll.
    EventRollId
);
entity_id!(
    /// Identifier of an NPC progression edge.
    NpcEventId
);
entity_id!(
    /// Identifier of a character.
    CharacterId
);
entity_id!(
    /// Identifier of a per-character statistic row.
    CharacterStatisticId
);
entity_id!(
    /// Identifier of a per-character skill row.
    CharacterSkillId
);
entity_id!(
    /// Identifier of a per-character trait row.
    CharacterTraitId
);
entity_id!(
    /// Identifier of a per-character point pool row.
    CharacterPointpoolId
);
entity_id!(
    /// Identifier of a character event-history row.
    CharacterEventRollId
);
entity_id!(
    /// Identifier of an NPC event-history row.
    NpcEventRollId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_shows_raw_number() {
        assert_eq!(SystemId(3).to_string(), "#3");
        assert_eq!(EventId(42).to_string(), "#42");
    }
}
