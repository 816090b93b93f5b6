//! Error types used throughout the crate.

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// The family of entity a store operation was addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A dice expression.
    Dice,
    /// An archetype tag.
    Archetype,
    /// A role tag.
    Role,
    /// A point pool tag.
    Pointpool,
    /// A trait category tag.
    TraitCategory,
    /// A game system.
    System,
    /// A character-creation operation.
    Operation,
    /// A statistic definition.
    Statistic,
    /// A skill definition.
    Skill,
    /// A trait definition.
    Trait,
    /// An event-graph node.
    Event,
    /// A concrete event roll.
    EventRoll,
    /// An NPC progression edge.
    NpcEvent,
    /// A character.
    Character,
    /// A per-character statistic row.
    CharacterStatistic,
    /// A per-character skill row.
    CharacterSkill,
    /// A per-character trait row.
    CharacterTrait,
    /// A per-character point pool row.
    CharacterPointpool,
    /// A character event-history row.
    CharacterEventRoll,
    /// An NPC event-history row.
    NpcEventRoll,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Dice => "dice",
            Self::Archetype => "archetype",
            Self::Role => "role",
            Self::Pointpool => "pointpool",
            Self::TraitCategory => "trait category",
            Self::System => "system",
            Self::Operation => "operation",
            Self::Statistic => "statistic",
            Self::Skill => "skill",
            Self::Trait => "trait",
            Self::Event => "event",
            Self::EventRoll => "event roll",
            Self::NpcEvent => "NPC event",
            Self::Character => "character",
            Self::CharacterStatistic => "character statistic",
            Self::CharacterSkill => "character skill",
            Self::CharacterTrait => "character trait",
            Self::CharacterPointpool => "character pointpool",
            Self::CharacterEventRoll => "character event roll",
            Self::NpcEventRoll => "NPC event roll",
        };
        write!(f, "{name}")
    }
}

/// Errors that can occur when manipulating the compendium.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested row does not exist in the compendium.
    #[error("{kind} not found: #{id}")]
    NotFound {
        /// The entity family.
        kind: Kind,
        /// The raw identifier that failed to resolve.
        id: u32,
    },

    /// A row with the same name already exists in a name-unique family.
    #[error("{kind} already exists: \"{name}\"")]
    DuplicateName {
        /// The entity family.
        kind: Kind,
        /// The conflicting name.
        name: String,
    },

    /// A dice expression string could not be parsed.
    #[error("invalid dice expression: {0}")]
    InvalidDice(String),

    /// An operation name is outside the closed enumeration.
    #[error("unknown operation kind: \"{0}\"")]
    UnknownOperationKind(String),

    /// A tier code is outside the 0-10 range.
    #[error("unknown tier code: {0}")]
    UnknownTier(u8),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] against a raw id.
    pub fn not_found(kind: Kind, id: u32) -> Self {
        Self::NotFound { kind, id }
    }
}
