//! The rule catalog: shared, system-defined reference data.
//!
//! Tag entities (archetypes, roles, point pools, trait categories), game
//! systems with their ordered operation chains, and the purchasable
//! elements (statistics, skills, traits).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::{
    ArchetypeId, OperationId, PointpoolId, RoleId, StatisticId, SystemId, TraitCategoryId,
};

/// Whether a purchasable element raises or lowers the value it affects.
///
/// Persisted as the single-letter codes `"I"` / `"D"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Buying more increases the affected value.
    #[default]
    #[serde(rename = "I")]
    Increasing,
    /// Buying more decreases the affected value.
    #[serde(rename = "D")]
    Decreasing,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// Whether a statistic stands alone or derives from other values.
///
/// Persisted as the single-letter codes `"I"` / `"D"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatKind {
    /// The statistic is set directly.
    #[default]
    #[serde(rename = "I")]
    Independent,
    /// The statistic is derived from other statistics.
    #[serde(rename = "D")]
    Dependent,
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Independent => write!(f, "independent"),
            Self::Dependent => write!(f, "dependent"),
        }
    }
}

/// Cost-multiplier tier of a purchasable element, coded 0-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Tier 0: flat addition.
    #[default]
    Add,
    /// Tier 1: multiply.
    Multiply,
    /// Tier 2: double.
    Double,
    /// Tier 3: triple.
    Triple,
    /// Tier 4: quadruple.
    Quadruple,
    /// Tier 5: quintuple.
    Quintuple,
    /// Tier 6: sextuple.
    Sextuple,
    /// Tier 7: septuple.
    Septuple,
    /// Tier 8: octuple.
    Octuple,
    /// Tier 9: nonuple.
    Nonuple,
    /// Tier 10: decuple.
    Decuple,
}

impl Tier {
    /// The persisted integer code of this tier.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.code()
    }
}

impl TryFrom<u8> for Tier {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Add),
            1 => Ok(Self::Multiply),
            2 => Ok(Self::Double),
            3 => Ok(Self::Triple),
            4 => Ok(Self::Quadruple),
            5 => Ok(Self::Quintuple),
            6 => Ok(Self::Sextuple),
            7 => Ok(Self::Septuple),
            8 => Ok(Self::Octuple),
            9 => Ok(Self::Nonuple),
            10 => Ok(Self::Decuple),
            other => Err(CoreError::UnknownTier(other)),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Multiply => "multiply",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Quadruple => "quadruple",
            Self::Quintuple => "quintuple",
            Self::Sextuple => "sextuple",
            Self::Septuple => "septuple",
            Self::Octuple => "octuple",
            Self::Nonuple => "nonuple",
            Self::Decuple => "decuple",
        };
        write!(f, "{name}")
    }
}

/// The semantic kind of a character-creation step.
///
/// Rule authors pick from this closed set. Persisted data may carry
/// reserved empty-string placeholders; those are not representable here
/// and [`OperationKind::parse`] rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Name the character.
    #[default]
    Name,
    /// Select from a list (role, archetype, ...).
    Select,
    /// Spend points from a pool.
    Spend,
    /// Roll on the event graph for backstory.
    History,
}

impl OperationKind {
    /// The persisted string form of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Select => "select",
            Self::Spend => "spend",
            Self::History => "history",
        }
    }

    /// Parse a persisted operation name.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "name" => Ok(Self::Name),
            "select" => Ok(Self::Select),
            "spend" => Ok(Self::Spend),
            "history" => Ok(Self::History),
            other => Err(CoreError::UnknownOperationKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A character archetype tag (e.g. "Veteran"). Unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    /// Display name.
    pub name: String,
}

/// A character role tag (e.g. "Medic"). Unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Display name.
    pub name: String,
}

/// A named point budget (e.g. "XP", "Mana"). Unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointpool {
    /// Display name.
    pub name: String,
}

/// A grouping of traits (e.g. "Background"). Unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitCategory {
    /// Display name.
    pub name: String,
}

macro_rules! tag_display {
    ($($name:ident),*) => {
        $(
            impl $name {
                /// Create the tag from a name.
                pub fn new(name: impl Into<String>) -> Self {
                    Self { name: name.into() }
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.name)
                }
            }
        )*
    };
}

tag_display!(Archetype, Role, Pointpool, TraitCategory);

/// One game system's identity. Owns an ordered chain of [`Operation`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    /// The system's name. Required.
    pub name: String,
    /// Edition label, if any.
    pub edition: Option<String>,
    /// Copyright notice, if any.
    pub copyright: Option<String>,
    /// Publisher name, if any.
    pub publisher: Option<String>,
}

impl System {
    /// Create a system with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edition: None,
            copyright: None,
            publisher: None,
        }
    }
}

/// Treat a missing or empty optional field as absent.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = &self.name;
        let edition = non_empty(&self.edition);
        let publisher = non_empty(&self.publisher);
        let copyright = non_empty(&self.copyright);

        match (edition, publisher, copyright) {
            (Some(e), Some(p), Some(c)) => {
                write!(f, "{name} ({e}), published by {p} (c) {c}")
            }
            (Some(e), Some(p), None) => write!(f, "{name} ({e}), published by {p}"),
            (Some(e), None, Some(c)) => write!(f, "{name} ({e}) (c) {c}"),
            (None, Some(p), Some(c)) => write!(f, "{name}, published by {p} (c) {c}"),
            (Some(e), None, None) => write!(f, "{name} ({e})"),
            (None, Some(p), None) => write!(f, "{name}, published by {p}"),
            (None, None, Some(c)) => write!(f, "{name} (c) {c}"),
            (None, None, None) => write!(f, "{name}"),
        }
    }
}

/// One step in a system's character-creation sequence.
///
/// Steps form a singly linked list through `previous`; the head of a
/// system's chain has `previous = None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The semantic kind of this step.
    pub kind: OperationKind,
    /// Display label shown to players. May be empty.
    pub alias: String,
    /// The preceding step in the chain, or `None` for the head.
    pub previous: Option<OperationId>,
    /// The system this step belongs to.
    pub system: Option<SystemId>,
}

impl Operation {
    /// Create a head operation (no predecessor) for a system.
    pub fn new(kind: OperationKind, alias: impl Into<String>, system: Option<SystemId>) -> Self {
        Self {
            kind,
            alias: alias.into(),
            previous: None,
            system,
        }
    }

    /// Create an operation chained after `previous`.
    pub fn after(
        kind: OperationKind,
        alias: impl Into<String>,
        previous: OperationId,
        system: Option<SystemId>,
    ) -> Self {
        Self {
            kind,
            alias: alias.into(),
            previous: Some(previous),
            system,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.alias.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} ({})", self.alias, self.kind)
        }
    }
}

/// A purchasable statistic definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    /// Display name. Unique.
    pub name: String,
    /// Effect direction.
    pub direction: Direction,
    /// Cost per purchase.
    pub cost: i32,
    /// Cost-multiplier tier.
    pub tier: Tier,
    /// Independent or dependent.
    pub kind: StatKind,
    /// How many times it has been bought in aggregate.
    pub purchase: i32,
    /// Restricting role, if any.
    pub role: Option<RoleId>,
    /// Restricting archetype, if any.
    pub archetype: Option<ArchetypeId>,
    /// The pool purchases draw from, if any.
    pub pointpool: Option<PointpoolId>,
}

impl Statistic {
    /// Create a statistic with default cost and no restrictions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::default(),
            cost: 0,
            tier: Tier::default(),
            kind: StatKind::default(),
            purchase: 0,
            role: None,
            archetype: None,
            pointpool: None,
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A purchasable skill definition, optionally governed by a statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Display name. Not unique; the same skill may recur per context.
    pub name: String,
    /// Effect direction.
    pub direction: Direction,
    /// Cost per purchase.
    pub cost: i32,
    /// Cost-multiplier tier.
    pub tier: Tier,
    /// How many times it has been bought in aggregate.
    pub purchase: i32,
    /// Restricting role, if any.
    pub role: Option<RoleId>,
    /// Restricting archetype, if any.
    pub archetype: Option<ArchetypeId>,
    /// The pool purchases draw from, if any.
    pub pointpool: Option<PointpoolId>,
    /// The governing statistic, if any.
    pub statistic: Option<StatisticId>,
}

impl Skill {
    /// Create a skill with default cost and no links.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::default(),
            cost: 0,
            tier: Tier::default(),
            purchase: 0,
            role: None,
            archetype: None,
            pointpool: None,
            statistic: None,
        }
    }
}

/// A purchasable trait definition, optionally grouped under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    /// Display name. Unique.
    pub name: String,
    /// Effect direction.
    pub direction: Direction,
    /// Cost per purchase.
    pub cost: i32,
    /// Cost-multiplier tier.
    pub tier: Tier,
    /// The category this trait belongs to, if any.
    pub category: Option<TraitCategoryId>,
    /// How many times it has been bought in aggregate.
    pub purchase: i32,
    /// Restricting role, if any.
    pub role: Option<RoleId>,
    /// Restricting archetype, if any.
    pub archetype: Option<ArchetypeId>,
    /// The pool purchases draw from, if any.
    pub pointpool: Option<PointpoolId>,
}

impl Trait {
    /// Create a trait with default cost and no links.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::default(),
            cost: 0,
            tier: Tier::default(),
            category: None,
            purchase: 0,
            role: None,
            archetype: None,
            pointpool: None,
        }
    }
}

impl std::fmt::Display for Trait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
