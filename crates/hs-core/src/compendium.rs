//! The central store. Owns every persisted row and enforces the
//! persistence-boundary rules: basic field validation on insert, referenced
//! rows must exist, and deletion cascades to every dependent row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{
    Archetype, Operation, Pointpool, Role, Skill, Statistic, System, Trait, TraitCategory,
};
use crate::character::{
    Character, CharacterEventRoll, CharacterPointpool, CharacterSkill, CharacterStatistic,
    CharacterTrait, NpcEventRoll,
};
use crate::dice::Dice;
use crate::display;
use crate::error::{CoreError, CoreResult, Kind};
use crate::event::{Event, EventRoll, NpcEvent};
use crate::id::{
    ArchetypeId, CharacterEventRollId, CharacterId, CharacterPointpoolId, CharacterSkillId,
    CharacterStatisticId, CharacterTraitId, DiceId, EventId, EventRollId, NpcEventId,
    NpcEventRollId, OperationId, PointpoolId, RoleId, SkillId, StatisticId, SystemId,
    TraitCategoryId, TraitId,
};

/// Collect the keys of all rows matching a predicate, so they can be
/// removed without holding a borrow on the map.
fn matching_keys<K: Copy + Ord, V>(map: &BTreeMap<K, V>, pred: impl Fn(&V) -> bool) -> Vec<K> {
    map.iter()
        .filter(|(_, v)| pred(v))
        .map(|(k, _)| *k)
        .collect()
}

macro_rules! require {
    ($self:ident.$map:ident, $id:expr, $kind:expr) => {
        if !$self.$map.contains_key(&$id) {
            return Err(CoreError::not_found($kind, $id.0));
        }
    };
}

/// The compendium: rule catalog, event graph, and character aggregate rows,
/// addressed by typed sequential ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Compendium {
    next_id: u32,
    dice: BTreeMap<DiceId, Dice>,
    archetypes: BTreeMap<ArchetypeId, Archetype>,
    roles: BTreeMap<RoleId, Role>,
    pointpools: BTreeMap<PointpoolId, Pointpool>,
    trait_categories: BTreeMap<TraitCategoryId, TraitCategory>,
    systems: BTreeMap<SystemId, System>,
    operations: BTreeMap<OperationId, Operation>,
    statistics: BTreeMap<StatisticId, Statistic>,
    skills: BTreeMap<SkillId, Skill>,
    traits: BTreeMap<TraitId, Trait>,
    events: BTreeMap<EventId, Event>,
    event_rolls: BTreeMap<EventRollId, EventRoll>,
    npc_events: BTreeMap<NpcEventId, NpcEvent>,
    characters: BTreeMap<CharacterId, Character>,
    character_statistics: BTreeMap<CharacterStatisticId, CharacterStatistic>,
    character_skills: BTreeMap<CharacterSkillId, CharacterSkill>,
    character_traits: BTreeMap<CharacterTraitId, CharacterTrait>,
    character_pointpools: BTreeMap<CharacterPointpoolId, CharacterPointpool>,
    character_event_rolls: BTreeMap<CharacterEventRollId, CharacterEventRoll>,
    npc_event_rolls: BTreeMap<NpcEventRollId, NpcEventRoll>,
}

impl Compendium {
    /// Create an empty compendium.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_raw(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn validate_name(kind: Kind, name: &str) -> CoreResult<()> {
        if name.is_empty() {
            return Err(CoreError::Validation(format!(
                "{kind} name must not be empty"
            )));
        }
        Ok(())
    }

    fn ensure_unique<'a>(
        mut names: impl Iterator<Item = &'a str>,
        kind: Kind,
        name: &str,
    ) -> CoreResult<()> {
        if names.any(|n| n == name) {
            return Err(CoreError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Dice and tag entities
    // -----------------------------------------------------------------------

    /// Store a dice expression.
    pub fn add_dice(&mut self, dice: Dice) -> CoreResult<DiceId> {
        // Re-check the invariants; callers can build the struct directly.
        let checked = Dice::new(dice.quantity, dice.sides, dice.offset)?;
        let id = DiceId(self.next_raw());
        self.dice.insert(
            id,
            Dice {
                label: dice.label,
                ..checked
            },
        );
        Ok(id)
    }

    /// Store an archetype tag. Names are unique.
    pub fn add_archetype(&mut self, name: impl Into<String>) -> CoreResult<ArchetypeId> {
        let name = name.into();
        Self::validate_name(Kind::Archetype, &name)?;
        Self::ensure_unique(
            self.archetypes.values().map(|a| a.name.as_str()),
            Kind::Archetype,
            &name,
        )?;
        let id = ArchetypeId(self.next_raw());
        self.archetypes.insert(id, Archetype::new(name));
        Ok(id)
    }

    /// Store a role tag. Names are unique.
    pub fn add_role(&mut self, name: impl Into<String>) -> CoreResult<RoleId> {
        let name = name.into();
        Self::validate_name(Kind::Role, &name)?;
        Self::ensure_unique(
            self.roles.values().map(|r| r.name.as_str()),
            Kind::Role,
            &name,
        )?;
        let id = RoleId(self.next_raw());
        self.roles.insert(id, Role::new(name));
        Ok(id)
    }

    /// Store a point pool tag. Names are unique.
    pub fn add_pointpool(&mut self, name: impl Into<String>) -> CoreResult<PointpoolId> {
        let name = name.into();
        Self::validate_name(Kind::Pointpool, &name)?;
        Self::ensure_unique(
            self.pointpools.values().map(|p| p.name.as_str()),
            Kind::Pointpool,
            &name,
        )?;
        let id = PointpoolId(self.next_raw());
        self.pointpools.insert(id, Pointpool::new(name));
        Ok(id)
    }

    /// Store a trait category tag. Names are unique.
    pub fn add_trait_category(&mut self, name: impl Into<String>) -> CoreResult<TraitCategoryId> {
        let name = name.into();
        Self::validate_name(Kind::TraitCategory, &name)?;
        Self::ensure_unique(
            self.trait_categories.values().map(|c| c.name.as_str()),
            Kind::TraitCategory,
            &name,
        )?;
        let id = TraitCategoryId(self.next_raw());
        self.trait_categories.insert(id, TraitCategory::new(name));
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Rule catalog
    // -----------------------------------------------------------------------

    /// Store a system.
    pub fn add_system(&mut self, system: System) -> CoreResult<SystemId> {
        Self::validate_name(Kind::System, &system.name)?;
        let id = SystemId(self.next_raw());
        self.systems.insert(id, system);
        Ok(id)
    }

    /// Store an operation. Its `previous` and `system` links must resolve.
    pub fn add_operation(&mut self, operation: Operation) -> CoreResult<OperationId> {
        if let Some(previous) = operation.previous {
            require!(self.operations, previous, Kind::Operation);
        }
        if let Some(system) = operation.system {
            require!(self.systems, system, Kind::System);
        }
        let id = OperationId(self.next_raw());
        self.operations.insert(id, operation);
        Ok(id)
    }

    /// Store a statistic definition. Names are unique.
    pub fn add_statistic(&mut self, statistic: Statistic) -> CoreResult<StatisticId> {
        Self::validate_name(Kind::Statistic, &statistic.name)?;
        Self::ensure_unique(
            self.statistics.values().map(|s| s.name.as_str()),
            Kind::Statistic,
            &statistic.name,
        )?;
        if let Some(role) = statistic.role {
            require!(self.roles, role, Kind::Role);
        }
        if let Some(archetype) = statistic.archetype {
            require!(self.archetypes, archetype, Kind::Archetype);
        }
        if let Some(pointpool) = statistic.pointpool {
            require!(self.pointpools, pointpool, Kind::Pointpool);
        }
        let id = StatisticId(self.next_raw());
        self.statistics.insert(id, statistic);
        Ok(id)
    }

    /// Store a skill definition. Skill names are not unique.
    pub fn add_skill(&mut self, skill: Skill) -> CoreResult<SkillId> {
        Self::validate_name(Kind::Skill, &skill.name)?;
        if let Some(role) = skill.role {
            require!(self.roles, role, Kind::Role);
        }
        if let Some(archetype) = skill.archetype {
            require!(self.archetypes, archetype, Kind::Archetype);
        }
        if let Some(pointpool) = skill.pointpool {
            require!(self.pointpools, pointpool, Kind::Pointpool);
        }
        if let Some(statistic) = skill.statistic {
            require!(self.statistics, statistic, Kind::Statistic);
        }
        let id = SkillId(self.next_raw());
        self.skills.insert(id, skill);
        Ok(id)
    }

    /// Store a trait definition. Names are unique.
    pub fn add_trait(&mut self, trait_def: Trait) -> CoreResult<TraitId> {
        Self::validate_name(Kind::Trait, &trait_def.name)?;
        Self::ensure_unique(
            self.traits.values().map(|t| t.name.as_str()),
            Kind::Trait,
            &trait_def.name,
        )?;
        if let Some(category) = trait_def.category {
            require!(self.trait_categories, category, Kind::TraitCategory);
        }
        if let Some(role) = trait_def.role {
            require!(self.roles, role, Kind::Role);
        }
        if let Some(archetype) = trait_def.archetype {
            require!(self.archetypes, archetype, Kind::Archetype);
        }
        if let Some(pointpool) = trait_def.pointpool {
            require!(self.pointpools, pointpool, Kind::Pointpool);
        }
        let id = TraitId(self.next_raw());
        self.traits.insert(id, trait_def);
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Event graph
    // -----------------------------------------------------------------------

    /// Store an event node. Its dice and event links must resolve.
    pub fn add_event(&mut self, event: Event) -> CoreResult<EventId> {
        Self::validate_name(Kind::Event, &event.name)?;
        Self::ensure_unique(
            self.events.values().map(|e| e.name.as_str()),
            Kind::Event,
            &event.name,
        )?;
        if let Some(dice) = event.dice {
            require!(self.dice, dice, Kind::Dice);
        }
        if let Some(reroll) = event.reroll_event {
            require!(self.events, reroll, Kind::Event);
        }
        if let Some(next) = event.next_event {
            require!(self.events, next, Kind::Event);
        }
        let id = EventId(self.next_raw());
        self.events.insert(id, event);
        Ok(id)
    }

    /// Store a concrete event roll.
    pub fn add_event_roll(&mut self, roll: EventRoll) -> CoreResult<EventRollId> {
        require!(self.events, roll.main_event, Kind::Event);
        if let Some(roll_event) = roll.roll_event {
            require!(self.events, roll_event, Kind::Event);
        }
        let id = EventRollId(self.next_raw());
        self.event_rolls.insert(id, roll);
        Ok(id)
    }

    /// Store an NPC progression edge.
    pub fn add_npc_event(&mut self, edge: NpcEvent) -> CoreResult<NpcEventId> {
        require!(self.events, edge.current, Kind::Event);
        require!(self.events, edge.next, Kind::Event);
        let id = NpcEventId(self.next_raw());
        self.npc_events.insert(id, edge);
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Character aggregate
    // -----------------------------------------------------------------------

    /// Store a character. Names are unique.
    pub fn add_character(&mut self, character: Character) -> CoreResult<CharacterId> {
        Self::validate_name(Kind::Character, &character.name)?;
        Self::ensure_unique(
            self.characters.values().map(|c| c.name.as_str()),
            Kind::Character,
            &character.name,
        )?;
        if let Some(system) = character.system {
            require!(self.systems, system, Kind::System);
        }
        if let Some(role) = character.role {
            require!(self.roles, role, Kind::Role);
        }
        if let Some(archetype) = character.archetype {
            require!(self.archetypes, archetype, Kind::Archetype);
        }
        let id = CharacterId(self.next_raw());
        self.characters.insert(id, character);
        Ok(id)
    }

    /// Store a per-character statistic row.
    pub fn add_character_statistic(
        &mut self,
        row: CharacterStatistic,
    ) -> CoreResult<CharacterStatisticId> {
        require!(self.characters, row.character, Kind::Character);
        require!(self.statistics, row.statistic, Kind::Statistic);
        let id = CharacterStatisticId(self.next_raw());
        self.character_statistics.insert(id, row);
        Ok(id)
    }

    /// Store a per-character skill row.
    pub fn add_character_skill(&mut self, row: CharacterSkill) -> CoreResult<CharacterSkillId> {
        require!(self.characters, row.character, Kind::Character);
        require!(self.skills, row.skill, Kind::Skill);
        let id = CharacterSkillId(self.next_raw());
        self.character_skills.insert(id, row);
        Ok(id)
    }

    /// Store a per-character trait row.
    pub fn add_character_trait(&mut self, row: CharacterTrait) -> CoreResult<CharacterTraitId> {
        require!(self.characters, row.character, Kind::Character);
        require!(self.traits, row.trait_def, Kind::Trait);
        let id = CharacterTraitId(self.next_raw());
        self.character_traits.insert(id, row);
        Ok(id)
    }

    /// Store a per-character point pool row.
    pub fn add_character_pointpool(
        &mut self,
        row: CharacterPointpool,
    ) -> CoreResult<CharacterPointpoolId> {
        require!(self.characters, row.character, Kind::Character);
        require!(self.pointpools, row.pointpool, Kind::Pointpool);
        let id = CharacterPointpoolId(self.next_raw());
        self.character_pointpools.insert(id, row);
        Ok(id)
    }

    /// Record an event roll in a character's personal history.
    pub fn add_character_event_roll(
        &mut self,
        row: CharacterEventRoll,
    ) -> CoreResult<CharacterEventRollId> {
        require!(self.characters, row.character, Kind::Character);
        require!(self.event_rolls, row.event_roll, Kind::EventRoll);
        let id = CharacterEventRollId(self.next_raw());
        self.character_event_rolls.insert(id, row);
        Ok(id)
    }

    /// Record an NPC's roll as witnessed by a player character.
    pub fn add_npc_event_roll(&mut self, row: NpcEventRoll) -> CoreResult<NpcEventRollId> {
        require!(self.characters, row.npc, Kind::Character);
        require!(self.characters, row.character, Kind::Character);
        require!(self.event_rolls, row.event_roll, Kind::EventRoll);
        let id = NpcEventRollId(self.next_raw());
        self.npc_event_rolls.insert(id, row);
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Get a dice expression.
    pub fn get_dice(&self, id: DiceId) -> Option<&Dice> {
        self.dice.get(&id)
    }

    /// Get an archetype tag.
    pub fn get_archetype(&self, id: ArchetypeId) -> Option<&Archetype> {
        self.archetypes.get(&id)
    }

    /// Get a role tag.
    pub fn get_role(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }

    /// Get a point pool tag.
    pub fn get_pointpool(&self, id: PointpoolId) -> Option<&Pointpool> {
        self.pointpools.get(&id)
    }

    /// Get a trait category tag.
    pub fn get_trait_category(&self, id: TraitCategoryId) -> Option<&TraitCategory> {
        self.trait_categories.get(&id)
    }

    /// Get a system.
    pub fn get_system(&self, id: SystemId) -> Option<&System> {
        self.systems.get(&id)
    }

    /// Get an operation.
    pub fn get_operation(&self, id: OperationId) -> Option<&Operation> {
        self.operations.get(&id)
    }

    /// Get a statistic definition.
    pub fn get_statistic(&self, id: StatisticId) -> Option<&Statistic> {
        self.statistics.get(&id)
    }

    /// Get a skill definition.
    pub fn get_skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(&id)
    }

    /// Get a trait definition.
    pub fn get_trait(&self, id: TraitId) -> Option<&Trait> {
        self.traits.get(&id)
    }

    /// Get an event node.
    pub fn get_event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Get an event roll.
    pub fn get_event_roll(&self, id: EventRollId) -> Option<&EventRoll> {
        self.event_rolls.get(&id)
    }

    /// Get a mutable event roll, e.g. to attach outcome text.
    pub fn get_event_roll_mut(&mut self, id: EventRollId) -> Option<&mut EventRoll> {
        self.event_rolls.get_mut(&id)
    }

    /// Get an NPC progression edge.
    pub fn get_npc_event(&self, id: NpcEventId) -> Option<&NpcEvent> {
        self.npc_events.get(&id)
    }

    /// Get a character.
    pub fn get_character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Get a per-character statistic row.
    pub fn get_character_statistic(&self, id: CharacterStatisticId) -> Option<&CharacterStatistic> {
        self.character_statistics.get(&id)
    }

    /// Get a mutable per-character statistic row, e.g. to adjust its value.
    pub fn get_character_statistic_mut(
        &mut self,
        id: CharacterStatisticId,
    ) -> Option<&mut CharacterStatistic> {
        self.character_statistics.get_mut(&id)
    }

    /// Get a per-character skill row.
    pub fn get_character_skill(&self, id: CharacterSkillId) -> Option<&CharacterSkill> {
        self.character_skills.get(&id)
    }

    /// Get a per-character trait row.
    pub fn get_character_trait(&self, id: CharacterTraitId) -> Option<&CharacterTrait> {
        self.character_traits.get(&id)
    }

    /// Get a per-character point pool row.
    pub fn get_character_pointpool(&self, id: CharacterPointpoolId) -> Option<&CharacterPointpool> {
        self.character_pointpools.get(&id)
    }

    /// Get a mutable per-character point pool row, e.g. to spend points.
    pub fn get_character_pointpool_mut(
        &mut self,
        id: CharacterPointpoolId,
    ) -> Option<&mut CharacterPointpool> {
        self.character_pointpools.get_mut(&id)
    }

    /// Get a character event-history row.
    pub fn get_character_event_roll(&self, id: CharacterEventRollId) -> Option<&CharacterEventRoll> {
        self.character_event_rolls.get(&id)
    }

    /// Get an NPC event-history row.
    pub fn get_npc_event_roll(&self, id: NpcEventRollId) -> Option<&NpcEventRoll> {
        self.npc_event_rolls.get(&id)
    }

    /// Iterate over all systems.
    pub fn systems(&self) -> impl Iterator<Item = (SystemId, &System)> {
        self.systems.iter().map(|(id, s)| (*id, s))
    }

    /// Iterate over all operations.
    pub fn operations(&self) -> impl Iterator<Item = (OperationId, &Operation)> {
        self.operations.iter().map(|(id, o)| (*id, o))
    }

    /// Iterate over all events.
    pub fn events(&self) -> impl Iterator<Item = (EventId, &Event)> {
        self.events.iter().map(|(id, e)| (*id, e))
    }

    /// Iterate over all NPC progression edges.
    pub fn npc_events(&self) -> impl Iterator<Item = (NpcEventId, &NpcEvent)> {
        self.npc_events.iter().map(|(id, e)| (*id, e))
    }

    /// Iterate over all characters.
    pub fn characters(&self) -> impl Iterator<Item = (CharacterId, &Character)> {
        self.characters.iter().map(|(id, c)| (*id, c))
    }

    // -----------------------------------------------------------------------
    // Cascade deletion
    // -----------------------------------------------------------------------

    /// Remove a dice expression and every event rolled with it.
    pub fn remove_dice(&mut self, id: DiceId) -> CoreResult<Dice> {
        let dice = self
            .dice
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Dice, id.0))?;
        for event in matching_keys(&self.events, |e| e.dice == Some(id)) {
            let _ = self.remove_event(event);
        }
        Ok(dice)
    }

    /// Remove an archetype and every row that references it.
    pub fn remove_archetype(&mut self, id: ArchetypeId) -> CoreResult<Archetype> {
        let archetype = self
            .archetypes
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Archetype, id.0))?;
        for key in matching_keys(&self.statistics, |s| s.archetype == Some(id)) {
            let _ = self.remove_statistic(key);
        }
        for key in matching_keys(&self.skills, |s| s.archetype == Some(id)) {
            let _ = self.remove_skill(key);
        }
        for key in matching_keys(&self.traits, |t| t.archetype == Some(id)) {
            let _ = self.remove_trait(key);
        }
        for key in matching_keys(&self.characters, |c| c.archetype == Some(id)) {
            let _ = self.remove_character(key);
        }
        Ok(archetype)
    }

    /// Remove a role and every row that references it.
    pub fn remove_role(&mut self, id: RoleId) -> CoreResult<Role> {
        let role = self
            .roles
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Role, id.0))?;
        for key in matching_keys(&self.statistics, |s| s.role == Some(id)) {
            let _ = self.remove_statistic(key);
        }
        for key in matching_keys(&self.skills, |s| s.role == Some(id)) {
            let _ = self.remove_skill(key);
        }
        for key in matching_keys(&self.traits, |t| t.role == Some(id)) {
            let _ = self.remove_trait(key);
        }
        for key in matching_keys(&self.characters, |c| c.role == Some(id)) {
            let _ = self.remove_character(key);
        }
        Ok(role)
    }

    /// Remove a point pool and every row that references it.
    pub fn remove_pointpool(&mut self, id: PointpoolId) -> CoreResult<Pointpool> {
        let pool = self
            .pointpools
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Pointpool, id.0))?;
        for key in matching_keys(&self.statistics, |s| s.pointpool == Some(id)) {
            let _ = self.remove_statistic(key);
        }
        for key in matching_keys(&self.skills, |s| s.pointpool == Some(id)) {
            let _ = self.remove_skill(key);
        }
        for key in matching_keys(&self.traits, |t| t.pointpool == Some(id)) {
            let _ = self.remove_trait(key);
        }
        for key in matching_keys(&self.character_pointpools, |p| p.pointpool == id) {
            self.character_pointpools.remove(&key);
        }
        Ok(pool)
    }

    /// Remove a trait category and every trait grouped under it.
    pub fn remove_trait_category(&mut self, id: TraitCategoryId) -> CoreResult<TraitCategory> {
        let category = self
            .trait_categories
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::TraitCategory, id.0))?;
        for key in matching_keys(&self.traits, |t| t.category == Some(id)) {
            let _ = self.remove_trait(key);
        }
        Ok(category)
    }

    /// Remove a system, its operation chain, and its characters.
    pub fn remove_system(&mut self, id: SystemId) -> CoreResult<System> {
        let system = self
            .systems
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::System, id.0))?;
        for key in matching_keys(&self.operations, |o| o.system == Some(id)) {
            let _ = self.remove_operation(key);
        }
        for key in matching_keys(&self.characters, |c| c.system == Some(id)) {
            let _ = self.remove_character(key);
        }
        Ok(system)
    }

    /// Remove an operation and every operation chained after it.
    pub fn remove_operation(&mut self, id: OperationId) -> CoreResult<Operation> {
        let operation = self
            .operations
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Operation, id.0))?;
        for key in matching_keys(&self.operations, |o| o.previous == Some(id)) {
            let _ = self.remove_operation(key);
        }
        Ok(operation)
    }

    /// Remove a statistic, the skills it governs, and its character rows.
    pub fn remove_statistic(&mut self, id: StatisticId) -> CoreResult<Statistic> {
        let statistic = self
            .statistics
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Statistic, id.0))?;
        for key in matching_keys(&self.skills, |s| s.statistic == Some(id)) {
            let _ = self.remove_skill(key);
        }
        for key in matching_keys(&self.character_statistics, |r| r.statistic == id) {
            self.character_statistics.remove(&key);
        }
        Ok(statistic)
    }

    /// Remove a skill and its character rows.
    pub fn remove_skill(&mut self, id: SkillId) -> CoreResult<Skill> {
        let skill = self
            .skills
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Skill, id.0))?;
        for key in matching_keys(&self.character_skills, |r| r.skill == id) {
            self.character_skills.remove(&key);
        }
        Ok(skill)
    }

    /// Remove a trait and its character rows.
    pub fn remove_trait(&mut self, id: TraitId) -> CoreResult<Trait> {
        let trait_def = self
            .traits
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Trait, id.0))?;
        for key in matching_keys(&self.character_traits, |r| r.trait_def == id) {
            self.character_traits.remove(&key);
        }
        Ok(trait_def)
    }

    /// Remove an event, the events linked to it, its rolls, and its NPC edges.
    pub fn remove_event(&mut self, id: EventId) -> CoreResult<Event> {
        let event = self
            .events
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Event, id.0))?;
        // Removing the row first keeps link cycles from recursing forever.
        for key in matching_keys(&self.events, |e| {
            e.reroll_event == Some(id) || e.next_event == Some(id)
        }) {
            let _ = self.remove_event(key);
        }
        for key in matching_keys(&self.event_rolls, |r| {
            r.main_event == id || r.roll_event == Some(id)
        }) {
            let _ = self.remove_event_roll(key);
        }
        for key in matching_keys(&self.npc_events, |e| e.current == id || e.next == id) {
            self.npc_events.remove(&key);
        }
        Ok(event)
    }

    /// Remove an event roll and the history rows that recorded it.
    pub fn remove_event_roll(&mut self, id: EventRollId) -> CoreResult<EventRoll> {
        let roll = self
            .event_rolls
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::EventRoll, id.0))?;
        for key in matching_keys(&self.character_event_rolls, |r| r.event_roll == id) {
            self.character_event_rolls.remove(&key);
        }
        for key in matching_keys(&self.npc_event_rolls, |r| r.event_roll == id) {
            self.npc_event_rolls.remove(&key);
        }
        Ok(roll)
    }

    /// Remove an NPC progression edge.
    pub fn remove_npc_event(&mut self, id: NpcEventId) -> CoreResult<NpcEvent> {
        self.npc_events
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::NpcEvent, id.0))
    }

    /// Remove a character and all of its rows.
    pub fn remove_character(&mut self, id: CharacterId) -> CoreResult<Character> {
        let character = self
            .characters
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Character, id.0))?;
        for key in matching_keys(&self.character_statistics, |r| r.character == id) {
            self.character_statistics.remove(&key);
        }
        for key in matching_keys(&self.character_skills, |r| r.character == id) {
            self.character_skills.remove(&key);
        }
        for key in matching_keys(&self.character_traits, |r| r.character == id) {
            self.character_traits.remove(&key);
        }
        for key in matching_keys(&self.character_pointpools, |r| r.character == id) {
            self.character_pointpools.remove(&key);
        }
        for key in matching_keys(&self.character_event_rolls, |r| r.character == id) {
            self.character_event_rolls.remove(&key);
        }
        for key in matching_keys(&self.npc_event_rolls, |r| {
            r.npc == id || r.character == id
        }) {
            self.npc_event_rolls.remove(&key);
        }
        Ok(character)
    }

    // -----------------------------------------------------------------------
    // Labels
    // -----------------------------------------------------------------------

    /// The display label of a character, with its archetype/role prefix.
    pub fn label_character(&self, id: CharacterId) -> CoreResult<String> {
        let character = self
            .characters
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Character, id.0))?;
        let archetype = character
            .archetype
            .and_then(|a| self.archetypes.get(&a))
            .map(|a| a.name.as_str());
        let role = character
            .role
            .and_then(|r| self.roles.get(&r))
            .map(|r| r.name.as_str());
        Ok(display::character_label(&character.name, archetype, role))
    }

    /// The display label of a skill definition.
    pub fn label_skill(&self, id: SkillId) -> CoreResult<String> {
        let skill = self
            .skills
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::Skill, id.0))?;
        let statistic = skill
            .statistic
            .and_then(|s| self.statistics.get(&s))
            .map(|s| s.name.as_str());
        let role = skill
            .role
            .and_then(|r| self.roles.get(&r))
            .map(|r| r.name.as_str());
        Ok(display::skill_label(&skill.name, statistic, role))
    }

    /// The display label of an event roll.
    pub fn label_event_roll(&self, id: EventRollId) -> CoreResult<String> {
        let roll = self
            .event_rolls
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::EventRoll, id.0))?;
        let main = self
            .events
            .get(&roll.main_event)
            .ok_or_else(|| CoreError::not_found(Kind::Event, roll.main_event.0))?;
        let roll_event = roll
            .roll_event
            .and_then(|e| self.events.get(&e))
            .map(|e| e.name.as_str());
        Ok(display::event_roll_label(
            &main.name,
            roll.roll,
            roll.outcome.as_deref(),
            roll_event,
        ))
    }

    /// The display label of a character event-history row: the roll's label.
    pub fn label_character_event_roll(&self, id: CharacterEventRollId) -> CoreResult<String> {
        let row = self
            .character_event_rolls
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::CharacterEventRoll, id.0))?;
        self.label_event_roll(row.event_roll)
    }

    /// The display label of an NPC event-history row: the roll's label.
    pub fn label_npc_event_roll(&self, id: NpcEventRollId) -> CoreResult<String> {
        let row = self
            .npc_event_rolls
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::NpcEventRoll, id.0))?;
        self.label_event_roll(row.event_roll)
    }

    /// The display label of an NPC progression edge.
    pub fn label_npc_event(&self, id: NpcEventId) -> CoreResult<String> {
        let edge = self
            .npc_events
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::NpcEvent, id.0))?;
        let current = self
            .events
            .get(&edge.current)
            .ok_or_else(|| CoreError::not_found(Kind::Event, edge.current.0))?;
        let next = self
            .events
            .get(&edge.next)
            .ok_or_else(|| CoreError::not_found(Kind::Event, edge.next.0))?;
        Ok(display::npc_event_label(&current.name, &next.name))
    }

    /// The display label of a per-character statistic row.
    pub fn label_character_statistic(&self, id: CharacterStatisticId) -> CoreResult<String> {
        let row = self
            .character_statistics
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::CharacterStatistic, id.0))?;
        let statistic = self
            .statistics
            .get(&row.statistic)
            .ok_or_else(|| CoreError::not_found(Kind::Statistic, row.statistic.0))?;
        Ok(display::character_statistic_label(
            &statistic.name,
            statistic.cost,
            row.current,
        ))
    }

    /// The display label of a per-character skill row.
    pub fn label_character_skill(&self, id: CharacterSkillId) -> CoreResult<String> {
        let row = self
            .character_skills
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::CharacterSkill, id.0))?;
        let skill = self
            .skills
            .get(&row.skill)
            .ok_or_else(|| CoreError::not_found(Kind::Skill, row.skill.0))?;
        let statistic = skill
            .statistic
            .and_then(|s| self.statistics.get(&s))
            .map(|s| s.name.as_str());
        let role = skill
            .role
            .and_then(|r| self.roles.get(&r))
            .map(|r| r.name.as_str());
        Ok(display::character_skill_label(
            &skill.name,
            skill.cost,
            row.current,
            statistic,
            role,
        ))
    }

    /// The display label of a per-character trait row.
    pub fn label_character_trait(&self, id: CharacterTraitId) -> CoreResult<String> {
        let row = self
            .character_traits
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::CharacterTrait, id.0))?;
        let trait_def = self
            .traits
            .get(&row.trait_def)
            .ok_or_else(|| CoreError::not_found(Kind::Trait, row.trait_def.0))?;
        let category = trait_def
            .category
            .and_then(|c| self.trait_categories.get(&c))
            .map(|c| c.name.as_str());
        Ok(display::character_trait_label(
            &trait_def.name,
            trait_def.cost,
            row.current,
            category,
        ))
    }

    /// The display label of a per-character point pool row.
    pub fn label_character_pointpool(&self, id: CharacterPointpoolId) -> CoreResult<String> {
        let row = self
            .character_pointpools
            .get(&id)
            .ok_or_else(|| CoreError::not_found(Kind::CharacterPointpool, id.0))?;
        let pool = self
            .pointpools
            .get(&row.pointpool)
            .ok_or_else(|| CoreError::not_found(Kind::Pointpool, row.pointpool.0))?;
        Ok(display::character_pointpool_label(
            &pool.name,
            row.current,
            row.total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OperationKind;

    fn seeded() -> (Compendium, SystemId, RoleId, ArchetypeId) {
        let mut comp = Compendium::new();
        let system = comp.add_system(System::new("Starfall")).unwrap();
        let role = comp.add_role("Medic").unwrap();
        let archetype = comp.add_archetype("Veteran").unwrap();
        (comp, system, role, archetype)
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut comp = Compendium::new();
        let a = comp.add_role("Medic").unwrap();
        let b = comp.add_role("Scout").unwrap();
        assert_eq!(a.0, 1);
        assert_eq!(b.0, 2);

        comp.remove_role(b).unwrap();
        let c = comp.add_role("Sniper").unwrap();
        assert_eq!(c.0, 3);
    }

    #[test]
    fn duplicate_names_rejected_where_unique() {
        let mut comp = Compendium::new();
        comp.add_role("Medic").unwrap();
        assert!(matches!(
            comp.add_role("Medic"),
            Err(CoreError::DuplicateName { .. })
        ));

        // Skill names are not unique.
        comp.add_skill(Skill::new("First Aid")).unwrap();
        assert!(comp.add_skill(Skill::new("First Aid")).is_ok());
    }

    #[test]
    fn empty_names_rejected() {
        let mut comp = Compendium::new();
        assert!(comp.add_role("").is_err());
        assert!(comp.add_character(Character::new("")).is_err());
        assert!(comp.add_system(System::new("")).is_err());
    }

    #[test]
    fn dangling_references_rejected() {
        let mut comp = Compendium::new();
        let mut statistic = Statistic::new("Brawn");
        statistic.role = Some(RoleId(99));
        assert!(matches!(
            comp.add_statistic(statistic),
            Err(CoreError::NotFound { .. })
        ));

        let mut character = Character::new("Joe");
        character.system = Some(SystemId(99));
        assert!(comp.add_character(character).is_err());
    }

    #[test]
    fn invalid_dice_rejected_at_insert() {
        let mut comp = Compendium::new();
        let bad = Dice {
            quantity: 0,
            sides: 6,
            offset: 0,
            label: None,
        };
        assert!(comp.add_dice(bad).is_err());
    }

    #[test]
    fn removing_role_cascades_to_catalog_and_characters() {
        let (mut comp, system, role, _) = seeded();

        let mut statistic = Statistic::new("Brawn");
        statistic.role = Some(role);
        let statistic = comp.add_statistic(statistic).unwrap();

        let mut character = Character::new("Joe");
        character.system = Some(system);
        character.role = Some(role);
        let character = comp.add_character(character).unwrap();

        let row = comp
            .add_character_statistic(CharacterStatistic {
                character,
                statistic,
                current: 3,
                minimum: None,
                maximum: None,
            })
            .unwrap();

        comp.remove_role(role).unwrap();

        assert!(comp.get_statistic(statistic).is_none());
        assert!(comp.get_character(character).is_none());
        assert!(comp.get_character_statistic(row).is_none());
        // The system survives: it does not reference the role.
        assert!(comp.get_system(system).is_some());
    }

    #[test]
    fn removing_statistic_cascades_to_governed_skills() {
        let mut comp = Compendium::new();
        let statistic = comp.add_statistic(Statistic::new("Wits")).unwrap();
        let mut skill = Skill::new("First Aid");
        skill.statistic = Some(statistic);
        let skill = comp.add_skill(skill).unwrap();

        comp.remove_statistic(statistic).unwrap();
        assert!(comp.get_skill(skill).is_none());
    }

    #[test]
    fn removing_system_removes_operation_chain() {
        let (mut comp, system, _, _) = seeded();
        let head = comp
            .add_operation(Operation::new(OperationKind::Name, "Name", Some(system)))
            .unwrap();
        let tail = comp
            .add_operation(Operation::after(
                OperationKind::Select,
                "Role",
                head,
                Some(system),
            ))
            .unwrap();

        comp.remove_system(system).unwrap();
        assert!(comp.get_operation(head).is_none());
        assert!(comp.get_operation(tail).is_none());
    }

    #[test]
    fn removing_operation_removes_chained_successors() {
        let (mut comp, system, _, _) = seeded();
        let head = comp
            .add_operation(Operation::new(OperationKind::Name, "", Some(system)))
            .unwrap();
        let mid = comp
            .add_operation(Operation::after(OperationKind::Select, "", head, Some(system)))
            .unwrap();
        let tail = comp
            .add_operation(Operation::after(OperationKind::Spend, "", mid, Some(system)))
            .unwrap();

        comp.remove_operation(mid).unwrap();
        assert!(comp.get_operation(head).is_some());
        assert!(comp.get_operation(tail).is_none());
    }

    #[test]
    fn removing_event_cascades_through_graph() {
        let mut comp = Compendium::new();
        let dice = comp.add_dice(Dice::new(1, 6, 0).unwrap()).unwrap();

        let ambush = comp.add_event(Event::new("Ambush")).unwrap();
        let mut retreat = Event::new("Retreat");
        retreat.dice = Some(dice);
        retreat.next_event = Some(ambush);
        let retreat = comp.add_event(retreat).unwrap();

        let roll = comp
            .add_event_roll(EventRoll::new(ambush, 4))
            .unwrap();
        let edge = comp
            .add_npc_event(NpcEvent {
                current: ambush,
                next: retreat,
            })
            .unwrap();

        comp.remove_event(ambush).unwrap();

        // Retreat linked to Ambush via next_event, so it cascades too.
        assert!(comp.get_event(retreat).is_none());
        assert!(comp.get_event_roll(roll).is_none());
        assert!(comp.get_npc_event(edge).is_none());
    }

    #[test]
    fn removing_dice_removes_events_rolled_with_it() {
        let mut comp = Compendium::new();
        let dice = comp.add_dice(Dice::new(2, 6, 0).unwrap()).unwrap();
        let mut event = Event::new("Ambush");
        event.dice = Some(dice);
        let event = comp.add_event(event).unwrap();

        comp.remove_dice(dice).unwrap();
        assert!(comp.get_event(event).is_none());
    }

    #[test]
    fn removing_character_removes_owned_rows() {
        let (mut comp, system, role, _) = seeded();
        let pool = comp.add_pointpool("XP").unwrap();

        let mut character = Character::new("Joe");
        character.system = Some(system);
        character.role = Some(role);
        let character = comp.add_character(character).unwrap();
        let witness = comp.add_character(Character::new("Anna")).unwrap();

        let pool_row = comp
            .add_character_pointpool(CharacterPointpool {
                character,
                pointpool: pool,
                current: 3,
                total: 10,
            })
            .unwrap();

        let event = comp.add_event(Event::new("Ambush")).unwrap();
        let roll = comp.add_event_roll(EventRoll::new(event, 4)).unwrap();
        let npc_row = comp
            .add_npc_event_roll(NpcEventRoll {
                npc: character,
                character: witness,
                event_roll: roll,
            })
            .unwrap();

        comp.remove_character(character).unwrap();

        assert!(comp.get_character_pointpool(pool_row).is_none());
        assert!(comp.get_npc_event_roll(npc_row).is_none());
        // The roll itself is shared history and survives.
        assert!(comp.get_event_roll(roll).is_some());
        assert!(comp.get_character(witness).is_some());
    }

    #[test]
    fn label_character_resolves_tags() {
        let (mut comp, system, role, archetype) = seeded();
        let mut character = Character::new("Joe");
        character.system = Some(system);
        character.role = Some(role);
        character.archetype = Some(archetype);
        let id = comp.add_character(character).unwrap();

        assert_eq!(comp.label_character(id).unwrap(), "[Veteran Medic] Joe");
    }

    #[test]
    fn label_character_treats_none_tag_as_absent() {
        let mut comp = Compendium::new();
        let none_archetype = comp.add_archetype("none").unwrap();
        let role = comp.add_role("Medic").unwrap();
        let mut character = Character::new("Joe");
        character.archetype = Some(none_archetype);
        character.role = Some(role);
        let id = comp.add_character(character).unwrap();

        assert_eq!(comp.label_character(id).unwrap(), "[Medic] Joe");
    }

    #[test]
    fn label_event_roll_resolves_events() {
        let mut comp = Compendium::new();
        let ambush = comp.add_event(Event::new("Ambush")).unwrap();
        let retreat = comp.add_event(Event::new("Retreat")).unwrap();

        let mut roll = EventRoll::new(ambush, 4);
        roll.roll_event = Some(retreat);
        let id = comp.add_event_roll(roll).unwrap();
        assert_eq!(comp.label_event_roll(id).unwrap(), "Ambush (4) -> Retreat");

        comp.get_event_roll_mut(id).unwrap().outcome = Some("you are wounded".to_string());
        assert_eq!(
            comp.label_event_roll(id).unwrap(),
            "Ambush (4): you are wounded"
        );
    }

    #[test]
    fn label_character_rows() {
        let (mut comp, _, role, _) = seeded();
        let pool = comp.add_pointpool("XP").unwrap();
        let statistic = comp.add_statistic(Statistic::new("Wits")).unwrap();

        let mut skill = Skill::new("First Aid");
        skill.cost = 2;
        skill.role = Some(role);
        let skill = comp.add_skill(skill).unwrap();

        let character = comp.add_character(Character::new("Joe")).unwrap();

        let skill_row = comp
            .add_character_skill(CharacterSkill {
                character,
                skill,
                current: 4,
                minimum: Some(0),
                maximum: Some(10),
            })
            .unwrap();
        assert_eq!(
            comp.label_character_skill(skill_row).unwrap(),
            "[Medic] First Aid (2): 4"
        );

        let stat_row = comp
            .add_character_statistic(CharacterStatistic {
                character,
                statistic,
                current: 12,
                minimum: None,
                maximum: None,
            })
            .unwrap();
        assert_eq!(
            comp.label_character_statistic(stat_row).unwrap(),
            "Wits (0): 12"
        );

        let pool_row = comp
            .add_character_pointpool(CharacterPointpool {
                character,
                pointpool: pool,
                current: 3,
                total: 10,
            })
            .unwrap();
        assert_eq!(
            comp.label_character_pointpool(pool_row).unwrap(),
            "XP: 3/10"
        );
    }

    #[test]
    fn label_npc_event_and_history() {
        let mut comp = Compendium::new();
        let patrol = comp.add_event(Event::new("Patrol")).unwrap();
        let alarm = comp.add_event(Event::new("Alarm")).unwrap();
        let edge = comp
            .add_npc_event(NpcEvent {
                current: patrol,
                next: alarm,
            })
            .unwrap();
        assert_eq!(comp.label_npc_event(edge).unwrap(), "Patrol -> Alarm");

        let character = comp.add_character(Character::new("Joe")).unwrap();
        let roll = comp.add_event_roll(EventRoll::new(patrol, 2)).unwrap();
        let history = comp
            .add_character_event_roll(CharacterEventRoll {
                character,
                event_roll: roll,
            })
            .unwrap();
        assert_eq!(
            comp.label_character_event_roll(history).unwrap(),
            "Patrol (2)"
        );
    }
}
