//! The canonical human-readable labels for list views.
//!
//! Entities whose label depends on rows they reference get a pure function
//! here, taking the already-resolved names. [`crate::Compendium`] exposes
//! `label_*` conveniences that do the resolution. Self-contained entities
//! implement `Display` directly next to their definition.
//!
//! A linked archetype, role, or statistic literally named `"none"` counts
//! as absent for bracketed prefixes.

/// Label for a character: `[Archetype Role] Name` with fallbacks.
pub fn character_label(name: &str, archetype: Option<&str>, role: Option<&str>) -> String {
    let archetype = archetype.filter(|a| *a != "none");
    let role = role.filter(|r| *r != "none");
    match (archetype, role) {
        (Some(a), Some(r)) => format!("[{a} {r}] {name}"),
        (None, Some(r)) => format!("[{r}] {name}"),
        (Some(a), None) => format!("[{a}] {name}"),
        (None, None) => name.to_string(),
    }
}

/// Label for a skill definition. Prefers the governing statistic's
/// qualifier over the role's when both are present.
pub fn skill_label(name: &str, statistic: Option<&str>, role: Option<&str>) -> String {
    if let Some(s) = statistic.filter(|s| *s != "none") {
        format!("[{s}] {name}")
    } else if let Some(r) = role.filter(|r| *r != "none") {
        format!("[{r}] {name}")
    } else {
        name.to_string()
    }
}

/// Label for an event roll against its main event.
pub fn event_roll_label(
    main_event: &str,
    roll: i64,
    outcome: Option<&str>,
    roll_event: Option<&str>,
) -> String {
    if let Some(outcome) = outcome {
        format!("{main_event} ({roll}): {outcome}")
    } else if let Some(next) = roll_event {
        format!("{main_event} ({roll}) -> {next}")
    } else {
        format!("{main_event} ({roll})")
    }
}

/// Label for a per-character statistic row.
pub fn character_statistic_label(statistic: &str, cost: i32, current: i32) -> String {
    format!("{statistic} ({cost}): {current}")
}

/// Label for a per-character skill row.
///
/// Unlike [`skill_label`], the qualifier here is presence-only: a linked
/// statistic or role named `"none"` still shows.
pub fn character_skill_label(
    skill: &str,
    cost: i32,
    current: i32,
    statistic: Option<&str>,
    role: Option<&str>,
) -> String {
    if let Some(s) = statistic {
        format!("[{s}] {skill} ({cost}): {current}")
    } else if let Some(r) = role {
        format!("[{r}] {skill} ({cost}): {current}")
    } else {
        format!("{skill} ({cost}): {current}")
    }
}

/// Label for a per-character trait row.
pub fn character_trait_label(
    trait_name: &str,
    cost: i32,
    current: i32,
    category: Option<&str>,
) -> String {
    if let Some(c) = category {
        format!("[{c}] {trait_name} ({cost}): {current}")
    } else {
        format!("{trait_name} ({cost}): {current}")
    }
}

/// Label for a per-character point pool row.
pub fn character_pointpool_label(pointpool: &str, current: i32, total: i32) -> String {
    format!("{pointpool}: {current}/{total}")
}

/// Label for an NPC progression edge.
pub fn npc_event_label(current: &str, next: &str) -> String {
    format!("{current} -> {next}")
}
