//! Turning event-graph nodes into recorded rolls.

use hs_core::{Compendium, EventId, EventRoll};
use rand::rngs::StdRng;

use crate::error::{MechError, MechResult};
use crate::roll::roll;

/// Resolve an event into a fresh [`EventRoll`].
///
/// Events without dice resolve to a roll of 0; they exist for their text
/// and links, not for a random outcome.
pub fn resolve(compendium: &Compendium, event_id: EventId, rng: &mut StdRng) -> MechResult<EventRoll> {
    let event = compendium
        .get_event(event_id)
        .ok_or(MechError::EventNotFound(event_id))?;
    let value = match event.dice {
        Some(dice_id) => {
            let dice = compendium
                .get_dice(dice_id)
                .ok_or(MechError::DiceNotFound(dice_id))?;
            roll(dice, rng)
        }
        None => 0,
    };
    Ok(EventRoll::new(event_id, value))
}

/// Reroll a previous outcome by resolving its main event's reroll target.
///
/// The new roll carries a `reroll_count` one higher than the roll it
/// replaces.
pub fn reroll(
    compendium: &Compendium,
    previous: &EventRoll,
    rng: &mut StdRng,
) -> MechResult<EventRoll> {
    let main = compendium
        .get_event(previous.main_event)
        .ok_or(MechError::EventNotFound(previous.main_event))?;
    let target = main
        .reroll_event
        .ok_or(MechError::NoRerollTarget(previous.main_event))?;
    let mut next = resolve(compendium, target, rng)?;
    next.reroll_count = previous.reroll_count + 1;
    Ok(next)
}

/// Where an NPC at `current` moves next, if a progression edge exists.
pub fn npc_next(compendium: &Compendium, current: EventId) -> Option<EventId> {
    compendium
        .npc_events()
        .find(|(_, edge)| edge.current == current)
        .map(|(_, edge)| edge.next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::{Dice, Event, NpcEvent};
    use rand::SeedableRng;

    fn graph() -> (Compendium, EventId, EventId) {
        let mut comp = Compendium::new();
        let dice = comp.add_dice(Dice::new(2, 6, 0).unwrap()).unwrap();

        let mut fallback = Event::new("Retreat");
        fallback.dice = Some(dice);
        let fallback = comp.add_event(fallback).unwrap();

        let mut ambush = Event::new("Ambush");
        ambush.dice = Some(dice);
        ambush.reroll_event = Some(fallback);
        let ambush = comp.add_event(ambush).unwrap();

        (comp, ambush, fallback)
    }

    #[test]
    fn resolve_rolls_within_dice_bounds() {
        let (comp, ambush, _) = graph();
        let mut rng = StdRng::seed_from_u64(1);
        let roll = resolve(&comp, ambush, &mut rng).unwrap();
        assert_eq!(roll.main_event, ambush);
        assert_eq!(roll.reroll_count, 1);
        assert!(!roll.selection);
        assert!((2..=12).contains(&roll.roll));
    }

    #[test]
    fn resolve_without_dice_rolls_zero() {
        let mut comp = Compendium::new();
        let quiet = comp.add_event(Event::new("Quiet day")).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let roll = resolve(&comp, quiet, &mut rng).unwrap();
        assert_eq!(roll.roll, 0);
    }

    #[test]
    fn resolve_unknown_event_fails() {
        let comp = Compendium::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            resolve(&comp, hs_core::EventId(42), &mut rng),
            Err(MechError::EventNotFound(hs_core::EventId(42)))
        );
    }

    #[test]
    fn reroll_targets_reroll_event_and_counts_up() {
        let (comp, ambush, fallback) = graph();
        let mut rng = StdRng::seed_from_u64(5);

        let first = resolve(&comp, ambush, &mut rng).unwrap();
        let second = reroll(&comp, &first, &mut rng).unwrap();
        assert_eq!(second.main_event, fallback);
        assert_eq!(second.reroll_count, 2);

        let third = reroll(&comp, &second, &mut rng);
        // The fallback has no reroll target of its own.
        assert_eq!(third, Err(MechError::NoRerollTarget(fallback)));
    }

    #[test]
    fn npc_next_follows_the_edge() {
        let (mut comp, ambush, fallback) = graph();
        comp.add_npc_event(NpcEvent {
            current: ambush,
            next: fallback,
        })
        .unwrap();

        assert_eq!(npc_next(&comp, ambush), Some(fallback));
        assert_eq!(npc_next(&comp, fallback), None);
    }
}
