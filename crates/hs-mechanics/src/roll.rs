//! Rolling dice expressions.

use hs_core::Dice;
use rand::rngs::StdRng;
use rand::Rng;

/// Roll a dice expression: the offset plus `quantity` uniform draws
/// from `1..=sides`.
pub fn roll(dice: &Dice, rng: &mut StdRng) -> i64 {
    let mut total = i64::from(dice.offset);
    for _ in 0..dice.quantity {
        total += i64::from(rng.random_range(1..=dice.sides));
    }
    total
}
