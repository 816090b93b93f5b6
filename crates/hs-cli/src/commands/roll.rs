//! `hs roll`: roll a dice expression from the command line.

use hs_core::Dice;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Parse and roll `expr`, seeding the generator when asked.
pub fn run(expr: &str, seed: Option<u64>) -> Result<(), String> {
    let dice = Dice::parse(expr).map_err(|err| err.to_string())?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let total = hs_mechanics::roll(&dice, &mut rng);
    println!("{dice} = {total}");
    Ok(())
}
