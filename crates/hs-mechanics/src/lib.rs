//! Dice rolling and event resolution.
//!
//! This crate turns the static event graph in [`hs_core`] into concrete
//! outcomes: rolling dice expressions, resolving events into
//! [`hs_core::EventRoll`] rows, rerolling along `reroll_event` links, and
//! stepping NPCs along their progression edges. All randomness flows
//! through a caller-supplied [`rand::rngs::StdRng`] so outcomes are
//! reproducible from a seed.

pub mod error;
pub mod resolve;
pub mod roll;

pub use error::{MechError, MechResult};
pub use resolve::{npc_next, reroll, resolve};
pub use roll::roll;
