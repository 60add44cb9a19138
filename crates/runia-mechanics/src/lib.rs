//! Dice engine and effect banding for the Runia battle system.
//!
//! Provides polyhedral dice, exploding rolls with advantage and
//! disadvantage, and the banding arithmetic that turns a raw roll into
//! applied damage or healing. Randomness enters only through the
//! [`DieRoller`] seam, so every caller can be driven deterministically.

pub mod dice;
pub mod effect;

pub use dice::{Die, DieRoller, RandomRoller, ScriptedRoller, explode_roll, roll, rolls};
pub use effect::{Effect, damage_effect, healing_effect};
