//! Sources of die rolls.
//!
//! The engine never reaches for a global RNG. Everything that needs
//! randomness takes a [`DieRoller`], so a battle can be replayed from a
//! seed or driven from a scripted sequence in tests.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::Die;

/// A source of individual die rolls and uniform index picks.
pub trait DieRoller {
    /// Roll one die, producing a uniform value in `[1, sides]`.
    fn roll_die(&mut self, die: Die) -> u32;

    /// Pick a uniform index in `[0, len)`.
    ///
    /// `len` must be nonzero; picking from an empty range is a
    /// programmer error and implementations may panic.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// The production roller, backed by a seedable PRNG.
#[derive(Debug)]
pub struct RandomRoller {
    rng: StdRng,
}

impl RandomRoller {
    /// Create a roller seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a roller with a fixed seed for reproducible sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DieRoller for RandomRoller {
    fn roll_die(&mut self, die: Die) -> u32 {
        self.rng.random_range(1..=die.sides())
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// A roller that replays a fixed sequence of values.
///
/// `roll_die` pops the next value and clamps it to the die's face range;
/// `pick_index` pops the next value and reduces it modulo `len`. Panics
/// when the script runs dry, which in a test marks a miscounted script
/// rather than a runtime condition worth recovering from.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    values: VecDeque<u32>,
}

impl ScriptedRoller {
    /// Create a roller that will replay `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// How many scripted values remain unconsumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn next(&mut self) -> u32 {
        self.values
            .pop_front()
            .expect("scripted roller ran out of values")
    }
}

impl DieRoller for ScriptedRoller {
    fn roll_die(&mut self, die: Die) -> u32 {
        self.next().clamp(1, die.sides())
    }

    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index from an empty range");
        self.next() as usize % len
    }
}
