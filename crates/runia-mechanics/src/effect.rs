//! Banding of raw rolls into applied damage or healing.
//!
//! Every roll carries a baked-in d20 check (see [`crate::dice::roll`]).
//! Banding subtracts a flat 10 back out and floors any connecting hit at
//! 3, which turns "attack roll" semantics into a pass/fail curve with a
//! minimum effect and no separate to-hit step. The offset and the floor
//! are load-bearing game balance; both must hold bit-exactly.

use serde::{Deserialize, Serialize};

/// Flat amount subtracted from every raw roll before it lands.
pub const CHECK_OFFSET: u32 = 10;

/// The smallest amount any connecting effect applies.
pub const EFFECT_FLOOR: u32 = 3;

/// An amount of damage or healing together with its battle-log text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Final banded amount to apply.
    pub amount: u32,
    /// Battle-log description ("Missed", "Did 5 Damage", ...).
    pub description: String,
}

/// Band a raw damage roll.
///
/// Below the offset the attack misses outright; a marginal hit is
/// floored to [`EFFECT_FLOOR`].
pub fn damage_effect(raw: u32) -> Effect {
    if raw < CHECK_OFFSET {
        Effect {
            amount: 0,
            description: "Missed".to_string(),
        }
    } else {
        let amount = (raw - CHECK_OFFSET).max(EFFECT_FLOOR);
        Effect {
            amount,
            description: format!("Did {amount} Damage"),
        }
    }
}

/// Band a raw healing roll; mirrors [`damage_effect`] with healing text.
pub fn healing_effect(raw: u32) -> Effect {
    if raw < CHECK_OFFSET {
        Effect {
            amount: 0,
            description: "Fizzled".to_string(),
        }
    } else {
        let amount = (raw - CHECK_OFFSET).max(EFFECT_FLOOR);
        Effect {
            amount,
            description: format!("Did {amount} Healing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn low_rolls_miss() {
        for raw in 0..CHECK_OFFSET {
            let effect = damage_effect(raw);
            assert_eq!(effect.amount, 0);
            assert_eq!(effect.description, "Missed");
        }
    }

    #[test]
    fn marginal_hits_floor_at_three() {
        for raw in [10, 11, 12, 13] {
            let effect = damage_effect(raw);
            assert_eq!(effect.amount, 3);
            assert_eq!(effect.description, "Did 3 Damage");
        }
    }

    #[test]
    fn solid_hits_keep_their_margin() {
        assert_eq!(damage_effect(15).amount, 5);
        assert_eq!(damage_effect(15).description, "Did 5 Damage");
        assert_eq!(damage_effect(30).amount, 20);
    }

    #[test]
    fn healing_mirrors_damage_banding() {
        assert_eq!(healing_effect(4).description, "Fizzled");
        assert_eq!(healing_effect(4).amount, 0);
        assert_eq!(healing_effect(11).amount, 3);
        assert_eq!(healing_effect(11).description, "Did 3 Healing");
        assert_eq!(healing_effect(17).amount, 7);
        assert_eq!(healing_effect(17).description, "Did 7 Healing");
    }

    proptest! {
        #[test]
        fn banded_amounts_never_fall_between_zero_and_the_floor(raw in 0u32..200) {
            let effect = damage_effect(raw);
            prop_assert!(effect.amount == 0 || effect.amount >= EFFECT_FLOOR);
        }

        #[test]
        fn strong_rolls_keep_their_full_margin(raw in 13u32..200) {
            prop_assert_eq!(damage_effect(raw).amount, raw - 10);
        }
    }
}
