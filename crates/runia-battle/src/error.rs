//! Error types for the battle engine.

use crate::encounter::Side;

/// Errors surfaced by battle accessors and resolution.
///
/// None of these describe reachable game states: out-of-phase input is a
/// silent no-op, and the terminal checks keep targetable rosters
/// non-empty while a battle is live. Hitting one of these means the
/// caller broke an invariant, not that the player did something odd.
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    /// Both rosters are empty; there is no seat that could act.
    #[error("no combatants in the battle")]
    NoCombatants,

    /// A target was requested outside a targeting phase.
    #[error("battle currently does not have a target")]
    NotTargeting,

    /// A targeted action was aimed at an empty roster.
    #[error("cannot target an empty {side} roster")]
    EmptyRoster {
        /// Which roster was empty.
        side: Side,
    },
}

/// Convenience result type for battle operations.
pub type BattleResult<T> = Result<T, BattleError>;
