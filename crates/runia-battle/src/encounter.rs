//! The battle snapshot and its phase tag.
//!
//! An [`Encounter`] is one immutable snapshot of a battle: both rosters,
//! the initiative cursor, the active phase, and the side-effect queue.
//! Transitions never mutate a snapshot the caller keeps; the functions
//! in [`crate::turn`] consume one snapshot and produce the next.

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, Resolved};
use crate::character::Character;
use crate::cue::AudioCue;
use crate::error::{BattleError, BattleResult};

/// Summoned enemies take indices above this base, so they never collide
/// with scene-authored duplicate indices. Never reused within a battle.
pub const SUMMON_INDEX_BASE: u32 = 100;

/// Which roster a seat belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The fixed player party.
    Party,
    /// The scene's enemy roster.
    Enemy,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Party => write!(f, "party"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// An action queued for resolution, animating toward its reveal.
///
/// The outcome in `result` was computed once, when the action was
/// queued. The countdown only paces how long the renderer animates
/// before the outcome may be revealed; nothing re-resolves on confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// Ticks left before the action becomes confirmable.
    pub countdown: usize,
    /// The action being animated.
    pub action: ActionKind,
    /// The queued target position, if the action is targeted.
    pub target: Option<usize>,
    /// The future battle state, fixed at queue time.
    pub result: Resolved,
}

/// The active phase of the turn's action-selection protocol.
///
/// Exactly one phase holds at any time; it is the state machine's tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The acting player is picking an action from their menu.
    Choose {
        /// Menu position, cyclic over the actor's action list.
        selection: usize,
    },
    /// The acting player is picking an enemy target.
    TargetEnemy {
        /// The chosen action.
        action: ActionKind,
        /// Position in the enemy roster, cyclic.
        target: usize,
    },
    /// The acting player is picking a friendly target.
    TargetFriendly {
        /// The chosen action.
        action: ActionKind,
        /// Position in the party, cyclic.
        target: usize,
    },
    /// An enemy seat is acting; player input is ignored while it decides.
    EnemyTurn {
        /// Renderer lead-in ticks; not consumed by transition logic.
        countdown: u32,
    },
    /// An untargeted action was confirmed from the menu and waits for
    /// the next tick to queue it. This is the bridge that lets the
    /// player path and the enemy path converge on [`Phase::Pending`].
    Staged {
        /// The confirmed action.
        action: ActionKind,
    },
    /// A queued action animating toward its reveal.
    Pending(PendingAction),
}

/// An opaque reference to the background the renderer should draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundRef(
    /// The background identifier, meaningful only to the renderer.
    pub String,
);

impl BackgroundRef {
    /// Wrap a background identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// An opaque reference to the scene that follows this battle on victory.
/// The engine never resolves it; the embedding application does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRef(
    /// The scene identifier, meaningful only to the embedding application.
    pub String,
);

impl SceneRef {
    /// Wrap a scene identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// One immutable battle snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// The player party. Membership is fixed; the dead keep their seat.
    pub party: Vec<Character>,
    /// The enemy roster. The dead are pruned at the top of every tick.
    pub enemies: Vec<Character>,
    /// Rotation offset into `party ++ enemies`. Wraps modulo the
    /// combined size at the moment of use; never renormalized when the
    /// enemy roster shrinks.
    pub initiative: usize,
    /// The active phase.
    pub phase: Phase,
    /// Background for the external renderer.
    pub background: BackgroundRef,
    /// Scene to hand control to once every enemy is dead.
    pub next_scene: SceneRef,
    /// Audio cues appended by transitions, drained once per tick by the
    /// embedding application.
    pub cues: Vec<AudioCue>,
    /// Source of unique indices for summoned enemies.
    pub summon_counter: u32,
}

impl Encounter {
    /// Assemble a battle snapshot with an empty cue queue and a fresh
    /// summon counter.
    pub fn new(
        party: Vec<Character>,
        enemies: Vec<Character>,
        initiative: usize,
        phase: Phase,
        background: BackgroundRef,
        next_scene: SceneRef,
    ) -> Self {
        Self {
            party,
            enemies,
            initiative,
            phase,
            background,
            next_scene,
            cues: Vec::new(),
            summon_counter: SUMMON_INDEX_BASE,
        }
    }

    /// Total number of seats across both rosters.
    pub fn combined_len(&self) -> usize {
        self.party.len() + self.enemies.len()
    }

    /// Every party member is dead.
    pub fn all_party_dead(&self) -> bool {
        self.party.iter().all(Character::is_dead)
    }

    fn seat_at(&self, absolute: usize) -> (Side, usize) {
        if absolute < self.party.len() {
            (Side::Party, absolute)
        } else {
            (Side::Enemy, absolute - self.party.len())
        }
    }

    /// The seat `steps` places after the cursor, wrapping modulo the
    /// combined roster size as it stands right now.
    pub fn seat_ahead(&self, steps: usize) -> BattleResult<(Side, usize)> {
        let total = self.combined_len();
        if total == 0 {
            return Err(BattleError::NoCombatants);
        }
        Ok(self.seat_at((self.initiative + steps) % total))
    }

    /// The seat whose turn it is.
    pub fn active_seat(&self) -> BattleResult<(Side, usize)> {
        self.seat_ahead(0)
    }

    /// The character whose turn it is.
    pub fn active_character(&self) -> BattleResult<&Character> {
        let (side, position) = self.active_seat()?;
        Ok(match side {
            Side::Party => &self.party[position],
            Side::Enemy => &self.enemies[position],
        })
    }

    /// The turn order as seat references, rotated so the active seat
    /// comes first.
    pub fn initiative_seats(&self) -> Vec<(Side, usize)> {
        let total = self.combined_len();
        if total == 0 {
            return Vec::new();
        }
        let cut = self.initiative % total;
        (0..total).map(|i| self.seat_at((cut + i) % total)).collect()
    }

    /// The turn order as characters, rotated so the active one comes
    /// first. This is the sequence the renderer draws on the tracker.
    pub fn initiative_order(&self) -> Vec<&Character> {
        self.initiative_seats()
            .into_iter()
            .map(|(side, position)| match side {
                Side::Party => &self.party[position],
                Side::Enemy => &self.enemies[position],
            })
            .collect()
    }

    /// Look up a character by seat reference.
    pub fn character_at(&self, side: Side, position: usize) -> Option<&Character> {
        match side {
            Side::Party => self.party.get(position),
            Side::Enemy => self.enemies.get(position),
        }
    }

    /// Whether members of `side` are selectable in the current phase;
    /// the renderer lifts their tracker sprites when they are.
    pub fn valid_selection(&self, side: Side) -> bool {
        match self.phase {
            Phase::TargetEnemy { .. } => side == Side::Enemy,
            Phase::TargetFriendly { .. } => side == Side::Party,
            _ => false,
        }
    }

    /// The currently highlighted target, if a targeting phase is
    /// active. A position past the end of a roster selects its last
    /// member.
    pub fn target(&self) -> BattleResult<&Character> {
        match &self.phase {
            Phase::TargetEnemy { target, .. } => {
                let position = clamped_position(&self.enemies, *target, Side::Enemy)?;
                Ok(&self.enemies[position])
            }
            Phase::TargetFriendly { target, .. } => {
                let position = clamped_position(&self.party, *target, Side::Party)?;
                Ok(&self.party[position])
            }
            _ => Err(BattleError::NotTargeting),
        }
    }

    /// The pending action, if one is animating or holding.
    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.phase {
            Phase::Pending(pending) => Some(pending),
            _ => None,
        }
    }

    /// True while the action menu is open.
    pub fn is_choosing(&self) -> bool {
        matches!(self.phase, Phase::Choose { .. })
    }

    /// True while either targeting phase is active.
    pub fn is_targeting(&self) -> bool {
        matches!(
            self.phase,
            Phase::TargetEnemy { .. } | Phase::TargetFriendly { .. }
        )
    }

    /// True while an enemy seat is deciding.
    pub fn is_enemy_turn(&self) -> bool {
        matches!(self.phase, Phase::EnemyTurn { .. })
    }

    /// True while a queued action animates or holds.
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending(_))
    }

    /// The same snapshot with a different phase.
    pub fn with_phase(self, phase: Phase) -> Self {
        Self { phase, ..self }
    }

    /// The same snapshot with `cue` appended to the side-effect queue.
    pub fn with_cue(mut self, cue: AudioCue) -> Self {
        self.cues.push(cue);
        self
    }

    /// The same snapshot with the side-effect queue emptied. The
    /// embedding application calls this after playing the cues.
    pub fn clear_cues(mut self) -> Self {
        self.cues.clear();
        self
    }

    /// The same snapshot with dead enemies removed from the roster.
    /// Dead party members are never removed. The cursor is deliberately
    /// left alone; it re-wraps against the shrunken roster at its next
    /// use.
    pub fn prune_dead_enemies(mut self) -> Self {
        self.enemies.retain(|enemy| !enemy.is_dead());
        self
    }
}

/// Clamp a target position into `roster`, selecting the last member
/// when the stored position has gone stale past the end.
pub(crate) fn clamped_position(
    roster: &[Character],
    position: usize,
    side: Side,
) -> BattleResult<usize> {
    if roster.is_empty() {
        return Err(BattleError::EmptyRoster { side });
    }
    Ok(position.min(roster.len() - 1))
}
