//! Combatants: immutable character records.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;

/// How big a combatant is. Several actions branch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Size {
    /// Rats, dogs, halfling artillerists.
    Small,
    /// Most humanoids.
    Medium,
    /// Oozes and worse.
    Large,
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Small => write!(f, "Small"),
            Self::Medium => write!(f, "Medium"),
            Self::Large => write!(f, "Large"),
        }
    }
}

/// A combatant on either side of a battle.
///
/// Characters are values: damage and healing return a new record, and
/// health is clamped to `[0, max_health]` on every change. A character
/// at zero health is dead; dead party members keep their seat while dead
/// enemies are pruned from the roster at the top of every tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Distinguishes duplicates of the same template ("Pirate 2").
    /// Summoned enemies draw theirs from the battle's summon counter.
    pub index: u32,
    /// Current health, always in `[0, max_health]`.
    pub health: u32,
    /// Upper health bound; always positive.
    pub max_health: u32,
    /// Body size.
    pub size: Size,
    /// Actions available on this character's turn, in menu order.
    pub actions: Vec<ActionKind>,
}

impl Character {
    /// Create a character at full health with index 1.
    pub fn new(
        name: impl Into<String>,
        max_health: u32,
        size: Size,
        actions: Vec<ActionKind>,
    ) -> Self {
        Self {
            name: name.into(),
            index: 1,
            health: max_health,
            max_health,
            size,
            actions,
        }
    }

    /// The same character with a different duplicate index.
    pub fn indexed(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// A copy of this character after taking `amount` damage, floored at
    /// zero health.
    pub fn damage(&self, amount: u32) -> Self {
        Self {
            health: self.health.saturating_sub(amount),
            ..self.clone()
        }
    }

    /// A copy of this character after `amount` healing, capped at
    /// `max_health`.
    pub fn heal(&self, amount: u32) -> Self {
        Self {
            health: (self.health + amount).min(self.max_health),
            ..self.clone()
        }
    }

    /// Dead means exactly zero health.
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// A coarse health descriptor for status displays.
    pub fn condition(&self) -> &'static str {
        let fraction = f64::from(self.health) / f64::from(self.max_health);
        if fraction < 0.1 {
            "Near-Death"
        } else if fraction < 0.5 {
            "Bloodied"
        } else if fraction < 1.0 {
            "Healthy"
        } else {
            "Untouched"
        }
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}/{} HP", self.name, self.health, self.max_health)
    }
}
