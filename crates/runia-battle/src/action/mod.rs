//! The closed catalogue of playable actions.
//!
//! Every action couples static menu metadata (display name, description
//! lines, target class) with a resolution formula in [`resolve`]. There
//! is no open extension point: the battle engine's behavior is the sum
//! of these entries.

pub mod resolve;

pub use resolve::{Resolved, resolve};

use serde::{Deserialize, Serialize};

/// Which roster an action picks its target from, if any.
///
/// Target classes are absolute: `Friendly` always means the player
/// party and `Enemy` always means the enemy roster, no matter which
/// side is acting. (A pirate's Heal really does mend a player.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetClass {
    /// No target: the action affects a whole roster or spawns.
    None,
    /// One member of the enemy roster, by position.
    Enemy,
    /// One member of the player party, by position.
    Friendly,
}

/// A playable action from the closed catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Sword swing with advantage.
    Slash,
    /// Kick or stomp; potency depends on the target's size.
    Kick,
    /// Single-target fire bolt.
    Firebolt,
    /// Weaker fire, but it hits every enemy.
    Fireball,
    /// Animate a skeleton minion onto the enemy roster.
    Summon,
    /// A skeleton's bare-knuckle strike.
    Punch,
    /// Radiant single-target healing.
    Heal,
    /// Emergency first aid; only works on the unconscious.
    Stabilize,
    /// A small creature's bite.
    Bite,
    /// An ooze swallowing its target.
    Engulf,
    /// Oozes congeal together and firm up.
    Congeal,
    /// A handheld cannon.
    ThunderCannon,
}

impl ActionKind {
    /// The display name shown in menus and the battle log.
    pub fn name(self) -> &'static str {
        match self {
            Self::Slash => "Slash",
            Self::Kick => "Kick",
            Self::Firebolt => "Firebolt",
            Self::Fireball => "Fireball",
            Self::Summon => "Animate Dead",
            Self::Punch => "Punch",
            Self::Heal => "Heal",
            Self::Stabilize => "Stabilize",
            Self::Bite => "Bite",
            Self::Engulf => "Engulf",
            Self::Congeal => "Congeal",
            Self::ThunderCannon => "Thunder Cannon",
        }
    }

    /// The description lines shown beside the action menu.
    pub fn description(self) -> &'static [&'static str] {
        match self {
            Self::Slash => &[
                "Swing you sword at a target",
                "Exceptionally effective against both",
                "    large and medium creatures",
            ],
            Self::Kick => &[
                "Kick or stomp your target",
                "Effective against small targets",
                "Ineffective against large targets",
            ],
            Self::Firebolt => &[
                "Sling a ball of fire at your target",
                "Generally effective against all sizes",
            ],
            Self::Fireball => &[
                "Create a small explosion centered on all enemies",
                "Less effective then fire bolt but hits all enemies",
            ],
            Self::Summon => &["Animates a pile of bones into a skeleton"],
            Self::Punch => &["Punch your target"],
            Self::Heal => &[
                "Covers your target in a radiant aura.",
                "Mends broken bones and closes wounds.",
            ],
            Self::Stabilize => &[
                "Binds the wounds of target friend.",
                "Restores minimal hit points.",
                "Only works on friends who are unconscious",
            ],
            Self::Bite => &["Bite your target"],
            Self::Engulf => &[""],
            Self::Congeal => &[""],
            Self::ThunderCannon => &[
                "Fire a small cannonball out of a handheld cannon.",
                "Exceptionally effective against large targets.",
                "Loud and may draw additional attention.",
                "Ineffective against small targets.",
            ],
        }
    }

    /// How this action is targeted.
    pub fn target_class(self) -> TargetClass {
        match self {
            Self::Slash | Self::Kick | Self::Firebolt | Self::ThunderCannon => TargetClass::Enemy,
            Self::Punch | Self::Heal | Self::Stabilize | Self::Bite | Self::Engulf => {
                TargetClass::Friendly
            }
            Self::Fireball | Self::Summon | Self::Congeal => TargetClass::None,
        }
    }

    /// Whether confirming this action opens a targeting phase.
    pub fn is_targeted(self) -> bool {
        self.target_class() != TargetClass::None
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
