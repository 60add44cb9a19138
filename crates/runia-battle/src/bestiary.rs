//! The fixed player party, enemy templates, and campaign encounters.
//!
//! Templates come back at full health with index 1; use
//! [`Character::indexed`] to stamp duplicates. The encounter
//! constructors reproduce the campaign's scripted battles, including
//! which side opens each one.

use crate::action::ActionKind;
use crate::character::{Character, Size};
use crate::config::DEFAULT_ENEMY_COUNTDOWN;
use crate::encounter::{BackgroundRef, Encounter, Phase, SceneRef};

/// The three-member player party at full health.
pub fn party() -> Vec<Character> {
    vec![kerr(), kivash(), nyx()]
}

/// Kerr, the front-line swordsman.
pub fn kerr() -> Character {
    Character::new(
        "Kerr",
        24,
        Size::Medium,
        vec![ActionKind::Slash, ActionKind::Kick, ActionKind::Stabilize],
    )
}

/// Kivash, the evoker.
pub fn kivash() -> Character {
    Character::new(
        "Kivash",
        20,
        Size::Medium,
        vec![
            ActionKind::Firebolt,
            ActionKind::Fireball,
            ActionKind::Stabilize,
        ],
    )
}

/// Nyx, the halfling artillerist.
pub fn nyx() -> Character {
    Character::new(
        "Nyx",
        16,
        Size::Small,
        vec![
            ActionKind::ThunderCannon,
            ActionKind::Heal,
            ActionKind::Stabilize,
        ],
    )
}

/// A cutlass-and-cannon pirate.
pub fn pirate() -> Character {
    Character::new(
        "Pirate",
        20,
        Size::Medium,
        vec![ActionKind::Slash, ActionKind::ThunderCannon, ActionKind::Heal],
    )
}

/// A sewer rat of unreasonable size.
pub fn giant_rat() -> Character {
    Character::new("Giant Rat", 7, Size::Small, vec![ActionKind::Bite])
}

/// A very bad dog.
pub fn feral_shih_tzu() -> Character {
    Character::new("Feral Shih-Tzu", 10, Size::Small, vec![ActionKind::Bite])
}

/// An animated skeleton; also what [`ActionKind::Summon`] raises.
pub fn skeleton() -> Character {
    Character::new("Skeleton", 5, Size::Medium, vec![ActionKind::Punch])
}

/// A gelatinous ooze. Twice as likely to engulf as to congeal.
pub fn ooze() -> Character {
    Character::new(
        "Ooze",
        20,
        Size::Large,
        vec![ActionKind::Engulf, ActionKind::Engulf, ActionKind::Congeal],
    )
}

/// The necromancer behind it all. Never attacks; keeps summoning.
pub fn necromancer() -> Character {
    Character::new("Necromancer", 100, Size::Medium, vec![ActionKind::Summon])
}

fn enemy_opening() -> Phase {
    Phase::EnemyTurn {
        countdown: DEFAULT_ENEMY_COUNTDOWN,
    }
}

/// The sewer ambush: two oozes, and they act first.
pub fn ooze_battle() -> Encounter {
    Encounter::new(
        party(),
        vec![ooze(), ooze().indexed(2)],
        3,
        enemy_opening(),
        BackgroundRef::new("sewer"),
        SceneRef::new("act2"),
    )
}

/// Six giant rats in the sewer tunnels.
pub fn rat_battle() -> Encounter {
    Encounter::new(
        party(),
        (1..=6).map(|i| giant_rat().indexed(i)).collect(),
        0,
        Phase::Choose { selection: 0 },
        BackgroundRef::new("sewer"),
        SceneRef::new("act3"),
    )
}

/// Two pirates feeding two giant rats.
pub fn rat_pirate_battle() -> Encounter {
    Encounter::new(
        party(),
        vec![
            pirate(),
            pirate().indexed(2),
            giant_rat(),
            giant_rat().indexed(2),
        ],
        0,
        Phase::Choose { selection: 0 },
        BackgroundRef::new("sewer"),
        SceneRef::new("act4"),
    )
}

/// A moonlit pack of four feral shih-tzus.
pub fn shih_tzu_battle() -> Encounter {
    Encounter::new(
        party(),
        (1..=4).map(|i| feral_shih_tzu().indexed(i)).collect(),
        0,
        Phase::Choose { selection: 0 },
        BackgroundRef::new("outdoors"),
        SceneRef::new("act5"),
    )
}

/// Three skeletons at the collapsed cave mouth; they act first.
pub fn skeleton_battle() -> Encounter {
    Encounter::new(
        party(),
        (1..=3).map(|i| skeleton().indexed(i)).collect(),
        3,
        enemy_opening(),
        BackgroundRef::new("cave"),
        SceneRef::new("act6"),
    )
}

/// The necromancer, alone with his piles of bones.
pub fn final_battle() -> Encounter {
    Encounter::new(
        party(),
        vec![necromancer()],
        0,
        Phase::Choose { selection: 0 },
        BackgroundRef::new("cave"),
        SceneRef::new("act7"),
    )
}
