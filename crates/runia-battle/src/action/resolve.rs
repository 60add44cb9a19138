//! Action resolution: turning a chosen action into the battle's future.
//!
//! Resolution runs once, at queue time. The returned [`Resolved`] value
//! is carried inside the pending phase and swapped into the live
//! snapshot only when the animation finishes and the player confirms.

use runia_mechanics::dice::{Die, DieRoller, explode_roll, roll};
use runia_mechanics::effect::{damage_effect, healing_effect};
use serde::{Deserialize, Serialize};

use crate::bestiary;
use crate::character::{Character, Size};
use crate::encounter::{Encounter, Side, clamped_position};
use crate::error::BattleResult;

use super::ActionKind;

/// The raw amount Stabilize feeds the healing band; after the offset
/// and floor it restores the minimal 3 points.
const STABILIZE_RAW: u32 = 11;

/// Flat health every enemy regains when oozes congeal.
const CONGEAL_SURGE: u32 = 10;

/// The eagerly computed outcome of an action: both rosters as they will
/// stand once the animation finishes, plus the battle-log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    /// Player party after the action lands.
    pub party: Vec<Character>,
    /// Enemy roster after the action lands.
    pub enemies: Vec<Character>,
    /// Summon counter after the action; advances only on a summon.
    pub summon_counter: u32,
    /// Battle-log line describing what happened.
    pub description: String,
}

/// Resolve `action` against the current snapshot.
///
/// Targeted actions read `target` as a position in the roster named by
/// their target class (a stale position past the end selects the last
/// member; `None` selects the first). The snapshot itself is never
/// modified.
pub fn resolve(
    encounter: &Encounter,
    action: ActionKind,
    target: Option<usize>,
    roller: &mut dyn DieRoller,
) -> BattleResult<Resolved> {
    let mut out = Resolved {
        party: encounter.party.clone(),
        enemies: encounter.enemies.clone(),
        summon_counter: encounter.summon_counter,
        description: String::new(),
    };
    let target = target.unwrap_or(0);

    out.description = match action {
        ActionKind::Slash => {
            let raw = roll(roller, 1, Die::D10, 2, 0);
            strike(&mut out.enemies, target, Side::Enemy, raw)?
        }
        ActionKind::Kick => {
            let position = clamped_position(&out.enemies, target, Side::Enemy)?;
            let raw = match out.enemies[position].size {
                Size::Small => roll(roller, 1, Die::D6, 2, 0),
                // Large targets shrug the kick off: no check die at all,
                // just one disadvantaged d20 of damage.
                Size::Large => explode_roll(roller, 1, Die::D20, 0, 1),
                Size::Medium => roll(roller, 1, Die::D6, 0, 0),
            };
            strike(&mut out.enemies, target, Side::Enemy, raw)?
        }
        ActionKind::Firebolt => {
            let raw = roll(roller, 1, Die::D10, 0, 0);
            strike(&mut out.enemies, target, Side::Enemy, raw)?
        }
        ActionKind::ThunderCannon => {
            let raw = roll(roller, 2, Die::D6, 0, 0);
            strike(&mut out.enemies, target, Side::Enemy, raw)?
        }
        ActionKind::Punch => {
            let raw = roll(roller, 1, Die::D6, 0, 0);
            strike(&mut out.party, target, Side::Party, raw)?
        }
        ActionKind::Bite => {
            let raw = roll(roller, 1, Die::D4, 0, 0);
            strike(&mut out.party, target, Side::Party, raw)?
        }
        ActionKind::Engulf => {
            let raw = roll(roller, 2, Die::D6, 0, 0);
            strike(&mut out.party, target, Side::Party, raw)?
        }
        ActionKind::Heal => {
            let raw = roll(roller, 1, Die::D4, 0, 0);
            mend(&mut out.party, target, Side::Party, raw)?
        }
        ActionKind::Stabilize => {
            let position = clamped_position(&out.party, target, Side::Party)?;
            if out.party[position].is_dead() {
                mend(&mut out.party, target, Side::Party, STABILIZE_RAW)?
            } else {
                String::new()
            }
        }
        ActionKind::Fireball => {
            let mut total = 0;
            for enemy in &mut out.enemies {
                let amount = damage_effect(roll(roller, 1, Die::D10, 0, 1)).amount;
                total += amount;
                *enemy = enemy.damage(amount);
            }
            format!("Did {total} Damage")
        }
        ActionKind::Congeal => {
            for enemy in &mut out.enemies {
                *enemy = enemy.heal(CONGEAL_SURGE);
            }
            "Congealed with other Oozes to Solidify".to_string()
        }
        ActionKind::Summon => {
            out.summon_counter += 1;
            out.enemies
                .push(bestiary::skeleton().indexed(out.summon_counter));
            "Summoned a Skeleton Minion".to_string()
        }
    };

    Ok(out)
}

/// Apply a banded damage roll to one roster member; returns the log line.
fn strike(
    roster: &mut [Character],
    target: usize,
    side: Side,
    raw: u32,
) -> BattleResult<String> {
    let position = clamped_position(roster, target, side)?;
    let effect = damage_effect(raw);
    roster[position] = roster[position].damage(effect.amount);
    Ok(effect.description)
}

/// Apply a banded healing roll to one roster member; returns the log line.
fn mend(roster: &mut [Character], target: usize, side: Side, raw: u32) -> BattleResult<String> {
    let position = clamped_position(roster, target, side)?;
    let effect = healing_effect(raw);
    roster[position] = roster[position].heal(effect.amount);
    Ok(effect.description)
}
