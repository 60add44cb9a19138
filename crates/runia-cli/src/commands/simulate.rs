//! Run a whole battle headlessly and print the turn log.
//!
//! The simulator plays the embedding application's role and nothing
//! more: it drains the cue queue, feeds one input event per tick
//! through the public input adapter, and ticks the state machine until
//! the battle ends. The "player" is a scripted random walk, so every
//! run is reproducible from its seed.

use colored::Colorize;
use runia_battle::{
    BattleConfig, Encounter, InputEvent, Phase, TickOutcome, bestiary, on_input, on_tick,
};
use runia_mechanics::{DieRoller, RandomRoller};

pub fn run(battle: &str, seed: u64, max_ticks: u64, json: bool) -> Result<(), String> {
    let mut encounter = pick_battle(battle)?;
    let config = BattleConfig::default();
    let mut roller = RandomRoller::seeded(seed);
    // A separate seeded source drives the scripted player, keeping the
    // battle's own dice aligned with the seed regardless of menu path.
    let mut player = RandomRoller::seeded(seed.wrapping_mul(0x9e37_79b9).wrapping_add(1));

    println!(
        "  {} '{battle}' {}",
        "Simulating".bold(),
        format!("(seed={seed})").dimmed()
    );

    let mut turns = 0u64;
    let mut cues_drained = 0usize;
    let mut last_snapshot = None;

    for _ in 0..max_ticks {
        cues_drained += encounter.cues.len();
        encounter = encounter.clear_cues();

        if let Some(event) = player_intent(&encounter, &mut player) {
            turns += log_reveal(&encounter, event);
            encounter = on_input(encounter, event, &mut roller, &config)
                .map_err(|e| e.to_string())?;
        }

        if json {
            last_snapshot = Some(encounter.clone());
        }
        match on_tick(encounter, &mut roller, &config).map_err(|e| e.to_string())? {
            TickOutcome::Battle(next) => encounter = next,
            TickOutcome::Defeat => {
                println!(
                    "  {} {}",
                    "Defeat.".red().bold(),
                    format!("the party fell after {turns} turns, {cues_drained} cues played")
                        .dimmed()
                );
                dump_json(json, last_snapshot)?;
                return Ok(());
            }
            TickOutcome::Victory(scene) => {
                println!(
                    "  {} {}",
                    "Victory!".green().bold(),
                    format!(
                        "{turns} turns, {cues_drained} cues played, next scene '{}'",
                        scene.0
                    )
                    .dimmed()
                );
                dump_json(json, last_snapshot)?;
                return Ok(());
            }
        }
    }

    Err(format!("battle still running after {max_ticks} ticks"))
}

/// What the scripted player presses this tick, if anything.
///
/// Menus are walked as a random step toward a freshly drawn wish, which
/// exercises the cyclic selection paths rather than always confirming
/// the first entry.
fn player_intent(encounter: &Encounter, player: &mut RandomRoller) -> Option<InputEvent> {
    match &encounter.phase {
        Phase::Choose { selection } => {
            let count = encounter.active_character().ok()?.actions.len();
            if *selection == player.pick_index(count) {
                Some(InputEvent::Confirm)
            } else {
                Some(InputEvent::Down)
            }
        }
        Phase::TargetEnemy { target, .. } => {
            step_toward(*target, encounter.enemies.len(), player)
        }
        Phase::TargetFriendly { target, .. } => {
            step_toward(*target, encounter.party.len(), player)
        }
        Phase::Pending(pending) if pending.countdown == 0 => Some(InputEvent::Confirm),
        _ => None,
    }
}

/// Print the turn line when `event` is about to reveal a finished
/// action; returns how many turns that concluded (0 or 1).
fn log_reveal(encounter: &Encounter, event: InputEvent) -> u64 {
    if event != InputEvent::Confirm {
        return 0;
    }
    let Some(pending) = encounter.pending() else {
        return 0;
    };
    if pending.countdown != 0 {
        return 0;
    }
    let actor = encounter
        .active_character()
        .map(|c| c.name.clone())
        .unwrap_or_default();
    let text = if pending.result.description.is_empty() {
        "No effect"
    } else {
        pending.result.description.as_str()
    };
    println!("  {} using {}: {}", actor.bold(), pending.action.name(), text);
    1
}

fn step_toward(current: usize, len: usize, player: &mut RandomRoller) -> Option<InputEvent> {
    if len == 0 {
        return None;
    }
    if current == player.pick_index(len) {
        Some(InputEvent::Confirm)
    } else {
        Some(InputEvent::Right)
    }
}

fn dump_json(enabled: bool, snapshot: Option<Encounter>) -> Result<(), String> {
    if !enabled {
        return Ok(());
    }
    let snapshot = snapshot.ok_or_else(|| "no snapshot recorded".to_string())?;
    let rendered =
        serde_json::to_string_pretty(&snapshot).map_err(|e| format!("snapshot encoding: {e}"))?;
    println!("{rendered}");
    Ok(())
}

fn pick_battle(name: &str) -> Result<Encounter, String> {
    match name {
        "ooze" => Ok(bestiary::ooze_battle()),
        "rats" => Ok(bestiary::rat_battle()),
        "rat-pirate" => Ok(bestiary::rat_pirate_battle()),
        "shih-tzu" => Ok(bestiary::shih_tzu_battle()),
        "skeleton" => Ok(bestiary::skeleton_battle()),
        "final" => Ok(bestiary::final_battle()),
        other => Err(format!(
            "unknown battle '{other}' (expected ooze, rats, rat-pirate, shih-tzu, skeleton, or final)"
        )),
    }
}
