//! The turn state machine.
//!
//! Two pure entry points drive a battle. [`on_input`] maps one discrete
//! player signal to a transition, and [`on_tick`] advances the snapshot
//! once per fixed-rate update. Both consume the snapshot and return a
//! new one; nothing is mutated in place and nothing blocks.
//!
//! Resolution is eager: the moment an action is queued its entire
//! outcome is computed and tucked into the pending phase. The countdown
//! that follows is pure animation delay, and confirming at zero merely
//! reveals the precomputed future.

use runia_mechanics::DieRoller;

use crate::action::{ActionKind, Resolved, TargetClass, resolve};
use crate::config::BattleConfig;
use crate::cue::AudioCue;
use crate::encounter::{Encounter, PendingAction, Phase, SceneRef, Side};
use crate::error::{BattleError, BattleResult};
use crate::input::InputEvent;

/// Where the battle stands after an update tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The battle continues with the new snapshot.
    Battle(Encounter),
    /// Every party member is dead. The battle is lost for good; there
    /// are no further transitions.
    Defeat,
    /// Every enemy is dead. Control passes to the configured next
    /// scene, resolved by the embedding application.
    Victory(SceneRef),
}

/// Advance the snapshot in response to one discrete input event.
///
/// Out-of-phase input (confirming during the enemy's turn, cancelling
/// in a menu, any key while an animation runs) returns the snapshot
/// unchanged; there is no input error.
pub fn on_input(
    encounter: Encounter,
    event: InputEvent,
    roller: &mut dyn DieRoller,
    config: &BattleConfig,
) -> BattleResult<Encounter> {
    // A dead seat never gets to act; any key waves the turn along.
    if encounter.active_character()?.is_dead() {
        return next_turn(encounter, config);
    }
    match &encounter.phase {
        Phase::EnemyTurn { .. } | Phase::Staged { .. } => Ok(encounter),
        Phase::Pending(pending) => {
            let ready = pending.countdown == 0;
            if ready && event == InputEvent::Confirm {
                let pending = pending.clone();
                reveal(encounter, pending, config)
            } else {
                Ok(encounter)
            }
        }
        Phase::Choose { selection } => {
            let selection = *selection;
            choose_input(encounter, selection, event)
        }
        Phase::TargetEnemy { action, target } => {
            let (action, target) = (*action, *target);
            target_input(encounter, action, target, Side::Enemy, event, roller, config)
        }
        Phase::TargetFriendly { action, target } => {
            let (action, target) = (*action, *target);
            target_input(encounter, action, target, Side::Party, event, roller, config)
        }
    }
}

/// Advance the snapshot by one fixed-rate update tick.
pub fn on_tick(
    encounter: Encounter,
    roller: &mut dyn DieRoller,
    config: &BattleConfig,
) -> BattleResult<TickOutcome> {
    let mut encounter = encounter.prune_dead_enemies();
    if encounter.all_party_dead() {
        return Ok(TickOutcome::Defeat);
    }
    if encounter.enemies.is_empty() {
        return Ok(TickOutcome::Victory(encounter.next_scene));
    }
    if encounter.active_character()?.is_dead() {
        return next_turn(encounter, config).map(TickOutcome::Battle);
    }
    match &mut encounter.phase {
        Phase::Pending(pending) => {
            // Animation delay only. At zero the snapshot holds until
            // the player confirms the reveal.
            if pending.countdown > 0 {
                pending.countdown -= 1;
            }
            Ok(TickOutcome::Battle(encounter))
        }
        Phase::EnemyTurn { .. } => enemy_turn(encounter, roller, config).map(TickOutcome::Battle),
        Phase::Staged { action } => {
            let action = *action;
            queue(encounter, action, None, roller, config)
                .map(|queued| queued.with_cue(AudioCue::Select))
                .map(TickOutcome::Battle)
        }
        Phase::Choose { .. } | Phase::TargetEnemy { .. } | Phase::TargetFriendly { .. } => {
            Ok(TickOutcome::Battle(encounter))
        }
    }
}

/// Advance to the next seat's turn: rotate the cursor one step and
/// install that seat's default phase.
pub fn next_turn(encounter: Encounter, config: &BattleConfig) -> BattleResult<Encounter> {
    let (next_side, _) = encounter.seat_ahead(1)?;
    let phase = match next_side {
        Side::Party => Phase::Choose { selection: 0 },
        Side::Enemy => Phase::EnemyTurn {
            countdown: config.enemy_countdown,
        },
    };
    let total = encounter.combined_len();
    Ok(Encounter {
        initiative: (encounter.initiative + 1) % total,
        phase,
        ..encounter
    })
}

/// Reveal a finished pending action: the precomputed future becomes the
/// live state and the turn passes along. Nothing re-resolves here.
fn reveal(
    encounter: Encounter,
    pending: PendingAction,
    config: &BattleConfig,
) -> BattleResult<Encounter> {
    let Resolved {
        party,
        enemies,
        summon_counter,
        description: _,
    } = pending.result;
    let advanced = Encounter {
        party,
        enemies,
        summon_counter,
        ..encounter
    };
    next_turn(advanced, config)
}

/// Queue `action`: resolve its entire outcome now and start the
/// animation countdown toward the reveal.
fn queue(
    encounter: Encounter,
    action: ActionKind,
    target: Option<usize>,
    roller: &mut dyn DieRoller,
    config: &BattleConfig,
) -> BattleResult<Encounter> {
    let result = resolve(&encounter, action, target, roller)?;
    let pending = PendingAction {
        countdown: config.pending_ticks,
        action,
        target,
        result,
    };
    Ok(encounter.with_phase(Phase::Pending(pending)))
}

/// The enemy seat decides: a uniformly random action from the actor's
/// list, aimed (if targeted) at a uniformly random living party member.
fn enemy_turn(
    encounter: Encounter,
    roller: &mut dyn DieRoller,
    config: &BattleConfig,
) -> BattleResult<Encounter> {
    let actions = encounter.active_character()?.actions.clone();
    let action = actions[roller.pick_index(actions.len())];
    let target = if action.is_targeted() {
        Some(pick_living_party_index(&encounter, roller)?)
    } else {
        None
    };
    queue(encounter, action, target, roller, config)
}

/// Uniform choice among living party members, as an absolute party
/// position. Dead members are never selected.
fn pick_living_party_index(
    encounter: &Encounter,
    roller: &mut dyn DieRoller,
) -> BattleResult<usize> {
    let living: Vec<usize> = encounter
        .party
        .iter()
        .enumerate()
        .filter(|(_, member)| !member.is_dead())
        .map(|(position, _)| position)
        .collect();
    if living.is_empty() {
        return Err(BattleError::EmptyRoster { side: Side::Party });
    }
    Ok(living[roller.pick_index(living.len())])
}

fn choose_input(
    encounter: Encounter,
    selection: usize,
    event: InputEvent,
) -> BattleResult<Encounter> {
    let count = encounter.active_character()?.actions.len();
    match event {
        InputEvent::Confirm => {
            let chosen = encounter.active_character()?.actions[selection];
            let phase = match chosen.target_class() {
                TargetClass::Enemy => Phase::TargetEnemy {
                    action: chosen,
                    target: 0,
                },
                TargetClass::Friendly => Phase::TargetFriendly {
                    action: chosen,
                    target: 0,
                },
                TargetClass::None => Phase::Staged { action: chosen },
            };
            Ok(encounter.with_phase(phase).with_cue(AudioCue::Blip))
        }
        InputEvent::Down => Ok(encounter
            .with_phase(Phase::Choose {
                selection: (selection + 1) % count,
            })
            .with_cue(AudioCue::Blip)),
        InputEvent::Up => Ok(encounter
            .with_phase(Phase::Choose {
                selection: (selection + count - 1) % count,
            })
            .with_cue(AudioCue::Blip)),
        _ => Ok(encounter),
    }
}

fn target_input(
    encounter: Encounter,
    action: ActionKind,
    target: usize,
    side: Side,
    event: InputEvent,
    roller: &mut dyn DieRoller,
    config: &BattleConfig,
) -> BattleResult<Encounter> {
    let roster_len = match side {
        Side::Party => encounter.party.len(),
        Side::Enemy => encounter.enemies.len(),
    };
    if roster_len == 0 {
        return Err(BattleError::EmptyRoster { side });
    }
    let retarget = |position: usize| match side {
        Side::Enemy => Phase::TargetEnemy {
            action,
            target: position,
        },
        Side::Party => Phase::TargetFriendly {
            action,
            target: position,
        },
    };
    match event {
        InputEvent::Confirm => queue(encounter, action, Some(target), roller, config)
            .map(|queued| queued.with_cue(AudioCue::Select)),
        InputEvent::Right => Ok(encounter
            .with_phase(retarget((target + 1) % roster_len))
            .with_cue(AudioCue::Blip)),
        InputEvent::Left => Ok(encounter
            .with_phase(retarget((target + roster_len - 1) % roster_len))
            .with_cue(AudioCue::Blip)),
        InputEvent::Cancel => Ok(encounter.with_phase(Phase::Choose { selection: 0 })),
        _ => Ok(encounter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Character, Size};
    use crate::encounter::BackgroundRef;
    use runia_mechanics::ScriptedRoller;

    fn kerr() -> Character {
        Character::new(
            "Kerr",
            24,
            Size::Medium,
            vec![ActionKind::Slash, ActionKind::Kick, ActionKind::Stabilize],
        )
    }

    fn kivash() -> Character {
        Character::new(
            "Kivash",
            20,
            Size::Medium,
            vec![ActionKind::Firebolt, ActionKind::Fireball, ActionKind::Stabilize],
        )
    }

    fn skeleton() -> Character {
        Character::new("Skeleton", 5, Size::Medium, vec![ActionKind::Punch])
    }

    fn encounter(party: Vec<Character>, enemies: Vec<Character>, initiative: usize) -> Encounter {
        Encounter::new(
            party,
            enemies,
            initiative,
            Phase::Choose { selection: 0 },
            BackgroundRef::new("cave"),
            SceneRef::new("act6"),
        )
    }

    fn battle_of(outcome: TickOutcome) -> Encounter {
        match outcome {
            TickOutcome::Battle(e) => e,
            other => panic!("expected the battle to continue, got {other:?}"),
        }
    }

    #[test]
    fn choose_cycles_with_wraparound() {
        let config = BattleConfig::default();
        let mut roller = ScriptedRoller::new([]);
        let mut e = encounter(vec![kerr()], vec![skeleton()], 0);

        e = on_input(e, InputEvent::Down, &mut roller, &config).unwrap();
        e = on_input(e, InputEvent::Down, &mut roller, &config).unwrap();
        assert_eq!(e.phase, Phase::Choose { selection: 2 });

        e = on_input(e, InputEvent::Down, &mut roller, &config).unwrap();
        assert_eq!(e.phase, Phase::Choose { selection: 0 });

        e = on_input(e, InputEvent::Up, &mut roller, &config).unwrap();
        assert_eq!(e.phase, Phase::Choose { selection: 2 });
        assert_eq!(e.cues, vec![AudioCue::Blip; 4]);
    }

    #[test]
    fn confirm_opens_targeting_for_targeted_actions() {
        let config = BattleConfig::default();
        let mut roller = ScriptedRoller::new([]);
        let e = encounter(vec![kerr()], vec![skeleton()], 0);
        let e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();
        assert_eq!(
            e.phase,
            Phase::TargetEnemy {
                action: ActionKind::Slash,
                target: 0
            }
        );
        assert_eq!(e.cues, vec![AudioCue::Blip]);
    }

    #[test]
    fn confirm_stages_untargeted_actions_for_the_bridge() {
        let config = BattleConfig::default();
        let mut roller = ScriptedRoller::new([]);
        let e = encounter(vec![kivash()], vec![skeleton()], 0);
        let e = on_input(e, InputEvent::Down, &mut roller, &config).unwrap();
        let e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();
        assert_eq!(
            e.phase,
            Phase::Staged {
                action: ActionKind::Fireball
            }
        );
    }

    #[test]
    fn targeting_cycles_and_cancels() {
        let config = BattleConfig::default();
        let mut roller = ScriptedRoller::new([]);
        let enemies = vec![skeleton(), skeleton().indexed(2), skeleton().indexed(3)];
        let e = encounter(vec![kerr()], enemies, 0).with_phase(Phase::TargetEnemy {
            action: ActionKind::Slash,
            target: 0,
        });

        let e = on_input(e, InputEvent::Right, &mut roller, &config).unwrap();
        let e = on_input(e, InputEvent::Right, &mut roller, &config).unwrap();
        assert_eq!(
            e.phase,
            Phase::TargetEnemy {
                action: ActionKind::Slash,
                target: 2
            }
        );

        let e = on_input(e, InputEvent::Right, &mut roller, &config).unwrap();
        assert_eq!(
            e.phase,
            Phase::TargetEnemy {
                action: ActionKind::Slash,
                target: 0
            }
        );

        let e = on_input(e, InputEvent::Left, &mut roller, &config).unwrap();
        assert_eq!(
            e.phase,
            Phase::TargetEnemy {
                action: ActionKind::Slash,
                target: 2
            }
        );

        let e = on_input(e, InputEvent::Cancel, &mut roller, &config).unwrap();
        assert_eq!(e.phase, Phase::Choose { selection: 0 });
    }

    #[test]
    fn confirming_a_target_queues_with_eager_resolution() {
        let config = BattleConfig::default();
        let e = encounter(vec![kerr()], vec![skeleton()], 0).with_phase(Phase::TargetEnemy {
            action: ActionKind::Slash,
            target: 0,
        });
        // d20 check 10, advantage pool keeps the 9: raw 19, 9 damage.
        let mut roller = ScriptedRoller::new([10, 1, 2, 9]);
        let e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();

        let pending = e.pending().expect("action should be pending");
        assert_eq!(pending.countdown, config.pending_ticks);
        assert_eq!(pending.action, ActionKind::Slash);
        assert_eq!(pending.target, Some(0));
        assert_eq!(pending.result.enemies[0].health, 0);
        assert_eq!(pending.result.description, "Did 9 Damage");
        // The live roster is untouched until the reveal.
        assert_eq!(e.enemies[0].health, 5);
        assert_eq!(e.cues, vec![AudioCue::Select]);
    }

    #[test]
    fn pending_counts_down_and_then_holds() {
        let config = BattleConfig::default().with_pending_ticks(2);
        let mut roller = ScriptedRoller::new([10, 1, 2, 9]);
        let e = encounter(vec![kerr()], vec![skeleton()], 0).with_phase(Phase::TargetEnemy {
            action: ActionKind::Slash,
            target: 0,
        });
        let e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();
        let frozen = e.pending().unwrap().result.clone();

        let e = battle_of(on_tick(e, &mut roller, &config).unwrap());
        assert_eq!(e.pending().unwrap().countdown, 1);
        let e = battle_of(on_tick(e, &mut roller, &config).unwrap());
        assert_eq!(e.pending().unwrap().countdown, 0);

        // Holding: further ticks change nothing, and the result is the
        // one computed at queue time.
        let e = battle_of(on_tick(e, &mut roller, &config).unwrap());
        assert_eq!(e.pending().unwrap().countdown, 0);
        assert_eq!(e.pending().unwrap().result, frozen);
    }

    #[test]
    fn confirm_before_zero_is_a_no_op() {
        let config = BattleConfig::default().with_pending_ticks(5);
        let mut roller = ScriptedRoller::new([10, 1, 2, 9]);
        let e = encounter(vec![kerr()], vec![skeleton()], 0).with_phase(Phase::TargetEnemy {
            action: ActionKind::Slash,
            target: 0,
        });
        let e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();
        let early = on_input(e.clone(), InputEvent::Confirm, &mut roller, &config).unwrap();
        assert_eq!(early, e);
    }

    #[test]
    fn confirm_at_zero_reveals_without_re_resolving() {
        let config = BattleConfig::default().with_pending_ticks(1);
        let mut roller = ScriptedRoller::new([10, 1, 2, 9]);
        let e = encounter(vec![kerr()], vec![skeleton()], 0).with_phase(Phase::TargetEnemy {
            action: ActionKind::Slash,
            target: 0,
        });
        let e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();
        let e = battle_of(on_tick(e, &mut roller, &config).unwrap());
        assert_eq!(roller.remaining(), 0);

        // The roller is dry; a reveal that re-resolved would panic.
        let e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();
        assert_eq!(e.enemies[0].health, 0);
        assert_eq!(e.initiative, 1);
        assert_eq!(
            e.phase,
            Phase::EnemyTurn {
                countdown: config.enemy_countdown
            }
        );
    }

    #[test]
    fn staged_actions_queue_on_the_next_tick() {
        let config = BattleConfig::default();
        let e = encounter(vec![kivash()], vec![skeleton(), skeleton().indexed(2)], 0)
            .with_phase(Phase::Staged {
                action: ActionKind::Fireball,
            });
        // One independent roll per enemy: (10 + 3) and (5 + 2).
        let mut roller = ScriptedRoller::new([10, 3, 4, 5, 2, 9]);
        let e = battle_of(on_tick(e, &mut roller, &config).unwrap());
        let pending = e.pending().expect("fireball should be pending");
        assert_eq!(pending.action, ActionKind::Fireball);
        assert_eq!(pending.target, None);
        assert_eq!(pending.result.description, "Did 3 Damage");
        assert_eq!(e.cues, vec![AudioCue::Select]);
    }

    #[test]
    fn input_is_ignored_during_the_enemy_turn() {
        let config = BattleConfig::default();
        let mut roller = ScriptedRoller::new([]);
        let e = encounter(vec![kerr()], vec![skeleton()], 1)
            .with_phase(Phase::EnemyTurn { countdown: 30 });
        let after = on_input(e.clone(), InputEvent::Confirm, &mut roller, &config).unwrap();
        assert_eq!(after, e);
    }

    #[test]
    fn enemy_turns_queue_automatically() {
        let config = BattleConfig::default();
        let e = encounter(vec![kerr()], vec![skeleton()], 1)
            .with_phase(Phase::EnemyTurn { countdown: 30 });
        // Action pick 0 (Punch), target pick 0, then roll 12 + 4.
        let mut roller = ScriptedRoller::new([0, 0, 12, 4]);
        let e = battle_of(on_tick(e, &mut roller, &config).unwrap());

        let pending = e.pending().expect("enemy action should be pending");
        assert_eq!(pending.action, ActionKind::Punch);
        assert_eq!(pending.target, Some(0));
        assert_eq!(pending.result.party[0].health, 18);
        // The enemy path plays no cue.
        assert!(e.cues.is_empty());
    }

    #[test]
    fn enemy_targeting_skips_dead_party_members() {
        let config = BattleConfig::default();
        let downed = kerr().damage(24);
        let e = encounter(vec![downed, kivash()], vec![skeleton()], 2)
            .with_phase(Phase::EnemyTurn { countdown: 30 });
        // Action pick 0, living-member pick 0 -> absolute position 1.
        let mut roller = ScriptedRoller::new([0, 0, 12, 4]);
        let e = battle_of(on_tick(e, &mut roller, &config).unwrap());

        let pending = e.pending().unwrap();
        assert_eq!(pending.target, Some(1));
        assert_eq!(pending.result.party[1].health, 14);
        assert_eq!(pending.result.party[0].health, 0);
    }

    #[test]
    fn a_dead_seat_is_skipped() {
        let config = BattleConfig::default();
        let mut roller = ScriptedRoller::new([]);
        let e = encounter(vec![kerr().damage(24), kivash()], vec![skeleton()], 0);

        // On tick: the turn passes without the dead member acting.
        let ticked = battle_of(on_tick(e.clone(), &mut roller, &config).unwrap());
        assert_eq!(ticked.initiative, 1);
        assert_eq!(ticked.phase, Phase::Choose { selection: 0 });

        // On input: any key waves the turn along.
        let keyed = on_input(e, InputEvent::Down, &mut roller, &config).unwrap();
        assert_eq!(keyed.initiative, 1);
    }

    #[test]
    fn defeat_fires_on_the_next_tick_regardless_of_seat() {
        let config = BattleConfig::default();
        let party = vec![kerr().damage(24), kivash().damage(20)];

        // Enemy seat active.
        let mut roller = ScriptedRoller::new([]);
        let e = encounter(party.clone(), vec![skeleton()], 2)
            .with_phase(Phase::EnemyTurn { countdown: 30 });
        assert_eq!(on_tick(e, &mut roller, &config).unwrap(), TickOutcome::Defeat);

        // Dead player seat active.
        let e = encounter(party, vec![skeleton()], 0);
        assert_eq!(on_tick(e, &mut roller, &config).unwrap(), TickOutcome::Defeat);
    }

    #[test]
    fn victory_hands_over_the_configured_next_scene() {
        let config = BattleConfig::default();
        let mut roller = ScriptedRoller::new([]);
        let e = encounter(vec![kerr()], vec![skeleton().damage(5)], 0);
        let outcome = on_tick(e, &mut roller, &config).unwrap();
        assert_eq!(outcome, TickOutcome::Victory(SceneRef::new("act6")));
    }

    #[test]
    fn turn_advancement_is_a_total_rotation() {
        let config = BattleConfig::default();
        let mut e = encounter(
            vec![kerr(), kivash()],
            vec![skeleton(), skeleton().indexed(2)],
            1,
        );
        let start = e.initiative;
        for _ in 0..e.combined_len() {
            e = next_turn(e, &config).unwrap();
            match e.active_seat().unwrap().0 {
                Side::Party => assert!(e.is_choosing()),
                Side::Enemy => assert!(e.is_enemy_turn()),
            }
        }
        assert_eq!(e.initiative, start);
    }

    #[test]
    fn a_prune_at_the_cursor_hands_the_seat_to_the_next_enemy() {
        // The cursor is never renormalized after a prune, so when the
        // enemy under it dies, the seat falls to whoever re-wraps into
        // it. Deliberate; see prune_dead_enemies.
        let config = BattleConfig::default();
        let e = encounter(
            vec![kerr()],
            vec![skeleton().damage(5), skeleton().indexed(2)],
            1,
        )
        .with_phase(Phase::EnemyTurn { countdown: 30 });
        let mut roller = ScriptedRoller::new([0, 0, 12, 3]);
        let e = battle_of(on_tick(e, &mut roller, &config).unwrap());
        assert_eq!(e.enemies.len(), 1);
        assert_eq!(e.active_character().unwrap().index, 2);
        assert!(e.is_pending());
    }

    #[test]
    fn a_full_player_turn_runs_to_victory() {
        let config = BattleConfig::default().with_pending_ticks(1);
        let mut roller = ScriptedRoller::new([10, 1, 2, 9]);
        let mut e = encounter(vec![kerr()], vec![skeleton()], 0);

        e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();
        assert!(e.is_targeting());
        e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();
        assert!(e.is_pending());

        e = battle_of(on_tick(e, &mut roller, &config).unwrap());
        assert_eq!(e.pending().unwrap().countdown, 0);
        e = on_input(e, InputEvent::Confirm, &mut roller, &config).unwrap();

        // The reveal leaves the slain skeleton in place; the next tick
        // prunes it and ends the battle.
        assert_eq!(e.enemies.len(), 1);
        assert!(e.enemies[0].is_dead());
        let outcome = on_tick(e, &mut roller, &config).unwrap();
        assert_eq!(outcome, TickOutcome::Victory(SceneRef::new("act6")));
    }
}
