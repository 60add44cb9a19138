//! Turn-based battle engine for Runia Chronicles.
//!
//! The engine owns initiative ordering, the action-selection protocol
//! (choose, target, queue, animate, resolve), and the damage and
//! healing arithmetic. It draws nothing and plays nothing: the
//! embedding application feeds [`InputEvent`]s and fixed-rate ticks
//! into [`turn::on_input`] and [`turn::on_tick`], reads the resulting
//! [`Encounter`] snapshot to render, and drains the audio-cue queue.
//!
//! Every transition is a pure function from one snapshot to the next,
//! and all randomness flows through the injected
//! [`runia_mechanics::DieRoller`], so whole battles replay from a seed.

pub mod action;
pub mod anim;
pub mod bestiary;
pub mod character;
pub mod config;
pub mod cue;
pub mod encounter;
pub mod error;
pub mod input;
pub mod turn;

pub use action::{ActionKind, Resolved, TargetClass};
pub use character::{Character, Size};
pub use config::BattleConfig;
pub use cue::AudioCue;
pub use encounter::{BackgroundRef, Encounter, PendingAction, Phase, SceneRef, Side};
pub use error::{BattleError, BattleResult};
pub use input::InputEvent;
pub use turn::{TickOutcome, next_turn, on_input, on_tick};
