//! Discrete input signals consumed by the state machine.
//!
//! The engine never polls devices. The embedding application maps its
//! key or button events onto these signals and feeds them to
//! [`crate::turn::on_input`], one at a time, alongside a fixed-rate
//! stream of update ticks into [`crate::turn::on_tick`].

use serde::{Deserialize, Serialize};

/// A directional, confirm, or cancel signal from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Move the menu selection up.
    Up,
    /// Move the menu selection down.
    Down,
    /// Move the target selection left.
    Left,
    /// Move the target selection right.
    Right,
    /// Confirm the current selection.
    Confirm,
    /// Back out of targeting to the action menu.
    Cancel,
}
