//! Opaque audio-cue identifiers.
//!
//! The engine never touches an audio API. Transitions append cue ids to
//! the snapshot's queue and the embedding application drains them once
//! per tick.

use serde::{Deserialize, Serialize};

/// An audio cue the external audio subsystem knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    /// Menu movement or a menu choice.
    Blip,
    /// An action being queued for resolution.
    Select,
}
