//! Subcommand implementations.

pub mod roll;
pub mod roster;
pub mod simulate;
