//! NPC Simulation Library
//!
//! Zone-seeking NPCs in a bounded 2D world that can run headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
