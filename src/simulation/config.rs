//! Run configuration shared by the headless runner and the UI

use std::time::Duration;

use super::clock::{DEFAULT_SAVE_INTERVAL, DEFAULT_TICK_DURATION};
use super::steering::BoundaryPolicies;

/// Default world size
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 800;

/// Agents created when the store has nothing to restore
pub const DEFAULT_INITIAL_AGENTS: usize = 20;

/// Everything needed to build a world and drive it
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    pub initial_agents: usize,
    /// Seed for the world's random generator; `None` draws one from the OS
    pub seed: Option<u64>,
    pub tick_duration: Duration,
    /// Simulated time between periodic saves; zero disables them
    pub save_interval: Duration,
    pub boundaries: BoundaryPolicies,
    /// Per-tick chance that a wandering agent nudges its heading (0 disables)
    pub roam_jitter_chance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_agents: DEFAULT_INITIAL_AGENTS,
            seed: None,
            tick_duration: DEFAULT_TICK_DURATION,
            save_interval: DEFAULT_SAVE_INTERVAL,
            boundaries: BoundaryPolicies::default(),
            roam_jitter_chance: 0.0,
        }
    }
}

impl SimConfig {
    /// Default configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
