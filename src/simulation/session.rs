//! Tick loop driver
//!
//! A `Session` owns the world, the agent store and the clock. Commands are
//! applied synchronously before each tick. Adding or removing an agent saves
//! right away; everything else is saved on the clock's schedule and once more
//! on quit. A failed save is logged and retried at the next opportunity, it
//! never stops the loop or touches the agents.

use log::{debug, error, info};

use super::clock::SimulationClock;
use super::config::SimConfig;
use super::error::ConfigurationError;
use super::input::{Command, TickInput};
use super::persistence::AgentStore;
use super::world::SimWorld;

/// Whether the loop should keep going after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
}

/// Why a save was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReason {
    InitialPopulation,
    AgentAdded,
    AgentRemoved,
    Periodic,
    Shutdown,
}

/// Counters for the lifetime of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub agents_restored: usize,
    pub records_rejected: usize,
    pub agents_added: usize,
    pub agents_removed: usize,
    pub saves: usize,
    pub failed_saves: usize,
}

pub struct Session<S: AgentStore> {
    world: SimWorld,
    store: S,
    clock: SimulationClock,
    stats: SessionStats,
    finished: bool,
}

impl<S: AgentStore> Session<S> {
    /// Build the world, restore stored agents and fall back to a fresh
    /// population when nothing usable was stored
    pub fn start(config: &SimConfig, store: S) -> Result<Self, ConfigurationError> {
        let world = SimWorld::new(config)?;
        let clock = SimulationClock::new(config.tick_duration, config.save_interval);
        Ok(Self::with_world(world, clock, store, config.initial_agents))
    }

    pub fn with_world(
        world: SimWorld,
        clock: SimulationClock,
        store: S,
        initial_agents: usize,
    ) -> Self {
        let mut session = Self {
            world,
            store,
            clock,
            stats: SessionStats::default(),
            finished: false,
        };
        session.load(initial_agents);
        session
    }

    fn load(&mut self, initial_agents: usize) {
        match self.store.load_all() {
            Ok(records) => {
                let report = self.world.restore(&records);
                self.stats.agents_restored += report.restored;
                self.stats.records_rejected += report.rejected_count();
            }
            Err(err) => error!("Failed to load agents, starting in memory: {}", err),
        }

        if self.world.agents.is_empty() {
            let ids = self.world.populate(initial_agents);
            info!("Created initial population of {} agents", ids.len());
            self.save(SaveReason::InitialPopulation);
        }
    }

    /// Apply the tick's commands, move the player, then advance the agents by one tick
    pub fn step(&mut self, input: &TickInput) -> StepOutcome {
        if self.finished {
            return StepOutcome::Quit;
        }

        for command in &input.commands {
            match command {
                Command::AddAgent => {
                    let id = self.world.spawn_agent(None);
                    self.stats.agents_added += 1;
                    info!("Added agent {}", id);
                    self.save(SaveReason::AgentAdded);
                }
                Command::RemoveLastAgent => match self.world.remove_last_agent() {
                    Some(agent) => {
                        self.stats.agents_removed += 1;
                        info!("Removed agent {} ({})", agent.id, agent.name);
                        self.save(SaveReason::AgentRemoved);
                    }
                    None => debug!("No agent to remove"),
                },
                Command::Quit => {
                    self.shutdown();
                    return StepOutcome::Quit;
                }
            }
        }

        self.world.update_player(input.movement, input.pointer);
        self.world.tick();

        if self.clock.advance() {
            self.save(SaveReason::Periodic);
        }
        StepOutcome::Continue
    }

    /// Final save; later steps are no-ops
    pub fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.save(SaveReason::Shutdown);
        self.finished = true;
        info!(
            "Session finished after {} ticks ({:.1}s simulated)",
            self.clock.ticks(),
            self.clock.elapsed().as_secs_f32()
        );
    }

    /// Write the full agent set to the store. Returns whether it succeeded.
    pub fn save(&mut self, reason: SaveReason) -> bool {
        let records = self.world.records();
        match self.store.save_all(&records) {
            Ok(()) => {
                self.stats.saves += 1;
                debug!("Saved {} agents ({:?})", records.len(), reason);
                true
            }
            Err(err) => {
                self.stats.failed_saves += 1;
                error!("Failed to save agents ({:?}): {}", reason, err);
                false
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Print the session counters alongside the world summary
    pub fn print_summary(&self) {
        self.world.print_summary();
        println!("--- Session ---");
        println!(
            "  Simulated time: {:.1}s over {} ticks",
            self.clock.elapsed().as_secs_f32(),
            self.clock.ticks()
        );
        println!(
            "  Saves: {} ok, {} failed",
            self.stats.saves, self.stats.failed_saves
        );
    }
}
