//! Main simulation world that ties everything together
//!
//! This is the entry point for running the NPC simulation
//! without any Bevy dependencies.

use std::collections::HashSet;
use std::f32::consts::TAU;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::agent::Agent;
use super::behavior::{assign_affinities, BehaviorPolicy, Transition};
use super::config::SimConfig;
use super::error::{ConfigurationError, InvalidRecord};
use super::input::Direction;
use super::persistence::AgentRecord;
use super::player::Player;
use super::steering::SteeringIntegrator;
use super::types::{
    AgentId, BehaviorState, Kinematics, Position, AGENT_SIZE, AGENT_SPEED_MAX, AGENT_SPEED_MIN,
};
use super::zone_map::ZoneMap;

/// Base names for the initial population
const AGENT_NAMES: [&str; 5] = ["Alex", "Sam", "Taylor", "Jordan", "Casey"];

/// Outcome of restoring agents from stored rows
#[derive(Debug, Default)]
pub struct LoadReport {
    pub restored: usize,
    pub rejected: Vec<InvalidRecord>,
}

impl LoadReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// The main simulation world
pub struct SimWorld {
    /// Static zone layout; also fixes the world bounds
    pub zone_map: ZoneMap,

    /// All agents, in creation order
    pub agents: Vec<Agent>,

    /// The human-controlled character
    pub player: Player,

    /// State machine tunables
    pub policy: BehaviorPolicy,

    /// Movement and boundary handling
    pub steering: SteeringIntegrator,

    /// Next id to assign; always above every id seen this run
    next_id: u64,

    /// Ticks simulated so far
    pub ticks: u64,

    /// Single random source for every decision in the world
    rng: StdRng,
}

impl SimWorld {
    /// Build a world with the default zone layout
    pub fn new(config: &SimConfig) -> Result<Self, ConfigurationError> {
        let zone_map = ZoneMap::default_layout(config.width, config.height)?;
        Ok(Self::with_zone_map(config, zone_map))
    }

    /// Build a world around an existing zone map. The map's size wins over the
    /// dimensions in `config`.
    pub fn with_zone_map(config: &SimConfig, zone_map: ZoneMap) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (width, height) = (zone_map.width(), zone_map.height());
        let policy = BehaviorPolicy {
            roam_jitter_chance: config.roam_jitter_chance.clamp(0.0, 1.0),
            ..BehaviorPolicy::default()
        };

        Self {
            player: Player::new(Position::new(width / 2.0, height / 2.0)),
            steering: SteeringIntegrator::new(width, height, config.boundaries),
            zone_map,
            agents: Vec::new(),
            policy,
            next_id: 1,
            ticks: 0,
            rng,
        }
    }

    /// Default-sized world with a seeded generator for reproducible runs
    pub fn new_with_seed(seed: u64) -> Result<Self, ConfigurationError> {
        Self::new(&SimConfig::seeded(seed))
    }

    pub fn width(&self) -> f32 {
        self.zone_map.width()
    }

    pub fn height(&self) -> f32 {
        self.zone_map.height()
    }

    /// The id the next created agent will get
    pub fn next_id(&self) -> AgentId {
        AgentId(self.next_id)
    }

    fn next_agent_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an agent at a random spot with random kinematics, affinities and
    /// state. `name` defaults to `New_<id>`.
    pub fn spawn_agent(&mut self, name: Option<String>) -> AgentId {
        let id = self.next_agent_id();
        let name = name.unwrap_or_else(|| format!("New_{}", id.0));

        let (width, height) = (self.width(), self.height());
        let position = Position::new(
            self.rng.random_range(0.0..=width),
            self.rng.random_range(0.0..=height),
        );
        let heading = self.rng.random_range(0.0..TAU);
        let speed = self.rng.random_range(AGENT_SPEED_MIN..=AGENT_SPEED_MAX);
        let affinities = assign_affinities(&mut self.rng);
        let state = self.policy.random_state(&mut self.rng);
        let timer = self.policy.sample_timer(&mut self.rng);

        let kinematics = Kinematics::new(position, heading, speed, AGENT_SIZE);
        self.agents
            .push(Agent::new(id, name, kinematics, affinities, state, timer));
        id
    }

    /// Create the starting population, named `<Base>_<id>`
    pub fn populate(&mut self, count: usize) -> Vec<AgentId> {
        (0..count)
            .map(|_| {
                let base = AGENT_NAMES.choose(&mut self.rng).copied().unwrap_or("Agent");
                let name = format!("{}_{}", base, self.next_id);
                self.spawn_agent(Some(name))
            })
            .collect()
    }

    /// Drop the most recently created live agent. Its id is never handed out again.
    pub fn remove_last_agent(&mut self) -> Option<Agent> {
        self.agents.pop()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|agent| agent.id == id)
    }

    /// Add agents from stored rows. Invalid or duplicate rows are skipped and
    /// reported; the id counter moves past every restored id.
    pub fn restore(&mut self, records: &[AgentRecord]) -> LoadReport {
        let mut report = LoadReport::default();
        let mut seen: HashSet<AgentId> = self.agents.iter().map(|agent| agent.id).collect();

        for record in records {
            let timer = self.policy.sample_timer(&mut self.rng);
            let result = Agent::from_record(record, timer).and_then(|agent| {
                if seen.contains(&agent.id) {
                    Err(InvalidRecord::DuplicateId(agent.id))
                } else {
                    Ok(agent)
                }
            });

            match result {
                Ok(mut agent) => {
                    let position = &mut agent.kinematics.position;
                    position.x = position.x.clamp(0.0, self.zone_map.width());
                    position.y = position.y.clamp(0.0, self.zone_map.height());

                    seen.insert(agent.id);
                    self.next_id = self.next_id.max(agent.id.0 + 1);
                    self.agents.push(agent);
                    report.restored += 1;
                }
                Err(err) => {
                    warn!("Skipping stored agent: {}", err);
                    report.rejected.push(err);
                }
            }
        }

        info!(
            "Restored {} agents ({} rejected)",
            report.restored,
            report.rejected_count()
        );
        report
    }

    /// Persisted form of every live agent, in creation order
    pub fn records(&self) -> Vec<AgentRecord> {
        self.agents.iter().map(Agent::to_record).collect()
    }

    /// Update every agent, one after another
    pub fn tick(&mut self) -> Vec<(AgentId, Transition)> {
        let mut transitions = Vec::new();

        for agent in &mut self.agents {
            if let Some(transition) = self.policy.decide(agent, &self.zone_map, &mut self.rng) {
                transitions.push((agent.id, transition));
            }

            let target = agent.target;
            let mode = agent.movement_mode();
            self.steering.step(&mut agent.kinematics, target, mode);
        }

        self.ticks += 1;
        transitions
    }

    /// Move the player and turn it toward the pointer
    pub fn update_player(&mut self, movement: Option<Direction>, pointer: Option<Position>) {
        if let Some(direction) = movement {
            let (width, height) = (self.width(), self.height());
            self.player.apply_movement(direction, width, height);
        }
        if let Some(pointer) = pointer {
            self.player.face(pointer);
        }
    }

    /// Number of agents in each behavior state
    pub fn state_counts(&self) -> [(BehaviorState, usize); 4] {
        BehaviorState::ALL.map(|state| {
            let count = self.agents.iter().filter(|agent| agent.state == state).count();
            (state, count)
        })
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== NPC Simulation Summary ===");
        println!("Ticks: {}", self.ticks);
        println!(
            "World: {}x{}, Zones: {}",
            self.width(),
            self.height(),
            self.zone_map.zones().len()
        );
        println!("Agents: {}", self.agents.len());
        let player = self.player.position();
        println!("Player: ({:.1}, {:.1})", player.x, player.y);
        println!();

        println!("--- States ---");
        for (state, count) in self.state_counts() {
            println!("  {}: {}", state.label(), count);
        }

        if !self.agents.is_empty() {
            println!("--- Agents ---");
            for agent in &self.agents {
                let position = agent.position();
                let zone = self
                    .zone_map
                    .zone_at(&position)
                    .map(|zone| zone.kind.label())
                    .unwrap_or("-");
                println!(
                    "  {} {}: {} timer={} position=({:.1}, {:.1}) zone={} home={:?} work={:?}",
                    agent.id,
                    agent.name,
                    agent.state.label(),
                    agent.state_timer,
                    position.x,
                    position.y,
                    zone,
                    agent.home_zone_type,
                    agent.work_zone_type,
                );
            }
        }
    }

    /// Render the zones, agents and player as text, `columns` x `rows` cells
    pub fn render_map(&self, columns: usize, rows: usize) -> String {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let cell_w = self.width() / columns as f32;
        let cell_h = self.height() / rows as f32;

        let mut grid: Vec<Vec<char>> = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|col| {
                        let center = Position::new(
                            (col as f32 + 0.5) * cell_w,
                            (row as f32 + 0.5) * cell_h,
                        );
                        self.zone_map
                            .zone_at(&center)
                            .map(|zone| zone.kind.glyph())
                            .unwrap_or(' ')
                    })
                    .collect()
            })
            .collect();

        let to_cell = |position: Position| -> (usize, usize) {
            let col = ((position.x / cell_w) as usize).min(columns - 1);
            let row = ((position.y / cell_h) as usize).min(rows - 1);
            (row, col)
        };

        for agent in &self.agents {
            let (row, col) = to_cell(agent.position());
            grid[row][col] = agent.state.glyph();
        }

        let (row, col) = to_cell(self.player.position());
        grid[row][col] = '@';

        let mut out = String::with_capacity((columns + 1) * rows);
        for row in &grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    /// Draw a visual map of the world in the terminal
    pub fn draw_map(&self) {
        println!("\n=== World Map ===");
        println!(
            "Legend: .=Residential :=Commercial ==Industrial ~=Recreational ,=Rural \
             w=Wandering W=Working S=Socializing R=Resting @=Player"
        );
        println!();
        print!("{}", self.render_map(100, 40));
        println!();
    }
}
