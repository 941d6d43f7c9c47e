//! Standalone NPC simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod agent;
mod behavior;
mod clock;
mod config;
mod error;
mod input;
mod persistence;
mod player;
mod session;
mod steering;
mod types;
mod world;
mod zone_map;

pub use agent::{Affinities, Agent};
pub use behavior::{assign_affinities, select_target, BehaviorPolicy, Transition};
pub use clock::{SimulationClock, DEFAULT_SAVE_INTERVAL, DEFAULT_TICK_DURATION};
pub use config::{SimConfig, DEFAULT_HEIGHT, DEFAULT_INITIAL_AGENTS, DEFAULT_WIDTH};
pub use error::{ConfigurationError, InvalidRecord, PersistenceError};
pub use input::{Command, Direction, TickInput};
pub use persistence::{AgentRecord, AgentStore, DuckDbStore, MemoryStore};
pub use player::Player;
pub use session::{SaveReason, Session, SessionStats, StepOutcome};
pub use steering::{BoundaryPolicies, BoundaryPolicy, SteeringIntegrator};
pub use types::{
    normalize_heading, AgentId, AreaType, BehaviorState, Kinematics, MovementMode, Position,
    AGENT_SIZE, AGENT_SPEED_MAX, AGENT_SPEED_MIN, PLAYER_SIZE, PLAYER_SPEED, STATE_TIMER_MAX,
    STATE_TIMER_MIN, STOP_THRESHOLD, WANDER_HEADING_CHANCE,
};
pub use world::{LoadReport, SimWorld};
pub use zone_map::{Rect, Zone, ZoneMap};
