//! Core types for the NPC simulation
//!
//! These are standalone types that don't depend on Bevy.

use std::f32::consts::TAU;
use std::fmt;

/// A unique identifier for an agent.
/// Ids are positive and assigned monotonically by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A 2D position in world units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading (radians, normalized) pointing from this position to another
    pub fn heading_to(&self, other: &Position) -> f32 {
        normalize_heading((other.y - self.y).atan2(other.x - self.x))
    }
}

/// Wrap an angle into [0, 2π)
pub fn normalize_heading(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Category of a zone in the world map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaType {
    Residential,
    Commercial,
    Industrial,
    Recreational,
    Rural,
}

impl AreaType {
    pub const ALL: [AreaType; 5] = [
        AreaType::Residential,
        AreaType::Commercial,
        AreaType::Industrial,
        AreaType::Recreational,
        AreaType::Rural,
    ];

    /// Integer code used by the persistence layer
    pub fn code(self) -> i32 {
        match self {
            AreaType::Residential => 1,
            AreaType::Commercial => 2,
            AreaType::Industrial => 3,
            AreaType::Recreational => 4,
            AreaType::Rural => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AreaType::Residential => "RESIDENTIAL",
            AreaType::Commercial => "COMMERCIAL",
            AreaType::Industrial => "INDUSTRIAL",
            AreaType::Recreational => "RECREATIONAL",
            AreaType::Rural => "RURAL",
        }
    }

    /// Character used for the zone background in the terminal map
    pub fn glyph(self) -> char {
        match self {
            AreaType::Residential => '.',
            AreaType::Commercial => ':',
            AreaType::Industrial => '=',
            AreaType::Recreational => '~',
            AreaType::Rural => ',',
        }
    }
}

impl TryFrom<i32> for AreaType {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        AreaType::ALL
            .into_iter()
            .find(|area| area.code() == code)
            .ok_or(code)
    }
}

/// Behavioral state of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorState {
    /// Free-roaming by heading, never seeks a target
    Wandering,
    /// Heading to a zone of the agent's work type
    Working,
    /// Heading to a recreational zone
    Socializing,
    /// Heading to a zone of the agent's home type
    Resting,
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 4] = [
        BehaviorState::Wandering,
        BehaviorState::Working,
        BehaviorState::Socializing,
        BehaviorState::Resting,
    ];

    /// Integer code used by the persistence layer
    pub fn code(self) -> i32 {
        match self {
            BehaviorState::Wandering => 1,
            BehaviorState::Working => 2,
            BehaviorState::Socializing => 3,
            BehaviorState::Resting => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BehaviorState::Wandering => "wandering",
            BehaviorState::Working => "working",
            BehaviorState::Socializing => "socializing",
            BehaviorState::Resting => "resting",
        }
    }

    /// Character used for the agent in the terminal map
    pub fn glyph(self) -> char {
        match self {
            BehaviorState::Wandering => 'w',
            BehaviorState::Working => 'W',
            BehaviorState::Socializing => 'S',
            BehaviorState::Resting => 'R',
        }
    }

    pub fn movement_mode(self) -> MovementMode {
        match self {
            BehaviorState::Wandering => MovementMode::Roaming,
            _ => MovementMode::Seeking,
        }
    }
}

impl TryFrom<i32> for BehaviorState {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        BehaviorState::ALL
            .into_iter()
            .find(|state| state.code() == code)
            .ok_or(code)
    }
}

/// How an agent is currently moving, which selects its boundary policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    /// Steering toward a target inside a zone
    Seeking,
    /// Moving along its own heading
    Roaming,
}

/// Kinematic record shared by agents and the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: Position,
    /// Radians in [0, 2π)
    pub heading: f32,
    /// World units per tick
    pub speed: f32,
    /// Render radius
    pub size: f32,
}

impl Kinematics {
    pub fn new(position: Position, heading: f32, speed: f32, size: f32) -> Self {
        Self {
            position,
            heading: normalize_heading(heading),
            speed,
            size,
        }
    }

    /// Move `distance` world units along the current heading
    pub fn advance(&mut self, distance: f32) {
        self.position.x += self.heading.cos() * distance;
        self.position.y += self.heading.sin() * distance;
    }
}

/// Distance under which a seeking agent stops steering toward its target
pub const STOP_THRESHOLD: f32 = 10.0;

/// Range the state timer is re-sampled into (ticks, inclusive)
pub const STATE_TIMER_MIN: u32 = 60;
pub const STATE_TIMER_MAX: u32 = 180;

/// Per-tick probability that a wandering agent re-rolls its heading
pub const WANDER_HEADING_CHANCE: f64 = 0.02;

/// Speed range for newly created agents (world units per tick)
pub const AGENT_SPEED_MIN: f32 = 1.0;
pub const AGENT_SPEED_MAX: f32 = 3.0;

/// Render radius of an agent
pub const AGENT_SIZE: f32 = 15.0;

/// Player movement speed (world units per tick) and render radius
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_SIZE: f32 = 20.0;
