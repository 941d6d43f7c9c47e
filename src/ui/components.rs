//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{
    AgentId, AgentStore, BehaviorState, Direction, Position, Session, TickInput,
};

/// The running session. Held as a non-send resource because the agent store
/// is not required to be `Sync`.
pub struct SimSession(pub Session<Box<dyn AgentStore + Send>>);

impl SimSession {
    /// World size in world units
    pub fn world_size(&self) -> Vec2 {
        let world = self.0.world();
        Vec2::new(world.width(), world.height())
    }
}

/// Input gathered between fixed ticks
#[derive(Resource, Default)]
pub struct PendingInput {
    /// Commands since the last tick, consumed by it
    pub commands: Vec<crate::simulation::Command>,
    /// Currently held direction keys
    pub movement: Option<Direction>,
    /// Last known cursor position in world coordinates
    pub pointer: Option<Position>,
}

impl PendingInput {
    /// Input for one tick. Commands are handed over once; held keys and the
    /// pointer carry over to following ticks.
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            commands: std::mem::take(&mut self.commands),
            movement: self.movement,
            pointer: self.pointer,
        }
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Links a Bevy entity to a simulation agent
#[derive(Component)]
pub struct AgentLink(pub AgentId);

/// Marker for the player's visual
#[derive(Component)]
pub struct PlayerVisual;

/// Marker for the agent counter in the HUD
#[derive(Component)]
pub enum HudText {
    AgentCount,
    States,
    Clock,
}

/// Resource to track Bevy entities mapped to simulation agents. An agent
/// missing from the world has its entity despawned.
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub agents: HashMap<AgentId, Entity>,
}

/// Shared mesh and per-state materials for agent circles
#[derive(Resource)]
pub struct AgentAssets {
    pub mesh: Handle<Mesh>,
    pub materials: HashMap<BehaviorState, Handle<ColorMaterial>>,
}

impl AgentAssets {
    pub fn material(&self, state: BehaviorState) -> Handle<ColorMaterial> {
        self.materials.get(&state).cloned().unwrap_or_default()
    }
}

/// Color of an agent in a given state
pub fn state_color(state: BehaviorState) -> Color {
    match state {
        BehaviorState::Wandering => Color::srgb(0.6, 0.6, 0.6),
        BehaviorState::Working => Color::srgb(0.85, 0.25, 0.2),
        BehaviorState::Socializing => Color::srgb(0.95, 0.8, 0.2),
        BehaviorState::Resting => Color::srgb(0.25, 0.45, 0.9),
    }
}

/// Simulation coordinates have +y pointing down with the origin at the top-left
/// corner; Bevy's 2D camera looks at the world centre with +y up.
pub fn to_screen(position: Position, world_size: Vec2) -> Vec2 {
    Vec2::new(
        position.x - world_size.x / 2.0,
        world_size.y / 2.0 - position.y,
    )
}

pub fn to_world(point: Vec2, world_size: Vec2) -> Position {
    Position::new(point.x + world_size.x / 2.0, world_size.y / 2.0 - point.y)
}

/// Unit vector on screen for a simulation heading
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), -heading.sin())
}
