//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from the running `Session` and renders it with Bevy's 2D renderer.

mod components;
mod input;
mod sync;
mod world;

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;

pub use components::{AgentAssets, AgentLink, EntityMappings, PendingInput, SimSession};
pub use sync::sync_agents;

use crate::simulation::{AgentStore, Session, SimConfig};
use input::{handle_input, update_pointer};
use sync::{draw_headings, save_on_exit, sync_player, tick_simulation, update_hud_text};
use world::{setup_hud, setup_world};

/// Plugin to register all UI systems. Expects a `SimSession` non-send
/// resource and a fixed timestep matching the session clock.
pub struct NpcSimUIPlugin;

impl Plugin for NpcSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EntityMappings>()
            .init_resource::<PendingInput>()
            .insert_resource(ClearColor(Color::srgb(0.15, 0.15, 0.15)))
            .add_systems(Startup, (setup_world, setup_hud))
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(Last, save_on_exit)
            .add_systems(
                Update,
                (
                    handle_input,
                    update_pointer,
                    sync_agents,
                    sync_player,
                    draw_headings,
                    update_hud_text,
                ),
            );
    }
}

/// Open a window and run the session until the user quits
pub fn run_with_ui(config: SimConfig, store: Box<dyn AgentStore + Send>) -> anyhow::Result<()> {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(LogPlugin {
                filter: "warn,npc_sim=debug".to_string(),
                level: bevy::log::Level::DEBUG,
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "NPC Sim".into(),
                    resolution: (config.width, config.height).into(),
                    ..default()
                }),
                ..default()
            }),
    );

    // Start after the log plugin so restore messages are visible
    let session = Session::start(&config, store).context("Failed to build the world")?;

    app.insert_resource(Time::<Fixed>::from_duration(config.tick_duration))
        .insert_non_send_resource(SimSession(session))
        .add_plugins(NpcSimUIPlugin)
        .run();
    Ok(())
}
