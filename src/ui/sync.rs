//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{
    heading_vector, to_screen, AgentAssets, AgentLink, EntityMappings, HudText, PendingInput,
    PlayerVisual, SimSession,
};
use crate::simulation::StepOutcome;

/// System to run one simulation tick with the input gathered since the last one
pub fn tick_simulation(
    mut session: NonSendMut<SimSession>,
    mut pending: ResMut<PendingInput>,
    mut exit: MessageWriter<AppExit>,
) {
    let input = pending.take_tick_input();
    if session.0.step(&input) == StepOutcome::Quit {
        exit.write(AppExit::Success);
    }
}

/// System to make a window close save like a quit command does
pub fn save_on_exit(mut exits: MessageReader<AppExit>, mut session: NonSendMut<SimSession>) {
    if exits.read().next().is_some() {
        session.0.shutdown();
    }
}

/// System to sync agent visuals from simulation state
pub fn sync_agents(
    mut commands: Commands,
    session: NonSend<SimSession>,
    assets: Res<AgentAssets>,
    mut mappings: ResMut<EntityMappings>,
    mut agent_query: Query<(
        &AgentLink,
        &mut Transform,
        &mut MeshMaterial2d<ColorMaterial>,
    )>,
) {
    let world_size = session.world_size();
    let world = session.0.world();

    // Agent no longer exists in simulation, despawn
    mappings.agents.retain(|id, entity| {
        let alive = world.agent(*id).is_some();
        if !alive {
            commands.entity(*entity).despawn();
        }
        alive
    });

    for (link, mut transform, mut material) in agent_query.iter_mut() {
        let Some(agent) = world.agent(link.0) else {
            continue;
        };
        let screen = to_screen(agent.position(), world_size);
        transform.translation = screen.extend(2.0);
        let wanted = assets.material(agent.state);
        if material.0 != wanted {
            material.0 = wanted;
        }
    }

    for agent in &world.agents {
        if mappings.agents.contains_key(&agent.id) {
            continue;
        }
        let screen = to_screen(agent.position(), world_size);
        let entity = commands
            .spawn((
                AgentLink(agent.id),
                Mesh2d(assets.mesh.clone()),
                MeshMaterial2d(assets.material(agent.state)),
                Transform::from_translation(screen.extend(2.0)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(agent.name.clone()),
                    TextFont {
                        font_size: 11.0,
                        ..default()
                    },
                    TextColor(Color::BLACK),
                    Transform::from_xyz(0.0, agent.kinematics.size + 8.0, 1.0),
                ));
            })
            .id();
        mappings.agents.insert(agent.id, entity);
    }
}

/// System to move the player visual
pub fn sync_player(
    session: NonSend<SimSession>,
    mut player_query: Query<&mut Transform, With<PlayerVisual>>,
) {
    let Ok(mut transform) = player_query.single_mut() else {
        return;
    };
    let screen = to_screen(session.0.world().player.position(), session.world_size());
    transform.translation = screen.extend(3.0);
}

/// System to draw heading lines for agents and the player
pub fn draw_headings(session: NonSend<SimSession>, mut gizmos: Gizmos) {
    let world_size = session.world_size();
    let world = session.0.world();

    for agent in &world.agents {
        let start = to_screen(agent.position(), world_size);
        let end = start + heading_vector(agent.kinematics.heading) * agent.kinematics.size;
        gizmos.line_2d(start, end, Color::BLACK);
    }

    let player = &world.player.kinematics;
    let start = to_screen(player.position, world_size);
    let end = start + heading_vector(player.heading) * player.size * 1.5;
    gizmos.line_2d(start, end, Color::WHITE);
}

/// System to update the HUD text
pub fn update_hud_text(
    session: NonSend<SimSession>,
    mut text_query: Query<(&HudText, &mut Text)>,
) {
    let world = session.0.world();

    for (kind, mut text) in text_query.iter_mut() {
        match kind {
            HudText::AgentCount => {
                **text = format!("NPCs: {}", world.agents.len());
            }
            HudText::States => {
                **text = world
                    .state_counts()
                    .iter()
                    .map(|(state, count)| format!("{}: {}", state.label(), count))
                    .collect::<Vec<_>>()
                    .join("  ");
            }
            HudText::Clock => {
                let stats = session.0.stats();
                **text = format!(
                    "Time: {:.1}s  Saves: {} ({} failed)",
                    session.0.clock().elapsed().as_secs_f32(),
                    stats.saves,
                    stats.failed_saves
                );
            }
        }
    }
}
