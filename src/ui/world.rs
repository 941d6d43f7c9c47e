//! World setup systems for the camera, zone backdrop and HUD

use bevy::prelude::*;
use std::collections::HashMap;

use super::components::{
    state_color, to_screen, AgentAssets, HudText, MainCamera, PlayerVisual, SimSession,
};
use crate::simulation::{AreaType, BehaviorState, AGENT_SIZE, PLAYER_SIZE};

fn zone_color(kind: AreaType) -> Color {
    match kind {
        AreaType::Residential => Color::srgb(0.78, 0.72, 0.55),
        AreaType::Commercial => Color::srgb(0.55, 0.7, 0.85),
        AreaType::Industrial => Color::srgb(0.55, 0.55, 0.6),
        AreaType::Recreational => Color::srgb(0.45, 0.75, 0.45),
        AreaType::Rural => Color::srgb(0.7, 0.8, 0.5),
    }
}

/// System to spawn the camera, one sprite per zone and the player visual
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    session: NonSend<SimSession>,
) {
    commands.spawn((MainCamera, Camera2d));

    let world_size = session.world_size();
    let world = session.0.world();

    for zone in world.zone_map.zones() {
        let rect = &zone.rect;
        let center = to_screen(rect.center(), world_size);

        commands.spawn((
            Sprite::from_color(zone_color(zone.kind), Vec2::new(rect.width(), rect.height())),
            Transform::from_xyz(center.x, center.y, 0.0),
        ));
        commands.spawn((
            Text2d::new(zone.kind.label()),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::srgba(0.1, 0.1, 0.1, 0.6)),
            Transform::from_xyz(center.x, center.y, 1.0),
        ));
    }

    let agent_materials: HashMap<BehaviorState, Handle<ColorMaterial>> = BehaviorState::ALL
        .iter()
        .map(|state| (*state, materials.add(state_color(*state))))
        .collect();
    commands.insert_resource(AgentAssets {
        mesh: meshes.add(Circle::new(AGENT_SIZE)),
        materials: agent_materials,
    });

    let player = to_screen(world.player.position(), world_size);
    commands.spawn((
        PlayerVisual,
        Mesh2d(meshes.add(Circle::new(PLAYER_SIZE))),
        MeshMaterial2d(materials.add(Color::srgb(1.0, 0.4, 0.0))),
        Transform::from_xyz(player.x, player.y, 3.0),
    ));
}

/// System to setup the stats overlay at the top-left of the screen
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("NPCs: 0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.2, 1.0, 0.2)),
                HudText::AgentCount,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                HudText::States,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                HudText::Clock,
            ));
        });
}
