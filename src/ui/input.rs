//! Input handling systems
//!
//! Key presses and the cursor are collected every frame into `PendingInput`,
//! which the fixed-rate tick hands to the session.

use bevy::prelude::*;

use super::components::{to_world, MainCamera, PendingInput, SimSession};
use crate::simulation::{Command, Direction};

/// Map keyboard presses to session commands and held keys to a direction
pub fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, mut pending: ResMut<PendingInput>) {
    if keyboard.just_pressed(KeyCode::KeyN) {
        pending.commands.push(Command::AddAgent);
    }
    if keyboard.any_just_pressed([KeyCode::Backspace, KeyCode::Delete]) {
        pending.commands.push(Command::RemoveLastAgent);
    }
    if keyboard.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ]) {
        pending.commands.push(Command::Quit);
    }

    pending.movement = Direction::from_axes(
        keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
    );
}

/// System to track the cursor in world coordinates
pub fn update_pointer(
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    session: NonSend<SimSession>,
    mut pending: ResMut<PendingInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    // Keep the last known pointer while the cursor is outside the window
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    let Ok(point) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    pending.pointer = Some(to_world(point, session.world_size()));
}
