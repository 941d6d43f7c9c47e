//! The human-controlled character

use super::input::Direction;
use super::types::{Kinematics, Position, PLAYER_SIZE, PLAYER_SPEED};

/// Player character. Shares `Kinematics` with agents but has no behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub kinematics: Kinematics,
}

impl Player {
    /// Player standing at `position`, facing along +x
    pub fn new(position: Position) -> Self {
        Self {
            kinematics: Kinematics::new(position, 0.0, PLAYER_SPEED, PLAYER_SIZE),
        }
    }

    pub fn position(&self) -> Position {
        self.kinematics.position
    }

    /// Step one tick in the given direction, staying inside the world
    pub fn apply_movement(&mut self, direction: Direction, width: f32, height: f32) {
        let (dx, dy) = direction.unit_vector();
        let position = &mut self.kinematics.position;
        position.x = (position.x + dx * self.kinematics.speed).clamp(0.0, width);
        position.y = (position.y + dy * self.kinematics.speed).clamp(0.0, height);
    }

    /// Turn to face the pointer. A pointer on top of the player keeps the heading.
    pub fn face(&mut self, pointer: Position) {
        if pointer != self.kinematics.position {
            self.kinematics.heading = self.kinematics.position.heading_to(&pointer);
        }
    }
}
