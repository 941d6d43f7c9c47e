//! Input commands, decoupled from any particular keyboard or window

use std::f32::consts::FRAC_1_SQRT_2;

use super::types::Position;

/// Discrete commands applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddAgent,
    RemoveLastAgent,
    Quit,
}

/// 8-way movement intent for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Build a direction from per-axis key state (screen coordinates, +y down).
    /// Opposite keys cancel out.
    pub fn from_axes(left: bool, right: bool, up: bool, down: bool) -> Option<Self> {
        let dx = right as i8 - left as i8;
        let dy = down as i8 - up as i8;
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (-1, -1) => Some(Direction::UpLeft),
            (1, -1) => Some(Direction::UpRight),
            (-1, 1) => Some(Direction::DownLeft),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// Unit vector in world coordinates (+y down); diagonals are normalized
    pub fn unit_vector(self) -> (f32, f32) {
        const D: f32 = FRAC_1_SQRT_2;
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::UpLeft => (-D, -D),
            Direction::UpRight => (D, -D),
            Direction::DownLeft => (-D, D),
            Direction::DownRight => (D, D),
        }
    }
}

/// Everything the input source supplies for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub commands: Vec<Command>,
    pub movement: Option<Direction>,
    /// Pointer position in world coordinates, if known
    pub pointer: Option<Position>,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_command(command: Command) -> Self {
        Self {
            commands: vec![command],
            ..Self::default()
        }
    }
}
