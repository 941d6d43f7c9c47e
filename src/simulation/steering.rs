//! One-tick movement integration
//!
//! Straight-line motion toward a target or along the current heading, followed
//! by boundary handling. There is no obstacle or agent avoidance.

use std::f32::consts::PI;

use super::types::{normalize_heading, Kinematics, MovementMode, Position, STOP_THRESHOLD};

/// What happens when a move would leave the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Clamp the position onto the world edge, heading untouched
    #[default]
    Clamp,
    /// Clip the position and mirror the heading off the wall
    Reflect,
}

/// Boundary policy per movement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryPolicies {
    pub seeking: BoundaryPolicy,
    pub roaming: BoundaryPolicy,
}

impl BoundaryPolicies {
    pub fn for_mode(&self, mode: MovementMode) -> BoundaryPolicy {
        match mode {
            MovementMode::Seeking => self.seeking,
            MovementMode::Roaming => self.roaming,
        }
    }
}

/// Advances kinematics by one tick inside a `width` x `height` world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringIntegrator {
    pub width: f32,
    pub height: f32,
    pub stop_threshold: f32,
    pub boundaries: BoundaryPolicies,
}

impl SteeringIntegrator {
    pub fn new(width: f32, height: f32, boundaries: BoundaryPolicies) -> Self {
        Self {
            width,
            height,
            stop_threshold: STOP_THRESHOLD,
            boundaries,
        }
    }

    /// Move one tick. A distant target overrides the heading; a near or
    /// missing target keeps the current heading.
    pub fn step(&self, kinematics: &mut Kinematics, target: Option<Position>, mode: MovementMode) {
        if let Some(target) = target {
            if kinematics.position.distance(&target) > self.stop_threshold {
                kinematics.heading = kinematics.position.heading_to(&target);
            }
        }

        kinematics.advance(kinematics.speed);
        self.apply_boundary(kinematics, self.boundaries.for_mode(mode));
    }

    pub fn apply_boundary(&self, kinematics: &mut Kinematics, policy: BoundaryPolicy) {
        let position = &mut kinematics.position;
        match policy {
            BoundaryPolicy::Clamp => {
                position.x = position.x.clamp(0.0, self.width);
                position.y = position.y.clamp(0.0, self.height);
            }
            BoundaryPolicy::Reflect => {
                if position.x < 0.0 || position.x > self.width {
                    kinematics.heading = PI - kinematics.heading;
                    position.x = position.x.clamp(0.0, self.width);
                }
                if position.y < 0.0 || position.y > self.height {
                    kinematics.heading = -kinematics.heading;
                    position.y = position.y.clamp(0.0, self.height);
                }
                kinematics.heading = normalize_heading(kinematics.heading);
            }
        }
    }
}
