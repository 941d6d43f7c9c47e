//! Autonomous agents and their persisted form
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::error::InvalidRecord;
use super::persistence::AgentRecord;
use super::types::{
    AgentId, AreaType, BehaviorState, Kinematics, MovementMode, Position, AGENT_SIZE,
};

/// Zone types an agent is attached to for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affinities {
    pub home: AreaType,
    pub work: AreaType,
}

/// An autonomous simulated entity
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub kinematics: Kinematics,
    pub state: BehaviorState,
    /// Ticks left before the state is re-evaluated
    pub state_timer: u32,
    /// Point the agent is steering toward; always `None` while wandering
    pub target: Option<Position>,
    pub home_zone_type: AreaType,
    pub work_zone_type: AreaType,
}

impl Agent {
    pub fn new(
        id: AgentId,
        name: String,
        kinematics: Kinematics,
        affinities: Affinities,
        state: BehaviorState,
        state_timer: u32,
    ) -> Self {
        Self {
            id,
            name,
            kinematics,
            state,
            state_timer,
            target: None,
            home_zone_type: affinities.home,
            work_zone_type: affinities.work,
        }
    }

    pub fn position(&self) -> Position {
        self.kinematics.position
    }

    pub fn movement_mode(&self) -> MovementMode {
        self.state.movement_mode()
    }

    /// Put the agent into `state` with a fresh timer. The target is dropped so
    /// the next tick picks one matching the new state.
    pub fn force_state(&mut self, state: BehaviorState, state_timer: u32) {
        self.state = state;
        self.state_timer = state_timer;
        self.target = None;
    }

    /// Zone type the agent heads for in its current state
    pub fn destination_type(&self) -> Option<AreaType> {
        match self.state {
            BehaviorState::Wandering => None,
            BehaviorState::Working => Some(self.work_zone_type),
            BehaviorState::Resting => Some(self.home_zone_type),
            BehaviorState::Socializing => Some(AreaType::Recreational),
        }
    }

    pub fn to_record(&self) -> AgentRecord {
        AgentRecord {
            id: self.id.0 as i64,
            x: self.kinematics.position.x as f64,
            y: self.kinematics.position.y as f64,
            name: self.name.clone(),
            heading: self.kinematics.heading as f64,
            speed: self.kinematics.speed as f64,
            state: self.state.code(),
            work_zone_type: self.work_zone_type.code(),
            home_zone_type: self.home_zone_type.code(),
        }
    }

    /// Rebuild an agent from a stored row. The timer is not persisted, so the
    /// caller supplies a freshly sampled one.
    pub fn from_record(record: &AgentRecord, state_timer: u32) -> Result<Self, InvalidRecord> {
        if record.id <= 0 {
            return Err(InvalidRecord::NonPositiveId(record.id));
        }
        let id = AgentId(record.id as u64);

        let state = BehaviorState::try_from(record.state)
            .map_err(|code| InvalidRecord::UnknownState { id, code })?;
        let work = AreaType::try_from(record.work_zone_type).map_err(|code| {
            InvalidRecord::UnknownZoneType {
                id,
                field: "work_zone_type",
                code,
            }
        })?;
        let home = AreaType::try_from(record.home_zone_type).map_err(|code| {
            InvalidRecord::UnknownZoneType {
                id,
                field: "home_zone_type",
                code,
            }
        })?;

        // Checked after narrowing: values beyond f32 range become infinite
        let narrow = |field: &'static str, value: f64| {
            let narrowed = value as f32;
            if narrowed.is_finite() {
                Ok(narrowed)
            } else {
                Err(InvalidRecord::InvalidKinematics { id, field, value })
            }
        };
        let x = narrow("x", record.x)?;
        let y = narrow("y", record.y)?;
        let heading = narrow("heading", record.heading)?;
        let speed = narrow("speed", record.speed)?;
        if speed <= 0.0 {
            return Err(InvalidRecord::InvalidKinematics {
                id,
                field: "speed",
                value: record.speed,
            });
        }

        let kinematics = Kinematics::new(Position::new(x, y), heading, speed, AGENT_SIZE);

        Ok(Self::new(
            id,
            record.name.clone(),
            kinematics,
            Affinities { home, work },
            state,
            state_timer,
        ))
    }
}
