//! Error types for the simulation

use thiserror::Error;

use super::types::{AgentId, AreaType};

/// The world cannot be built with the requested layout.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("zone layout is empty")]
    EmptyLayout,
    #[error("zone {index} ({kind:?}) has an invalid rectangle ({x1}, {y1}, {x2}, {y2})")]
    InvalidZone {
        index: usize,
        kind: AreaType,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    #[error("zone layout has no {0:?} zone")]
    MissingAreaType(AreaType),
}

/// The agent store could not be reached or a query failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("duckdb error: {0}")]
    DuckDb(#[from] duckdb::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A persisted row that cannot become a live agent.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidRecord {
    #[error("agent id {0} is not positive")]
    NonPositiveId(i64),
    #[error("agent {0} appears more than once")]
    DuplicateId(AgentId),
    #[error("agent {id} has unknown state code {code}")]
    UnknownState { id: AgentId, code: i32 },
    #[error("agent {id} has unknown {field} code {code}")]
    UnknownZoneType {
        id: AgentId,
        field: &'static str,
        code: i32,
    },
    #[error("agent {id} has invalid {field}: {value}")]
    InvalidKinematics {
        id: AgentId,
        field: &'static str,
        value: f64,
    },
}
