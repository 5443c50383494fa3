//! Shared primitives: geometry, identifiers, configuration, errors

pub mod config;
pub mod error;
pub mod types;

pub use config::SquadConfig;
pub use error::{Result, TacticsError};
pub use types::{CellDist, CellPos, SquadId, Tick, UnitId, WorldPos, CELL_SIZE};
