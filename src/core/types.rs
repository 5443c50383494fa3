//! Core type definitions used throughout the codebase
//!
//! World geometry is integer-based: positions are measured in world units
//! with 1024 units per map cell, and distance comparisons use squared
//! horizontal lengths in i64. Floating point never enters simulation-visible
//! decisions, which keeps bot behavior identical across lockstep clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// World units per map cell
pub const CELL_SIZE: i32 = 1024;

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Handle to a unit owned by the external engine
///
/// The engine's actor table is the source of truth; a `UnitId` may refer to
/// a unit that has since died or left the world, so liveness must be
/// re-checked through the world oracle before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Unique identifier for squads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquadId(pub Uuid);

impl SquadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SquadId {
    fn default() -> Self {
        Self::new()
    }
}

/// Fine-grained world position (1024 units per cell)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
}

impl WorldPos {
    pub const ZERO: WorldPos = WorldPos { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared horizontal distance to another position, in world units²
    pub fn dist_sq(&self, other: &Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Cell containing this position
    pub fn to_cell(&self) -> CellPos {
        CellPos {
            x: self.x.div_euclid(CELL_SIZE),
            y: self.y.div_euclid(CELL_SIZE),
        }
    }
}

/// Map cell coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World position of this cell's center
    pub fn center(&self) -> WorldPos {
        WorldPos {
            x: self.x * CELL_SIZE + CELL_SIZE / 2,
            y: self.y * CELL_SIZE + CELL_SIZE / 2,
        }
    }
}

/// Distance expressed in whole cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellDist(pub i32);

impl CellDist {
    pub fn to_world_units(&self) -> i32 {
        self.0 * CELL_SIZE
    }

    /// Squared length in world units², for comparison against `dist_sq`
    pub fn length_sq(&self) -> i64 {
        let len = self.to_world_units() as i64;
        len * len
    }
}
