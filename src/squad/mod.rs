//! Squad model and tactical behavior states
//!
//! A squad is a group of bot-owned combat units sharing one state machine.
//! Three state families exist: assault (sustained ground attack), guerrilla
//! (hit-and-run) and protection (escort/defense). The families share the
//! leader-based regroup and stuck-recovery machinery in [`base`].

pub mod base;
pub mod fuzzy;
pub mod ground;
pub mod guerrilla;
pub mod machine;
pub mod protection;

use serde::Serialize;

use crate::core::types::{CellPos, SquadId, UnitId, WorldPos};
use crate::engine::world::{HealthState, TacticalWorld};

pub use fuzzy::AttackOrFlee;
pub use machine::{Control, SquadState, StateMachine, Transition};

/// Behavior flavor a squad was formed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SquadKind {
    /// Formation advance and sustained engagement
    Assault,
    /// Brief engagements followed by forced withdrawal to a rally point
    Guerrilla,
    /// Defend a base or escort a point
    Protection,
}

/// A squad member with its last-observed position and damage state
///
/// Owned snapshot rather than a borrowed actor reference: members are
/// revalidated against the world oracle every tick, so a stale entry can
/// never dangle past its unit's death.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SquadMember {
    pub unit: UnitId,
    /// Position recorded at the last stuck-recovery sweep
    pub last_pos: WorldPos,
    /// Damage state recorded at the last guerrilla engagement tick
    pub last_health: HealthState,
}

/// A managed group of combat units sharing one tactical state machine
#[derive(Debug, Clone, Serialize)]
pub struct Squad {
    pub id: SquadId,
    pub kind: SquadKind,
    pub members: Vec<SquadMember>,
    /// Currently pursued enemy, if any; revalidated every tick
    pub target: Option<UnitId>,
    /// Retreat/regroup anchor cell
    pub base_location: CellPos,
}

impl Squad {
    pub fn new(kind: SquadKind, base_location: CellPos) -> Self {
        Self {
            id: SquadId::new(),
            kind,
            members: Vec::new(),
            target: None,
            base_location,
        }
    }

    /// Add a unit, snapshotting its current position and health
    pub fn add_member(&mut self, unit: UnitId, world: &dyn TacticalWorld) {
        self.members.push(SquadMember {
            unit,
            last_pos: world.position(unit),
            last_health: world.health_state(unit),
        });
    }

    /// Remove a unit from the roster; returns true if it was present
    pub fn remove_member(&mut self, unit: UnitId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.unit != unit);
        self.members.len() != before
    }

    /// A squad is valid while it has at least one live member
    pub fn is_valid(&self) -> bool {
        !self.members.is_empty()
    }

    /// Member unit handles, in roster order
    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.members.iter().map(|m| m.unit).collect()
    }

    pub fn set_target(&mut self, target: Option<UnitId>) {
        self.target = target;
    }

    /// Whether the current target is still alive and on the map
    pub fn is_target_valid(&self, world: &dyn TacticalWorld) -> bool {
        match self.target {
            Some(t) => world.is_alive(t) && world.is_in_world(t),
            None => false,
        }
    }

    /// Drop members that can no longer be ordered (dead, despawned, or no
    /// longer ours) and clear an invalid target
    ///
    /// Called every tick before any state logic runs; states may therefore
    /// assume every roster entry is orderable.
    pub fn prune(&mut self, world: &dyn TacticalWorld) {
        self.members
            .retain(|m| !world.unit_cannot_be_ordered(m.unit));
        if !self.is_target_valid(world) {
            self.target = None;
        }
    }
}
