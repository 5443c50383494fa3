//! Read-only oracle over the host engine's world state
//!
//! The squad states never touch the engine's actor model directly; every
//! spatial query, liveness check and capability probe goes through
//! [`TacticalWorld`]. The host implements this once per bot player.

use serde::{Deserialize, Serialize};

use crate::core::types::{CellDist, CellPos, UnitId, WorldPos};

/// Whether a unit is currently fighting or maneuvering into range
///
/// `is_attacking` means the unit has a valid target and is firing (or about
/// to); `is_approaching` means it is still moving to get the target into
/// range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackStatus {
    pub is_attacking: bool,
    pub is_approaching: bool,
}

/// Ordinal damage state of a unit; higher is worse
///
/// Guerrilla squads compare these tick-to-tick to detect that a member has
/// taken damage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum HealthState {
    #[default]
    Undamaged,
    Light,
    Medium,
    Heavy,
    Critical,
    Dead,
}

/// Per-unit input to the attack-or-flee heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatProfile {
    /// Current hit points as a fraction of maximum, in [0, 1]
    pub health_fraction: f32,
    /// Nominal weapon strength; scale is host-defined but must be shared
    /// between friendly and enemy profiles
    pub attack_power: u32,
    /// False for units with no weapons at all (e.g. harvesters)
    pub is_armed: bool,
}

/// The engine-side world as the squad logic sees it
///
/// All queries are synchronous and must be cheap; they are issued every
/// squad tick. Enemy-finding queries respect the host's own target
/// preferences (`is_preferred_enemy`), and tie-breaking between equidistant
/// candidates follows host iteration order.
pub trait TacticalWorld {
    fn is_alive(&self, unit: UnitId) -> bool;
    fn is_in_world(&self, unit: UnitId) -> bool;
    fn is_owned_by_bot(&self, unit: UnitId) -> bool;

    /// True when the unit is dead, despawned, or no longer ours; such units
    /// are pruned from rosters rather than ordered
    fn unit_cannot_be_ordered(&self, unit: UnitId) -> bool {
        !self.is_alive(unit) || !self.is_in_world(unit) || !self.is_owned_by_bot(unit)
    }

    fn position(&self, unit: UnitId) -> WorldPos;

    fn location(&self, unit: UnitId) -> CellPos {
        self.position(unit).to_cell()
    }

    /// Visibility of an enemy unit under the bot's fog of war
    fn is_visible(&self, unit: UnitId) -> bool;

    /// Closest preferred enemy to `from`, anywhere on the map
    fn find_closest_enemy(&self, from: UnitId) -> Option<UnitId>;

    /// Closest preferred enemy to `from` within `radius`
    fn find_closest_enemy_within(&self, from: UnitId, radius: CellDist) -> Option<UnitId>;

    /// All preferred enemies within `radius` of a position
    fn enemies_near(&self, center: WorldPos, radius: CellDist) -> Vec<UnitId>;

    fn is_preferred_enemy(&self, unit: UnitId) -> bool;

    fn can_attack_target(&self, unit: UnitId, target: UnitId) -> bool;

    fn attack_status(&self, unit: UnitId) -> AttackStatus;

    fn combat_profile(&self, unit: UnitId) -> CombatProfile;

    fn health_state(&self, unit: UnitId) -> HealthState;

    // Air unit resupply probes, used by protection squads.

    fn is_air_unit(&self, unit: UnitId) -> bool;

    /// Whether the unit carries limited-ammo weapons at all
    fn has_ammo_pools(&self, unit: UnitId) -> bool;

    fn has_ammo(&self, unit: UnitId) -> bool;

    fn reloads_automatically(&self, unit: UnitId) -> bool;

    fn is_rearming(&self, unit: UnitId) -> bool;

    /// Candidate rally cells: locations of the bot's own structures
    fn friendly_building_locations(&self) -> Vec<CellPos>;
}
