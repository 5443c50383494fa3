//! Shared test doubles: a scriptable world oracle and a recording order sink
//!
//! `FakeWorld` stores units in a `BTreeMap` so closest-enemy tie-breaking is
//! deterministic across runs, matching the determinism the real oracle is
//! required to provide.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SquadConfig;
use crate::core::types::{CellDist, CellPos, UnitId, WorldPos};
use crate::engine::orders::{BotOrders, Order, RetreatOptions};
use crate::engine::world::{AttackStatus, CombatProfile, HealthState, TacticalWorld};

/// One scripted unit; mutate through [`FakeWorld::unit_mut`] between ticks
#[derive(Debug, Clone)]
pub struct FakeUnit {
    pub pos: WorldPos,
    pub alive: bool,
    pub in_world: bool,
    pub owned: bool,
    pub preferred_enemy: bool,
    pub visible: bool,
    pub profile: CombatProfile,
    pub health: HealthState,
    pub attack_status: AttackStatus,
    pub can_attack: bool,
    pub air: bool,
    pub ammo_pools: bool,
    pub ammo: bool,
    pub auto_reload: bool,
    pub rearming: bool,
}

impl FakeUnit {
    fn at(pos: WorldPos, owned: bool) -> Self {
        Self {
            pos,
            alive: true,
            in_world: true,
            owned,
            preferred_enemy: !owned,
            visible: true,
            profile: CombatProfile {
                health_fraction: 1.0,
                attack_power: 100,
                is_armed: true,
            },
            health: HealthState::Undamaged,
            attack_status: AttackStatus::default(),
            can_attack: false,
            air: false,
            ammo_pools: false,
            ammo: true,
            auto_reload: false,
            rearming: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeWorld {
    units: BTreeMap<UnitId, FakeUnit>,
    pub buildings: Vec<CellPos>,
    next_id: u32,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_friendly(&mut self, pos: WorldPos) -> UnitId {
        self.add(FakeUnit::at(pos, true))
    }

    pub fn add_enemy(&mut self, pos: WorldPos) -> UnitId {
        self.add(FakeUnit::at(pos, false))
    }

    fn add(&mut self, unit: FakeUnit) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.insert(id, unit);
        id
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut FakeUnit {
        self.units.get_mut(&id).expect("unknown test unit")
    }

    fn unit(&self, id: UnitId) -> &FakeUnit {
        self.units.get(&id).expect("unknown test unit")
    }

    fn targetable_enemies(&self) -> impl Iterator<Item = (UnitId, &FakeUnit)> {
        self.units
            .iter()
            .filter(|(_, u)| u.alive && u.in_world && !u.owned && u.preferred_enemy)
            .map(|(id, u)| (*id, u))
    }
}

impl TacticalWorld for FakeWorld {
    fn is_alive(&self, unit: UnitId) -> bool {
        self.unit(unit).alive
    }

    fn is_in_world(&self, unit: UnitId) -> bool {
        self.unit(unit).in_world
    }

    fn is_owned_by_bot(&self, unit: UnitId) -> bool {
        self.unit(unit).owned
    }

    fn position(&self, unit: UnitId) -> WorldPos {
        self.unit(unit).pos
    }

    fn is_visible(&self, unit: UnitId) -> bool {
        self.unit(unit).visible
    }

    fn find_closest_enemy(&self, from: UnitId) -> Option<UnitId> {
        let origin = self.position(from);
        self.targetable_enemies()
            .min_by_key(|(_, u)| u.pos.dist_sq(&origin))
            .map(|(id, _)| id)
    }

    fn find_closest_enemy_within(&self, from: UnitId, radius: CellDist) -> Option<UnitId> {
        let origin = self.position(from);
        self.targetable_enemies()
            .filter(|(_, u)| u.pos.dist_sq(&origin) <= radius.length_sq())
            .min_by_key(|(_, u)| u.pos.dist_sq(&origin))
            .map(|(id, _)| id)
    }

    fn enemies_near(&self, center: WorldPos, radius: CellDist) -> Vec<UnitId> {
        self.targetable_enemies()
            .filter(|(_, u)| u.pos.dist_sq(&center) <= radius.length_sq())
            .map(|(id, _)| id)
            .collect()
    }

    fn is_preferred_enemy(&self, unit: UnitId) -> bool {
        self.unit(unit).preferred_enemy
    }

    fn can_attack_target(&self, unit: UnitId, _target: UnitId) -> bool {
        self.unit(unit).can_attack
    }

    fn attack_status(&self, unit: UnitId) -> AttackStatus {
        self.unit(unit).attack_status
    }

    fn combat_profile(&self, unit: UnitId) -> CombatProfile {
        self.unit(unit).profile
    }

    fn health_state(&self, unit: UnitId) -> HealthState {
        self.unit(unit).health
    }

    fn is_air_unit(&self, unit: UnitId) -> bool {
        self.unit(unit).air
    }

    fn has_ammo_pools(&self, unit: UnitId) -> bool {
        self.unit(unit).ammo_pools
    }

    fn has_ammo(&self, unit: UnitId) -> bool {
        self.unit(unit).ammo
    }

    fn reloads_automatically(&self, unit: UnitId) -> bool {
        self.unit(unit).auto_reload
    }

    fn is_rearming(&self, unit: UnitId) -> bool {
        self.unit(unit).rearming
    }

    fn friendly_building_locations(&self) -> Vec<CellPos> {
        self.buildings.clone()
    }
}

/// Order sink that records everything for assertions
#[derive(Debug, Default)]
pub struct RecordingOrders {
    pub orders: Vec<Order>,
    pub retreats: Vec<(Vec<UnitId>, RetreatOptions)>,
}

impl RecordingOrders {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BotOrders for RecordingOrders {
    fn queue_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    fn retreat(&mut self, units: &[UnitId], options: RetreatOptions) {
        self.retreats.push((units.to_vec(), options));
    }
}

/// Fixed-seed RNG and default config for state tests
pub fn control_parts() -> (ChaCha8Rng, SquadConfig) {
    (ChaCha8Rng::seed_from_u64(0), SquadConfig::default())
}
