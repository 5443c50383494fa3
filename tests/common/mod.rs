//! Scripted world and order sink for end-to-end squad scenarios

use std::collections::BTreeMap;

use vanguard_ai::engine::{
    AttackStatus, BotOrders, CombatProfile, HealthState, Order, RetreatOptions, TacticalWorld,
};
use vanguard_ai::{CellDist, CellPos, UnitId, WorldPos};

#[derive(Debug, Clone)]
pub struct ScriptedUnit {
    pub pos: WorldPos,
    pub alive: bool,
    pub owned: bool,
    pub visible: bool,
    pub profile: CombatProfile,
    pub health: HealthState,
    pub can_attack: bool,
    /// World units moved toward `goal` per simulation step
    pub speed: i32,
    pub goal: Option<WorldPos>,
}

#[derive(Debug, Default)]
pub struct ScriptedWorld {
    units: BTreeMap<UnitId, ScriptedUnit>,
    pub buildings: Vec<CellPos>,
    next_id: u32,
}

impl ScriptedWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, owned: bool, pos: WorldPos, attack_power: u32) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.insert(
            id,
            ScriptedUnit {
                pos,
                alive: true,
                owned,
                visible: true,
                profile: CombatProfile {
                    health_fraction: 1.0,
                    attack_power,
                    is_armed: attack_power > 0,
                },
                health: HealthState::Undamaged,
                can_attack: attack_power > 0,
                speed: 0,
                goal: None,
            },
        );
        id
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut ScriptedUnit {
        self.units.get_mut(&id).expect("unknown scripted unit")
    }

    fn unit(&self, id: UnitId) -> &ScriptedUnit {
        self.units.get(&id).expect("unknown scripted unit")
    }

    /// Advance every unit toward its goal by its speed (axis-wise clamp)
    pub fn step(&mut self) {
        for unit in self.units.values_mut() {
            let Some(goal) = unit.goal else { continue };
            if unit.speed == 0 || !unit.alive {
                continue;
            }
            unit.pos.x += (goal.x - unit.pos.x).clamp(-unit.speed, unit.speed);
            unit.pos.y += (goal.y - unit.pos.y).clamp(-unit.speed, unit.speed);
        }
    }

    fn live_enemies(&self) -> impl Iterator<Item = (UnitId, &ScriptedUnit)> {
        self.units
            .iter()
            .filter(|(_, u)| u.alive && !u.owned)
            .map(|(id, u)| (*id, u))
    }
}

impl TacticalWorld for ScriptedWorld {
    fn is_alive(&self, unit: UnitId) -> bool {
        self.unit(unit).alive
    }

    fn is_in_world(&self, unit: UnitId) -> bool {
        self.unit(unit).alive
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
        self.live_enemies()
            .min_by_key(|(_, u)| u.pos.dist_sq(&origin))
            .map(|(id, _)| id)
    }

    fn find_closest_enemy_within(&self, from: UnitId, radius: CellDist) -> Option<UnitId> {
        let origin = self.position(from);
        self.live_enemies()
            .filter(|(_, u)| u.pos.dist_sq(&origin) <= radius.length_sq())
            .min_by_key(|(_, u)| u.pos.dist_sq(&origin))
            .map(|(id, _)| id)
    }

    fn enemies_near(&self, center: WorldPos, radius: CellDist) -> Vec<UnitId> {
        self.live_enemies()
            .filter(|(_, u)| u.pos.dist_sq(&center) <= radius.length_sq())
            .map(|(id, _)| id)
            .collect()
    }

    fn is_preferred_enemy(&self, unit: UnitId) -> bool {
        !self.unit(unit).owned
    }

    fn can_attack_target(&self, unit: UnitId, _target: UnitId) -> bool {
        self.unit(unit).can_attack
    }

    fn attack_status(&self, _unit: UnitId) -> AttackStatus {
        AttackStatus::default()
    }

    fn combat_profile(&self, unit: UnitId) -> CombatProfile {
        self.unit(unit).profile
    }

    fn health_state(&self, unit: UnitId) -> HealthState {
        self.unit(unit).health
    }

    fn is_air_unit(&self, _unit: UnitId) -> bool {
        false
    }

    fn has_ammo_pools(&self, _unit: UnitId) -> bool {
        false
    }

    fn has_ammo(&self, _unit: UnitId) -> bool {
        true
    }

    fn reloads_automatically(&self, _unit: UnitId) -> bool {
        true
    }

    fn is_rearming(&self, _unit: UnitId) -> bool {
        false
    }

    fn friendly_building_locations(&self) -> Vec<CellPos> {
        self.buildings.clone()
    }
}

/// Order sink that records everything for assertions
#[derive(Debug, Default)]
pub struct OrderLog {
    pub orders: Vec<Order>,
    pub retreats: Vec<(Vec<UnitId>, RetreatOptions)>,
}

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<vanguard_ai::OrderKind> {
        self.orders.iter().map(|o| o.kind).collect()
    }
}

impl BotOrders for OrderLog {
    fn queue_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    fn retreat(&mut self, units: &[UnitId], options: RetreatOptions) {
        self.retreats.push((units.to_vec(), options));
    }
}
