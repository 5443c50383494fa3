//! Machinery shared by the behavior state families
//!
//! Ground and guerrilla squads advance behind a pathfinding leader with
//! identical regroup and stuck-recovery logic ([`AdvanceController`]); all
//! three families classify members into attackers and followers the same
//! way ([`partition_for_attack`]).

use rand::Rng;

use crate::core::types::{CellDist, CellPos, UnitId, WorldPos, CELL_SIZE};
use crate::engine::orders::{Order, RetreatOptions};
use crate::engine::world::{CombatProfile, TacticalWorld};
use crate::squad::fuzzy::AttackOrFlee;
use crate::squad::machine::Control;
use crate::squad::Squad;

/// The squad's pathfinding reference unit with the position snapshot taken
/// when it was chosen
///
/// The anchor is deliberately frozen at selection time: stuck detection
/// compares current position against it to measure net progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderRef {
    pub unit: UnitId,
    pub anchor: WorldPos,
}

/// Pick the squad's pathfinding leader: the first orderable member
///
/// Geometric closest-to-target is intentionally not used; straight-line
/// distance says nothing about pathfinding distance on the map.
pub fn pathfind_leader(squad: &Squad, world: &dyn TacticalWorld) -> Option<LeaderRef> {
    squad
        .members
        .iter()
        .find(|m| !world.unit_cannot_be_ordered(m.unit))
        .map(|m| LeaderRef {
            unit: m.unit,
            anchor: world.position(m.unit),
        })
}

/// Pull the whole squad back toward base through the host's retreat
/// capability
pub fn retreat(squad: &Squad, ctx: &mut Control, flee: bool, rearm: bool, repair: bool) {
    ctx.orders
        .retreat(&squad.unit_ids(), RetreatOptions { flee, rearm, repair });
}

/// Pick a rally cell among the bot's own structures, drawing from the
/// shared seeded RNG; keeps `fallback` when the bot has no structures left
pub fn random_building_location(ctx: &mut Control, fallback: CellPos) -> CellPos {
    let candidates = ctx.world.friendly_building_locations();
    if candidates.is_empty() {
        fallback
    } else {
        candidates[ctx.rng.gen_range(0..candidates.len())]
    }
}

/// Squared-distance proxy for the ground footprint of the squad, assuming
/// one unit per cell
///
/// Cohesion checks compare member distances against multiples of this:
/// the leader waits past 5x, stragglers past 2x are hurried along.
pub fn occupied_area(squad: &Squad) -> i64 {
    squad.members.len() as i64 * (CELL_SIZE as i64) * (CELL_SIZE as i64)
}

/// Geometric center of the roster's current positions
pub fn squad_center(squad: &Squad, world: &dyn TacticalWorld) -> WorldPos {
    if squad.members.is_empty() {
        return WorldPos::ZERO;
    }
    let n = squad.members.len() as i64;
    let (sx, sy) = squad.members.iter().fold((0i64, 0i64), |(sx, sy), m| {
        let p = world.position(m.unit);
        (sx + p.x as i64, sy + p.y as i64)
    });
    WorldPos::new((sx / n) as i32, (sy / n) as i32)
}

/// Combat profiles for a set of units, in the given order
pub fn profiles_of(world: &dyn TacticalWorld, units: &[UnitId]) -> Vec<CombatProfile> {
    units.iter().map(|u| world.combat_profile(*u)).collect()
}

/// Re-run the attack-or-flee heuristic against the enemies currently
/// around the squad; true means the fight has turned and the squad should
/// withdraw
pub fn should_flee(squad: &Squad, ctx: &Control, radius: CellDist) -> bool {
    let center = squad_center(squad, ctx.world);
    let enemies = ctx.world.enemies_near(center, radius);
    if enemies.is_empty() {
        return false;
    }
    let own = profiles_of(ctx.world, &squad.unit_ids());
    let theirs = profiles_of(ctx.world, &enemies);
    !AttackOrFlee::default().can_attack(&own, &theirs)
}

/// Outcome of one [`AdvanceController`] tick
#[derive(Debug, PartialEq, Eq)]
pub enum Advance {
    /// Formation movement orders were issued; stay in the advance state
    Moving,
    /// Stuck recovery is running; orders were issued, stay put
    Recovering,
    /// An enemy entered attack-scan range; squad target was updated
    ContactMade,
    /// No preferred enemy exists anywhere; caller should flee or disband
    NoTargetAnywhere,
    /// Stuck-kick pruning emptied the roster; abort this tick
    RosterEmptied,
}

/// Leader-guided advance with regroup and two-phase stuck recovery
///
/// Phase 1 ("make way"): the rest of the squad scatters for a couple of
/// ticks in case it is blocking the leader's path. Phase 2 ("kick"): units
/// that still cannot move at all are removed from the roster and stopped,
/// so the squad never deadlocks on an unpathable member.
#[derive(Debug)]
pub struct AdvanceController {
    failed_attempts: i32,
    make_way: i32,
    can_move_after_make_way: bool,
    stuck_dist_threshold: i64,
    leader: Option<LeaderRef>,
    last_leader_pos: WorldPos,
    last_squad_size: usize,
}

impl AdvanceController {
    pub fn new() -> Self {
        Self {
            failed_attempts: 0,
            make_way: 0,
            can_move_after_make_way: true,
            stuck_dist_threshold: 0,
            leader: None,
            last_leader_pos: WorldPos::ZERO,
            last_squad_size: 0,
        }
    }

    /// Reset counters for a fresh activation of the owning state
    pub fn activate(&mut self, ctx: &Control) {
        // Negative start gives the squad tolerance to group up before the
        // first stuck check can trigger.
        self.failed_attempts = -(ctx.config.max_attempts_to_advance * 2);
        self.make_way = ctx.config.make_way_ticks;
        self.can_move_after_make_way = true;
        self.stuck_dist_threshold = ctx.config.stuck_dist_threshold();
        self.leader = None;
        self.last_leader_pos = WorldPos::ZERO;
        self.last_squad_size = 0;
    }

    pub fn leader(&self) -> Option<LeaderRef> {
        self.leader
    }

    /// One advance pass: revalidate leader and target, check for contact,
    /// then either run stuck recovery or issue regroup movement
    pub fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Advance {
        let need_new_leader = match self.leader {
            Some(l) => {
                ctx.world.unit_cannot_be_ordered(l.unit)
                    || self.last_squad_size != squad.members.len()
            }
            None => true,
        };
        if need_new_leader {
            self.leader = pathfind_leader(squad, ctx.world);
        }
        self.last_squad_size = squad.members.len();
        let Some(leader) = self.leader else {
            return Advance::RosterEmptied;
        };

        if !squad.is_target_valid(ctx.world) {
            match ctx.world.find_closest_enemy(leader.unit) {
                Some(t) => squad.target = Some(t),
                None => return Advance::NoTargetAnywhere,
            }
        }
        let Some(target) = squad.target else {
            return Advance::NoTargetAnywhere;
        };

        // Contact: hand over to the engagement state.
        if let Some(enemy) = ctx
            .world
            .find_closest_enemy_within(leader.unit, CellDist(ctx.config.attack_scan_radius))
        {
            squad.target = Some(enemy);
            return Advance::ContactMade;
        }

        let area = occupied_area(squad);

        if self.failed_attempts >= ctx.config.max_attempts_to_advance {
            return self.recover(squad, ctx, leader, area, target);
        }

        let leader_pos = ctx.world.position(leader.unit);

        // Progress check against the per-tick snapshot. Right after a
        // recovery pass (make_way spent) only re-record the position.
        if self.make_way > 0 {
            if leader_pos.dist_sq(&self.last_leader_pos) < self.stuck_dist_threshold / 2 {
                self.failed_attempts += 1;
            } else {
                self.failed_attempts = 0;
                self.can_move_after_make_way = true;
                self.last_leader_pos = leader_pos;
            }
        } else {
            self.make_way = ctx.config.make_way_ticks;
            self.last_leader_pos = leader_pos;
        }

        // Regroup: the leader waits while anyone is left far behind;
        // stragglers are hurried toward the leader.
        let leader_must_wait = squad
            .members
            .iter()
            .any(|m| ctx.world.position(m.unit).dist_sq(&leader_pos) > area * 5);

        if leader_must_wait {
            ctx.orders.queue_order(Order::stop(leader.unit));
        } else {
            ctx.orders
                .queue_order(Order::attack_move(leader.unit, ctx.world.location(target)));
        }

        let stragglers: Vec<UnitId> = squad
            .members
            .iter()
            .filter(|m| ctx.world.position(m.unit).dist_sq(&leader_pos) >= area * 2)
            .map(|m| m.unit)
            .collect();
        if !stragglers.is_empty() {
            ctx.orders
                .queue_order(Order::attack_move_group(stragglers, leader_pos.to_cell()));
        }

        Advance::Moving
    }

    fn recover(
        &mut self,
        squad: &mut Squad,
        ctx: &mut Control,
        leader: LeaderRef,
        area: i64,
        target: UnitId,
    ) -> Advance {
        // Phase 2, kick: scattering did not free the leader, so remove
        // members that cannot move at all.
        if !self.can_move_after_make_way {
            let mut stop_units: Vec<UnitId> = Vec::new();
            let leader_pos = ctx.world.position(leader.unit);

            let leader_stuck = leader_pos.dist_sq(&leader.anchor) < self.stuck_dist_threshold
                && !ctx.world.attack_status(leader.unit).is_attacking;

            if leader_stuck {
                stop_units.push(leader.unit);
                squad.remove_member(leader.unit);
            } else {
                let world = ctx.world;
                let threshold = self.stuck_dist_threshold;
                // Sweep and compact in place; kicked units must not shift
                // iteration over the rest of the roster.
                squad.members.retain_mut(|m| {
                    let pos = world.position(m.unit);
                    let dist_to_leader = pos.dist_sq(&leader_pos);
                    let kick = pos.dist_sq(&m.last_pos) < threshold
                        && dist_to_leader > m.last_pos.dist_sq(&leader.anchor)
                        && dist_to_leader > 5 * area
                        && !world.attack_status(m.unit).is_attacking;
                    if kick {
                        stop_units.push(m.unit);
                        false
                    } else {
                        m.last_pos = pos;
                        true
                    }
                });
            }

            if squad.members.is_empty() {
                return Advance::RosterEmptied;
            }

            tracing::debug!(squad = ?squad.id, kicked = stop_units.len(),
                "stuck recovery kicked immobile units");

            // Partial reset: re-check progress after a short grace period
            // instead of restarting the whole tolerance window.
            self.failed_attempts = ctx.config.max_attempts_to_advance - 2;
            self.leader = pathfind_leader(squad, ctx.world);

            if let Some(new_leader) = self.leader {
                ctx.orders
                    .queue_order(Order::attack_move(new_leader.unit, ctx.world.location(target)));
            }
            if !stop_units.is_empty() {
                ctx.orders.queue_order(Order::stop_group(stop_units));
            }
            self.make_way = 0;
            return Advance::Recovering;
        }

        // Phase 1, make way: keep the leader pushing toward the target
        // while everyone else scatters out of its path.
        if self.make_way > 0 {
            ctx.orders
                .queue_order(Order::attack_move(leader.unit, ctx.world.location(target)));

            let others: Vec<UnitId> = squad
                .members
                .iter()
                .map(|m| m.unit)
                .filter(|u| *u != leader.unit)
                .collect();
            if !others.is_empty() {
                ctx.orders.queue_order(Order::scatter_group(others.clone()));
            }

            if self.make_way == 1 {
                // Grace period for the squad to regroup after scattering
                self.failed_attempts = -ctx.config.make_way_ticks;

                // The target itself may be what made the path unsolvable
                squad.target = ctx.world.find_closest_enemy(leader.unit);
                self.can_move_after_make_way = false;

                if !others.is_empty() {
                    ctx.orders.queue_order(
                        Order::attack_move_group(others, ctx.world.location(leader.unit)).queued(),
                    );
                }
            }

            self.make_way -= 1;
        }

        Advance::Recovering
    }
}

impl Default for AdvanceController {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-target counter bounding expensive range-seeking attack orders
///
/// Once a squad has spent more ticks than the scan-radius-derived budget
/// trying to close on one target, approaching units are sent to follow the
/// leader instead of re-pathing toward the target every tick.
#[derive(Debug, Default)]
pub struct TargetLock {
    former_target: Option<UnitId>,
    try_attack: i32,
}

impl TargetLock {
    /// True while free range-seeking attack orders are still allowed
    pub fn free_attack_allowed(&self, budget: i32) -> bool {
        self.try_attack <= budget
    }

    /// Count one engagement tick; a target switch restarts the budget
    pub fn bump(&mut self, current: Option<UnitId>) {
        self.try_attack += 1;
        if self.former_target != current {
            self.try_attack = 0;
            self.former_target = current;
        }
    }
}

/// Member classification for one engagement tick
#[derive(Debug, Default)]
pub struct EngagementPlan {
    /// Engagement reference unit; may differ from the input leader when a
    /// member is maneuvering closer to the target
    pub leader: Option<UnitId>,
    pub attacking: Vec<UnitId>,
    pub following: Vec<UnitId>,
    /// Air units out of ammo that must fly home (protection squads only)
    pub resupplying: Vec<UnitId>,
    /// True when not a single member can fight back against the target
    pub cannot_retaliate: bool,
}

/// Classify every member for this engagement tick
///
/// `air_resupply_rules` adds the protection-squad branch that routes
/// ammo-less aircraft to resupply before considering them for the fight.
pub fn partition_for_attack(
    squad: &Squad,
    ctx: &Control,
    leader: UnitId,
    target: UnitId,
    free_attack_allowed: bool,
    air_resupply_rules: bool,
) -> EngagementPlan {
    let world = ctx.world;
    let target_pos = world.position(target);

    let mut plan = EngagementPlan {
        leader: Some(leader),
        cannot_retaliate: true,
        ..Default::default()
    };
    let mut leader_dist = world.position(leader).dist_sq(&target_pos);

    for m in &squad.members {
        let u = m.unit;

        if air_resupply_rules && world.is_air_unit(u) && world.has_ammo_pools(u) {
            if world.attack_status(u).is_approaching {
                plan.cannot_retaliate = false;
                continue;
            }

            if !world.reloads_automatically(u) {
                if world.is_rearming(u) {
                    continue;
                }
                if !world.has_ammo(u) {
                    plan.resupplying.push(u);
                    continue;
                }
            }

            if world.can_attack_target(u, target) {
                plan.attacking.push(u);
                plan.cannot_retaliate = false;
            } else {
                plan.following.push(u);
            }
            continue;
        }

        let status = world.attack_status(u);

        // A member already maneuvering closer than the current reference
        // takes over as engagement leader.
        if status.is_approaching {
            let dist = world.position(u).dist_sq(&target_pos);
            if dist < leader_dist {
                plan.leader = Some(u);
                leader_dist = dist;
            }
        }

        if status.is_attacking {
            plan.cannot_retaliate = false;
        } else if world.can_attack_target(u, target) {
            if !free_attack_allowed && status.is_approaching {
                plan.following.push(u);
                continue;
            }
            plan.attacking.push(u);
            plan.cannot_retaliate = false;
        } else {
            plan.following.push(u);
        }
    }

    plan
}

/// Queue the orders a finished [`EngagementPlan`] calls for
pub fn issue_engagement_orders(plan: &EngagementPlan, target: UnitId, ctx: &mut Control) {
    if !plan.resupplying.is_empty() {
        ctx.orders
            .queue_order(Order::return_to_base_group(plan.resupplying.clone()));
    }
    if let Some(leader) = plan.leader {
        if !plan.following.is_empty() {
            ctx.orders.queue_order(Order::attack_move_group(
                plan.following.clone(),
                ctx.world.location(leader),
            ));
        }
    }
    if !plan.attacking.is_empty() {
        ctx.orders
            .queue_order(Order::attack_group(plan.attacking.clone(), target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SquadConfig;
    use crate::core::types::CELL_SIZE;
    use crate::engine::orders::OrderKind;
    use crate::squad::SquadKind;
    use crate::testkit::{control_parts, FakeWorld, RecordingOrders};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn squad_of(world: &mut FakeWorld, positions: &[WorldPos]) -> Squad {
        let mut squad = Squad::new(SquadKind::Assault, CellPos::new(0, 0));
        for pos in positions {
            let u = world.add_friendly(*pos);
            squad.add_member(u, world);
        }
        squad
    }

    #[test]
    fn test_pathfind_leader_skips_unorderable() {
        let mut world = FakeWorld::new();
        let mut squad = squad_of(
            &mut world,
            &[WorldPos::new(0, 0), WorldPos::new(100, 0)],
        );
        let first = squad.members[0].unit;
        let second = squad.members[1].unit;
        world.unit_mut(first).alive = false;

        let leader = pathfind_leader(&squad, &world).expect("one orderable member");
        assert_eq!(leader.unit, second);

        world.unit_mut(second).alive = false;
        assert!(pathfind_leader(&squad, &world).is_none());
        squad.prune(&world);
        assert!(!squad.is_valid());
    }

    #[test]
    fn test_occupied_area_scales_with_roster() {
        let mut world = FakeWorld::new();
        let squad = squad_of(&mut world, &[WorldPos::ZERO; 3]);
        assert_eq!(
            occupied_area(&squad),
            3 * CELL_SIZE as i64 * CELL_SIZE as i64
        );
    }

    #[test]
    fn test_target_lock_resets_on_switch() {
        let mut lock = TargetLock::default();
        let budget = 2;
        for _ in 0..4 {
            lock.bump(Some(UnitId(9)));
        }
        assert!(!lock.free_attack_allowed(budget));

        lock.bump(Some(UnitId(10)));
        assert!(lock.free_attack_allowed(budget));
    }

    #[test]
    fn test_random_building_location_deterministic() {
        let mut world = FakeWorld::new();
        world.buildings = vec![CellPos::new(1, 1), CellPos::new(2, 2), CellPos::new(3, 3)];
        let mut orders = RecordingOrders::new();
        let (_, config) = control_parts();

        let mut picks = Vec::new();
        for _ in 0..2 {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let mut ctx = Control::new(&world, &mut orders, &mut rng, &config);
            picks.push(random_building_location(&mut ctx, CellPos::new(0, 0)));
        }
        assert_eq!(picks[0], picks[1]);
        assert!(world.buildings.contains(&picks[0]));
    }

    #[test]
    fn test_random_building_location_fallback() {
        let world = FakeWorld::new();
        let mut orders = RecordingOrders::new();
        let (mut rng, config) = control_parts();
        let mut ctx = Control::new(&world, &mut orders, &mut rng, &config);
        assert_eq!(
            random_building_location(&mut ctx, CellPos::new(4, 4)),
            CellPos::new(4, 4)
        );
    }

    #[test]
    fn test_partition_attacker_and_follower() {
        let mut world = FakeWorld::new();
        let mut squad = squad_of(
            &mut world,
            &[WorldPos::new(0, 0), WorldPos::new(CELL_SIZE, 0)],
        );
        let shooter = squad.members[0].unit;
        let escort = squad.members[1].unit;
        let enemy = world.add_enemy(WorldPos::new(4 * CELL_SIZE, 0));

        world.unit_mut(shooter).can_attack = true;
        world.unit_mut(escort).can_attack = false;
        squad.set_target(Some(enemy));

        let mut orders = RecordingOrders::new();
        let (mut rng, config) = control_parts();
        let ctx = Control::new(&world, &mut orders, &mut rng, &config);

        let plan = partition_for_attack(&squad, &ctx, shooter, enemy, true, false);
        assert_eq!(plan.attacking, vec![shooter]);
        assert_eq!(plan.following, vec![escort]);
        assert!(!plan.cannot_retaliate);
    }

    #[test]
    fn test_partition_cannot_retaliate_when_nobody_fights() {
        let mut world = FakeWorld::new();
        let mut squad = squad_of(&mut world, &[WorldPos::ZERO, WorldPos::new(100, 0)]);
        let enemy = world.add_enemy(WorldPos::new(4 * CELL_SIZE, 0));
        for m in &squad.members {
            world.unit_mut(m.unit).can_attack = false;
        }
        squad.set_target(Some(enemy));
        let leader = squad.members[0].unit;

        let mut orders = RecordingOrders::new();
        let (mut rng, config) = control_parts();
        let ctx = Control::new(&world, &mut orders, &mut rng, &config);

        let plan = partition_for_attack(&squad, &ctx, leader, enemy, true, false);
        assert!(plan.cannot_retaliate);
        assert_eq!(plan.following.len(), 2);
    }

    #[test]
    fn test_partition_closer_approacher_takes_leadership() {
        let mut world = FakeWorld::new();
        let mut squad = squad_of(
            &mut world,
            &[WorldPos::new(0, 0), WorldPos::new(3 * CELL_SIZE, 0)],
        );
        let rear = squad.members[0].unit;
        let vanguard = squad.members[1].unit;
        let enemy = world.add_enemy(WorldPos::new(5 * CELL_SIZE, 0));

        world.unit_mut(vanguard).attack_status.is_approaching = true;
        squad.set_target(Some(enemy));

        let mut orders = RecordingOrders::new();
        let (mut rng, config) = control_parts();
        let ctx = Control::new(&world, &mut orders, &mut rng, &config);

        let plan = partition_for_attack(&squad, &ctx, rear, enemy, true, false);
        assert_eq!(plan.leader, Some(vanguard));
    }

    #[test]
    fn test_partition_budget_exhausted_sends_approachers_to_follow() {
        let mut world = FakeWorld::new();
        let mut squad = squad_of(&mut world, &[WorldPos::ZERO]);
        let unit = squad.members[0].unit;
        let enemy = world.add_enemy(WorldPos::new(4 * CELL_SIZE, 0));

        world.unit_mut(unit).can_attack = true;
        world.unit_mut(unit).attack_status.is_approaching = true;
        squad.set_target(Some(enemy));

        let mut orders = RecordingOrders::new();
        let (mut rng, config) = control_parts();
        let ctx = Control::new(&world, &mut orders, &mut rng, &config);

        let plan = partition_for_attack(&squad, &ctx, unit, enemy, false, false);
        assert!(plan.attacking.is_empty());
        assert_eq!(plan.following, vec![unit]);
    }

    /// Frozen squad: nobody ever moves, so the controller must escalate
    /// through make-way into kicking, never looping without orders.
    #[test]
    fn test_stuck_recovery_escalates_and_kicks() {
        let mut world = FakeWorld::new();
        let mut squad = squad_of(
            &mut world,
            &[WorldPos::new(0, 0), WorldPos::new(2 * CELL_SIZE, 0)],
        );
        // Distant target far outside attack scan radius
        let _enemy = world.add_enemy(WorldPos::new(100 * CELL_SIZE, 0));

        let mut orders = RecordingOrders::new();
        let config = SquadConfig {
            max_attempts_to_advance: 2,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut controller = AdvanceController::new();
        {
            let ctx = Control::new(&world, &mut orders, &mut rng, &config);
            controller.activate(&ctx);
        }

        let initial_size = squad.members.len();
        let mut scattered = false;
        let mut kicked = false;

        for _ in 0..40 {
            let before = orders.orders.len();
            let mut ctx = Control::new(&world, &mut orders, &mut rng, &config);
            let outcome = controller.tick(&mut squad, &mut ctx);
            // Every pass must do something observable
            assert!(
                orders.orders.len() > before || outcome == Advance::RosterEmptied,
                "controller looped without issuing orders"
            );

            scattered |= orders.orders[before..]
                .iter()
                .any(|o| o.kind == OrderKind::Scatter);
            if squad.members.len() < initial_size {
                kicked = true;
                break;
            }
            if outcome == Advance::RosterEmptied {
                kicked = true;
                break;
            }
        }

        assert!(scattered, "make-way phase never scattered the squad");
        assert!(kicked, "kick phase never shrank the roster");
    }

    #[test]
    fn test_contact_switches_target_and_reports() {
        let mut world = FakeWorld::new();
        let mut squad = squad_of(&mut world, &[WorldPos::ZERO]);
        let near_enemy = world.add_enemy(WorldPos::new(3 * CELL_SIZE, 0));

        let mut orders = RecordingOrders::new();
        let (mut rng, config) = control_parts();
        let mut controller = AdvanceController::new();
        {
            let ctx = Control::new(&world, &mut orders, &mut rng, &config);
            controller.activate(&ctx);
        }

        let mut ctx = Control::new(&world, &mut orders, &mut rng, &config);
        let outcome = controller.tick(&mut squad, &mut ctx);
        assert_eq!(outcome, Advance::ContactMade);
        assert_eq!(squad.target, Some(near_enemy));
    }

    #[test]
    fn test_no_enemy_anywhere_reports() {
        let mut world = FakeWorld::new();
        let mut squad = squad_of(&mut world, &[WorldPos::ZERO]);

        let mut orders = RecordingOrders::new();
        let (mut rng, config) = control_parts();
        let mut controller = AdvanceController::new();
        {
            let ctx = Control::new(&world, &mut orders, &mut rng, &config);
            controller.activate(&ctx);
        }

        let mut ctx = Control::new(&world, &mut orders, &mut rng, &config);
        assert_eq!(controller.tick(&mut squad, &mut ctx), Advance::NoTargetAnywhere);
    }
}
