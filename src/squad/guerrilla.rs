//! Guerrilla squad states: Idle -> AttackMove -> Hit <-> Run, Flee
//!
//! Hit-and-run: the squad advances like an assault squad, but once it
//! takes losses or damage mid-fight it pulls back to a rally point for a
//! couple of ticks before striking again. A guerrilla squad that flees
//! reforms at base instead of disbanding.

use crate::core::types::{CellDist, UnitId};
use crate::engine::orders::Order;
use crate::squad::base::{
    issue_engagement_orders, partition_for_attack, pathfind_leader, profiles_of,
    random_building_location, retreat, Advance, AdvanceController, TargetLock,
};
use crate::squad::fuzzy::AttackOrFlee;
use crate::squad::machine::{Control, SquadState, Transition};
use crate::squad::Squad;

/// Waiting at the rally point for a fight worth picking
#[derive(Debug, Default)]
pub struct GuerrillaIdle {
    leader: Option<UnitId>,
    squad_size: usize,
}

impl GuerrillaIdle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SquadState for GuerrillaIdle {
    fn name(&self) -> &'static str {
        "guerrilla-idle"
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        let need_new_leader = match self.leader {
            Some(l) => ctx.world.unit_cannot_be_ordered(l) || self.squad_size != squad.members.len(),
            None => true,
        };
        if need_new_leader {
            self.leader = Some(pathfind_leader(squad, ctx.world)?.unit);
            self.squad_size = squad.members.len();
        }
        let leader = self.leader?;

        if !squad.is_target_valid(ctx.world) {
            squad.set_target(Some(ctx.world.find_closest_enemy(leader)?));
        }
        let target = squad.target?;

        let enemies = ctx.world.enemies_near(
            ctx.world.position(target),
            CellDist(ctx.config.idle_scan_radius),
        );
        if enemies.is_empty() {
            retreat(squad, ctx, false, true, true);
            return None;
        }

        let own = profiles_of(ctx.world, &squad.unit_ids());
        let theirs = profiles_of(ctx.world, &enemies);
        if AttackOrFlee::default().can_attack(&own, &theirs) {
            // Re-pick the rally point per sortie so the squad never
            // withdraws to a structure that was lost in the meantime.
            squad.base_location = random_building_location(ctx, squad.base_location);
            Some(Transition::to(GuerrillaAttackMove::new()))
        } else {
            retreat(squad, ctx, true, true, true);
            None
        }
    }
}

/// Formation advance, identical machinery to the assault flow
#[derive(Debug, Default)]
pub struct GuerrillaAttackMove {
    advance: AdvanceController,
}

impl GuerrillaAttackMove {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SquadState for GuerrillaAttackMove {
    fn name(&self) -> &'static str {
        "guerrilla-attack-move"
    }

    fn activate(&mut self, _squad: &mut Squad, ctx: &mut Control) {
        self.advance.activate(ctx);
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        match self.advance.tick(squad, ctx) {
            Advance::ContactMade => Some(Transition::to(GuerrillaHit::new())),
            Advance::NoTargetAnywhere => Some(Transition::to(GuerrillaFlee::new())),
            Advance::Moving | Advance::Recovering | Advance::RosterEmptied => None,
        }
    }
}

/// Engagement with damage tracking; losses or fresh damage trigger a run
#[derive(Debug, Default)]
pub struct GuerrillaHit {
    leader: Option<UnitId>,
    lock: TargetLock,
    /// First tick of an activation span only records damage states, so a
    /// squad never runs from wounds it brought into the fight
    is_first_tick: bool,
    squad_size: usize,
}

impl GuerrillaHit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SquadState for GuerrillaHit {
    fn name(&self) -> &'static str {
        "guerrilla-hit"
    }

    fn activate(&mut self, _squad: &mut Squad, _ctx: &mut Control) {
        self.is_first_tick = true;
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        let leader = match self.leader {
            Some(l) if !ctx.world.unit_cannot_be_ordered(l) => l,
            _ => squad.members.first()?.unit,
        };

        // Rescan to face an ambush; no threat in range means the strike is
        // over, go back to formation movement.
        let radius = CellDist(ctx.config.attack_scan_radius);
        let Some(near) = ctx.world.find_closest_enemy_within(leader, radius) else {
            squad.set_target(ctx.world.find_closest_enemy(leader));
            return Some(Transition::to(GuerrillaAttackMove::new()));
        };
        squad.set_target(Some(near));

        let mut health_change = false;
        for m in &mut squad.members {
            let now = ctx.world.health_state(m.unit);
            if now != m.last_health {
                if m.last_health < now {
                    health_change = true;
                }
                m.last_health = now;
            }
        }

        let free = self.lock.free_attack_allowed(ctx.config.attack_scan_radius);
        let plan = partition_for_attack(squad, ctx, leader, near, free, false);

        if plan.cannot_retaliate {
            return Some(Transition::to(GuerrillaFlee::new()).and_tick());
        }

        self.lock.bump(squad.target);

        let unit_lost = self.squad_size > squad.members.len();
        self.squad_size = squad.members.len();

        if (health_change || unit_lost) && !self.is_first_tick {
            return Some(Transition::to(GuerrillaRun::new()).remembering().and_tick());
        }

        self.leader = plan.leader;
        issue_engagement_orders(&plan, near, ctx);
        self.is_first_tick = false;
        None
    }
}

/// Short withdrawal to the rally point between strikes
#[derive(Debug, Default)]
pub struct GuerrillaRun {
    remaining: i32,
    ordered: bool,
}

impl GuerrillaRun {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SquadState for GuerrillaRun {
    fn name(&self) -> &'static str {
        "guerrilla-run"
    }

    fn activate(&mut self, _squad: &mut Squad, ctx: &mut Control) {
        self.remaining = ctx.config.run_cooldown_ticks;
        self.ordered = false;
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        if self.remaining <= 0 {
            // Strike again whether or not the withdrawal finished
            return Some(Transition::revert_or(GuerrillaHit::new()).and_tick());
        }
        self.remaining -= 1;

        if !self.ordered {
            ctx.orders
                .queue_order(Order::move_group(squad.unit_ids(), squad.base_location));
            self.ordered = true;
        }
        None
    }
}

/// Withdraw and reform; guerrilla squads are not disbanded
#[derive(Debug, Default)]
pub struct GuerrillaFlee;

impl GuerrillaFlee {
    pub fn new() -> Self {
        Self
    }
}

impl SquadState for GuerrillaFlee {
    fn name(&self) -> &'static str {
        "guerrilla-flee"
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        retreat(squad, ctx, true, true, true);
        Some(Transition::to(GuerrillaIdle::new()))
    }
}
