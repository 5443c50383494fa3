//! Assault squad states: Idle -> AttackMove -> Attack -> Flee -> Idle
//!
//! The assault flow gathers at base, advances behind a pathfinding leader,
//! engages on contact and withdraws (disbanding) when the fight turns.

use crate::core::types::{CellDist, UnitId};
use crate::squad::base::{
    issue_engagement_orders, partition_for_attack, pathfind_leader, profiles_of, retreat,
    should_flee, Advance, AdvanceController, TargetLock,
};
use crate::squad::fuzzy::AttackOrFlee;
use crate::squad::machine::{Control, SquadState, Transition};
use crate::squad::Squad;

/// Waiting at base for a fight worth picking
#[derive(Debug, Default)]
pub struct GroundIdle {
    leader: Option<UnitId>,
}

impl GroundIdle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SquadState for GroundIdle {
    fn name(&self) -> &'static str {
        "ground-idle"
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        let leader = match self.leader {
            Some(l) if !ctx.world.unit_cannot_be_ordered(l) => l,
            _ => pathfind_leader(squad, ctx.world)?.unit,
        };
        self.leader = Some(leader);

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
            Some(Transition::to(GroundAttackMove::new()))
        } else {
            retreat(squad, ctx, true, true, true);
            None
        }
    }
}

/// Formation advance toward the target behind the pathfinding leader
#[derive(Debug, Default)]
pub struct GroundAttackMove {
    advance: AdvanceController,
}

impl GroundAttackMove {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SquadState for GroundAttackMove {
    fn name(&self) -> &'static str {
        "ground-attack-move"
    }

    fn activate(&mut self, _squad: &mut Squad, ctx: &mut Control) {
        self.advance.activate(ctx);
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        match self.advance.tick(squad, ctx) {
            Advance::ContactMade => Some(Transition::to(GroundAttack::new())),
            Advance::NoTargetAnywhere => Some(Transition::to(GroundFlee::new())),
            Advance::Moving | Advance::Recovering | Advance::RosterEmptied => None,
        }
    }
}

/// Sustained engagement of the squad target
#[derive(Debug, Default)]
pub struct GroundAttack {
    leader: Option<UnitId>,
    lock: TargetLock,
}

impl GroundAttack {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SquadState for GroundAttack {
    fn name(&self) -> &'static str {
        "ground-attack"
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        let leader = match self.leader {
            Some(l) if !ctx.world.unit_cannot_be_ordered(l) => l,
            _ => squad.members.first()?.unit,
        };

        // Rescan so an ambush from a different direction is fought, not
        // ignored. No threat in range means the fight is over here.
        let radius = CellDist(ctx.config.attack_scan_radius);
        let Some(near) = ctx.world.find_closest_enemy_within(leader, radius) else {
            squad.set_target(ctx.world.find_closest_enemy(leader));
            return Some(Transition::to(GroundAttackMove::new()));
        };
        if !squad.is_target_valid(ctx.world) {
            squad.set_target(Some(near));
        }
        let target = squad.target?;

        let free = self.lock.free_attack_allowed(ctx.config.attack_scan_radius);
        let plan = partition_for_attack(squad, ctx, leader, target, free, false);

        // should_flee alone cannot withdraw a squad that has no way to hit
        // its target, hence the cannot_retaliate escape.
        if should_flee(squad, ctx, radius) || plan.cannot_retaliate {
            return Some(Transition::to(GroundFlee::new()));
        }

        self.lock.bump(squad.target);
        self.leader = plan.leader;
        issue_engagement_orders(&plan, target, ctx);
        None
    }
}

/// Withdraw to base and disband
#[derive(Debug, Default)]
pub struct GroundFlee;

impl GroundFlee {
    pub fn new() -> Self {
        Self
    }
}

impl SquadState for GroundFlee {
    fn name(&self) -> &'static str {
        "ground-flee"
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        retreat(squad, ctx, true, true, true);
        Some(Transition::to(GroundIdle::new()))
    }

    fn deactivate(&mut self, _squad: &mut Squad, ctx: &mut Control) {
        ctx.dismiss_squad();
    }
}
