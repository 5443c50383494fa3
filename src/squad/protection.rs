//! Protection squad states: Idle <-> Attack <-> Flee
//!
//! Protection squads defend whatever the host points them at. They never
//! advance across the map on their own: targets are assigned or picked up
//! within the protection radius, engaged, and given up once out of sight
//! for too long. The engagement loop additionally routes ammo-less
//! aircraft home to resupply.

use crate::core::types::CellDist;
use crate::squad::base::{issue_engagement_orders, partition_for_attack, retreat, TargetLock};
use crate::squad::machine::{Control, SquadState, Transition};
use crate::squad::Squad;

/// Holding position until a threat is assigned or spotted
#[derive(Debug, Default)]
pub struct ProtectionIdle;

impl ProtectionIdle {
    pub fn new() -> Self {
        Self
    }
}

impl SquadState for ProtectionIdle {
    fn name(&self) -> &'static str {
        "protection-idle"
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        if !squad.is_target_valid(ctx.world) {
            retreat(squad, ctx, false, true, true);
            return None;
        }
        Some(Transition::to(ProtectionAttack::new()))
    }
}

/// Engaging the threat near the protected point
#[derive(Debug, Default)]
pub struct ProtectionAttack {
    lock: TargetLock,
    /// Remaining ticks an out-of-sight target is still chased
    backoff: i32,
}

impl ProtectionAttack {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SquadState for ProtectionAttack {
    fn name(&self) -> &'static str {
        "protection-attack"
    }

    fn activate(&mut self, _squad: &mut Squad, ctx: &mut Control) {
        self.backoff = ctx.config.backoff_ticks;
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        let leader = squad.members.first()?.unit;
        let radius = CellDist(ctx.config.protection_scan_radius);

        if !squad.is_target_valid(ctx.world) {
            match ctx.world.find_closest_enemy_within(leader, radius) {
                Some(t) => squad.set_target(Some(t)),
                None => return Some(Transition::to(ProtectionFlee::new())),
            }
        }

        // Rescan so the squad fights the closest intruder instead of
        // chasing its original target across the map.
        if let Some(t) = ctx.world.find_closest_enemy_within(leader, radius) {
            squad.set_target(Some(t));
        }
        let target = squad.target?;

        if !ctx.world.is_visible(target) {
            if self.backoff < 0 {
                self.backoff = ctx.config.backoff_ticks;
                return Some(Transition::to(ProtectionFlee::new()));
            }
            self.backoff -= 1;
            self.lock.bump(squad.target);
            return None;
        }

        let free = self.lock.free_attack_allowed(ctx.config.protection_scan_radius);
        let plan = partition_for_attack(squad, ctx, leader, target, free, true);

        if plan.cannot_retaliate {
            return Some(Transition::to(ProtectionFlee::new()));
        }

        self.lock.bump(squad.target);
        issue_engagement_orders(&plan, target, ctx);
        None
    }
}

/// Give up the chase: drop the target and fall back
#[derive(Debug, Default)]
pub struct ProtectionFlee;

impl ProtectionFlee {
    pub fn new() -> Self {
        Self
    }
}

impl SquadState for ProtectionFlee {
    fn name(&self) -> &'static str {
        "protection-flee"
    }

    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition> {
        squad.set_target(None);
        retreat(squad, ctx, true, true, true);
        Some(Transition::to(ProtectionIdle::new()))
    }
}
